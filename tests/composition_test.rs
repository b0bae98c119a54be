// Tool composition through the registry's invoker: orchestrators running
// sub-tools by name, short-circuiting on the first failure.

use anyhow::Result;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tempfile::TempDir;

use gdforge::tools::{tool_factory, Tool, ToolArgs, ToolContext, ToolRegistry};

struct StepTool {
    name: &'static str,
    exit_code: i32,
    runs: Arc<AtomicUsize>,
}

impl Tool for StepTool {
    fn name(&self) -> &str {
        self.name
    }

    fn description(&self) -> &str {
        "A pipeline step"
    }

    fn visible(&self) -> bool {
        false
    }

    fn execute(&self, _args: &ToolArgs, _ctx: &ToolContext) -> Result<i32> {
        self.runs.fetch_add(1, Ordering::SeqCst);
        Ok(self.exit_code)
    }
}

struct PipelineTool;

impl Tool for PipelineTool {
    fn name(&self) -> &str {
        "pipeline"
    }

    fn description(&self) -> &str {
        "Runs step-one then step-two"
    }

    fn execute(&self, _args: &ToolArgs, ctx: &ToolContext) -> Result<i32> {
        let code = ctx.invoke("step-one", &ToolArgs::new());
        if code != 0 {
            return Ok(code);
        }
        Ok(ctx.invoke("step-two", &ToolArgs::new()))
    }
}

fn pipeline_registry(
    step_one_code: i32,
) -> (ToolRegistry, Arc<AtomicUsize>, Arc<AtomicUsize>) {
    let one_runs = Arc::new(AtomicUsize::new(0));
    let two_runs = Arc::new(AtomicUsize::new(0));
    let one = one_runs.clone();
    let two = two_runs.clone();

    let registry = ToolRegistry::with_factories(vec![
        tool_factory(|| PipelineTool),
        tool_factory(move || StepTool {
            name: "step-one",
            exit_code: step_one_code,
            runs: one.clone(),
        }),
        tool_factory(move || StepTool {
            name: "step-two",
            exit_code: 0,
            runs: two.clone(),
        }),
    ]);
    (registry, one_runs, two_runs)
}

#[test]
fn orchestrator_runs_steps_through_the_registry() {
    let dir = TempDir::new().unwrap();
    let (registry, one_runs, two_runs) = pipeline_registry(0);

    let tool = registry.lookup("pipeline").unwrap();
    let ctx = ToolContext::new(dir.path(), &registry);
    assert_eq!(tool.execute(&ToolArgs::new(), &ctx).unwrap(), 0);
    assert_eq!(one_runs.load(Ordering::SeqCst), 1);
    assert_eq!(two_runs.load(Ordering::SeqCst), 1);
}

#[test]
fn first_failing_step_stops_the_pipeline() {
    let dir = TempDir::new().unwrap();
    let (registry, one_runs, two_runs) = pipeline_registry(2);

    let tool = registry.lookup("pipeline").unwrap();
    let ctx = ToolContext::new(dir.path(), &registry);
    assert_eq!(tool.execute(&ToolArgs::new(), &ctx).unwrap(), 2);
    assert_eq!(one_runs.load(Ordering::SeqCst), 1);
    assert_eq!(two_runs.load(Ordering::SeqCst), 0);
}

#[test]
fn invoking_a_missing_sub_tool_reports_failure_not_a_panic() {
    let dir = TempDir::new().unwrap();
    let registry = ToolRegistry::with_factories(vec![tool_factory(|| PipelineTool)]);

    let ctx = ToolContext::new(dir.path(), &registry);
    assert_eq!(ctx.invoke("step-one", &ToolArgs::new()), 1);
}

#[test]
fn hidden_steps_are_invocable_through_composition() {
    let dir = TempDir::new().unwrap();
    let (registry, one_runs, _) = pipeline_registry(0);

    // step-one is hidden from the menu but the invoker resolves it
    assert!(!registry
        .discover(false)
        .iter()
        .any(|t| t.name() == "step-one"));
    let ctx = ToolContext::new(dir.path(), &registry);
    assert_eq!(ctx.invoke("step-one", &ToolArgs::new()), 0);
    assert_eq!(one_runs.load(Ordering::SeqCst), 1);
}
