// Build orchestrator
//
// Runs the build steps listed under the "build" section of tools.json, in
// order, stopping at the first failure. Steps whose outputs already exist
// are skipped unless the section disables that.

use anyhow::Result;
use std::path::Path;
use walkdir::WalkDir;

use crate::cli::output;
use crate::tools::registry::Tool;
use crate::tools::types::{ArgValue, ArgumentSpec, ToolArgs, ToolContext};

pub struct BuildTool;

impl Tool for BuildTool {
    fn name(&self) -> &str {
        "build"
    }

    fn description(&self) -> &str {
        "Build everything: external libraries, then the plugin"
    }

    fn category(&self) -> &str {
        "build"
    }

    fn arguments(&self) -> Vec<ArgumentSpec> {
        vec![
            ArgumentSpec::bool("rebuild", "Rebuild even if outputs exist").default_bool(false),
            ArgumentSpec::bool("skip_deps", "Skip external library steps").default_bool(false),
        ]
    }

    fn execute(&self, args: &ToolArgs, ctx: &ToolContext) -> Result<i32> {
        let root_dir = ctx.root_dir();
        let rebuild = args.flag("rebuild");
        let skip_deps = args.flag("skip_deps");

        let section = ctx.tool_config("build");
        let priority: Vec<String> = section
            .get("priority")
            .and_then(|v| v.as_array())
            .map(|items| {
                items
                    .iter()
                    .filter_map(|i| i.as_str())
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default();
        let skip_if_exists = section
            .get("skip_if_exists")
            .and_then(|v| v.as_bool())
            .unwrap_or(true);

        if priority.is_empty() {
            output::error("No build priority defined in tools.json");
            return Ok(1);
        }

        println!();
        output::header("Building gdai");

        let steps: Vec<&String> = priority
            .iter()
            .filter(|name| {
                if skip_deps && name.starts_with("build-lib") {
                    println!("⏭️  Skipping {}", name);
                    false
                } else {
                    true
                }
            })
            .collect();

        let total = steps.len();
        for (index, name) in steps.iter().enumerate() {
            println!("\n[{}/{}] Building: {}", index + 1, total, name);
            output::thin_rule();

            if skip_if_exists && !rebuild && output_exists(root_dir, name) {
                println!("✓ '{}' output already exists, skipping", name);
                continue;
            }

            let sub_args = sub_args_for(name);
            let code = ctx.invoke(name, &sub_args);
            if code != 0 {
                output::error(&format!("'{}' failed, stopping the build", name));
                return Ok(code);
            }
        }

        output::success("Build complete");
        println!("\nNext steps:");
        println!("  - Run 'install' to copy the plugin into a Godot project");
        println!("  - Run 'generate-gdextension' if the manifest needs refreshing");
        println!();
        output::rule();
        Ok(0)
    }
}

/// Whether a step's output artifact is already on disk.
fn output_exists(root_dir: &Path, step: &str) -> bool {
    let ext_libs = root_dir.join("build_ext_libs");
    match step {
        "build-libgit2" => {
            let name = if cfg!(windows) { "git2.lib" } else { "libgit2.a" };
            ext_libs.join(name).exists()
        }
        "build-libhv" => {
            let name = if cfg!(windows) {
                "hv_static.lib"
            } else {
                "libhv_static.a"
            };
            ext_libs.join(name).exists()
        }
        "build-plugin" => {
            let bin_dir = root_dir.join("plugin").join("bin");
            bin_dir.exists()
                && WalkDir::new(&bin_dir)
                    .into_iter()
                    .filter_map(|e| e.ok())
                    .any(|e| {
                        e.path()
                            .extension()
                            .and_then(|ext| ext.to_str())
                            .map(|ext| matches!(ext, "dll" | "dylib" | "so"))
                            .unwrap_or(false)
                    })
        }
        _ => false,
    }
}

/// Argument mapping handed to each step. Library builds get their config,
/// the plugin build gets empty overlays so it falls back to the saved
/// build settings.
fn sub_args_for(step: &str) -> ToolArgs {
    if step.starts_with("build-lib") {
        return ToolArgs::new()
            .with("config", ArgValue::Str("Release".into()))
            .with("clean", ArgValue::Bool(false));
    }
    if step == "build-plugin" {
        return ToolArgs::new()
            .with("platform", ArgValue::Str(String::new()))
            .with("target", ArgValue::Str(String::new()))
            .with("architecture", ArgValue::Str(String::new()))
            .with("precision", ArgValue::Str(String::new()))
            .with("jobs", ArgValue::Int(0))
            .with("clean", ArgValue::Bool(false))
            .with("install", ArgValue::Bool(true));
    }
    ToolArgs::new()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::TOOLS_CONFIG_FILE;
    use crate::tools::types::ToolInvoker;
    use std::cell::RefCell;
    use std::fs;
    use tempfile::TempDir;

    struct RecordingInvoker {
        calls: RefCell<Vec<String>>,
        fail_on: Option<&'static str>,
    }

    impl RecordingInvoker {
        fn new(fail_on: Option<&'static str>) -> Self {
            Self {
                calls: RefCell::new(Vec::new()),
                fail_on,
            }
        }
    }

    impl ToolInvoker for RecordingInvoker {
        fn invoke(&self, name: &str, _args: &ToolArgs, _ctx: &ToolContext) -> i32 {
            self.calls.borrow_mut().push(name.to_string());
            if self.fail_on == Some(name) {
                1
            } else {
                0
            }
        }
    }

    fn write_priority(dir: &TempDir, priority: &str) {
        fs::write(
            dir.path().join(TOOLS_CONFIG_FILE),
            format!(r#"{{"build": {{"priority": {}, "skip_if_exists": false}}}}"#, priority),
        )
        .unwrap();
    }

    #[test]
    fn test_runs_steps_in_priority_order() {
        let dir = TempDir::new().unwrap();
        write_priority(&dir, r#"["build-libgit2", "build-libhv", "build-plugin"]"#);

        let invoker = RecordingInvoker::new(None);
        let ctx = ToolContext::new(dir.path(), &invoker);
        assert_eq!(BuildTool.execute(&ToolArgs::new(), &ctx).unwrap(), 0);
        assert_eq!(
            *invoker.calls.borrow(),
            ["build-libgit2", "build-libhv", "build-plugin"]
        );
    }

    #[test]
    fn test_first_failure_stops_the_pipeline() {
        let dir = TempDir::new().unwrap();
        write_priority(&dir, r#"["build-libgit2", "build-libhv", "build-plugin"]"#);

        let invoker = RecordingInvoker::new(Some("build-libhv"));
        let ctx = ToolContext::new(dir.path(), &invoker);
        assert_eq!(BuildTool.execute(&ToolArgs::new(), &ctx).unwrap(), 1);
        assert_eq!(*invoker.calls.borrow(), ["build-libgit2", "build-libhv"]);
    }

    #[test]
    fn test_skip_deps_filters_library_steps() {
        let dir = TempDir::new().unwrap();
        write_priority(&dir, r#"["build-libgit2", "build-libhv", "build-plugin"]"#);

        let invoker = RecordingInvoker::new(None);
        let ctx = ToolContext::new(dir.path(), &invoker);
        let args = ToolArgs::new().with("skip_deps", ArgValue::Bool(true));
        assert_eq!(BuildTool.execute(&args, &ctx).unwrap(), 0);
        assert_eq!(*invoker.calls.borrow(), ["build-plugin"]);
    }

    #[test]
    fn test_missing_priority_is_an_error() {
        let dir = TempDir::new().unwrap();
        let invoker = RecordingInvoker::new(None);
        let ctx = ToolContext::new(dir.path(), &invoker);
        assert_eq!(BuildTool.execute(&ToolArgs::new(), &ctx).unwrap(), 1);
        assert!(invoker.calls.borrow().is_empty());
    }

    #[test]
    fn test_existing_output_is_skipped() {
        let dir = TempDir::new().unwrap();
        fs::write(
            dir.path().join(TOOLS_CONFIG_FILE),
            r#"{"build": {"priority": ["build-libgit2"], "skip_if_exists": true}}"#,
        )
        .unwrap();
        let ext_libs = dir.path().join("build_ext_libs");
        fs::create_dir_all(&ext_libs).unwrap();
        let archive = if cfg!(windows) { "git2.lib" } else { "libgit2.a" };
        fs::write(ext_libs.join(archive), "").unwrap();

        let invoker = RecordingInvoker::new(None);
        let ctx = ToolContext::new(dir.path(), &invoker);
        assert_eq!(BuildTool.execute(&ToolArgs::new(), &ctx).unwrap(), 0);
        assert!(invoker.calls.borrow().is_empty());
    }
}
