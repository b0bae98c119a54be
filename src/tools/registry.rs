// Tool contract and registry
//
// Every build tool implements `Tool`; the registry holds a fixed table of
// factories and rebuilds its snapshot on every call. Rebuilding instead of
// caching keeps the registry free of shared mutable state; with a dozen
// tools and launcher-level call frequency the cost is irrelevant.

use anyhow::Result;
use tracing::warn;

use crate::cli::output;
use crate::errors::LaunchError;
use crate::tools::types::{ArgumentSpec, ToolArgs, ToolContext, ToolInvoker};

/// Contract every pluggable tool fulfills.
///
/// Identity and metadata must be stable for the lifetime of the instance and
/// independent of execution state. `visible` controls interactive-menu
/// listing only; hidden tools stay discoverable and executable by name.
pub trait Tool {
    /// Short identifier, lowercase-hyphenated, unique across the registry.
    fn name(&self) -> &str;

    /// One-line description shown in the menu.
    fn description(&self) -> &str;

    /// Grouping category, used only for filtering.
    fn category(&self) -> &str {
        "misc"
    }

    /// Whether the tool appears in the interactive menu.
    fn visible(&self) -> bool {
        true
    }

    /// Declared arguments, in prompting order.
    fn arguments(&self) -> Vec<ArgumentSpec> {
        Vec::new()
    }

    /// Run the tool. `Ok(code)` is the tool's own exit code (0 = success);
    /// `Err` is an uncaught fault, mapped to exit code 1 at the boundary.
    fn execute(&self, args: &ToolArgs, ctx: &ToolContext) -> Result<i32>;

    /// Validate an argument mapping against the declared specs, in order,
    /// returning the first failure. Keys not declared by this tool are
    /// ignored so orchestrators can pass argument supersets to sub-tools.
    fn validate_args(&self, args: &ToolArgs) -> Result<(), String> {
        for spec in self.arguments() {
            spec.validate(args.get(&spec.name))?;
        }
        Ok(())
    }
}

impl std::fmt::Debug for dyn Tool {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Tool").field("name", &self.name()).finish()
    }
}

/// Produces one tool instance per discovery pass.
pub type ToolFactory = Box<dyn Fn() -> Result<Box<dyn Tool>> + Send + Sync>;

/// Wrap a plain constructor as a `ToolFactory`.
pub fn tool_factory<T, F>(constructor: F) -> ToolFactory
where
    T: Tool + 'static,
    F: Fn() -> T + Send + Sync + 'static,
{
    Box::new(move || Ok(Box::new(constructor()) as Box<dyn Tool>))
}

/// Registry of available tools, backed by a fixed factory table.
pub struct ToolRegistry {
    factories: Vec<ToolFactory>,
}

impl ToolRegistry {
    /// Registry over the built-in tool set.
    pub fn builtin() -> Self {
        Self::with_factories(crate::tools::implementations::builtin_factories())
    }

    /// Registry over a custom factory table (stub registries in tests).
    pub fn with_factories(factories: Vec<ToolFactory>) -> Self {
        Self { factories }
    }

    /// Instantiate every registered tool, sorted by name ascending.
    ///
    /// A factory failure is logged as a warning and that tool is skipped;
    /// discovery never aborts on one bad definition. When `include_hidden`
    /// is false the result is filtered to menu-visible tools; any lookup
    /// used to actually run a tool must pass `true`.
    pub fn discover(&self, include_hidden: bool) -> Vec<Box<dyn Tool>> {
        let mut tools: Vec<Box<dyn Tool>> = Vec::with_capacity(self.factories.len());

        for factory in &self.factories {
            match factory() {
                Ok(tool) => tools.push(tool),
                Err(e) => {
                    warn!("Failed to instantiate tool, skipping: {:#}", e);
                }
            }
        }

        tools.sort_by(|a, b| a.name().cmp(b.name()));

        // Duplicate names are a configuration error in the factory table;
        // both instances are kept and lookup resolves the first.
        for pair in tools.windows(2) {
            if pair[0].name() == pair[1].name() {
                warn!("Duplicate tool name '{}' in registry", pair[0].name());
            }
        }

        if !include_hidden {
            tools.retain(|t| t.visible());
        }

        tools
    }

    /// Find a tool by exact name, hidden tools included.
    pub fn lookup(&self, name: &str) -> Result<Box<dyn Tool>, LaunchError> {
        self.discover(true)
            .into_iter()
            .find(|t| t.name() == name)
            .ok_or_else(|| LaunchError::ToolNotFound(name.to_string()))
    }

    /// All tools in a category, preserving name-sorted order.
    pub fn lookup_by_category(&self, category: &str, include_hidden: bool) -> Vec<Box<dyn Tool>> {
        let mut tools = self.discover(include_hidden);
        tools.retain(|t| t.category() == category);
        tools
    }

    /// Names of all registered tools, sorted.
    pub fn tool_names(&self) -> Vec<String> {
        self.discover(true)
            .iter()
            .map(|t| t.name().to_string())
            .collect()
    }
}

impl ToolInvoker for ToolRegistry {
    fn invoke(&self, name: &str, args: &ToolArgs, ctx: &ToolContext) -> i32 {
        let tool = match self.lookup(name) {
            Ok(tool) => tool,
            Err(e) => {
                output::error(&e.to_string());
                return 1;
            }
        };

        if let Err(msg) = tool.validate_args(args) {
            output::error(&format!("'{}': {}", name, msg));
            return 1;
        }

        match tool.execute(args, ctx) {
            Ok(code) => code,
            Err(e) => {
                output::error(&format!("'{}' failed: {:#}", name, e));
                1
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tools::types::ArgValue;

    struct StubTool {
        name: &'static str,
        visible: bool,
    }

    impl Tool for StubTool {
        fn name(&self) -> &str {
            self.name
        }

        fn description(&self) -> &str {
            "A stub tool"
        }

        fn visible(&self) -> bool {
            self.visible
        }

        fn arguments(&self) -> Vec<ArgumentSpec> {
            vec![
                ArgumentSpec::string("name", "A required name").required(),
                ArgumentSpec::int("count", "A count"),
            ]
        }

        fn execute(&self, _args: &ToolArgs, _ctx: &ToolContext) -> Result<i32> {
            Ok(0)
        }
    }

    fn stub_registry() -> ToolRegistry {
        ToolRegistry::with_factories(vec![
            tool_factory(|| StubTool { name: "clean", visible: true }),
            tool_factory(|| StubTool { name: "build", visible: true }),
            tool_factory(|| StubTool { name: "build-plugin", visible: false }),
            tool_factory(|| StubTool { name: "test", visible: true }),
        ])
    }

    fn names(tools: &[Box<dyn Tool>]) -> Vec<&str> {
        tools.iter().map(|t| t.name()).collect()
    }

    #[test]
    fn test_discover_sorted_and_visibility_filtered() {
        let registry = stub_registry();
        assert_eq!(names(&registry.discover(false)), ["build", "clean", "test"]);
        assert_eq!(
            names(&registry.discover(true)),
            ["build", "build-plugin", "clean", "test"]
        );
    }

    #[test]
    fn test_discover_is_idempotent() {
        let registry = stub_registry();
        let first: Vec<String> = registry
            .discover(true)
            .iter()
            .map(|t| t.name().to_string())
            .collect();
        let second: Vec<String> = registry
            .discover(true)
            .iter()
            .map(|t| t.name().to_string())
            .collect();
        assert_eq!(first, second);
    }

    #[test]
    fn test_hidden_tool_is_discoverable_by_name() {
        let registry = stub_registry();
        assert!(registry.lookup("build-plugin").is_ok());
        assert!(!registry
            .discover(false)
            .iter()
            .any(|t| t.name() == "build-plugin"));
    }

    #[test]
    fn test_lookup_unknown_tool_fails() {
        let registry = stub_registry();
        let err = registry.lookup("nonexistent").unwrap_err();
        assert!(matches!(err, LaunchError::ToolNotFound(_)));
    }

    #[test]
    fn test_failed_factory_is_skipped() {
        let registry = ToolRegistry::with_factories(vec![
            tool_factory(|| StubTool { name: "ok", visible: true }),
            Box::new(|| anyhow::bail!("deliberately broken")),
        ]);
        assert_eq!(names(&registry.discover(true)), ["ok"]);
    }

    #[test]
    fn test_validate_args_first_failure_and_extra_keys() {
        let tool = StubTool { name: "stub", visible: true };

        // Missing required field is the first failure reported
        let err = tool.validate_args(&ToolArgs::new()).unwrap_err();
        assert_eq!(err, "'name' is required");

        // Undeclared keys are silently ignored
        let args = ToolArgs::new()
            .with("name", ArgValue::Str("x".into()))
            .with("unrelated", ArgValue::Bool(true));
        assert!(tool.validate_args(&args).is_ok());
    }

    #[test]
    fn test_lookup_by_category_exact_match() {
        struct Categorized;
        impl Tool for Categorized {
            fn name(&self) -> &str {
                "deploy"
            }
            fn description(&self) -> &str {
                "Deploys"
            }
            fn category(&self) -> &str {
                "release"
            }
            fn execute(&self, _args: &ToolArgs, _ctx: &ToolContext) -> Result<i32> {
                Ok(0)
            }
        }

        let registry = ToolRegistry::with_factories(vec![
            tool_factory(|| Categorized),
            tool_factory(|| StubTool { name: "build", visible: true }),
        ]);
        let release = registry.lookup_by_category("release", true);
        assert_eq!(names(&release), ["deploy"]);
        assert!(registry.lookup_by_category("misc", true).len() == 1);
    }
}
