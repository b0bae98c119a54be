// Non-interactive launcher
//
// Runs one tool from a name plus a JSON argument blob, as invoked by CI or
// scripted callers. All launcher-level failures map to exit code 1; the
// tool's own exit code passes through verbatim.

use serde_json::Value;
use std::path::Path;

use crate::errors::tool_not_found_error;
use crate::interrupt;
use crate::tools::{ToolArgs, ToolContext, ToolRegistry};

/// Execute `name` with `raw_args` (a serialized JSON object).
pub fn run_tool(registry: &ToolRegistry, root_dir: &Path, name: &str, raw_args: &str) -> i32 {
    let parsed: Value = match serde_json::from_str(raw_args) {
        Ok(parsed) => parsed,
        Err(e) => {
            eprintln!("❌ Invalid JSON arguments: {}", e);
            eprintln!("Received: {}", raw_args);
            return 1;
        }
    };

    let map = match parsed.as_object() {
        Some(map) => map,
        None => {
            eprintln!("❌ Arguments must be a JSON object");
            eprintln!("Received: {}", raw_args);
            return 1;
        }
    };

    // Hidden tools stay invocable by name; CI drives the pipeline tools.
    let tool = match registry.lookup(name) {
        Ok(tool) => tool,
        Err(_) => {
            eprintln!("❌ {}", tool_not_found_error(name, &registry.tool_names()));
            return 1;
        }
    };

    println!("🔧 Executing '{}'...", tool.name());

    let args = match ToolArgs::from_json_map(map) {
        Ok(args) => args,
        Err(e) => {
            eprintln!("❌ Argument validation failed: {}", e);
            return 1;
        }
    };

    if let Err(msg) = tool.validate_args(&args) {
        eprintln!("❌ Argument validation failed: {}", msg);
        return 1;
    }

    interrupt::reset();
    let ctx = ToolContext::new(root_dir, registry);
    let result = tool.execute(&args, &ctx);

    let code = if interrupt::interrupted() {
        eprintln!("❌ Interrupted by user");
        130
    } else {
        match result {
            Ok(code) => code,
            Err(e) => {
                eprintln!("❌ Fatal error: {:#}", e);
                1
            }
        }
    };

    if code == 0 {
        println!("✅ '{}' completed successfully", tool.name());
    } else {
        eprintln!("❌ '{}' failed with exit code {}", tool.name(), code);
    }

    code
}
