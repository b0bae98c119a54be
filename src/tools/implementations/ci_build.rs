// CI pipeline orchestrator
//
// Non-interactive end-to-end build for CI runners: init, both external
// libraries, then the plugin. Hidden from the menu.

use anyhow::Result;

use crate::cli::output;
use crate::tools::implementations::host_platform;
use crate::tools::registry::Tool;
use crate::tools::types::{ArgValue, ArgumentSpec, ToolArgs, ToolContext};

pub struct CiBuildTool;

impl Tool for CiBuildTool {
    fn name(&self) -> &str {
        "ci-build"
    }

    fn description(&self) -> &str {
        "Full pipeline for CI: init, libraries, plugin"
    }

    fn category(&self) -> &str {
        "build"
    }

    fn visible(&self) -> bool {
        false
    }

    fn arguments(&self) -> Vec<ArgumentSpec> {
        vec![
            ArgumentSpec::string("godot_version", "Godot version to build against").required(),
            ArgumentSpec::string("arch", "Target architecture")
                .required()
                .choices(["x86_64", "x86_32", "arm64", "universal"]),
            ArgumentSpec::string("target", "Godot target")
                .default_str("editor")
                .choices(["editor", "template_debug", "template_release"]),
            ArgumentSpec::string("build_type", "CMake build type")
                .default_str("Release")
                .choices(["Debug", "Release", "RelWithDebInfo"]),
            ArgumentSpec::string("precision", "Float precision")
                .default_str("single")
                .choices(["single", "double"]),
            ArgumentSpec::bool("skip_init", "Skip project initialization").default_bool(false),
            ArgumentSpec::bool("skip_deps", "Skip external library builds").default_bool(false),
            ArgumentSpec::bool("verbose", "Verbose step output").default_bool(false),
        ]
    }

    fn execute(&self, args: &ToolArgs, ctx: &ToolContext) -> Result<i32> {
        let godot_version = args.str_or("godot_version", "4.4");
        let arch = args.str_or("arch", "x86_64");
        let target = args.str_or("target", "editor");
        let build_type = args.str_or("build_type", "Release");
        let precision = args.str_or("precision", "single");
        let verbose = args.flag("verbose");

        println!();
        output::header("CI Build Pipeline");
        println!("Godot {}, {} {}, {}", godot_version, arch, target, build_type);
        if verbose {
            println!("Precision: {}", precision);
            println!("Host platform: {}", host_platform());
            println!("Root: {}", ctx.root_dir().display());
        }

        if args.flag("skip_init") {
            println!("\n[1/4] Skipping init");
        } else {
            println!("\n[1/4] Initializing project");
            let init_args = ToolArgs::new()
                .with("godot_version", ArgValue::Str(godot_version.to_string()))
                .with("platform", ArgValue::Str(host_platform().to_string()))
                .with("architecture", ArgValue::Str(arch.to_string()));
            let code = ctx.invoke("init", &init_args);
            if code != 0 {
                output::error("Initialization failed");
                return Ok(code);
            }
        }

        // Library builds only distinguish Debug from everything else
        let lib_config = if build_type == "Debug" { "Debug" } else { "Release" };
        let lib_args = ToolArgs::new()
            .with("config", ArgValue::Str(lib_config.to_string()))
            .with("clean", ArgValue::Bool(false));
        for (step, name) in [(2, "build-libgit2"), (3, "build-libhv")] {
            if args.flag("skip_deps") {
                println!("\n[{}/4] Skipping {}", step, name);
                continue;
            }
            println!("\n[{}/4] Building {}", step, name);
            let code = ctx.invoke(name, &lib_args);
            if code != 0 {
                output::error(&format!("'{}' failed", name));
                return Ok(code);
            }
        }

        println!("\n[4/4] Building plugin");
        let plugin_args = ToolArgs::new()
            .with("platform", ArgValue::Str(String::new()))
            .with("target", ArgValue::Str(target.to_string()))
            .with("architecture", ArgValue::Str(arch.to_string()))
            .with("precision", ArgValue::Str(precision.to_string()))
            .with("jobs", ArgValue::Int(0))
            .with("clean", ArgValue::Bool(false))
            .with("install", ArgValue::Bool(true));
        let code = ctx.invoke("build-plugin", &plugin_args);
        if code != 0 {
            output::error("Plugin build failed");
            return Ok(code);
        }

        output::success("CI pipeline complete");
        println!();
        output::rule();
        Ok(0)
    }
}
