// Init tool
//
// Fetches submodules, pins godot-cpp to the requested version branch, and
// records the build settings every later step reads back.

use anyhow::Result;
use std::process::Command;

use crate::cli::output;
use crate::config::{BuildConfig, BuildSettings};
use crate::tools::registry::Tool;
use crate::tools::types::{ArgumentSpec, ToolArgs, ToolContext};

pub struct InitTool;

impl Tool for InitTool {
    fn name(&self) -> &str {
        "init"
    }

    fn description(&self) -> &str {
        "Initialize the project: submodules, godot-cpp version, build config"
    }

    fn arguments(&self) -> Vec<ArgumentSpec> {
        vec![
            ArgumentSpec::string("godot_version", "Godot version to build against")
                .required()
                .choices(["4.4", "4.5"]),
            ArgumentSpec::string("platform", "Target platform")
                .default_str("windows")
                .choices(["windows", "linux", "macos"]),
            ArgumentSpec::string("config", "Build configuration")
                .default_str("release")
                .choices(["debug", "release"]),
            ArgumentSpec::string("architecture", "Target architecture")
                .default_str("x86_64")
                .choices(["x86_64", "x86_32", "arm64", "universal"]),
            ArgumentSpec::int("jobs", "Parallel build jobs").default_int(4),
        ]
    }

    fn execute(&self, args: &ToolArgs, ctx: &ToolContext) -> Result<i32> {
        let root_dir = ctx.root_dir();

        let settings = BuildSettings {
            godot_version: args.str_or("godot_version", "4.4").to_string(),
            platform: args.str_or("platform", "windows").to_string(),
            config: args.str_or("config", "release").to_string(),
            architecture: args.str_or("architecture", "x86_64").to_string(),
            jobs: args.int_or("jobs", 4),
        };

        println!();
        output::header("Initializing gdai Project");

        println!("\n📦 Fetching submodules...");
        let status = Command::new("git")
            .args(["submodule", "update", "--init", "--recursive"])
            .current_dir(root_dir)
            .output();
        match status {
            Ok(out) if out.status.success() => {}
            Ok(out) => {
                output::error(&format!(
                    "Submodule update failed: {}",
                    String::from_utf8_lossy(&out.stderr).trim()
                ));
                return Ok(1);
            }
            Err(_) => {
                output::error("Git not found. Install git and re-run 'init'.");
                return Ok(1);
            }
        }

        let godot_cpp_dir = root_dir.join("third_party").join("godot-cpp");
        if !godot_cpp_dir.exists() {
            output::error("third_party/godot-cpp is missing after submodule update");
            return Ok(1);
        }

        // Branch names in godot-cpp track the engine version
        println!(
            "\n🔀 Checking out godot-cpp branch '{}'...",
            settings.godot_version
        );
        let checkout = Command::new("git")
            .args(["checkout", &settings.godot_version])
            .current_dir(&godot_cpp_dir)
            .output();
        match checkout {
            Ok(out) if out.status.success() => {}
            _ => {
                output::warning(&format!(
                    "Could not check out godot-cpp '{}', keeping current branch",
                    settings.godot_version
                ));
            }
        }

        BuildConfig::new(root_dir).save(&settings)?;

        println!("\nBuild configuration:");
        println!("  Godot version: {}", settings.godot_version);
        println!("  Platform:      {}", settings.platform);
        println!("  Config:        {}", settings.config);
        println!("  Architecture:  {}", settings.architecture);
        println!("  Jobs:          {}", settings.jobs);

        output::success("Project initialized");
        println!();
        output::rule();
        Ok(0)
    }
}
