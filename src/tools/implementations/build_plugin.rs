// Plugin build step
//
// Configures and builds the GDExtension library through CMake. Hidden from
// the menu; the 'build' orchestrator is the usual entry point.

use anyhow::{Context, Result};
use std::fs;
use std::process::Command;

use crate::cli::output;
use crate::config::BuildConfig;
use crate::tools::implementations::run_step;
use crate::tools::registry::Tool;
use crate::tools::types::{ArgumentSpec, ToolArgs, ToolContext};

pub struct BuildPluginTool;

impl Tool for BuildPluginTool {
    fn name(&self) -> &str {
        "build-plugin"
    }

    fn description(&self) -> &str {
        "Build the gdai GDExtension plugin with CMake"
    }

    fn category(&self) -> &str {
        "build"
    }

    fn visible(&self) -> bool {
        false
    }

    fn arguments(&self) -> Vec<ArgumentSpec> {
        vec![
            ArgumentSpec::string("platform", "Target platform override")
                .default_str("")
                .choices(["", "windows", "linux", "macos"]),
            ArgumentSpec::string("target", "Godot target")
                .default_str("")
                .choices(["", "editor"]),
            ArgumentSpec::string("architecture", "Architecture override")
                .default_str("")
                .choices(["", "x86_64", "x86_32", "arm64", "universal"]),
            ArgumentSpec::string("precision", "Float precision")
                .default_str("")
                .choices(["", "single", "double"]),
            ArgumentSpec::int("jobs", "Parallel jobs, 0 uses the saved setting").default_int(0),
            ArgumentSpec::bool("clean", "Wipe the CMake build directory first")
                .default_bool(false),
            ArgumentSpec::bool("install", "Run the CMake install step").default_bool(true),
        ]
    }

    fn execute(&self, args: &ToolArgs, ctx: &ToolContext) -> Result<i32> {
        let root_dir = ctx.root_dir();

        let config = BuildConfig::new(root_dir);
        if !config.exists() {
            output::error("Project not initialized. Run 'init' first.");
            return Ok(1);
        }
        let settings = config.load()?;

        // Empty-string overlays fall back to the saved settings
        let platform = args.str_or("platform", &settings.platform);
        let target = args.str_or("target", "editor");
        let architecture = args.str_or("architecture", &settings.architecture);
        let precision = args.str_or("precision", "single");
        let jobs = match args.int_or("jobs", 0) {
            0 => settings.jobs,
            n => n,
        };
        let build_type = if settings.config == "debug" {
            "Debug"
        } else {
            "Release"
        };

        println!();
        output::header("Building gdai Plugin");
        println!("Build type:   {}", build_type);
        println!("Architecture: {}", architecture);
        println!("Precision:    {}", precision);

        let ext_libs = root_dir.join("build_ext_libs");
        let git2 = if cfg!(windows) { "git2.lib" } else { "libgit2.a" };
        let hv = if cfg!(windows) {
            "hv_static.lib"
        } else {
            "libhv_static.a"
        };
        if !ext_libs.join(git2).exists() || !ext_libs.join(hv).exists() {
            output::error(
                "External libraries not built. Run 'build-libgit2' and 'build-libhv' first.",
            );
            return Ok(1);
        }

        let build_dir = root_dir.join("build").join("cmake");
        if args.flag("clean") && build_dir.exists() {
            fs::remove_dir_all(&build_dir)
                .with_context(|| format!("Failed to clean {}", build_dir.display()))?;
        }
        fs::create_dir_all(&build_dir)?;

        let mut configure = Command::new("cmake");
        configure
            .arg("-S")
            .arg(root_dir)
            .arg("-B")
            .arg(&build_dir)
            .arg(format!("-DCMAKE_BUILD_TYPE={}", build_type))
            .arg(format!("-DGDAI_ARCH={}", architecture))
            .arg(format!("-DGDAI_PRECISION={}", precision))
            .arg(format!("-DGDAI_PLATFORM={}", platform))
            .arg(format!("-DGDAI_TARGET={}", target));
        if !run_step("Configuring plugin", &mut configure) {
            return Ok(1);
        }

        let mut build = Command::new("cmake");
        build
            .arg("--build")
            .arg(&build_dir)
            .arg("--parallel")
            .arg(jobs.to_string());
        if !run_step("Building plugin", &mut build) {
            return Ok(1);
        }

        if args.bool_or("install", true) {
            let mut install = Command::new("cmake");
            install.arg("--install").arg(&build_dir);
            if !run_step("Installing plugin", &mut install) {
                return Ok(1);
            }
        }

        // Keep the manifest in sync with whatever binaries just landed
        let code = ctx.invoke("generate-gdextension", &ToolArgs::new());
        if code != 0 {
            output::warning("Could not regenerate the .gdextension manifest");
        }

        output::success("Plugin built");
        println!();
        output::rule();
        Ok(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tools::implementations::testutil::NOOP_INVOKER;
    use tempfile::TempDir;

    #[test]
    fn test_requires_initialized_project() {
        let dir = TempDir::new().unwrap();
        let ctx = ToolContext::new(dir.path(), &NOOP_INVOKER);
        assert_eq!(BuildPluginTool.execute(&ToolArgs::new(), &ctx).unwrap(), 1);
    }

    #[test]
    fn test_requires_external_libraries() {
        let dir = TempDir::new().unwrap();
        BuildConfig::new(dir.path())
            .save(&Default::default())
            .unwrap();
        let ctx = ToolContext::new(dir.path(), &NOOP_INVOKER);
        assert_eq!(BuildPluginTool.execute(&ToolArgs::new(), &ctx).unwrap(), 1);
    }

    #[test]
    fn test_hidden_from_menu() {
        assert!(!BuildPluginTool.visible());
    }
}
