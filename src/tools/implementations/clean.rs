// Clean tool
//
// Removes build artifacts and optionally configuration and IDE files.

use anyhow::{Context, Result};
use std::fs;
use std::path::Path;
use walkdir::WalkDir;

use crate::cli::output;
use crate::config::{BuildConfig, BUILD_CONFIG_FILE};
use crate::tools::registry::Tool;
use crate::tools::types::{ArgumentSpec, ToolArgs, ToolContext};

const OBJECT_EXTENSIONS: &[&str] = &["o", "obj", "a", "lib", "os"];

pub struct CleanTool;

impl Tool for CleanTool {
    fn name(&self) -> &str {
        "clean"
    }

    fn description(&self) -> &str {
        "Clean build artifacts and optionally configuration"
    }

    fn arguments(&self) -> Vec<ArgumentSpec> {
        vec![ArgumentSpec::string("target", "What to clean")
            .default_str("build")
            .choices(["build", "config", "all", "everything"])]
    }

    fn execute(&self, args: &ToolArgs, ctx: &ToolContext) -> Result<i32> {
        let root_dir = ctx.root_dir();
        let target = args.str_or("target", "build");

        println!();
        output::header("Cleaning gdai Project");
        println!("Target: {}\n", target);

        let mut cleaned = Vec::new();

        if matches!(target, "build" | "all" | "everything") {
            self.clean_build_artifacts(root_dir, &mut cleaned)?;
        }

        if matches!(target, "config" | "all" | "everything") {
            let config = BuildConfig::new(root_dir);
            if config.exists() {
                config.delete()?;
                cleaned.push(BUILD_CONFIG_FILE.to_string());
            }
        }

        if target == "everything" {
            self.clean_ide_files(root_dir, &mut cleaned)?;
        }

        if cleaned.is_empty() {
            output::info("Nothing to clean");
        } else {
            output::success(&format!("Cleaned {} items", cleaned.len()));
            println!("\nCleaned:");
            for item in cleaned.iter().take(10) {
                println!("  🗑️  {}", item);
            }
            if cleaned.len() > 10 {
                println!("  ... and {} more", cleaned.len() - 10);
            }
        }

        println!();
        output::rule();
        Ok(0)
    }
}

impl CleanTool {
    fn clean_build_artifacts(&self, root_dir: &Path, cleaned: &mut Vec<String>) -> Result<()> {
        for dir in ["build", "build_ext_libs"] {
            let path = root_dir.join(dir);
            if path.exists() {
                fs::remove_dir_all(&path)
                    .with_context(|| format!("Failed to remove {}", path.display()))?;
                cleaned.push(format!("{}/", dir));
            }
        }

        // SCons leftovers from the legacy build system
        for name in [".sconsign.dblite", ".sconf_temp", "config.log"] {
            let path = root_dir.join(name);
            if path.exists() {
                if path.is_dir() {
                    fs::remove_dir_all(&path)?;
                } else {
                    fs::remove_file(&path)?;
                }
                cleaned.push(name.to_string());
            }
        }

        // Stray object files under the godot-cpp submodule
        let godot_cpp_dir = root_dir.join("third_party").join("godot-cpp");
        if godot_cpp_dir.exists() {
            for entry in WalkDir::new(&godot_cpp_dir)
                .into_iter()
                .filter_map(|e| e.ok())
                .filter(|e| e.file_type().is_file())
            {
                let is_object = entry
                    .path()
                    .extension()
                    .and_then(|ext| ext.to_str())
                    .map(|ext| OBJECT_EXTENSIONS.contains(&ext))
                    .unwrap_or(false);
                if is_object {
                    fs::remove_file(entry.path())?;
                    let relative = entry
                        .path()
                        .strip_prefix(root_dir)
                        .unwrap_or(entry.path());
                    cleaned.push(relative.display().to_string());
                }
            }
        }

        Ok(())
    }

    fn clean_ide_files(&self, root_dir: &Path, cleaned: &mut Vec<String>) -> Result<()> {
        let compile_commands = root_dir.join("compile_commands.json");
        if compile_commands.exists() {
            fs::remove_file(&compile_commands)?;
            cleaned.push("compile_commands.json".to_string());
        }

        let vscode_dir = root_dir.join(".vscode");
        if vscode_dir.exists() {
            fs::remove_dir_all(&vscode_dir)?;
            cleaned.push(".vscode/".to_string());
        }

        Ok(())
    }
}
