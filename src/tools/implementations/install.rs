// Install tool
//
// Copies the built plugin into a Godot project's addons/ directory,
// scaffolding a minimal project when the destination does not exist yet.

use anyhow::{Context, Result};
use std::fs;
use std::path::Path;
use walkdir::WalkDir;

use crate::cli::output;
use crate::tools::registry::Tool;
use crate::tools::types::{ArgumentSpec, ToolArgs, ToolContext};

const MINIMAL_PROJECT: &str = r#"; Engine configuration file.
config_version=5

[application]

config/name="gdai Test Project"
"#;

pub struct InstallTool;

impl Tool for InstallTool {
    fn name(&self) -> &str {
        "install"
    }

    fn description(&self) -> &str {
        "Install the plugin into a Godot project"
    }

    fn arguments(&self) -> Vec<ArgumentSpec> {
        vec![
            ArgumentSpec::string("project_path", "Path to the Godot project").required(),
            ArgumentSpec::bool("create_scaffold", "Create a minimal project if missing")
                .default_bool(true),
        ]
    }

    fn execute(&self, args: &ToolArgs, ctx: &ToolContext) -> Result<i32> {
        let root_dir = ctx.root_dir();
        let project_path = args.str_or("project_path", "");

        if project_path.is_empty() {
            output::error("No project path given");
            return Ok(1);
        }

        let plugin_dir = root_dir.join("plugin");
        if !plugin_dir.exists() {
            output::error("Nothing to install. Run 'build' first.");
            return Ok(1);
        }

        let project_dir = Path::new(project_path);
        if !project_dir.exists() {
            if args.bool_or("create_scaffold", true) {
                println!("📁 Creating project scaffold at {}", project_dir.display());
                fs::create_dir_all(project_dir)?;
                fs::write(project_dir.join("project.godot"), MINIMAL_PROJECT)?;
            } else {
                output::error(&format!(
                    "Project directory {} does not exist",
                    project_dir.display()
                ));
                return Ok(1);
            }
        }

        let addon_dir = project_dir.join("addons").join("gdai");
        let mut copied = 0usize;
        for entry in WalkDir::new(&plugin_dir)
            .into_iter()
            .filter_map(|e| e.ok())
            .filter(|e| e.file_type().is_file())
        {
            let relative = entry
                .path()
                .strip_prefix(&plugin_dir)
                .unwrap_or(entry.path());
            let dest = addon_dir.join(relative);
            if let Some(parent) = dest.parent() {
                fs::create_dir_all(parent)?;
            }
            fs::copy(entry.path(), &dest)
                .with_context(|| format!("Failed to copy {}", entry.path().display()))?;
            copied += 1;
        }

        output::success(&format!(
            "Installed {} files to {}",
            copied,
            addon_dir.display()
        ));
        Ok(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tools::implementations::testutil::NOOP_INVOKER;
    use crate::tools::types::ArgValue;
    use tempfile::TempDir;

    #[test]
    fn test_empty_project_path_is_an_error() {
        let dir = TempDir::new().unwrap();
        let ctx = ToolContext::new(dir.path(), &NOOP_INVOKER);
        let args = ToolArgs::new().with("project_path", ArgValue::Str(String::new()));
        assert_eq!(InstallTool.execute(&args, &ctx).unwrap(), 1);
    }

    #[test]
    fn test_requires_built_plugin() {
        let dir = TempDir::new().unwrap();
        let project = TempDir::new().unwrap();
        let ctx = ToolContext::new(dir.path(), &NOOP_INVOKER);
        let args = ToolArgs::new().with(
            "project_path",
            ArgValue::Str(project.path().display().to_string()),
        );
        assert_eq!(InstallTool.execute(&args, &ctx).unwrap(), 1);
    }

    #[test]
    fn test_copies_plugin_tree_and_scaffolds_project() {
        let dir = TempDir::new().unwrap();
        let plugin_bin = dir.path().join("plugin/bin");
        fs::create_dir_all(&plugin_bin).unwrap();
        fs::write(plugin_bin.join("libgdai.so"), "binary").unwrap();
        fs::write(dir.path().join("plugin/gdai.gdextension"), "[configuration]").unwrap();

        let project_root = TempDir::new().unwrap();
        let project = project_root.path().join("demo");

        let ctx = ToolContext::new(dir.path(), &NOOP_INVOKER);
        let args = ToolArgs::new().with(
            "project_path",
            ArgValue::Str(project.display().to_string()),
        );
        assert_eq!(InstallTool.execute(&args, &ctx).unwrap(), 0);

        assert!(project.join("project.godot").exists());
        assert!(project.join("addons/gdai/bin/libgdai.so").exists());
        assert!(project.join("addons/gdai/gdai.gdextension").exists());
    }
}
