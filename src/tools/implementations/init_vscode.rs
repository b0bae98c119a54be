// VS Code workspace setup
//
// Writes C/C++ IntelliSense configuration and a build task wired to the
// launcher, skipping existing configuration unless forced.

use anyhow::{Context, Result};
use serde_json::json;
use std::fs;

use crate::cli::output;
use crate::tools::registry::Tool;
use crate::tools::types::{ArgumentSpec, ToolArgs, ToolContext};

pub struct InitVscodeTool;

impl Tool for InitVscodeTool {
    fn name(&self) -> &str {
        "init-vscode"
    }

    fn description(&self) -> &str {
        "Generate VS Code C/C++ and task configuration"
    }

    fn arguments(&self) -> Vec<ArgumentSpec> {
        vec![ArgumentSpec::bool("force", "Overwrite existing configuration").default_bool(false)]
    }

    fn execute(&self, args: &ToolArgs, ctx: &ToolContext) -> Result<i32> {
        let root_dir = ctx.root_dir();
        let vscode_dir = root_dir.join(".vscode");

        if vscode_dir.exists() && !args.flag("force") {
            output::info(".vscode already exists, use force=true to overwrite");
            return Ok(0);
        }

        fs::create_dir_all(&vscode_dir)
            .with_context(|| format!("Failed to create {}", vscode_dir.display()))?;

        let cpp_properties = json!({
            "version": 4,
            "configurations": [{
                "name": "gdai",
                "includePath": [
                    "${workspaceFolder}/src",
                    "${workspaceFolder}/third_party/godot-cpp/include",
                    "${workspaceFolder}/third_party/godot-cpp/gen/include",
                    "${workspaceFolder}/third_party/godot-cpp/gdextension",
                    "${workspaceFolder}/third_party/libgit2/include",
                    "${workspaceFolder}/third_party/libhv/include"
                ],
                "cppStandard": "c++17",
                "compileCommands": "${workspaceFolder}/compile_commands.json"
            }]
        });
        write_json(&vscode_dir.join("c_cpp_properties.json"), &cpp_properties)?;

        let tasks = json!({
            "version": "2.0.0",
            "tasks": [{
                "label": "Build gdai",
                "type": "shell",
                "command": "gdforge",
                "args": ["build", "--non-interactive"],
                "group": { "kind": "build", "isDefault": true }
            }]
        });
        write_json(&vscode_dir.join("tasks.json"), &tasks)?;

        output::success("VS Code configuration written");
        Ok(0)
    }
}

fn write_json(path: &std::path::Path, value: &serde_json::Value) -> Result<()> {
    let text = serde_json::to_string_pretty(value)?;
    fs::write(path, text).with_context(|| format!("Failed to write {}", path.display()))
}
