// .gdextension manifest generator
//
// Scans plugin/bin for built libraries and writes the manifest Godot reads
// to load them. Hidden; 'build-plugin' invokes it after every build.

use anyhow::{Context, Result};
use std::fmt::Write as _;
use std::fs;
use std::path::Path;
use walkdir::WalkDir;

use crate::cli::output;
use crate::config::BuildConfig;
use crate::tools::registry::Tool;
use crate::tools::types::{ArgumentSpec, ToolArgs, ToolContext};

const ENTRY_SYMBOL: &str = "gdai_library_init";

pub struct GenerateGdextensionTool;

impl Tool for GenerateGdextensionTool {
    fn name(&self) -> &str {
        "generate-gdextension"
    }

    fn description(&self) -> &str {
        "Regenerate the .gdextension manifest from built binaries"
    }

    fn category(&self) -> &str {
        "build"
    }

    fn visible(&self) -> bool {
        false
    }

    fn arguments(&self) -> Vec<ArgumentSpec> {
        Vec::new()
    }

    fn execute(&self, _args: &ToolArgs, ctx: &ToolContext) -> Result<i32> {
        let root_dir = ctx.root_dir();
        let bin_dir = root_dir.join("plugin").join("bin");

        let mut binaries = Vec::new();
        if bin_dir.exists() {
            for entry in WalkDir::new(&bin_dir)
                .into_iter()
                .filter_map(|e| e.ok())
                .filter(|e| e.file_type().is_file())
            {
                let platform = match entry.path().extension().and_then(|e| e.to_str()) {
                    Some("dll") => "windows",
                    Some("dylib") => "macos",
                    Some("so") => "linux",
                    _ => continue,
                };
                binaries.push((platform, entry.into_path()));
            }
        }

        if binaries.is_empty() {
            output::error("No plugin binaries found. Run 'build-plugin' first.");
            return Ok(1);
        }

        let settings = BuildConfig::new(root_dir).load()?;

        let mut manifest = String::new();
        writeln!(manifest, "[configuration]")?;
        writeln!(manifest)?;
        writeln!(manifest, "entry_symbol = \"{}\"", ENTRY_SYMBOL)?;
        writeln!(
            manifest,
            "compatibility_minimum = \"{}\"",
            settings.godot_version
        )?;
        writeln!(manifest)?;
        writeln!(manifest, "[libraries]")?;
        writeln!(manifest)?;

        binaries.sort();
        for (platform, path) in &binaries {
            let arch = arch_from_path(path).unwrap_or(&settings.architecture);
            let relative = path
                .strip_prefix(root_dir.join("plugin"))
                .unwrap_or(path)
                .display()
                .to_string()
                .replace('\\', "/");
            writeln!(
                manifest,
                "{}.editor.{} = \"res://addons/gdai/{}\"",
                platform, arch, relative
            )?;
        }

        let manifest_path = root_dir.join("plugin").join("gdai.gdextension");
        fs::write(&manifest_path, manifest)
            .with_context(|| format!("Failed to write {}", manifest_path.display()))?;

        output::success(&format!(
            "Wrote {} ({} libraries)",
            manifest_path.display(),
            binaries.len()
        ));
        Ok(0)
    }
}

/// Architecture encoded in the parent directory name, e.g. bin/windows-x86_64/.
fn arch_from_path(path: &Path) -> Option<&str> {
    let dir_name = path.parent()?.file_name()?.to_str()?;
    let (_, arch) = dir_name.rsplit_once('-')?;
    Some(arch)
}
