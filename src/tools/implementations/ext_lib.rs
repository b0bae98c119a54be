// Shared CMake flow for external static libraries
//
// Both library steps configure, build, locate the produced archive, and
// stage it into build_ext_libs/ the same way; only the descriptor differs.

use anyhow::{Context, Result};
use std::fs;
use std::path::Path;
use std::process::Command;
use walkdir::WalkDir;

use crate::cli::output;
use crate::tools::implementations::run_step;

/// Everything one external library build needs to know.
pub(super) struct ExternalLibrary {
    /// Display name used in messages.
    pub name: &'static str,
    /// Source directory under third_party/.
    pub source_dir: &'static str,
    /// Build directory under build/.
    pub build_dir: &'static str,
    /// Archive filename on Windows / elsewhere.
    pub archive_windows: &'static str,
    pub archive_unix: &'static str,
    /// Extra -D flags passed at configure time.
    pub cmake_flags: &'static [&'static str],
}

impl ExternalLibrary {
    pub fn archive_name(&self) -> &'static str {
        if cfg!(windows) {
            self.archive_windows
        } else {
            self.archive_unix
        }
    }

    /// Run the full configure/build/stage flow. Returns the tool exit code.
    pub fn build(&self, root_dir: &Path, config: &str, clean: bool) -> Result<i32> {
        let source = root_dir.join("third_party").join(self.source_dir);
        if !source.exists() {
            output::error(&format!(
                "third_party/{} is missing. Run 'init' first.",
                self.source_dir
            ));
            return Ok(1);
        }

        let staged = root_dir.join("build_ext_libs").join(self.archive_name());
        if staged.exists() && !clean {
            println!("✓ {} already built", self.name);
            return Ok(0);
        }

        let build_dir = root_dir.join("build").join(self.build_dir);
        if clean && build_dir.exists() {
            fs::remove_dir_all(&build_dir)
                .with_context(|| format!("Failed to clean {}", build_dir.display()))?;
        }
        fs::create_dir_all(&build_dir)?;

        let mut configure = Command::new("cmake");
        configure
            .arg("-S")
            .arg(&source)
            .arg("-B")
            .arg(&build_dir)
            .arg(format!("-DCMAKE_BUILD_TYPE={}", config));
        for flag in self.cmake_flags {
            configure.arg(flag);
        }
        if !run_step(&format!("Configuring {}", self.name), &mut configure) {
            return Ok(1);
        }

        let mut build = Command::new("cmake");
        build
            .arg("--build")
            .arg(&build_dir)
            .arg("--config")
            .arg(config);
        if !run_step(&format!("Building {}", self.name), &mut build) {
            return Ok(1);
        }

        // CMake generators scatter the archive; find it by name
        let produced = WalkDir::new(&build_dir)
            .into_iter()
            .filter_map(|e| e.ok())
            .find(|e| e.file_name() == self.archive_name());
        let produced = match produced {
            Some(entry) => entry.into_path(),
            None => {
                output::error(&format!(
                    "{} built but '{}' was not produced",
                    self.name,
                    self.archive_name()
                ));
                return Ok(1);
            }
        };

        fs::create_dir_all(root_dir.join("build_ext_libs"))?;
        fs::copy(&produced, &staged)
            .with_context(|| format!("Failed to stage {}", staged.display()))?;

        output::success(&format!("{} built and staged", self.name));
        Ok(0)
    }
}
