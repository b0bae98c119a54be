// Build configuration
//
// Settings written by `init` and consumed by the build tools, stored as
// `.buildconfig.json` at the repository root.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

pub const BUILD_CONFIG_FILE: &str = ".buildconfig.json";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BuildSettings {
    pub godot_version: String,
    pub platform: String,
    pub config: String,
    pub architecture: String,
    pub jobs: i64,
}

impl Default for BuildSettings {
    fn default() -> Self {
        Self {
            godot_version: "4.4".to_string(),
            platform: "windows".to_string(),
            config: "release".to_string(),
            architecture: "x86_64".to_string(),
            jobs: 4,
        }
    }
}

/// Handle on the build configuration file for one repository root.
pub struct BuildConfig {
    path: PathBuf,
}

impl BuildConfig {
    pub fn new(root_dir: &Path) -> Self {
        Self {
            path: root_dir.join(BUILD_CONFIG_FILE),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    /// Load settings, falling back to defaults when the file is absent.
    pub fn load(&self) -> Result<BuildSettings> {
        if !self.path.exists() {
            return Ok(BuildSettings::default());
        }
        let raw = fs::read_to_string(&self.path)
            .with_context(|| format!("Failed to read {}", self.path.display()))?;
        serde_json::from_str(&raw)
            .with_context(|| format!("Failed to parse {}", self.path.display()))
    }

    pub fn save(&self, settings: &BuildSettings) -> Result<()> {
        let raw = serde_json::to_string_pretty(settings)?;
        fs::write(&self.path, raw)
            .with_context(|| format!("Failed to write {}", self.path.display()))
    }

    pub fn delete(&self) -> Result<()> {
        if self.path.exists() {
            fs::remove_file(&self.path)
                .with_context(|| format!("Failed to delete {}", self.path.display()))?;
        }
        Ok(())
    }
}
