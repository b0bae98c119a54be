// Per-tool configuration sections
//
// `tools.json` at the repository root holds one JSON object per tool name,
// e.g. the `build` orchestrator's priority list. An absent file, a malformed
// file, or a missing section yields an empty section rather than an error.

use serde_json::{Map, Value};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::warn;

pub const TOOLS_CONFIG_FILE: &str = "tools.json";

pub struct ToolsConfig {
    path: PathBuf,
}

impl ToolsConfig {
    pub fn new(root_dir: &Path) -> Self {
        Self {
            path: root_dir.join(TOOLS_CONFIG_FILE),
        }
    }

    /// The section for one tool, keyed by its name.
    pub fn section(&self, tool_name: &str) -> Map<String, Value> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(_) => return Map::new(),
        };

        let parsed: Value = match serde_json::from_str(&raw) {
            Ok(parsed) => parsed,
            Err(e) => {
                warn!("Ignoring malformed {}: {}", self.path.display(), e);
                return Map::new();
            }
        };

        parsed
            .get(tool_name)
            .and_then(Value::as_object)
            .cloned()
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::TempDir;

    #[test]
    fn test_absent_file_yields_empty_section() {
        let dir = TempDir::new().unwrap();
        let config = ToolsConfig::new(dir.path());
        assert!(config.section("build").is_empty());
    }

    #[test]
    fn test_absent_section_yields_empty_section() {
        let dir = TempDir::new().unwrap();
        fs::write(
            dir.path().join(TOOLS_CONFIG_FILE),
            json!({ "clean": { "extra": true } }).to_string(),
        )
        .unwrap();
        let config = ToolsConfig::new(dir.path());
        assert!(config.section("build").is_empty());
    }

    #[test]
    fn test_section_lookup_by_tool_name() {
        let dir = TempDir::new().unwrap();
        fs::write(
            dir.path().join(TOOLS_CONFIG_FILE),
            json!({
                "build": {
                    "priority": ["build-libgit2", "build-libhv", "build-plugin"],
                    "skip_if_exists": true
                }
            })
            .to_string(),
        )
        .unwrap();
        let section = ToolsConfig::new(dir.path()).section("build");
        let priority = section.get("priority").and_then(Value::as_array).unwrap();
        assert_eq!(priority.len(), 3);
    }

    #[test]
    fn test_malformed_file_yields_empty_section() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join(TOOLS_CONFIG_FILE), "{not json").unwrap();
        let config = ToolsConfig::new(dir.path());
        assert!(config.section("build").is_empty());
    }
}
