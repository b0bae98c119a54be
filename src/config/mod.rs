// Configuration module
// Project-wide build settings plus per-tool config sections

mod build;
mod tools;

pub use build::{BuildConfig, BuildSettings, BUILD_CONFIG_FILE};
pub use tools::{ToolsConfig, TOOLS_CONFIG_FILE};
