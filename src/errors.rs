// Launcher-level error taxonomy
//
// Tool bodies report failures through their own exit codes; these errors
// cover the launcher boundary itself (lookup, argument parsing, validation).

use thiserror::Error;

#[derive(Debug, Error)]
pub enum LaunchError {
    /// Requested tool name is not present in the registry.
    #[error("tool '{0}' not found")]
    ToolNotFound(String),

    /// An argument mapping failed schema validation.
    #[error("argument validation failed: {0}")]
    InvalidArguments(String),

    /// The serialized argument blob could not be parsed.
    #[error("invalid JSON arguments: {0}")]
    ArgumentParse(String),
}

/// Format a tool-not-found error with the available tool names.
pub fn tool_not_found_error(name: &str, available: &[String]) -> String {
    format!(
        "Tool '{}' not found\n\n\
        \x1b[1;33mAvailable tools:\x1b[0m {}\n\n\
        \x1b[1;32mTry:\x1b[0m\n\
        1. Check the tool name for typos\n\
        2. Run \x1b[36mgdforge\x1b[0m with no arguments for the interactive menu",
        name,
        available.join(", ")
    )
}
