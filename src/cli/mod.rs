// CLI module
// Interactive shell, non-interactive launcher, and shared console output

pub mod launcher;
pub mod output;
pub mod prompt;
pub mod shell;

pub use launcher::run_tool;
pub use shell::Shell;
