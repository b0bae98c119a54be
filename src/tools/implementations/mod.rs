// Tool implementations
//
// The built-in tool set, registered through a fixed factory table instead
// of directory scanning. Adding a tool means adding its factory here.

use std::process::Command;

use crate::cli::output;
use crate::tools::registry::{tool_factory, ToolFactory};

// Orchestrators
pub mod build;
pub mod ci_build;

// Build steps
pub mod build_libgit2;
pub mod build_libhv;
pub mod build_plugin;
pub mod generate_gdextension;
mod ext_lib;

// Project setup
pub mod init;
pub mod init_vscode;
pub mod install;

// Maintenance
pub mod clean;

// Re-exports for convenience
pub use build::BuildTool;
pub use build_libgit2::BuildLibgit2Tool;
pub use build_libhv::BuildLibhvTool;
pub use build_plugin::BuildPluginTool;
pub use ci_build::CiBuildTool;
pub use clean::CleanTool;
pub use generate_gdextension::GenerateGdextensionTool;
pub use init::InitTool;
pub use init_vscode::InitVscodeTool;
pub use install::InstallTool;
pub use test::TestTool;

/// Factory table over every built-in tool.
pub fn builtin_factories() -> Vec<ToolFactory> {
    vec![
        tool_factory(|| BuildTool),
        tool_factory(|| BuildLibgit2Tool),
        tool_factory(|| BuildLibhvTool),
        tool_factory(|| BuildPluginTool),
        tool_factory(|| CiBuildTool),
        tool_factory(|| CleanTool),
        tool_factory(|| GenerateGdextensionTool),
        tool_factory(|| InitTool),
        tool_factory(|| InitVscodeTool),
        tool_factory(|| InstallTool),
        tool_factory(|| TestTool),
    ]
}

/// Host platform name as the build tools spell it.
pub(crate) fn host_platform() -> &'static str {
    if cfg!(target_os = "windows") {
        "windows"
    } else if cfg!(target_os = "macos") {
        "macos"
    } else {
        "linux"
    }
}

/// Run one external build step, reporting failures inline.
///
/// Returns false on a nonzero exit or when the command cannot be spawned;
/// callers turn that into their own exit code rather than a fault.
pub(crate) fn run_step(label: &str, command: &mut Command) -> bool {
    println!("\n🔨 {}...", label);
    match command.status() {
        Ok(status) if status.success() => true,
        Ok(status) => {
            output::error(&format!(
                "{} failed with exit code {}",
                label,
                status.code().unwrap_or(-1)
            ));
            false
        }
        Err(e) => {
            output::error(&format!("Failed to run {}: {}", label, e));
            false
        }
    }
}
