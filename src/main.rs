// gdforge entry point
//
// With a tool name: run it non-interactively and exit with its code.
// Without: start the interactive menu, unless stdin is not a terminal.

use anyhow::{Context, Result};
use clap::Parser;
use std::env;
use std::io::{self, IsTerminal};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use gdforge::cli::{run_tool, Shell};
use gdforge::interrupt;
use gdforge::tools::ToolRegistry;

#[derive(Parser)]
#[command(
    name = "gdforge",
    about = "Build-tool launcher for the gdai GDExtension",
    version
)]
struct Args {
    /// Tool to run. Omit for the interactive menu.
    tool: Option<String>,

    /// Force non-interactive mode even without a tool name.
    #[arg(long)]
    non_interactive: bool,

    /// Tool arguments as a JSON object.
    #[arg(long, default_value = "{}")]
    args: String,
}

fn is_non_interactive(args: &Args) -> bool {
    if args.non_interactive {
        return true;
    }
    if env::var("CI").map(|v| v == "true").unwrap_or(false) {
        return true;
    }
    if env::var("GDFORGE_NON_INTERACTIVE")
        .map(|v| v == "1")
        .unwrap_or(false)
    {
        return true;
    }
    !io::stdin().is_terminal()
}

fn resolve_root_dir() -> Result<PathBuf> {
    match env::var_os("GDFORGE_ROOT") {
        Some(root) => Ok(PathBuf::from(root)),
        None => env::current_dir().context("Failed to resolve the current directory"),
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}

fn run() -> Result<i32> {
    let args = Args::parse();

    init_tracing();
    interrupt::install()?;

    let root_dir = resolve_root_dir()?;
    let registry = ToolRegistry::builtin();

    if let Some(tool) = &args.tool {
        return Ok(run_tool(&registry, &root_dir, tool, &args.args));
    }

    if is_non_interactive(&args) {
        eprintln!("❌ No tool specified in non-interactive mode");
        eprintln!("Usage: gdforge <tool> [--args '{{...}}']");
        return Ok(1);
    }

    Shell::new(registry, root_dir).run()
}

fn main() {
    let code = match run() {
        Ok(code) => code,
        Err(e) => {
            eprintln!("❌ Fatal error: {:#}", e);
            1
        }
    };
    std::process::exit(code);
}
