// Tool system
//
// Self-describing build tools: each declares a name, description, category,
// visibility, and typed arguments, and is reached uniformly through
// `execute(args) -> exit code`.

pub mod implementations;
pub mod registry;
pub mod types;

pub use registry::{tool_factory, Tool, ToolFactory, ToolRegistry};
pub use types::{ArgKind, ArgValue, ArgumentSpec, ToolArgs, ToolContext, ToolInvoker};
