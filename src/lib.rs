// gdforge - self-describing build-tool launcher for the gdai GDExtension

pub mod cli;
pub mod config;
pub mod errors;
pub mod interrupt;
pub mod tools;
