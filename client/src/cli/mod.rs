//! CLI module
//!
//! - Argument definitions (args)
//! - REPL command parsing, including `use <provider>[:<model>]` (commands)
//! - The interactive loop (repl)

pub mod args;
pub mod commands;
pub mod repl;

pub use args::Cli;
pub use commands::{CommandError, ReplCommand, UseTarget};
pub use repl::Repl;
