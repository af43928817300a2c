//! Interactive and script-mode shell over the picker engine.

mod context;
mod output;
mod shell;

pub use context::{CliError, CliMode, CommandError, ShellContext};
pub use shell::run_cli;
