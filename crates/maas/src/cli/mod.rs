//! Command-line interface module.
//!
//! This module provides the CLI structure and command handlers for the maas binary.

mod batch;
mod commands;
mod query;

pub use batch::{handle_batch, run_batch_command};
pub use commands::{BatchArgs, Cli, Commands, GlobalArgs, QueryArgs};
pub use query::{handle_query, render_completion};
