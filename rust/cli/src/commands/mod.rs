//! Command handler modules for the `holdem` CLI.
//!
//! Each command lives in its own module with a public
//! `handle_COMMAND_command(...) -> Result<(), CliError>` entry point. Output
//! streams are passed in so tests can capture them.

pub mod cfg;
pub mod eval;
pub mod play;
pub mod sim;

pub use cfg::handle_cfg_command;
pub use eval::handle_eval_command;
pub use play::handle_play_command;
pub use sim::handle_sim_command;

use crate::error::CliError;

/// Tables run one decision at a time, so a current-thread runtime is enough.
pub(crate) fn runtime() -> Result<tokio::runtime::Runtime, CliError> {
    Ok(tokio::runtime::Builder::new_current_thread()
        .enable_time()
        .build()?)
}
