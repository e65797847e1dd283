//! Configuration command handler.
//!
//! Prints the resolved configuration as JSON, each value with the layer it
//! came from (`default`, `file` or `env`).

use crate::config;
use crate::error::CliError;
use std::io::Write;

pub fn handle_cfg_command(out: &mut dyn Write) -> Result<(), CliError> {
    let config::ConfigResolved { config, sources } = config::load_with_sources()?;
    let display = serde_json::json!({
        "seed": {
            "value": config.seed,
            "source": sources.seed,
        },
        "buy_in": {
            "value": config.buy_in,
            "source": sources.buy_in,
        },
        "big_blind": {
            "value": config.big_blind,
            "source": sources.big_blind,
        },
        "small_blind": {
            "value": config.small_blind(),
            "source": sources.big_blind,
        },
        "difficulty": {
            "value": config.difficulty,
            "source": sources.difficulty,
        },
        "decision_timeout_secs": {
            "value": config.decision_timeout_secs,
            "source": sources.decision_timeout_secs,
        },
        "bot_think_ms": {
            "value": config.bot_think_ms,
            "source": sources.bot_think_ms,
        }
    });
    let json_str = serde_json::to_string_pretty(&display).map_err(std::io::Error::other)?;
    writeln!(out, "{}", json_str)?;
    Ok(())
}
