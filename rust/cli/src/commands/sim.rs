//! Bots-only table simulation.

use std::io::Write;
use std::sync::Arc;

use holdem_engine::logger::HandLogger;
use holdem_table::{GameSession, MemoryLedger};

use crate::cli::SimArgs;
use crate::commands::runtime;
use crate::config::Config;
use crate::console::TranscriptChannel;
use crate::error::CliError;
use crate::ui;

/// Host id for tables nobody sits at; it never holds a seat.
const HOUSE: u64 = 0;

pub fn handle_sim_command(
    args: &SimArgs,
    config: &Config,
    out: &mut dyn Write,
) -> Result<(), CliError> {
    if args.hands == 0 {
        return Err(CliError::InvalidInput("hands must be >= 1".to_string()));
    }
    let seed = args.seed.or(config.seed).unwrap_or_else(rand::random);
    let difficulty = args.difficulty.unwrap_or(config.difficulty);
    let mut settings = config.table_settings(usize::from(args.seats), Some(args.hands));
    settings.bot_think_ms = 0;

    let transcript = Arc::new(TranscriptChannel::default());
    let ledger = Arc::new(MemoryLedger::new());
    let mut session = GameSession::new("sim", HOUSE, settings, ledger, transcript.clone())?
        .with_seed(seed);
    if let Some(path) = &args.output {
        session = session.with_hand_log(HandLogger::create(path)?);
    }

    writeln!(
        out,
        "sim: seats={} hands={} seed={} difficulty={}",
        args.seats, args.hands, seed, difficulty
    )?;

    let summary = runtime()?.block_on(async {
        for _ in 0..args.seats {
            session.add_bot(difficulty).await?;
        }
        session.start(HOUSE).await
    })?;

    if !args.quiet {
        for line in transcript.lines() {
            writeln!(out, "{line}")?;
        }
    }
    ui::write_standings(out, &summary)?;
    Ok(())
}
