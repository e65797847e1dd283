//! Interactive table: one human at the terminal against bots.

use std::io::{BufRead, Write};
use std::sync::Arc;

use holdem_table::{GameSession, MemoryLedger};

use crate::cli::PlayArgs;
use crate::commands::runtime;
use crate::config::Config;
use crate::console::ConsoleChannel;
use crate::error::CliError;
use crate::ui;

const HUMAN_ID: u64 = 1;

/// Plays until one stack is left, the hand limit is hit, or the player quits.
///
/// Table talk goes to `table_out`; the final standings go to `out`. The
/// player's bank starts with exactly one buy-in.
pub fn handle_play_command(
    args: &PlayArgs,
    config: &Config,
    input: Box<dyn BufRead + Send>,
    table_out: Box<dyn Write + Send>,
    out: &mut dyn Write,
) -> Result<(), CliError> {
    if args.hands == 0 {
        return Err(CliError::InvalidInput("hands must be >= 1".to_string()));
    }
    let difficulty = args.difficulty.unwrap_or(config.difficulty);
    let settings = config.table_settings(usize::from(args.bots) + 1, Some(args.hands));
    let buy_in = settings.buy_in;

    let console = Arc::new(ConsoleChannel::new(HUMAN_ID, input, table_out));
    let ledger = Arc::new(MemoryLedger::with_balances([(HUMAN_ID, u64::from(buy_in))]));
    let mut session = GameSession::new(
        "terminal",
        HUMAN_ID,
        settings,
        ledger.clone(),
        console.clone(),
    )?;
    if let Some(seed) = args.seed.or(config.seed) {
        session = session.with_seed(seed);
    }

    let summary = runtime()?.block_on(async {
        session.join(HUMAN_ID, &args.name).await?;
        for _ in 0..args.bots {
            session.add_bot(difficulty).await?;
        }
        session.start(HUMAN_ID).await
    })?;

    ui::write_standings(out, &summary)?;
    writeln!(out, "Bank balance: {}", ledger.balance(HUMAN_ID))?;

    if console.quit_requested() {
        return Err(CliError::Interrupted("player left the table".to_string()));
    }
    Ok(())
}
