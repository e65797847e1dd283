//! # Hold'em CLI Library
//!
//! Terminal front end for the hold'em table crates. The primary entry point
//! is [`run`], which parses command-line arguments and executes the matching
//! subcommand.
//!
//! ## Example Usage
//!
//! ```no_run
//! use std::io;
//! let args = vec!["holdem", "sim", "--seats", "3", "--hands", "10", "--seed", "7"];
//! let code = holdem_cli::run(args, &mut io::stdout(), &mut io::stderr());
//! assert_eq!(code, 0);
//! ```
//!
//! ## Available Subcommands
//!
//! - `sim`: Run a bots-only table and print the transcript and standings
//! - `play`: Sit at a table against bots, typing actions on stdin
//! - `eval`: Rank a 5 to 7 card hand or rate two hole cards
//! - `cfg`: Display the resolved configuration

use clap::Parser;
use std::io::{BufReader, Write};
pub mod cli;
mod commands;
pub mod config;
pub mod console;
mod error;
pub mod formatters;
pub mod io_utils;
pub mod ui;
pub mod validation;

use cli::{Commands, HoldemCli};
use commands::{handle_cfg_command, handle_eval_command, handle_play_command, handle_sim_command};

pub use error::{CliError, EXIT_ERROR, EXIT_INTERRUPTED, EXIT_SUCCESS};

/// Main entry point for the CLI application.
///
/// # Returns
///
/// Exit code: `0` for success, `2` for errors, `130` when the player quits
/// an interactive table early.
pub fn run<I, S>(args: I, out: &mut dyn Write, err: &mut dyn Write) -> i32
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    const COMMANDS: &[&str] = &["sim", "play", "eval", "cfg"];
    let argv: Vec<String> = args.into_iter().map(|s| s.as_ref().to_string()).collect();

    let cli = match HoldemCli::try_parse_from(&argv) {
        Ok(cli) => cli,
        Err(e) => {
            use clap::error::ErrorKind;

            // Help and version print to stdout and exit 0
            return match e.kind() {
                ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => {
                    if write!(out, "{}", e).is_err() {
                        return EXIT_ERROR;
                    }
                    EXIT_SUCCESS
                }
                _ => {
                    let _ = write_usage(err, &e.to_string(), COMMANDS);
                    EXIT_ERROR
                }
            };
        }
    };

    let result = match cli.cmd {
        Commands::Sim(args) => {
            config::load().map_err(CliError::from).and_then(|config| {
                handle_sim_command(&args, &config, out)
            })
        }
        Commands::Play(args) => config::load().map_err(CliError::from).and_then(|config| {
            handle_play_command(
                &args,
                &config,
                Box::new(BufReader::new(std::io::stdin())),
                Box::new(std::io::stdout()),
                out,
            )
        }),
        Commands::Eval { cards } => handle_eval_command(&cards, out),
        Commands::Cfg => handle_cfg_command(out),
    };

    match result {
        Ok(()) => EXIT_SUCCESS,
        Err(e) => {
            let _ = ui::write_error(err, &e.to_string());
            e.exit_code()
        }
    }
}

fn write_usage(err: &mut dyn Write, clap_message: &str, commands: &[&str]) -> std::io::Result<()> {
    writeln!(err, "{}", clap_message)?;
    writeln!(err)?;
    writeln!(err, "Hold'em CLI")?;
    writeln!(err, "Usage: holdem <command> [options]\n")?;
    writeln!(err, "Commands:")?;
    for c in commands {
        writeln!(err, "  {}", c)?;
    }
    writeln!(err, "\nFor full help, run: holdem --help")
}
