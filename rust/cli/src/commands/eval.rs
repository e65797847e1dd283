//! Hand evaluation command.
//!
//! Two cards are rated with the bots' pre-flop heuristic. Five to seven cards
//! are ranked as a hand; the first two are also rated as hole cards against
//! the rest as a board.

use std::io::Write;

use holdem_ai::heuristics::{postflop_strength, preflop_strength};
use holdem_engine::cards::format_cards;
use holdem_engine::hand::find_best_hand;

use crate::error::CliError;
use crate::validation::parse_card_args;

pub fn handle_eval_command(args: &[String], out: &mut dyn Write) -> Result<(), CliError> {
    let cards = parse_card_args(args)?;
    match cards.len() {
        2 => {
            let hole = [cards[0], cards[1]];
            writeln!(
                out,
                "{}: preflop strength {}/10",
                format_cards(&hole),
                preflop_strength(hole)
            )?;
        }
        5..=7 => {
            let hand = find_best_hand(&cards)?;
            writeln!(out, "{}", hand.describe())?;
            writeln!(out, "Best five: {}", format_cards(&hand.cards))?;
            let hole = [cards[0], cards[1]];
            if let Some(strength) = postflop_strength(hole, &cards[2..]) {
                writeln!(
                    out,
                    "With {} as hole cards: strength {}/10",
                    format_cards(&hole),
                    strength
                )?;
            }
        }
        n => {
            return Err(CliError::InvalidInput(format!(
                "eval needs 2 hole cards or 5 to 7 cards, got {n}"
            )));
        }
    }
    Ok(())
}
