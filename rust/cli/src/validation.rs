//! Input parsing and validation for interactive play and card arguments.

use std::collections::HashSet;

use holdem_engine::cards::Card;
use holdem_engine::errors::GameError;
use holdem_engine::rules::LegalActions;
use holdem_table::ActionChoice;

#[derive(Debug, PartialEq)]
pub enum ParseResult {
    /// A button press, with the raise total when it was typed inline ("raise 60")
    Choice(ActionChoice, Option<String>),
    /// User entered quit command (q or quit)
    Quit,
    /// Invalid input with error message
    Invalid(String),
}

/// Parse a typed action.
///
/// Accepts (case-insensitive) `f`/`fold`, `k`/`check`, `call`, `c` (check when
/// free, call otherwise), `r`/`raise` with an optional total, `allin`, and
/// `q`/`quit`.
///
/// # Example
///
/// ```rust
/// # use holdem_cli::validation::{parse_choice, ParseResult};
/// use holdem_engine::rules::legal_actions;
/// use holdem_table::ActionChoice;
///
/// let legal = legal_actions(1000, 0, 20, 20);
/// assert_eq!(
///     parse_choice("c", &legal),
///     ParseResult::Choice(ActionChoice::Call, None)
/// );
/// assert_eq!(
///     parse_choice("raise 60", &legal),
///     ParseResult::Choice(ActionChoice::Raise, Some("60".to_string()))
/// );
/// assert_eq!(parse_choice("q", &legal), ParseResult::Quit);
/// ```
pub fn parse_choice(input: &str, legal: &LegalActions) -> ParseResult {
    let input = input.trim().to_lowercase();
    let parts: Vec<&str> = input.split_whitespace().collect();

    let Some(first) = parts.first() else {
        return ParseResult::Invalid("Empty input".to_string());
    };

    match *first {
        "q" | "quit" => ParseResult::Quit,
        "f" | "fold" => ParseResult::Choice(ActionChoice::Fold, None),
        "k" | "check" => ParseResult::Choice(ActionChoice::Check, None),
        "call" => ParseResult::Choice(ActionChoice::Call, None),
        "c" if legal.can_check => ParseResult::Choice(ActionChoice::Check, None),
        "c" => ParseResult::Choice(ActionChoice::Call, None),
        "r" | "raise" | "bet" => {
            ParseResult::Choice(ActionChoice::Raise, parts.get(1).map(|s| s.to_string()))
        }
        "allin" | "all-in" => match legal.raise {
            Some(bounds) => {
                ParseResult::Choice(ActionChoice::Raise, Some(bounds.max_total.to_string()))
            }
            None => ParseResult::Choice(ActionChoice::Call, None),
        },
        other => ParseResult::Invalid(format!(
            "Unrecognized action '{}'. Valid actions: fold, check, call, raise <total>, allin, q",
            other
        )),
    }
}

/// Parses card codes given as separate arguments and rejects duplicates.
pub fn parse_card_args(args: &[String]) -> Result<Vec<Card>, GameError> {
    let mut seen = HashSet::new();
    let mut cards = Vec::with_capacity(args.len());
    for arg in args {
        let card: Card = arg.parse()?;
        if !seen.insert(card) {
            return Err(GameError::InvalidCard(format!("{arg} appears twice")));
        }
        cards.push(card);
    }
    Ok(cards)
}
