//! Card and table formatters for terminal display.
//!
//! Unicode suit symbols are used where the terminal is expected to render
//! them; otherwise cards fall back to their two-letter codes (`As`, `Td`).

use holdem_engine::cards::Card;
use holdem_engine::engine::TableView;
use holdem_engine::rules::LegalActions;

/// Check if the terminal supports Unicode card symbols by detecting modern terminal environments.
///
/// On Windows, checks for Windows Terminal (WT_SESSION), modern terminals (TERM_PROGRAM),
/// or VS Code (VSCODE_INJECTION). On Unix-like systems, assumes Unicode support.
pub fn supports_unicode() -> bool {
    if cfg!(windows) {
        std::env::var("WT_SESSION").is_ok()
            || std::env::var("TERM_PROGRAM").is_ok()
            || std::env::var("VSCODE_INJECTION").is_ok()
    } else {
        true
    }
}

/// "A♠" where supported, "As" otherwise.
pub fn format_card(card: &Card) -> String {
    if supports_unicode() {
        let code = card.to_string();
        let rank = code.trim_end_matches(|c: char| c.is_ascii_lowercase());
        format!("{}{}", rank, card.suit.symbol())
    } else {
        card.to_string()
    }
}

/// Board in bracket notation, "[]" before the flop.
pub fn format_board(cards: &[Card]) -> String {
    let formatted: Vec<String> = cards.iter().map(format_card).collect();
    format!("[{}]", formatted.join(" "))
}

/// One-line summary of what the seat may do, e.g. "fold | call 40 | raise 80-1000".
pub fn format_options(legal: &LegalActions) -> String {
    let mut options = vec!["fold".to_string()];
    if legal.can_check {
        options.push("check".to_string());
    }
    if let Some(amount) = legal.call {
        options.push(format!("call {amount}"));
    }
    if let Some(bounds) = legal.raise {
        if bounds.min_total == bounds.max_total {
            options.push(format!("raise {} (all-in)", bounds.max_total));
        } else {
            options.push(format!("raise {}-{}", bounds.min_total, bounds.max_total));
        }
    }
    options.join(" | ")
}

pub fn format_view(view: &TableView) -> String {
    format!(
        "{} {} | pot {} | to call {} | stack {} | opponents {}",
        view.street.name(),
        format_board(&view.board),
        view.pot,
        view.to_call(),
        view.stack,
        view.live_opponents
    )
}
