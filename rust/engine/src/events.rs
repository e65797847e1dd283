use serde::{Deserialize, Serialize};

use crate::cards::Card;
use crate::hand::Hand;
use crate::logger::Street;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BlindKind {
    Small,
    Big,
}

/// Every visible state change of a hand, in order.
///
/// Seats are referred to by their index in the engine's seat list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum TableEvent {
    HandStarted {
        dealer: usize,
        small_blind: usize,
        big_blind: usize,
    },
    BlindPosted {
        seat: usize,
        kind: BlindKind,
        amount: u32,
        all_in: bool,
    },
    Folded {
        seat: usize,
    },
    Checked {
        seat: usize,
    },
    Called {
        seat: usize,
        amount: u32,
        all_in: bool,
    },
    Raised {
        seat: usize,
        to: u32,
        all_in: bool,
    },
    StreetDealt {
        street: Street,
        cards: Vec<Card>,
        board: Vec<Card>,
    },
    /// No more betting is possible; the rest of the board is dealt straight out.
    RunOut,
    ShowdownReveal {
        seat: usize,
        cards: [Card; 2],
        hand: Hand,
    },
    PotAwarded {
        seat: usize,
        amount: u32,
        /// 0 for the main pot, 1.. for side pots
        pot: usize,
        hand: String,
    },
    WonUncontested {
        seat: usize,
        amount: u32,
    },
}
