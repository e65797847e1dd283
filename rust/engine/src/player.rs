use std::fmt;
use std::str::FromStr;

use crate::cards::Card;
use serde::{Deserialize, Serialize};

/// Stable identifier of a player (a chat-platform user id for humans).
pub type PlayerId = u64;

/// Difficulty tier of a computer-controlled seat.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    #[default]
    Medium,
    Hard,
}

impl Difficulty {
    pub fn as_str(self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Difficulty {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "easy" => Ok(Difficulty::Easy),
            "medium" => Ok(Difficulty::Medium),
            "hard" => Ok(Difficulty::Hard),
            other => Err(format!("unknown difficulty: {other}")),
        }
    }
}

/// Who makes the decisions for a seat.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "difficulty", rename_all = "lowercase")]
pub enum Controller {
    Human,
    Bot(Difficulty),
}

/// An action submitted for the seat whose turn it is.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize, Deserialize)]
pub enum PlayerAction {
    /// Fold and forfeit the hand
    Fold,
    /// Check (only valid with nothing to call)
    Check,
    /// Call the current bet, going all-in if the stack is short
    Call,
    /// Raise so that this seat's bet for the street totals the given amount
    Raise(u32),
}

/// A player sitting at the table.
///
/// The chip fields describe the hand in progress: `street_bet` is what the
/// seat has put in on the current street and `total_bet` what it has put in
/// over the whole hand (used to build side pots).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Seat {
    pub id: PlayerId,
    pub name: String,
    pub stack: u32,
    pub controller: Controller,
    hole: Option<[Card; 2]>,
    pub folded: bool,
    pub all_in: bool,
    pub street_bet: u32,
    pub total_bet: u32,
    pub acted: bool,
}

impl Seat {
    pub fn new(id: PlayerId, name: impl Into<String>, stack: u32, controller: Controller) -> Self {
        Self {
            id,
            name: name.into(),
            stack,
            controller,
            hole: None,
            folded: false,
            all_in: false,
            street_bet: 0,
            total_bet: 0,
            acted: false,
        }
    }

    pub fn human(id: PlayerId, name: impl Into<String>, stack: u32) -> Self {
        Self::new(id, name, stack, Controller::Human)
    }

    pub fn bot(id: PlayerId, name: impl Into<String>, stack: u32, difficulty: Difficulty) -> Self {
        Self::new(id, name, stack, Controller::Bot(difficulty))
    }

    pub fn is_bot(&self) -> bool {
        matches!(self.controller, Controller::Bot(_))
    }

    pub fn hole_cards(&self) -> Option<[Card; 2]> {
        self.hole
    }

    pub fn give_cards(&mut self, cards: [Card; 2]) {
        self.hole = Some(cards);
    }

    /// Still contesting the pot.
    pub fn is_live(&self) -> bool {
        !self.folded
    }

    /// Still able to make betting decisions this hand.
    pub fn can_act(&self) -> bool {
        !self.folded && !self.all_in
    }

    /// Moves up to `amount` chips from the stack into the current bet and
    /// returns how many actually moved. Emptying the stack marks the seat
    /// all-in.
    pub fn commit(&mut self, amount: u32) -> u32 {
        let moved = amount.min(self.stack);
        self.stack -= moved;
        self.street_bet += moved;
        self.total_bet += moved;
        if self.stack == 0 {
            self.all_in = true;
        }
        moved
    }

    pub fn add_chips(&mut self, amount: u32) {
        self.stack = self.stack.saturating_add(amount);
    }

    pub fn reset_for_street(&mut self) {
        self.street_bet = 0;
        self.acted = false;
    }

    pub fn reset_for_hand(&mut self) {
        self.hole = None;
        self.folded = false;
        self.all_in = false;
        self.street_bet = 0;
        self.total_bet = 0;
        self.acted = false;
    }
}
