//! # holdem-ai: Computer opponents
//!
//! Rule-based decision makers for bot seats, one per difficulty tier. A
//! strategy sees only the [`TableView`] the engine hands out for its seat and
//! returns a [`Decision`]; turning that into a legal engine action is done by
//! [`Decision::into_action`], which never produces an illegal move.
//!
//! ## Quick Start
//!
//! ```rust
//! use holdem_ai::create_ai;
//! use holdem_engine::deck::Deck;
//! use holdem_engine::engine::Engine;
//! use holdem_engine::player::{Difficulty, Seat};
//! use holdem_engine::rules::Blinds;
//! use rand::SeedableRng;
//! use rand::rngs::StdRng;
//!
//! let seats = vec![
//!     Seat::bot(1, "Bot 1", 1000, Difficulty::Hard),
//!     Seat::bot(2, "Bot 2", 1000, Difficulty::Hard),
//! ];
//! let mut engine =
//!     Engine::start_hand(seats, 0, Blinds::new(10, 20), Deck::new_with_seed(42)).unwrap();
//!
//! let ai = create_ai(Difficulty::Hard);
//! let mut rng = StdRng::seed_from_u64(7);
//! let seat = engine.current_seat().unwrap();
//! let view = engine.view(seat).unwrap();
//! let action = ai.decide(&view, &mut rng).into_action(&view);
//! engine.apply_action(seat, action).unwrap();
//! ```

use holdem_engine::engine::TableView;
use holdem_engine::player::{Difficulty, PlayerAction};
use rand::RngCore;

pub mod easy;
pub mod hard;
pub mod heuristics;
pub mod medium;

/// What a strategy wants to do, before it is fitted to the legal actions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Fold,
    Check,
    Call,
    /// Chips on top of the minimum raise total
    Raise(u32),
}

impl Decision {
    /// Fits the decision to what the seat may legally do.
    ///
    /// Folding when checking is free becomes a check, a check facing a bet
    /// becomes a fold, a call with nothing to call becomes a check, and a
    /// raise is capped at the seat's stack (all-in). A raise the seat cannot
    /// make falls back to a call, or a check when nothing is owed.
    pub fn into_action(self, view: &TableView) -> PlayerAction {
        let legal = &view.legal;
        match self {
            Decision::Fold if legal.can_check => PlayerAction::Check,
            Decision::Fold => PlayerAction::Fold,
            Decision::Check if legal.can_check => PlayerAction::Check,
            Decision::Check => PlayerAction::Fold,
            Decision::Call if legal.call.is_some() => PlayerAction::Call,
            Decision::Call => PlayerAction::Check,
            Decision::Raise(extra) => match legal.raise {
                Some(bounds) => PlayerAction::Raise(
                    bounds.min_total.saturating_add(extra).min(bounds.max_total),
                ),
                None if legal.call.is_some() => PlayerAction::Call,
                None => PlayerAction::Check,
            },
        }
    }
}

/// A decision maker for a computer-controlled seat.
///
/// Implementations must be pure with respect to the view: all randomness
/// comes from the `rng` argument so seeded games replay exactly.
pub trait Strategy: Send + Sync {
    fn decide(&self, view: &TableView, rng: &mut dyn RngCore) -> Decision;

    fn name(&self) -> &str;
}

/// Builds the strategy for a difficulty tier.
///
/// ```rust
/// use holdem_ai::create_ai;
/// use holdem_engine::player::Difficulty;
///
/// assert_eq!(create_ai(Difficulty::Easy).name(), "easy");
/// ```
pub fn create_ai(difficulty: Difficulty) -> Box<dyn Strategy> {
    match difficulty {
        Difficulty::Easy => Box::new(easy::EasyStrategy),
        Difficulty::Medium => Box::new(medium::MediumStrategy),
        Difficulty::Hard => Box::new(hard::HardStrategy),
    }
}
