//! Near-random play for new players to beat.

use holdem_engine::engine::TableView;
use rand::{Rng, RngCore};

use crate::{Decision, Strategy};

const RAISE_CHANCE: f64 = 0.05;

/// Calls anything under a tenth of its stack, flips a coin otherwise and
/// raises the minimum once in a while. Never looks at its cards.
#[derive(Debug, Clone, Copy, Default)]
pub struct EasyStrategy;

impl Strategy for EasyStrategy {
    fn decide(&self, view: &TableView, rng: &mut dyn RngCore) -> Decision {
        if view.legal.raise.is_some() && rng.random_bool(RAISE_CHANCE) {
            return Decision::Raise(0);
        }
        if view.legal.can_check {
            return Decision::Check;
        }
        let to_call = view.to_call();
        if to_call < view.stack / 10 || rng.random_bool(0.5) {
            Decision::Call
        } else {
            Decision::Fold
        }
    }

    fn name(&self) -> &str {
        "easy"
    }
}
