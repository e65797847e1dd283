//! Pot-odds play with bluffs.

use holdem_engine::engine::TableView;
use holdem_engine::logger::Street;
use rand::{Rng, RngCore};

use crate::heuristics::{pot_odds, postflop_strength, preflop_strength, win_probability};
use crate::{Decision, Strategy};

const CHECKED_TO_BLUFF: f64 = 0.15;
const FACING_BET_BLUFF: f64 = 0.05;
const PREFLOP_STEAL: f64 = 0.08;

/// Raises wider than [`MediumStrategy`](crate::medium::MediumStrategy)
/// pre-flop and, after the flop, calls only when its estimated chance of
/// winning beats the price of the call. Bluffs at random.
#[derive(Debug, Clone, Copy, Default)]
pub struct HardStrategy;

impl HardStrategy {
    fn preflop(view: &TableView, rng: &mut dyn RngCore) -> Decision {
        let strength = preflop_strength(view.hole);
        let to_call = view.to_call();
        let bb = view.big_blind.max(1);

        match strength {
            9..=10 => Decision::Raise(view.pot),
            6..=8 if to_call <= 4 * bb => Decision::Raise(0),
            5..=8 => Decision::Call,
            3..=4 if to_call <= 2 * bb => Decision::Call,
            _ if view.legal.can_check => {
                if rng.random_bool(PREFLOP_STEAL) {
                    Decision::Raise(0)
                } else {
                    Decision::Check
                }
            }
            _ => Decision::Fold,
        }
    }

    fn postflop(view: &TableView, strength: u8, rng: &mut dyn RngCore) -> Decision {
        let win = win_probability(strength, view.live_opponents);

        if view.legal.can_check {
            return if win > 0.7 {
                Decision::Raise(view.pot / 2)
            } else if rng.random_bool(CHECKED_TO_BLUFF) {
                Decision::Raise(0)
            } else {
                Decision::Check
            };
        }

        let odds = pot_odds(view.pot, view.to_call());
        if win > 0.8 {
            Decision::Raise(view.pot / 2)
        } else if win >= odds {
            Decision::Call
        } else if rng.random_bool(FACING_BET_BLUFF) {
            Decision::Raise(0)
        } else {
            Decision::Fold
        }
    }
}

impl Strategy for HardStrategy {
    fn decide(&self, view: &TableView, rng: &mut dyn RngCore) -> Decision {
        if view.street == Street::Preflop {
            return Self::preflop(view, rng);
        }
        match postflop_strength(view.hole, &view.board) {
            Some(strength) => Self::postflop(view, strength, rng),
            None => Self::preflop(view, rng),
        }
    }

    fn name(&self) -> &str {
        "hard"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::view;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn opens_strong_broadway_that_medium_would_limp() {
        let v = view("As Qs", "", 30, 20, 0, 1000);
        let mut rng = StdRng::seed_from_u64(4);
        assert_eq!(HardStrategy.decide(&v, &mut rng), Decision::Raise(0));
    }

    #[test]
    fn calls_when_odds_are_good() {
        // pair of kings facing a quarter-pot bet
        let v = view("Kh 7d", "Kc 9s 3h", 400, 100, 0, 1000);
        let mut rng = StdRng::seed_from_u64(5);
        assert_eq!(HardStrategy.decide(&v, &mut rng), Decision::Call);
    }

    #[test]
    fn mostly_folds_air_to_a_big_bet() {
        let v = view("7c 2d", "Ah Kd 9s", 100, 300, 0, 1000);
        let mut rng = StdRng::seed_from_u64(6);
        let folds = (0..200)
            .filter(|_| HardStrategy.decide(&v, &mut rng) == Decision::Fold)
            .count();
        assert!(folds > 170, "folds = {folds}");
    }

    #[test]
    fn value_bets_the_nuts() {
        let v = view("Ah Kh", "Qh Jh Th", 200, 0, 0, 1000);
        let mut rng = StdRng::seed_from_u64(7);
        assert_eq!(HardStrategy.decide(&v, &mut rng), Decision::Raise(100));
    }
}
