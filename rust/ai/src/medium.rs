//! Threshold play on hand strength.

use holdem_engine::engine::TableView;
use holdem_engine::logger::Street;
use rand::RngCore;

use crate::heuristics::{postflop_strength, preflop_strength};
use crate::{Decision, Strategy};

/// Plays its cards straight: raises strong hands, calls reasonable ones and
/// folds the rest. Deterministic for a given view.
#[derive(Debug, Clone, Copy, Default)]
pub struct MediumStrategy;

impl MediumStrategy {
    fn strength(view: &TableView) -> u8 {
        if view.street == Street::Preflop {
            preflop_strength(view.hole)
        } else {
            postflop_strength(view.hole, &view.board).unwrap_or_else(|| preflop_strength(view.hole))
        }
    }
}

impl Strategy for MediumStrategy {
    fn decide(&self, view: &TableView, _rng: &mut dyn RngCore) -> Decision {
        let strength = Self::strength(view);
        let to_call = view.to_call();

        if view.legal.can_check {
            return match strength {
                8..=10 => Decision::Raise(view.pot / 2),
                6..=7 => Decision::Raise(0),
                _ => Decision::Check,
            };
        }

        match strength {
            8..=10 => Decision::Raise(0),
            5..=7 => Decision::Call,
            3..=4 if to_call <= view.pot / 3 || to_call <= view.big_blind => Decision::Call,
            _ => Decision::Fold,
        }
    }

    fn name(&self) -> &str {
        "medium"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::view;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn decide(v: &TableView) -> Decision {
        MediumStrategy.decide(v, &mut StdRng::seed_from_u64(0))
    }

    #[test]
    fn raises_premium_pairs_preflop() {
        assert_eq!(decide(&view("Ks Kh", "", 30, 20, 0, 1000)), Decision::Raise(0));
    }

    #[test]
    fn folds_trash_to_a_raise() {
        assert_eq!(decide(&view("7c 2d", "", 90, 60, 20, 1000)), Decision::Fold);
    }

    #[test]
    fn calls_with_two_pair_on_the_flop() {
        let v = view("Ah 9d", "As 9c 4h", 200, 100, 0, 1000);
        assert_eq!(decide(&v), Decision::Call);
    }

    #[test]
    fn bets_a_flush_when_checked_to() {
        let v = view("Ah 9h", "2h 5h Jh", 200, 0, 0, 1000);
        assert_eq!(decide(&v), Decision::Raise(100));
    }

    #[test]
    fn checks_a_weak_hand_when_free() {
        let v = view("7c 2d", "Ah Kd 9s", 200, 0, 0, 1000);
        assert_eq!(decide(&v), Decision::Check);
    }
}
