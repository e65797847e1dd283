//! Hand-strength estimates shared by the strategies.
//!
//! Both pre-flop and post-flop strength are on a 0-10 scale so the tiers can
//! use one set of thresholds across streets.

use holdem_engine::cards::Card;
use holdem_engine::hand::{Category, compare_hands, find_best_hand};

/// Pre-flop strength of two hole cards, 0-10.
///
/// Points for the two card values, a pocket pair bonus, a suited bonus and a
/// bonus for connected ranks, scaled so AA scores 10 and 72 offsuit 0.
///
/// - 9-10: premium pairs (AA-QQ)
/// - 6-8: big pairs and strong broadway (JJ-88, AKs)
/// - 3-5: small pairs, suited connectors, offsuit broadway
/// - 0-2: everything else
pub fn preflop_strength(hole: [Card; 2]) -> u8 {
    let (a, b) = (hole[0].value() as u32, hole[1].value() as u32);
    let (high, low) = if a >= b { (a, b) } else { (b, a) };

    let mut points = high + low / 2;
    if high == low {
        points += 15;
    } else {
        points += match high - low {
            1 => 4,
            2 => 2,
            3 => 1,
            _ => 0,
        };
        // A-2 through A-5 can make the wheel
        if high == 14 && low <= 5 {
            points += 1;
        }
    }
    if hole[0].suit == hole[1].suit {
        points += 4;
    }

    (points.saturating_sub(8) * 10 / 28).min(10) as u8
}

/// Post-flop strength from the best hand the seat can make, 0-10.
///
/// Returns `None` before the flop. Holdings that only play the board count
/// as the weakest made hand.
pub fn postflop_strength(hole: [Card; 2], board: &[Card]) -> Option<u8> {
    if board.len() < 3 {
        return None;
    }
    let mut cards = Vec::with_capacity(7);
    cards.extend_from_slice(&hole);
    cards.extend_from_slice(board);
    let best = find_best_hand(&cards).ok()?;

    if board.len() == 5 {
        if let Ok(board_hand) = find_best_hand(board) {
            if compare_hands(&best, &board_hand).is_eq() {
                return Some(1);
            }
        }
    }

    let base: u8 = match best.category {
        Category::HighCard => 1,
        Category::Pair => 3,
        Category::TwoPair => 5,
        Category::ThreeOfAKind => 6,
        Category::Straight => 7,
        Category::Flush => 8,
        Category::FullHouse => 9,
        Category::FourOfAKind | Category::StraightFlush | Category::RoyalFlush => 10,
    };
    let kicker = u8::from(best.tiebreak_values()[0] >= 12 && base < 7);
    Some((base + kicker).min(10))
}

/// Coarse chance of holding the best hand at showdown.
pub fn win_probability(strength: u8, opponents: usize) -> f32 {
    const BY_STRENGTH: [f32; 11] = [
        0.05, 0.15, 0.25, 0.45, 0.52, 0.62, 0.70, 0.80, 0.88, 0.94, 0.98,
    ];
    let base = BY_STRENGTH[usize::from(strength.min(10))];
    let extra = opponents.saturating_sub(1) as f32;
    base / (1.0 + 0.15 * extra)
}

/// Share of the final pot a call pays for: `call / (pot + call)`.
pub fn pot_odds(pot: u32, call: u32) -> f32 {
    if call == 0 {
        return 0.0;
    }
    call as f32 / (pot + call) as f32
}
