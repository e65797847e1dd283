use std::cmp::Ordering;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::cards::{Card, Rank};
use crate::errors::GameError;

#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
pub enum Category {
    HighCard = 0,
    Pair = 1,
    TwoPair = 2,
    ThreeOfAKind = 3,
    Straight = 4,
    Flush = 5,
    FullHouse = 6,
    FourOfAKind = 7,
    StraightFlush = 8,
    RoyalFlush = 9,
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Category::HighCard => "High Card",
            Category::Pair => "Pair",
            Category::TwoPair => "Two Pair",
            Category::ThreeOfAKind => "Three of a Kind",
            Category::Straight => "Straight",
            Category::Flush => "Flush",
            Category::FullHouse => "Full House",
            Category::FourOfAKind => "Four of a Kind",
            Category::StraightFlush => "Straight Flush",
            Category::RoyalFlush => "Royal Flush",
        };
        f.write_str(name)
    }
}

/// The best five cards of a holding, ranked.
///
/// `cards` is ordered for tie-breaking: by how often the rank occurs in the
/// hand (descending), then by value (descending). In a wheel the Ace sorts
/// last because it plays as a one.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct Hand {
    pub category: Category,
    pub cards: [Card; 5],
    pub is_wheel: bool,
}

impl Hand {
    /// Values compared after the category, Ace counted as 1 in a wheel.
    pub fn tiebreak_values(&self) -> [u8; 5] {
        self.cards.map(|c| play_value(c, self.is_wheel))
    }

    pub fn describe(&self) -> String {
        let first = self.cards[0].rank;
        match self.category {
            Category::HighCard => format!("High Card, {}", first.name()),
            Category::Pair => format!("Pair of {}", first.plural()),
            Category::TwoPair => format!(
                "Two Pair, {} and {}",
                first.plural(),
                self.cards[2].rank.plural()
            ),
            Category::ThreeOfAKind => format!("Three of a Kind, {}", first.plural()),
            Category::Straight => format!("Straight, {} high", first.name()),
            Category::Flush => format!("Flush, {} high", first.name()),
            Category::FullHouse => format!(
                "Full House, {} over {}",
                first.plural(),
                self.cards[3].rank.plural()
            ),
            Category::FourOfAKind => format!("Four of a Kind, {}", first.plural()),
            Category::StraightFlush => format!("Straight Flush, {} high", first.name()),
            Category::RoyalFlush => "Royal Flush".to_string(),
        }
    }
}

impl fmt::Display for Hand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.describe())
    }
}

fn play_value(card: Card, wheel: bool) -> u8 {
    if wheel && card.rank == Rank::Ace {
        1
    } else {
        card.value()
    }
}

/// Ranks exactly five cards.
pub fn evaluate5(cards: &[Card; 5]) -> Hand {
    let mut counts = [0u8; 15];
    for c in cards {
        counts[c.value() as usize] += 1;
    }

    let flush = cards.iter().all(|c| c.suit == cards[0].suit);

    let mut values: Vec<u8> = cards.iter().map(|c| c.value()).collect();
    values.sort_unstable_by(|a, b| b.cmp(a));
    let distinct = counts.iter().filter(|&&n| n > 0).count() == 5;
    let is_wheel = distinct && values == [14, 5, 4, 3, 2];
    let straight = distinct && (values[0] - values[4] == 4 || is_wheel);

    let mut shape: Vec<u8> = counts.iter().copied().filter(|&n| n > 0).collect();
    shape.sort_unstable_by(|a, b| b.cmp(a));

    let category = if straight && flush {
        if !is_wheel && values[0] == 14 {
            Category::RoyalFlush
        } else {
            Category::StraightFlush
        }
    } else {
        match shape.as_slice() {
            [4, 1] => Category::FourOfAKind,
            [3, 2] => Category::FullHouse,
            _ if flush => Category::Flush,
            _ if straight => Category::Straight,
            [3, 1, 1] => Category::ThreeOfAKind,
            [2, 2, 1] => Category::TwoPair,
            [2, 1, 1, 1] => Category::Pair,
            _ => Category::HighCard,
        }
    };

    let mut ordered = *cards;
    ordered.sort_by(|a, b| {
        let count_a = counts[a.value() as usize];
        let count_b = counts[b.value() as usize];
        count_b
            .cmp(&count_a)
            .then_with(|| play_value(*b, is_wheel).cmp(&play_value(*a, is_wheel)))
            .then_with(|| b.suit.cmp(&a.suit))
    });

    Hand {
        category,
        cards: ordered,
        is_wheel,
    }
}

/// Best five-card hand out of 5, 6 or 7 cards.
///
/// Every 5-card subset is ranked (21 at most) and the strongest kept.
pub fn find_best_hand(cards: &[Card]) -> Result<Hand, GameError> {
    let n = cards.len();
    if !(5..=7).contains(&n) {
        return Err(GameError::InvalidCardCount(n));
    }

    let mut best: Option<Hand> = None;
    for mask in 0u32..(1 << n) {
        if mask.count_ones() != 5 {
            continue;
        }
        let mut pick = [cards[0]; 5];
        let mut k = 0;
        for (i, &c) in cards.iter().enumerate() {
            if mask & (1 << i) != 0 {
                pick[k] = c;
                k += 1;
            }
        }
        let hand = evaluate5(&pick);
        best = match best {
            Some(current) if compare_hands(&current, &hand).is_ge() => Some(current),
            _ => Some(hand),
        };
    }
    best.ok_or(GameError::InvalidCardCount(n))
}

pub fn compare_hands(a: &Hand, b: &Hand) -> Ordering {
    match a.category.cmp(&b.category) {
        Ordering::Equal => a.tiebreak_values().cmp(&b.tiebreak_values()),
        ord => ord,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::parse_cards;

    fn five(s: &str) -> [Card; 5] {
        parse_cards(s).unwrap().try_into().unwrap()
    }

    #[test]
    fn wheel_orders_ace_last() {
        let hand = evaluate5(&five("As 2d 3c 4h 5s"));
        assert_eq!(hand.category, Category::Straight);
        assert!(hand.is_wheel);
        assert_eq!(hand.tiebreak_values(), [5, 4, 3, 2, 1]);
        assert_eq!(hand.describe(), "Straight, Five high");
    }

    #[test]
    fn pairs_sort_before_kickers() {
        let hand = evaluate5(&five("2c Kd Ah Ks 9c"));
        assert_eq!(hand.category, Category::Pair);
        assert_eq!(hand.tiebreak_values(), [13, 13, 14, 9, 2]);
        assert_eq!(hand.describe(), "Pair of Kings");
    }

    #[test]
    fn full_house_description() {
        let hand = evaluate5(&five("7c Kd 7h Ks Kc"));
        assert_eq!(hand.category, Category::FullHouse);
        assert_eq!(hand.describe(), "Full House, Kings over Sevens");
    }

    #[test]
    fn best_hand_rejects_short_input() {
        let cards = parse_cards("As Kd Qh Jc").unwrap();
        assert_eq!(
            find_best_hand(&cards).unwrap_err(),
            GameError::InvalidCardCount(4)
        );
    }
}
