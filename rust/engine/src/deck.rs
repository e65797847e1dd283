use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;

use crate::cards::{full_deck, Card};
use crate::errors::GameError;

/// The 52 unique cards of one hand, drawn from the end.
///
/// Every hand gets a fresh deck, so no state leaks between hands. Seeding is
/// only used for reproducible simulations and tests.
#[derive(Debug, Clone)]
pub struct Deck {
    cards: Vec<Card>,
    rng: ChaCha20Rng,
    stacked: bool,
}

impl Deck {
    /// Unshuffled deck driven by a random seed.
    pub fn new() -> Self {
        Self::new_with_seed(rand::random())
    }

    pub fn new_with_seed(seed: u64) -> Self {
        let rng = ChaCha20Rng::seed_from_u64(seed);
        // Keep initial order until shuffle is called explicitly
        Self {
            cards: full_deck(),
            rng,
            stacked: false,
        }
    }

    /// Deck whose first draws are `top`, in order, followed by the rest of
    /// the 52 cards. Shuffling a stacked deck keeps the order, which lets
    /// tests and replays fix every card of a hand.
    pub fn stacked(top: &[Card]) -> Result<Self, GameError> {
        let mut order: Vec<Card> = Vec::with_capacity(52);
        for card in top {
            if order.contains(card) {
                return Err(GameError::InvalidCard(card.to_string()));
            }
            order.push(*card);
        }
        order.extend(full_deck().into_iter().filter(|c| !top.contains(c)));
        order.reverse();
        Ok(Self {
            cards: order,
            rng: ChaCha20Rng::seed_from_u64(0),
            stacked: true,
        })
    }

    /// Restores all 52 cards and Fisher–Yates shuffles them.
    pub fn shuffle(&mut self) {
        if self.stacked {
            return;
        }
        self.cards = full_deck();
        self.cards.shuffle(&mut self.rng);
    }

    /// Removes and returns exactly `count` cards from the end.
    pub fn draw(&mut self, count: usize) -> Result<Vec<Card>, GameError> {
        let remaining = self.cards.len();
        if count > remaining {
            return Err(GameError::DeckExhausted {
                requested: count,
                remaining,
            });
        }
        let mut drawn = self.cards.split_off(remaining - count);
        drawn.reverse();
        Ok(drawn)
    }

    pub fn draw_one(&mut self) -> Result<Card, GameError> {
        self.cards.pop().ok_or(GameError::DeckExhausted {
            requested: 1,
            remaining: 0,
        })
    }

    pub fn burn(&mut self) -> Result<(), GameError> {
        self.draw_one().map(|_| ())
    }

    pub fn remaining(&self) -> usize {
        self.cards.len()
    }
}

impl Default for Deck {
    fn default() -> Self {
        Self::new()
    }
}
