//! # holdem-engine: Texas Hold'em table core
//!
//! Cards, deck, hand evaluation, betting rules, side pots and the per-hand
//! state machine for multiplayer (2-10 seat) No-Limit Hold'em. Nothing here
//! does I/O except the optional JSONL hand-history writer.
//!
//! ## Core Modules
//!
//! - [`cards`] - Card representation (Suit, Rank, Card) and two-character codes
//! - [`deck`] - 52-card deck with a seedable ChaCha20 shuffle
//! - [`engine`] - Betting state machine for one hand
//! - [`events`] - Table events emitted by the engine
//! - [`game`] - Button, blind and first-to-act positions
//! - [`hand`] - Five-card evaluation and best-of-seven selection
//! - [`player`] - Seats, controllers and player actions
//! - [`pot`] - Main pot and side pot layering
//! - [`rules`] - Legal actions and action validation
//! - [`logger`] - HandRecord serialization and JSONL logging
//! - [`errors`] - Error types for game operations
//!
//! ## Quick Start
//!
//! ```rust
//! use holdem_engine::cards::parse_cards;
//! use holdem_engine::hand::{find_best_hand, Category};
//!
//! let cards = parse_cards("Ah Kh Qh Jh Th 2c 3d").unwrap();
//! let best = find_best_hand(&cards).unwrap();
//! assert_eq!(best.category, Category::RoyalFlush);
//! ```
//!
//! ## Deterministic Gameplay
//!
//! ```rust
//! use holdem_engine::deck::Deck;
//!
//! let mut a = Deck::new_with_seed(42);
//! let mut b = Deck::new_with_seed(42);
//! a.shuffle();
//! b.shuffle();
//! assert_eq!(a.draw(5).unwrap(), b.draw(5).unwrap());
//! ```

pub mod cards;
pub mod deck;
pub mod engine;
pub mod errors;
pub mod events;
pub mod game;
pub mod hand;
pub mod logger;
pub mod player;
pub mod pot;
pub mod rules;
