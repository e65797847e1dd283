//! Table orchestration for chat-hosted hold'em.
//!
//! A [`GameSession`] runs one table from lobby to cash-out on top of the
//! `holdem-engine` rules. Everything outside the table is reached through two
//! traits: a [`Ledger`] that holds each player's bank balance, and a
//! [`TableChannel`] that prompts players and posts announcements.

pub mod channel;
pub mod errors;
pub mod ledger;
pub mod logging;
pub mod registry;
pub mod session;
pub mod settings;

pub use channel::{ActionChoice, Announcement, AutoFoldReason, PromptContext, TableChannel};
pub use errors::{RegistryError, SessionError};
pub use ledger::{Ledger, LedgerError, MemoryLedger};
pub use logging::{init_logging, LogEntry, LoggingError, TestLogSubscriber};
pub use registry::{SessionRegistry, SharedSession};
pub use session::{
    CashOutFailure, DeckSource, EndReason, GameSession, HandSummary, SeatResult, SessionId,
    SessionState, SessionSummary,
};
pub use settings::{SettingsError, TableSettings};
