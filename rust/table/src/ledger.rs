//! Bank balances that buy-ins come from and cash-outs go back to.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use holdem_engine::player::PlayerId;
use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum LedgerError {
    #[error("Player {player} has {available} chips, needs {needed}")]
    InsufficientFunds {
        player: PlayerId,
        needed: u64,
        available: u64,
    },
    #[error("Ledger unavailable: {0}")]
    Unavailable(String),
}

/// Atomic chip movements between a player's bank and a table.
///
/// Each call either moves the whole amount or nothing, and a debit never
/// leaves a negative balance.
#[async_trait]
pub trait Ledger: Send + Sync {
    async fn debit(&self, player: PlayerId, amount: u32) -> Result<(), LedgerError>;

    async fn credit(&self, player: PlayerId, amount: u32) -> Result<(), LedgerError>;
}

/// In-process ledger guarded by a mutex.
#[derive(Debug, Default)]
pub struct MemoryLedger {
    balances: Mutex<HashMap<PlayerId, u64>>,
}

impl MemoryLedger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_balances<I>(balances: I) -> Self
    where
        I: IntoIterator<Item = (PlayerId, u64)>,
    {
        Self {
            balances: Mutex::new(balances.into_iter().collect()),
        }
    }

    pub fn balance(&self, player: PlayerId) -> u64 {
        self.balances
            .lock()
            .map(|guard| guard.get(&player).copied().unwrap_or(0))
            .unwrap_or(0)
    }

    /// Sum of every balance held.
    pub fn total(&self) -> u64 {
        self.balances
            .lock()
            .map(|guard| guard.values().sum())
            .unwrap_or(0)
    }
}

#[async_trait]
impl Ledger for MemoryLedger {
    async fn debit(&self, player: PlayerId, amount: u32) -> Result<(), LedgerError> {
        let mut guard = self
            .balances
            .lock()
            .map_err(|_| LedgerError::Unavailable("balance lock poisoned".to_string()))?;
        let balance = guard.entry(player).or_insert(0);
        let needed = u64::from(amount);
        if *balance < needed {
            return Err(LedgerError::InsufficientFunds {
                player,
                needed,
                available: *balance,
            });
        }
        *balance -= needed;
        Ok(())
    }

    async fn credit(&self, player: PlayerId, amount: u32) -> Result<(), LedgerError> {
        let mut guard = self
            .balances
            .lock()
            .map_err(|_| LedgerError::Unavailable("balance lock poisoned".to_string()))?;
        *guard.entry(player).or_insert(0) += u64::from(amount);
        Ok(())
    }
}
