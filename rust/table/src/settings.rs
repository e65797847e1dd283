use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;

/// Table limits and pacing, fixed when a lobby opens
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct TableSettings {
    pub small_blind: u32,
    pub big_blind: u32,
    /// Chips each seat starts with, debited from the player's bank at start
    pub buy_in: u32,
    /// 2 to 10
    pub max_seats: usize,
    /// How long a human has to act before the seat is auto-folded
    pub decision_timeout_secs: u64,
    /// Cosmetic pause before a bot acts
    pub bot_think_ms: u64,
    /// Stop after this many hands even if several stacks remain
    pub hand_limit: Option<u32>,
}

impl Default for TableSettings {
    fn default() -> Self {
        Self {
            small_blind: 10,
            big_blind: 20,
            buy_in: 1000,
            max_seats: 10,
            decision_timeout_secs: 60,
            bot_think_ms: 750,
            hand_limit: None,
        }
    }
}

impl TableSettings {
    /// Validate settings values
    pub fn validate(&self) -> Result<(), SettingsError> {
        if self.big_blind == 0 {
            return Err(SettingsError::InvalidValue(
                "big_blind must be greater than 0".to_string(),
            ));
        }

        if self.small_blind == 0 || self.small_blind > self.big_blind {
            return Err(SettingsError::InvalidValue(format!(
                "small_blind must be between 1 and the big blind ({})",
                self.big_blind
            )));
        }

        if self.buy_in < self.big_blind {
            return Err(SettingsError::InvalidValue(format!(
                "buy_in must cover at least one big blind ({})",
                self.big_blind
            )));
        }

        if !(2..=10).contains(&self.max_seats) {
            return Err(SettingsError::InvalidValue(
                "max_seats must be between 2 and 10".to_string(),
            ));
        }

        let table_chips = u32::try_from(self.max_seats)
            .ok()
            .and_then(|seats| self.buy_in.checked_mul(seats));
        if table_chips.is_none() {
            return Err(SettingsError::InvalidValue(format!(
                "buy_in of {} across {} seats is more chips than a pot can hold",
                self.buy_in, self.max_seats
            )));
        }

        if self.decision_timeout_secs == 0 {
            return Err(SettingsError::InvalidValue(
                "decision_timeout_secs must be greater than 0".to_string(),
            ));
        }

        if self.hand_limit == Some(0) {
            return Err(SettingsError::InvalidValue(
                "hand_limit must be greater than 0 when set".to_string(),
            ));
        }

        Ok(())
    }

    pub fn decision_timeout(&self) -> Duration {
        Duration::from_secs(self.decision_timeout_secs)
    }

    pub fn bot_think(&self) -> Duration {
        Duration::from_millis(self.bot_think_ms)
    }
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SettingsError {
    #[error("Invalid settings value: {0}")]
    InvalidValue(String),
}
