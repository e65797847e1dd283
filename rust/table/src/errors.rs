use holdem_engine::errors::GameError;
use holdem_engine::player::PlayerId;
use thiserror::Error;

use crate::settings::SettingsError;

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("The table is not accepting players")]
    NotInLobby,
    #[error("The table is not running")]
    NotInProgress,
    #[error("Only the host can do that")]
    NotHost,
    #[error("The table is full ({0} seats)")]
    TableFull(usize),
    #[error("Player {0} is already seated")]
    AlreadySeated(PlayerId),
    #[error("Player {0} is not seated")]
    NotSeated(PlayerId),
    #[error("At least 2 players are needed, {0} seated")]
    NotEnoughPlayers(usize),
    #[error(transparent)]
    Settings(#[from] SettingsError),
    #[error("Game engine error: {0}")]
    Engine(#[from] GameError),
}

#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("A table is already open in channel {0}")]
    TableExists(String),
    #[error("No table is open in channel {0}")]
    NoTable(String),
    #[error("Session registry poisoned")]
    StoragePoisoned,
    #[error(transparent)]
    Session(#[from] SessionError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn engine_errors_convert() {
        let err: SessionError = GameError::NotEnoughPlayers(1).into();
        assert!(matches!(err, SessionError::Engine(GameError::NotEnoughPlayers(1))));
        assert!(err.to_string().starts_with("Game engine error"));
    }

    #[test]
    fn session_errors_pass_through_registry() {
        let err: RegistryError = SessionError::TableFull(10).into();
        assert_eq!(err.to_string(), "The table is full (10 seats)");
    }
}
