use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use holdem_engine::player::PlayerId;
use tokio::sync::Mutex;

use crate::channel::TableChannel;
use crate::errors::RegistryError;
use crate::ledger::Ledger;
use crate::session::{GameSession, SessionState};
use crate::settings::TableSettings;

pub type SharedSession = Arc<Mutex<GameSession>>;

/// At most one table per chat channel.
pub struct SessionRegistry {
    sessions: RwLock<HashMap<String, SharedSession>>,
    ledger: Arc<dyn Ledger>,
    defaults: TableSettings,
}

impl SessionRegistry {
    pub fn new(ledger: Arc<dyn Ledger>, defaults: TableSettings) -> Self {
        Self {
            sessions: RwLock::new(HashMap::new()),
            ledger,
            defaults,
        }
    }

    pub fn defaults(&self) -> &TableSettings {
        &self.defaults
    }

    /// Opens a lobby in `channel_id` with the host already seated.
    pub async fn open_lobby(
        &self,
        channel_id: &str,
        host: PlayerId,
        host_name: &str,
        channel: Arc<dyn TableChannel>,
        settings: Option<TableSettings>,
    ) -> Result<SharedSession, RegistryError> {
        let settings = settings.unwrap_or_else(|| self.defaults.clone());
        let mut session =
            GameSession::new(channel_id, host, settings, Arc::clone(&self.ledger), channel)?;
        {
            let sessions = self
                .sessions
                .read()
                .map_err(|_| RegistryError::StoragePoisoned)?;
            if sessions.contains_key(channel_id) {
                return Err(RegistryError::TableExists(channel_id.to_string()));
            }
        }
        session.join(host, host_name).await?;

        let shared = Arc::new(Mutex::new(session));
        let mut sessions = self
            .sessions
            .write()
            .map_err(|_| RegistryError::StoragePoisoned)?;
        if sessions.contains_key(channel_id) {
            return Err(RegistryError::TableExists(channel_id.to_string()));
        }
        sessions.insert(channel_id.to_string(), Arc::clone(&shared));
        tracing::info!(channel_id, host, "lobby opened");
        Ok(shared)
    }

    pub fn get(&self, channel_id: &str) -> Result<SharedSession, RegistryError> {
        let sessions = self
            .sessions
            .read()
            .map_err(|_| RegistryError::StoragePoisoned)?;
        sessions
            .get(channel_id)
            .cloned()
            .ok_or_else(|| RegistryError::NoTable(channel_id.to_string()))
    }

    pub fn close(&self, channel_id: &str) -> Result<SharedSession, RegistryError> {
        let mut sessions = self
            .sessions
            .write()
            .map_err(|_| RegistryError::StoragePoisoned)?;
        let removed = sessions
            .remove(channel_id)
            .ok_or_else(|| RegistryError::NoTable(channel_id.to_string()))?;
        tracing::info!(channel_id, "table removed");
        Ok(removed)
    }

    /// Drops tables that have ended. Tables busy playing are kept.
    pub fn prune_ended(&self) -> Result<usize, RegistryError> {
        let mut sessions = self
            .sessions
            .write()
            .map_err(|_| RegistryError::StoragePoisoned)?;
        let before = sessions.len();
        sessions.retain(|_, session| match session.try_lock() {
            Ok(guard) => guard.state() != SessionState::Ended,
            Err(_) => true,
        });
        Ok(before - sessions.len())
    }

    pub fn active_tables(&self) -> Vec<String> {
        let mut tables: Vec<String> = self
            .sessions
            .read()
            .map(|sessions| sessions.keys().cloned().collect())
            .unwrap_or_default();
        tables.sort();
        tables
    }
}
