use serde::{Deserialize, Serialize};

use crate::errors::CoreError;
use crate::models::ledger::Ledger;
use crate::models::quote::QuoteCache;
use crate::models::settings::Settings;
use crate::models::transaction::TransactionLog;

use super::format;
use super::store::Store;

/// Logical key the account snapshot is stored under.
pub const PORTFOLIO_KEY: &str = "portfolio";

/// Logical key the transaction history is stored under.
pub const TRANSACTIONS_KEY: &str = "transactions";

/// Everything saved under [`PORTFOLIO_KEY`]: the ledger itself, the account
/// settings, and the last-known quotes (kept for offline display).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccountSnapshot {
    pub ledger: Ledger,
    pub settings: Settings,
    pub quote_cache: QuoteCache,
}

/// High-level persistence: save/load account state through a [`Store`].
///
/// Flow: state → bincode → PTRD envelope → store record, and back.
/// Writes are best-effort durability; in-memory state stays the source of
/// truth for the running session.
pub struct StorageManager;

impl StorageManager {
    /// Persist the account snapshot under [`PORTFOLIO_KEY`].
    pub fn save_state(
        store: &mut dyn Store,
        snapshot: &AccountSnapshot,
    ) -> Result<(), CoreError> {
        let payload = bincode::serialize(snapshot)
            .map_err(|e| CoreError::Serialization(format!("Failed to serialize snapshot: {e}")))?;
        let record = format::write_record(format::CURRENT_VERSION, &payload);
        store.write(PORTFOLIO_KEY, &record)
    }

    /// Load the account snapshot, or `None` when nothing has been saved
    /// yet — callers fall back to default initial state.
    pub fn load_state(store: &dyn Store) -> Result<Option<AccountSnapshot>, CoreError> {
        let Some(record) = store.read(PORTFOLIO_KEY)? else {
            return Ok(None);
        };
        let (_version, payload) = format::read_record(&record)?;
        let snapshot: AccountSnapshot = bincode::deserialize(payload)
            .map_err(|e| CoreError::Deserialization(format!("Failed to deserialize snapshot: {e}")))?;
        Ok(Some(snapshot))
    }

    /// Persist the transaction history under [`TRANSACTIONS_KEY`].
    pub fn save_log(store: &mut dyn Store, log: &TransactionLog) -> Result<(), CoreError> {
        let payload = bincode::serialize(log)
            .map_err(|e| CoreError::Serialization(format!("Failed to serialize log: {e}")))?;
        let record = format::write_record(format::CURRENT_VERSION, &payload);
        store.write(TRANSACTIONS_KEY, &record)
    }

    /// Load the transaction history; an absent record yields an empty log.
    pub fn load_log(store: &dyn Store) -> Result<TransactionLog, CoreError> {
        let Some(record) = store.read(TRANSACTIONS_KEY)? else {
            return Ok(TransactionLog::new());
        };
        let (_version, payload) = format::read_record(&record)?;
        let log: TransactionLog = bincode::deserialize(payload)
            .map_err(|e| CoreError::Deserialization(format!("Failed to deserialize log: {e}")))?;
        Ok(log)
    }

    /// Remove both records, e.g. when wiping the account from storage.
    pub fn clear(store: &mut dyn Store) -> Result<(), CoreError> {
        store.delete(PORTFOLIO_KEY)?;
        store.delete(TRANSACTIONS_KEY)
    }
}
