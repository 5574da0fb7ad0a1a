use std::collections::HashMap;

use crate::errors::CoreError;

/// Durable key-value storage for the account's logical records.
///
/// One record per logical key ("portfolio", "transactions"). Absence of a
/// record is a normal condition meaning "nothing saved yet", never an
/// error. In the browser build the host wires this to localStorage; tests
/// and WASM hosts use [`MemoryStore`]; native builds can use
/// [`FileStore`](super::file::FileStore).
pub trait Store {
    /// Read the record under `key`, or `None` if nothing is stored there.
    fn read(&self, key: &str) -> Result<Option<Vec<u8>>, CoreError>;

    /// Write (or overwrite) the record under `key`.
    fn write(&mut self, key: &str, bytes: &[u8]) -> Result<(), CoreError>;

    /// Remove the record under `key`. Removing an absent key is a no-op.
    fn delete(&mut self, key: &str) -> Result<(), CoreError>;
}

/// In-memory store. Holds records for the lifetime of the process only.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    records: HashMap<String, Vec<u8>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored records.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl Store for MemoryStore {
    fn read(&self, key: &str) -> Result<Option<Vec<u8>>, CoreError> {
        Ok(self.records.get(key).cloned())
    }

    fn write(&mut self, key: &str, bytes: &[u8]) -> Result<(), CoreError> {
        self.records.insert(key.to_string(), bytes.to_vec());
        Ok(())
    }

    fn delete(&mut self, key: &str) -> Result<(), CoreError> {
        self.records.remove(key);
        Ok(())
    }
}
