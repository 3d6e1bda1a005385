//! The state store seam
//!
//! The chaincode never owns ledger state; it reads and writes through
//! a [`StateStore`] supplied by its host.

use crate::errors::StoreError;
use std::collections::BTreeMap;

/// **Key-value state capability provided by the host**
///
/// Each call is atomic on its own; nothing links two calls together.
pub trait StateStore {
    /// Returns `None` for a key that was never set or was deleted
    fn get_state(&self, key: &str) -> Result<Option<String>, StoreError>;

    fn put_state(&mut self, key: &str, value: &str) -> Result<(), StoreError>;

    /// Deleting a missing key is not an error
    fn del_state(&mut self, key: &str) -> Result<(), StoreError>;
}

/// **An in-memory state store**
///
/// Maps a `String` key to a `String` value and never fails.
#[derive(Debug, Default)]
pub struct MemoryStore {
    state: BTreeMap<String, String>,
}

impl MemoryStore {
    /// Returns an empty instance of the [`MemoryStore`] type
    pub fn new() -> Self {
        MemoryStore {
            state: BTreeMap::new(),
        }
    }

    /// All keys and values, ordered by key
    pub fn entries(&self) -> &BTreeMap<String, String> {
        &self.state
    }
}

impl StateStore for MemoryStore {
    fn get_state(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.state.get(key).cloned())
    }

    fn put_state(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        self.state.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn del_state(&mut self, key: &str) -> Result<(), StoreError> {
        self.state.remove(key);
        Ok(())
    }
}
