use std::{
    collections::HashMap,
    sync::{Arc, Mutex},
};

use crate::error::PersistenceError;

/// Provides secure persistent storage for session data like the auth token.
/// Implementations should handle platform-specific storage (e.g. Keychain on iOS,
/// EncryptedSharedPreferences on Android) and ensure data is stored securely.
///
/// Each call is independent. Writes to a single key issued in order by one caller
/// are expected to be applied in that order, nothing else is assumed.
#[uniffi::export(with_foreign)]
#[async_trait::async_trait]
pub trait SecurePersistentStore: Send + Sync {
    /// Gets the value for the given key, or None if not found
    async fn get(&self, key: String) -> Result<Option<Vec<u8>>, PersistenceError>;

    /// Sets the value for the given key, replacing any previous value
    async fn set(&self, key: String, value: Vec<u8>) -> Result<(), PersistenceError>;

    /// Removes the entry for the given key. Removing a missing key is not an error.
    async fn remove_entry(&self, key: String) -> Result<(), PersistenceError>;
}

/// Volatile [SecurePersistentStore], nothing survives the process.
#[derive(Default, Debug)]
pub struct MemoryStore(Mutex<HashMap<String, Vec<u8>>>);

impl MemoryStore {
    fn entries(
        &self,
    ) -> Result<std::sync::MutexGuard<'_, HashMap<String, Vec<u8>>>, PersistenceError> {
        self.0.lock().map_err(|e| PersistenceError::Unexpected {
            error: e.to_string(),
        })
    }

    pub fn len(&self) -> usize {
        self.entries().map(|entries| entries.len()).unwrap_or_default()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait::async_trait]
impl SecurePersistentStore for MemoryStore {
    async fn get(&self, key: String) -> Result<Option<Vec<u8>>, PersistenceError> {
        Ok(self.entries()?.get(&key).cloned())
    }

    async fn set(&self, key: String, value: Vec<u8>) -> Result<(), PersistenceError> {
        self.entries()?.insert(key, value);
        Ok(())
    }

    async fn remove_entry(&self, key: String) -> Result<(), PersistenceError> {
        self.entries()?.remove(&key);
        Ok(())
    }
}

/// Returns a store that keeps everything in memory, for hosts that want an
/// ephemeral session (previews, UI tests) without wiring up platform storage.
#[uniffi::export]
pub fn in_memory_persistent_store() -> Arc<dyn SecurePersistentStore> {
    Arc::new(MemoryStore::default())
}
