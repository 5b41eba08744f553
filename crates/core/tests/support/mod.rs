// A persistence provider whose failures can be switched on per key.
use std::{
    collections::{HashMap, HashSet},
    sync::Mutex,
};

use session_store_core::{PersistenceError, SecurePersistentStore};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Op {
    Get,
    Set,
    Remove,
}

#[derive(Default, Debug)]
pub struct FaultyStore {
    entries: Mutex<HashMap<String, Vec<u8>>>,
    faults: Mutex<HashSet<(Op, String)>>,
}

#[allow(dead_code)]
impl FaultyStore {
    pub fn fail(&self, op: Op, key: &str) {
        self.faults.lock().unwrap().insert((op, key.to_owned()));
    }

    pub fn heal(&self) {
        self.faults.lock().unwrap().clear();
    }

    /// Writes raw bytes, bypassing faults.
    pub fn plant(&self, key: &str, value: &[u8]) {
        self.entries
            .lock()
            .unwrap()
            .insert(key.to_owned(), value.to_vec());
    }

    pub fn contains(&self, key: &str) -> bool {
        self.entries.lock().unwrap().contains_key(key)
    }

    pub fn raw(&self, key: &str) -> Option<Vec<u8>> {
        self.entries.lock().unwrap().get(key).cloned()
    }

    fn check(&self, op: Op, key: &str) -> Result<(), PersistenceError> {
        if !self.faults.lock().unwrap().contains(&(op, key.to_owned())) {
            return Ok(());
        }

        let error = format!("injected {op:?} failure for {key}");
        Err(match op {
            Op::Get => PersistenceError::Read { error },
            Op::Set | Op::Remove => PersistenceError::Write { error },
        })
    }
}

#[async_trait::async_trait]
impl SecurePersistentStore for FaultyStore {
    async fn get(&self, key: String) -> Result<Option<Vec<u8>>, PersistenceError> {
        self.check(Op::Get, &key)?;
        // Let other futures interleave with the lookup.
        tokio::task::yield_now().await;
        Ok(self.entries.lock().unwrap().get(&key).cloned())
    }

    async fn set(&self, key: String, value: Vec<u8>) -> Result<(), PersistenceError> {
        self.check(Op::Set, &key)?;
        tokio::task::yield_now().await;
        self.entries.lock().unwrap().insert(key, value);
        Ok(())
    }

    async fn remove_entry(&self, key: String) -> Result<(), PersistenceError> {
        self.check(Op::Remove, &key)?;
        tokio::task::yield_now().await;
        self.entries.lock().unwrap().remove(&key);
        Ok(())
    }
}

pub fn init_test_log() {
    let _ = env_logger::builder()
        .parse_default_env()
        .is_test(true)
        .try_init();
}
