//! Client-local key-value storage seam.
//!
//! The storefront persists three plain string values: the language
//! preference, the age-gate acknowledgement, and the session identifier.
//! Storage may be unavailable or throwing on the host platform, so all reads
//! and writes go through the silent helpers: a failing store behaves exactly
//! like an empty one.

use std::collections::HashMap;
use std::fmt;
use std::sync::Mutex;

use tracing::debug;

pub const LANG_KEY: &str = "lusmind_lang";
pub const AGE_GATE_KEY: &str = "age_gate_ok";
pub const SESSION_KEY: &str = "lusmind_session_id";

#[derive(Debug, Clone)]
pub struct StorageError(pub String);
impl std::error::Error for StorageError {}
impl fmt::Display for StorageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Storage error: {}", self.0)
    }
}

pub trait KvStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;
}

/// Read a key, treating storage failure as an absent value.
pub fn get_silent(store: &dyn KvStore, key: &str) -> Option<String> {
    match store.get(key) {
        Ok(value) => value,
        Err(err) => {
            debug!(key, error = %err, "storage read failed");
            None
        }
    }
}

/// Write a key, swallowing storage failure.
pub fn set_silent(store: &dyn KvStore, key: &str, value: &str) {
    if let Err(err) = store.set(key, value) {
        debug!(key, error = %err, "storage write failed");
    }
}

pub fn is_age_confirmed(store: &dyn KvStore) -> bool {
    get_silent(store, AGE_GATE_KEY).as_deref() == Some("1")
}

pub fn confirm_age(store: &dyn KvStore) {
    set_silent(store, AGE_GATE_KEY, "1");
}

/// In-memory store used by tests and the demo binary.
#[derive(Debug, Default)]
pub struct MemoryStore {
    values: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KvStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let values = self.values.lock().map_err(|_| StorageError("lock poisoned".into()))?;
        Ok(values.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let mut values = self.values.lock().map_err(|_| StorageError("lock poisoned".into()))?;
        values.insert(key.to_string(), value.to_string());
        Ok(())
    }
}
