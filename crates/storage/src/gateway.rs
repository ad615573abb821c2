use async_trait::async_trait;
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use thiserror::Error;

/// Errors surfaced by persistence backends.
///
/// Absence of a key is not an error; `fetch` reports it as `None` and the
/// typed loader falls back to the caller's default.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum StorageError {
    #[error("connection error: {0}")]
    Connection(String),

    #[error("serialization error: {0}")]
    Serialization(String),
}

/// Fixed keys, one per logical collection.
///
/// These match the original persisted format, so an existing store keeps
/// working.
pub mod keys {
    pub const USERS: &str = "lms_users";
    pub const COURSE: &str = "lms_course";
    pub const REVIEWS: &str = "lms_reviews";
    pub const PROGRESS: &str = "lms_progress";
}

/// The narrow persistence contract: raw JSON strings by fixed key.
///
/// Writes are last-writer-wins per key; the backend never merges values.
#[async_trait]
pub trait KeyValueGateway: Send + Sync {
    /// Fetch the raw value stored under `key`, if any.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` only on backend failure.
    async fn fetch(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Store `value` under `key`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the value cannot be stored.
    async fn store(&self, key: &str, value: &str) -> Result<(), StorageError>;
}

/// Loads a collection, falling back to `default` when the key is absent
/// or holds a value that no longer parses.
///
/// The fallback on malformed data is deliberate silent degradation: the
/// collection is effectively reset rather than the caller failing.
///
/// # Errors
///
/// Returns `StorageError` only when the backend itself fails.
pub async fn load_or<T: DeserializeOwned>(
    gateway: &dyn KeyValueGateway,
    key: &str,
    default: T,
) -> Result<T, StorageError> {
    match gateway.fetch(key).await? {
        Some(raw) => Ok(serde_json::from_str(&raw).unwrap_or(default)),
        None => Ok(default),
    }
}

/// Serializes a collection as JSON and stores it under `key`.
///
/// # Errors
///
/// Returns `StorageError::Serialization` if encoding fails, or a backend
/// error from the store.
pub async fn save<T: Serialize>(
    gateway: &dyn KeyValueGateway,
    key: &str,
    value: &T,
) -> Result<(), StorageError> {
    let raw = serde_json::to_string(value).map_err(|e| StorageError::Serialization(e.to_string()))?;
    gateway.store(key, &raw).await
}

/// Simple in-memory gateway implementation for testing and prototyping.
#[derive(Clone, Default)]
pub struct InMemoryGateway {
    values: Arc<Mutex<HashMap<String, String>>>,
}

impl InMemoryGateway {
    #[must_use]
    pub fn new() -> Self {
        Self {
            values: Arc::new(Mutex::new(HashMap::new())),
        }
    }
}

#[async_trait]
impl KeyValueGateway for InMemoryGateway {
    async fn fetch(&self, key: &str) -> Result<Option<String>, StorageError> {
        let guard = self
            .values
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        Ok(guard.get(key).cloned())
    }

    async fn store(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let mut guard = self
            .values
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        guard.insert(key.to_owned(), value.to_owned());
        Ok(())
    }
}

/// Aggregates the gateway behind a trait object for easy backend swapping.
#[derive(Clone)]
pub struct Store {
    pub kv: Arc<dyn KeyValueGateway>,
}

impl Store {
    #[must_use]
    pub fn in_memory() -> Self {
        Self {
            kv: Arc::new(InMemoryGateway::new()),
        }
    }
}
