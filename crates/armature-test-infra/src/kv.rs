use async_trait::async_trait;
use dashmap::DashMap;
use thiserror::Error;

/// Errors raised by a key-value store fixture.
#[derive(Debug, Clone, Error)]
pub enum KvError {
    #[error("store unavailable: {0}")]
    Unavailable(String),
}

/// A minimal asynchronous key-value store, standing in for the hosted
/// realtime database the original service talked to.
#[async_trait]
pub trait KeyValueStore: Send + Sync + 'static {
    async fn get(&self, key: &str) -> Result<Option<String>, KvError>;
    async fn set(&self, key: &str, value: &str) -> Result<(), KvError>;
    async fn delete(&self, key: &str) -> Result<bool, KvError>;
}

/// In-memory implementation over a sharded concurrent map.
///
/// Intended as a process-wide singleton: create it once, then thread it
/// into each per-request container as a constant.
#[derive(Debug, Default)]
pub struct MemoryKvClient {
    entries: DashMap<String, String>,
}

impl MemoryKvClient {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[async_trait]
impl KeyValueStore for MemoryKvClient {
    async fn get(&self, key: &str) -> Result<Option<String>, KvError> {
        Ok(self.entries.get(key).map(|entry| entry.clone()))
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), KvError> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<bool, KvError> {
        Ok(self.entries.remove(key).is_some())
    }
}

/// A store that refuses every operation, for failure-path tests.
#[derive(Debug, Default)]
pub struct OfflineKvClient;

#[async_trait]
impl KeyValueStore for OfflineKvClient {
    async fn get(&self, key: &str) -> Result<Option<String>, KvError> {
        Err(KvError::Unavailable(format!("get `{key}`")))
    }

    async fn set(&self, key: &str, _value: &str) -> Result<(), KvError> {
        Err(KvError::Unavailable(format!("set `{key}`")))
    }

    async fn delete(&self, key: &str) -> Result<bool, KvError> {
        Err(KvError::Unavailable(format!("delete `{key}`")))
    }
}
