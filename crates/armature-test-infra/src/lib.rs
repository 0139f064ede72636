//! Shared fixtures for Armature's integration tests.

pub mod kv;
pub mod probe;

pub use kv::{KeyValueStore, KvError, MemoryKvClient, OfflineKvClient};
pub use probe::BuildProbe;
