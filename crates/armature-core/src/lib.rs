//! Core types for the Armature dependency-injection container.
//!
//! This crate provides the data model shared by the registry and the
//! resolver: heterogeneous built values, producer declarations, the
//! provider registry, and the error taxonomy.

pub mod error;
pub mod provider;
pub mod registry;

pub use error::Error;
pub use provider::{ProducerFn, ProducerFuture, Provider, ProviderKind, Resolved, Value};
pub use registry::Registry;
