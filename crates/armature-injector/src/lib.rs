//! Asynchronous, memoized dependency resolution over named providers.
//!
//! One [`Injector`] is created per request or session. Consumers register
//! constants, factories, and constructed services, then resolve a
//! top-level name; the injector recursively builds the dependency graph,
//! constructing every name at most once per container — even when several
//! dependents resolve the same name concurrently.
//!
//! # Example
//!
//! ```
//! use armature_injector::{factory, Injector};
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() -> Result<(), armature_injector::Error> {
//! let injector = Injector::new();
//! injector.constant("x", 5_i64)?;
//! factory!(injector, "y", |x: i64| *x + 1)?;
//! factory!(injector, "z", |y: i64| *y * 2)?;
//!
//! let z = injector.resolve_as::<i64>("z").await?;
//! assert_eq!(*z, 12);
//! # Ok(())
//! # }
//! ```

mod injector;
mod macros;

pub use armature_core::{
    Error, ProducerFn, ProducerFuture, Provider, ProviderKind, Registry, Resolved, Value,
};
pub use armature_extract as extract;
pub use injector::Injector;
