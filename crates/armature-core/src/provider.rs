use crate::error::Error;
use futures::future::BoxFuture;
use std::any::Any;
use std::fmt;
use std::sync::Arc;

/// A built value, shared by reference between every dependent.
pub type Value = Arc<dyn Any + Send + Sync>;

/// The future returned by one producer invocation.
pub type ProducerFuture = BoxFuture<'static, Result<Value, Error>>;

/// An asynchronous producer: invoked with its resolved dependencies, in
/// declared order, and yields the built value.
pub type ProducerFn = Arc<dyn Fn(Resolved) -> ProducerFuture + Send + Sync>;

/// The three ways a registered name can produce its value.
#[derive(Clone)]
pub enum ProviderKind {
    /// A literal value, yielded as-is with zero dependencies.
    Constant(Value),
    /// A plain function invoked with the resolved dependency values.
    Factory(ProducerFn),
    /// A constructor-like builder: invoked with the resolved dependency
    /// values and yields a new, independent instance.
    Constructed(ProducerFn),
}

impl ProviderKind {
    /// Short tag used in logs.
    pub fn label(&self) -> &'static str {
        match self {
            ProviderKind::Constant(_) => "constant",
            ProviderKind::Factory(_) => "factory",
            ProviderKind::Constructed(_) => "constructed",
        }
    }
}

impl fmt::Debug for ProviderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One registered capability: how to produce a named value, and which
/// other names it needs first.
#[derive(Clone)]
pub struct Provider {
    name: String,
    kind: ProviderKind,
    dependencies: Vec<String>,
}

impl Provider {
    pub fn new(name: impl Into<String>, kind: ProviderKind, dependencies: Vec<String>) -> Self {
        Self {
            name: name.into(),
            kind,
            dependencies,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> &ProviderKind {
        &self.kind
    }

    /// Dependency names, resolved positionally before the producer runs.
    pub fn dependencies(&self) -> &[String] {
        &self.dependencies
    }
}

impl fmt::Debug for Provider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Provider")
            .field("name", &self.name)
            .field("kind", &self.kind)
            .field("dependencies", &self.dependencies)
            .finish()
    }
}

/// The resolved dependency values handed to a producer, in declared order.
pub struct Resolved {
    names: Vec<String>,
    values: Vec<Value>,
}

impl Resolved {
    pub fn new(names: Vec<String>, values: Vec<Value>) -> Self {
        debug_assert_eq!(names.len(), values.len());
        Self { names, values }
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Returns the dependency at `index`, downcast to `T`.
    ///
    /// # Errors
    ///
    /// Fails with [`Error::TypeMismatch`] naming the dependency when the
    /// value has a different concrete type, or [`Error::Producer`] when
    /// the producer asks for more arguments than were resolved.
    pub fn get<T>(&self, index: usize) -> Result<Arc<T>, Error>
    where
        T: Send + Sync + 'static,
    {
        let value = self.values.get(index).ok_or_else(|| {
            Error::Producer(format!(
                "producer requested argument {index} but only {} dependencies were resolved",
                self.values.len()
            ))
        })?;
        value.clone().downcast::<T>().map_err(|_| Error::TypeMismatch {
            name: self
                .names
                .get(index)
                .cloned()
                .unwrap_or_else(|| index.to_string()),
            expected: std::any::type_name::<T>(),
        })
    }
}
