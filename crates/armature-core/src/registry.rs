use crate::error::Error;
use crate::provider::{ProducerFn, Provider, ProviderKind, Resolved, Value};
use futures::FutureExt;
use std::collections::HashMap;
use std::future::Future;
use std::sync::Arc;
use tracing::debug;

/// Holds the declarations of how to produce each named value.
///
/// Append-only: registering a second provider under an existing name is
/// rejected and leaves the first registration intact.
#[derive(Default)]
pub struct Registry {
    providers: HashMap<String, Provider>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Binds `name` to a literal value with zero dependencies.
    pub fn constant<T>(&mut self, name: impl Into<String>, value: T) -> Result<(), Error>
    where
        T: Send + Sync + 'static,
    {
        let value: Value = Arc::new(value);
        self.register(Provider::new(
            name,
            ProviderKind::Constant(value),
            Vec::new(),
        ))
    }

    /// Binds `name` to a plain function producer with an explicit,
    /// positional dependency list.
    pub fn factory<T, F>(
        &mut self,
        name: impl Into<String>,
        dependencies: impl IntoIterator<Item = impl Into<String>>,
        producer: F,
    ) -> Result<(), Error>
    where
        T: Send + Sync + 'static,
        F: Fn(Resolved) -> Result<T, Error> + Send + Sync + 'static,
    {
        self.register(Provider::new(
            name,
            ProviderKind::Factory(wrap_sync(producer)),
            collect_names(dependencies),
        ))
    }

    /// Binds `name` to an asynchronous function producer.
    pub fn factory_async<T, F, Fut>(
        &mut self,
        name: impl Into<String>,
        dependencies: impl IntoIterator<Item = impl Into<String>>,
        producer: F,
    ) -> Result<(), Error>
    where
        T: Send + Sync + 'static,
        F: Fn(Resolved) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<T, Error>> + Send + 'static,
    {
        self.register(Provider::new(
            name,
            ProviderKind::Factory(wrap_async(producer)),
            collect_names(dependencies),
        ))
    }

    /// Binds `name` to a constructor-like builder. The builder yields a
    /// new, independent instance when invoked; it is still invoked at
    /// most once per container.
    pub fn constructed<T, F>(
        &mut self,
        name: impl Into<String>,
        dependencies: impl IntoIterator<Item = impl Into<String>>,
        builder: F,
    ) -> Result<(), Error>
    where
        T: Send + Sync + 'static,
        F: Fn(Resolved) -> Result<T, Error> + Send + Sync + 'static,
    {
        self.register(Provider::new(
            name,
            ProviderKind::Constructed(wrap_sync(builder)),
            collect_names(dependencies),
        ))
    }

    /// Binds `name` to an asynchronous constructor-like builder.
    pub fn constructed_async<T, F, Fut>(
        &mut self,
        name: impl Into<String>,
        dependencies: impl IntoIterator<Item = impl Into<String>>,
        builder: F,
    ) -> Result<(), Error>
    where
        T: Send + Sync + 'static,
        F: Fn(Resolved) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<T, Error>> + Send + 'static,
    {
        self.register(Provider::new(
            name,
            ProviderKind::Constructed(wrap_async(builder)),
            collect_names(dependencies),
        ))
    }

    /// Registers a fully-formed provider descriptor.
    ///
    /// # Errors
    ///
    /// Fails with [`Error::DuplicateProvider`] when the name is already
    /// bound; the registry is left unchanged.
    pub fn register(&mut self, provider: Provider) -> Result<(), Error> {
        if self.providers.contains_key(provider.name()) {
            return Err(Error::DuplicateProvider(provider.name().to_string()));
        }
        debug!(
            name = provider.name(),
            kind = provider.kind().label(),
            dependencies = provider.dependencies().len(),
            "registering provider"
        );
        self.providers
            .insert(provider.name().to_string(), provider);
        Ok(())
    }

    /// Returns the descriptor registered under `name`.
    pub fn lookup(&self, name: &str) -> Result<&Provider, Error> {
        self.providers
            .get(name)
            .ok_or_else(|| Error::UnknownProvider(name.to_string()))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.providers.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.providers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.providers.is_empty()
    }

    /// Registered names, in no particular order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.providers.keys().map(String::as_str)
    }
}

fn collect_names(dependencies: impl IntoIterator<Item = impl Into<String>>) -> Vec<String> {
    dependencies.into_iter().map(Into::into).collect()
}

fn wrap_sync<T, F>(producer: F) -> ProducerFn
where
    T: Send + Sync + 'static,
    F: Fn(Resolved) -> Result<T, Error> + Send + Sync + 'static,
{
    Arc::new(move |resolved| {
        let built = producer(resolved).map(|value| Arc::new(value) as Value);
        futures::future::ready(built).boxed()
    })
}

fn wrap_async<T, F, Fut>(producer: F) -> ProducerFn
where
    T: Send + Sync + 'static,
    F: Fn(Resolved) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<T, Error>> + Send + 'static,
{
    Arc::new(move |resolved| {
        let building = producer(resolved);
        async move { building.await.map(|value| Arc::new(value) as Value) }.boxed()
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn duplicate_registration_is_rejected_and_original_kept() {
        let mut registry = Registry::new();
        registry.constant("config", 1_i64).unwrap();

        let err = registry
            .factory("config", ["other"], |_| Ok(2_i64))
            .unwrap_err();
        assert!(matches!(
            err,
            Error::DuplicateProvider(ref name) if name == "config"
        ));

        // The first registration survives untouched.
        let provider = registry.lookup("config").unwrap();
        assert_eq!(provider.kind().label(), "constant");
        assert!(provider.dependencies().is_empty());
    }

    #[test]
    fn lookup_of_unknown_name_fails() {
        let registry = Registry::new();
        let err = registry.lookup("missing").unwrap_err();
        assert!(matches!(
            err,
            Error::UnknownProvider(ref name) if name == "missing"
        ));
    }

    #[test]
    fn factory_keeps_declared_dependency_order() {
        let mut registry = Registry::new();
        registry
            .factory("svc", ["b", "a", "c"], |_| Ok(()))
            .unwrap();

        let provider = registry.lookup("svc").unwrap();
        assert_eq!(provider.dependencies(), ["b", "a", "c"]);
    }

    #[test]
    fn names_reports_every_registration() {
        let mut registry = Registry::new();
        registry.constant("a", 1_i64).unwrap();
        registry.constant("b", 2_i64).unwrap();

        let mut names: Vec<_> = registry.names().collect();
        names.sort_unstable();
        assert_eq!(names, ["a", "b"]);
        assert_eq!(registry.len(), 2);
        assert!(!registry.is_empty());
    }
}
