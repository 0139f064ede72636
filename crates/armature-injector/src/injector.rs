use armature_core::{Error, Provider, ProviderKind, Registry, Resolved, Value};
use futures::future::{try_join_all, BoxFuture, Shared};
use futures::FutureExt;
use std::collections::{HashMap, HashSet};
use std::future::Future;
use std::sync::{Arc, Mutex, RwLock, RwLockWriteGuard};
use tracing::{debug, trace};

/// A memoized build: cloned to every caller that requests the same name.
type SharedBuild = Shared<BoxFuture<'static, Result<Value, Error>>>;

/// The ordered list of names on the current resolution path.
///
/// Checked before the build cache is touched: a cyclic request must fail
/// instead of awaiting its own pending slot, which would never settle.
#[derive(Clone, Default)]
struct Chain {
    names: Vec<String>,
}

impl Chain {
    fn contains(&self, name: &str) -> bool {
        self.names.iter().any(|n| n == name)
    }

    fn push(&self, name: &str) -> Chain {
        let mut names = self.names.clone();
        names.push(name.to_string());
        Chain { names }
    }

    /// The chain extended with the revisited name, for error reporting.
    fn trail(&self, name: &str) -> Vec<String> {
        let mut trail = self.names.clone();
        trail.push(name.to_string());
        trail
    }
}

/// Per-name build slots.
///
/// A slot is created exactly once, on the first request for its name; it
/// holds the shared future while the build is pending and retains the
/// settled value or error afterwards. A settled failure is terminal for
/// the container.
#[derive(Default)]
struct BuildCache {
    slots: Mutex<HashMap<String, SharedBuild>>,
}

impl BuildCache {
    fn get_or_insert_with(&self, name: &str, build: impl FnOnce() -> SharedBuild) -> SharedBuild {
        let mut slots = self.slots.lock().expect("build cache lock poisoned");
        if let Some(slot) = slots.get(name) {
            trace!(name = %name, "reusing existing build slot");
            return slot.clone();
        }
        let slot = build();
        slots.insert(name.to_string(), slot.clone());
        slot
    }
}

#[derive(Default)]
struct Inner {
    registry: RwLock<Registry>,
    cache: BuildCache,
}

/// A request-scoped dependency-injection container.
///
/// Owns exactly one [`Registry`] and one build cache. Cloning yields
/// another handle to the same container; create a fresh `Injector` per
/// request instead of sharing built instances across requests. Process-wide
/// singletons belong in longer-lived state and are threaded into each
/// container as constants.
#[derive(Clone, Default)]
pub struct Injector {
    inner: Arc<Inner>,
}

impl Injector {
    /// Creates a fresh, empty container.
    pub fn new() -> Self {
        Self::default()
    }

    /// Binds `name` to a literal value with zero dependencies.
    pub fn constant<T>(&self, name: impl Into<String>, value: T) -> Result<(), Error>
    where
        T: Send + Sync + 'static,
    {
        self.registry_mut().constant(name, value)
    }

    /// Binds `name` to a plain function producer with an explicit,
    /// positional dependency list.
    pub fn factory<T, F>(
        &self,
        name: impl Into<String>,
        dependencies: impl IntoIterator<Item = impl Into<String>>,
        producer: F,
    ) -> Result<(), Error>
    where
        T: Send + Sync + 'static,
        F: Fn(Resolved) -> Result<T, Error> + Send + Sync + 'static,
    {
        self.registry_mut().factory(name, dependencies, producer)
    }

    /// Binds `name` to an asynchronous function producer.
    pub fn factory_async<T, F, Fut>(
        &self,
        name: impl Into<String>,
        dependencies: impl IntoIterator<Item = impl Into<String>>,
        producer: F,
    ) -> Result<(), Error>
    where
        T: Send + Sync + 'static,
        F: Fn(Resolved) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<T, Error>> + Send + 'static,
    {
        self.registry_mut()
            .factory_async(name, dependencies, producer)
    }

    /// Binds `name` to a constructor-like builder.
    pub fn constructed<T, F>(
        &self,
        name: impl Into<String>,
        dependencies: impl IntoIterator<Item = impl Into<String>>,
        builder: F,
    ) -> Result<(), Error>
    where
        T: Send + Sync + 'static,
        F: Fn(Resolved) -> Result<T, Error> + Send + Sync + 'static,
    {
        self.registry_mut().constructed(name, dependencies, builder)
    }

    /// Binds `name` to an asynchronous constructor-like builder.
    pub fn constructed_async<T, F, Fut>(
        &self,
        name: impl Into<String>,
        dependencies: impl IntoIterator<Item = impl Into<String>>,
        builder: F,
    ) -> Result<(), Error>
    where
        T: Send + Sync + 'static,
        F: Fn(Resolved) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<T, Error>> + Send + 'static,
    {
        self.registry_mut()
            .constructed_async(name, dependencies, builder)
    }

    /// Registers a fully-formed provider descriptor.
    pub fn register(&self, provider: Provider) -> Result<(), Error> {
        self.registry_mut().register(provider)
    }

    /// Resolves `name` into its fully-built value.
    ///
    /// The first request for a name starts its build; every concurrent or
    /// later request for the same name awaits the same shared build and
    /// observes the identical outcome, value or error. A name whose
    /// declared dependency graph contains a cycle fails with
    /// [`Error::CyclicDependency`] before any build starts.
    pub fn resolve(&self, name: &str) -> BoxFuture<'static, Result<Value, Error>> {
        if let Err(err) = self.check_for_cycles(name) {
            return futures::future::ready(Err(err)).boxed();
        }
        self.build(name, &Chain::default())
    }

    /// Resolves `name` and downcasts the built value to `T`.
    ///
    /// # Errors
    ///
    /// Any [`resolve`](Self::resolve) failure, or [`Error::TypeMismatch`]
    /// when the value has a different concrete type.
    pub async fn resolve_as<T>(&self, name: &str) -> Result<Arc<T>, Error>
    where
        T: Send + Sync + 'static,
    {
        let value = self.resolve(name).await?;
        value.downcast::<T>().map_err(|_| Error::TypeMismatch {
            name: name.to_string(),
            expected: std::any::type_name::<T>(),
        })
    }

    fn registry_mut(&self) -> RwLockWriteGuard<'_, Registry> {
        self.inner.registry.write().expect("registry lock poisoned")
    }

    /// Walks the declared dependency graph below `name` before any slot
    /// is touched.
    ///
    /// The per-path chain cannot catch a cycle split across concurrent
    /// resolutions: two resolves of mutually dependent names would each
    /// create their own slot and then await the other's, pending forever.
    /// Dependency lists are immutable once registered, so a cycle is
    /// visible in the registry itself and is rejected here. Unknown names
    /// are skipped; they fail later, when their build runs.
    fn check_for_cycles(&self, name: &str) -> Result<(), Error> {
        let registry = self
            .inner
            .registry
            .read()
            .expect("registry lock poisoned");
        let mut trail = vec![name.to_string()];
        let mut cleared = HashSet::new();
        Self::walk(&registry, name, &mut trail, &mut cleared)
    }

    fn walk(
        registry: &Registry,
        name: &str,
        trail: &mut Vec<String>,
        cleared: &mut HashSet<String>,
    ) -> Result<(), Error> {
        let Ok(provider) = registry.lookup(name) else {
            return Ok(());
        };
        for dependency in provider.dependencies() {
            if trail.iter().any(|n| n == dependency) {
                trail.push(dependency.clone());
                return Err(Error::CyclicDependency {
                    trail: std::mem::take(trail),
                });
            }
            if cleared.contains(dependency) {
                continue;
            }
            trail.push(dependency.clone());
            Self::walk(registry, dependency, trail, cleared)?;
            trail.pop();
            cleared.insert(dependency.clone());
        }
        Ok(())
    }

    fn build(&self, name: &str, chain: &Chain) -> BoxFuture<'static, Result<Value, Error>> {
        if chain.contains(name) {
            let err = Error::CyclicDependency {
                trail: chain.trail(name),
            };
            return futures::future::ready(Err(err)).boxed();
        }

        let slot = self.inner.cache.get_or_insert_with(name, || {
            debug!(name = %name, "starting build");
            Self::run(self.clone(), name.to_string(), chain.push(name))
                .boxed()
                .shared()
        });
        slot.boxed()
    }

    async fn run(injector: Injector, name: String, chain: Chain) -> Result<Value, Error> {
        let provider = {
            let registry = injector
                .inner
                .registry
                .read()
                .expect("registry lock poisoned");
            registry.lookup(&name)?.clone()
        };

        // Dependencies are requested in declared order but awaited
        // concurrently; the producer runs only once all of them settled.
        let builds: Vec<_> = provider
            .dependencies()
            .iter()
            .map(|dependency| injector.build(dependency, &chain))
            .collect();
        let values = try_join_all(builds).await?;
        let resolved = Resolved::new(provider.dependencies().to_vec(), values);

        let built = match provider.kind() {
            ProviderKind::Constant(value) => Ok(value.clone()),
            ProviderKind::Factory(produce) | ProviderKind::Constructed(produce) => {
                produce(resolved).await.map_err(|err| Error::Build {
                    name: name.clone(),
                    source: Box::new(err),
                })
            }
        };

        match &built {
            Ok(_) => debug!(name = %name, "build settled"),
            Err(err) => debug!(name = %name, error = %err, "build failed"),
        }
        built
    }
}
