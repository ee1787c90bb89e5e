//! Name-keyed service directory with dependency injection.
//!
//! Resolution consults three tables in a fixed order:
//!
//! ```text
//!   resolve(name)
//!     1. instances  -- pre-built values registered directly
//!     2. singletons -- values cached from singleton factories
//!     3. factories  -- recipes; dependencies resolve first
//! ```
//!
//! Factory-backed resolution checks the dependency graph for cycles
//! before anything is constructed, resolves declared dependencies in
//! order, then invokes the constructor. No lock is held while a
//! constructor runs, so constructors may call back into the registry.

use std::collections::HashMap;
use std::sync::Arc;

use futures::FutureExt;
use futures::future::BoxFuture;
use parking_lot::Mutex;
use tracing::debug;

use crate::config::RegistryConfig;
use crate::error::RegistryError;
use crate::factory::{Lifetime, ServiceFactory};
use crate::value::ServiceValue;

#[derive(Default)]
struct RegistryState {
    instances: HashMap<String, ServiceValue>,
    singletons: HashMap<String, ServiceValue>,
    factories: HashMap<String, ServiceFactory>,
}

struct RegistryInner {
    state: Mutex<RegistryState>,
    config: RegistryConfig,
}

/// Shared, clonable service directory.
///
/// Clones share state, so one registry can be handed to every part of
/// an application. All methods take `&self`.
///
/// ```
/// use axon_registry::{ServiceFactory, ServiceRegistry, service_value};
///
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() {
/// let registry = ServiceRegistry::new();
/// registry
///     .register_instance("greeting", service_value("hello".to_string()))
///     .unwrap();
/// registry
///     .register_factory(
///         "greeter",
///         ServiceFactory::new(|deps| {
///             let greeting = deps[0]
///                 .clone()
///                 .downcast::<String>()
///                 .map_err(|_| "greeting is not a String".to_string())?;
///             Ok(service_value(format!("{greeting}, world")))
///         })
///         .with_dependencies(["greeting"]),
///     )
///     .unwrap();
///
/// let greeter = registry.resolve_as::<String>("greeter").await.unwrap();
/// assert_eq!(*greeter, "hello, world");
/// # }
/// ```
#[derive(Clone)]
pub struct ServiceRegistry {
    inner: Arc<RegistryInner>,
}

impl ServiceRegistry {
    /// Creates a registry with the default [`RegistryConfig`].
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(RegistryConfig::default())
    }

    /// Creates a registry with an explicit configuration.
    #[must_use]
    pub fn with_config(config: RegistryConfig) -> Self {
        Self {
            inner: Arc::new(RegistryInner {
                state: Mutex::new(RegistryState::default()),
                config,
            }),
        }
    }

    /// Registers a pre-built value under `name`.
    ///
    /// Instances take priority over factories with the same name. Last
    /// write wins.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::InvalidName`] when `name` is empty.
    pub fn register_instance(&self, name: &str, value: ServiceValue) -> Result<(), RegistryError> {
        if name.is_empty() {
            return Err(RegistryError::InvalidName);
        }
        let mut state = self.inner.state.lock();
        // A stale cached singleton must not resurface if the instance
        // is later removed.
        state.singletons.remove(name);
        state.instances.insert(name.to_string(), value);
        debug!(service = name, "registered instance");
        Ok(())
    }

    /// Registers a factory under `name`.
    ///
    /// Re-registering replaces the previous factory and drops any
    /// singleton cached from it, so the next resolution constructs
    /// through the new factory.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::InvalidName`] when `name` is empty.
    pub fn register_factory(&self, name: &str, factory: ServiceFactory) -> Result<(), RegistryError> {
        if name.is_empty() {
            return Err(RegistryError::InvalidName);
        }
        let mut state = self.inner.state.lock();
        state.singletons.remove(name);
        state.factories.insert(name.to_string(), factory);
        debug!(service = name, "registered factory");
        Ok(())
    }

    /// Resolves `name` to a service value.
    ///
    /// Instances win over cached singletons, which win over factories.
    /// Factory-backed resolution validates the dependency graph, builds
    /// dependencies in declaration order, then invokes the constructor
    /// with no registry lock held.
    ///
    /// # Errors
    ///
    /// - [`RegistryError::NotFound`] when `name` or a transitive
    ///   dependency is not registered
    /// - [`RegistryError::CircularDependency`] when the factory graph
    ///   reachable from `name` contains a cycle
    /// - [`RegistryError::DepthExceeded`] when the dependency chain is
    ///   deeper than [`RegistryConfig::max_resolution_depth`]
    /// - [`RegistryError::Factory`] when a constructor returns an error
    pub async fn resolve(&self, name: &str) -> Result<ServiceValue, RegistryError> {
        self.resolve_depth(name.to_owned(), 0).await
    }

    /// Resolves `name` and downcasts the value to `T`.
    ///
    /// # Errors
    ///
    /// Everything [`resolve`](Self::resolve) returns, plus
    /// [`RegistryError::WrongType`] when the value is not a `T`.
    pub async fn resolve_as<T: Send + Sync + 'static>(
        &self,
        name: &str,
    ) -> Result<Arc<T>, RegistryError> {
        let value = self.resolve(name).await?;
        value.downcast::<T>().map_err(|_| RegistryError::WrongType {
            name: name.to_string(),
            expected: std::any::type_name::<T>(),
        })
    }

    /// Resolves every name in `names`, failing on the first error.
    ///
    /// # Errors
    ///
    /// Everything [`resolve`](Self::resolve) returns.
    pub async fn resolve_many(
        &self,
        names: &[&str],
    ) -> Result<HashMap<String, ServiceValue>, RegistryError> {
        let mut resolved = HashMap::with_capacity(names.len());
        for name in names {
            let value = self.resolve(name).await?;
            resolved.insert((*name).to_string(), value);
        }
        Ok(resolved)
    }

    /// Whether `name` is bound to an instance or a factory.
    #[must_use]
    pub fn has(&self, name: &str) -> bool {
        let state = self.inner.state.lock();
        state.instances.contains_key(name) || state.factories.contains_key(name)
    }

    /// Unbinds `name` from every table, cached singleton included.
    ///
    /// Returns `true` when anything was removed.
    pub fn remove(&self, name: &str) -> bool {
        let mut state = self.inner.state.lock();
        let instance = state.instances.remove(name).is_some();
        let singleton = state.singletons.remove(name).is_some();
        let factory = state.factories.remove(name).is_some();
        instance || singleton || factory
    }

    /// Removes every registration and cached value.
    pub fn clear(&self) {
        let mut state = self.inner.state.lock();
        state.instances.clear();
        state.singletons.clear();
        state.factories.clear();
    }

    /// Every registered name, sorted, without duplicates.
    #[must_use]
    pub fn names(&self) -> Vec<String> {
        let state = self.inner.state.lock();
        let mut names: Vec<String> = state
            .instances
            .keys()
            .chain(state.factories.keys())
            .cloned()
            .collect();
        names.sort_unstable();
        names.dedup();
        names
    }

    /// The configuration this registry was built with.
    #[must_use]
    pub fn config(&self) -> &RegistryConfig {
        &self.inner.config
    }

    fn resolve_depth(
        &self,
        name: String,
        depth: usize,
    ) -> BoxFuture<'_, Result<ServiceValue, RegistryError>> {
        async move {
            if depth > self.inner.config.max_resolution_depth {
                return Err(RegistryError::DepthExceeded {
                    name,
                    limit: self.inner.config.max_resolution_depth,
                });
            }

            let factory = {
                let state = self.inner.state.lock();
                if let Some(value) = state.instances.get(&name) {
                    return Ok(value.clone());
                }
                if let Some(value) = state.singletons.get(&name) {
                    return Ok(value.clone());
                }
                match state.factories.get(&name) {
                    Some(factory) => factory.clone(),
                    None => return Err(RegistryError::NotFound { name }),
                }
            };

            self.check_cycles(&name)?;

            let mut deps = Vec::with_capacity(factory.dependencies().len());
            for dep in factory.dependencies() {
                deps.push(self.resolve_depth(dep.clone(), depth + 1).await?);
            }

            let value = factory.construct(deps).await.map_err(|reason| {
                RegistryError::Factory {
                    name: name.clone(),
                    reason,
                }
            })?;

            if factory.lifetime() == Lifetime::Singleton {
                let mut state = self.inner.state.lock();
                // First construction wins. A concurrent resolution that
                // raced us to the cache keeps its value; ours is dropped.
                let cached = state.singletons.entry(name).or_insert_with(|| value.clone());
                return Ok(cached.clone());
            }

            Ok(value)
        }
        .boxed()
    }

    /// Walks the factory graph reachable from `name` before any
    /// construction starts, so a cycle never leaves a half-built
    /// service behind.
    fn check_cycles(&self, name: &str) -> Result<(), RegistryError> {
        let edges: HashMap<String, Vec<String>> = {
            let state = self.inner.state.lock();
            state
                .factories
                .iter()
                .map(|(name, factory)| (name.clone(), factory.dependencies().to_vec()))
                .collect()
        };
        Self::walk(&edges, name, &mut Vec::new())
    }

    fn walk(
        edges: &HashMap<String, Vec<String>>,
        name: &str,
        path: &mut Vec<String>,
    ) -> Result<(), RegistryError> {
        if path.iter().any(|seen| seen == name) {
            let mut cycle = path.clone();
            cycle.push(name.to_string());
            return Err(RegistryError::CircularDependency { path: cycle });
        }
        // Names without a factory (instances, unknowns) terminate the
        // walk; resolution reports unknowns as NotFound later.
        let Some(deps) = edges.get(name) else {
            return Ok(());
        };
        path.push(name.to_string());
        for dep in deps {
            Self::walk(edges, dep, path)?;
        }
        path.pop();
        Ok(())
    }
}

impl Default for ServiceRegistry {
    fn default() -> Self {
        Self::new()
    }
}
