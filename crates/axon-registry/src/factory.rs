//! Factory descriptors: how the registry builds a service on demand.

use std::fmt;
use std::sync::Arc;

use futures::FutureExt;
use futures::future::BoxFuture;

use crate::value::ServiceValue;

/// Caching behavior for a factory-built service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Lifetime {
    /// Construct once, cache, and return the same value thereafter.
    #[default]
    Singleton,
    /// Construct a fresh value on every resolution.
    Transient,
}

#[derive(Clone)]
enum FactoryFn {
    Sync(Arc<dyn Fn(&[ServiceValue]) -> Result<ServiceValue, String> + Send + Sync>),
    Async(Arc<dyn Fn(Vec<ServiceValue>) -> BoxFuture<'static, Result<ServiceValue, String>> + Send + Sync>),
}

/// A recipe for constructing a service, plus its caching policy and the
/// names of the services it needs as inputs.
///
/// Dependencies are resolved in declaration order and handed to the
/// constructor as a slice in the same order.
///
/// ```
/// use axon_registry::{Lifetime, ServiceFactory, service_value};
///
/// let factory = ServiceFactory::new(|_deps| Ok(service_value(Vec::<String>::new())))
///     .with_lifetime(Lifetime::Transient);
/// assert_eq!(factory.lifetime(), Lifetime::Transient);
/// ```
#[derive(Clone)]
pub struct ServiceFactory {
    constructor: FactoryFn,
    lifetime: Lifetime,
    dependencies: Vec<String>,
}

impl ServiceFactory {
    /// Creates a factory from a synchronous constructor.
    ///
    /// The default lifetime is [`Lifetime::Singleton`] with no
    /// dependencies.
    #[must_use]
    pub fn new<F>(constructor: F) -> Self
    where
        F: Fn(&[ServiceValue]) -> Result<ServiceValue, String> + Send + Sync + 'static,
    {
        Self {
            constructor: FactoryFn::Sync(Arc::new(constructor)),
            lifetime: Lifetime::default(),
            dependencies: Vec::new(),
        }
    }

    /// Creates a factory from an asynchronous constructor.
    ///
    /// The future is awaited during resolution; while it runs the
    /// registry holds no lock, so the constructor may resolve other
    /// services itself.
    #[must_use]
    pub fn new_async<F, Fut>(constructor: F) -> Self
    where
        F: Fn(Vec<ServiceValue>) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<ServiceValue, String>> + Send + 'static,
    {
        Self {
            constructor: FactoryFn::Async(Arc::new(move |deps| constructor(deps).boxed())),
            lifetime: Lifetime::default(),
            dependencies: Vec::new(),
        }
    }

    /// Sets the caching policy.
    #[must_use]
    pub fn with_lifetime(mut self, lifetime: Lifetime) -> Self {
        self.lifetime = lifetime;
        self
    }

    /// Declares the services this factory consumes, in the order the
    /// constructor expects them.
    #[must_use]
    pub fn with_dependencies<I, S>(mut self, dependencies: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.dependencies = dependencies.into_iter().map(Into::into).collect();
        self
    }

    /// The caching policy for values this factory builds.
    #[must_use]
    pub fn lifetime(&self) -> Lifetime {
        self.lifetime
    }

    /// The declared dependency names, in declaration order.
    #[must_use]
    pub fn dependencies(&self) -> &[String] {
        &self.dependencies
    }

    pub(crate) async fn construct(&self, deps: Vec<ServiceValue>) -> Result<ServiceValue, String> {
        match &self.constructor {
            FactoryFn::Sync(f) => f(&deps),
            FactoryFn::Async(f) => f(deps).await,
        }
    }
}

impl fmt::Debug for ServiceFactory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let kind = match self.constructor {
            FactoryFn::Sync(_) => "sync",
            FactoryFn::Async(_) => "async",
        };
        f.debug_struct("ServiceFactory")
            .field("kind", &kind)
            .field("lifetime", &self.lifetime)
            .field("dependencies", &self.dependencies)
            .finish()
    }
}
