/// Resolver - Dispatches resource URIs to the strategy registered for their scheme
use crate::{
    db::{Account, AccountStore},
    error::{FingerError, FingerResult},
    lookup::{
        acct::ACCT_SCHEME, mailto::MAILTO_SCHEME, AcctStrategy, LookupStrategy, MailtoStrategy,
        ResourceUri,
    },
};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::debug;

/// Mapping from scheme name to lookup strategy
///
/// Keys are compared case-sensitively against the parsed scheme, which is
/// always lowercase, so register schemes in lowercase.
#[derive(Clone, Default)]
pub struct LookupRegistry {
    strategies: HashMap<String, Arc<dyn LookupStrategy>>,
}

impl LookupRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry with the built-in `acct` and `mailto` strategies
    pub fn with_defaults(store: Arc<dyn AccountStore>) -> Self {
        Self::new()
            .with(ACCT_SCHEME, Arc::new(AcctStrategy::new(Arc::clone(&store))))
            .with(MAILTO_SCHEME, Arc::new(MailtoStrategy::new(store)))
    }

    /// Register a strategy under `scheme`, replacing any previous one
    pub fn with(mut self, scheme: impl Into<String>, strategy: Arc<dyn LookupStrategy>) -> Self {
        self.strategies.insert(scheme.into(), strategy);
        self
    }

    pub fn get(&self, scheme: &str) -> Option<&Arc<dyn LookupStrategy>> {
        self.strategies.get(scheme)
    }

    /// Registered scheme names, sorted
    pub fn schemes(&self) -> Vec<&str> {
        let mut schemes: Vec<&str> = self.strategies.keys().map(String::as_str).collect();
        schemes.sort_unstable();
        schemes
    }

    pub fn len(&self) -> usize {
        self.strategies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.strategies.is_empty()
    }
}

/// Scheme-based resource resolver
///
/// The registry is fixed at construction; new schemes are supported by
/// building the resolver with a different registry.
#[derive(Clone)]
pub struct Resolver {
    registry: LookupRegistry,
}

impl Resolver {
    /// Resolver over the default `acct` and `mailto` strategies
    pub fn new(store: Arc<dyn AccountStore>) -> Self {
        Self::with_registry(LookupRegistry::with_defaults(store))
    }

    /// Resolver over a caller-supplied registry
    pub fn with_registry(registry: LookupRegistry) -> Self {
        Self { registry }
    }

    /// Resolve a resource URI to an account
    ///
    /// The unchanged `uri` is handed to the strategy for its scheme and the
    /// strategy's outcome is returned as is.
    pub async fn resolve(&self, uri: &str) -> FingerResult<Option<Account>> {
        let resource = ResourceUri::parse(uri)?;

        let strategy = self.registry.get(resource.scheme()).ok_or_else(|| {
            debug!("No lookup registered for scheme {}", resource.scheme());
            FingerError::UnsupportedScheme(resource.scheme().to_string())
        })?;

        debug!("Resolving {} via {} lookup", uri, strategy.scheme());
        strategy.resolve(uri).await
    }

    pub fn schemes(&self) -> Vec<&str> {
        self.registry.schemes()
    }
}
