use crate::runtime::lifecycle::SearchRegistry;
use crate::runtime::provider::SearchProvider;
use parking_lot::RwLock;
use std::sync::Arc;
use tracing::{debug, warn};

/// In-process search registry, standing in for the desktop shell
///
/// Holds at most one provider per id; registering an id twice replaces the
/// earlier provider.
#[derive(Default)]
pub struct LocalRegistry {
    providers: RwLock<Vec<Arc<dyn SearchProvider>>>,
}

impl LocalRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, id: &str) -> Option<Arc<dyn SearchProvider>> {
        self.providers
            .read()
            .iter()
            .find(|provider| provider.id() == id)
            .cloned()
    }

    pub fn len(&self) -> usize {
        self.providers.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.providers.read().is_empty()
    }

    /// Run a search over every registered provider, the way a shell would
    ///
    /// Returns `(provider id, result ids)` for providers with results,
    /// each list cut down to `max_per_provider`.
    pub fn search(&self, terms: &[String], max_per_provider: usize) -> Vec<(String, Vec<String>)> {
        self.providers
            .read()
            .iter()
            .filter_map(|provider| {
                let ids = provider.get_initial_result_set(terms);
                let ids = provider.filter_results(ids, max_per_provider);
                (!ids.is_empty()).then(|| (provider.id().to_string(), ids))
            })
            .collect()
    }
}

impl SearchRegistry for LocalRegistry {
    fn register_provider(&self, provider: Arc<dyn SearchProvider>) {
        let mut providers = self.providers.write();
        if let Some(existing) = providers.iter_mut().find(|p| p.id() == provider.id()) {
            warn!("Replacing already registered search provider {}", provider.id());
            *existing = provider;
        } else {
            debug!("Registered search provider {}", provider.id());
            providers.push(provider);
        }
    }

    fn unregister_provider(&self, provider: Arc<dyn SearchProvider>) {
        let mut providers = self.providers.write();
        let before = providers.len();
        providers.retain(|p| p.id() != provider.id());
        if providers.len() == before {
            debug!("Search provider {} was not registered", provider.id());
        }
    }
}
