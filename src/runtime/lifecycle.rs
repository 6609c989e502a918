//! Provider registration lifecycle
//!
//! [`Lifecycle`] owns the tri-state registration flag and is the only place
//! that talks to the host's [`SearchRegistry`]. Enabling looks up Rider,
//! starts discovery in a background task and registers a [`Provider`] when
//! discovery finishes, unless the lifecycle was disabled (or disabled and
//! enabled again) in the meantime. In-flight discovery is never cancelled;
//! its result is dropped instead.

use crate::core::{Config, Error, Result, SolutionCollection};
use crate::runtime::discovery::Discovery;
use crate::runtime::locator::{AppDescriptor, AppLocator};
use crate::runtime::notify::Notifier;
use crate::runtime::provider::{Provider, SearchProvider};
use parking_lot::Mutex;
use std::sync::Arc;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

/// The host's registry of search providers
///
/// Implementations must not call back into the [`Lifecycle`] from these
/// methods; they run while the registration state is locked.
pub trait SearchRegistry: Send + Sync {
    fn register_provider(&self, provider: Arc<dyn SearchProvider>);

    fn unregister_provider(&self, provider: Arc<dyn SearchProvider>);
}

/// Registration state of the search provider
#[derive(Debug, Clone)]
pub enum RegistrationState {
    Unregistered,
    /// Discovery is running for the enable call numbered `generation`
    Registering { generation: u64 },
    Registered(Arc<Provider>),
}

impl RegistrationState {
    pub fn is_unregistered(&self) -> bool {
        matches!(self, Self::Unregistered)
    }

    pub fn is_registering(&self) -> bool {
        matches!(self, Self::Registering { .. })
    }

    pub fn is_registered(&self) -> bool {
        matches!(self, Self::Registered(_))
    }
}

/// Settings the lifecycle needs from [`Config`]
#[derive(Debug, Clone)]
pub struct LifecycleSettings {
    pub provider_id: String,
    pub app_ids: Vec<String>,
    pub reset_on_discovery_failure: bool,
}

impl From<&Config> for LifecycleSettings {
    fn from(config: &Config) -> Self {
        Self {
            provider_id: config.provider_id.clone(),
            app_ids: config.app_ids.clone(),
            reset_on_discovery_failure: config.reset_on_discovery_failure,
        }
    }
}

struct Inner {
    settings: LifecycleSettings,
    locator: Arc<dyn AppLocator>,
    discovery: Arc<dyn Discovery>,
    registry: Arc<dyn SearchRegistry>,
    notifier: Arc<dyn Notifier>,
    state: Mutex<Slot>,
}

struct Slot {
    state: RegistrationState,
    next_generation: u64,
}

/// Enable/disable state machine for the search provider
#[derive(Clone)]
pub struct Lifecycle {
    inner: Arc<Inner>,
}

impl Lifecycle {
    pub fn new(
        settings: LifecycleSettings,
        locator: Arc<dyn AppLocator>,
        discovery: Arc<dyn Discovery>,
        registry: Arc<dyn SearchRegistry>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        Self {
            inner: Arc::new(Inner {
                settings,
                locator,
                discovery,
                registry,
                notifier,
                state: Mutex::new(Slot {
                    state: RegistrationState::Unregistered,
                    next_generation: 0,
                }),
            }),
        }
    }

    /// Snapshot of the current registration state
    pub fn state(&self) -> RegistrationState {
        self.inner.state.lock().state.clone()
    }

    /// The registered provider, if discovery has completed
    pub fn provider(&self) -> Option<Arc<Provider>> {
        match &self.inner.state.lock().state {
            RegistrationState::Registered(provider) => Some(Arc::clone(provider)),
            _ => None,
        }
    }

    /// Look up Rider and start discovering solutions
    ///
    /// Does nothing unless currently unregistered. Returns the handle of the
    /// discovery task when one was started; awaiting it is optional. Must be
    /// called from within a tokio runtime.
    pub fn enable(&self) -> Option<JoinHandle<()>> {
        let mut slot = self.inner.state.lock();
        if !slot.state.is_unregistered() {
            debug!("Enable ignored, provider is already {:?}", slot.state);
            return None;
        }

        let Some(app) = self.inner.locator.find_app(&self.inner.settings.app_ids) else {
            drop(slot);
            let error = Error::ApplicationNotFound(self.inner.settings.app_ids.clone());
            warn!("{}", error);
            self.inner
                .notifier
                .notify_error("Rider not found", &error.user_message());
            return None;
        };

        slot.next_generation += 1;
        let generation = slot.next_generation;
        slot.state = RegistrationState::Registering { generation };
        drop(slot);

        info!("Found {}, discovering recent solutions", app.id());
        let lifecycle = self.clone();
        Some(tokio::spawn(async move {
            let result = lifecycle.inner.discovery.discover().await;
            lifecycle.finish_discovery(generation, app, result);
        }))
    }

    /// Unregister the provider; safe to call in any state
    pub fn disable(&self) {
        let mut slot = self.inner.state.lock();
        let previous = std::mem::replace(&mut slot.state, RegistrationState::Unregistered);
        match previous {
            RegistrationState::Registered(provider) => {
                info!("Unregistering search provider {}", provider.id());
                self.inner.registry.unregister_provider(provider);
            }
            RegistrationState::Registering { generation } => {
                debug!("Disabled while discovery {} is running", generation);
            }
            RegistrationState::Unregistered => {}
        }
    }

    fn finish_discovery(
        &self,
        generation: u64,
        app: Arc<dyn AppDescriptor>,
        result: Result<SolutionCollection>,
    ) {
        let mut slot = self.inner.state.lock();
        match slot.state {
            RegistrationState::Registering { generation: current } if current == generation => {}
            _ => {
                debug!("Dropping result of stale discovery {}", generation);
                return;
            }
        }

        match result {
            Ok(solutions) => {
                let provider = Arc::new(Provider::new(
                    self.inner.settings.provider_id.clone(),
                    app,
                    solutions,
                    Arc::clone(&self.inner.notifier),
                ));
                info!(
                    "Registering search provider {} with {} solutions",
                    provider.id(),
                    provider.solutions().len()
                );
                slot.state = RegistrationState::Registered(Arc::clone(&provider));
                self.inner.registry.register_provider(provider);
            }
            Err(error) => {
                if self.inner.settings.reset_on_discovery_failure {
                    slot.state = RegistrationState::Unregistered;
                }
                drop(slot);
                warn!("Discovery failed: {}", error);
                self.inner
                    .notifier
                    .notify_error("Failed to find recent Rider solutions", &error.user_message());
            }
        }
    }
}
