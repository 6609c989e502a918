use crate::cli::output::format_notification;
use crate::core::{Config, Error, Result};
use crate::runtime::{lifecycle_with_notifier, Lifecycle, LocalRegistry, Notifier, Provider};
use std::sync::Arc;
use tracing::debug;

/// Notifier that prints errors to stderr
#[derive(Debug, Clone, Copy, Default)]
pub struct ConsoleNotifier;

impl Notifier for ConsoleNotifier {
    fn notify_error(&self, summary: &str, body: &str) {
        debug!("{}: {}", summary, body);
        eprintln!("{}", format_notification(summary, body));
    }
}

/// One enable/disable cycle of the provider inside this process
pub struct Host {
    lifecycle: Lifecycle,
    registry: Arc<LocalRegistry>,
}

impl Host {
    pub fn new(config: &Config) -> Self {
        let registry = Arc::new(LocalRegistry::new());
        let lifecycle =
            lifecycle_with_notifier(config, registry.clone(), Arc::new(ConsoleNotifier));
        Self {
            lifecycle,
            registry,
        }
    }

    /// Enable the provider and wait for discovery to finish
    ///
    /// Fails with [`Error::NotRegistered`] when Rider or its solutions could
    /// not be found; the reason has been printed by then.
    pub async fn start(&self) -> Result<Arc<Provider>> {
        if let Some(discovery) = self.lifecycle.enable() {
            discovery.await?;
        }
        self.lifecycle.provider().ok_or(Error::NotRegistered)
    }

    pub fn stop(&self) {
        self.lifecycle.disable();
    }

    pub fn registry(&self) -> &LocalRegistry {
        &self.registry
    }
}
