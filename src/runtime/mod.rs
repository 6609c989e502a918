//! Everything that runs processes or talks to the host
//!
//! This module handles:
//! - Running the discovery helper
//! - Locating and launching Rider through its desktop file
//! - The provider callbacks and the registration lifecycle
//! - Reading Rider's recent solutions for the discovery helper
//! - Reporting errors to the user

pub mod discovery;
pub mod lifecycle;
pub mod locator;
pub mod notify;
pub mod process;
pub mod provider;
pub mod recent;
pub mod registry;


pub use discovery::{Discovery, HelperDiscovery};
pub use lifecycle::{Lifecycle, LifecycleSettings, RegistrationState, SearchRegistry};
pub use locator::{AppDescriptor, AppLocator, DesktopAppLocator, DesktopEntry};
pub use notify::{DesktopNotifier, Notifier, TracingNotifier};
pub use provider::{Provider, SearchProvider};
pub use recent::RiderConfig;
pub use registry::LocalRegistry;

use crate::core::Config;
use std::sync::Arc;

/// Wire a lifecycle with the desktop locator, helper discovery and the
/// notifier the configuration asks for
pub fn lifecycle_from_config(config: &Config, registry: Arc<dyn SearchRegistry>) -> Lifecycle {
    let notifier: Arc<dyn Notifier> = if config.desktop_notifications {
        Arc::new(DesktopNotifier::new(config.provider_id.clone()))
    } else {
        Arc::new(TracingNotifier)
    };
    lifecycle_with_notifier(config, registry, notifier)
}

/// Like [`lifecycle_from_config`], reporting errors to `notifier`
pub fn lifecycle_with_notifier(
    config: &Config,
    registry: Arc<dyn SearchRegistry>,
    notifier: Arc<dyn Notifier>,
) -> Lifecycle {
    Lifecycle::new(
        LifecycleSettings::from(config),
        Arc::new(DesktopAppLocator::with_xdg_dirs(&config.application_dirs)),
        Arc::new(HelperDiscovery::new(
            config.extension_dir(),
            &config.helper_name,
        )),
        registry,
        notifier,
    )
}
