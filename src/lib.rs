//! # rider-search-provider
//!
//! Desktop search provider for recent JetBrains Rider solutions.
//!
//! A bundled helper program lists the solutions Rider opened recently. The
//! provider filters them by the terms typed into the desktop search, hands
//! back display metadata for the matches and launches Rider on the one the
//! user picks.
//!
//! ## Overview
//!
//! - [`core`] holds the solution model, term matching, configuration and errors
//! - [`runtime`] runs discovery, finds and launches Rider, and drives the
//!   registration [`Lifecycle`](runtime::Lifecycle)
//! - `cli` (feature `cli`) is a command line front end over an in-process host
//!
//! ## Example
//!
//! ```rust,no_run
//! use rider_search_provider::core::Config;
//! use rider_search_provider::runtime::{lifecycle_from_config, LocalRegistry, SearchProvider};
//! use std::sync::Arc;
//!
//! # #[tokio::main]
//! # async fn main() {
//! let registry = Arc::new(LocalRegistry::new());
//! let lifecycle = lifecycle_from_config(&Config::default(), registry.clone());
//!
//! if let Some(discovery) = lifecycle.enable() {
//!     discovery.await.ok();
//! }
//! if let Some(provider) = lifecycle.provider() {
//!     let ids = provider.get_initial_result_set(&["Shop".to_string()]);
//!     for meta in provider.get_result_metas(&ids) {
//!         println!("{} ({})", meta.name, meta.description);
//!     }
//! }
//! lifecycle.disable();
//! # }
//! ```

pub mod core;
pub mod runtime;

#[cfg(feature = "cli")]
pub mod cli;

#[cfg(test)]
mod testing;

pub use crate::core::{Config, Error, Result, Solution, SolutionCollection};
pub use crate::runtime::{Lifecycle, Provider, SearchProvider, SearchRegistry};

/// Version of the search provider
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
