//! Command line front end for the search provider
//! ## Usage
//!
//! ```bash
//! # List every recent solution
//! rider-search-provider list
//!
//! # Search the way the desktop shell does
//! rider-search-provider search Shop --max 5
//!
//! # Narrow earlier results further
//! rider-search-provider search Admin --within <id> --within <id>
//!
//! # Open a solution, or just Rider
//! rider-search-provider activate <id>
//! rider-search-provider launch
//! ```

pub mod app;
pub mod host;
pub mod output;


pub use app::{Cli, Commands};
pub use host::{ConsoleNotifier, Host};

/// Default number of results shown per search
pub const DEFAULT_MAX_RESULTS: usize = 5;
