//! Solution data model, matching, configuration and errors
//!
//! Nothing in here touches processes or the desktop; the [`crate::runtime`]
//! module builds on these types.

pub mod config;
pub mod error;
pub mod matcher;
pub mod types;

pub use config::Config;
pub use error::{Error, Result, UserFriendlyError};
pub use matcher::{find_matching_ids, matches_all_terms};
pub use types::{
    AppIcon, LazyIcon, ResultMeta, SizedIcon, Solution, SolutionCollection, SolutionId,
};
