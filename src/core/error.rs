use std::path::PathBuf;
use thiserror::Error;

/// Error type for discovery, application lookup, launching and configuration
#[derive(Error, Debug)]
pub enum Error {
    #[error("Discovery helper not found at {}", .0.display())]
    HelperNotFound(PathBuf),

    #[error("Discovery helper {} failed with {status}: {stderr}", .helper.display())]
    HelperFailed {
        helper: PathBuf,
        status: String,
        stderr: String,
    },

    #[error("Application not found, tried: {}", .0.join(", "))]
    ApplicationNotFound(Vec<String>),

    #[error("Invalid desktop entry {}: {reason}", .path.display())]
    InvalidDesktopEntry { path: PathBuf, reason: String },

    #[error("Failed to launch {app}: {reason}")]
    Launch { app: String, reason: String },

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Search provider is not registered")]
    NotRegistered,

    #[error("No Rider configuration with recent solutions found in {}", .0.display())]
    RiderConfigNotFound(PathBuf),

    #[error("Malformed XML: {0}")]
    Xml(#[from] roxmltree::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("UTF-8 conversion error: {0}")]
    Utf8Conversion(#[from] std::string::FromUtf8Error),

    #[error("Async task error: {0}")]
    AsyncTask(#[from] tokio::task::JoinError),
}

impl Error {
    /// Create a launch error for the given application
    pub fn launch<A: Into<String>, R: Into<String>>(app: A, reason: R) -> Self {
        Self::Launch {
            app: app.into(),
            reason: reason.into(),
        }
    }

    /// Create a configuration error
    pub fn configuration<S: Into<String>>(msg: S) -> Self {
        Self::Configuration(msg.into())
    }

    /// Create an invalid desktop entry error
    pub fn invalid_desktop_entry<P: Into<PathBuf>, S: Into<String>>(path: P, reason: S) -> Self {
        Self::InvalidDesktopEntry {
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Get user-friendly error message with suggestions
    pub fn user_message(&self) -> String {
        match self {
            Self::HelperNotFound(path) => {
                format!(
                    "The helper to find recent solutions is missing at {}. Reinstall the search provider.",
                    path.display()
                )
            }
            Self::ApplicationNotFound(ids) => {
                format!(
                    "Rider was not found (tried {}). Install Rider, or add its desktop file to 'app_ids' in the configuration file.",
                    ids.join(", ")
                )
            }
            Self::RiderConfigNotFound(home) => {
                format!(
                    "No recentSolutions.xml of any Rider version was found below {}. Open a solution in Rider once so it records it.",
                    home.display()
                )
            }
            Self::Serialization(err) => {
                format!(
                    "The helper returned malformed output: {}. Check that it prints a JSON object of solutions.",
                    err
                )
            }
            _ => self.to_string(),
        }
    }
}

/// Convenient result type for the search provider
pub type Result<T> = std::result::Result<T, Error>;

/// Trait for converting errors to user-friendly messages
pub trait UserFriendlyError {
    fn user_message(&self) -> String;
}

impl UserFriendlyError for Error {
    fn user_message(&self) -> String {
        self.user_message()
    }
}
