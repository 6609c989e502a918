use crate::core::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Desktop file ids Rider installs under, in lookup order (snap, then Toolbox)
pub const DEFAULT_APP_IDS: &[&str] = &["rider_rider.desktop", "jetbrains-rider.desktop"];

/// Configuration settings for the search provider
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Identifier the provider registers under
    #[serde(default = "default_provider_id")]
    pub provider_id: String,

    /// Candidate desktop file ids for Rider, first installed one wins
    #[serde(default = "default_app_ids")]
    pub app_ids: Vec<String>,

    /// Installation directory holding the discovery helper; defaults to the
    /// directory of the running executable, where `find-solutions` is installed
    pub extension_dir: Option<PathBuf>,

    /// File name of the discovery helper inside the extension directory
    #[serde(default = "default_helper_name")]
    pub helper_name: String,

    /// Extra data directories searched for desktop files before the XDG ones
    #[serde(default)]
    pub application_dirs: Vec<PathBuf>,

    /// Go back to unregistered when discovery fails, so a later enable retries
    #[serde(default)]
    pub reset_on_discovery_failure: bool,

    /// Show desktop notifications for errors in addition to logging them
    #[serde(default = "default_true")]
    pub desktop_notifications: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            provider_id: default_provider_id(),
            app_ids: default_app_ids(),
            extension_dir: None,
            helper_name: default_helper_name(),
            application_dirs: Vec::new(),
            reset_on_discovery_failure: false,
            desktop_notifications: default_true(),
        }
    }
}

impl Config {
    /// Load configuration from file, with fallback to defaults
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        if !path.exists() {
            // Create default config file
            let config = Self::default();
            config.save_to_file(path)?;
            return Ok(config);
        }

        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)
            .map_err(|e| Error::configuration(format!("Failed to parse config file: {}", e)))?;
        config.validate()?;

        Ok(config)
    }

    /// Save configuration to file
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)
            .map_err(|e| Error::configuration(format!("Failed to serialize config: {}", e)))?;

        std::fs::write(path, content)?;
        Ok(())
    }

    /// Get the default config file path
    pub fn default_path() -> Result<PathBuf> {
        project_dirs()
            .map(|dirs| dirs.config_dir().join("config.toml"))
            .ok_or_else(|| Error::configuration("No home directory to store configuration in"))
    }

    /// Load configuration from the default location
    pub fn load_default() -> Result<Self> {
        let path = Self::default_path()?;
        Self::load_from_file(path)
    }

    /// Merge with command-line arguments, giving priority to CLI args
    #[cfg(feature = "cli")]
    pub fn merge_with_cli_args(mut self, cli_args: &crate::cli::Cli) -> Self {
        if let Some(ref dir) = cli_args.extension_dir {
            self.extension_dir = Some(dir.clone());
        }
        if let Some(ref helper) = cli_args.helper {
            self.helper_name = helper.clone();
        }
        if !cli_args.app_ids.is_empty() {
            self.app_ids = cli_args.app_ids.clone();
        }
        self
    }

    /// Check values a config file may have gotten wrong
    pub fn validate(&self) -> Result<()> {
        if self.provider_id.trim().is_empty() {
            return Err(Error::configuration("provider_id must not be empty"));
        }
        if self.app_ids.is_empty() {
            return Err(Error::configuration("app_ids must name at least one desktop file"));
        }
        if self.helper_name.is_empty() || self.helper_name.contains('/') {
            return Err(Error::configuration(format!(
                "helper_name must be a plain file name, got '{}'",
                self.helper_name
            )));
        }
        Ok(())
    }

    /// The extension directory, falling back to [`default_extension_dir`]
    pub fn extension_dir(&self) -> PathBuf {
        self.extension_dir.clone().unwrap_or_else(default_extension_dir)
    }

    /// Full path of the discovery helper
    pub fn helper_path(&self) -> PathBuf {
        self.extension_dir().join(&self.helper_name)
    }
}

fn project_dirs() -> Option<directories::ProjectDirs> {
    directories::ProjectDirs::from("", "", "rider-search-provider")
}

/// Default directory the discovery helper is installed to
///
/// `find-solutions` is built and installed next to the command line binary,
/// so the directory of the running executable comes first. Without one, the
/// per-user data directory is used.
pub fn default_extension_dir() -> PathBuf {
    std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(Path::to_path_buf))
        .unwrap_or_else(data_extension_dir)
}

fn data_extension_dir() -> PathBuf {
    project_dirs()
        .map(|dirs| dirs.data_dir().to_path_buf())
        .unwrap_or_else(|| {
            dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(".rider-search-provider")
        })
}

// Helper functions for default values
fn default_provider_id() -> String {
    "rider-search-provider".to_string()
}

fn default_app_ids() -> Vec<String> {
    DEFAULT_APP_IDS.iter().map(|id| id.to_string()).collect()
}

fn default_helper_name() -> String {
    "find-solutions".to_string()
}

fn default_true() -> bool {
    true
}
