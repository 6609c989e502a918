//! Rider's list of recently opened solutions
//!
//! Rider records recent solutions in `recentSolutions.xml` inside its
//! per-version configuration directory, either the legacy `~/.Rider<version>/config/options`
//! or `$XDG_CONFIG_HOME/JetBrains/Rider<version>/options`. The newest version
//! with such a file wins. This is what the `find-solutions` helper prints.

use crate::core::{Error, Result, Solution, SolutionCollection};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Prefix of every solution id, keeping ids apart from other providers' results
pub const ID_PREFIX: &str = "intellij-rider-search-provider-";

const RECENT_SOLUTIONS_XML: &str = "recentSolutions.xml";

/// Where to look for Rider's configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RiderConfig {
    home: PathBuf,
    config_home: PathBuf,
}

impl RiderConfig {
    pub fn new(home: impl Into<PathBuf>, config_home: impl Into<PathBuf>) -> Self {
        Self {
            home: home.into(),
            config_home: config_home.into(),
        }
    }

    /// Use the current user's home and XDG config directory
    pub fn from_env() -> Result<Self> {
        let home = dirs::home_dir()
            .ok_or_else(|| Error::configuration("No home directory to look for Rider in"))?;
        let config_home = dirs::config_dir().unwrap_or_else(|| home.join(".config"));
        Ok(Self::new(home, config_home))
    }

    /// Candidate `recentSolutions.xml` files, newest Rider version first
    pub fn candidates(&self) -> Vec<PathBuf> {
        let mut found: Vec<(String, PathBuf)> = Vec::new();

        for (version, dir) in version_dirs(&self.home, ".Rider") {
            found.push((version, dir.join("config").join("options").join(RECENT_SOLUTIONS_XML)));
        }
        for (version, dir) in version_dirs(&self.config_home.join("JetBrains"), "Rider") {
            found.push((version, dir.join("options").join(RECENT_SOLUTIONS_XML)));
        }

        found.sort_by(|a, b| b.0.cmp(&a.0));
        found.into_iter().map(|(_, path)| path).collect()
    }

    /// The `recentSolutions.xml` of the newest Rider version that has one
    pub fn recent_solutions_file(&self) -> Result<PathBuf> {
        self.candidates()
            .into_iter()
            .find(|path| path.is_file())
            .ok_or_else(|| Error::RiderConfigNotFound(self.home.clone()))
    }

    /// Recent solutions whose solution file still exists, in Rider's order
    pub fn find_recent_solutions(&self) -> Result<SolutionCollection> {
        let file = self.recent_solutions_file()?;
        debug!("Reading recent solutions from {}", file.display());
        let xml = std::fs::read_to_string(&file)?;

        let solutions = parse_recent_paths(&xml)?
            .into_iter()
            .filter_map(|path| {
                let abspath = self.expand_home(&path);
                if abspath.is_file() {
                    Some(solution(path, abspath))
                } else {
                    debug!("Skipping missing solution {}", abspath.display());
                    None
                }
            })
            .collect();
        Ok(solutions)
    }

    fn expand_home(&self, path: &str) -> PathBuf {
        match path.strip_prefix('~') {
            Some("") => self.home.clone(),
            Some(rest) if rest.starts_with('/') => self.home.join(rest.trim_start_matches('/')),
            _ => PathBuf::from(path),
        }
    }
}

/// Values of the `recentPaths` list, with `$USER_HOME$` shortened to `~`
pub fn parse_recent_paths(xml: &str) -> Result<Vec<String>> {
    let document = roxmltree::Document::parse(xml)?;
    let paths = document
        .descendants()
        .filter(|node| {
            node.has_tag_name("option") && node.attribute("name") == Some("recentPaths")
        })
        .flat_map(|option| option.children().filter(|node| node.has_tag_name("list")))
        .flat_map(|list| list.children().filter(|node| node.has_tag_name("option")))
        .filter_map(|entry| entry.attribute("value"))
        .map(|value| value.replace("$USER_HOME$", "~"))
        .collect();
    Ok(paths)
}

/// Directories in `parent` named `<prefix><version>`, with their version
fn version_dirs(parent: &Path, prefix: &str) -> Vec<(String, PathBuf)> {
    let Ok(entries) = std::fs::read_dir(parent) else {
        return Vec::new();
    };
    entries
        .filter_map(|entry| entry.ok())
        .filter_map(|entry| {
            let name = entry.file_name().into_string().ok()?;
            let version = name.strip_prefix(prefix)?;
            let path = entry.path();
            (version.starts_with(|c: char| c.is_ascii_digit()) && path.is_dir())
                .then(|| (version.to_string(), path))
        })
        .collect()
}

fn solution(path: String, abspath: PathBuf) -> Solution {
    let name = abspath
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.clone());
    Solution {
        id: format!("{}{}", ID_PREFIX, abspath.display()),
        name,
        path,
        abspath,
    }
}
