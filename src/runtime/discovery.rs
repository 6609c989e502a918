use crate::core::{Error, Result, SolutionCollection};
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use std::process::Stdio;
use tokio::process::Command;
use tracing::{debug, info};

/// Source of the current set of recent solutions
#[async_trait]
pub trait Discovery: Send + Sync {
    /// Enumerate the solutions, all or nothing
    async fn discover(&self) -> Result<SolutionCollection>;
}

/// Discovery through the helper program bundled in the extension directory
///
/// The helper is run without arguments and must print a JSON object mapping
/// solution ids to `{name, path, abspath}` on standard output. It is never
/// cancelled and has no timeout; a non-zero exit is a failure even when some
/// output was produced.
#[derive(Debug, Clone)]
pub struct HelperDiscovery {
    helper: PathBuf,
}

impl HelperDiscovery {
    /// Discovery using `helper_name` inside `extension_dir`
    pub fn new(extension_dir: impl AsRef<Path>, helper_name: &str) -> Self {
        Self {
            helper: extension_dir.as_ref().join(helper_name),
        }
    }

    pub fn helper(&self) -> &Path {
        &self.helper
    }
}

#[async_trait]
impl Discovery for HelperDiscovery {
    async fn discover(&self) -> Result<SolutionCollection> {
        if !self.helper.is_file() {
            return Err(Error::HelperNotFound(self.helper.clone()));
        }

        debug!("Running discovery helper {}", self.helper.display());
        let output = Command::new(&self.helper)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .output()
            .await?;

        if !output.status.success() {
            return Err(Error::HelperFailed {
                helper: self.helper.clone(),
                status: output.status.to_string(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        let stdout = String::from_utf8(output.stdout)?;
        let solutions = SolutionCollection::from_json(&stdout)?;
        info!("Discovered {} recent solutions", solutions.len());
        Ok(solutions)
    }
}
