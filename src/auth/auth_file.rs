use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

use super::resolver::CredentialDocument;

/// Environment variable naming the auth file to read
const AUTHFILE_ENV: &str = "AUTHFILE";

/// Container auth file (`config.json` / `auth.json`)
///
/// Only `auths` is kept. Other members such as `credHelpers` are dropped, so
/// the serialized form is always the minimal `{"auths": {...}}` document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AuthFile {
    #[serde(default)]
    pub auths: CredentialDocument,
}

impl AuthFile {
    pub fn new(auths: CredentialDocument) -> Self {
        Self { auths }
    }

    /// Parse an auth file from its JSON text
    pub fn from_json(contents: &str) -> Result<Self> {
        serde_json::from_str(contents).context("Failed to parse auth file")
    }

    /// Load an auth file from disk
    pub fn load_from_path(path: &Path) -> Result<Self> {
        debug!("Reading auth file: {}", path.display());

        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read auth file {}", path.display()))?;

        Self::from_json(&contents)
            .with_context(|| format!("Invalid auth file {}", path.display()))
    }

    /// Find the auth file to read.
    ///
    /// An explicit path wins, then `$AUTHFILE`, then `~/.docker/config.json`.
    pub fn locate(explicit: Option<&Path>) -> Result<PathBuf> {
        locate_with(explicit, env_var_non_empty(AUTHFILE_ENV), dirs::home_dir)
    }

    /// Serialize as a single compact JSON line
    pub fn to_json_line(&self) -> Result<String> {
        let mut line = serde_json::to_string(self).context("Failed to serialize auth file")?;
        line.push('\n');
        Ok(line)
    }
}

fn locate_with(
    explicit: Option<&Path>,
    from_env: Option<String>,
    home_dir: impl FnOnce() -> Option<PathBuf>,
) -> Result<PathBuf> {
    if let Some(path) = explicit {
        return Ok(path.to_path_buf());
    }

    if let Some(path) = from_env {
        return Ok(PathBuf::from(path));
    }

    let home = home_dir().context("Failed to get home directory")?;
    Ok(home.join(".docker").join("config.json"))
}

/// Read an environment variable, treating empty strings as if the variable is not set.
pub(crate) fn env_var_non_empty(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.is_empty())
}
