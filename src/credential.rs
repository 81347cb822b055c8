use std::fs;
use std::path::{Path, PathBuf};

use log::debug;
use serde::{Deserialize, Serialize};

use crate::error::{GhStatsError, Result};

const CREDENTIAL_FILE: &str = "credentials.toml";

/// Persisted credential file contents.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct CredentialFile {
    token: String,
}

/// Trait for credential persistence (for testability).
pub trait CredentialStore {
    /// Loads the stored token, if any. A missing file is not an error:
    /// the caller proceeds unauthenticated at the lower rate limit.
    ///
    /// # Errors
    /// Returns an error if an existing file cannot be read or parsed.
    fn load(&self) -> Result<Option<String>>;

    /// Persists the token for future runs.
    ///
    /// # Errors
    /// Returns an error if the file cannot be written.
    fn save(&self, token: &str) -> Result<()>;
}

/// File-backed store under the platform config directory.
///
/// - Windows: `%APPDATA%\gh-stats\credentials.toml`
/// - macOS: `~/Library/Application Support/gh-stats/credentials.toml`
/// - Linux: `~/.config/gh-stats/credentials.toml` (XDG)
#[derive(Debug, Clone, Default)]
pub struct FileCredentialStore {
    base_dir: Option<PathBuf>,
}

impl FileCredentialStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Store rooted at an explicit directory instead of the platform one.
    #[must_use]
    pub fn with_base_dir(dir: &Path) -> Self {
        Self {
            base_dir: Some(dir.to_path_buf()),
        }
    }

    fn credential_path(&self) -> Result<PathBuf> {
        if let Some(dir) = &self.base_dir {
            return Ok(dir.join(CREDENTIAL_FILE));
        }
        directories::ProjectDirs::from("", "", "gh-stats")
            .map(|dirs| dirs.config_dir().join(CREDENTIAL_FILE))
            .ok_or_else(|| {
                GhStatsError::Credential(
                    "cannot determine the user config directory".to_string(),
                )
            })
    }
}

impl CredentialStore for FileCredentialStore {
    fn load(&self) -> Result<Option<String>> {
        let path = self.credential_path()?;
        if !path.exists() {
            return Ok(None);
        }

        let content = fs::read_to_string(&path)?;
        let file: CredentialFile = toml::from_str(&content)?;
        debug!("loaded credential from {}", path.display());
        Ok(Some(file.token))
    }

    fn save(&self, token: &str) -> Result<()> {
        if token.trim().is_empty() {
            return Err(GhStatsError::Credential(
                "refusing to store an empty token".to_string(),
            ));
        }

        let path = self.credential_path()?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let content = toml::to_string(&CredentialFile {
            token: token.to_string(),
        })?;
        fs::write(&path, content)?;
        debug!("saved credential to {}", path.display());
        Ok(())
    }
}

#[cfg(test)]
#[path = "credential_tests.rs"]
mod tests;
