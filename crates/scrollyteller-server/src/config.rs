//! Process configuration read from the environment.

use std::path::{Path, PathBuf};

use crate::error::AppError;

const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 3000;

/// Server settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    /// Interface to bind.
    pub host: String,
    /// Port to bind.
    pub port: u16,
    /// Story manifest to load at startup.
    pub manifest_path: PathBuf,
    /// Directory source paths are fetched from. Defaults to the manifest's
    /// directory.
    pub story_root: Option<PathBuf>,
}

impl ServerConfig {
    /// Reads `HOST`, `PORT`, `STORY_MANIFEST` and `STORY_ROOT`.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` if `STORY_MANIFEST` is missing or `PORT` is
    /// not a valid port number.
    pub fn from_env() -> Result<Self, AppError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the configuration from an arbitrary variable lookup.
    ///
    /// # Errors
    ///
    /// See [`ServerConfig::from_env`].
    pub fn from_lookup<F>(lookup: F) -> Result<Self, AppError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let manifest_path = lookup("STORY_MANIFEST")
            .filter(|value| !value.trim().is_empty())
            .map(PathBuf::from)
            .ok_or_else(|| {
                AppError::Config("STORY_MANIFEST environment variable must be set".to_owned())
            })?;
        let host = lookup("HOST").unwrap_or_else(|| DEFAULT_HOST.to_owned());
        let port = match lookup("PORT") {
            Some(port) => port
                .parse()
                .map_err(|e| AppError::Config(format!("PORT must be a valid u16: {e}")))?,
            None => DEFAULT_PORT,
        };
        let story_root = lookup("STORY_ROOT").map(PathBuf::from);

        Ok(Self {
            host,
            port,
            manifest_path,
            story_root,
        })
    }

    /// Returns the directory source paths resolve against.
    #[must_use]
    pub fn story_root(&self) -> &Path {
        self.story_root.as_deref().unwrap_or_else(|| {
            self.manifest_path
                .parent()
                .filter(|parent| !parent.as_os_str().is_empty())
                .unwrap_or_else(|| Path::new("."))
        })
    }
}
