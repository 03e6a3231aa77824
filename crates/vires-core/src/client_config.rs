//! VirES client configuration file
//!
//! Stores access tokens in the INI file the VirES clients read at startup
//! (`~/.viresclient.ini` by default). Each service URL gets its own section
//! with a `token` key; the `[default]` section names the URL used when a
//! client is created without one:
//!
//! ```ini
//! [https://vires.services/ows]
//! token = ...
//!
//! [default]
//! url = https://vires.services/ows
//! ```

use directories::BaseDirs;
use ini::Ini;
use std::path::{Path, PathBuf};
use tokio::io::AsyncWriteExt;
use tracing::debug;

use crate::error::{Error, Result};

/// File name of the client configuration, relative to the home directory
pub const CONFIG_FILENAME: &str = ".viresclient.ini";

const DEFAULT_SECTION: &str = "default";
const TOKEN_KEY: &str = "token";
const URL_KEY: &str = "url";

/// In-memory view of the client configuration file
pub struct ClientConfig {
    path: PathBuf,
    ini: Ini,
}

impl ClientConfig {
    /// Get the default configuration path in the user's home directory
    pub fn default_path() -> Result<PathBuf> {
        BaseDirs::new()
            .map(|dirs| dirs.home_dir().join(CONFIG_FILENAME))
            .ok_or_else(|| Error::Config("Could not determine home directory".to_string()))
    }

    /// Load the configuration at `path`, or start empty if it does not exist
    pub async fn load(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();

        if !path.exists() {
            debug!("No client config at {:?}, starting empty", path);
            return Ok(Self {
                path,
                ini: Ini::new(),
            });
        }

        let contents = tokio::fs::read_to_string(&path).await?;
        let ini = Ini::load_from_str(&contents)
            .map_err(|e| Error::Config(format!("{}: {}", path.display(), e)))?;

        debug!("Loaded client config from {:?}", path);
        Ok(Self { path, ini })
    }

    /// Get the token stored for a service URL
    pub fn site_token(&self, url: &str) -> Option<&str> {
        self.ini.section(Some(url)).and_then(|s| s.get(TOKEN_KEY))
    }

    /// Set the token for a service URL, replacing any previous one
    pub fn set_site_token(&mut self, url: &str, token: &str) {
        self.ini.with_section(Some(url)).set(TOKEN_KEY, token);
    }

    /// Get the default service URL
    pub fn default_url(&self) -> Option<&str> {
        self.ini
            .section(Some(DEFAULT_SECTION))
            .and_then(|s| s.get(URL_KEY))
    }

    /// Mark a service URL as the default
    pub fn set_default_url(&mut self, url: &str) {
        self.ini.with_section(Some(DEFAULT_SECTION)).set(URL_KEY, url);
    }

    /// List every configured service URL
    pub fn sites(&self) -> Vec<&str> {
        self.ini
            .sections()
            .flatten()
            .filter(|name| *name != DEFAULT_SECTION)
            .collect()
    }

    /// Save to disk
    ///
    /// The file is written to a temp file with owner-only permissions and
    /// renamed into place.
    pub async fn save(&self) -> Result<()> {
        let mut contents = Vec::new();
        self.ini.write_to(&mut contents)?;

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent).await?;
            }
        }

        let temp_path = self.path.with_extension("tmp");
        remove_if_exists(&temp_path).await?;

        if let Err(e) = write_owner_only(&temp_path, &contents).await {
            let _ = tokio::fs::remove_file(&temp_path).await;
            return Err(e);
        }
        if let Err(e) = tokio::fs::rename(&temp_path, &self.path).await {
            let _ = tokio::fs::remove_file(&temp_path).await;
            return Err(e.into());
        }

        debug!("Saved client config to {:?}", self.path);
        Ok(())
    }
}

/// Write a fresh file readable only by its owner
async fn write_owner_only(path: &Path, contents: &[u8]) -> Result<()> {
    let mut options = tokio::fs::OpenOptions::new();
    options.write(true).create_new(true);
    #[cfg(unix)]
    options.mode(0o600);

    let mut file = options.open(path).await?;
    file.write_all(contents).await?;
    file.sync_all().await?;
    Ok(())
}

async fn remove_if_exists(path: &Path) -> Result<()> {
    match tokio::fs::remove_file(path).await {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
        Err(e) => Err(e.into()),
    }
}

impl std::fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClientConfig")
            .field("path", &self.path)
            .field("sites", &self.sites())
            .field("default_url", &self.default_url())
            .finish()
    }
}
