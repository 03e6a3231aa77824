//! Environment snapshot with optional `.env` file loading
//!
//! The process environment is captured once into an [`Environment`] and
//! passed around explicitly. A `.env` file only fills in keys that are not
//! already set, so values exported in the shell always win.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

use crate::error::{Error, Result};

/// Conventional name of the env file
pub const DOTENV_FILENAME: &str = ".env";

/// Immutable-after-load key/value view of the environment
#[derive(Debug, Clone, Default)]
pub struct Environment {
    vars: HashMap<String, String>,
}

impl Environment {
    /// Snapshot the current process environment
    ///
    /// Variables whose name or value is not valid unicode are skipped.
    pub fn from_process() -> Self {
        Self {
            vars: std::env::vars_os()
                .filter_map(|(k, v)| Some((k.into_string().ok()?, v.into_string().ok()?)))
                .collect(),
        }
    }

    /// Build a snapshot from explicit pairs
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            vars: pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    /// Look up a variable
    pub fn get(&self, key: &str) -> Option<&str> {
        self.vars.get(key).map(String::as_str)
    }

    /// Merge an env file into the snapshot without overriding existing keys.
    ///
    /// Lines that cannot be parsed are skipped with a warning. Read errors
    /// fail the whole merge and leave the snapshot untouched.
    /// Returns `Ok(false)` when the file does not exist.
    pub fn merge_dotenv(&mut self, path: &Path) -> Result<bool> {
        if !path.is_file() {
            debug!("No env file at {:?}", path);
            return Ok(false);
        }

        let entries = dotenvy::from_path_iter(path)
            .map_err(|e| Error::EnvFile(format!("{}: {}", path.display(), e)))?;

        let mut parsed = Vec::new();
        for entry in entries {
            match entry {
                Ok(pair) => parsed.push(pair),
                Err(e @ dotenvy::Error::LineParse(..)) => {
                    warn!("Skipping line in {:?}: {}", path, e);
                }
                Err(e) => return Err(Error::EnvFile(format!("{}: {}", path.display(), e))),
            }
        }

        let mut added = 0usize;
        for (key, value) in parsed {
            if let std::collections::hash_map::Entry::Vacant(slot) = self.vars.entry(key) {
                slot.insert(value);
                added += 1;
            }
        }

        debug!("Loaded env file {:?} ({} new variables)", path, added);
        Ok(true)
    }

    /// Find the nearest env file from `start_dir` upwards and merge it.
    ///
    /// Returns the path that was merged, if any.
    pub fn merge_nearest_dotenv(&mut self, start_dir: &Path) -> Result<Option<PathBuf>> {
        match find_dotenv(start_dir) {
            Some(path) => {
                self.merge_dotenv(&path)?;
                Ok(Some(path))
            }
            None => {
                debug!("No {} found above {:?}", DOTENV_FILENAME, start_dir);
                Ok(None)
            }
        }
    }
}

/// Locate the nearest `.env` in `start_dir` or one of its ancestors
///
/// Same search order as `dotenvy::dotenv`, but from an explicit directory
/// instead of the process working directory.
pub fn find_dotenv(start_dir: &Path) -> Option<PathBuf> {
    start_dir
        .ancestors()
        .map(|dir| dir.join(DOTENV_FILENAME))
        .find(|candidate| candidate.is_file())
}
