//! Key/value stores the binder reads raw strings from.

use std::collections::{BTreeMap, HashMap};
use std::env::{self, VarError};
use std::hash::BuildHasher;
use std::path::Path;

use tracing::{debug, warn};

use crate::error::ConfigError;

/// Read-only lookup of raw values by key.
pub trait Source {
    fn get(&self, key: &str) -> Option<String>;
}

/// The process environment.
#[derive(Debug, Clone, Copy, Default)]
pub struct Env;

impl Env {
    /// Loads `.env` from the current directory or its parents into the
    /// process environment first, if one exists. Variables already set win.
    pub fn with_dotenv() -> Self {
        match dotenvy::dotenv() {
            Ok(path) => debug!(path = %path.display(), "loaded .env file"),
            Err(e) if e.not_found() => {}
            Err(e) => warn!(error = %e, "failed to load .env file"),
        }
        Env
    }
}

impl Source for Env {
    fn get(&self, key: &str) -> Option<String> {
        match env::var(key) {
            Ok(value) => Some(value),
            Err(VarError::NotPresent) => None,
            Err(VarError::NotUnicode(_)) => {
                warn!(key, "ignoring environment variable with non-unicode value");
                None
            }
        }
    }
}

impl<S: BuildHasher> Source for HashMap<String, String, S> {
    fn get(&self, key: &str) -> Option<String> {
        HashMap::get(self, key).cloned()
    }
}

impl Source for BTreeMap<String, String> {
    fn get(&self, key: &str) -> Option<String> {
        BTreeMap::get(self, key).cloned()
    }
}

impl<T: Source + ?Sized> Source for &T {
    fn get(&self, key: &str) -> Option<String> {
        (**self).get(key)
    }
}

/// Reads a dotenv file into a map without touching the process environment.
pub fn from_dotenv_file(path: impl AsRef<Path>) -> Result<HashMap<String, String>, ConfigError> {
    let mut vars = HashMap::new();
    for item in dotenvy::from_path_iter(path.as_ref())? {
        let (key, value) = item?;
        vars.insert(key, value);
    }
    debug!(path = %path.as_ref().display(), count = vars.len(), "read env file");
    Ok(vars)
}
