//! Shared configuration storage.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use parking_lot::RwLock;

use crate::config::loader::ConfigError;
use crate::config::types::Config;

/// Config container shared between the shell and its pages.
///
/// Readers get a clone; `reload` swaps the whole config atomically and keeps
/// the old one when the file fails to load.
#[derive(Clone)]
pub struct ConfigStore {
    inner: Arc<RwLock<Config>>,
    path: PathBuf,
}

impl ConfigStore {
    pub fn new(config: Config, path: PathBuf) -> Self {
        Self {
            inner: Arc::new(RwLock::new(config)),
            path,
        }
    }

    pub fn get(&self) -> Config {
        self.inner.read().clone()
    }

    pub fn reload(&self) -> Result<(), ConfigError> {
        let config = Config::load_from(&self.path)?;
        *self.inner.write() = config;
        Ok(())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reload_keeps_old_config_on_error() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[gateway]\nlatency_ms = 5\n").unwrap();

        let store = ConfigStore::new(Config::load_from(&path).unwrap(), path.clone());
        assert_eq!(store.get().gateway.latency_ms, 5);

        std::fs::write(&path, "[gateway]\nlatency_ms = \"slow\"\n").unwrap();
        assert!(store.reload().is_err());
        assert_eq!(store.get().gateway.latency_ms, 5);

        std::fs::write(&path, "[gateway]\nlatency_ms = 9\n").unwrap();
        store.reload().unwrap();
        assert_eq!(store.get().gateway.latency_ms, 9);
        assert_eq!(store.path(), path.as_path());
    }
}
