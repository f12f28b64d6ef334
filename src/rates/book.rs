use std::path::Path;
use std::sync::{Arc, RwLock};

use anyhow::Result;
use tracing::info;

use crate::config::Config;
use crate::rates::RateTables;

/// Holds the active rate tables.
///
/// Each estimate takes a snapshot at the start and keeps it for the whole
/// computation, so a reload only affects estimates started afterwards.
#[derive(Debug)]
pub struct RateBook {
    current: RwLock<Arc<RateTables>>,
}

impl RateBook {
    pub fn new(tables: RateTables) -> Self {
        Self {
            current: RwLock::new(Arc::new(tables)),
        }
    }

    pub fn snapshot(&self) -> Arc<RateTables> {
        let guard = self.current.read().expect("rate book lock poisoned");
        Arc::clone(&*guard)
    }

    pub fn replace(&self, tables: RateTables) {
        let mut guard = self.current.write().expect("rate book lock poisoned");
        *guard = Arc::new(tables);
    }

    /// Re-reads the `[rates]` section of a config file and swaps it in.
    pub fn reload_from(&self, path: &Path) -> Result<Arc<RateTables>> {
        let config = Config::load(Some(path))?;
        self.replace(config.rates);
        info!("reloaded rate tables from {}", path.display());
        Ok(self.snapshot())
    }
}

impl Default for RateBook {
    fn default() -> Self {
        Self::new(RateTables::default())
    }
}
