//! Process-lifetime dataset memoization with explicit invalidation.

use crate::loader::{self, Dataset};
use parking_lot::RwLock;
use pulse_core::config::DatasetConfig;
use pulse_core::error::PulseResult;
use std::sync::Arc;
use tracing::info;

/// Single-slot cache for the loaded dataset. The dataset is read from
/// disk once and shared until `invalidate` clears the slot — the
/// refresh action in the UI.
pub struct DatasetStore {
    config: DatasetConfig,
    slot: RwLock<Option<Arc<Dataset>>>,
}

impl DatasetStore {
    pub fn new(config: DatasetConfig) -> Self {
        Self {
            config,
            slot: RwLock::new(None),
        }
    }

    /// Returns the cached dataset, loading it on first access.
    pub fn get_or_load(&self) -> PulseResult<Arc<Dataset>> {
        if let Some(dataset) = self.slot.read().clone() {
            return Ok(dataset);
        }

        let mut slot = self.slot.write();
        // Another request may have loaded while we waited for the lock.
        if let Some(dataset) = slot.clone() {
            return Ok(dataset);
        }

        let dataset = Arc::new(loader::load_path(
            &self.config.path,
            &self.config.date_format,
        )?);
        *slot = Some(dataset.clone());
        Ok(dataset)
    }

    /// Clears the cached dataset; the next access reloads from disk.
    pub fn invalidate(&self) {
        *self.slot.write() = None;
        info!("Dataset cache invalidated");
    }

    /// Invalidate and immediately reload.
    pub fn reload(&self) -> PulseResult<Arc<Dataset>> {
        self.invalidate();
        self.get_or_load()
    }

    pub fn is_loaded(&self) -> bool {
        self.slot.read().is_some()
    }
}
