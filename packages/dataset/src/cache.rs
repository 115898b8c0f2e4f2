//! Process-wide snapshot cache for the incident dataset.
//!
//! The cache holds an `Arc<Dataset>` behind an `RwLock`. Rebuilds happen
//! outside the lock and are published with a single pointer swap, so a
//! reader always sees either the previous snapshot or the new one in full.

use std::sync::{Arc, PoisonError, RwLock};

use strum_macros::{AsRefStr, Display, EnumString};

use crate::loader::DatasetLoader;
use crate::{Dataset, DatasetError};

/// Anything that can build a complete [`Dataset`] from scratch.
pub trait DatasetSource: Send + Sync {
    /// Builds a fresh dataset.
    ///
    /// # Errors
    ///
    /// Returns [`DatasetError`] if the data cannot be loaded.
    fn load_dataset(&self) -> Result<Dataset, DatasetError>;
}

impl DatasetSource for DatasetLoader {
    fn load_dataset(&self) -> Result<Dataset, DatasetError> {
        self.load()
    }
}

/// How the cache serves repeated loads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, AsRefStr)]
#[strum(serialize_all = "kebab-case")]
pub enum CacheMode {
    /// Load once and reuse until a forced reload.
    EagerCached,
    /// Run the loader on every access.
    AlwaysFresh,
}

/// Holds the current dataset snapshot.
pub struct DatasetCache {
    source: Box<dyn DatasetSource>,
    mode: CacheMode,
    snapshot: RwLock<Option<Arc<Dataset>>>,
}

impl std::fmt::Debug for DatasetCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DatasetCache")
            .field("mode", &self.mode)
            .field("cached", &self.snapshot().is_some())
            .finish_non_exhaustive()
    }
}

impl DatasetCache {
    /// Creates an empty cache over the given source.
    #[must_use]
    pub fn new(source: impl DatasetSource + 'static, mode: CacheMode) -> Self {
        Self {
            source: Box::new(source),
            mode,
            snapshot: RwLock::new(None),
        }
    }

    /// The mode this cache was built with.
    #[must_use]
    pub const fn mode(&self) -> CacheMode {
        self.mode
    }

    /// Returns the dataset, loading it if required.
    ///
    /// In [`CacheMode::EagerCached`] the first call (or any call with
    /// `force_reload`) rebuilds the snapshot; a failed rebuild keeps the
    /// previous snapshot. In [`CacheMode::AlwaysFresh`] every call rebuilds
    /// and nothing is retained.
    ///
    /// # Errors
    ///
    /// Returns [`DatasetError`] if the underlying source fails to load.
    pub fn load(&self, force_reload: bool) -> Result<Arc<Dataset>, DatasetError> {
        match self.mode {
            CacheMode::AlwaysFresh => Ok(Arc::new(self.source.load_dataset()?)),
            CacheMode::EagerCached => {
                if !force_reload && let Some(cached) = self.snapshot() {
                    log::debug!("Returning cached dataset ({} rows)", cached.len());
                    return Ok(cached);
                }

                let fresh = Arc::new(self.source.load_dataset()?);
                *self
                    .snapshot
                    .write()
                    .unwrap_or_else(PoisonError::into_inner) = Some(Arc::clone(&fresh));

                log::info!("Dataset cached ({} rows)", fresh.len());
                Ok(fresh)
            }
        }
    }

    /// Warms the cache at startup. Does nothing in
    /// [`CacheMode::AlwaysFresh`].
    ///
    /// # Errors
    ///
    /// Returns [`DatasetError`] if the underlying source fails to load.
    pub fn preload(&self) -> Result<(), DatasetError> {
        if self.mode == CacheMode::EagerCached {
            log::info!("Pre-loading dataset...");
            self.load(false)?;
        }
        Ok(())
    }

    /// The currently published snapshot, without loading.
    #[must_use]
    pub fn snapshot(&self) -> Option<Arc<Dataset>> {
        self.snapshot
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}
