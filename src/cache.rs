//! Memoized loads keyed on the contents of the data directory.

use log::{debug, info};
use parking_lot::Mutex;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::SystemTime;
use walkdir::WalkDir;

use crate::config::PipelineConfig;
use crate::errors::LoadError;
use crate::pipeline::{load_directory, LoadedData};

/// Name, size and modification time of every file directly under a directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectoryFingerprint {
    entries: Vec<(String, u64, Option<SystemTime>)>,
}

impl DirectoryFingerprint {
    /// `None` when the directory cannot be listed.
    pub fn scan(directory: &Path) -> Option<Self> {
        if !directory.is_dir() {
            return None;
        }
        let entries = WalkDir::new(directory)
            .min_depth(1)
            .max_depth(1)
            .sort_by_file_name()
            .into_iter()
            .filter_map(|entry| entry.ok())
            .filter_map(|entry| {
                let metadata = entry.metadata().ok()?;
                metadata.is_file().then(|| {
                    (
                        entry.file_name().to_string_lossy().into_owned(),
                        metadata.len(),
                        metadata.modified().ok(),
                    )
                })
            })
            .collect();
        Some(Self { entries })
    }

    pub fn file_count(&self) -> usize {
        self.entries.len()
    }
}

struct CacheEntry {
    fingerprint: DirectoryFingerprint,
    data: Arc<LoadedData>,
}

/// Reuses a load for as long as the directory listing is unchanged.
///
/// Failed loads are never cached, so a directory that appears later is picked up.
pub struct DataCache {
    config: PipelineConfig,
    entries: Mutex<HashMap<PathBuf, CacheEntry>>,
}

impl DataCache {
    pub fn new(config: PipelineConfig) -> Self {
        Self {
            config,
            entries: Mutex::new(HashMap::new()),
        }
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    pub fn get_or_load(&self, directory: &Path) -> Result<Arc<LoadedData>, LoadError> {
        let mut entries = self.entries.lock();

        let Some(fingerprint) = DirectoryFingerprint::scan(directory) else {
            entries.remove(directory);
            return Err(LoadError::DirectoryNotFound {
                path: directory.to_path_buf(),
            });
        };

        if let Some(entry) = entries.get(directory) {
            if entry.fingerprint == fingerprint {
                debug!(
                    "Reusing cached load for {} ({} files unchanged)",
                    directory.display(),
                    fingerprint.file_count()
                );
                return Ok(Arc::clone(&entry.data));
            }
            info!("Contents of {} changed; reloading", directory.display());
        }

        let data = Arc::new(load_directory(directory, &self.config)?);
        entries.insert(
            directory.to_path_buf(),
            CacheEntry {
                fingerprint,
                data: Arc::clone(&data),
            },
        );
        Ok(data)
    }

    pub fn invalidate(&self, directory: &Path) {
        self.entries.lock().remove(directory);
    }

    pub fn clear(&self) {
        self.entries.lock().clear();
    }

    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.lock().is_empty()
    }
}
