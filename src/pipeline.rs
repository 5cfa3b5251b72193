//! One-call load: discover, parse, normalize, merge.

use log::{error, info};
use std::path::Path;

use crate::config::PipelineConfig;
use crate::data_models::{EnvironmentReading, GrowthMeasurement};
use crate::errors::LoadError;
use crate::loader::GroupLoader;
use crate::metrics::LoadMetrics;
use crate::reconcile::{merge, Dataset};
use crate::warnings::LoadWarning;

/// Result of a successful load. Treat as read-only; views are derived copies.
#[derive(Debug, Clone)]
pub struct LoadedData {
    pub environment: Dataset<EnvironmentReading>,
    pub growth: Dataset<GrowthMeasurement>,
    pub warnings: Vec<LoadWarning>,
    pub metrics: LoadMetrics,
}

impl LoadedData {
    pub fn is_empty(&self) -> bool {
        self.environment.is_empty() && self.growth.is_empty()
    }
}

/// Loads both datasets from `directory`.
///
/// Only two outcomes are fatal: the directory does not exist, or neither dataset
/// received a single row. Everything else is reported in [`LoadedData::warnings`].
pub fn load_directory(directory: &Path, config: &PipelineConfig) -> Result<LoadedData, LoadError> {
    if !directory.is_dir() {
        error!("Data directory {} not found", directory.display());
        return Err(LoadError::DirectoryNotFound {
            path: directory.to_path_buf(),
        });
    }
    info!(
        "Loading {} groups from {}",
        config.groups.len(),
        directory.display()
    );

    let mut loader = GroupLoader::new(directory, config);
    let environment_tables = crate::time_stage!(loader.metrics_mut(), "environment", loader.load_environment());
    let growth_tables = crate::time_stage!(loader.metrics_mut(), "growth", loader.load_growth());
    let (warnings, metrics) = loader.finish();

    let environment = merge(environment_tables);
    let growth = merge(growth_tables);

    if environment.is_empty() && growth.is_empty() {
        error!(
            "No environment or growth rows loaded from {} ({} warnings)",
            directory.display(),
            warnings.len()
        );
        return Err(LoadError::NoData {
            path: directory.to_path_buf(),
            warnings: warnings.into_vec(),
        });
    }

    metrics.log_summary();
    Ok(LoadedData {
        environment,
        growth,
        warnings: warnings.into_vec(),
        metrics,
    })
}
