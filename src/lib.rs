pub mod cache;
pub mod config;
pub mod data_models;
pub mod errors;
pub mod export;
pub mod filename;
pub mod loader;
pub mod metrics;
pub mod parsers;
pub mod pipeline;
pub mod reconcile;
pub mod schema;
pub mod summary;
pub mod table;
pub mod utils;
pub mod validation;
pub mod warnings;

pub use cache::DataCache;
pub use config::{load_config, Group, PipelineConfig};
pub use data_models::{EnvironmentReading, GrowthMeasurement, Record};
pub use errors::{ConfigError, ExportError, LoadError, ParseError, SourceError};
pub use pipeline::{load_directory, LoadedData};
pub use reconcile::{merge, Dataset};
pub use warnings::{LoadWarning, Severity, WarningKind};

#[cfg(test)]
mod tests;
