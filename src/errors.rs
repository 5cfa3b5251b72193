use std::io;
use std::path::PathBuf;
use thiserror::Error;

use crate::warnings::LoadWarning;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error reading config file {path}: {source}")]
    IoError {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("Failed to parse JSON configuration in {path}: {source}")]
    JsonParseError {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("Configuration file not found at {path}")]
    NotFound { path: PathBuf },
    #[error("Invalid configuration: {message}")]
    Invalid { message: String },
}

/// Failures reading a single source file. Always downgraded to a warning by the loader.
#[derive(Error, Debug)]
pub enum ParseError {
    #[error("IO error reading data file {path}: {source}")]
    IoError {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("Error reading CSV headers in {path}: {source}")]
    HeaderReadError {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },
    #[error("Error reading CSV record {row} in {path}: {source}")]
    RecordReadError {
        path: PathBuf,
        row: usize,
        #[source]
        source: csv::Error,
    },
    #[error("Failed to open workbook {path}: {source}")]
    WorkbookError {
        path: PathBuf,
        #[source]
        source: calamine::Error,
    },
    #[error("Failed to read sheet '{sheet}' in {path}: {source}")]
    SheetError {
        path: PathBuf,
        sheet: String,
        #[source]
        source: calamine::Error,
    },
}

/// Why an environment source was rejected.
#[derive(Error, Debug)]
pub enum SourceError {
    #[error(transparent)]
    Parse(#[from] ParseError),
    #[error("{path} is missing required columns: {}", missing.join(", "))]
    MissingColumns { path: PathBuf, missing: Vec<String> },
}

/// Fatal load outcomes. Everything else is reported through [`LoadWarning`]s.
#[derive(Error, Debug)]
pub enum LoadError {
    #[error("No data available: directory {path} does not exist")]
    DirectoryNotFound { path: PathBuf },
    #[error("No data available: no environment or growth rows could be loaded from {path} ({} warnings)", warnings.len())]
    NoData {
        path: PathBuf,
        warnings: Vec<LoadWarning>,
    },
}

#[derive(Error, Debug)]
pub enum ExportError {
    #[error("IO error writing export {path}: {source}")]
    IoError {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("CSV export failed: {0}")]
    Csv(#[from] csv::Error),
    #[error("XLSX export failed: {0}")]
    Xlsx(#[from] rust_xlsxwriter::XlsxError),
    #[error("Dataset too large for a worksheet: {rows} rows x {columns} columns")]
    SheetTooLarge { rows: usize, columns: usize },
}
