//! Structured diagnostics for recoverable load problems.
//!
//! Every suppressed per-file or per-sheet failure ends up here so callers can show it,
//! not only find it in the log.

use log::{info, warn};
use serde::Serialize;
use std::fmt;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Severity {
    Notice,
    Warning,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum WarningKind {
    /// No environment file matched the group name.
    MissingSourceFile,
    /// An environment file lacked one or more required columns.
    MissingRequiredColumns,
    /// A file could not be opened or parsed.
    UnreadableSource,
    /// Neither growth keyword matched a workbook.
    MissingWorkbook,
    /// A workbook sheet attributed to a group could not be read.
    UnreadableSheet,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LoadWarning {
    pub kind: WarningKind,
    pub severity: Severity,
    pub group: Option<String>,
    pub path: Option<PathBuf>,
    pub message: String,
}

impl LoadWarning {
    pub fn missing_source_file(group: &str, directory: &Path, extension: &str) -> Self {
        Self {
            kind: WarningKind::MissingSourceFile,
            severity: Severity::Notice,
            group: Some(group.to_string()),
            path: None,
            message: format!(
                "no '*{}' file containing '{}' in {}; group contributes no environment rows",
                extension,
                group,
                directory.display()
            ),
        }
    }

    pub fn missing_columns(group: &str, path: &Path, missing: &[String]) -> Self {
        Self {
            kind: WarningKind::MissingRequiredColumns,
            severity: Severity::Warning,
            group: Some(group.to_string()),
            path: Some(path.to_path_buf()),
            message: format!(
                "{} is missing required columns [{}]; file skipped",
                path.display(),
                missing.join(", ")
            ),
        }
    }

    pub fn unreadable_source(group: Option<&str>, path: &Path, reason: impl fmt::Display) -> Self {
        Self {
            kind: WarningKind::UnreadableSource,
            severity: Severity::Warning,
            group: group.map(str::to_string),
            path: Some(path.to_path_buf()),
            message: format!("{}; file skipped", reason),
        }
    }

    pub fn missing_workbook(directory: &Path, keywords: &[String], extension: &str) -> Self {
        Self {
            kind: WarningKind::MissingWorkbook,
            severity: Severity::Warning,
            group: None,
            path: None,
            message: format!(
                "no '*{}' workbook matching any of [{}] in {}; growth dataset is empty",
                extension,
                keywords.join(", "),
                directory.display()
            ),
        }
    }

    pub fn unreadable_sheet(group: &str, path: &Path, reason: impl fmt::Display) -> Self {
        Self {
            kind: WarningKind::UnreadableSheet,
            severity: Severity::Warning,
            group: Some(group.to_string()),
            path: Some(path.to_path_buf()),
            message: format!("{}; sheet skipped", reason),
        }
    }
}

impl fmt::Display for LoadWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.group {
            Some(group) => write!(f, "[{}] {}", group, self.message),
            None => write!(f, "{}", self.message),
        }
    }
}

/// Collects warnings in the order they happen and mirrors each one to the log.
#[derive(Debug, Default)]
pub struct Warnings {
    items: Vec<LoadWarning>,
}

impl Warnings {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, warning: LoadWarning) {
        match warning.severity {
            Severity::Notice => info!("{}", warning),
            Severity::Warning => warn!("{}", warning),
        }
        self.items.push(warning);
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &LoadWarning> {
        self.items.iter()
    }

    pub fn into_vec(self) -> Vec<LoadWarning> {
        self.items
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_keeps_order() {
        let mut warnings = Warnings::new();
        warnings.push(LoadWarning::missing_source_file("송도고", Path::new("/data"), ".csv"));
        warnings.push(LoadWarning::missing_workbook(
            Path::new("/data"),
            &["생육결과데이터".to_string()],
            ".xlsx",
        ));

        let kinds: Vec<WarningKind> = warnings.iter().map(|w| w.kind).collect();
        assert_eq!(
            kinds,
            vec![WarningKind::MissingSourceFile, WarningKind::MissingWorkbook]
        );
        assert_eq!(warnings.len(), 2);
    }

    #[test]
    fn test_missing_columns_message_names_file_and_fields() {
        let warning = LoadWarning::missing_columns(
            "하늘고",
            Path::new("/data/하늘고_환경.csv"),
            &["humidity".to_string()],
        );
        assert_eq!(warning.severity, Severity::Warning);
        assert!(warning.message.contains("하늘고_환경.csv"));
        assert!(warning.message.contains("humidity"));
        assert!(warning.to_string().starts_with("[하늘고]"));
    }
}
