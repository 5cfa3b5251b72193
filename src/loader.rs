//! Per-group discovery, parsing, normalization and tagging.
//!
//! Nothing in here fails past the loader boundary: a missing file, a parse failure or a
//! rejected schema becomes a [`LoadWarning`] and the group simply contributes no rows.

use log::{debug, info};
use std::path::Path;

use crate::config::{Group, PipelineConfig};
use crate::data_models::{EnvironmentReading, GrowthMeasurement};
use crate::errors::SourceError;
use crate::filename::{self, canonical};
use crate::metrics::LoadMetrics;
use crate::parsers::{csv_parser, xlsx_parser};
use crate::schema::{self, TableKind};
use crate::table::Table;
use crate::validation;
use crate::warnings::{LoadWarning, Warnings};

/// Rows attributed to one group from one source (a file or a sheet).
#[derive(Debug, Clone, PartialEq)]
pub struct GroupTable<T> {
    pub group: String,
    pub rows: Vec<T>,
}

pub struct GroupLoader<'a> {
    directory: &'a Path,
    config: &'a PipelineConfig,
    warnings: Warnings,
    metrics: LoadMetrics,
}

impl<'a> GroupLoader<'a> {
    pub fn new(directory: &'a Path, config: &'a PipelineConfig) -> Self {
        Self {
            directory,
            config,
            warnings: Warnings::new(),
            metrics: LoadMetrics::new(),
        }
    }

    pub fn metrics_mut(&mut self) -> &mut LoadMetrics {
        &mut self.metrics
    }

    pub fn finish(self) -> (Warnings, LoadMetrics) {
        (self.warnings, self.metrics)
    }

    /// One table per group whose environment file was found and accepted, in group order.
    pub fn load_environment(&mut self) -> Vec<GroupTable<EnvironmentReading>> {
        let config = self.config;
        let mut tables = Vec::new();

        for group in &config.groups {
            let Some(path) = filename::find_file(self.directory, &group.name, &config.environment_extension)
            else {
                self.warnings.push(LoadWarning::missing_source_file(
                    &group.name,
                    self.directory,
                    &config.environment_extension,
                ));
                continue;
            };

            self.metrics.record_file_attempt();
            match self.read_environment_file(group, &path) {
                Ok(rows) => {
                    info!("Loaded {} environment rows for {} from {}", rows.len(), group.name, path.display());
                    self.metrics.record_file_success();
                    self.metrics.record_environment_rows(rows.len() as u64);
                    tables.push(GroupTable {
                        group: group.name.clone(),
                        rows,
                    });
                }
                Err(SourceError::MissingColumns { path, missing }) => {
                    self.metrics.record_file_skipped();
                    self.warnings
                        .push(LoadWarning::missing_columns(&group.name, &path, &missing));
                }
                Err(SourceError::Parse(e)) => {
                    self.metrics.record_file_skipped();
                    self.warnings
                        .push(LoadWarning::unreadable_source(Some(group.name.as_str()), &path, e));
                }
            }
        }

        tables
    }

    fn read_environment_file(
        &mut self,
        group: &Group,
        path: &Path,
    ) -> Result<Vec<EnvironmentReading>, SourceError> {
        let raw = csv_parser::parse_csv(path, self.config.delimiter_byte())?;
        let table = schema::normalize(raw, TableKind::Environment);

        validation::validate_environment_table(&table).map_err(|missing| SourceError::MissingColumns {
            path: path.to_path_buf(),
            missing,
        })?;

        Ok(self.environment_rows(group, &table, path))
    }

    fn environment_rows(&mut self, group: &Group, table: &Table, path: &Path) -> Vec<EnvironmentReading> {
        let (Some(time), Some(temperature), Some(humidity), Some(ph), Some(ec)) = (
            table.column_index(schema::TIME),
            table.column_index(schema::TEMPERATURE),
            table.column_index(schema::HUMIDITY),
            table.column_index(schema::PH),
            table.column_index(schema::EC),
        ) else {
            // Required columns were checked by the caller
            return Vec::new();
        };

        let config = self.config;
        let mut readings = Vec::with_capacity(table.height());

        for (row_index, row) in table.rows().iter().enumerate() {
            let mut reading = EnvironmentReading::new(group);
            reading.time = row[time].as_datetime(&config.timestamp_formats);
            if reading.time.is_none() {
                debug!(
                    "Unparsable timestamp {:?} at data row {} in {}; keeping row without time",
                    row[time],
                    row_index + 1,
                    path.display()
                );
                self.metrics.record_invalid_timestamp();
            }
            reading.temperature = row[temperature].as_f64();
            reading.humidity = row[humidity].as_f64();
            reading.ph = row[ph].as_f64();
            reading.ec = row[ec].as_f64();
            readings.push(reading);
        }

        readings
    }

    /// One table per workbook sheet attributed to a group, in workbook order.
    pub fn load_growth(&mut self) -> Vec<GroupTable<GrowthMeasurement>> {
        let config = self.config;

        let Some((path, keyword)) =
            filename::find_first(self.directory, &config.growth_keywords, &config.growth_extension)
        else {
            self.warnings.push(LoadWarning::missing_workbook(
                self.directory,
                &config.growth_keywords,
                &config.growth_extension,
            ));
            return Vec::new();
        };
        info!("Using growth workbook {} (matched '{}')", path.display(), keyword);

        self.metrics.record_file_attempt();
        let sheets = match xlsx_parser::parse_workbook(&path) {
            Ok(sheets) => {
                self.metrics.record_file_success();
                sheets
            }
            Err(e) => {
                self.metrics.record_file_skipped();
                self.warnings.push(LoadWarning::unreadable_source(None, &path, e));
                return Vec::new();
            }
        };

        let mut tables = Vec::new();
        for sheet in sheets {
            let Some(group) = match_sheet(config, &sheet.name) else {
                debug!("Sheet '{}' matches no group; skipped", sheet.name);
                self.metrics.record_sheet_skipped();
                continue;
            };

            match sheet.table {
                Ok(raw) => {
                    let table = schema::normalize(raw, TableKind::Growth);
                    if !has_growth_fields(&table) {
                        debug!(
                            "Sheet '{}' has no recognized growth columns; rows carried as extras",
                            sheet.name
                        );
                    }
                    let rows = growth_rows(group, &table);
                    info!("Loaded {} growth rows for {} from sheet '{}'", rows.len(), group.name, sheet.name);
                    self.metrics.record_sheet_success();
                    self.metrics.record_growth_rows(rows.len() as u64);
                    tables.push(GroupTable {
                        group: group.name.clone(),
                        rows,
                    });
                }
                Err(e) => {
                    self.metrics.record_sheet_skipped();
                    self.warnings.push(LoadWarning::unreadable_sheet(&group.name, &path, e));
                }
            }
        }

        tables
    }
}

/// First group (configuration order) whose canonical name is contained in the canonical
/// sheet name.
pub fn match_sheet<'c>(config: &'c PipelineConfig, sheet_name: &str) -> Option<&'c Group> {
    let sheet_name = canonical(sheet_name);
    config
        .groups
        .iter()
        .find(|group| sheet_name.contains(&canonical(&group.name)))
}

/// Whether any column of a normalized growth table is a recognized field.
fn has_growth_fields(table: &Table) -> bool {
    schema::GROWTH_FIELDS.iter().any(|field| table.has_column(field))
}

fn growth_rows(group: &Group, table: &Table) -> Vec<GrowthMeasurement> {
    let columns = table.columns();

    table
        .rows()
        .iter()
        .map(|row| {
            let mut measurement = GrowthMeasurement::new(group);
            for (name, cell) in columns.iter().zip(row) {
                match name.as_str() {
                    schema::SPECIMEN_ID => set_once(&mut measurement.specimen_id, cell.as_text()),
                    schema::LEAF_COUNT => set_once(&mut measurement.leaf_count, cell.as_f64()),
                    schema::SHOOT_LENGTH => set_once(&mut measurement.shoot_length, cell.as_f64()),
                    schema::ROOT_LENGTH => set_once(&mut measurement.root_length, cell.as_f64()),
                    schema::FRESH_WEIGHT => set_once(&mut measurement.fresh_weight, cell.as_f64()),
                    _ => measurement.extra.push((name.clone(), cell.clone())),
                }
            }
            measurement
        })
        .collect()
}

// Two source headers can alias the same field; the first non-empty one wins
fn set_once<T>(slot: &mut Option<T>, value: Option<T>) {
    if slot.is_none() {
        *slot = value;
    }
}
