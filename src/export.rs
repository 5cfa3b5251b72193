//! Serializes datasets for download: CSV with a UTF-8 byte-order mark, or a single-sheet
//! XLSX workbook.

use log::info;
use rust_xlsxwriter::{Format, Workbook};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::data_models::Record;
use crate::errors::ExportError;
use crate::reconcile::Dataset;
use crate::table::Cell;

/// Lets spreadsheet applications detect UTF-8 and render Korean text correctly.
pub const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

const MAX_SHEET_NAME_LEN: usize = 31;

/// Writes the BOM, a header row, then one record per dataset row. Cells use their
/// display form; missing values are empty fields.
pub fn write_csv<T: Record, W: Write>(dataset: &Dataset<T>, mut output: W) -> Result<(), ExportError> {
    output.write_all(UTF8_BOM).map_err(csv::Error::from)?;

    let table = dataset.to_table();
    let mut writer = csv::Writer::from_writer(output);
    writer.write_record(table.columns())?;
    for row in table.rows() {
        writer.write_record(row.iter().map(|cell| cell.to_string()))?;
    }
    writer.flush().map_err(csv::Error::from)?;
    Ok(())
}

pub fn csv_bytes<T: Record>(dataset: &Dataset<T>) -> Result<Vec<u8>, ExportError> {
    let mut buffer = Vec::new();
    write_csv(dataset, &mut buffer)?;
    Ok(buffer)
}

pub fn export_csv<T: Record>(dataset: &Dataset<T>, path: &Path) -> Result<(), ExportError> {
    let file = File::create(path).map_err(|e| ExportError::IoError {
        path: path.to_path_buf(),
        source: e,
    })?;
    write_csv(dataset, BufWriter::new(file))?;
    info!("Exported {} rows to {}", dataset.len(), path.display());
    Ok(())
}

/// In-memory workbook with one sheet: a bold header row and one row per dataset row.
/// Timestamps are written as text in the display format.
pub fn xlsx_bytes<T: Record>(dataset: &Dataset<T>, sheet_name: &str) -> Result<Vec<u8>, ExportError> {
    let table = dataset.to_table();
    let too_large = || ExportError::SheetTooLarge {
        rows: table.height(),
        columns: table.width(),
    };

    let mut workbook = Workbook::new();
    let header = Format::new().set_bold();
    let worksheet = workbook.add_worksheet();
    let name: String = sheet_name.chars().take(MAX_SHEET_NAME_LEN).collect();
    worksheet.set_name(name)?;

    for (col, column) in table.columns().iter().enumerate() {
        let col = u16::try_from(col).map_err(|_| too_large())?;
        worksheet.write_string_with_format(0, col, column, &header)?;
    }

    for (row_index, row) in table.rows().iter().enumerate() {
        let xlsx_row = u32::try_from(row_index + 1).map_err(|_| too_large())?;
        for (col, cell) in row.iter().enumerate() {
            let col = u16::try_from(col).map_err(|_| too_large())?;
            match cell {
                Cell::Empty => {}
                Cell::Number(n) => {
                    worksheet.write_number(xlsx_row, col, *n)?;
                }
                Cell::Bool(b) => {
                    worksheet.write_boolean(xlsx_row, col, *b)?;
                }
                Cell::Text(_) | Cell::DateTime(_) => {
                    worksheet.write_string(xlsx_row, col, cell.to_string())?;
                }
            }
        }
    }

    Ok(workbook.save_to_buffer()?)
}

pub fn export_xlsx<T: Record>(dataset: &Dataset<T>, sheet_name: &str, path: &Path) -> Result<(), ExportError> {
    let bytes = xlsx_bytes(dataset, sheet_name)?;
    std::fs::write(path, bytes).map_err(|e| ExportError::IoError {
        path: path.to_path_buf(),
        source: e,
    })?;
    info!("Exported {} rows to {}", dataset.len(), path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Group;
    use crate::data_models::{EnvironmentReading, GrowthMeasurement};
    use chrono::NaiveDate;

    fn environment() -> Dataset<EnvironmentReading> {
        let group = Group::new("송도고", 1.0, "#FF6347");
        let mut reading = EnvironmentReading::new(&group);
        reading.time = NaiveDate::from_ymd_opt(2025, 5, 1).and_then(|d| d.and_hms_opt(9, 30, 0));
        reading.temperature = Some(21.5);
        reading.ph = Some(6.0);
        Dataset::from_rows(vec![reading])
    }

    #[test]
    fn test_csv_starts_with_bom_and_header() {
        let bytes = csv_bytes(&environment()).unwrap();
        assert!(bytes.starts_with(UTF8_BOM));

        let text = String::from_utf8(bytes[UTF8_BOM.len()..].to_vec()).unwrap();
        let mut lines = text.lines();
        assert_eq!(lines.next(), Some("group,target_ec,time,temperature,humidity,ph,ec"));
        assert_eq!(lines.next(), Some("송도고,1,2025-05-01 09:30:00,21.5,,6,"));
        assert_eq!(lines.next(), None);
    }

    #[test]
    fn test_empty_csv_has_header_only() {
        let bytes = csv_bytes(&Dataset::<GrowthMeasurement>::empty()).unwrap();
        let text = String::from_utf8(bytes[UTF8_BOM.len()..].to_vec()).unwrap();
        assert_eq!(text.lines().count(), 1);
        assert!(text.starts_with("group,target_ec,specimen_id"));
    }

    #[test]
    fn test_xlsx_is_a_zip_container() {
        let bytes = xlsx_bytes(&environment(), "environment").unwrap();
        assert!(bytes.starts_with(b"PK"));
    }

    #[test]
    fn test_exports_round_trip_through_files() {
        let dir = tempfile::tempdir().unwrap();
        let csv_path = dir.path().join("environment.csv");
        let xlsx_path = dir.path().join("environment.xlsx");

        export_csv(&environment(), &csv_path).unwrap();
        export_xlsx(&environment(), "a very long sheet name that exceeds the limit", &xlsx_path).unwrap();

        assert!(std::fs::read(&csv_path).unwrap().starts_with(UTF8_BOM));
        let sheets = crate::parsers::xlsx_parser::parse_workbook(&xlsx_path).unwrap();
        assert_eq!(sheets.len(), 1);
        let table = sheets[0].table.as_ref().unwrap();
        assert_eq!(table.height(), 1);
        assert_eq!(table.get(0, "temperature"), Some(&Cell::Number(21.5)));
    }

    #[test]
    fn test_export_to_missing_directory_fails() {
        let err = export_csv(&environment(), Path::new("/no/such/dir/out.csv")).unwrap_err();
        assert!(matches!(err, ExportError::IoError { .. }));
    }
}
