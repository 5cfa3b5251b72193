use crate::errors::ParseError;
use crate::table::{Cell, Table};
use calamine::{open_workbook_auto, Data, DataType, Reader};
use log::debug;
use std::path::Path;

/// One worksheet, read independently so a broken sheet does not hide the others.
#[derive(Debug)]
pub struct SheetTable {
    pub name: String,
    pub table: Result<Table, ParseError>,
}

/// Opens a workbook and reads every sheet in workbook order.
///
/// Failing to open the file is an error; failing to read a single sheet is recorded on
/// that sheet only.
pub fn parse_workbook(file_path: &Path) -> Result<Vec<SheetTable>, ParseError> {
    let mut workbook = open_workbook_auto(file_path).map_err(|e| ParseError::WorkbookError {
        path: file_path.to_path_buf(),
        source: e,
    })?;

    let sheet_names = workbook.sheet_names().to_owned();
    debug!("Workbook {} has sheets {:?}", file_path.display(), sheet_names);

    let sheets = sheet_names
        .into_iter()
        .map(|name| {
            let table = workbook
                .worksheet_range(&name)
                .map(|range| {
                    let rows: Vec<Vec<Cell>> = range
                        .rows()
                        .map(|row| row.iter().map(convert_cell).collect())
                        .collect();
                    rows_to_table(rows)
                })
                .map_err(|e| ParseError::SheetError {
                    path: file_path.to_path_buf(),
                    sheet: name.clone(),
                    source: e,
                });
            SheetTable { name, table }
        })
        .collect();

    Ok(sheets)
}

/// First row becomes the header; blank header cells are named `Unnamed: {index}` and
/// fully blank data rows are dropped.
pub fn rows_to_table(rows: Vec<Vec<Cell>>) -> Table {
    let mut rows = rows.into_iter();
    let header = match rows.next() {
        Some(header) => header,
        None => return Table::default(),
    };

    let columns = header
        .iter()
        .enumerate()
        .map(|(index, cell)| cell.as_text().unwrap_or_else(|| format!("Unnamed: {}", index)))
        .collect();

    let mut table = Table::new(columns);
    for row in rows.filter(|row| row.iter().any(|c| !c.is_empty())) {
        table.push_row(row);
    }
    table
}

fn convert_cell(cell: &Data) -> Cell {
    match cell {
        Data::Empty | Data::Error(_) => Cell::Empty,
        Data::String(s) => Cell::from_text(s),
        Data::Int(i) => Cell::Number(*i as f64),
        Data::Float(f) => Cell::Number(*f),
        Data::Bool(b) => Cell::Bool(*b),
        Data::DateTime(_) | Data::DateTimeIso(_) => match cell.as_datetime() {
            Some(dt) => Cell::DateTime(dt),
            None => Cell::from_text(&cell.to_string()),
        },
        Data::DurationIso(s) => Cell::from_text(s),
    }
}
