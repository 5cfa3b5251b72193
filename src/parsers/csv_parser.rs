use crate::errors::ParseError;
use crate::table::{Cell, Table};
use csv::ReaderBuilder;
use log::debug;
use std::fs::File;
use std::io::Read;
use std::path::Path;

const UTF8_BOM: char = '\u{feff}';

/// Reads a headed CSV file into a [`Table`].
///
/// The first record is the header row; a leading UTF-8 BOM is stripped from it. Blank
/// lines are skipped by the reader, short rows are padded and long rows truncated.
pub fn parse_csv(file_path: &Path, delimiter: u8) -> Result<Table, ParseError> {
    let file = File::open(file_path).map_err(|e| ParseError::IoError {
        path: file_path.to_path_buf(),
        source: e,
    })?;
    parse_csv_reader(file, file_path, delimiter)
}

pub fn parse_csv_reader<R: Read>(input: R, file_path: &Path, delimiter: u8) -> Result<Table, ParseError> {
    let mut reader = ReaderBuilder::new()
        .delimiter(delimiter)
        .has_headers(true)
        .flexible(true)
        .from_reader(input);

    let headers: Vec<String> = reader
        .headers()
        .map_err(|e| ParseError::HeaderReadError {
            path: file_path.to_path_buf(),
            source: e,
        })?
        .iter()
        .enumerate()
        .map(|(index, header)| {
            let header = if index == 0 { header.trim_start_matches(UTF8_BOM) } else { header };
            header.to_string()
        })
        .collect();

    let mut table = Table::new(headers);
    for (row_index, result) in reader.records().enumerate() {
        let record = result.map_err(|e| ParseError::RecordReadError {
            path: file_path.to_path_buf(),
            // header is line 1
            row: row_index + 2,
            source: e,
        })?;
        table.push_row(record.iter().map(Cell::from_text).collect());
    }

    debug!(
        "Parsed {} rows x {} columns from {}",
        table.height(),
        table.width(),
        file_path.display()
    );
    Ok(table)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(text: &str) -> Table {
        parse_csv_reader(text.as_bytes(), Path::new("inline.csv"), b',').unwrap()
    }

    #[test]
    fn test_bom_is_stripped_from_first_header() {
        let table = parse("\u{feff}time,temperature\n2025-05-01 09:00,21.5\n");
        assert_eq!(table.columns()[0], "time");
        assert_eq!(table.get(0, "temperature"), Some(&Cell::Text("21.5".into())));
    }

    #[test]
    fn test_ragged_rows_and_blank_values() {
        let table = parse("a,b,c\n1,,3\n4\n\n5,6,7,8\n");
        assert_eq!(table.height(), 3);
        assert_eq!(table.rows()[0][1], Cell::Empty);
        assert_eq!(table.rows()[1], vec![Cell::Text("4".into()), Cell::Empty, Cell::Empty]);
        assert_eq!(table.rows()[2].len(), 3);
    }

    #[test]
    fn test_headers_are_kept_verbatim() {
        let table = parse(" Time , EC \n1,2\n");
        assert_eq!(table.columns(), &[" Time ".to_string(), " EC ".to_string()]);
    }

    #[test]
    fn test_custom_delimiter() {
        let table = parse_csv_reader("a;b\n1;2\n".as_bytes(), Path::new("x.csv"), b';').unwrap();
        assert_eq!(table.width(), 2);
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = parse_csv(Path::new("/no/such/file.csv"), b',').unwrap_err();
        assert!(matches!(err, ParseError::IoError { .. }));
    }

    #[test]
    fn test_invalid_utf8_is_reported() {
        let bytes: &[u8] = b"a,b\n\xff\xfe,1\n";
        let err = parse_csv_reader(bytes, Path::new("bad.csv"), b',').unwrap_err();
        assert!(matches!(err, ParseError::RecordReadError { row: 2, .. }));
    }
}
