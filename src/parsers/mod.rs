pub mod csv_parser;
pub mod xlsx_parser;
