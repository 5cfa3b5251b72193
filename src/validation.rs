//! Module for data validation logic.

use crate::schema::ENVIRONMENT_REQUIRED;
use crate::table::Table;

/// Names from `required` that `table` does not carry, in `required` order.
pub fn missing_columns(table: &Table, required: &[&str]) -> Vec<String> {
    required
        .iter()
        .filter(|name| !table.has_column(name))
        .map(|name| name.to_string())
        .collect()
}

/// Checks a normalized environment table carries every required column.
///
/// Returns Ok(()) if valid, otherwise Err with the missing column names.
pub fn validate_environment_table(table: &Table) -> Result<(), Vec<String>> {
    let missing = missing_columns(table, &ENVIRONMENT_REQUIRED);
    if missing.is_empty() {
        Ok(())
    } else {
        Err(missing)
    }
}
