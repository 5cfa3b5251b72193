//! Concatenation of per-group tables into the unified datasets.

use crate::data_models::Record;
use crate::loader::GroupTable;
use crate::table::{Cell, Table};

/// All rows of one data kind across groups, in group processing order.
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset<T> {
    rows: Vec<T>,
}

impl<T: Record> Default for Dataset<T> {
    fn default() -> Self {
        Self::empty()
    }
}

impl<T: Record> Dataset<T> {
    pub fn empty() -> Self {
        Self { rows: Vec::new() }
    }

    pub fn from_rows(rows: Vec<T>) -> Self {
        Self { rows }
    }

    pub fn rows(&self) -> &[T] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Canonical columns followed by extra source columns in first-appearance order.
    pub fn columns(&self) -> Vec<String> {
        let mut columns: Vec<String> = T::COLUMNS.iter().map(|c| c.to_string()).collect();
        for row in &self.rows {
            for (name, _) in row.extra() {
                if !columns.contains(name) {
                    columns.push(name.clone());
                }
            }
        }
        columns
    }

    /// Distinct group tags in order of first appearance.
    pub fn groups(&self) -> Vec<&str> {
        let mut groups: Vec<&str> = Vec::new();
        for row in &self.rows {
            if !groups.contains(&row.group()) {
                groups.push(row.group());
            }
        }
        groups
    }

    pub fn rows_for_group<'s>(&'s self, group: &'s str) -> impl Iterator<Item = &'s T> + 's {
        self.rows.iter().filter(move |row| row.group() == group)
    }

    /// Derived copy holding only rows tagged with one of `groups`. An empty filter keeps
    /// every row.
    pub fn filter_groups<S: AsRef<str>>(&self, groups: &[S]) -> Dataset<T> {
        if groups.is_empty() {
            return self.clone();
        }
        let rows = self
            .rows
            .iter()
            .filter(|row| groups.iter().any(|g| g.as_ref() == row.group()))
            .cloned()
            .collect();
        Dataset { rows }
    }

    /// Flat table view for exports. Rows missing an extra column get `Empty` there.
    pub fn to_table(&self) -> Table {
        let columns = self.columns();
        let base = T::COLUMNS.len();
        let mut table = Table::new(columns.clone());

        for row in &self.rows {
            let mut cells = row.cells();
            for name in &columns[base..] {
                let cell = row
                    .extra()
                    .iter()
                    .find(|(extra_name, _)| extra_name == name)
                    .map(|(_, cell)| cell.clone())
                    .unwrap_or(Cell::Empty);
                cells.push(cell);
            }
            table.push_row(cells);
        }
        table
    }
}

/// Row-wise concatenation in input order. No deduplication, sorting or cross-group
/// checks; an empty input gives an empty dataset that still reports its columns.
pub fn merge<T: Record>(tables: Vec<GroupTable<T>>) -> Dataset<T> {
    let total = tables.iter().map(|t| t.rows.len()).sum();
    let mut rows = Vec::with_capacity(total);
    for table in tables {
        rows.extend(table.rows);
    }
    Dataset { rows }
}
