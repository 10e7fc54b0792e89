//! Flattened tables
//!
//! A [`Table`] holds one row per result item. Nested objects are flattened
//! into dotted-path columns (`isShownBy.source`), lists are kept as JSON
//! values, and missing cells read as `null`. Columns are ordered by first
//! appearance across rows.

use crate::envelope::ResultEnvelope;
use crate::multilingual::LanguageValue;
use serde_json::{Map, Value};

/// Column group holding the illustration of an entity
pub const ILLUSTRATION_MARKER: &str = "isShownBy";

/// Column holding the entity URI
pub const IDENTIFIER_COLUMN: &str = "id";

/// Column used for items that are not JSON objects
pub const VALUE_COLUMN: &str = "value";

static NULL: Value = Value::Null;

/// Rows of flattened JSON objects with an explicit column order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Table {
    columns: Vec<String>,
    rows: Vec<Map<String, Value>>,
}

impl Table {
    /// Empty table with the given columns
    pub fn with_columns<I, S>(columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            columns: columns.into_iter().map(Into::into).collect(),
            rows: Vec::new(),
        }
    }

    /// One row per envelope item; a missing `items` list gives an empty table
    pub fn flatten(envelope: &ResultEnvelope) -> Self {
        Self::from_items(&envelope.items)
    }

    /// One row per item, nested objects flattened into dotted columns
    pub fn from_items(items: &[Value]) -> Self {
        let mut table = Table::default();
        for item in items {
            let mut row = Map::new();
            match item {
                Value::Object(map) => flatten_into(&mut row, None, map),
                other => {
                    row.insert(VALUE_COLUMN.to_string(), other.clone());
                }
            }
            table.push_row(row);
        }
        table
    }

    /// Two-column table from (language, value) pairs
    pub fn from_language_values(
        pairs: &[LanguageValue],
        language_column: &str,
        value_column: &str,
    ) -> Self {
        let mut table = Self::with_columns([language_column, value_column]);
        for pair in pairs {
            let mut row = Map::new();
            row.insert(language_column.to_string(), Value::String(pair.language.clone()));
            row.insert(value_column.to_string(), Value::String(pair.value.clone()));
            table.push_row(row);
        }
        table
    }

    /// Append a row, registering any new columns at the end
    pub fn push_row(&mut self, row: Map<String, Value>) {
        for key in row.keys() {
            self.register_column(key);
        }
        self.rows.push(row);
    }

    /// Column names in display order
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Number of rows
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// True if the table has no rows
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// True if `column` is part of the table
    pub fn has_column(&self, column: &str) -> bool {
        self.columns.iter().any(|c| c == column)
    }

    /// Cell at `row`/`column`; missing cells read as `null`
    pub fn cell(&self, row: usize, column: &str) -> &Value {
        self.rows
            .get(row)
            .and_then(|r| r.get(column))
            .unwrap_or(&NULL)
    }

    /// All cells of a column, `None` if the column does not exist
    pub fn column(&self, column: &str) -> Option<Vec<&Value>> {
        if !self.has_column(column) {
            return None;
        }
        Some((0..self.rows.len()).map(|row| self.cell(row, column)).collect())
    }

    /// Display text of every cell in a column
    pub fn column_strings(&self, column: &str) -> Option<Vec<String>> {
        self.column(column)
            .map(|cells| cells.into_iter().map(cell_text).collect())
    }

    /// Set one cell, registering the column if new
    pub fn set(&mut self, row: usize, column: &str, value: Value) {
        self.register_column(column);
        if let Some(r) = self.rows.get_mut(row) {
            r.insert(column.to_string(), value);
        }
    }

    /// Append a column; rows beyond the end of `values` get `null`
    pub fn push_column(&mut self, column: &str, values: Vec<Value>) {
        self.register_column(column);
        let mut values = values.into_iter();
        for row in &mut self.rows {
            row.insert(column.to_string(), values.next().unwrap_or(Value::Null));
        }
    }

    /// Remove a column, returning whether it existed
    pub fn drop_column(&mut self, column: &str) -> bool {
        let before = self.columns.len();
        self.columns.retain(|c| c != column);
        for row in &mut self.rows {
            row.remove(column);
        }
        self.columns.len() != before
    }

    /// Remove every column whose name contains `marker`, returning how many
    pub fn drop_columns_containing(&mut self, marker: &str) -> usize {
        let doomed: Vec<String> = self
            .columns
            .iter()
            .filter(|c| c.contains(marker))
            .cloned()
            .collect();
        for column in &doomed {
            self.drop_column(column);
        }
        doomed.len()
    }

    /// Drop the illustration column group (`isShownBy*`)
    pub fn drop_illustrations(&mut self) -> usize {
        self.drop_columns_containing(ILLUSTRATION_MARKER)
    }

    /// Move the columns matching `predicate` to the front, keeping relative order
    pub fn move_to_front<F>(&mut self, predicate: F)
    where
        F: Fn(&str) -> bool,
    {
        let (mut front, back): (Vec<String>, Vec<String>) =
            self.columns.drain(..).partition(|c| predicate(c));
        front.extend(back);
        self.columns = front;
    }

    /// Move the identifier-bearing columns (`id`, `*.id`) and `type` first
    pub fn promote_identifier_columns(&mut self) {
        self.move_to_front(is_identifier_column);
    }

    /// New table restricted to `columns`, in the given order; unknown names are skipped
    pub fn select_columns<S: AsRef<str>>(&self, columns: &[S]) -> Table {
        let selected: Vec<String> = columns
            .iter()
            .map(|c| c.as_ref())
            .filter(|c| self.has_column(c))
            .map(str::to_string)
            .collect();
        let rows = self
            .rows
            .iter()
            .map(|row| {
                selected
                    .iter()
                    .filter_map(|c| row.get(c).map(|v| (c.clone(), v.clone())))
                    .collect()
            })
            .collect();
        Table {
            columns: selected,
            rows,
        }
    }

    /// Rows as JSON objects with keys in column order and `null` for gaps
    pub fn records(&self) -> Vec<Value> {
        (0..self.rows.len())
            .map(|row| {
                let record: Map<String, Value> = self
                    .columns
                    .iter()
                    .map(|c| (c.clone(), self.cell(row, c).clone()))
                    .collect();
                Value::Object(record)
            })
            .collect()
    }

    /// Rows as display strings, in column order
    pub fn text_rows(&self) -> Vec<Vec<String>> {
        (0..self.rows.len())
            .map(|row| self.columns.iter().map(|c| cell_text(self.cell(row, c))).collect())
            .collect()
    }

    fn register_column(&mut self, column: &str) {
        if !self.has_column(column) {
            self.columns.push(column.to_string());
        }
    }
}

/// True for `id`, `*.id` and `type`
pub fn is_identifier_column(column: &str) -> bool {
    column == IDENTIFIER_COLUMN || column.ends_with(".id") || column == "type"
}

/// Display text of a cell: strings raw, `null` empty, everything else as JSON
pub fn cell_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}

fn flatten_into(row: &mut Map<String, Value>, prefix: Option<&str>, map: &Map<String, Value>) {
    for (key, value) in map {
        let column = match prefix {
            Some(prefix) => format!("{}.{}", prefix, key),
            None => key.clone(),
        };
        match value {
            Value::Object(nested) if !nested.is_empty() => {
                flatten_into(row, Some(column.as_str()), nested)
            }
            other => {
                row.insert(column, other.clone());
            }
        }
    }
}
