//! Output formatting for the CLI.

use crate::config::OutputFormat;
use crate::error::Result;
use colored::*;
use europeana_domain::table::IDENTIFIER_COLUMN;
use europeana_domain::Table;
use serde::Serialize;
use tabled::{
    builder::Builder,
    settings::{object::Rows, Alignment, Modify, Style},
};

const DEFAULT_MAX_CELL_WIDTH: usize = 60;

/// Output formatter.
pub struct Formatter {
    format: OutputFormat,
    color_enabled: bool,
    max_cell_width: usize,
}

impl Formatter {
    /// Create a new formatter.
    pub fn new(format: OutputFormat, color_enabled: bool) -> Self {
        Self {
            format,
            color_enabled,
            max_cell_width: DEFAULT_MAX_CELL_WIDTH,
        }
    }

    /// Truncate table cells to `width` characters (0 disables truncation).
    pub fn with_max_cell_width(mut self, width: usize) -> Self {
        self.max_cell_width = width;
        self
    }

    /// Selected output format.
    pub fn format(&self) -> OutputFormat {
        self.format
    }

    /// Format a flattened table.
    pub fn format_table(&self, table: &Table) -> Result<String> {
        match self.format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(&table.records())?),
            OutputFormat::Table => Ok(self.format_table_text(table)),
            OutputFormat::Quiet => Ok(Self::format_table_quiet(table)),
        }
    }

    /// Format any serializable value as pretty JSON.
    pub fn format_json<T: Serialize + ?Sized>(&self, value: &T) -> Result<String> {
        Ok(serde_json::to_string_pretty(value)?)
    }

    fn format_table_text(&self, table: &Table) -> String {
        if table.is_empty() {
            return self.colorize("No results found.", "yellow");
        }

        let mut builder = Builder::default();
        builder.push_record(table.columns().iter().map(String::as_str));
        for row in table.text_rows() {
            builder.push_record(row.iter().map(|cell| truncate(cell, self.max_cell_width)));
        }

        let mut rendered = builder.build();
        rendered
            .with(Style::rounded())
            .with(Modify::new(Rows::first()).with(Alignment::center()));

        rendered.to_string()
    }

    /// Identifier column, one per line; first column when there is none.
    fn format_table_quiet(table: &Table) -> String {
        let column = if table.has_column(IDENTIFIER_COLUMN) {
            Some(IDENTIFIER_COLUMN)
        } else {
            table.columns().first().map(String::as_str)
        };

        match column.and_then(|c| table.column_strings(c)) {
            Some(values) => values
                .into_iter()
                .filter(|text| !text.is_empty())
                .collect::<Vec<_>>()
                .join("\n"),
            None => String::new(),
        }
    }

    /// Format a success message.
    pub fn success(&self, message: &str) -> String {
        self.colorize(&format!("✓ {}", message), "green")
    }

    /// Format an info message.
    pub fn info(&self, message: &str) -> String {
        self.colorize(&format!("ℹ {}", message), "blue")
    }

    /// Format a warning message.
    pub fn warning(&self, message: &str) -> String {
        self.colorize(&format!("⚠ {}", message), "yellow")
    }

    /// Section heading.
    pub fn heading(&self, text: &str) -> String {
        self.colorize(text, "cyan")
    }

    /// "N results" line, noting how many are shown when it differs.
    pub fn result_count(&self, total: Option<u64>, shown: usize) -> String {
        match total {
            Some(total) if total != shown as u64 => {
                self.info(&format!("{} result(s), showing {}", total, shown))
            }
            _ => self.info(&format!("{} result(s)", shown)),
        }
    }

    /// Colorize text if color is enabled.
    fn colorize(&self, text: &str, color: &str) -> String {
        if !self.color_enabled {
            return text.to_string();
        }

        match color {
            "green" => text.green().to_string(),
            "blue" => text.blue().to_string(),
            "yellow" => text.yellow().to_string(),
            "cyan" => text.cyan().to_string(),
            _ => text.to_string(),
        }
    }
}

/// Cut `text` to `width` characters, marking the cut with an ellipsis.
pub fn truncate(text: &str, width: usize) -> String {
    if width == 0 || text.chars().count() <= width {
        return text.to_string();
    }
    let mut cut: String = text.chars().take(width.saturating_sub(1)).collect();
    cut.push('…');
    cut
}
