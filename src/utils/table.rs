//! Table rendering utilities for CLI outputs.
//!
//! Widths are measured in terminal columns and the last column wraps, since
//! descriptions are free text of any length and script.

use super::formatting::pad_right;
use unicode_width::UnicodeWidthStr;

pub struct Column {
    pub header: String,
    pub width: usize,
}

impl Column {
    pub fn new(header: &str, width: usize) -> Self {
        Self {
            header: header.to_string(),
            width,
        }
    }
}

pub struct Table {
    pub columns: Vec<Column>,
    pub rows: Vec<Vec<String>>,
}

impl Table {
    pub fn new(columns: Vec<Column>) -> Self {
        Self {
            columns,
            rows: Vec::new(),
        }
    }

    pub fn add_row(&mut self, row: Vec<String>) {
        self.rows.push(row);
    }

    /// Grows every column except the last to fit its widest cell.
    pub fn fit_columns(&mut self) {
        let last = self.columns.len().saturating_sub(1);
        for (i, col) in self.columns.iter_mut().enumerate().take(last) {
            let widest = self
                .rows
                .iter()
                .filter_map(|r| r.get(i))
                .map(|c| UnicodeWidthStr::width(c.as_str()))
                .max()
                .unwrap_or(0);
            col.width = col.width.max(widest).max(col.header.width());
        }
    }

    pub fn render(&self) -> String {
        let mut out = String::new();

        // Header
        for col in &self.columns {
            out.push_str(&pad_right(&col.header, col.width));
            out.push(' ');
        }
        out.push('\n');

        // Rows
        let last = self.columns.len().saturating_sub(1);
        for row in &self.rows {
            let wrapped: Vec<String> = match (row.get(last), self.columns.get(last)) {
                (Some(text), Some(col)) if !text.is_empty() => {
                    textwrap::wrap(text, col.width.max(8))
                        .into_iter()
                        .map(|l| l.into_owned())
                        .collect()
                }
                _ => vec![String::new()],
            };

            for (n, line) in wrapped.iter().enumerate() {
                for (i, col) in self.columns.iter().enumerate().take(last) {
                    let cell = if n == 0 {
                        row.get(i).map(String::as_str).unwrap_or("")
                    } else {
                        ""
                    };
                    out.push_str(&pad_right(cell, col.width));
                    out.push(' ');
                }
                out.push_str(line);
                out.push('\n');
            }
        }

        out
    }
}
