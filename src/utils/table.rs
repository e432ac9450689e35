//! Table rendering utilities for CLI outputs.

use crate::utils::formatting::{pad_right, truncate};
use unicode_width::UnicodeWidthStr;

pub struct Column {
    pub header: String,
    /// Maximum display width; cells are cut to it.
    pub max_width: usize,
}

impl Column {
    pub fn new(header: &str, max_width: usize) -> Self {
        Self {
            header: header.to_string(),
            max_width,
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

    fn widths(&self) -> Vec<usize> {
        self.columns
            .iter()
            .enumerate()
            .map(|(i, col)| {
                let cells = self
                    .rows
                    .iter()
                    .filter_map(|r| r.get(i))
                    .map(|c| UnicodeWidthStr::width(c.as_str()));
                cells
                    .chain(std::iter::once(UnicodeWidthStr::width(col.header.as_str())))
                    .max()
                    .unwrap_or(0)
                    .min(col.max_width)
            })
            .collect()
    }

    pub fn render(&self, separator: char) -> String {
        let widths = self.widths();
        let mut out = String::new();

        // Header
        for (col, w) in self.columns.iter().zip(&widths) {
            out.push_str(&pad_right(&col.header, *w));
            out.push(' ');
        }
        out.push('\n');

        let total: usize = widths.iter().map(|w| w + 1).sum();
        out.push_str(&separator.to_string().repeat(total.saturating_sub(1)));
        out.push('\n');

        // Rows
        for row in &self.rows {
            for (i, w) in widths.iter().enumerate() {
                let cell = row.get(i).map(String::as_str).unwrap_or("");
                out.push_str(&pad_right(&truncate(cell, *w), *w));
                out.push(' ');
            }
            out.push('\n');
        }

        out
    }
}
