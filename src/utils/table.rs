//! Table rendering for CLI outputs.
//!
//! Widths are measured in terminal columns (Hangul takes two) and ANSI colour
//! codes are ignored when padding.

use regex::Regex;
use std::sync::LazyLock;
use unicode_width::UnicodeWidthStr;

static ANSI: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\x1B\[[0-9;]*[mK]").expect("static ANSI pattern"));

pub fn visible_width(s: &str) -> usize {
    ANSI.replace_all(s, "").width()
}

fn pad(cell: &str, width: usize) -> String {
    let fill = width.saturating_sub(visible_width(cell));
    format!("{}{}", cell, " ".repeat(fill))
}

pub struct Column {
    pub header: String,
}

impl Column {
    pub fn new(header: &str) -> Self {
        Self {
            header: header.to_string(),
        }
    }
}

pub struct Table {
    pub columns: Vec<Column>,
    pub rows: Vec<Vec<String>>,
    separator: String,
}

impl Table {
    pub fn new(columns: Vec<Column>, separator: &str) -> Self {
        Self {
            columns,
            rows: Vec::new(),
            separator: separator.to_string(),
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
                self.rows
                    .iter()
                    .filter_map(|r| r.get(i))
                    .map(|c| visible_width(c))
                    .chain(std::iter::once(visible_width(&col.header)))
                    .max()
                    .unwrap_or(0)
            })
            .collect()
    }

    pub fn render(&self) -> String {
        let widths = self.widths();
        let mut out = String::new();

        let header: Vec<String> = self
            .columns
            .iter()
            .zip(&widths)
            .map(|(c, w)| pad(&c.header, *w))
            .collect();
        out.push_str(header.join(" ").trim_end());
        out.push('\n');

        let total = widths.iter().sum::<usize>() + widths.len().saturating_sub(1);
        out.push_str(&self.separator.repeat(total.max(1)));
        out.push('\n');

        for row in &self.rows {
            let cells: Vec<String> = widths
                .iter()
                .enumerate()
                .map(|(i, w)| pad(row.get(i).map(String::as_str).unwrap_or(""), *w))
                .collect();
            out.push_str(cells.join(" ").trim_end());
            out.push('\n');
        }

        out
    }
}
