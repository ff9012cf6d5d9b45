//! Table rendering utilities for CLI outputs.
//!
//! Widths are measured in terminal columns (`unicode-width`), so accented
//! names and emoji line up. Cells wider than a column's limit are wrapped.

use crate::utils::colors::RESET;
use unicode_width::UnicodeWidthStr;

pub struct Column {
    pub header: String,
    /// Upper bound for the column; longer cells wrap onto extra lines.
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
    /// ANSI colour applied to every line of the matching row.
    pub row_colors: Vec<Option<&'static str>>,
    pub separator: char,
}

fn pad(s: &str, width: usize) -> String {
    let w = UnicodeWidthStr::width(s);
    format!("{}{}", s, " ".repeat(width.saturating_sub(w)))
}

impl Table {
    pub fn new(columns: Vec<Column>) -> Self {
        Self {
            columns,
            rows: Vec::new(),
            row_colors: Vec::new(),
            separator: '-',
        }
    }

    pub fn with_separator(mut self, sep: &str) -> Self {
        self.separator = sep.chars().next().unwrap_or('-');
        self
    }

    pub fn add_row(&mut self, row: Vec<String>) {
        self.rows.push(row);
        self.row_colors.push(None);
    }

    pub fn add_colored_row(&mut self, row: Vec<String>, color: &'static str) {
        self.rows.push(row);
        self.row_colors.push(Some(color));
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    fn widths(&self) -> Vec<usize> {
        self.columns
            .iter()
            .enumerate()
            .map(|(i, col)| {
                let content = self
                    .rows
                    .iter()
                    .filter_map(|r| r.get(i))
                    .map(|c| UnicodeWidthStr::width(c.as_str()))
                    .max()
                    .unwrap_or(0);
                content
                    .max(UnicodeWidthStr::width(col.header.as_str()))
                    .min(col.max_width.max(1))
            })
            .collect()
    }

    pub fn render(&self) -> String {
        let widths = self.widths();
        let mut out = String::new();

        // Header
        let header: Vec<String> = self
            .columns
            .iter()
            .zip(&widths)
            .map(|(c, w)| pad(&c.header, *w))
            .collect();
        out.push_str(header.join("  ").trim_end());
        out.push('\n');

        let total: usize = widths.iter().sum::<usize>() + 2 * widths.len().saturating_sub(1);
        out.push_str(&self.separator.to_string().repeat(total));
        out.push('\n');

        // Rows
        for (row, color) in self.rows.iter().zip(&self.row_colors) {
            let wrapped: Vec<Vec<String>> = widths
                .iter()
                .enumerate()
                .map(|(i, w)| {
                    let cell = row.get(i).map(String::as_str).unwrap_or("");
                    if cell.is_empty() {
                        vec![String::new()]
                    } else {
                        textwrap::wrap(cell, *w)
                            .into_iter()
                            .map(|l| l.into_owned())
                            .collect()
                    }
                })
                .collect();

            let height = wrapped.iter().map(Vec::len).max().unwrap_or(1);
            for line in 0..height {
                let cells: Vec<String> = wrapped
                    .iter()
                    .zip(&widths)
                    .map(|(lines, w)| pad(lines.get(line).map(String::as_str).unwrap_or(""), *w))
                    .collect();
                let line = cells.join("  ");
                match color {
                    Some(c) => out.push_str(&format!("{}{}{}", c, line.trim_end(), RESET)),
                    None => out.push_str(line.trim_end()),
                }
                out.push('\n');
            }
        }

        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn columns_fit_content_and_wrap() {
        let mut t = Table::new(vec![Column::new("Time", 5), Column::new("Title", 10)]);
        t.add_row(vec!["09:00".into(), "Breakfast with the mayor".into()]);
        let out = t.render();
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines[0], "Time   Title");
        assert!(lines[2].starts_with("09:00  Breakfast"));
        assert!(lines.len() > 3);
    }

    #[test]
    fn colored_rows_wrap_each_line() {
        let mut t = Table::new(vec![Column::new("Kind", 8)]).with_separator("=");
        t.add_colored_row(vec!["movement".into()], "\x1b[35m");
        let out = t.render();
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines[1], "========");
        assert_eq!(lines[2], "\x1b[35mmovement\x1b[0m");
    }
}
