//! Table formatting utilities for CLI list commands
//!
//! One formatter serves all seven list commands. Cells are typed so
//! coloring stays consistent: each command maps its status enum onto a
//! [`Tone`] rather than styling strings ad hoc.

use chrono::{NaiveDate, NaiveTime};
use console::style;

use crate::cli::helpers::{escape_csv, truncate_str};
use crate::cli::OutputFormat;
use crate::core::entity::Priority;
use crate::core::money::Money;

/// Semantic color for a badge cell
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    Plain,
    Dim,
    Good,
    Warn,
    Bad,
    Accent,
}

/// A typed cell value with semantic meaning for formatting
#[derive(Debug, Clone)]
pub enum CellValue {
    /// Record id (cyan)
    Id(String),
    /// Plain text, truncated to the column width
    Text(String),
    /// Status-like value with a tone chosen by the command
    Badge(String, Tone),
    /// Priority with standard color coding
    Priority(Priority),
    /// Monetary amount, grouped and right-aligned
    Money(Money),
    /// Date as YYYY-MM-DD
    Date(NaiveDate),
    /// Optional time as HH:MM
    Time(Option<NaiveTime>),
    /// Numeric value, right-aligned
    Number(i64),
    /// Percentage 0..=100
    Percent(u8),
    /// Empty/placeholder
    Empty,
}

impl CellValue {
    /// Format for TSV output (with colors if terminal)
    pub fn format_tsv(&self, width: usize) -> String {
        match self {
            CellValue::Id(id) => format!("{:<width$}", style(id).cyan(), width = width),
            CellValue::Text(s) => {
                let truncated = truncate_str(s, width.saturating_sub(2));
                format!("{:<width$}", truncated, width = width)
            }
            CellValue::Badge(s, tone) => {
                let styled = match tone {
                    Tone::Plain => style(s).white(),
                    Tone::Dim => style(s).dim(),
                    Tone::Good => style(s).green(),
                    Tone::Warn => style(s).yellow(),
                    Tone::Bad => style(s).red().bold(),
                    Tone::Accent => style(s).cyan(),
                };
                format!("{:<width$}", styled, width = width)
            }
            CellValue::Priority(priority) => {
                let s = priority.to_string();
                let styled = match priority {
                    Priority::Low => style(&s).dim(),
                    Priority::Medium => style(&s).white(),
                    Priority::High => style(&s).yellow(),
                    Priority::Critical => style(&s).red().bold(),
                };
                format!("{:<width$}", styled, width = width)
            }
            CellValue::Money(money) => {
                format!("{:>width$}", money.to_string(), width = width)
            }
            CellValue::Date(d) => {
                format!("{:<width$}", d.format("%Y-%m-%d"), width = width)
            }
            CellValue::Time(t) => match t {
                Some(t) => format!("{:<width$}", t.format("%H:%M"), width = width),
                None => format!("{:<width$}", "-", width = width),
            },
            CellValue::Number(n) => format!("{:>width$}", n, width = width),
            CellValue::Percent(p) => format!("{:>width$}", format!("{}%", p), width = width),
            CellValue::Empty => format!("{:<width$}", "-", width = width),
        }
    }

    /// Format for CSV output (RFC 4180, no colors)
    pub fn format_csv(&self) -> String {
        match self {
            CellValue::Id(id) => escape_csv(id),
            CellValue::Text(s) => escape_csv(s),
            CellValue::Badge(s, _) => escape_csv(s),
            CellValue::Priority(priority) => priority.to_string(),
            CellValue::Money(money) => escape_csv(&money.to_string()),
            CellValue::Date(d) => d.format("%Y-%m-%d").to_string(),
            CellValue::Time(t) => t.map(|t| t.format("%H:%M").to_string()).unwrap_or_default(),
            CellValue::Number(n) => n.to_string(),
            CellValue::Percent(p) => format!("{}", p),
            CellValue::Empty => String::new(),
        }
    }

    /// Format for Markdown output (no colors, escaped pipes)
    pub fn format_md(&self) -> String {
        self.raw().replace('|', "\\|")
    }

    /// Get raw string value (no formatting)
    pub fn raw(&self) -> String {
        match self {
            CellValue::Id(id) => id.clone(),
            CellValue::Text(s) => s.clone(),
            CellValue::Badge(s, _) => s.clone(),
            CellValue::Priority(priority) => priority.to_string(),
            CellValue::Money(money) => money.to_string(),
            CellValue::Date(d) => d.format("%Y-%m-%d").to_string(),
            CellValue::Time(t) => t
                .map(|t| t.format("%H:%M").to_string())
                .unwrap_or_else(|| "-".to_string()),
            CellValue::Number(n) => n.to_string(),
            CellValue::Percent(p) => format!("{}%", p),
            CellValue::Empty => "-".to_string(),
        }
    }

    /// Display width of this cell's content (for dynamic column sizing)
    pub fn display_width(&self) -> usize {
        match self {
            CellValue::Time(None) | CellValue::Empty => 1,
            CellValue::Date(_) => 10,
            CellValue::Time(Some(_)) => 5,
            other => other.raw().len(),
        }
    }
}

/// Column definition with header label and maximum width
#[derive(Debug, Clone)]
pub struct ColumnDef {
    pub key: &'static str,
    pub header: &'static str,
    pub width: usize,
}

impl ColumnDef {
    pub const fn new(key: &'static str, header: &'static str, width: usize) -> Self {
        Self { key, header, width }
    }
}

/// A row of cell values for table output
pub struct TableRow {
    pub full_id: String,
    pub cells: Vec<(&'static str, CellValue)>,
}

impl TableRow {
    pub fn new(full_id: String) -> Self {
        Self {
            full_id,
            cells: Vec::new(),
        }
    }

    pub fn cell(mut self, key: &'static str, value: CellValue) -> Self {
        self.cells.push((key, value));
        self
    }

    pub fn get(&self, key: &str) -> Option<&CellValue> {
        self.cells.iter().find(|(k, _)| *k == key).map(|(_, v)| v)
    }
}

/// Table formatter that outputs rows in various formats
pub struct TableFormatter<'a> {
    columns: &'a [ColumnDef],
    entity_name: &'static str,
    show_summary: bool,
}

impl<'a> TableFormatter<'a> {
    pub fn new(columns: &'a [ColumnDef], entity_name: &'static str) -> Self {
        Self {
            columns,
            entity_name,
            show_summary: true,
        }
    }

    /// Disable the trailing "N found" summary line (for piping or --quiet)
    pub fn without_summary(mut self) -> Self {
        self.show_summary = false;
        self
    }

    /// Output rows in the specified format
    pub fn output<I>(&self, rows: I, format: OutputFormat)
    where
        I: IntoIterator<Item = TableRow>,
    {
        let rows: Vec<TableRow> = rows.into_iter().collect();

        match format {
            OutputFormat::Csv => self.output_csv(&rows),
            OutputFormat::Md => self.output_md(&rows),
            OutputFormat::Id => self.output_ids(&rows),
            _ => self.output_tsv(&rows),
        }
    }

    /// Calculate dynamic column widths based on actual content
    fn calculate_widths(&self, rows: &[TableRow]) -> Vec<usize> {
        let mut widths = Vec::new();

        // ID column first
        let id_width = rows
            .iter()
            .map(|r| r.full_id.len())
            .max()
            .unwrap_or(2)
            .max(2);
        widths.push(id_width);

        for col in self.columns {
            let header_len = col.header.len();
            let max_content = rows
                .iter()
                .filter_map(|r| r.get(col.key))
                .map(|v| v.display_width())
                .max()
                .unwrap_or(0);

            let natural = header_len.max(max_content.saturating_add(2));
            widths.push(natural.min(col.width));
        }

        widths
    }

    fn output_tsv(&self, rows: &[TableRow]) {
        let widths = self.calculate_widths(rows);

        let mut header_parts = vec![format!(
            "{:<width$}",
            style("ID").bold().dim(),
            width = widths[0]
        )];
        for (i, col) in self.columns.iter().enumerate() {
            header_parts.push(format!(
                "{:<width$}",
                style(col.header).bold(),
                width = widths[i + 1]
            ));
        }
        println!("{}", header_parts.join(" "));

        let total_width: usize = widths.iter().sum::<usize>() + widths.len() - 1;
        println!("{}", "-".repeat(total_width));

        for row in rows {
            let mut row_parts = vec![format!(
                "{:<width$}",
                style(&row.full_id).cyan(),
                width = widths[0]
            )];
            for (i, col) in self.columns.iter().enumerate() {
                let w = widths[i + 1];
                match row.get(col.key) {
                    Some(value) => row_parts.push(value.format_tsv(w)),
                    None => row_parts.push(format!("{:<width$}", "-", width = w)),
                }
            }
            println!("{}", row_parts.join(" "));
        }

        if self.show_summary {
            println!();
            println!("{} {}(s) found", style(rows.len()).cyan(), self.entity_name);
        }
    }

    fn output_csv(&self, rows: &[TableRow]) {
        let mut headers = vec!["id".to_string()];
        for col in self.columns {
            headers.push(col.key.to_string());
        }
        println!("{}", headers.join(","));

        for row in rows {
            let mut values = vec![escape_csv(&row.full_id)];
            for col in self.columns {
                match row.get(col.key) {
                    Some(value) => values.push(value.format_csv()),
                    None => values.push(String::new()),
                }
            }
            println!("{}", values.join(","));
        }
    }

    fn output_md(&self, rows: &[TableRow]) {
        let mut headers = vec!["ID".to_string()];
        for col in self.columns {
            headers.push(col.header.to_string());
        }
        println!("| {} |", headers.join(" | "));

        let separators: Vec<&str> = headers.iter().map(|_| "---").collect();
        println!("|{}|", separators.join("|"));

        for row in rows {
            let mut values = vec![row.full_id.clone()];
            for col in self.columns {
                match row.get(col.key) {
                    Some(value) => values.push(value.format_md()),
                    None => values.push("-".to_string()),
                }
            }
            println!("| {} |", values.join(" | "));
        }
    }

    fn output_ids(&self, rows: &[TableRow]) {
        for row in rows {
            println!("{}", row.full_id);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cell_value_text_format() {
        let cell = CellValue::Text("Hello World".to_string());
        assert!(cell.format_tsv(20).contains("Hello World"));
        assert_eq!(cell.format_csv(), "Hello World");
        assert_eq!(cell.format_md(), "Hello World");
    }

    #[test]
    fn test_cell_value_money_raw() {
        let cell = CellValue::Money(Money::aed(1_500_000));
        assert_eq!(cell.raw(), "AED 1,500,000");
        // Grouped amounts contain commas, so CSV must quote them
        assert_eq!(cell.format_csv(), "\"AED 1,500,000\"");
    }

    #[test]
    fn test_cell_value_md_escapes_pipes() {
        let cell = CellValue::Text("a|b".to_string());
        assert_eq!(cell.format_md(), "a\\|b");
    }

    #[test]
    fn test_cell_value_percent() {
        let cell = CellValue::Percent(70);
        assert_eq!(cell.raw(), "70%");
        assert_eq!(cell.format_csv(), "70");
    }

    #[test]
    fn test_table_row_builder() {
        let row = TableRow::new("L001".to_string())
            .cell("name", CellValue::Text("Fatima".to_string()))
            .cell("status", CellValue::Badge("qualified".to_string(), Tone::Good));

        assert_eq!(row.full_id, "L001");
        assert!(row.get("name").is_some());
        assert!(row.get("missing").is_none());
    }
}
