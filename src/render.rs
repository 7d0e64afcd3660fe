//! Terminal presentation: labels, tables, hyperlinks and the browser.

use std::io::IsTerminal;

use colored::{ColoredString, Colorize};

use crate::{Error, Result};

pub const LINE_SEPARATOR: &str = "--------------------------------------";

/// Turn colors off when stdout is not a terminal.
///
/// `NO_COLOR` and `CLICOLOR_FORCE` are honored by `colored` itself.
pub fn init_color() {
    if !std::io::stdout().is_terminal() && std::env::var_os("CLICOLOR_FORCE").is_none() {
        colored::control::set_override(false);
    }
}

/// Whether OSC 8 hyperlinks should be emitted.
pub fn links_enabled() -> bool {
    std::io::stdout().is_terminal() && std::env::var_os("NO_COLOR").is_none()
}

/// Wrap `text` in an OSC 8 hyperlink escape sequence pointing at `url`.
pub fn hyperlink(text: &str, url: &str) -> String {
    format!("\x1b]8;;{url}\x1b\\{text}\x1b]8;;\x1b\\")
}

/// A field label, e.g. `Name:`.
pub fn label(text: &str) -> ColoredString {
    text.cyan()
}

/// A section heading.
pub fn heading(text: &str) -> ColoredString {
    text.bold()
}

/// Open `url` in the default browser.
pub fn open_url(url: &str) -> Result<()> {
    tracing::debug!(url, "opening browser");
    open::that(url).map_err(|e| Error::Browser(e.to_string()))
}

/// One table cell, optionally linked.
#[derive(Debug, Clone)]
pub struct Cell {
    pub text: String,
    pub link: Option<String>,
}

impl Cell {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            link: None,
        }
    }

    pub fn linked(text: impl Into<String>, link: Option<&str>) -> Self {
        Self {
            text: text.into(),
            link: link.map(str::to_string),
        }
    }
}

/// A left-aligned text table.
#[derive(Debug, Clone, Default)]
pub struct Table {
    headers: Vec<String>,
    rows: Vec<Vec<Cell>>,
}

impl Table {
    pub fn new<I, S>(headers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            headers: headers.into_iter().map(Into::into).collect(),
            rows: Vec::new(),
        }
    }

    pub fn push(&mut self, row: Vec<Cell>) {
        self.rows.push(row);
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    fn widths(&self) -> Vec<usize> {
        let mut widths: Vec<usize> = self.headers.iter().map(|h| h.chars().count()).collect();
        for row in &self.rows {
            for (i, cell) in row.iter().enumerate() {
                let len = cell.text.chars().count();
                match widths.get_mut(i) {
                    Some(w) => *w = (*w).max(len),
                    None => widths.push(len),
                }
            }
        }
        widths
    }

    /// Render the table. Links are only emitted when `links` is set.
    pub fn render(&self, links: bool) -> String {
        let widths = self.widths();
        let mut lines = Vec::with_capacity(self.rows.len() + 2);

        let header: Vec<String> = self
            .headers
            .iter()
            .enumerate()
            .map(|(i, h)| format!("{:<width$}", h, width = widths[i]))
            .collect();
        lines.push(header.join("  ").trim_end().bold().to_string());

        let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
        lines.push(rule.join("  "));

        for row in &self.rows {
            let cells: Vec<String> = row
                .iter()
                .enumerate()
                .map(|(i, cell)| {
                    let pad = " ".repeat(widths[i].saturating_sub(cell.text.chars().count()));
                    match (&cell.link, links) {
                        (Some(url), true) => format!("{}{}", hyperlink(&cell.text, url), pad),
                        _ => format!("{}{}", cell.text, pad),
                    }
                })
                .collect();
            lines.push(cells.join("  ").trim_end().to_string());
        }

        lines.join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plain() {
        colored::control::set_override(false);
    }

    #[test]
    fn test_hyperlink_escape() {
        assert_eq!(
            hyperlink("Fix login", "https://app.asana.com/0/1/2"),
            "\x1b]8;;https://app.asana.com/0/1/2\x1b\\Fix login\x1b]8;;\x1b\\"
        );
    }

    #[test]
    fn test_table_aligns_columns() {
        plain();
        let mut table = Table::new(["Name", "Assignee"]);
        table.push(vec![Cell::new("Fix login"), Cell::new("Sam")]);
        table.push(vec![Cell::new("Ship"), Cell::new("")]);

        let rendered = table.render(false);
        let lines: Vec<&str> = rendered.lines().collect();

        assert_eq!(lines[0], "Name       Assignee");
        assert_eq!(lines[1], "---------  --------");
        assert_eq!(lines[2], "Fix login  Sam");
        assert_eq!(lines[3], "Ship");
    }

    #[test]
    fn test_table_links_only_when_enabled() {
        plain();
        let mut table = Table::new(["Name"]);
        table.push(vec![Cell::linked("Fix", Some("https://x"))]);

        assert!(!table.render(false).contains("\x1b]8"));
        assert!(table.render(true).contains(&hyperlink("Fix", "https://x")));
    }

    #[test]
    fn test_table_padding_ignores_link_escapes() {
        plain();
        let mut table = Table::new(["Name", "Who"]);
        table.push(vec![Cell::linked("A", Some("https://x")), Cell::new("Sam")]);
        table.push(vec![Cell::new("Longer"), Cell::new("Kim")]);

        let rendered = table.render(true);
        let first_row = rendered.lines().nth(2).unwrap();

        assert!(first_row.ends_with("     Sam"));
    }
}
