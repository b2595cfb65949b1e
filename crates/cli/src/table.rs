// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Table rendering for the repository and session pickers.
//!
//! Columns are sized by display width, not byte length, so wide glyphs
//! (emoji, CJK) and zero-width variation selectors line up correctly.
//! `render_lines()` produces the `(header_line, data_lines)` shape the
//! fuzzy-finder driver feeds on stdin; `render()` writes the same layout to
//! an arbitrary sink (used by `list-repos` and `diagnose`).

use std::io::Write;

use cm_core::agent_state::StaleAggregate;
use cm_core::repository::{Repository, RepositorySource};
use unicode_width::UnicodeWidthStr;

use crate::color;

/// Column text alignment.
pub enum Align {
    Left,
    Right,
}

/// How a cell's text is styled after padding.
pub enum CellStyle {
    Plain,
    Muted,
    Status,
}

pub struct Column {
    pub name: &'static str,
    pub align: Align,
    pub style: CellStyle,
    pub min_width: Option<usize>,
    pub max_width: Option<usize>,
}

impl Column {
    pub fn left(name: &'static str) -> Self {
        Self {
            name,
            align: Align::Left,
            style: CellStyle::Plain,
            min_width: None,
            max_width: None,
        }
    }

    pub fn right(name: &'static str) -> Self {
        Self {
            name,
            align: Align::Right,
            style: CellStyle::Plain,
            min_width: None,
            max_width: None,
        }
    }

    pub fn muted(name: &'static str) -> Self {
        Self {
            name,
            align: Align::Left,
            style: CellStyle::Muted,
            min_width: None,
            max_width: None,
        }
    }

    pub fn status(name: &'static str) -> Self {
        Self {
            name,
            align: Align::Left,
            style: CellStyle::Status,
            min_width: None,
            max_width: None,
        }
    }

    pub fn with_max(mut self, max: usize) -> Self {
        self.max_width = Some(max);
        self
    }
}

/// A tabular renderer that auto-computes column widths from data, by
/// display width.
pub struct Table {
    columns: Vec<Column>,
    rows: Vec<Vec<String>>,
    colorize: bool,
}

const SEP: &str = "  ";

impl Table {
    pub fn new(columns: Vec<Column>) -> Self {
        Self {
            columns,
            rows: Vec::new(),
            colorize: color::should_colorize(),
        }
    }

    #[cfg(test)]
    pub fn plain(columns: Vec<Column>) -> Self {
        Self {
            columns,
            rows: Vec::new(),
            colorize: false,
        }
    }

    #[cfg(test)]
    pub fn colored(columns: Vec<Column>) -> Self {
        Self {
            columns,
            rows: Vec::new(),
            colorize: true,
        }
    }

    pub fn row(&mut self, cells: Vec<String>) {
        self.rows.push(cells);
    }

    /// Render the full table (header + rows) to the given writer.
    pub fn render(&self, out: &mut impl Write) {
        let (header, data) = self.render_lines();
        if data.is_empty() {
            return;
        }
        let _ = writeln!(out, "{header}");
        for line in data {
            let _ = writeln!(out, "{line}");
        }
    }

    /// Render as `(header_line, data_lines)`, the shape the fuzzy-finder
    /// driver expects on stdin (`--header-lines=1`). Color is applied after
    /// padding so ANSI escapes never corrupt a width calculation.
    pub fn render_lines(&self) -> (String, Vec<String>) {
        if self.rows.is_empty() {
            return (String::new(), Vec::new());
        }

        let widths = self.compute_widths();
        let colorize = self.colorize;

        let header_cells: Vec<String> = self
            .columns
            .iter()
            .enumerate()
            .map(|(i, col)| {
                let is_last = i == self.columns.len() - 1;
                let w = widths[i];
                let padded = if is_last && matches!(col.align, Align::Left) {
                    col.name.to_string()
                } else {
                    pad(col.name, w, &col.align)
                };
                if colorize {
                    color::apply_header(&padded)
                } else {
                    padded
                }
            })
            .collect();
        let header = header_cells.join(SEP);

        let data = self
            .rows
            .iter()
            .map(|row| {
                let cells: Vec<String> = self
                    .columns
                    .iter()
                    .enumerate()
                    .map(|(i, col)| {
                        let is_last = i == self.columns.len() - 1;
                        let w = widths[i];
                        let raw = row.get(i).map(|s| s.as_str()).unwrap_or("");
                        let truncated = truncate(raw, col.max_width);
                        let padded = if is_last && matches!(col.align, Align::Left) {
                            truncated.to_string()
                        } else {
                            pad(truncated, w, &col.align)
                        };
                        stylize(&padded, &col.style, colorize)
                    })
                    .collect();
                cells.join(SEP)
            })
            .collect();

        (header, data)
    }

    fn compute_widths(&self) -> Vec<usize> {
        self.columns
            .iter()
            .enumerate()
            .map(|(i, col)| {
                let min = col.min_width.unwrap_or_else(|| display_width(col.name));
                let max_data = self
                    .rows
                    .iter()
                    .map(|row| {
                        let raw = row.get(i).map(|s| s.as_str()).unwrap_or("");
                        let w = display_width(raw);
                        match col.max_width {
                            Some(mw) => w.min(mw),
                            None => w,
                        }
                    })
                    .max()
                    .unwrap_or(0);
                min.max(max_data)
            })
            .collect()
    }
}

/// Display width of `s`: wide codepoints (emoji, CJK) count as 2 cells,
/// zero-width codepoints (variation selectors, combining marks) as 0.
pub fn display_width(s: &str) -> usize {
    UnicodeWidthStr::width(s)
}

fn pad(text: &str, width: usize, align: &Align) -> String {
    let w = display_width(text);
    let fill = width.saturating_sub(w);
    match align {
        Align::Left => format!("{text}{}", " ".repeat(fill)),
        Align::Right => format!("{}{text}", " ".repeat(fill)),
    }
}

/// Truncate to at most `max` display-width cells (if set). Truncates on
/// char boundaries, so a truncation point inside a multi-byte glyph backs
/// up to the preceding boundary rather than panicking.
fn truncate(s: &str, max: Option<usize>) -> &str {
    let Some(max) = max else { return s };
    if display_width(s) <= max {
        return s;
    }
    let mut end = 0;
    let mut w = 0;
    for (idx, ch) in s.char_indices() {
        let cw = UnicodeWidthStr::width(ch.to_string().as_str());
        if w + cw > max {
            break;
        }
        w += cw;
        end = idx + ch.len_utf8();
    }
    &s[..end]
}

fn stylize(text: &str, style: &CellStyle, colorize: bool) -> String {
    if !colorize {
        return text.to_string();
    }
    match style {
        CellStyle::Plain => text.to_string(),
        CellStyle::Muted => color::apply_muted(text),
        CellStyle::Status => color::apply_status(text),
    }
}

// --- Spec-specific renderers -----------------------------------------------

/// `TYPE` column label for a [`Repository`], per the creation-flow picker.
pub fn repo_type_label(repo: &Repository) -> &'static str {
    if repo.is_workspace {
        return "📂 workspace";
    }
    match repo.source {
        RepositorySource::Remote => "🐙 remote",
        RepositorySource::Local => "💻 local",
        RepositorySource::Workspace => "📂 workspace",
    }
}

/// Render the repository picker table: `TYPE | ORG/REPO | DESCRIPTION`, each
/// data line suffixed with `[<identifier>]` for selection round-tripping.
pub fn render_repo_table(repos: &[Repository]) -> (String, Vec<String>) {
    let mut table = Table::new(vec![
        Column::left("TYPE"),
        Column::left("ORG/REPO"),
        Column::left("DESCRIPTION"),
    ]);
    for repo in repos {
        table.row(vec![
            repo_type_label(repo).to_string(),
            repo.name.clone(),
            repo.description.clone(),
        ]);
    }
    let (header, mut data) = table.render_lines();
    for (line, repo) in data.iter_mut().zip(repos) {
        line.push_str(&format!(" [{}]", repo.identifier()));
    }
    (header, data)
}

/// One row of the session picker: a stored [`cm_core::Session`] joined with
/// its live multiplexer status, aggregate agent state, and (when
/// resolvable) the originating repository's source kind.
pub struct SessionRow {
    pub index: usize,
    pub name: String,
    pub display_title: String,
    pub mux_alive: bool,
    pub source: Option<RepositorySource>,
    pub repo_display: String,
    pub aggregate: StaleAggregate,
}

fn mux_label(alive: bool) -> &'static str {
    if alive {
        "🟢"
    } else {
        "⚫"
    }
}

fn source_label(source: Option<RepositorySource>) -> &'static str {
    match source {
        Some(RepositorySource::Remote) => "🐙 remote",
        Some(RepositorySource::Local) => "💻 local",
        Some(RepositorySource::Workspace) => "📂 workspace",
        None => "—",
    }
}

/// Render the session picker table: `# | MUX | SOURCE | REPOSITORY | CLAUDE
/// | SESSION`, each data line suffixed with `[<session_name>]`.
pub fn render_session_table(rows: &[SessionRow]) -> (String, Vec<String>) {
    let mut table = Table::new(vec![
        Column::right("#"),
        Column::left("MUX"),
        Column::left("SOURCE"),
        Column::left("REPOSITORY"),
        Column::status("CLAUDE"),
        Column::left("SESSION"),
    ]);
    for row in rows {
        table.row(vec![
            row.index.to_string(),
            mux_label(row.mux_alive).to_string(),
            source_label(row.source).to_string(),
            row.repo_display.clone(),
            format!("{} {}", row.aggregate.state.emoji(), row.aggregate.state.label()),
            row.display_title.clone(),
        ]);
    }
    let (header, mut data) = table.render_lines();
    for (line, row) in data.iter_mut().zip(rows) {
        line.push_str(&format!(" [{}]", row.name));
    }
    (header, data)
}

/// Strip a trailing `[<identifier>]` marker from a selected picker line,
/// returning the identifier alone. Returns `None` if the line has no marker.
pub fn extract_identifier(line: &str) -> Option<&str> {
    let line = line.trim_end();
    let start = line.rfind('[')?;
    let end = line.rfind(']')?;
    if end < start + 1 || end != line.len() - 1 {
        return None;
    }
    Some(&line[start + 1..end])
}

#[cfg(test)]
#[path = "table_tests.rs"]
mod tests;
