//! Table block.
//!
//! Opened by a `|===`, `:===` or `,===` delimiter line and closed by the
//! next delimiter line of any of the three families (or end of input).
//! Three wire variants share the state machine: prefix-separated (`|`,
//! the default), delimiter-separated (`:`) and comma-separated (`,`).
//! The shorthand delimiters `,===` and `:===` imply csv/dsv format with a
//! header row; an explicit property map on the preceding line can override
//! format, separator, column schema, header option and table width.

use once_cell::sync::Lazy;
use regex::Regex;
use wikistream_core::{BlockType, TableAttributes, TableCellAttributes, TableRowAttributes};

use crate::blocks::BlockAction;
use crate::dialect::ParseScope;
use crate::error::Result;
use crate::line::Line;

static TABLE_DELIMITER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(\||,|:)===\s*$").expect("valid pattern"));

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TableFormat {
    /// psv: cells prefixed by the separator, `|` by default
    PrefixSeparated,
    /// dsv: cells delimited by `:`
    DelimiterSeparated,
    /// csv: comma-separated with double-quoted fields
    CommaSeparated,
}

/// State machine for one table region
#[derive(Debug)]
pub struct TableBlock {
    format: TableFormat,
    separator: String,
    /// Column schema; empty until declared via `cols` or discovered from
    /// the first completed row
    cols: Vec<TableCellAttributes>,
    has_header: bool,
    /// Count of cells closed so far
    cells_count: usize,
    cell_open: bool,
}

impl TableBlock {
    pub fn can_start(line: Line<'_>) -> bool {
        TABLE_DELIMITER.is_match(line.text())
    }

    /// Open the table: interpret the shorthand delimiter, consume the
    /// pending property map and emit the `TABLE` begin event.
    pub fn open(line: Line<'_>, scope: &mut ParseScope<'_>) -> Result<Self> {
        let (mut format, mut has_header) = match line.text().chars().next() {
            // ",===" is the shorthand for [format=csv, options=header]
            Some(',') => (TableFormat::CommaSeparated, true),
            // ":===" is the shorthand for [format=dsv, options=header]
            Some(':') => (TableFormat::DelimiterSeparated, true),
            _ => (TableFormat::PrefixSeparated, false),
        };
        let mut separator = "|".to_string();

        let properties = scope.ctx.take_last_properties();
        let cols = parse_cols_attribute(properties.get("cols").map(String::as_str));

        match properties.get("format").map(String::as_str) {
            Some("psv") => format = TableFormat::PrefixSeparated,
            Some("dsv") => format = TableFormat::DelimiterSeparated,
            Some("csv") => format = TableFormat::CommaSeparated,
            _ => {}
        }
        if let Some(custom) = properties.get("separator") {
            separator = custom.clone();
        }
        if let Some(options) = properties.get("options") {
            has_header = options.contains("header");
        }

        let table_attributes = TableAttributes {
            width: properties.get("width").cloned(),
            ..Default::default()
        };
        scope
            .builder
            .begin_block(BlockType::Table, &table_attributes.into())?;

        Ok(Self {
            format,
            separator,
            cols,
            has_header,
            cells_count: 0,
            cell_open: false,
        })
    }

    pub fn process_content(
        &mut self,
        line: Line<'_>,
        scope: &mut ParseScope<'_>,
    ) -> Result<BlockAction> {
        if TABLE_DELIMITER.is_match(line.text()) {
            return Ok(BlockAction::Close);
        }
        let text = line.text();
        if text.trim().is_empty() {
            return Ok(BlockAction::Consumed);
        }

        // With no declared schema, the row for the first content opens
        // here and closes only when the schema becomes known or the table
        // ends
        if !self.cols_known() && !self.cell_open {
            scope
                .builder
                .begin_block(BlockType::TableRow, &TableRowAttributes::default().into())?;
        }

        let separators = self.separator_ranges(text);
        let mut first_cell_in_line = true;
        let mut offset = 0;
        for index in 0..=separators.len() {
            let end = separators
                .get(index)
                .map(|&(start, _)| start)
                .unwrap_or(text.len());
            let cell_content = &text[offset..end];

            if offset == 0 && self.format == TableFormat::PrefixSeparated {
                // In prefix mode, content before the first separator is a
                // wrapped continuation of the still-open cell
                if !cell_content.is_empty() {
                    if self.cell_open {
                        self.append_cell_content(cell_content, scope)?;
                    } else {
                        self.handle_cell_content(cell_content, scope)?;
                    }
                    first_cell_in_line = false;
                }
            } else {
                // When a second row begins, the first row's width becomes
                // the column schema for the whole table
                if !self.cols_known() && first_cell_in_line && self.cell_open {
                    self.cols = default_cols(self.cells_count + 1);
                }
                self.handle_cell_content(cell_content, scope)?;
                first_cell_in_line = false;
            }
            offset = separators
                .get(index)
                .map(|&(_, sep_end)| sep_end)
                .unwrap_or(text.len());
        }
        Ok(BlockAction::Consumed)
    }

    /// Close any still-open cell and partial row, then the table itself.
    /// A table with no content lines still emits a well-formed empty pair.
    pub fn close(&mut self, scope: &mut ParseScope<'_>) -> Result<()> {
        self.close_cell_if_needed(scope)?;
        let partial_row = if self.cols_known() {
            self.cells_count % self.cols.len() != 0
        } else {
            self.cells_count > 0
        };
        if partial_row {
            scope.builder.end_block()?; // table row
        }
        scope.builder.end_block()?; // table
        Ok(())
    }

    fn cols_known(&self) -> bool {
        !self.cols.is_empty()
    }

    fn is_first_row(&self) -> bool {
        !self.cols_known() || self.cells_count < self.cols.len()
    }

    /// Separator match ranges within one line. Comma mode respects
    /// double-quoted fields; the other modes treat a backslash-escaped
    /// separator as literal content.
    fn separator_ranges(&self, text: &str) -> Vec<(usize, usize)> {
        let mut ranges = Vec::new();
        match self.format {
            TableFormat::CommaSeparated => {
                // Quote parity is counted to the left of each comma; a
                // trailing-context check counting quotes to the right
                // would agree on every balanced row and differ only on
                // rows with an unbalanced quote, where either split is
                // literal-text degradation anyway
                let mut quotes = 0usize;
                for (index, byte) in text.bytes().enumerate() {
                    match byte {
                        b'"' => quotes += 1,
                        b',' if quotes % 2 == 0 => ranges.push((index, index + 1)),
                        _ => {}
                    }
                }
            }
            _ => {
                let separator = self.cell_separator();
                if separator.is_empty() {
                    return ranges;
                }
                for (index, matched) in text.match_indices(separator) {
                    if index > 0 && text.as_bytes()[index - 1] == b'\\' {
                        continue;
                    }
                    ranges.push((index, index + matched.len()));
                }
            }
        }
        ranges
    }

    fn cell_separator(&self) -> &str {
        match self.format {
            TableFormat::CommaSeparated => ",",
            TableFormat::DelimiterSeparated => ":",
            TableFormat::PrefixSeparated => &self.separator,
        }
    }

    /// Start a new cell: close the previous one, open a row when the cell
    /// counter wraps, pick header or normal kind, and emit the content
    /// through the dialect's inline pipeline.
    fn handle_cell_content(&mut self, full_content: &str, scope: &mut ParseScope<'_>) -> Result<()> {
        self.close_cell_if_needed(scope)?;

        let trimmed = full_content.trim();
        let content = match self.format {
            TableFormat::CommaSeparated => decode_quoted(trimmed),
            _ => {
                let separator = self.cell_separator();
                trimmed.replace(&format!("\\{separator}"), separator)
            }
        };

        if self.cols_known() && self.cells_count % self.cols.len() == 0 {
            scope
                .builder
                .begin_block(BlockType::TableRow, &TableRowAttributes::default().into())?;
        }

        let attributes = if self.cols_known() {
            self.cols[self.cells_count % self.cols.len()].clone()
        } else {
            TableCellAttributes::default()
        };
        let cell_type = if self.has_header && self.is_first_row() {
            BlockType::TableCellHeader
        } else {
            BlockType::TableCellNormal
        };
        scope.builder.begin_block(cell_type, &attributes.into())?;
        self.cell_open = true;

        scope.emit_inline(&content)
    }

    /// Wrapped continuation line in prefix mode: append to the open cell
    fn append_cell_content(&mut self, content: &str, scope: &mut ParseScope<'_>) -> Result<()> {
        scope.emit_inline(&format!(" {}", content.trim()))
    }

    fn close_cell_if_needed(&mut self, scope: &mut ParseScope<'_>) -> Result<()> {
        if self.cell_open {
            scope.builder.end_block()?; // table cell
            self.cell_open = false;
            self.cells_count += 1;
            if self.cols_known() && self.cells_count % self.cols.len() == 0 {
                scope.builder.end_block()?; // table row
            }
        }
        Ok(())
    }
}

/// Strip one level of surrounding quotes from a csv cell and decode
/// doubled quotes
fn decode_quoted(content: &str) -> String {
    if content.len() >= 2 && content.starts_with('"') && content.ends_with('"') {
        content[1..content.len() - 1].replace("\"\"", "\"")
    } else {
        content.to_string()
    }
}

fn default_cols(count: usize) -> Vec<TableCellAttributes> {
    vec![TableCellAttributes::default(); count]
}

/// Parse a `cols` property into a column schema.
///
/// Accepted forms: a bare count (`3`), a comma-separated list of specs
/// (`1,2,1`), and a multiplier (`3*`, `2*1`). A spec may carry a leading
/// alignment marker (`<`, `^`, `>`) and a relative width.
fn parse_cols_attribute(value: Option<&str>) -> Vec<TableCellAttributes> {
    let Some(value) = value.map(str::trim).filter(|v| !v.is_empty()) else {
        return Vec::new();
    };
    if let Ok(count) = value.parse::<usize>() {
        return default_cols(count);
    }
    let mut cols = Vec::new();
    for item in value.split(',') {
        let item = item.trim();
        let (repeat, spec) = match item.split_once('*') {
            Some((count, rest)) => (count.trim().parse::<usize>().unwrap_or(1), rest.trim()),
            None => (1, item),
        };
        let cell = cell_from_spec(spec);
        for _ in 0..repeat {
            cols.push(cell.clone());
        }
    }
    cols
}

fn cell_from_spec(spec: &str) -> TableCellAttributes {
    let mut cell = TableCellAttributes::default();
    let rest = if let Some(stripped) = spec.strip_prefix('<') {
        cell.align = Some("left".to_string());
        stripped
    } else if let Some(stripped) = spec.strip_prefix('^') {
        cell.align = Some("center".to_string());
        stripped
    } else if let Some(stripped) = spec.strip_prefix('>') {
        cell.align = Some("right".to_string());
        stripped
    } else {
        spec
    };
    if !rest.is_empty() && rest.bytes().all(|b| b.is_ascii_digit()) {
        cell.width = Some(rest.to_string());
    }
    cell
}

// Delimiter recognition is shared with the dialect's dispatch; the state
// machine tests live in dialect.rs where a full parse can drive them.
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_delimiter_recognition() {
        for text in ["|===", ",===", ":===", "|===  "] {
            assert!(TableBlock::can_start(Line::new(text, 0)), "{text}");
        }
        for text in ["|====", "===", "x|===", "| ==="] {
            assert!(!TableBlock::can_start(Line::new(text, 0)), "{text}");
        }
    }

    #[test]
    fn test_parse_cols_count() {
        assert_eq!(parse_cols_attribute(Some("3")).len(), 3);
        assert!(parse_cols_attribute(None).is_empty());
        assert!(parse_cols_attribute(Some("  ")).is_empty());
    }

    #[test]
    fn test_parse_cols_widths_and_alignment() {
        let cols = parse_cols_attribute(Some("<1,^2,>1"));
        assert_eq!(cols.len(), 3);
        assert_eq!(cols[0].align.as_deref(), Some("left"));
        assert_eq!(cols[1].align.as_deref(), Some("center"));
        assert_eq!(cols[1].width.as_deref(), Some("2"));
        assert_eq!(cols[2].align.as_deref(), Some("right"));
    }

    #[test]
    fn test_parse_cols_multiplier() {
        assert_eq!(parse_cols_attribute(Some("3*")).len(), 3);
        let cols = parse_cols_attribute(Some("2*1"));
        assert_eq!(cols.len(), 2);
        assert_eq!(cols[0].width.as_deref(), Some("1"));
    }

    #[test]
    fn test_decode_quoted() {
        assert_eq!(decode_quoted("\"a,b\""), "a,b");
        assert_eq!(decode_quoted("\"a\"\"b\""), "a\"b");
        assert_eq!(decode_quoted("plain"), "plain");
        assert_eq!(decode_quoted("\""), "\"");
    }
}
