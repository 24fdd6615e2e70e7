//! Property line block.
//!
//! A line of the form `[cols=3,options=header]` declares properties for
//! the block that follows. The line emits nothing; its key/value pairs
//! become the context's pending property map, consumed (and cleared) by
//! the next property-aware block. Values may be double-quoted to contain
//! commas, with `""` decoding to a literal quote.

use indexmap::IndexMap;
use once_cell::sync::Lazy;
use regex::Regex;

use crate::dialect::ParseScope;
use crate::error::Result;
use crate::line::Line;

// The first key must look like an identifier so a bracketed link sitting
// alone on a line is not mistaken for a property map
static PROPERTY_LINE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\[\s*[A-Za-z][A-Za-z0-9_.-]*\s*=.*\]\s*$").expect("valid pattern")
});

pub struct PropertyLineBlock;

impl PropertyLineBlock {
    pub fn can_start(line: Line<'_>) -> bool {
        PROPERTY_LINE.is_match(line.text())
    }

    pub fn consume(line: Line<'_>, scope: &mut ParseScope<'_>) -> Result<()> {
        let text = line.text().trim();
        let inner = &text[1..text.rfind(']').unwrap_or(text.len())];
        scope.ctx.set_last_properties(parse_properties(inner));
        Ok(())
    }
}

/// Split `key=value,key2="v,2"` into a map, respecting quoted values
fn parse_properties(inner: &str) -> IndexMap<String, String> {
    let mut properties = IndexMap::new();
    for item in split_unquoted_commas(inner) {
        let Some((key, value)) = item.split_once('=') else {
            continue;
        };
        let key = key.trim();
        if key.is_empty() {
            continue;
        }
        let value = value.trim();
        let value = if value.len() >= 2 && value.starts_with('"') && value.ends_with('"') {
            value[1..value.len() - 1].replace("\"\"", "\"")
        } else {
            value.to_string()
        };
        properties.insert(key.to_string(), value);
    }
    properties
}

fn split_unquoted_commas(text: &str) -> Vec<&str> {
    let mut items = Vec::new();
    let mut quotes = 0usize;
    let mut start = 0;
    for (index, byte) in text.bytes().enumerate() {
        match byte {
            b'"' => quotes += 1,
            b',' if quotes % 2 == 0 => {
                items.push(&text[start..index]);
                start = index + 1;
            }
            _ => {}
        }
    }
    items.push(&text[start..]);
    items
}
