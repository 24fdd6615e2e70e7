//! Heading block.
//!
//! One-line headings marked by a run of `=` signs: `= Title` is level 1,
//! `====== Title` level 6. The title text runs through the dialect's
//! inline pipeline.

use once_cell::sync::Lazy;
use regex::Regex;
use wikistream_core::Attributes;

use crate::dialect::ParseScope;
use crate::error::Result;
use crate::line::Line;

static HEADING: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(={1,6})\s+(\S.*?)\s*$").expect("valid pattern"));

pub struct HeadingBlock;

impl HeadingBlock {
    pub fn can_start(line: Line<'_>) -> bool {
        HEADING.is_match(line.text())
    }

    pub fn emit(line: Line<'_>, scope: &mut ParseScope<'_>) -> Result<()> {
        let Some(captures) = HEADING.captures(line.text()) else {
            // can_start said yes; degrade rather than drop the line
            return scope.emit_inline(line.text());
        };
        let level = captures[1].len() as u8;
        let title = captures.get(2).map_or("", |m| m.as_str());

        scope.builder.begin_heading(level, &Attributes::default())?;
        scope.emit_inline(title)?;
        scope.builder.end_heading()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_heading_recognition() {
        assert!(HeadingBlock::can_start(Line::new("= Title", 0)));
        assert!(HeadingBlock::can_start(Line::new("=== Sub", 0)));
        assert!(!HeadingBlock::can_start(Line::new("=Title", 0)));
        assert!(!HeadingBlock::can_start(Line::new("======= Deep", 0)));
        assert!(!HeadingBlock::can_start(Line::new("= ", 0)));
    }
}
