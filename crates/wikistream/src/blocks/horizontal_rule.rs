//! Horizontal rule block.
//!
//! A single-line block: the whole line is a run of rule characters,
//! optionally surrounded by whitespace. Emits one `horizontal_rule` leaf
//! event and closes immediately.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::dialect::ParseScope;
use crate::error::Result;
use crate::line::Line;

static RULE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\s*(-{4,}|'{3,}|\*{3,})\s*$").expect("valid pattern"));

pub struct HorizontalRuleBlock;

impl HorizontalRuleBlock {
    pub fn can_start(line: Line<'_>) -> bool {
        RULE.is_match(line.text())
    }

    pub fn emit(scope: &mut ParseScope<'_>) -> Result<()> {
        match scope.builder.horizontal_rule() {
            Err(error) if error.is_unsupported() => Ok(()),
            result => Ok(result?),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rule_recognition() {
        for text in ["----", "-----", "'''", "***", "  ----  "] {
            assert!(HorizontalRuleBlock::can_start(Line::new(text, 0)), "{text}");
        }
        for text in ["---", "''", "--- -", "text ----"] {
            assert!(
                !HorizontalRuleBlock::can_start(Line::new(text, 0)),
                "{text}"
            );
        }
    }
}
