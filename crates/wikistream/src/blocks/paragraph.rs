//! Paragraph block.
//!
//! The fallback for any non-blank line no other block claims. Emits a
//! `Paragraph` block pair; each line runs through the inline pipeline with
//! a soft `line_break` between adjacent lines, unless the previous line
//! ended with a forced break already emitted by the inline pipeline.
//! Closes on a blank line, at end of input, or when a registered block can
//! start on the current line.

use wikistream_core::{BlockAttributes, BlockType};

use crate::blocks::BlockAction;
use crate::dialect::ParseScope;
use crate::error::Result;
use crate::line::Line;

#[derive(Debug)]
pub struct ParagraphBlock {
    /// The previous line ended with a forced break, which the inline
    /// pipeline already emitted
    forced_break: bool,
}

impl ParagraphBlock {
    pub fn open(line: Line<'_>, scope: &mut ParseScope<'_>) -> Result<Self> {
        scope
            .builder
            .begin_block(BlockType::Paragraph, &BlockAttributes::default())?;
        let text = line.text().trim_end();
        scope.emit_inline(text)?;
        Ok(Self {
            forced_break: ends_with_forced_break(text),
        })
    }

    pub fn process_content(
        &mut self,
        line: Line<'_>,
        scope: &mut ParseScope<'_>,
    ) -> Result<BlockAction> {
        if line.is_blank() {
            return Ok(BlockAction::Close);
        }
        if scope
            .dialect
            .block_kinds()
            .iter()
            .any(|kind| kind.can_start(line))
        {
            return Ok(BlockAction::CloseAndReprocess);
        }
        if !self.forced_break {
            match scope.builder.line_break() {
                Err(error) if error.is_unsupported() => {}
                result => result?,
            }
        }
        let text = line.text().trim_end();
        scope.emit_inline(text)?;
        self.forced_break = ends_with_forced_break(text);
        Ok(BlockAction::Consumed)
    }

    pub fn close(&mut self, scope: &mut ParseScope<'_>) -> Result<()> {
        scope.builder.end_block()?;
        Ok(())
    }
}

/// True when the line carries a trailing ` \` forced-break marker, so the
/// soft break for the following line boundary must not double it
fn ends_with_forced_break(text: &str) -> bool {
    text.ends_with('\\') && text[..text.len() - 1].ends_with([' ', '\t'])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_forced_break_detection() {
        assert!(ends_with_forced_break("wrapped \\"));
        assert!(ends_with_forced_break("wrapped\t\\"));
        assert!(!ends_with_forced_break("no break"));
        assert!(!ends_with_forced_break("escaped\\"));
        assert!(!ends_with_forced_break("\\"));
    }
}
