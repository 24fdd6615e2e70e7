//! Block state machines.
//!
//! Every block passes through Unopened → Open → Closed. A [`BlockKind`]
//! is the unopened side: a pure start predicate plus the transition that
//! either consumes a single-line block outright or produces an Open
//! [`BlockState`]. Open blocks receive each following line and answer
//! with a [`BlockAction`]; closing emits the matching end event and winds
//! down any uncommitted sub-structure.
//!
//! Kinds form a closed set dispatched by `match`, so a dialect author
//! adding a kind gets exhaustiveness checking instead of a virtual
//! override surface.

mod heading;
mod horizontal_rule;
mod paragraph;
mod properties;
mod reference_definition;
mod table;

pub use heading::HeadingBlock;
pub use horizontal_rule::HorizontalRuleBlock;
pub use paragraph::ParagraphBlock;
pub use properties::PropertyLineBlock;
pub use reference_definition::ReferenceDefinitionBlock;
pub use table::TableBlock;

use crate::dialect::ParseScope;
use crate::error::Result;
use crate::line::Line;

/// Registered block kinds, tested in registration order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockKind {
    Table,
    HorizontalRule,
    Heading,
    PropertyLine,
    ReferenceDefinition,
}

impl BlockKind {
    /// Pure start predicate; must not mutate shared state on a negative
    /// result
    pub fn can_start(&self, line: Line<'_>) -> bool {
        match self {
            BlockKind::Table => TableBlock::can_start(line),
            BlockKind::HorizontalRule => HorizontalRuleBlock::can_start(line),
            BlockKind::Heading => HeadingBlock::can_start(line),
            BlockKind::PropertyLine => PropertyLineBlock::can_start(line),
            BlockKind::ReferenceDefinition => ReferenceDefinitionBlock::can_start(line),
        }
    }

    /// Open the block on its start line. Single-line kinds consume the
    /// line and return `None`; multi-line kinds return their Open state.
    pub(crate) fn open(
        &self,
        line: Line<'_>,
        scope: &mut ParseScope<'_>,
    ) -> Result<Option<BlockState>> {
        match self {
            BlockKind::Table => Ok(Some(BlockState::Table(TableBlock::open(line, scope)?))),
            BlockKind::HorizontalRule => {
                HorizontalRuleBlock::emit(scope)?;
                Ok(None)
            }
            BlockKind::Heading => {
                HeadingBlock::emit(line, scope)?;
                Ok(None)
            }
            BlockKind::PropertyLine => {
                PropertyLineBlock::consume(line, scope)?;
                Ok(None)
            }
            BlockKind::ReferenceDefinition => {
                ReferenceDefinitionBlock::record(line, scope.ctx);
                Ok(None)
            }
        }
    }
}

/// What an Open block decided about the line it was offered
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum BlockAction {
    /// The line belongs to this block
    Consumed,
    /// The line ends this block and is consumed by it (e.g. a closing
    /// delimiter or the blank line ending a paragraph)
    Close,
    /// This block ends, and the line must be dispatched again
    CloseAndReprocess,
}

/// An Open multi-line block
#[derive(Debug)]
pub(crate) enum BlockState {
    Table(TableBlock),
    Paragraph(ParagraphBlock),
}

impl BlockState {
    pub(crate) fn process_content(
        &mut self,
        line: Line<'_>,
        scope: &mut ParseScope<'_>,
    ) -> Result<BlockAction> {
        match self {
            BlockState::Table(table) => table.process_content(line, scope),
            BlockState::Paragraph(paragraph) => paragraph.process_content(line, scope),
        }
    }

    pub(crate) fn close(&mut self, scope: &mut ParseScope<'_>) -> Result<()> {
        match self {
            BlockState::Table(table) => table.close(scope),
            BlockState::Paragraph(paragraph) => paragraph.close(scope),
        }
    }
}
