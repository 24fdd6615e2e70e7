//! The document event sink contract.
//!
//! A [`DocumentBuilder`] receives the structural events produced by a parse:
//! a `begin_document`/`end_document` pair wrapping everything, well-nested
//! `begin_block`/`end_block`, `begin_span`/`end_span` and
//! `begin_heading`/`end_heading` pairs, and leaf events that carry no
//! children (`characters`, `link`, `image`, ...).
//!
//! `characters` makes escaping of output-unsafe content the sink's
//! responsibility; `characters_unescaped` bypasses escaping and the caller
//! guarantees safety.
//!
//! A sink may refuse an event it cannot represent by returning
//! [`BuilderError::Unsupported`]. Callers must treat this as a
//! feature-not-supported signal and fall back to a degraded representation,
//! never as a parse failure.

use crate::attributes::{Attributes, BlockAttributes, ImageAttributes, LinkAttributes};

/// Kinds of structural blocks
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockType {
    Paragraph,
    Quote,
    Code,
    Preformatted,
    Table,
    TableRow,
    TableCellHeader,
    TableCellNormal,
}

/// Kinds of inline spans
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpanType {
    Emphasis,
    Strong,
    Code,
    Monospace,
    /// Generic styled span with no intrinsic semantics
    Span,
}

/// Error type for sink operations
#[derive(Debug, Clone, thiserror::Error)]
pub enum BuilderError {
    /// The sink cannot represent the requested event. Not a parse error:
    /// callers substitute a degraded representation.
    #[error("unsupported document event: {event}")]
    Unsupported { event: &'static str },

    /// The sink failed to produce output
    #[error("output error: {0}")]
    Output(String),
}

impl BuilderError {
    pub fn unsupported(event: &'static str) -> Self {
        BuilderError::Unsupported { event }
    }

    /// True for capability refusals that callers may degrade around
    pub fn is_unsupported(&self) -> bool {
        matches!(self, BuilderError::Unsupported { .. })
    }
}

pub type BuilderResult = std::result::Result<(), BuilderError>;

/// Stateful receiver of document structure events.
///
/// Implementations must tolerate any well-nested call sequence; they are
/// not required to support every leaf event (see [`BuilderError`]).
pub trait DocumentBuilder {
    fn begin_document(&mut self) -> BuilderResult;
    fn end_document(&mut self) -> BuilderResult;

    fn begin_block(&mut self, block_type: BlockType, attributes: &BlockAttributes) -> BuilderResult;
    fn end_block(&mut self) -> BuilderResult;

    fn begin_span(&mut self, span_type: SpanType, attributes: &Attributes) -> BuilderResult;
    fn end_span(&mut self) -> BuilderResult;

    fn begin_heading(&mut self, level: u8, attributes: &Attributes) -> BuilderResult;
    fn end_heading(&mut self) -> BuilderResult;

    /// Text content; the sink escapes output-unsafe characters
    fn characters(&mut self, text: &str) -> BuilderResult;

    /// Raw content emitted without escaping; the caller guarantees safety
    fn characters_unescaped(&mut self, literal: &str) -> BuilderResult;

    /// Named character entity, e.g. `copy` for `&copy;`
    fn entity_reference(&mut self, entity: &str) -> BuilderResult;

    fn link(&mut self, attributes: &LinkAttributes, href: &str, text: &str) -> BuilderResult;

    fn image(&mut self, attributes: &ImageAttributes, url: &str) -> BuilderResult;

    /// An image wrapped in a hyperlink
    fn image_link(
        &mut self,
        link_attributes: &LinkAttributes,
        image_attributes: &ImageAttributes,
        href: &str,
        image_url: &str,
    ) -> BuilderResult;

    fn acronym(&mut self, text: &str, definition: &str) -> BuilderResult;

    fn line_break(&mut self) -> BuilderResult;

    fn horizontal_rule(&mut self) -> BuilderResult;
}
