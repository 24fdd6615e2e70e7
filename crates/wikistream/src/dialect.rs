//! Dialects and the parse loop.
//!
//! A [`Dialect`] is an immutable description of a markup grammar: its
//! block kinds in dispatch order, its inline elements in priority order,
//! and whether the document needs a reference-collection pass before the
//! main one. A dialect is cheap to clone and safe to share; all mutable
//! parse state lives in a per-invocation `ProcessingContext` and an
//! internal parser, so one dialect instance can serve concurrent parses.
//!
//! [`Dialect::parse`] drives the line loop: while a block is open the
//! line is offered to it first, otherwise the registered kinds are tried
//! in order, and any non-blank line nobody claims falls back to a
//! paragraph.

use wikistream_core::DocumentBuilder;

use crate::blocks::{BlockAction, BlockKind, BlockState, ParagraphBlock, ReferenceDefinitionBlock};
use crate::context::ProcessingContext;
use crate::error::Result;
use crate::inline::{self, InlineElement};
use crate::line::LineSequence;

/// Everything a block or inline operation may touch during a parse: the
/// (shared, immutable) dialect, the per-parse context, and the sink.
pub struct ParseScope<'a> {
    pub(crate) dialect: &'a Dialect,
    pub(crate) ctx: &'a mut ProcessingContext,
    pub(crate) builder: &'a mut dyn DocumentBuilder,
}

impl ParseScope<'_> {
    /// Run `text` through the dialect's inline pipeline into the sink
    pub fn emit_inline(&mut self, text: &str) -> Result<()> {
        inline::emit_line(self.dialect.inline_elements(), self.ctx, self.builder, text)
    }
}

/// An immutable markup grammar description
#[derive(Debug, Clone)]
pub struct Dialect {
    name: String,
    blocks: Vec<BlockKind>,
    inline_elements: Vec<InlineElement>,
    two_pass: bool,
}

impl Dialect {
    /// An empty dialect: no blocks, no inline elements. Every non-blank
    /// line becomes paragraph content.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            blocks: Vec::new(),
            inline_elements: Vec::new(),
            two_pass: false,
        }
    }

    /// Append a block kind; earlier registrations are tried first
    pub fn with_block(mut self, kind: BlockKind) -> Self {
        self.blocks.push(kind);
        self
    }

    /// Append an inline element; earlier registrations win offset ties
    pub fn with_inline(mut self, element: InlineElement) -> Self {
        self.inline_elements.push(element);
        self
    }

    /// Collect reference definitions in a pre-pass so usages may precede
    /// their definition
    pub fn two_pass(mut self, two_pass: bool) -> Self {
        self.two_pass = two_pass;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn block_kinds(&self) -> &[BlockKind] {
        &self.blocks
    }

    pub fn inline_elements(&self) -> &[InlineElement] {
        &self.inline_elements
    }

    pub fn is_two_pass(&self) -> bool {
        self.two_pass
    }

    /// The stock dialect: tables, horizontal rules, headings, property
    /// lines, and the link/entity/image/line-break inline set.
    pub fn wikistream() -> Self {
        Self::new("wikistream")
            .with_block(BlockKind::PropertyLine)
            .with_block(BlockKind::Table)
            .with_block(BlockKind::HorizontalRule)
            .with_block(BlockKind::Heading)
            .with_inline(inline::external_link())
            .with_inline(inline::entity_reference())
            .with_inline(inline::image())
            .with_inline(inline::line_break())
    }

    /// The stock dialect plus deferred reference links, resolved in a
    /// reference-collection pre-pass.
    pub fn wikistream_ref() -> Self {
        Self::new("wikistream-ref")
            .with_block(BlockKind::ReferenceDefinition)
            .with_block(BlockKind::PropertyLine)
            .with_block(BlockKind::Table)
            .with_block(BlockKind::HorizontalRule)
            .with_block(BlockKind::Heading)
            // Reference usages would otherwise parse as external links,
            // so they take priority at equal offsets
            .with_inline(inline::reference_link())
            .with_inline(inline::external_link())
            .with_inline(inline::entity_reference())
            .with_inline(inline::image())
            .with_inline(inline::line_break())
            .two_pass(true)
    }

    /// Parse a whole document into `builder`, emitting a balanced
    /// begin/end document pair even for empty input.
    pub fn parse(&self, markup: &str, builder: &mut dyn DocumentBuilder) -> Result<()> {
        MarkupParser::new(self).parse(markup, builder)
    }
}

/// Per-invocation line loop state
struct MarkupParser<'d> {
    dialect: &'d Dialect,
    ctx: ProcessingContext,
    open: Option<BlockState>,
}

impl<'d> MarkupParser<'d> {
    fn new(dialect: &'d Dialect) -> Self {
        Self {
            dialect,
            ctx: ProcessingContext::new(),
            open: None,
        }
    }

    fn parse(&mut self, markup: &str, builder: &mut dyn DocumentBuilder) -> Result<()> {
        if self.dialect.is_two_pass() {
            self.collect_references(markup);
        }

        builder.begin_document()?;

        let mut lines = LineSequence::new(markup);
        while let Some(line) = lines.current() {
            let mut scope = ParseScope {
                dialect: self.dialect,
                ctx: &mut self.ctx,
                builder: &mut *builder,
            };

            if let Some(mut state) = self.open.take() {
                match state.process_content(line, &mut scope)? {
                    BlockAction::Consumed => {
                        self.open = Some(state);
                        lines.advance();
                        continue;
                    }
                    BlockAction::Close => {
                        state.close(&mut scope)?;
                        lines.advance();
                        continue;
                    }
                    BlockAction::CloseAndReprocess => {
                        state.close(&mut scope)?;
                        // Fall through: the line is dispatched afresh
                    }
                }
            }

            if line.is_blank() {
                lines.advance();
                continue;
            }

            let kind = self
                .dialect
                .block_kinds()
                .iter()
                .find(|kind| kind.can_start(line));
            self.open = match kind {
                Some(kind) => kind.open(line, &mut scope)?,
                None => Some(BlockState::Paragraph(ParagraphBlock::open(
                    line, &mut scope,
                )?)),
            };
            lines.advance();
        }

        // End of input closes whatever is still open
        if let Some(mut state) = self.open.take() {
            let mut scope = ParseScope {
                dialect: self.dialect,
                ctx: &mut self.ctx,
                builder: &mut *builder,
            };
            state.close(&mut scope)?;
        }

        builder.end_document()?;
        Ok(())
    }

    /// Reference-collection pass: record every definition line without
    /// emitting anything. First definition of a name wins, so the main
    /// pass re-recording them is harmless.
    fn collect_references(&mut self, markup: &str) {
        let mut lines = LineSequence::new(markup);
        while let Some(line) = lines.current() {
            if ReferenceDefinitionBlock::can_start(line) {
                ReferenceDefinitionBlock::record(line, &mut self.ctx);
            }
            lines.advance();
        }
    }
}
