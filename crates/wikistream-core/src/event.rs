//! Recorded document events.
//!
//! [`DocumentEvent`] is an owned, comparable value mirroring one
//! [`DocumentBuilder`](crate::DocumentBuilder) call. [`EventBuilder`]
//! records a parse as a `Vec<DocumentEvent>`, decoupling what was parsed
//! from how it is rendered: outline views, diff tools and tests consume the
//! event list instead of a concrete serialization.

use crate::attributes::{Attributes, BlockAttributes, ImageAttributes, LinkAttributes};
use crate::builder::{BlockType, BuilderResult, DocumentBuilder, SpanType};

/// One recorded sink call
#[derive(Debug, Clone, PartialEq)]
pub enum DocumentEvent {
    BeginDocument,
    EndDocument,

    BeginBlock {
        block_type: BlockType,
        attributes: BlockAttributes,
    },
    EndBlock,

    BeginSpan {
        span_type: SpanType,
        attributes: Attributes,
    },
    EndSpan,

    BeginHeading {
        level: u8,
        attributes: Attributes,
    },
    EndHeading,

    Characters(String),
    CharactersUnescaped(String),
    EntityReference(String),

    Link {
        attributes: LinkAttributes,
        href: String,
        text: String,
    },

    Image {
        attributes: ImageAttributes,
        url: String,
    },

    ImageLink {
        link_attributes: LinkAttributes,
        image_attributes: ImageAttributes,
        href: String,
        image_url: String,
    },

    Acronym {
        text: String,
        definition: String,
    },

    LineBreak,
    HorizontalRule,
}

impl DocumentEvent {
    /// True for events that open a nesting level
    pub fn is_begin(&self) -> bool {
        matches!(
            self,
            DocumentEvent::BeginDocument
                | DocumentEvent::BeginBlock { .. }
                | DocumentEvent::BeginSpan { .. }
                | DocumentEvent::BeginHeading { .. }
        )
    }

    /// True for events that close a nesting level
    pub fn is_end(&self) -> bool {
        matches!(
            self,
            DocumentEvent::EndDocument
                | DocumentEvent::EndBlock
                | DocumentEvent::EndSpan
                | DocumentEvent::EndHeading
        )
    }
}

/// A sink that records every event it receives.
#[derive(Debug, Default)]
pub struct EventBuilder {
    events: Vec<DocumentEvent>,
}

impl EventBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> &[DocumentEvent] {
        &self.events
    }

    pub fn into_events(self) -> Vec<DocumentEvent> {
        self.events
    }

    /// Verify that begin/end events form a balanced, properly nested
    /// sequence. Returns false on a dangling open, a stray end, or a
    /// mismatched pair kind.
    pub fn is_well_nested(&self) -> bool {
        #[derive(PartialEq)]
        enum Frame {
            Document,
            Block,
            Span,
            Heading,
        }

        let mut stack: Vec<Frame> = Vec::new();
        for event in &self.events {
            match event {
                DocumentEvent::BeginDocument => stack.push(Frame::Document),
                DocumentEvent::BeginBlock { .. } => stack.push(Frame::Block),
                DocumentEvent::BeginSpan { .. } => stack.push(Frame::Span),
                DocumentEvent::BeginHeading { .. } => stack.push(Frame::Heading),
                DocumentEvent::EndDocument => {
                    if stack.pop() != Some(Frame::Document) {
                        return false;
                    }
                }
                DocumentEvent::EndBlock => {
                    if stack.pop() != Some(Frame::Block) {
                        return false;
                    }
                }
                DocumentEvent::EndSpan => {
                    if stack.pop() != Some(Frame::Span) {
                        return false;
                    }
                }
                DocumentEvent::EndHeading => {
                    if stack.pop() != Some(Frame::Heading) {
                        return false;
                    }
                }
                _ => {}
            }
        }
        stack.is_empty()
    }
}

impl DocumentBuilder for EventBuilder {
    fn begin_document(&mut self) -> BuilderResult {
        self.events.push(DocumentEvent::BeginDocument);
        Ok(())
    }

    fn end_document(&mut self) -> BuilderResult {
        self.events.push(DocumentEvent::EndDocument);
        Ok(())
    }

    fn begin_block(&mut self, block_type: BlockType, attributes: &BlockAttributes) -> BuilderResult {
        self.events.push(DocumentEvent::BeginBlock {
            block_type,
            attributes: attributes.clone(),
        });
        Ok(())
    }

    fn end_block(&mut self) -> BuilderResult {
        self.events.push(DocumentEvent::EndBlock);
        Ok(())
    }

    fn begin_span(&mut self, span_type: SpanType, attributes: &Attributes) -> BuilderResult {
        self.events.push(DocumentEvent::BeginSpan {
            span_type,
            attributes: attributes.clone(),
        });
        Ok(())
    }

    fn end_span(&mut self) -> BuilderResult {
        self.events.push(DocumentEvent::EndSpan);
        Ok(())
    }

    fn begin_heading(&mut self, level: u8, attributes: &Attributes) -> BuilderResult {
        self.events.push(DocumentEvent::BeginHeading {
            level,
            attributes: attributes.clone(),
        });
        Ok(())
    }

    fn end_heading(&mut self) -> BuilderResult {
        self.events.push(DocumentEvent::EndHeading);
        Ok(())
    }

    fn characters(&mut self, text: &str) -> BuilderResult {
        self.events.push(DocumentEvent::Characters(text.to_string()));
        Ok(())
    }

    fn characters_unescaped(&mut self, literal: &str) -> BuilderResult {
        self.events
            .push(DocumentEvent::CharactersUnescaped(literal.to_string()));
        Ok(())
    }

    fn entity_reference(&mut self, entity: &str) -> BuilderResult {
        self.events
            .push(DocumentEvent::EntityReference(entity.to_string()));
        Ok(())
    }

    fn link(&mut self, attributes: &LinkAttributes, href: &str, text: &str) -> BuilderResult {
        self.events.push(DocumentEvent::Link {
            attributes: attributes.clone(),
            href: href.to_string(),
            text: text.to_string(),
        });
        Ok(())
    }

    fn image(&mut self, attributes: &ImageAttributes, url: &str) -> BuilderResult {
        self.events.push(DocumentEvent::Image {
            attributes: attributes.clone(),
            url: url.to_string(),
        });
        Ok(())
    }

    fn image_link(
        &mut self,
        link_attributes: &LinkAttributes,
        image_attributes: &ImageAttributes,
        href: &str,
        image_url: &str,
    ) -> BuilderResult {
        self.events.push(DocumentEvent::ImageLink {
            link_attributes: link_attributes.clone(),
            image_attributes: image_attributes.clone(),
            href: href.to_string(),
            image_url: image_url.to_string(),
        });
        Ok(())
    }

    fn acronym(&mut self, text: &str, definition: &str) -> BuilderResult {
        self.events.push(DocumentEvent::Acronym {
            text: text.to_string(),
            definition: definition.to_string(),
        });
        Ok(())
    }

    fn line_break(&mut self) -> BuilderResult {
        self.events.push(DocumentEvent::LineBreak);
        Ok(())
    }

    fn horizontal_rule(&mut self) -> BuilderResult {
        self.events.push(DocumentEvent::HorizontalRule);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_well_nested_sequence() {
        let mut builder = EventBuilder::new();
        builder.begin_document().unwrap();
        builder
            .begin_block(BlockType::Paragraph, &BlockAttributes::default())
            .unwrap();
        builder.characters("hello").unwrap();
        builder.end_block().unwrap();
        builder.end_document().unwrap();

        assert!(builder.is_well_nested());
        assert_eq!(builder.events().len(), 5);
    }

    #[test]
    fn test_dangling_open_detected() {
        let mut builder = EventBuilder::new();
        builder.begin_document().unwrap();
        builder
            .begin_block(BlockType::Paragraph, &BlockAttributes::default())
            .unwrap();
        builder.end_document().unwrap();

        assert!(!builder.is_well_nested());
    }

    #[test]
    fn test_mismatched_pair_detected() {
        let mut builder = EventBuilder::new();
        builder.begin_document().unwrap();
        builder
            .begin_span(SpanType::Strong, &Attributes::default())
            .unwrap();
        builder.end_block().unwrap();
        builder.end_document().unwrap();

        assert!(!builder.is_well_nested());
    }

    #[test]
    fn test_stray_end_detected() {
        let mut builder = EventBuilder::new();
        builder.end_block().unwrap();

        assert!(!builder.is_well_nested());
    }
}
