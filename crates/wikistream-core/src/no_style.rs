//! Style-stripping builder decorator.
//!
//! Wraps another [`DocumentBuilder`] and removes presentation-only
//! attributes (css class, css style, id, link target) from every event.
//! Pasted documents also tend to open with a single styled span wrapping
//! the whole content; a span that begins before any content has been seen
//! is suppressed together with its matching `end_span`.
//!
//! The decorator keeps the begin/end pairing invariant: an `end_span` is
//! forwarded only if its `begin_span` was forwarded.

use crate::attributes::{Attributes, BlockAttributes, ImageAttributes, LinkAttributes};
use crate::builder::{BlockType, BuilderResult, DocumentBuilder, SpanType};

/// Whether any content-bearing event has been forwarded yet
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ContentState {
    BeforeContent,
    SeenContent,
}

/// Decorator that strips style attributes and a leading wrapping span
#[derive(Debug)]
pub struct NoStyleBuilder<B> {
    delegate: B,
    state: ContentState,
    /// One entry per open span: was its begin forwarded to the delegate?
    span_forwarded: Vec<bool>,
}

impl<B: DocumentBuilder> NoStyleBuilder<B> {
    pub fn new(delegate: B) -> Self {
        Self {
            delegate,
            state: ContentState::BeforeContent,
            span_forwarded: Vec::new(),
        }
    }

    pub fn into_inner(self) -> B {
        self.delegate
    }

    fn saw_content(&mut self) {
        self.state = ContentState::SeenContent;
    }

    fn clean(attributes: &Attributes) -> Attributes {
        let mut cleaned = attributes.clone();
        cleaned.clear_style();
        cleaned
    }

    fn clean_link(attributes: &LinkAttributes) -> LinkAttributes {
        let mut cleaned = attributes.clone();
        cleaned.attributes.clear_style();
        cleaned.target = None;
        cleaned
    }

    fn clean_image(attributes: &ImageAttributes) -> ImageAttributes {
        let mut cleaned = attributes.clone();
        cleaned.attributes.clear_style();
        cleaned
    }
}

impl<B: DocumentBuilder> DocumentBuilder for NoStyleBuilder<B> {
    fn begin_document(&mut self) -> BuilderResult {
        self.delegate.begin_document()
    }

    fn end_document(&mut self) -> BuilderResult {
        self.delegate.end_document()
    }

    fn begin_block(&mut self, block_type: BlockType, attributes: &BlockAttributes) -> BuilderResult {
        self.saw_content();
        let mut cleaned = attributes.clone();
        cleaned.base_mut().clear_style();
        self.delegate.begin_block(block_type, &cleaned)
    }

    fn end_block(&mut self) -> BuilderResult {
        self.delegate.end_block()
    }

    fn begin_span(&mut self, span_type: SpanType, attributes: &Attributes) -> BuilderResult {
        if self.state == ContentState::BeforeContent {
            // Leading wrapping span: swallow it, remember not to forward
            // the matching end
            self.span_forwarded.push(false);
            return Ok(());
        }
        self.span_forwarded.push(true);
        self.delegate.begin_span(span_type, &Self::clean(attributes))
    }

    fn end_span(&mut self) -> BuilderResult {
        match self.span_forwarded.pop() {
            Some(true) => self.delegate.end_span(),
            _ => Ok(()),
        }
    }

    fn begin_heading(&mut self, level: u8, attributes: &Attributes) -> BuilderResult {
        self.saw_content();
        self.delegate.begin_heading(level, &Self::clean(attributes))
    }

    fn end_heading(&mut self) -> BuilderResult {
        self.delegate.end_heading()
    }

    fn characters(&mut self, text: &str) -> BuilderResult {
        if !text.trim().is_empty() {
            self.saw_content();
        }
        self.delegate.characters(text)
    }

    fn characters_unescaped(&mut self, literal: &str) -> BuilderResult {
        if !literal.trim().is_empty() {
            self.saw_content();
        }
        self.delegate.characters_unescaped(literal)
    }

    fn entity_reference(&mut self, entity: &str) -> BuilderResult {
        self.saw_content();
        self.delegate.entity_reference(entity)
    }

    fn link(&mut self, attributes: &LinkAttributes, href: &str, text: &str) -> BuilderResult {
        self.saw_content();
        self.delegate.link(&Self::clean_link(attributes), href, text)
    }

    fn image(&mut self, attributes: &ImageAttributes, url: &str) -> BuilderResult {
        self.saw_content();
        self.delegate.image(&Self::clean_image(attributes), url)
    }

    fn image_link(
        &mut self,
        link_attributes: &LinkAttributes,
        image_attributes: &ImageAttributes,
        href: &str,
        image_url: &str,
    ) -> BuilderResult {
        self.saw_content();
        self.delegate.image_link(
            &Self::clean_link(link_attributes),
            &Self::clean_image(image_attributes),
            href,
            image_url,
        )
    }

    fn acronym(&mut self, text: &str, definition: &str) -> BuilderResult {
        self.saw_content();
        self.delegate.acronym(text, definition)
    }

    fn line_break(&mut self) -> BuilderResult {
        self.delegate.line_break()
    }

    fn horizontal_rule(&mut self) -> BuilderResult {
        self.saw_content();
        self.delegate.horizontal_rule()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::{DocumentEvent, EventBuilder};

    #[test]
    fn test_strips_style_attributes() {
        let mut builder = NoStyleBuilder::new(EventBuilder::new());
        let styled = Attributes::new().with_css_class("styled").with_id("x");

        builder.begin_document().unwrap();
        builder
            .begin_block(BlockType::Paragraph, &styled.into())
            .unwrap();
        builder.characters("text").unwrap();
        builder.end_block().unwrap();
        builder.end_document().unwrap();

        let events = builder.into_inner().into_events();
        match &events[1] {
            DocumentEvent::BeginBlock { attributes, .. } => {
                assert_eq!(attributes.base().css_class, None);
                assert_eq!(attributes.base().id, None);
            }
            other => panic!("expected BeginBlock, got {other:?}"),
        }
    }

    #[test]
    fn test_suppresses_leading_span() {
        let mut builder = NoStyleBuilder::new(EventBuilder::new());

        builder.begin_document().unwrap();
        builder
            .begin_span(SpanType::Span, &Attributes::new().with_css_class("wrap"))
            .unwrap();
        builder.characters("content").unwrap();
        builder.end_span().unwrap();
        builder.end_document().unwrap();

        let recorder = builder.into_inner();
        assert!(recorder.is_well_nested());
        let events = recorder.into_events();
        assert_eq!(
            events,
            vec![
                DocumentEvent::BeginDocument,
                DocumentEvent::Characters("content".to_string()),
                DocumentEvent::EndDocument,
            ]
        );
    }

    #[test]
    fn test_later_spans_forwarded() {
        let mut builder = NoStyleBuilder::new(EventBuilder::new());

        builder.begin_document().unwrap();
        builder.characters("before ").unwrap();
        builder
            .begin_span(SpanType::Strong, &Attributes::default())
            .unwrap();
        builder.characters("bold").unwrap();
        builder.end_span().unwrap();
        builder.end_document().unwrap();

        let recorder = builder.into_inner();
        assert!(recorder.is_well_nested());
        let events = recorder.into_events();
        assert!(events
            .iter()
            .any(|e| matches!(e, DocumentEvent::BeginSpan { .. })));
    }

    #[test]
    fn test_nested_leading_spans_both_suppressed() {
        let mut builder = NoStyleBuilder::new(EventBuilder::new());

        builder.begin_document().unwrap();
        builder
            .begin_span(SpanType::Span, &Attributes::default())
            .unwrap();
        builder
            .begin_span(SpanType::Span, &Attributes::default())
            .unwrap();
        builder.characters("text").unwrap();
        builder.end_span().unwrap();
        builder.end_span().unwrap();
        builder.end_document().unwrap();

        let recorder = builder.into_inner();
        assert!(recorder.is_well_nested());
        assert!(!recorder
            .events()
            .iter()
            .any(|e| matches!(e, DocumentEvent::BeginSpan { .. } | DocumentEvent::EndSpan)));
    }

    #[test]
    fn test_link_target_stripped() {
        let mut builder = NoStyleBuilder::new(EventBuilder::new());
        let attributes = LinkAttributes {
            target: Some("_blank".to_string()),
            ..Default::default()
        };
        builder
            .link(&attributes, "http://example.org", "text")
            .unwrap();

        let events = builder.into_inner().into_events();
        match &events[0] {
            DocumentEvent::Link { attributes, .. } => assert_eq!(attributes.target, None),
            other => panic!("expected Link, got {other:?}"),
        }
    }
}
