//! Plain-text document builder.
//!
//! Flattens the event stream to unstyled text. Images cannot be
//! represented, so `image` and `image_link` return
//! [`BuilderError::Unsupported`](crate::BuilderError); callers degrade to a
//! textual fallback.

use crate::attributes::{Attributes, BlockAttributes, ImageAttributes, LinkAttributes};
use crate::builder::{BlockType, BuilderError, BuilderResult, DocumentBuilder, SpanType};

/// A sink producing plain text
#[derive(Debug, Default)]
pub struct TextDocumentBuilder {
    out: String,
}

impl TextDocumentBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn into_text(self) -> String {
        self.out
    }

    pub fn text(&self) -> &str {
        &self.out
    }

    fn end_line(&mut self) {
        if !self.out.is_empty() && !self.out.ends_with('\n') {
            self.out.push('\n');
        }
    }
}

impl DocumentBuilder for TextDocumentBuilder {
    fn begin_document(&mut self) -> BuilderResult {
        Ok(())
    }

    fn end_document(&mut self) -> BuilderResult {
        self.end_line();
        Ok(())
    }

    fn begin_block(&mut self, _block_type: BlockType, _attributes: &BlockAttributes) -> BuilderResult {
        Ok(())
    }

    fn end_block(&mut self) -> BuilderResult {
        self.end_line();
        Ok(())
    }

    fn begin_span(&mut self, _span_type: SpanType, _attributes: &Attributes) -> BuilderResult {
        Ok(())
    }

    fn end_span(&mut self) -> BuilderResult {
        Ok(())
    }

    fn begin_heading(&mut self, _level: u8, _attributes: &Attributes) -> BuilderResult {
        Ok(())
    }

    fn end_heading(&mut self) -> BuilderResult {
        self.end_line();
        Ok(())
    }

    fn characters(&mut self, text: &str) -> BuilderResult {
        self.out.push_str(text);
        Ok(())
    }

    fn characters_unescaped(&mut self, literal: &str) -> BuilderResult {
        self.out.push_str(literal);
        Ok(())
    }

    fn entity_reference(&mut self, entity: &str) -> BuilderResult {
        // Decode the handful of entities with obvious text equivalents
        let decoded = match entity {
            "amp" => "&",
            "lt" => "<",
            "gt" => ">",
            "quot" => "\"",
            "nbsp" => " ",
            _ => {
                self.out.push('&');
                self.out.push_str(entity);
                self.out.push(';');
                return Ok(());
            }
        };
        self.out.push_str(decoded);
        Ok(())
    }

    fn link(&mut self, _attributes: &LinkAttributes, _href: &str, text: &str) -> BuilderResult {
        self.out.push_str(text);
        Ok(())
    }

    fn image(&mut self, _attributes: &ImageAttributes, _url: &str) -> BuilderResult {
        Err(BuilderError::unsupported("image"))
    }

    fn image_link(
        &mut self,
        _link_attributes: &LinkAttributes,
        _image_attributes: &ImageAttributes,
        _href: &str,
        _image_url: &str,
    ) -> BuilderResult {
        Err(BuilderError::unsupported("image_link"))
    }

    fn acronym(&mut self, text: &str, _definition: &str) -> BuilderResult {
        self.out.push_str(text);
        Ok(())
    }

    fn line_break(&mut self) -> BuilderResult {
        self.out.push('\n');
        Ok(())
    }

    fn horizontal_rule(&mut self) -> BuilderResult {
        self.end_line();
        self.out.push_str("----\n");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_output() {
        let mut builder = TextDocumentBuilder::new();
        builder.begin_document().unwrap();
        builder
            .begin_block(BlockType::Paragraph, &BlockAttributes::default())
            .unwrap();
        builder.characters("hello ").unwrap();
        builder
            .link(&LinkAttributes::default(), "http://example.org", "world")
            .unwrap();
        builder.end_block().unwrap();
        builder.end_document().unwrap();

        assert_eq!(builder.text(), "hello world\n");
    }

    #[test]
    fn test_image_is_unsupported() {
        let mut builder = TextDocumentBuilder::new();
        let err = builder
            .image(&ImageAttributes::default(), "logo.png")
            .unwrap_err();
        assert!(err.is_unsupported());
    }

    #[test]
    fn test_entity_decoding() {
        let mut builder = TextDocumentBuilder::new();
        builder.entity_reference("amp").unwrap();
        builder.entity_reference("copy").unwrap();
        assert_eq!(builder.text(), "&&copy;");
    }
}
