//! # wikistream
//!
//! A line-oriented markup parsing engine that streams document events
//! into a pluggable sink.
//!
//! Markup is parsed one line at a time. A [`Dialect`] describes the
//! grammar: an ordered list of block kinds (tables, headings, horizontal
//! rules, property lines, reference definitions) and an ordered list of
//! pattern-based inline elements (links, entities, images, forced line
//! breaks). The parser never materializes a syntax tree; it emits
//! begin/end events straight into a [`DocumentBuilder`] from the
//! `wikistream-core` crate, so the same parse can render HTML, flatten
//! to plain text, or record events for inspection.
//!
//! Dialects are immutable and cheap to clone; all per-parse state lives
//! in the invocation, so a single dialect can serve concurrent parses.
//!
//! ## Example
//!
//! ```rust
//! use wikistream::Dialect;
//! use wikistream_core::HtmlDocumentBuilder;
//!
//! let dialect = Dialect::wikistream();
//! let mut builder = HtmlDocumentBuilder::new();
//! dialect.parse("= Title\n\nSome text.", &mut builder).unwrap();
//! assert_eq!(builder.html(), "<h1>Title</h1><p>Some text.</p>");
//! ```
//!
//! ## Example (registry)
//!
//! ```rust
//! use wikistream::builtin_registry;
//! use wikistream_core::TextDocumentBuilder;
//!
//! let dialect = builtin_registry().lookup("wikistream").unwrap();
//! let mut builder = TextDocumentBuilder::new();
//! dialect.parse("hello", &mut builder).unwrap();
//! assert_eq!(builder.text(), "hello\n");
//! ```

mod blocks;
mod context;
mod dialect;
mod error;
mod inline;
mod line;
mod registry;

pub use blocks::{
    BlockKind, HeadingBlock, HorizontalRuleBlock, ParagraphBlock, PropertyLineBlock,
    ReferenceDefinitionBlock, TableBlock,
};
pub use context::{ProcessingContext, Reference};
pub use dialect::{Dialect, ParseScope};
pub use error::{ParseError, Result};
pub use inline::{
    entity_reference, external_link, image, line_break, reference_link, InlineElement, InlineKind,
};
pub use line::{Line, LineSequence};
pub use registry::{builtin_registry, LanguageRegistry};

/// Parse `markup` in the named built-in dialect into `builder`.
///
/// Convenience over [`builtin_registry`] + [`Dialect::parse`]; fails with
/// [`ParseError::UnknownLanguage`] when no such dialect is registered.
pub fn parse(
    language: &str,
    markup: &str,
    builder: &mut dyn wikistream_core::DocumentBuilder,
) -> Result<()> {
    builtin_registry().lookup(language)?.parse(markup, builder)
}

#[cfg(test)]
mod tests {
    use super::*;
    use wikistream_core::HtmlDocumentBuilder;

    #[test]
    fn test_parse_by_language_name() {
        let mut builder = HtmlDocumentBuilder::new();
        parse("wikistream", "hello", &mut builder).unwrap();
        assert_eq!(builder.html(), "<p>hello</p>");
    }

    #[test]
    fn test_parse_unknown_language() {
        let mut builder = HtmlDocumentBuilder::new();
        let err = parse("textile", "hello", &mut builder).unwrap_err();
        assert!(matches!(err, ParseError::UnknownLanguage(_)));
    }
}
