//! wikistream-core - document event model and reference builders
//!
//! This crate defines the structural contract between markup parsing and
//! output rendering: the [`DocumentBuilder`] sink trait, the attribute
//! types its events carry, and a handful of concrete builders.
//!
//! # Architecture
//!
//! ```text
//! markup text ──parse──▶ ┌─────────────────┐     HtmlDocumentBuilder
//!                        │ document events │ ──▶ TextDocumentBuilder
//!                        │ (begin/end/leaf)│     EventBuilder
//!                        └─────────────────┘     ... any DocumentBuilder
//! ```
//!
//! Event sequences are always well nested: `begin_document` /
//! `end_document` wraps everything, block/span/heading pairs nest like a
//! tree, and leaf events carry no children. A sink that cannot represent
//! an event refuses it with [`BuilderError::Unsupported`]; callers degrade
//! to plain text instead of failing the parse.
//!
//! # Example
//!
//! ```rust
//! use wikistream_core::{BlockAttributes, BlockType, DocumentBuilder, HtmlDocumentBuilder};
//!
//! let mut builder = HtmlDocumentBuilder::new();
//! builder.begin_document().unwrap();
//! builder.begin_block(BlockType::Paragraph, &BlockAttributes::default()).unwrap();
//! builder.characters("Hello World").unwrap();
//! builder.end_block().unwrap();
//! builder.end_document().unwrap();
//!
//! assert_eq!(builder.html(), "<p>Hello World</p>");
//! ```

mod attributes;
mod builder;
mod event;
mod html;
mod no_style;
mod text;

pub use attributes::{
    Attributes, BlockAttributes, ImageAttributes, LinkAttributes, TableAttributes,
    TableCellAttributes, TableRowAttributes,
};
pub use builder::{BlockType, BuilderError, BuilderResult, DocumentBuilder, SpanType};
pub use event::{DocumentEvent, EventBuilder};
pub use html::{escape_html, HtmlDocumentBuilder};
pub use no_style::NoStyleBuilder;
pub use text::TextDocumentBuilder;
