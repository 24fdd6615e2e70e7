//! HTML document builder.
//!
//! Renders the event stream as HTML into an owned `String`. `characters`
//! escapes `&`, `<`, `>` and `"`; `characters_unescaped` writes its input
//! verbatim. This builder supports every event and never refuses one.

use crate::attributes::{Attributes, BlockAttributes, ImageAttributes, LinkAttributes};
use crate::builder::{BlockType, BuilderResult, DocumentBuilder, SpanType};

/// A sink that renders document events as HTML
#[derive(Debug, Default)]
pub struct HtmlDocumentBuilder {
    out: String,
    /// Element names still awaiting their closing tag, innermost last
    open_elements: Vec<&'static str>,
    /// Emit `<html><body>` wrappers around the document
    emit_document_tags: bool,
}

impl HtmlDocumentBuilder {
    pub fn new() -> Self {
        Self {
            out: String::with_capacity(4096),
            open_elements: Vec::new(),
            emit_document_tags: false,
        }
    }

    /// Wrap output in `<html><body>`...`</body></html>`
    pub fn with_document_tags(mut self) -> Self {
        self.emit_document_tags = true;
        self
    }

    /// The HTML produced so far
    pub fn into_html(self) -> String {
        self.out
    }

    pub fn html(&self) -> &str {
        &self.out
    }

    fn open_tag(&mut self, element: &'static str, attributes: &Attributes) {
        self.out.push('<');
        self.out.push_str(element);
        self.write_attributes(attributes);
        self.out.push('>');
        self.open_elements.push(element);
    }

    fn close_tag(&mut self) {
        if let Some(element) = self.open_elements.pop() {
            self.out.push_str("</");
            self.out.push_str(element);
            self.out.push('>');
        }
    }

    fn write_attributes(&mut self, attributes: &Attributes) {
        if let Some(id) = &attributes.id {
            self.write_attribute("id", id);
        }
        if let Some(css_class) = &attributes.css_class {
            self.write_attribute("class", css_class);
        }
        if let Some(css_style) = &attributes.css_style {
            self.write_attribute("style", css_style);
        }
    }

    fn write_attribute(&mut self, name: &str, value: &str) {
        self.out.push(' ');
        self.out.push_str(name);
        self.out.push_str("=\"");
        self.out.push_str(&escape_html(value));
        self.out.push('"');
    }
}

fn block_element(block_type: BlockType) -> &'static str {
    match block_type {
        BlockType::Paragraph => "p",
        BlockType::Quote => "blockquote",
        BlockType::Code => "code",
        BlockType::Preformatted => "pre",
        BlockType::Table => "table",
        BlockType::TableRow => "tr",
        BlockType::TableCellHeader => "th",
        BlockType::TableCellNormal => "td",
    }
}

fn span_element(span_type: SpanType) -> &'static str {
    match span_type {
        SpanType::Emphasis => "em",
        SpanType::Strong => "strong",
        SpanType::Code => "code",
        SpanType::Monospace => "tt",
        SpanType::Span => "span",
    }
}

fn heading_element(level: u8) -> &'static str {
    match level {
        1 => "h1",
        2 => "h2",
        3 => "h3",
        4 => "h4",
        5 => "h5",
        _ => "h6",
    }
}

/// Escape text content for HTML output
pub fn escape_html(text: &str) -> String {
    let mut result = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => result.push_str("&amp;"),
            '<' => result.push_str("&lt;"),
            '>' => result.push_str("&gt;"),
            '"' => result.push_str("&quot;"),
            _ => result.push(c),
        }
    }
    result
}

impl DocumentBuilder for HtmlDocumentBuilder {
    fn begin_document(&mut self) -> BuilderResult {
        if self.emit_document_tags {
            self.out.push_str("<html><body>");
        }
        Ok(())
    }

    fn end_document(&mut self) -> BuilderResult {
        if self.emit_document_tags {
            self.out.push_str("</body></html>");
        }
        Ok(())
    }

    fn begin_block(&mut self, block_type: BlockType, attributes: &BlockAttributes) -> BuilderResult {
        let element = block_element(block_type);
        self.out.push('<');
        self.out.push_str(element);
        self.write_attributes(attributes.base());
        match attributes {
            BlockAttributes::Table(table) => {
                if let Some(width) = &table.width {
                    self.write_attribute("width", width);
                }
                if let Some(summary) = &table.summary {
                    self.write_attribute("summary", summary);
                }
            }
            BlockAttributes::TableCell(cell) => {
                if let Some(align) = &cell.align {
                    self.write_attribute("align", align);
                }
                if let Some(width) = &cell.width {
                    self.write_attribute("width", width);
                }
                if let Some(colspan) = cell.colspan {
                    self.write_attribute("colspan", &colspan.to_string());
                }
                if let Some(rowspan) = cell.rowspan {
                    self.write_attribute("rowspan", &rowspan.to_string());
                }
            }
            BlockAttributes::Common(_) | BlockAttributes::TableRow(_) => {}
        }
        self.out.push('>');
        self.open_elements.push(element);
        Ok(())
    }

    fn end_block(&mut self) -> BuilderResult {
        self.close_tag();
        Ok(())
    }

    fn begin_span(&mut self, span_type: SpanType, attributes: &Attributes) -> BuilderResult {
        self.open_tag(span_element(span_type), attributes);
        Ok(())
    }

    fn end_span(&mut self) -> BuilderResult {
        self.close_tag();
        Ok(())
    }

    fn begin_heading(&mut self, level: u8, attributes: &Attributes) -> BuilderResult {
        self.open_tag(heading_element(level), attributes);
        Ok(())
    }

    fn end_heading(&mut self) -> BuilderResult {
        self.close_tag();
        Ok(())
    }

    fn characters(&mut self, text: &str) -> BuilderResult {
        self.out.push_str(&escape_html(text));
        Ok(())
    }

    fn characters_unescaped(&mut self, literal: &str) -> BuilderResult {
        self.out.push_str(literal);
        Ok(())
    }

    fn entity_reference(&mut self, entity: &str) -> BuilderResult {
        self.out.push('&');
        self.out.push_str(entity);
        self.out.push(';');
        Ok(())
    }

    fn link(&mut self, attributes: &LinkAttributes, href: &str, text: &str) -> BuilderResult {
        self.out.push_str("<a href=\"");
        self.out.push_str(&escape_html(href));
        self.out.push('"');
        if let Some(target) = &attributes.target {
            self.write_attribute("target", target);
        }
        if let Some(title) = &attributes.title {
            self.write_attribute("title", title);
        }
        self.out.push('>');
        self.out.push_str(&escape_html(text));
        self.out.push_str("</a>");
        Ok(())
    }

    fn image(&mut self, attributes: &ImageAttributes, url: &str) -> BuilderResult {
        self.out.push_str("<img src=\"");
        self.out.push_str(&escape_html(url));
        self.out.push('"');
        if let Some(alt) = &attributes.alt {
            self.write_attribute("alt", alt);
        }
        if let Some(width) = attributes.width {
            self.write_attribute("width", &width.to_string());
        }
        if let Some(height) = attributes.height {
            self.write_attribute("height", &height.to_string());
        }
        self.out.push_str("/>");
        Ok(())
    }

    fn image_link(
        &mut self,
        link_attributes: &LinkAttributes,
        image_attributes: &ImageAttributes,
        href: &str,
        image_url: &str,
    ) -> BuilderResult {
        self.out.push_str("<a href=\"");
        self.out.push_str(&escape_html(href));
        self.out.push('"');
        if let Some(target) = &link_attributes.target {
            self.write_attribute("target", target);
        }
        self.out.push('>');
        self.image(image_attributes, image_url)?;
        self.out.push_str("</a>");
        Ok(())
    }

    fn acronym(&mut self, text: &str, definition: &str) -> BuilderResult {
        self.out.push_str("<acronym title=\"");
        self.out.push_str(&escape_html(definition));
        self.out.push_str("\">");
        self.out.push_str(&escape_html(text));
        self.out.push_str("</acronym>");
        Ok(())
    }

    fn line_break(&mut self) -> BuilderResult {
        self.out.push_str("<br/>");
        Ok(())
    }

    fn horizontal_rule(&mut self) -> BuilderResult {
        self.out.push_str("<hr/>");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_html() {
        assert_eq!(escape_html("a < b & c"), "a &lt; b &amp; c");
        assert_eq!(escape_html("\"quoted\""), "&quot;quoted&quot;");
        assert_eq!(escape_html("plain"), "plain");
    }

    #[test]
    fn test_characters_escaped_unescaped() {
        let mut builder = HtmlDocumentBuilder::new();
        builder.characters("<b>").unwrap();
        builder.characters_unescaped("<b>").unwrap();
        assert_eq!(builder.html(), "&lt;b&gt;<b>");
    }

    #[test]
    fn test_block_nesting() {
        let mut builder = HtmlDocumentBuilder::new();
        builder.begin_document().unwrap();
        builder
            .begin_block(BlockType::Paragraph, &BlockAttributes::default())
            .unwrap();
        builder.characters("text").unwrap();
        builder.end_block().unwrap();
        builder.end_document().unwrap();
        assert_eq!(builder.html(), "<p>text</p>");
    }

    #[test]
    fn test_link_with_title() {
        let mut builder = HtmlDocumentBuilder::new();
        let attributes = LinkAttributes {
            title: Some("Example".to_string()),
            ..Default::default()
        };
        builder
            .link(&attributes, "http://example.org", "example")
            .unwrap();
        assert_eq!(
            builder.html(),
            "<a href=\"http://example.org\" title=\"Example\">example</a>"
        );
    }

    #[test]
    fn test_image_with_dimensions() {
        let mut builder = HtmlDocumentBuilder::new();
        let attributes = ImageAttributes {
            alt: Some("logo".to_string()),
            width: Some(32),
            ..Default::default()
        };
        builder.image(&attributes, "logo.png").unwrap();
        assert_eq!(
            builder.html(),
            "<img src=\"logo.png\" alt=\"logo\" width=\"32\"/>"
        );
    }

    #[test]
    fn test_heading_levels() {
        let mut builder = HtmlDocumentBuilder::new();
        builder.begin_heading(2, &Attributes::default()).unwrap();
        builder.characters("Section").unwrap();
        builder.end_heading().unwrap();
        assert_eq!(builder.html(), "<h2>Section</h2>");
    }

    #[test]
    fn test_css_attributes_written() {
        let mut builder = HtmlDocumentBuilder::new();
        let attributes = Attributes::new().with_css_class("note").with_id("n1");
        builder
            .begin_block(BlockType::Paragraph, &attributes.into())
            .unwrap();
        builder.end_block().unwrap();
        assert_eq!(builder.html(), "<p id=\"n1\" class=\"note\"></p>");
    }

    #[test]
    fn test_table_cell_attributes_written() {
        use crate::attributes::TableCellAttributes;

        let mut builder = HtmlDocumentBuilder::new();
        let cell = TableCellAttributes {
            align: Some("right".to_string()),
            width: Some("2".to_string()),
            ..Default::default()
        };
        builder
            .begin_block(BlockType::TableCellHeader, &cell.into())
            .unwrap();
        builder.characters("h").unwrap();
        builder.end_block().unwrap();
        assert_eq!(builder.html(), "<th align=\"right\" width=\"2\">h</th>");
    }
}
