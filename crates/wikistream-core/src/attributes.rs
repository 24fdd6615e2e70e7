//! Attribute bags attached to structural events.
//!
//! Every `begin_*` sink call carries an attribute bag describing styling
//! hooks (css class, css style), an identifier and a language hint. Typed
//! specializations add fields for links, images and tables. Attributes are
//! borrowed by the sink call that carries them and are not retained after
//! the call returns.

/// Base attribute bag shared by all structural events.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Attributes {
    /// CSS-class-equivalent style hook
    pub css_class: Option<String>,

    /// Inline style hook
    pub css_style: Option<String>,

    /// Identifier (anchor target)
    pub id: Option<String>,

    /// Language hint (e.g. for code blocks)
    pub language: Option<String>,
}

impl Attributes {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the css class, builder-style
    pub fn with_css_class(mut self, css_class: &str) -> Self {
        self.css_class = Some(css_class.to_string());
        self
    }

    /// Set the id, builder-style
    pub fn with_id(mut self, id: &str) -> Self {
        self.id = Some(id.to_string());
        self
    }

    /// Drop all style-only fields, keeping semantic content
    pub fn clear_style(&mut self) {
        self.css_class = None;
        self.css_style = None;
        self.id = None;
    }
}

/// Attributes for `link` events
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LinkAttributes {
    pub attributes: Attributes,

    /// Link target (window/frame hint)
    pub target: Option<String>,

    /// Link title (tooltip text)
    pub title: Option<String>,
}

/// Attributes for `image` events
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImageAttributes {
    pub attributes: Attributes,

    pub width: Option<u32>,
    pub height: Option<u32>,

    /// Alternate text for sinks that cannot render the image
    pub alt: Option<String>,

    pub title: Option<String>,
}

/// Attributes for `TABLE` blocks
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TableAttributes {
    pub attributes: Attributes,

    /// Declared table width (e.g. `80%`)
    pub width: Option<String>,

    pub summary: Option<String>,
}

/// Attributes for `TABLE_ROW` blocks
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TableRowAttributes {
    pub attributes: Attributes,
}

/// Attributes for `TABLE_CELL_HEADER` and `TABLE_CELL_NORMAL` blocks
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TableCellAttributes {
    pub attributes: Attributes,

    /// Horizontal alignment (`left`, `center`, `right`)
    pub align: Option<String>,

    /// Relative column width from the `cols` schema
    pub width: Option<String>,

    pub colspan: Option<u32>,
    pub rowspan: Option<u32>,
}

/// Attribute payload for a `begin_block` event.
///
/// Closed variant set: block kinds with typed attributes carry their
/// specialization, everything else carries the base bag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BlockAttributes {
    Common(Attributes),
    Table(TableAttributes),
    TableRow(TableRowAttributes),
    TableCell(TableCellAttributes),
}

impl BlockAttributes {
    /// The base attribute bag shared by every variant
    pub fn base(&self) -> &Attributes {
        match self {
            BlockAttributes::Common(attributes) => attributes,
            BlockAttributes::Table(table) => &table.attributes,
            BlockAttributes::TableRow(row) => &row.attributes,
            BlockAttributes::TableCell(cell) => &cell.attributes,
        }
    }

    pub fn base_mut(&mut self) -> &mut Attributes {
        match self {
            BlockAttributes::Common(attributes) => attributes,
            BlockAttributes::Table(table) => &mut table.attributes,
            BlockAttributes::TableRow(row) => &mut row.attributes,
            BlockAttributes::TableCell(cell) => &mut cell.attributes,
        }
    }
}

impl Default for BlockAttributes {
    fn default() -> Self {
        BlockAttributes::Common(Attributes::default())
    }
}

impl From<Attributes> for BlockAttributes {
    fn from(attributes: Attributes) -> Self {
        BlockAttributes::Common(attributes)
    }
}

impl From<TableAttributes> for BlockAttributes {
    fn from(attributes: TableAttributes) -> Self {
        BlockAttributes::Table(attributes)
    }
}

impl From<TableRowAttributes> for BlockAttributes {
    fn from(attributes: TableRowAttributes) -> Self {
        BlockAttributes::TableRow(attributes)
    }
}

impl From<TableCellAttributes> for BlockAttributes {
    fn from(attributes: TableCellAttributes) -> Self {
        BlockAttributes::TableCell(attributes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clear_style() {
        let mut attributes = Attributes::new().with_css_class("fancy").with_id("a1");
        attributes.css_style = Some("color: red".to_string());
        attributes.language = Some("rust".to_string());

        attributes.clear_style();

        assert_eq!(attributes.css_class, None);
        assert_eq!(attributes.css_style, None);
        assert_eq!(attributes.id, None);
        // Language is semantic, not styling
        assert_eq!(attributes.language, Some("rust".to_string()));
    }

    #[test]
    fn test_default_is_empty() {
        let attributes = Attributes::default();
        assert_eq!(attributes, Attributes::new());
        assert!(attributes.css_class.is_none());
    }

    #[test]
    fn test_block_attributes_base_access() {
        let cell = TableCellAttributes {
            attributes: Attributes::new().with_css_class("c"),
            align: Some("left".to_string()),
            ..Default::default()
        };
        let block: BlockAttributes = cell.into();
        assert_eq!(block.base().css_class.as_deref(), Some("c"));

        let mut block = block;
        block.base_mut().clear_style();
        assert_eq!(block.base().css_class, None);
        match block {
            BlockAttributes::TableCell(cell) => assert_eq!(cell.align.as_deref(), Some("left")),
            other => panic!("expected TableCell, got {other:?}"),
        }
    }
}
