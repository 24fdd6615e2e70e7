//! Per-parse mutable state.
//!
//! The [`ProcessingContext`] is allocated once per parse invocation and
//! passed explicitly into block and inline operations; no state is shared
//! between parses. It carries the "last declared properties" map consumed
//! by property-aware blocks, and the reference-definition table consulted
//! by deferred reference links.

use indexmap::IndexMap;

/// A named link target recorded by a reference definition
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reference {
    pub href: String,
    pub title: Option<String>,
}

/// Whole-document parse state
#[derive(Debug, Default)]
pub struct ProcessingContext {
    /// Key/value pairs declared on the line(s) immediately preceding the
    /// next block; taken (and cleared) by the block that consumes them
    last_properties: IndexMap<String, String>,

    /// Reference name (lowercased) to link target
    references: IndexMap<String, Reference>,
}

impl ProcessingContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the pending property map
    pub fn set_last_properties(&mut self, properties: IndexMap<String, String>) {
        self.last_properties = properties;
    }

    /// Consume the pending property map, leaving it empty
    pub fn take_last_properties(&mut self) -> IndexMap<String, String> {
        std::mem::take(&mut self.last_properties)
    }

    /// Record a reference definition. Names are case-insensitive and the
    /// first definition of a name wins.
    pub fn add_reference(&mut self, name: &str, href: &str, title: Option<&str>) {
        let key = name.trim().to_lowercase();
        self.references.entry(key).or_insert_with(|| Reference {
            href: href.to_string(),
            title: title.map(str::to_string),
        });
    }

    pub fn reference(&self, name: &str) -> Option<&Reference> {
        self.references.get(&name.trim().to_lowercase())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_properties_taken_once() {
        let mut ctx = ProcessingContext::new();
        let mut properties = IndexMap::new();
        properties.insert("cols".to_string(), "3".to_string());
        ctx.set_last_properties(properties);

        let taken = ctx.take_last_properties();
        assert_eq!(taken.get("cols").map(String::as_str), Some("3"));
        assert!(ctx.take_last_properties().is_empty());
    }

    #[test]
    fn test_reference_names_case_insensitive() {
        let mut ctx = ProcessingContext::new();
        ctx.add_reference("Foo", "http://example.org", None);

        assert_eq!(
            ctx.reference("foo").map(|r| r.href.as_str()),
            Some("http://example.org")
        );
        assert_eq!(
            ctx.reference("FOO").map(|r| r.href.as_str()),
            Some("http://example.org")
        );
    }

    #[test]
    fn test_first_definition_wins() {
        let mut ctx = ProcessingContext::new();
        ctx.add_reference("foo", "http://first.example", None);
        ctx.add_reference("foo", "http://second.example", None);

        assert_eq!(
            ctx.reference("foo").map(|r| r.href.as_str()),
            Some("http://first.example")
        );
    }
}
