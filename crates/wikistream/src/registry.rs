//! Dialect lookup by name.
//!
//! A [`LanguageRegistry`] maps dialect names to [`Dialect`] instances in
//! registration order. Names are unique; registering a duplicate is an
//! error rather than a silent replacement, and looking up an unknown name
//! reports which name was asked for.

use indexmap::IndexMap;
use once_cell::sync::Lazy;

use crate::dialect::Dialect;
use crate::error::{ParseError, Result};

static BUILTIN: Lazy<LanguageRegistry> =
    Lazy::new(|| LanguageRegistry::builtin().expect("builtin dialect names are unique"));

/// The registry holding the built-in dialects
pub fn builtin_registry() -> &'static LanguageRegistry {
    &BUILTIN
}

#[derive(Debug, Clone, Default)]
pub struct LanguageRegistry {
    dialects: IndexMap<String, Dialect>,
}

impl LanguageRegistry {
    /// An empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// A registry preloaded with the stock dialects
    pub fn builtin() -> Result<Self> {
        let mut registry = Self::new();
        registry.register(Dialect::wikistream())?;
        registry.register(Dialect::wikistream_ref())?;
        Ok(registry)
    }

    pub fn register(&mut self, dialect: Dialect) -> Result<()> {
        let name = dialect.name().to_string();
        if self.dialects.contains_key(&name) {
            return Err(ParseError::DuplicateLanguage(name));
        }
        self.dialects.insert(name, dialect);
        Ok(())
    }

    pub fn lookup(&self, name: &str) -> Result<&Dialect> {
        self.dialects
            .get(name)
            .ok_or_else(|| ParseError::UnknownLanguage(name.to_string()))
    }

    /// All registered dialects, in registration order
    pub fn list_all(&self) -> impl Iterator<Item = &Dialect> {
        self.dialects.values()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_lookup() {
        let registry = builtin_registry();
        assert_eq!(registry.lookup("wikistream").unwrap().name(), "wikistream");
        assert_eq!(
            registry.lookup("wikistream-ref").unwrap().name(),
            "wikistream-ref"
        );
    }

    #[test]
    fn test_unknown_language_is_an_error() {
        let err = builtin_registry().lookup("creole").unwrap_err();
        match err {
            ParseError::UnknownLanguage(name) => assert_eq!(name, "creole"),
            other => panic!("expected UnknownLanguage, got {other:?}"),
        }
    }

    #[test]
    fn test_duplicate_registration_rejected() {
        let mut registry = LanguageRegistry::new();
        registry.register(Dialect::new("x")).unwrap();
        let err = registry.register(Dialect::new("x")).unwrap_err();
        assert!(matches!(err, ParseError::DuplicateLanguage(_)));
    }

    #[test]
    fn test_registration_order_preserved() {
        let mut registry = LanguageRegistry::new();
        registry.register(Dialect::new("b")).unwrap();
        registry.register(Dialect::new("a")).unwrap();
        let names: Vec<&str> = registry.list_all().map(Dialect::name).collect();
        assert_eq!(names, vec!["b", "a"]);
    }
}
