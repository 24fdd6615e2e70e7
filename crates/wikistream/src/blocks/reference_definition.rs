//! Reference definition block.
//!
//! A line `[name]: href "title"` defines a named link target; it emits no
//! events. Definitions are collected into the `ProcessingContext` during
//! the first pass of a two-pass dialect so usages may precede their
//! definition in the document. Names are case-insensitive and the first
//! definition of a name wins.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::context::ProcessingContext;
use crate::line::Line;

static DEFINITION: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"^\[([^\[\]]+)\]:\s*(\S+)(?:\s+"([^"]*)")?\s*$"#).expect("valid pattern")
});

pub struct ReferenceDefinitionBlock;

impl ReferenceDefinitionBlock {
    pub fn can_start(line: Line<'_>) -> bool {
        DEFINITION.is_match(line.text())
    }

    /// Record the definition; used both by the reference-collection pass
    /// and by line dispatch (where the line is consumed silently).
    pub fn record(line: Line<'_>, ctx: &mut ProcessingContext) {
        if let Some(captures) = DEFINITION.captures(line.text()) {
            let name = &captures[1];
            let href = &captures[2];
            let title = captures.get(3).map(|m| m.as_str());
            ctx.add_reference(name, href, title);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_definition_recognition() {
        assert!(ReferenceDefinitionBlock::can_start(Line::new(
            "[foo]: http://example.org",
            0
        )));
        assert!(ReferenceDefinitionBlock::can_start(Line::new(
            "[foo]: http://example.org \"A title\"",
            0
        )));
        assert!(!ReferenceDefinitionBlock::can_start(Line::new(
            "[foo] http://example.org",
            0
        )));
        assert!(!ReferenceDefinitionBlock::can_start(Line::new(
            "see [foo]: http://example.org",
            0
        )));
    }

    #[test]
    fn test_record_with_title() {
        let mut ctx = ProcessingContext::new();
        ReferenceDefinitionBlock::record(
            Line::new("[docs]: http://example.org/docs \"The docs\"", 0),
            &mut ctx,
        );
        let reference = ctx.reference("docs").expect("reference recorded");
        assert_eq!(reference.href, "http://example.org/docs");
        assert_eq!(reference.title.as_deref(), Some("The docs"));
    }
}
