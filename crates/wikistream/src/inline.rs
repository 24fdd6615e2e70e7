//! Pattern-based inline elements.
//!
//! Each dialect carries an ordered list of [`InlineElement`]s. The
//! unconsumed remainder of a line is scanned left to right; the earliest
//! match wins, and when two patterns match at the same offset the one
//! registered first takes priority. Text between matches is emitted
//! verbatim through `characters`.
//!
//! Processors are bound to the captured groups of one match and invoked
//! once; they hold no cross-match state. A match whose processor cannot
//! extract the groups it needs degrades to literal text, as does a leaf
//! event the sink refuses.

use regex::{Captures, Regex};
use wikistream_core::{DocumentBuilder, ImageAttributes, LinkAttributes};

use crate::context::ProcessingContext;
use crate::error::{ParseError, Result};

/// What a matched pattern means
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InlineKind {
    /// `[url label]`: a single `link` call; the visible label defaults
    /// to the url when absent or blank
    ExternalLink,
    /// `[label][name]` / `[name][]`: resolved against the reference
    /// table; unresolved usages stay literal text
    ReferenceLink,
    /// `&name;`
    EntityReference,
    /// `!path!`
    Image,
    /// Trailing ` \\`
    LineBreak,
}

/// A compiled pattern plus the processor selecting its sink calls
#[derive(Debug, Clone)]
pub struct InlineElement {
    pattern: Regex,
    kind: InlineKind,
}

impl InlineElement {
    /// Compile an inline element. Fails only on an invalid pattern.
    pub fn new(pattern: &str, kind: InlineKind) -> Result<Self> {
        Ok(Self {
            pattern: Regex::new(pattern)?,
            kind,
        })
    }

    pub fn kind(&self) -> InlineKind {
        self.kind
    }
}

/// Stock element: `[url label]` external link token
pub fn external_link() -> InlineElement {
    InlineElement::new(
        r"\[([a-zA-Z][a-zA-Z0-9+.-]*:[^\s\]]+)(?:[ \t]+([^\]]*))?\]",
        InlineKind::ExternalLink,
    )
    .expect("valid pattern")
}

/// Stock element: `[label][name]` reference link usage
pub fn reference_link() -> InlineElement {
    InlineElement::new(r"\[([^\[\]]*)\]\[([^\[\]]*)\]", InlineKind::ReferenceLink)
        .expect("valid pattern")
}

/// Stock element: `&name;` entity reference
pub fn entity_reference() -> InlineElement {
    InlineElement::new(r"&([a-zA-Z][a-zA-Z0-9]{1,31});", InlineKind::EntityReference)
        .expect("valid pattern")
}

/// Stock element: `!path!` inline image
pub fn image() -> InlineElement {
    InlineElement::new(r"!([^\s!]+)!", InlineKind::Image).expect("valid pattern")
}

/// Stock element: forced line break, a trailing ` \\`
pub fn line_break() -> InlineElement {
    InlineElement::new(r"[ \t]\\$", InlineKind::LineBreak).expect("valid pattern")
}

/// Run the inline pipeline over one line of unstructured text.
pub fn emit_line(
    elements: &[InlineElement],
    ctx: &ProcessingContext,
    builder: &mut dyn DocumentBuilder,
    text: &str,
) -> Result<()> {
    let mut position = 0;
    while position < text.len() {
        let remaining = &text[position..];

        // Earliest match wins; registration order breaks ties, so only a
        // strictly earlier start replaces the candidate.
        let mut candidate: Option<(usize, usize, &InlineElement)> = None;
        for element in elements {
            if let Some(found) = element.pattern.find(remaining) {
                let better = match candidate {
                    Some((start, _, _)) => found.start() < start,
                    None => true,
                };
                if better {
                    candidate = Some((found.start(), found.end(), element));
                }
            }
        }

        let Some((start, end, element)) = candidate else {
            builder.characters(remaining)?;
            break;
        };

        if start > 0 {
            builder.characters(&remaining[..start])?;
        }

        let matched = &remaining[start..end];
        match element.pattern.captures(matched) {
            Some(captures) => process_match(element.kind, &captures, matched, ctx, builder)?,
            None => builder.characters(matched)?,
        }

        if end > start {
            position += end;
        } else {
            // Zero-width match: emit one character and move on so the
            // scan always terminates
            let Some(next) = remaining[start..].chars().next() else {
                break;
            };
            let step = next.len_utf8();
            builder.characters(&remaining[start..start + step])?;
            position += start + step;
        }
    }
    Ok(())
}

fn process_match(
    kind: InlineKind,
    captures: &Captures<'_>,
    matched: &str,
    ctx: &ProcessingContext,
    builder: &mut dyn DocumentBuilder,
) -> Result<()> {
    match kind {
        InlineKind::ExternalLink => {
            let Some(url) = captures.get(1) else {
                return literal(builder, matched);
            };
            let url = url.as_str();
            let label = captures
                .get(2)
                .map(|m| m.as_str().trim())
                .filter(|label| !label.is_empty())
                .unwrap_or(url);
            emit_link(builder, &LinkAttributes::default(), url, label)
        }
        InlineKind::ReferenceLink => {
            let (Some(label), Some(name)) = (captures.get(1), captures.get(2)) else {
                return literal(builder, matched);
            };
            let label = label.as_str();
            // Collapsed form `[name][]` uses the label as the name
            let name = if name.as_str().trim().is_empty() {
                label
            } else {
                name.as_str()
            };
            match ctx.reference(name) {
                Some(reference) => {
                    let attributes = LinkAttributes {
                        title: reference.title.clone(),
                        ..Default::default()
                    };
                    let href = reference.href.clone();
                    emit_link(builder, &attributes, &href, label)
                }
                None => literal(builder, matched),
            }
        }
        InlineKind::EntityReference => {
            let Some(entity) = captures.get(1) else {
                return literal(builder, matched);
            };
            match builder.entity_reference(entity.as_str()) {
                Err(error) if error.is_unsupported() => literal(builder, matched),
                result => Ok(result?),
            }
        }
        InlineKind::Image => {
            let Some(url) = captures.get(1) else {
                return literal(builder, matched);
            };
            let url = url.as_str();
            match builder.image(&ImageAttributes::default(), url) {
                Err(error) if error.is_unsupported() => literal(builder, url),
                result => Ok(result?),
            }
        }
        InlineKind::LineBreak => match builder.line_break() {
            Err(error) if error.is_unsupported() => Ok(()),
            result => Ok(result?),
        },
    }
}

fn emit_link(
    builder: &mut dyn DocumentBuilder,
    attributes: &LinkAttributes,
    href: &str,
    text: &str,
) -> Result<()> {
    match builder.link(attributes, href, text) {
        Err(error) if error.is_unsupported() => literal(builder, text),
        result => Ok(result?),
    }
}

fn literal(builder: &mut dyn DocumentBuilder, text: &str) -> Result<()> {
    builder.characters(text).map_err(ParseError::from)
}
