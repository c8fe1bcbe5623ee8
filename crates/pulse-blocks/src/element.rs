//! Single unmarked elements identified by a regex (e.g. a status badge).

use std::ops::Range;

use regex::Regex;

use crate::error::Result;
use crate::marker::{RegionState, Span};

/// An element kept at exactly one occurrence without surrounding markers.
#[derive(Debug, Clone)]
pub struct Element {
    name: String,
    pattern: Regex,
    anchor: Option<Regex>,
}

impl Element {
    /// Create an element from its identifying pattern.
    ///
    /// `anchor`, when given, locates the line after which a missing element is
    /// inserted; without an anchor (or when the anchor does not match) the
    /// element goes to the start of the document.
    pub fn new(name: impl Into<String>, pattern: &str, anchor: Option<&str>) -> Result<Self> {
        Ok(Self {
            name: name.into(),
            pattern: Regex::new(pattern)?,
            anchor: anchor.map(Regex::new).transpose()?,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn pattern(&self) -> &Regex {
        &self.pattern
    }

    /// All occurrences in document order.
    pub fn find_all(&self, document: &str) -> Vec<Range<usize>> {
        self.pattern.find_iter(document).map(|m| m.range()).collect()
    }

    /// Occurrence count expressed as a region state.
    pub fn state(&self, document: &str) -> RegionState {
        state_of(self.find_all(document).len())
    }

    /// Occurrences that do not overlap any of `excluded`.
    ///
    /// Matches inside a marker region belong to that region and are replaced
    /// with it, so they never count as the element's own occurrence.
    pub fn find_outside(&self, document: &str, excluded: &[Span]) -> Vec<Range<usize>> {
        self.pattern
            .find_iter(document)
            .map(|m| m.range())
            .filter(|range| !overlaps_any(range, excluded))
            .collect()
    }

    /// Like [`Element::state`], ignoring occurrences inside `excluded`.
    pub fn state_outside(&self, document: &str, excluded: &[Span]) -> RegionState {
        state_of(self.find_outside(document, excluded).len())
    }

    /// Byte offset just after the first anchor line outside `excluded`.
    pub(crate) fn anchor_end(&self, document: &str, excluded: &[Span]) -> Option<usize> {
        let anchor = self.anchor.as_ref()?;
        anchor
            .find_iter(document)
            .find(|m| !overlaps_any(&m.range(), excluded))
            .map(|m| m.end())
    }
}

fn state_of(count: usize) -> RegionState {
    match count {
        0 => RegionState::Missing,
        1 => RegionState::Present,
        count => RegionState::Duplicated { count },
    }
}

fn overlaps_any(range: &Range<usize>, spans: &[Span]) -> bool {
    spans
        .iter()
        .any(|span| range.start < span.end && span.start < range.end)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn badge() -> Element {
        Element::new("badge", r"!\[Sync\]\([^)]+\)", Some(r"(?m)^# .*$")).unwrap()
    }

    #[test]
    fn counts_occurrences() {
        let el = badge();
        assert_eq!(el.state("nothing"), RegionState::Missing);
        assert_eq!(el.state("![Sync](a)"), RegionState::Present);
        assert_eq!(
            el.state("![Sync](a) ![Sync](b)"),
            RegionState::Duplicated { count: 2 }
        );
    }

    #[test]
    fn anchor_end_is_end_of_heading_line() {
        let doc = "intro\n# Title\nbody";
        assert_eq!(badge().anchor_end(doc, &[]), Some("intro\n# Title".len()));
    }

    #[test]
    fn excluded_spans_hide_matches_and_anchors() {
        let doc = "<S>\n# Inner\n![Sync](a)\n<E>\n# Outer\n";
        let region = Span {
            start: 0,
            end: doc.find("<E>").unwrap() + 3,
        };
        let el = badge();
        assert_eq!(el.state(doc), RegionState::Present);
        assert_eq!(el.state_outside(doc, &[region]), RegionState::Missing);
        assert_eq!(el.anchor_end(doc, &[region]), Some(doc.len() - 1));
    }

    #[test]
    fn invalid_pattern_is_error() {
        assert!(Element::new("bad", "(", None).is_err());
    }
}
