//! Marker pairs and the two-token region matcher.
//!
//! A region is the span from a start literal through the first end literal
//! that follows it:
//! ```text
//! <!--SYNC-START-->
//! payload
//! <!--SYNC-END-->
//! ```
//! Matching is a plain substring scan (find start, then the next end after
//! it), so the shortest span always wins and a later region can never be
//! swallowed by an earlier one.

use crate::error::{Error, Result};

/// A named pair of literal start/end tokens.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Marker {
    name: String,
    start: String,
    end: String,
}

impl Marker {
    /// Create a marker pair.
    ///
    /// Both literals must be non-empty, distinct, and neither may contain the
    /// other; otherwise matching would be ambiguous.
    ///
    /// # Example
    /// ```
    /// use pulse_blocks::Marker;
    ///
    /// let marker = Marker::new("sync", "<!--SYNC-START-->", "<!--SYNC-END-->").unwrap();
    /// assert_eq!(marker.wrap("X"), "<!--SYNC-START-->\nX\n<!--SYNC-END-->");
    /// ```
    pub fn new(
        name: impl Into<String>,
        start: impl Into<String>,
        end: impl Into<String>,
    ) -> Result<Self> {
        let name = name.into();
        let start = start.into();
        let end = end.into();

        let invalid = |reason: &str| Error::InvalidMarker {
            name: name.clone(),
            reason: reason.to_string(),
        };

        if start.is_empty() || end.is_empty() {
            return Err(invalid("start and end literals must be non-empty"));
        }
        if start.contains(&end) || end.contains(&start) {
            return Err(invalid("one literal contains the other"));
        }

        Ok(Self { name, start, end })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn start(&self) -> &str {
        &self.start
    }

    pub fn end(&self) -> &str {
        &self.end
    }

    /// Build a complete region: start literal, payload, end literal.
    pub fn wrap(&self, payload: &str) -> String {
        format!("{}\n{}\n{}", self.start, payload, self.end)
    }

    /// Whether `text` contains either literal of this marker.
    pub fn appears_in(&self, text: &str) -> bool {
        text.contains(&self.start) || text.contains(&self.end)
    }
}

/// Byte range of one well-formed region, markers included.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

/// A marker literal that could not be paired.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stray {
    /// Start literal with no end before the next start or end-of-document.
    Start(usize),
    /// End literal with no start before it.
    End(usize),
}

impl Stray {
    pub fn offset(&self) -> usize {
        match self {
            Stray::Start(offset) | Stray::End(offset) => *offset,
        }
    }
}

/// Observed condition of one region before synchronization.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegionState {
    /// No literal of the marker appears.
    Missing,
    /// Exactly one well-formed pair and nothing else.
    Present,
    /// Several well-formed pairs and no stray literals.
    Duplicated { count: usize },
    /// At least one literal could not be paired.
    Malformed { pairs: usize, strays: usize },
}

impl RegionState {
    pub fn is_malformed(&self) -> bool {
        matches!(self, RegionState::Malformed { .. })
    }
}

impl std::fmt::Display for RegionState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RegionState::Missing => write!(f, "missing"),
            RegionState::Present => write!(f, "present"),
            RegionState::Duplicated { count } => write!(f, "duplicated ({count} copies)"),
            RegionState::Malformed { pairs, strays } => {
                write!(f, "malformed ({pairs} pairs, {strays} unmatched markers)")
            }
        }
    }
}

/// Result of scanning a document for one marker.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RegionScan {
    /// Well-formed regions in document order.
    pub pairs: Vec<Span>,
    /// Unpaired literals in document order.
    pub strays: Vec<Stray>,
}

impl RegionScan {
    pub fn state(&self) -> RegionState {
        match (self.pairs.len(), self.strays.len()) {
            (0, 0) => RegionState::Missing,
            (1, 0) => RegionState::Present,
            (count, 0) => RegionState::Duplicated { count },
            (pairs, strays) => RegionState::Malformed { pairs, strays },
        }
    }
}

/// Locate every region for `marker` in `document`.
///
/// A start literal followed by another start literal before any end literal
/// is stray; the later start is then tried as the opening of a region.
pub fn scan_regions(document: &str, marker: &Marker) -> RegionScan {
    let start_lit = marker.start();
    let end_lit = marker.end();
    let mut scan = RegionScan::default();
    let mut pos = 0;

    loop {
        let Some(open) = find_from(document, start_lit, pos) else {
            collect_ends(document, end_lit, pos, document.len(), &mut scan.strays);
            break;
        };
        collect_ends(document, end_lit, pos, open, &mut scan.strays);

        let body = open + start_lit.len();
        let Some(close) = find_from(document, end_lit, body) else {
            // Nothing after this point can close, so every remaining start is stray
            let mut next = open;
            while let Some(found) = find_from(document, start_lit, next) {
                scan.strays.push(Stray::Start(found));
                next = found + start_lit.len();
            }
            break;
        };

        match find_from(document, start_lit, body) {
            Some(reopen) if reopen < close => {
                scan.strays.push(Stray::Start(open));
                pos = reopen;
            }
            _ => {
                let end = close + end_lit.len();
                scan.pairs.push(Span { start: open, end });
                pos = end;
            }
        }
    }

    scan
}

/// Whether `text` contains any literal of any of the given markers.
pub fn contains_marker<'a>(text: &str, markers: impl IntoIterator<Item = &'a Marker>) -> bool {
    markers.into_iter().any(|marker| marker.appears_in(text))
}

/// 1-based line number of a byte offset.
pub fn line_of(document: &str, offset: usize) -> usize {
    document[..offset.min(document.len())].matches('\n').count() + 1
}

fn find_from(haystack: &str, needle: &str, from: usize) -> Option<usize> {
    haystack
        .get(from..)
        .and_then(|rest| rest.find(needle))
        .map(|idx| idx + from)
}

fn collect_ends(document: &str, end_lit: &str, from: usize, to: usize, strays: &mut Vec<Stray>) {
    let mut next = from;
    while let Some(found) = find_from(document, end_lit, next) {
        if found + end_lit.len() > to {
            break;
        }
        strays.push(Stray::End(found));
        next = found + end_lit.len();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sync() -> Marker {
        Marker::new("sync", "<S>", "<E>").unwrap()
    }

    #[test]
    fn rejects_empty_literals() {
        assert!(Marker::new("x", "", "<E>").is_err());
        assert!(Marker::new("x", "<S>", "").is_err());
    }

    #[test]
    fn rejects_nested_literals() {
        assert!(Marker::new("x", "<!-- A -->", "A").is_err());
        assert!(Marker::new("x", "END", "<END>").is_err());
    }

    #[test]
    fn no_markers_is_missing() {
        let scan = scan_regions("plain text", &sync());
        assert_eq!(scan.state(), RegionState::Missing);
    }

    #[test]
    fn single_pair_is_present() {
        let doc = "a\n<S>\nx\n<E>\nb";
        let scan = scan_regions(doc, &sync());
        assert_eq!(scan.state(), RegionState::Present);
        assert_eq!(&doc[scan.pairs[0].start..scan.pairs[0].end], "<S>\nx\n<E>");
    }

    #[test]
    fn shortest_span_wins() {
        let doc = "<S>1<E> middle <S>2<E>";
        let scan = scan_regions(doc, &sync());
        assert_eq!(scan.state(), RegionState::Duplicated { count: 2 });
        assert_eq!(&doc[scan.pairs[0].start..scan.pairs[0].end], "<S>1<E>");
    }

    #[test]
    fn start_without_end_is_stray() {
        let scan = scan_regions("<S> dangling", &sync());
        assert_eq!(scan.strays, vec![Stray::Start(0)]);
        assert_eq!(scan.state(), RegionState::Malformed { pairs: 0, strays: 1 });
    }

    #[test]
    fn end_before_start_is_stray() {
        let scan = scan_regions("<E> then <S>x<E>", &sync());
        assert_eq!(scan.strays, vec![Stray::End(0)]);
        assert_eq!(scan.pairs.len(), 1);
    }

    #[test]
    fn reopened_start_marks_earlier_start_stray() {
        let doc = "<S> lost\n<S>x<E>";
        let scan = scan_regions(doc, &sync());
        assert_eq!(scan.strays, vec![Stray::Start(0)]);
        assert_eq!(scan.pairs, vec![Span { start: 9, end: doc.len() }]);
    }

    #[test]
    fn trailing_extra_end_is_stray() {
        let scan = scan_regions("<S>x<E><E>", &sync());
        assert_eq!(scan.pairs.len(), 1);
        assert_eq!(scan.strays, vec![Stray::End(7)]);
    }

    #[test]
    fn line_of_counts_newlines() {
        assert_eq!(line_of("a\nb\nc", 4), 3);
        assert_eq!(line_of("abc", 0), 1);
    }
}
