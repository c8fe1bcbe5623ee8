//! The section synchronizer.
//!
//! Applies an ordered list of updates to a document. Each update acts on the
//! output of the previous one:
//!
//! | regions found          | action                                   |
//! |------------------------|------------------------------------------|
//! | none                   | append a fresh region                    |
//! | one                    | replace it in place                      |
//! | several                | remove all, append one fresh region      |
//! | unpaired literals      | leave them, handle the pairs as above    |
//!
//! Everything outside the touched spans is carried over byte for byte.

use std::ops::Range;

use crate::element::Element;
use crate::error::{Error, Result};
use crate::marker::{Marker, RegionState, Span, Stray, line_of, scan_regions};

/// What an update acts on.
#[derive(Debug, Clone)]
pub enum Target {
    /// A region bounded by a start/end marker pair.
    Region(Marker),
    /// A single regex-identified element.
    Element(Element),
}

impl Target {
    pub fn name(&self) -> &str {
        match self {
            Target::Region(marker) => marker.name(),
            Target::Element(element) => element.name(),
        }
    }
}

/// A target together with its freshly rendered payload.
#[derive(Debug, Clone)]
pub struct Update {
    target: Target,
    payload: String,
}

impl Update {
    /// Replace the content between `marker`'s literals with `payload`.
    pub fn region(marker: Marker, payload: impl Into<String>) -> Self {
        Self {
            target: Target::Region(marker),
            payload: payload.into(),
        }
    }

    /// Keep exactly one occurrence of `element`, equal to `payload`.
    pub fn element(element: Element, payload: impl Into<String>) -> Self {
        Self {
            target: Target::Element(element),
            payload: payload.into(),
        }
    }

    pub fn target(&self) -> &Target {
        &self.target
    }

    pub fn payload(&self) -> &str {
        &self.payload
    }
}

/// An unpaired marker literal left in place for manual cleanup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Anomaly {
    pub region: String,
    pub stray: Stray,
    /// 1-based line of the literal in the document as the update saw it.
    pub line: usize,
}

impl std::fmt::Display for Anomaly {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let kind = match self.stray {
            Stray::Start(_) => "start marker without matching end",
            Stray::End(_) => "end marker without matching start",
        };
        write!(f, "{}: {} at line {}", self.region, kind, self.line)
    }
}

/// Per-update outcome.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegionReport {
    pub name: String,
    /// State found before the update was applied.
    pub state: RegionState,
    /// Whether the update altered the document.
    pub changed: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SyncReport {
    pub regions: Vec<RegionReport>,
    pub anomalies: Vec<Anomaly>,
}

impl SyncReport {
    pub fn changed(&self) -> bool {
        self.regions.iter().any(|r| r.changed)
    }

    pub fn has_anomalies(&self) -> bool {
        !self.anomalies.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncOutcome {
    pub document: String,
    pub report: SyncReport,
}

/// Apply `updates` in order and return the new document.
///
/// Payloads are validated first: a payload that contains any marker literal
/// of the update set, or that matches another element's pattern, is rejected
/// before anything is touched, since it would create phantom boundaries on the
/// next run.
///
/// # Example
/// ```
/// use pulse_blocks::{Marker, Update, synchronize};
///
/// let marker = Marker::new("sync", "<!--SYNC-START-->", "<!--SYNC-END-->").unwrap();
/// let first = synchronize("", &[Update::region(marker.clone(), "X")]).unwrap();
/// assert_eq!(first.document, "<!--SYNC-START-->\nX\n<!--SYNC-END-->");
///
/// let second = synchronize(&first.document, &[Update::region(marker, "Y")]).unwrap();
/// assert_eq!(second.document, "<!--SYNC-START-->\nY\n<!--SYNC-END-->");
/// ```
pub fn synchronize(document: &str, updates: &[Update]) -> Result<SyncOutcome> {
    validate(updates)?;

    let mut current = document.to_string();
    let mut report = SyncReport::default();

    for update in updates {
        let name = update.target.name();
        let (next, state) = match &update.target {
            Target::Region(marker) => {
                let (next, state, strays) = apply_region(&current, marker, &update.payload);
                report
                    .anomalies
                    .extend(strays.into_iter().map(|stray| Anomaly {
                        region: name.to_string(),
                        stray,
                        line: line_of(&current, stray.offset()),
                    }));
                (next, state)
            }
            Target::Element(element) => {
                let regions = region_spans(&current, updates.iter().map(|u| &u.target));
                apply_element(&current, element, &update.payload, &regions)
            }
        };

        let changed = next != current;
        tracing::debug!(region = name, %state, changed, "Synchronized region");
        report.regions.push(RegionReport {
            name: name.to_string(),
            state,
            changed,
        });
        current = next;
    }

    Ok(SyncOutcome {
        document: current,
        report,
    })
}

/// Report the current state of every target without changing anything.
pub fn inspect(document: &str, targets: &[Target]) -> Vec<(String, RegionState)> {
    let regions = region_spans(document, targets);
    targets
        .iter()
        .map(|target| {
            let state = match target {
                Target::Region(marker) => scan_regions(document, marker).state(),
                Target::Element(element) => element.state_outside(document, &regions),
            };
            (target.name().to_string(), state)
        })
        .collect()
}

fn validate(updates: &[Update]) -> Result<()> {
    let markers: Vec<&Marker> = updates
        .iter()
        .filter_map(|u| match &u.target {
            Target::Region(marker) => Some(marker),
            Target::Element(_) => None,
        })
        .collect();
    let elements: Vec<&Element> = updates
        .iter()
        .filter_map(|u| match &u.target {
            Target::Element(element) => Some(element),
            Target::Region(_) => None,
        })
        .collect();

    for update in updates {
        let region = update.target.name();

        for marker in &markers {
            for literal in [marker.start(), marker.end()] {
                if update.payload.contains(literal) {
                    return Err(Error::PayloadContainsMarker {
                        region: region.to_string(),
                        literal: literal.to_string(),
                    });
                }
            }
        }

        if let Target::Element(own) = &update.target {
            let matches = own.find_all(&update.payload).len();
            if matches != 1 {
                return Err(Error::ElementPayloadMismatch {
                    name: own.name().to_string(),
                    matches,
                });
            }
        }

        for element in &elements {
            if element.name() != region && element.pattern().is_match(&update.payload) {
                return Err(Error::PayloadMatchesElement {
                    region: region.to_string(),
                    element: element.name().to_string(),
                });
            }
        }
    }

    Ok(())
}

fn apply_region(document: &str, marker: &Marker, payload: &str) -> (String, RegionState, Vec<Stray>) {
    let scan = scan_regions(document, marker);
    let state = scan.state();
    let region = marker.wrap(payload);

    let next = match scan.pairs.as_slice() {
        [] => append(document, &region),
        [only] => splice(document, only.start..only.end, &region),
        many => {
            let mut rest = document.to_string();
            for span in many.iter().rev() {
                remove_span(&mut rest, *span);
            }
            append(&rest, &region)
        }
    };

    (next, state, scan.strays)
}

/// Well-formed spans of every region target in `targets`.
fn region_spans<'a>(document: &str, targets: impl IntoIterator<Item = &'a Target>) -> Vec<Span> {
    targets
        .into_iter()
        .filter_map(|target| match target {
            Target::Region(marker) => Some(scan_regions(document, marker).pairs),
            Target::Element(_) => None,
        })
        .flatten()
        .collect()
}

/// Keep exactly one `payload` outside `regions`; anything inside a region is
/// that region's content and is left for its own update.
fn apply_element(
    document: &str,
    element: &Element,
    payload: &str,
    regions: &[Span],
) -> (String, RegionState) {
    let matches = element.find_outside(document, regions);
    let state = element.state_outside(document, regions);

    let next = match matches.as_slice() {
        [] => match element.anchor_end(document, regions) {
            Some(idx) => format!("{}\n\n{}{}", &document[..idx], payload, &document[idx..]),
            None if document.is_empty() => payload.to_string(),
            None => format!("{payload}\n\n{document}"),
        },
        [first, rest @ ..] => {
            let mut out = document.to_string();
            for range in rest.iter().rev() {
                remove_element(&mut out, range.clone());
            }
            out.replace_range(first.clone(), payload);
            out
        }
    };

    (next, state)
}

/// Append `region` after a blank-line separator.
///
/// Existing trailing whitespace is kept; only the newlines needed to reach a
/// blank line are added.
fn append(document: &str, region: &str) -> String {
    let separator = if document.is_empty() || document.ends_with("\n\n") {
        ""
    } else if document.ends_with('\n') {
        "\n"
    } else {
        "\n\n"
    };
    format!("{document}{separator}{region}")
}

fn splice(document: &str, range: Range<usize>, replacement: &str) -> String {
    let mut out = String::with_capacity(document.len() + replacement.len());
    out.push_str(&document[..range.start]);
    out.push_str(replacement);
    out.push_str(&document[range.end..]);
    out
}

/// Remove a region together with the blank-line separator that precedes it
/// (or follows it, for a region at the very start).
fn remove_span(document: &mut String, span: Span) {
    let range = if span.start == 0 {
        span.start..span.end + leading_newlines(&document[span.end..])
    } else {
        span.start - trailing_newlines(&document[..span.start])..span.end
    };
    document.replace_range(range, "");
}

/// Remove a duplicate element; when it sits alone at a line start, the
/// separator after it goes too.
fn remove_element(document: &mut String, range: Range<usize>) {
    let at_line_start = range.start == 0 || document[..range.start].ends_with('\n');
    let trail = if at_line_start {
        leading_newlines(&document[range.end..])
    } else {
        0
    };
    document.replace_range(range.start..range.end + trail, "");
}

fn leading_newlines(text: &str) -> usize {
    if text.starts_with("\n\n") {
        2
    } else if text.starts_with('\n') {
        1
    } else {
        0
    }
}

fn trailing_newlines(text: &str) -> usize {
    if text.ends_with("\n\n") {
        2
    } else if text.ends_with('\n') {
        1
    } else {
        0
    }
}
