//! Defusing marker-like text before it is embedded in a payload.
//!
//! A zero-width space is inserted after the first character of every marker
//! literal and every element match, so the text reads the same but can no
//! longer open or close a region.

use crate::sync::Target;

const ZERO_WIDTH_SPACE: char = '\u{200B}';

/// Return `text` with every occurrence of the targets' literals broken up.
///
/// # Example
/// ```
/// use pulse_blocks::{neutralize, vocabulary};
///
/// let echoed = "the model wrote <!--SYNC-END--> here";
/// let safe = neutralize(echoed, &vocabulary::all_targets());
/// assert!(!safe.contains("<!--SYNC-END-->"));
/// ```
pub fn neutralize(text: &str, targets: &[Target]) -> String {
    let mut out = text.to_string();

    for target in targets {
        match target {
            Target::Region(marker) => {
                for literal in [marker.start(), marker.end()] {
                    out = out.replace(literal, &break_up(literal));
                }
            }
            Target::Element(element) => {
                // Resume after each rewritten match so it is never revisited
                let mut cursor = 0;
                while cursor <= out.len() {
                    let Some(found) = element.pattern().find_at(&out, cursor) else {
                        break;
                    };
                    if found.is_empty() {
                        cursor = next_boundary(&out, found.end());
                        continue;
                    }
                    let broken = break_up(found.as_str());
                    let range = found.range();
                    cursor = range.start + broken.len();
                    out.replace_range(range, &broken);
                }
            }
        }
    }

    out
}

/// Byte offset of the character after `at`, or one past the end.
fn next_boundary(text: &str, at: usize) -> usize {
    text[at..].chars().next().map_or(text.len() + 1, |c| at + c.len_utf8())
}

fn break_up(literal: &str) -> String {
    let mut chars = literal.chars();
    let mut broken = String::with_capacity(literal.len() + ZERO_WIDTH_SPACE.len_utf8());
    if let Some(first) = chars.next() {
        broken.push(first);
        broken.push(ZERO_WIDTH_SPACE);
    }
    broken.extend(chars);
    broken
}
