//! Source spans.

use std::ops::Range;

/// A span representing a byte range in source text.
/// This is the canonical span type used throughout the crate.
pub type Span = Range<usize>;

/// Returns the smallest span covering both inputs.
pub fn cover(first: &Span, last: &Span) -> Span {
    first.start.min(last.start)..first.end.max(last.end)
}
