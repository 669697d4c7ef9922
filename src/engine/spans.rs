//! Consumed-span bookkeeping.
//!
//! A substring of the title may feed at most one node per dimension. When a
//! rule produces a node, its byte range is recorded here; later (lower
//! priority) rules of the same dimension skip any match overlapping a
//! recorded range. This is what keeps `ANCHO: 22MM` from also being read as
//! a bare `22MM`.
//!
//! Titles are short and carry a handful of matches, so a linear scan over a
//! small vector per dimension beats anything cleverer.

use crate::{Dimension, Range};
use std::collections::HashMap;

#[derive(Debug, Default)]
pub(crate) struct ConsumedSpans {
    by_dim: HashMap<Dimension, Vec<Range>>,
}

impl ConsumedSpans {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// True when `range` overlaps nothing consumed in `dim`.
    pub(crate) fn is_free(&self, dim: Dimension, range: &Range) -> bool {
        self.by_dim.get(&dim).is_none_or(|taken| taken.iter().all(|r| !r.overlaps(range)))
    }

    pub(crate) fn consume(&mut self, dim: Dimension, range: Range) {
        self.by_dim.entry(dim).or_default().push(range);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn overlap_is_per_dimension() {
        let mut spans = ConsumedSpans::new();
        spans.consume(Dimension::Measurement, Range { start: 0, end: 11 });

        assert!(!spans.is_free(Dimension::Measurement, &Range { start: 7, end: 11 }));
        assert!(spans.is_free(Dimension::Measurement, &Range { start: 11, end: 15 }));
        assert!(spans.is_free(Dimension::Diamond, &Range { start: 7, end: 11 }));
    }
}
