//! Attaching results to a caller-owned representation.
//!
//! The core returns an explicit record and never writes into a host
//! document model. [`NegationSink`] is the seam for callers that want
//! push-style delivery; [`SideTable`] is a ready-made store keyed by span
//! position for callers without their own attribute storage.

use std::collections::HashMap;

use crate::classifier::{ClassificationResult, EntitySpan};

/// Receives classification results for caller-owned storage.
pub trait NegationSink {
    fn write(&mut self, span: &EntitySpan, result: &ClassificationResult);
}

/// Side-table of results keyed by `(start, end)` token positions.
#[derive(Debug, Clone, Default)]
pub struct SideTable {
    entries: HashMap<(usize, usize), ClassificationResult>,
}

impl SideTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, span: &EntitySpan) -> Option<&ClassificationResult> {
        self.entries.get(&(span.start, span.end))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl NegationSink for SideTable {
    fn write(&mut self, span: &EntitySpan, result: &ClassificationResult) {
        self.entries.insert((span.start, span.end), result.clone());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classifier::Polarity;

    #[test]
    fn test_side_table_stores_and_looks_up() {
        let mut table = SideTable::new();
        assert!(table.is_empty());

        let span = EntitySpan::new(2, 4);
        table.write(&span, &ClassificationResult::affirmed());

        assert_eq!(table.len(), 1);
        let stored = table.get(&span).unwrap();
        assert!(!stored.negated);
        assert_eq!(stored.polarity(), Polarity::Aff);
        assert!(table.get(&EntitySpan::new(0, 1)).is_none());
    }

    #[test]
    fn test_rewrite_replaces_entry() {
        let mut table = SideTable::new();
        let span = EntitySpan::new(0, 0);

        table.write(&span, &ClassificationResult::affirmed());
        table.write(
            &span,
            &ClassificationResult {
                negated: true,
                cues: vec![(3, 3)],
            },
        );

        assert_eq!(table.len(), 1);
        assert!(table.get(&span).unwrap().negated);
    }
}
