//! Span classification by interval overlap with resolved scopes.
//!
//! A span is negated iff it shares at least one token with at least one
//! negation scope: a monotonic OR, so no tie-break is needed when several
//! scopes disagree, and partial overlap deliberately counts (recall over
//! precision). A single token is the degenerate span `[i, i]`.

use std::fmt;

use serde::ser::SerializeStruct;
use serde::{Deserialize, Serialize, Serializer};

use crate::scope::NegationScope;

/// Candidate entity span: inclusive token indices within one sentence.
///
/// Produced by an upstream extraction step; read-only here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EntitySpan {
    pub start: usize,
    pub end: usize,
}

impl EntitySpan {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    /// A single token as the degenerate span `[i, i]`.
    pub fn token(index: usize) -> Self {
        Self {
            start: index,
            end: index,
        }
    }
}

/// Derived polarity label, strictly determined by the negation flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Polarity {
    Aff,
    Neg,
}

impl Polarity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Polarity::Aff => "AFF",
            Polarity::Neg => "NEG",
        }
    }
}

impl fmt::Display for Polarity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome of classifying one span against its sentence's scopes.
///
/// Polarity is derived from `negated` on demand and never stored, so the
/// two can never diverge. The serialized form carries the derived label as
/// a `polarity` field for downstream consumers.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ClassificationResult {
    /// Whether the span intersects at least one negation scope
    pub negated: bool,
    /// Token ranges of the cues whose scopes intersected the span
    pub cues: Vec<(usize, usize)>,
}

impl ClassificationResult {
    /// Affirmed result with no contributing cues.
    pub fn affirmed() -> Self {
        Self {
            negated: false,
            cues: Vec::new(),
        }
    }

    /// Classify `span` against the resolved scopes of its sentence.
    pub fn from_scopes(span: &EntitySpan, scopes: &[NegationScope]) -> Self {
        let cues: Vec<(usize, usize)> = scopes
            .iter()
            .filter(|scope| scope.overlaps(span.start, span.end))
            .map(|scope| scope.cue)
            .collect();
        Self {
            negated: !cues.is_empty(),
            cues,
        }
    }

    /// Derived label: `NEG` iff `negated`.
    pub fn polarity(&self) -> Polarity {
        if self.negated {
            Polarity::Neg
        } else {
            Polarity::Aff
        }
    }
}

impl Serialize for ClassificationResult {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("ClassificationResult", 3)?;
        state.serialize_field("negated", &self.negated)?;
        state.serialize_field("polarity", self.polarity().as_str())?;
        state.serialize_field("cues", &self.cues)?;
        state.end()
    }
}
