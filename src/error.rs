//! Error types for lexicon construction and span classification.
//!
//! Two families, mirroring the two failure points of the pipeline: a lexicon
//! that fails to build invalidates everything downstream, while a malformed
//! span only invalidates its own result.

use thiserror::Error;

use crate::lexicon::CueCategory;

/// Fatal configuration errors raised while building a cue lexicon.
///
/// No matching may proceed on a lexicon that failed to build.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// A cue pattern had no terms after normalization.
    #[error("empty cue pattern declared for category {category}")]
    EmptyPattern { category: CueCategory },

    /// The same surface form was declared under two different categories.
    #[error("pattern \"{surface}\" declared as both {existing} and {conflicting}")]
    ConflictingCategory {
        surface: String,
        existing: CueCategory,
        conflicting: CueCategory,
    },
}

/// Per-span input rejections.
///
/// These never abort a batch; other spans in the same sentence are classified
/// normally.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InputError {
    /// Span indices exceed the sentence's token range.
    #[error("span [{start}, {end}] out of bounds for a sentence of {len} tokens")]
    SpanOutOfBounds {
        start: usize,
        end: usize,
        len: usize,
    },

    /// Span start is after its end.
    #[error("inverted span [{start}, {end}]")]
    InvertedSpan { start: usize, end: usize },
}

/// Result type for lexicon construction.
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Result type for span classification.
pub type ClassifyResult<T> = Result<T, InputError>;
