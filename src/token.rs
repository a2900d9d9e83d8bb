//! Token input model and text normalization.
//!
//! Tokens arrive pre-segmented from an upstream tokenizer; this crate never
//! splits text itself. The only text processing done here is deriving the
//! normalized form used for cue matching: case folding plus diacritic
//! stripping, both configurable.

use serde::{Deserialize, Serialize};
use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

/// Controls how surface text is folded into its matching form.
///
/// Disabling `lowercase` is permitted but hurts recall badly on clinical
/// text, where cue words routinely start sentences.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Normalization {
    /// Lowercase the text ("Aucune" -> "aucune")
    pub lowercase: bool,
    /// Strip combining diacritics ("évolution" -> "evolution")
    pub strip_diacritics: bool,
}

impl Default for Normalization {
    fn default() -> Self {
        Self {
            lowercase: true,
            strip_diacritics: true,
        }
    }
}

impl Normalization {
    /// Fold a surface form into its matching form.
    pub fn apply(&self, text: &str) -> String {
        let mut out: String = if self.strip_diacritics {
            // NFD decomposition, then drop the combining marks
            text.nfd().filter(|c| !is_combining_mark(*c)).collect()
        } else {
            text.to_string()
        };
        if self.lowercase {
            out = out.to_lowercase();
        }
        out
    }
}

/// A single token of one sentence, as produced by the external tokenizer.
///
/// Immutable once constructed. `norm` is what the matcher compares against
/// lexicon terms; it must be folded with the same [`Normalization`] the
/// lexicon was built with.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Token {
    /// Position within the owning sentence (0-based)
    pub index: usize,
    /// Original surface text
    pub text: String,
    /// Normalized form used for cue matching
    pub norm: String,
}

impl Token {
    /// Build a token, deriving the matching form from the surface text.
    pub fn new(index: usize, text: impl Into<String>, normalization: &Normalization) -> Self {
        let text = text.into();
        let norm = normalization.apply(&text);
        Self { index, text, norm }
    }

    /// Build a token with a caller-supplied normalized form (e.g. a lemma).
    pub fn with_norm(index: usize, text: impl Into<String>, norm: impl Into<String>) -> Self {
        Self {
            index,
            text: text.into(),
            norm: norm.into(),
        }
    }
}
