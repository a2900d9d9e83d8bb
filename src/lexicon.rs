//! The cue lexicon: surface patterns mapped to cue categories.
//!
//! Built once at configuration time from the built-in lists (or from
//! scratch), then shared read-only. Patterns are normalized at build time
//! with the same [`Normalization`] the caller uses for tokens, and indexed
//! by first term so the matcher only inspects patterns that can possibly
//! start at a given token.

use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, ConfigResult};
use crate::patterns;
use crate::token::Normalization;

/// Category of a cue pattern.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CueCategory {
    /// "pas de", "aucune", "sans" - negates what follows
    Preceding,
    /// "négatif", "absente" - negates what precedes
    Following,
    /// "pas nécessairement", "sans doute" - looks negative, does not negate
    Pseudo,
    /// "mais", "cependant" - halts scope propagation
    Termination,
}

impl CueCategory {
    /// Direction in which the cue's negating effect propagates.
    pub fn direction(&self) -> CueDirection {
        match self {
            CueCategory::Preceding => CueDirection::Forward,
            CueCategory::Following => CueDirection::Backward,
            CueCategory::Pseudo | CueCategory::Termination => CueDirection::None,
        }
    }

    /// Whether this category actually negates (pseudo and termination do not).
    pub fn is_true_cue(&self) -> bool {
        matches!(self, CueCategory::Preceding | CueCategory::Following)
    }
}

impl fmt::Display for CueCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            CueCategory::Preceding => "preceding",
            CueCategory::Following => "following",
            CueCategory::Pseudo => "pseudo",
            CueCategory::Termination => "termination",
        })
    }
}

/// Match direction of a cue's negating effect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CueDirection {
    /// Scope extends after the cue
    Forward,
    /// Scope extends before the cue
    Backward,
    /// No scope of its own (pseudo, termination)
    None,
}

/// A normalized cue pattern of one or more terms.
///
/// Terms are matched against the `norm` of consecutive tokens; a pattern
/// never matches across the end of the token slice it is scanned over.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CuePattern {
    /// Normalized terms, one per token
    pub terms: Vec<String>,
    pub category: CueCategory,
    pub direction: CueDirection,
}

impl CuePattern {
    /// Number of tokens this pattern covers.
    pub fn len(&self) -> usize {
        self.terms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    /// Space-joined normalized surface, used as the identity key.
    pub fn surface(&self) -> String {
        self.terms.join(" ")
    }
}

/// Immutable cue lexicon, indexed by first term for prefix matching.
///
/// Declaration order is stable and observable: when two patterns of equal
/// length match at the same position, the first-declared pattern wins.
#[derive(Debug, Clone)]
pub struct CueLexicon {
    patterns: Vec<CuePattern>,
    by_first_term: HashMap<String, Vec<usize>>,
    normalization: Normalization,
}

impl CueLexicon {
    /// Builder seeded with the built-in French clinical cue lists.
    pub fn builder() -> CueLexiconBuilder {
        CueLexiconBuilder::with_defaults()
    }

    /// Builder with no built-in patterns.
    pub fn empty_builder() -> CueLexiconBuilder {
        CueLexiconBuilder::new()
    }

    /// All patterns in declaration order.
    pub fn patterns(&self) -> &[CuePattern] {
        &self.patterns
    }

    /// Normalization the lexicon's patterns were folded with.
    ///
    /// Token norms must be produced with the same settings or multi-word
    /// cues will silently stop matching.
    pub fn normalization(&self) -> &Normalization {
        &self.normalization
    }

    /// Indices of patterns whose first term equals `norm`, in declaration order.
    pub fn candidates(&self, norm: &str) -> &[usize] {
        self.by_first_term
            .get(norm)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Pattern at a given declaration index.
    pub fn get(&self, index: usize) -> &CuePattern {
        &self.patterns[index]
    }

    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }
}

/// Builder for [`CueLexicon`]; all validation happens in [`build`](Self::build).
///
/// Patterns are given as whitespace-separated surface strings ("pas de",
/// "aucun signe de") and split into per-token terms after normalization.
pub struct CueLexiconBuilder {
    entries: Vec<(String, CueCategory)>,
    removals: Vec<String>,
    normalization: Normalization,
}

impl CueLexiconBuilder {
    /// Empty builder.
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
            removals: Vec::new(),
            normalization: Normalization::default(),
        }
    }

    /// Builder pre-loaded with the built-in French clinical cue lists.
    pub fn with_defaults() -> Self {
        let mut builder = Self::new();
        for &term in patterns::PRECEDING {
            builder.entries.push((term.to_string(), CueCategory::Preceding));
        }
        for &term in patterns::FOLLOWING {
            builder.entries.push((term.to_string(), CueCategory::Following));
        }
        for &term in patterns::PSEUDO {
            builder.entries.push((term.to_string(), CueCategory::Pseudo));
        }
        for &term in patterns::TERMINATION {
            builder
                .entries
                .push((term.to_string(), CueCategory::Termination));
        }
        builder
    }

    /// Normalization applied to every pattern at build time.
    pub fn normalization(mut self, normalization: Normalization) -> Self {
        self.normalization = normalization;
        self
    }

    /// Declare a pattern. Whitespace separates terms.
    pub fn add(mut self, pattern: impl Into<String>, category: CueCategory) -> Self {
        self.entries.push((pattern.into(), category));
        self
    }

    /// Suppress a pattern by surface form (typically a built-in default).
    pub fn remove(mut self, pattern: impl Into<String>) -> Self {
        self.removals.push(pattern.into());
        self
    }

    /// Validate and freeze the lexicon.
    ///
    /// Fails on empty patterns and on the same surface form declared under
    /// two categories. Exact duplicates (same surface, same category) are
    /// collapsed silently.
    pub fn build(self) -> ConfigResult<CueLexicon> {
        let removals: Vec<String> = self
            .removals
            .iter()
            .map(|r| normalize_surface(r, &self.normalization))
            .collect();

        let mut patterns: Vec<CuePattern> = Vec::new();
        let mut by_surface: HashMap<String, CueCategory> = HashMap::new();
        let mut by_first_term: HashMap<String, Vec<usize>> = HashMap::new();

        for (raw, category) in self.entries {
            let terms: Vec<String> = self
                .normalization
                .apply(&raw)
                .split_whitespace()
                .map(str::to_string)
                .collect();
            if terms.is_empty() {
                return Err(ConfigError::EmptyPattern { category });
            }

            let surface = terms.join(" ");
            if removals.contains(&surface) {
                continue;
            }
            if let Some(&existing) = by_surface.get(&surface) {
                if existing == category {
                    continue;
                }
                return Err(ConfigError::ConflictingCategory {
                    surface,
                    existing,
                    conflicting: category,
                });
            }

            by_surface.insert(surface, category);
            by_first_term
                .entry(terms[0].clone())
                .or_default()
                .push(patterns.len());
            patterns.push(CuePattern {
                terms,
                direction: category.direction(),
                category,
            });
        }

        Ok(CueLexicon {
            patterns,
            by_first_term,
            normalization: self.normalization,
        })
    }
}

impl Default for CueLexiconBuilder {
    fn default() -> Self {
        Self::new()
    }
}

fn normalize_surface(raw: &str, normalization: &Normalization) -> String {
    normalization
        .apply(raw)
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}
