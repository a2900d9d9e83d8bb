//! Scope resolution: how far a cue's negating effect extends.
//!
//! The central NegEx rule: a cue's reach is one-sided and clause-bounded.
//! Preceding cues scope forward to the sentence end, following cues scope
//! backward to the sentence start, and either direction is truncated at the
//! nearest termination cue or boundary punctuation, then capped by the
//! optional maximum window. A cue whose scope collapses to nothing simply
//! produces no scope.

use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::lexicon::{CueCategory, CueDirection};
use crate::matcher::CueMatch;
use crate::token::Token;

/// Punctuation that halts scope propagation by default.
///
/// Commas are deliberately absent: French clinical enumerations routinely
/// continue a negation across them ("pas de fracture, ni de luxation").
pub const DEFAULT_BOUNDARY_PUNCT: &[&str] = &[".", ";", ":", "!", "?"];

/// Token interval a true cue negates, inclusive on both ends.
///
/// Invariant: `lo <= hi` and the interval lies within the sentence the cue
/// was matched in. Empty scopes are never materialized.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct NegationScope {
    /// First negated token
    pub lo: usize,
    /// Last negated token
    pub hi: usize,
    /// Inclusive token range of the cue that produced this scope
    pub cue: (usize, usize),
}

impl NegationScope {
    /// Does the inclusive range `[start, end]` share at least one token?
    pub fn overlaps(&self, start: usize, end: usize) -> bool {
        self.lo <= end && start <= self.hi
    }

    /// Number of tokens covered.
    pub fn len(&self) -> usize {
        self.hi - self.lo + 1
    }
}

impl fmt::Display for NegationScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "tokens {}..={} (cue {}..={})",
            self.lo, self.hi, self.cue.0, self.cue.1
        )
    }
}

/// Resolves each true cue match into the token interval it negates.
#[derive(Debug, Clone)]
pub struct ScopeResolver {
    max_window: Option<usize>,
    boundary_punct: BTreeSet<String>,
}

impl Default for ScopeResolver {
    fn default() -> Self {
        Self {
            max_window: None,
            boundary_punct: DEFAULT_BOUNDARY_PUNCT
                .iter()
                .map(|p| p.to_string())
                .collect(),
        }
    }
}

impl ScopeResolver {
    /// Resolver with an optional cap on scope length (in tokens).
    pub fn new(max_window: Option<usize>) -> Self {
        Self {
            max_window,
            ..Self::default()
        }
    }

    /// Replace the punctuation set that halts propagation.
    pub fn with_boundary_punct<I, S>(mut self, punct: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.boundary_punct = punct.into_iter().map(Into::into).collect();
        self
    }

    /// One scope per true cue; collapsed scopes produce nothing.
    ///
    /// `matches` is the full matcher output: termination matches contribute
    /// barriers, pseudo matches are ignored (the matcher already used them
    /// for suppression).
    pub fn resolve(&self, tokens: &[Token], matches: &[CueMatch]) -> Vec<NegationScope> {
        if let Some(0) = self.max_window {
            return Vec::new();
        }

        let barrier = self.barriers(tokens, matches);

        matches
            .iter()
            .filter_map(|m| match m.direction {
                CueDirection::Forward => self.forward(tokens.len(), &barrier, m),
                CueDirection::Backward => self.backward(&barrier, m),
                CueDirection::None => None,
            })
            .collect()
    }

    /// Token positions that stop propagation: termination-cue tokens and
    /// boundary punctuation.
    fn barriers(&self, tokens: &[Token], matches: &[CueMatch]) -> Vec<bool> {
        let mut barrier = vec![false; tokens.len()];
        for m in matches {
            if m.category == CueCategory::Termination {
                for flag in &mut barrier[m.start..=m.end] {
                    *flag = true;
                }
            }
        }
        for (i, token) in tokens.iter().enumerate() {
            if self.boundary_punct.contains(&token.norm) {
                barrier[i] = true;
            }
        }
        barrier
    }

    fn forward(&self, len: usize, barrier: &[bool], m: &CueMatch) -> Option<NegationScope> {
        let lo = m.end + 1;
        if lo >= len {
            return None;
        }
        let cap = match self.max_window {
            Some(window) => (lo + window - 1).min(len - 1),
            None => len - 1,
        };
        let mut hi = None;
        for i in lo..=cap {
            if barrier[i] {
                break;
            }
            hi = Some(i);
        }
        hi.map(|hi| NegationScope {
            lo,
            hi,
            cue: m.range(),
        })
    }

    fn backward(&self, barrier: &[bool], m: &CueMatch) -> Option<NegationScope> {
        if m.start == 0 {
            return None;
        }
        let hi = m.start - 1;
        let floor = match self.max_window {
            Some(window) => hi.saturating_sub(window - 1),
            None => 0,
        };
        let mut lo = None;
        for i in (floor..=hi).rev() {
            if barrier[i] {
                break;
            }
            lo = Some(i);
        }
        lo.map(|lo| NegationScope {
            lo,
            hi,
            cue: m.range(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexicon::{CueCategory, CueLexicon};
    use crate::matcher::CueMatcher;
    use crate::token::{Normalization, Token};

    fn tokens(words: &[&str]) -> Vec<Token> {
        let normalization = Normalization::default();
        words
            .iter()
            .enumerate()
            .map(|(i, w)| Token::new(i, *w, &normalization))
            .collect()
    }

    fn lexicon() -> CueLexicon {
        CueLexicon::empty_builder()
            .add("pas de", CueCategory::Preceding)
            .add("sans", CueCategory::Preceding)
            .add("négatif", CueCategory::Following)
            .add("mais", CueCategory::Termination)
            .build()
            .unwrap()
    }

    fn resolve(words: &[&str], resolver: &ScopeResolver) -> Vec<NegationScope> {
        let lexicon = lexicon();
        let tokens = tokens(words);
        let matches = CueMatcher::new(&lexicon).find_matches(&tokens);
        resolver.resolve(&tokens, &matches)
    }

    #[test]
    fn test_forward_scope_to_sentence_end() {
        let scopes = resolve(&["sans", "fracture", "visible"], &ScopeResolver::default());

        assert_eq!(scopes.len(), 1);
        assert_eq!((scopes[0].lo, scopes[0].hi), (1, 2));
        assert_eq!(scopes[0].cue, (0, 0));
    }

    #[test]
    fn test_forward_scope_truncated_at_termination() {
        // termination at position 3: the forward scope must stop at 2
        let scopes = resolve(
            &["pas", "de", "fièvre", "mais", "une", "toux"],
            &ScopeResolver::default(),
        );

        assert_eq!(scopes.len(), 1);
        assert_eq!((scopes[0].lo, scopes[0].hi), (2, 2));
    }

    #[test]
    fn test_forward_scope_truncated_at_punctuation() {
        let scopes = resolve(
            &["sans", "anomalie", ".", "Fracture", "ancienne"],
            &ScopeResolver::default(),
        );

        assert_eq!(scopes.len(), 1);
        assert_eq!((scopes[0].lo, scopes[0].hi), (1, 1));
    }

    #[test]
    fn test_comma_does_not_truncate_by_default() {
        let scopes = resolve(
            &["sans", "fracture", ",", "ni", "luxation"],
            &ScopeResolver::default(),
        );

        assert_eq!(scopes.len(), 1);
        assert_eq!((scopes[0].lo, scopes[0].hi), (1, 4));
    }

    #[test]
    fn test_custom_boundary_punct() {
        let resolver = ScopeResolver::default().with_boundary_punct(vec![","]);
        let scopes = resolve(&["sans", "fracture", ",", "ni", "luxation"], &resolver);

        assert_eq!(scopes.len(), 1);
        assert_eq!((scopes[0].lo, scopes[0].hi), (1, 1));
    }

    #[test]
    fn test_boundary_collapse_produces_no_scope() {
        // preceding cue as the final token: empty scope, no effect
        let scopes = resolve(&["fracture", "sans"], &ScopeResolver::default());
        assert!(scopes.is_empty());
    }

    #[test]
    fn test_cue_directly_before_barrier_produces_no_scope() {
        let scopes = resolve(&["douleur", "sans", ".", "suite"], &ScopeResolver::default());
        assert!(scopes.is_empty());
    }

    #[test]
    fn test_backward_scope_to_sentence_start() {
        let scopes = resolve(&["bilan", "négatif"], &ScopeResolver::default());

        assert_eq!(scopes.len(), 1);
        assert_eq!((scopes[0].lo, scopes[0].hi), (0, 0));
        assert_eq!(scopes[0].cue, (1, 1));
    }

    #[test]
    fn test_backward_cue_at_sentence_start_produces_no_scope() {
        let scopes = resolve(&["négatif", "pour", "covid"], &ScopeResolver::default());
        assert!(scopes.is_empty());
    }

    #[test]
    fn test_backward_scope_truncated_at_termination() {
        let scopes = resolve(
            &["toux", "mais", "bilan", "négatif"],
            &ScopeResolver::default(),
        );

        assert_eq!(scopes.len(), 1);
        assert_eq!((scopes[0].lo, scopes[0].hi), (2, 2));
    }

    #[test]
    fn test_max_window_caps_forward_scope() {
        let resolver = ScopeResolver::new(Some(2));
        let scopes = resolve(&["sans", "signe", "de", "fracture", "recente"], &resolver);

        assert_eq!(scopes.len(), 1);
        assert_eq!((scopes[0].lo, scopes[0].hi), (1, 2));
        assert_eq!(scopes[0].len(), 2);
    }

    #[test]
    fn test_max_window_caps_backward_scope() {
        let resolver = ScopeResolver::new(Some(1));
        let scopes = resolve(&["epanchement", "pleural", "négatif"], &resolver);

        assert_eq!(scopes.len(), 1);
        assert_eq!((scopes[0].lo, scopes[0].hi), (1, 1));
    }

    #[test]
    fn test_zero_window_disables_all_scopes() {
        let resolver = ScopeResolver::new(Some(0));
        let scopes = resolve(&["sans", "fracture"], &resolver);
        assert!(scopes.is_empty());
    }

    #[test]
    fn test_overlaps_is_inclusive() {
        let scope = NegationScope {
            lo: 2,
            hi: 4,
            cue: (0, 1),
        };
        assert!(scope.overlaps(4, 6));
        assert!(scope.overlaps(0, 2));
        assert!(scope.overlaps(3, 3));
        assert!(!scope.overlaps(5, 7));
        assert!(!scope.overlaps(0, 1));
    }

    #[test]
    fn test_scope_display() {
        let scope = NegationScope {
            lo: 6,
            hi: 6,
            cue: (4, 5),
        };
        insta::assert_snapshot!(scope.to_string(), @"tokens 6..=6 (cue 4..=5)");
    }
}
