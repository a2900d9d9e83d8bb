//! The per-sentence detection pipeline behind one facade.
//!
//! `NegationDetector` owns the immutable lexicon and the scope-resolution
//! configuration. Every operation is a pure function of its inputs, so one
//! detector can be shared freely across threads; sentences are independent
//! and carry no state between calls.

use serde::{Deserialize, Serialize};

use crate::classifier::{ClassificationResult, EntitySpan};
use crate::error::{ClassifyResult, InputError};
use crate::lexicon::CueLexicon;
use crate::matcher::CueMatcher;
use crate::patterns;
use crate::scope::{NegationScope, ScopeResolver, DEFAULT_BOUNDARY_PUNCT};
use crate::token::Token;

/// Scope-resolution knobs for a [`NegationDetector`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DetectorConfig {
    /// Cap on how many tokens a scope may cover (None = bounded only by the
    /// sentence and its barriers)
    pub max_scope_window: Option<usize>,
    /// Punctuation that halts scope propagation
    pub boundary_punct: Vec<String>,
}

impl Default for DetectorConfig {
    fn default() -> Self {
        Self {
            max_scope_window: None,
            boundary_punct: DEFAULT_BOUNDARY_PUNCT
                .iter()
                .map(|p| p.to_string())
                .collect(),
        }
    }
}

/// Rule-based negation detector in the NegEx tradition.
#[derive(Debug, Clone)]
pub struct NegationDetector {
    lexicon: CueLexicon,
    resolver: ScopeResolver,
}

impl Default for NegationDetector {
    /// Built-in French lexicon, default configuration.
    fn default() -> Self {
        Self::new(patterns::default_lexicon().clone(), DetectorConfig::default())
    }
}

impl NegationDetector {
    pub fn new(lexicon: CueLexicon, config: DetectorConfig) -> Self {
        let resolver =
            ScopeResolver::new(config.max_scope_window).with_boundary_punct(config.boundary_punct);
        Self { lexicon, resolver }
    }

    pub fn lexicon(&self) -> &CueLexicon {
        &self.lexicon
    }

    /// Adapter for callers whose tokenizer yields plain words: builds tokens
    /// with the lexicon's own normalization so matching stays consistent.
    pub fn prepare_tokens(&self, words: &[&str]) -> Vec<Token> {
        words
            .iter()
            .enumerate()
            .map(|(i, word)| Token::new(i, *word, self.lexicon.normalization()))
            .collect()
    }

    /// Resolved negation scopes of one sentence.
    pub fn scopes(&self, tokens: &[Token]) -> Vec<NegationScope> {
        let matches = CueMatcher::new(&self.lexicon).find_matches(tokens);
        self.resolver.resolve(tokens, &matches)
    }

    /// Classify one candidate span within its sentence.
    pub fn classify(
        &self,
        tokens: &[Token],
        span: &EntitySpan,
    ) -> ClassifyResult<ClassificationResult> {
        check_span(tokens.len(), span)?;
        Ok(ClassificationResult::from_scopes(span, &self.scopes(tokens)))
    }

    /// Classify a batch of spans against one sentence.
    ///
    /// Malformed spans yield a per-item error; the rest of the batch is
    /// unaffected. Results come back in input order, one per span.
    pub fn classify_batch(
        &self,
        tokens: &[Token],
        spans: &[EntitySpan],
    ) -> Vec<ClassifyResult<ClassificationResult>> {
        let scopes = self.scopes(tokens);
        spans
            .iter()
            .map(|span| {
                check_span(tokens.len(), span)?;
                Ok(ClassificationResult::from_scopes(span, &scopes))
            })
            .collect()
    }

    /// Token-level negation: each token classified as the degenerate span
    /// `[i, i]`.
    pub fn token_flags(&self, tokens: &[Token]) -> Vec<bool> {
        let scopes = self.scopes(tokens);
        (0..tokens.len())
            .map(|i| scopes.iter().any(|scope| scope.overlaps(i, i)))
            .collect()
    }
}

fn check_span(len: usize, span: &EntitySpan) -> ClassifyResult<()> {
    if span.start > span.end {
        return Err(InputError::InvertedSpan {
            start: span.start,
            end: span.end,
        });
    }
    if span.end >= len {
        return Err(InputError::SpanOutOfBounds {
            start: span.start,
            end: span.end,
            len,
        });
    }
    Ok(())
}
