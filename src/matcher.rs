//! Cue matching over one tokenized sentence.
//!
//! Longest-match-wins scan: at each token position the matcher tries every
//! lexicon pattern starting with that token's norm and keeps the longest
//! full match; equal-length candidates resolve to the first-declared
//! pattern. The scan advances one token at a time, so overlapping matches
//! from distinct start positions are all recorded. Pseudo matches then
//! suppress any true cue whose range they fully contain.

use serde::{Deserialize, Serialize};

use crate::lexicon::{CueCategory, CueDirection, CueLexicon};
use crate::token::Token;

/// One resolved occurrence of a lexicon pattern in a sentence.
///
/// Sentence-transient: produced per call, consumed by scope resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CueMatch {
    /// First token of the match (inclusive)
    pub start: usize,
    /// Last token of the match (inclusive)
    pub end: usize,
    /// Declaration index of the matched pattern in the lexicon
    pub pattern: usize,
    pub category: CueCategory,
    pub direction: CueDirection,
}

impl CueMatch {
    /// Inclusive token range of the match.
    pub fn range(&self) -> (usize, usize) {
        (self.start, self.end)
    }

    fn contained_in(&self, lo: usize, hi: usize) -> bool {
        lo <= self.start && self.end <= hi
    }
}

/// Scans one sentence at a time for occurrences of lexicon patterns.
///
/// Holds only a borrow of the immutable lexicon; cheap to create per call
/// and safe to use from any number of threads.
pub struct CueMatcher<'a> {
    lexicon: &'a CueLexicon,
}

impl<'a> CueMatcher<'a> {
    pub fn new(lexicon: &'a CueLexicon) -> Self {
        Self { lexicon }
    }

    /// All cue matches in `tokens`, pseudo suppression already applied.
    ///
    /// Matches of every category are returned, including
    /// [`CueCategory::Pseudo`] and [`CueCategory::Termination`]; downstream
    /// stages partition them. A pattern never matches past the end of the
    /// slice, so matching cannot cross a sentence boundary as long as each
    /// call receives exactly one sentence.
    pub fn find_matches(&self, tokens: &[Token]) -> Vec<CueMatch> {
        let mut matches = Vec::new();
        for start in 0..tokens.len() {
            if let Some(m) = self.longest_at(tokens, start) {
                matches.push(m);
            }
        }

        let pseudo_ranges: Vec<(usize, usize)> = matches
            .iter()
            .filter(|m| m.category == CueCategory::Pseudo)
            .map(|m| (m.start, m.end))
            .collect();
        if !pseudo_ranges.is_empty() {
            matches.retain(|m| {
                !m.category.is_true_cue()
                    || !pseudo_ranges
                        .iter()
                        .any(|&(lo, hi)| m.contained_in(lo, hi))
            });
        }
        matches
    }

    /// Longest pattern fully matching at `start`.
    ///
    /// Candidates arrive in declaration order and only a strictly longer
    /// match replaces the current best, which gives the documented
    /// first-declared-wins tie-break for free.
    fn longest_at(&self, tokens: &[Token], start: usize) -> Option<CueMatch> {
        let first = tokens[start].norm.as_str();
        let mut best: Option<(usize, usize)> = None; // (term count, pattern index)

        for &index in self.lexicon.candidates(first) {
            let pattern = self.lexicon.get(index);
            let len = pattern.len();
            if start + len > tokens.len() {
                continue;
            }
            let full_match = pattern
                .terms
                .iter()
                .zip(&tokens[start..start + len])
                .all(|(term, token)| *term == token.norm);
            if full_match && best.map_or(true, |(best_len, _)| len > best_len) {
                best = Some((len, index));
            }
        }

        best.map(|(len, index)| {
            let pattern = self.lexicon.get(index);
            CueMatch {
                start,
                end: start + len - 1,
                pattern: index,
                category: pattern.category,
                direction: pattern.direction,
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexicon::CueLexicon;
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
            .add("pas", CueCategory::Preceding)
            .add("pas de", CueCategory::Preceding)
            .add("pas d'évolution", CueCategory::Pseudo)
            .add("sans", CueCategory::Preceding)
            .add("sans doute", CueCategory::Pseudo)
            .add("négatif", CueCategory::Following)
            .add("mais", CueCategory::Termination)
            .build()
            .unwrap()
    }

    #[test]
    fn test_single_token_cue() {
        let lexicon = lexicon();
        let matcher = CueMatcher::new(&lexicon);
        let matches = matcher.find_matches(&tokens(&["scanner", "sans", "anomalie"]));

        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].range(), (1, 1));
        assert_eq!(matches[0].category, CueCategory::Preceding);
    }

    #[test]
    fn test_longest_match_prefers_multi_token() {
        let lexicon = lexicon();
        let matcher = CueMatcher::new(&lexicon);
        let matches = matcher.find_matches(&tokens(&["pas", "de", "fracture"]));

        // "pas de" beats its one-token prefix "pas"
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].range(), (0, 1));
        assert_eq!(lexicon.get(matches[0].pattern).surface(), "pas de");
    }

    #[test]
    fn test_pseudo_wins_over_true_cue_prefix() {
        let lexicon = lexicon();
        let matcher = CueMatcher::new(&lexicon);
        let matches = matcher.find_matches(&tokens(&["pas", "d'évolution", "notable"]));

        // longest match at position 0 is the two-term pseudo "pas
        // d'évolution"; the one-token true cue "pas" is never recorded
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].category, CueCategory::Pseudo);
        assert_eq!(matches[0].range(), (0, 1));
    }

    #[test]
    fn test_pseudo_suppresses_contained_true_cue() {
        // true cue starting *inside* a pseudo range, removed by the
        // containment pass rather than by longest-match
        let lexicon = CueLexicon::empty_builder()
            .add("pas", CueCategory::Preceding)
            .add("ne semble pas exclure", CueCategory::Pseudo)
            .build()
            .unwrap();
        let matcher = CueMatcher::new(&lexicon);
        let matches =
            matcher.find_matches(&tokens(&["ne", "semble", "pas", "exclure", "une", "fracture"]));

        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].category, CueCategory::Pseudo);
        assert_eq!(matches[0].range(), (0, 3));
    }

    #[test]
    fn test_independent_cues_all_kept() {
        let lexicon = lexicon();
        let matcher = CueMatcher::new(&lexicon);
        let matches =
            matcher.find_matches(&tokens(&["sans", "fracture", "et", "sans", "luxation"]));

        assert_eq!(matches.len(), 2);
        assert_eq!(matches[0].range(), (0, 0));
        assert_eq!(matches[1].range(), (3, 3));
    }

    #[test]
    fn test_termination_matches_are_reported() {
        let lexicon = lexicon();
        let matcher = CueMatcher::new(&lexicon);
        let matches = matcher.find_matches(&tokens(&["pas", "de", "fièvre", "mais", "toux"]));

        assert_eq!(matches.len(), 2);
        assert_eq!(matches[1].category, CueCategory::Termination);
        assert_eq!(matches[1].range(), (3, 3));
    }

    #[test]
    fn test_pattern_does_not_match_past_slice_end() {
        let lexicon = lexicon();
        let matcher = CueMatcher::new(&lexicon);
        // "pas" is sentence-final: "pas de" cannot match, "pas" still does
        let matches = matcher.find_matches(&tokens(&["douleur", "pas"]));

        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].range(), (1, 1));
        assert_eq!(lexicon.get(matches[0].pattern).surface(), "pas");
    }

    #[test]
    fn test_no_cues_no_matches() {
        let lexicon = lexicon();
        let matcher = CueMatcher::new(&lexicon);
        let matches = matcher.find_matches(&tokens(&["patient", "admis", "pour", "douleur"]));
        assert!(matches.is_empty());
    }

    #[test]
    fn test_matching_is_case_and_diacritic_insensitive() {
        let lexicon = lexicon();
        let matcher = CueMatcher::new(&lexicon);
        let matches = matcher.find_matches(&tokens(&["bilan", "NÉGATIF"]));

        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].category, CueCategory::Following);
    }
}
