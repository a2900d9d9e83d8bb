//! Built-in French clinical cue lists.
//!
//! Curated in the NegEx tradition for French clinical notes: preceding and
//! following true cues, pseudo-negations that must suppress the true cues
//! they contain, and termination markers that halt scope propagation.
//! Patterns are written with their natural casing and diacritics; the
//! lexicon builder folds them at build time.

use once_cell::sync::Lazy;

use crate::lexicon::CueLexicon;

/// Cues that negate the text after them.
pub const PRECEDING: &[&str] = &[
    "absence de",
    "absence d'",
    "aucun",
    "aucune",
    "aucun signe de",
    "aucune trace de",
    "dépourvu de",
    "dépourvue de",
    "exempt de",
    "exempte de",
    "jamais de",
    "n'",
    "ne",
    "négatif pour",
    "ni",
    "non",
    "nullement",
    "pas de",
    "pas d'",
    "plus de",
    "plus d'",
    "sans",
];

/// Cues that negate the text before them.
pub const FOLLOWING: &[&str] = &[
    "absent",
    "absente",
    "absents",
    "absentes",
    "écarté",
    "écartée",
    "exclu",
    "exclue",
    "infirmé",
    "infirmée",
    "négatif",
    "négative",
    "négatifs",
    "négatives",
    "non retrouvé",
    "non retrouvée",
];

/// Patterns that look like negations but do not negate.
pub const PSEUDO: &[&str] = &[
    "aucun doute",
    "ne semble pas exclure",
    "non négligeable",
    "pas forcément",
    "pas nécessairement",
    "pas seulement",
    "pas uniquement",
    "sans aucun doute",
    "sans certitude",
    "sans difficulté",
    "sans doute",
    "sans problème",
];

/// Markers that stop a negation scope, typically opening a new clause.
pub const TERMINATION: &[&str] = &[
    "bien que",
    "cependant",
    "en dehors de",
    "excepté",
    "hormis",
    "mais",
    "malgré",
    "mis à part",
    "néanmoins",
    "quoique",
    "toutefois",
];

static DEFAULT_LEXICON: Lazy<CueLexicon> = Lazy::new(|| {
    CueLexicon::builder()
        .build()
        .expect("built-in cue lists are well-formed")
});

/// The process-wide default lexicon built from the lists above.
pub fn default_lexicon() -> &'static CueLexicon {
    Lazy::force(&DEFAULT_LEXICON)
}
