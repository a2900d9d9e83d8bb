//! Rule-based negation detection for clinical text, in the NegEx tradition.
//!
//! Given a sentence that an upstream tokenizer has already segmented, and
//! candidate entity spans from an upstream extraction step, the detector
//! decides whether each span is negated by its context:
//!
//! 1. [`CueMatcher`] scans the tokens for lexicon cues (longest match wins,
//!    pseudo-negations suppress the true cues they contain),
//! 2. [`ScopeResolver`] turns each true cue into the token interval it
//!    negates, truncated at termination cues and boundary punctuation,
//! 3. a span is negated iff it shares at least one token with a scope.
//!
//! Sentences are processed independently and statelessly; the lexicon is
//! built once and shared read-only, so a single [`NegationDetector`] can
//! serve any number of threads.
//!
//! ## Example
//!
//! ```
//! use clinical_negex::{EntitySpan, NegationDetector};
//!
//! let detector = NegationDetector::default();
//! let tokens =
//!     detector.prepare_tokens(&["Le", "patient", "n'", "a", "pas", "de", "fracture", "."]);
//! let result = detector.classify(&tokens, &EntitySpan::new(6, 6)).unwrap();
//!
//! assert!(result.negated);
//! assert_eq!(result.polarity().as_str(), "NEG");
//! ```

mod classifier;
mod detector;
mod error;
mod lexicon;
mod matcher;
pub mod patterns;
mod scope;
mod token;
mod writer;

pub use classifier::{ClassificationResult, EntitySpan, Polarity};
pub use detector::{DetectorConfig, NegationDetector};
pub use error::{ClassifyResult, ConfigError, ConfigResult, InputError};
pub use lexicon::{CueCategory, CueDirection, CueLexicon, CueLexiconBuilder, CuePattern};
pub use matcher::{CueMatch, CueMatcher};
pub use scope::{NegationScope, ScopeResolver, DEFAULT_BOUNDARY_PUNCT};
pub use token::{Normalization, Token};
pub use writer::{NegationSink, SideTable};
