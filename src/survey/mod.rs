//! Work persona questionnaire.
//!
//! Answers are summed into four trait scores, banded into levels and matched
//! against a fixed set of personas and audience segments. Results travel as
//! a shareable `/results?...` link.

pub mod catalog;
pub mod codec;
pub mod runner;
pub mod scoring;
pub mod session;
pub mod types;

pub use catalog::{Catalog, DEFAULT_SEGMENT_ID};
pub use codec::{absolute_link, decode_link, encode_results, DecodedResult};
pub use runner::run_interactive;
pub use scoring::{
    calculate_traits, classify, determine_persona, determine_segment, trait_levels, Assessment,
    MAX_TRAIT_SCORE,
};
pub use session::{Outcome, Step, SurveySession};
pub use types::{
    Answer, Answers, AudienceSegment, Level, Persona, Question, Trait, TraitLevels, TraitScores,
};
