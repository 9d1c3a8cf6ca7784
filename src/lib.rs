//! # work-persona
//!
//! Seven-question work style survey. Answers are summed into four trait
//! scores, banded into levels and matched to a persona and an audience
//! segment; results travel as a shareable `/results?...` link.
//!
//! The `work-persona` binary drives the survey from a terminal. The modules
//! below can also be embedded with any [`progress::ProgressStore`].

pub mod cli;
pub mod config;
pub mod error;
pub mod logging;
pub mod progress;
pub mod render;
pub mod survey;
pub mod version;

pub use error::{Error, ErrorCode, Result};
pub use progress::{ProgressKeeper, ProgressStore, SurveyProgress};
pub use survey::{Assessment, Catalog, Outcome, SurveySession};
