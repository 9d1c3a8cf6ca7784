//! Core types for the survey: traits, levels, questions, personas and segments.
//!
//! Catalog records borrow `'static` data so the bundled catalog can live in
//! constants and keep its authored order.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Chosen answers, keyed by question id.
pub type Answers = BTreeMap<String, String>;

// ─────────────────────────────────────────────────────────────────
// Trait
// ─────────────────────────────────────────────────────────────────

/// The four work-style dimensions a survey measures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Trait {
    Vision,
    Structure,
    Speed,
    Empathy,
}

impl Trait {
    /// Slug used in JSON output and CLI args.
    pub fn slug(&self) -> &'static str {
        match self {
            Trait::Vision => "vision",
            Trait::Structure => "structure",
            Trait::Speed => "speed",
            Trait::Empathy => "empathy",
        }
    }

    /// Human-readable label.
    pub fn display_name(&self) -> &'static str {
        match self {
            Trait::Vision => "Vision",
            Trait::Structure => "Structure",
            Trait::Speed => "Speed",
            Trait::Empathy => "Empathy",
        }
    }

    /// All traits in display order.
    pub fn all() -> &'static [Trait] {
        &[Trait::Vision, Trait::Structure, Trait::Speed, Trait::Empathy]
    }
}

impl fmt::Display for Trait {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

impl FromStr for Trait {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "vision" => Ok(Trait::Vision),
            "structure" => Ok(Trait::Structure),
            "speed" => Ok(Trait::Speed),
            "empathy" => Ok(Trait::Empathy),
            _ => Err(format!(
                "Unknown trait '{}'. Valid: vision, structure, speed, empathy",
                s
            )),
        }
    }
}

// ─────────────────────────────────────────────────────────────────
// Level
// ─────────────────────────────────────────────────────────────────

/// Three-band classification of a raw trait score.
///
/// Ordered `Low < Medium < High`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Level {
    Low,
    Medium,
    High,
}

impl Level {
    pub fn slug(&self) -> &'static str {
        match self {
            Level::Low => "low",
            Level::Medium => "medium",
            Level::High => "high",
        }
    }

    /// Whether two levels sit next to each other (high/medium or medium/low).
    pub fn is_adjacent(&self, other: Level) -> bool {
        matches!(
            (self, other),
            (Level::High, Level::Medium)
                | (Level::Medium, Level::High)
                | (Level::Medium, Level::Low)
                | (Level::Low, Level::Medium)
        )
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.slug())
    }
}

// ─────────────────────────────────────────────────────────────────
// Trait Scores / Levels
// ─────────────────────────────────────────────────────────────────

/// Raw per-trait totals.
///
/// Signed because a decoded share link may carry negative numbers; answers
/// only ever add non-negative weights.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TraitScores {
    pub vision: i32,
    pub structure: i32,
    pub speed: i32,
    pub empathy: i32,
}

impl TraitScores {
    pub fn new(vision: i32, structure: i32, speed: i32, empathy: i32) -> Self {
        Self {
            vision,
            structure,
            speed,
            empathy,
        }
    }

    pub fn get(&self, t: Trait) -> i32 {
        match t {
            Trait::Vision => self.vision,
            Trait::Structure => self.structure,
            Trait::Speed => self.speed,
            Trait::Empathy => self.empathy,
        }
    }

    pub(crate) fn add(&mut self, t: Trait, amount: i32) {
        let slot = match t {
            Trait::Vision => &mut self.vision,
            Trait::Structure => &mut self.structure,
            Trait::Speed => &mut self.speed,
            Trait::Empathy => &mut self.empathy,
        };
        *slot = slot.saturating_add(amount);
    }
}

/// A level for each of the four traits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TraitLevels {
    pub vision: Level,
    pub structure: Level,
    pub speed: Level,
    pub empathy: Level,
}

impl TraitLevels {
    pub fn get(&self, t: Trait) -> Level {
        match t {
            Trait::Vision => self.vision,
            Trait::Structure => self.structure,
            Trait::Speed => self.speed,
            Trait::Empathy => self.empathy,
        }
    }
}

// ─────────────────────────────────────────────────────────────────
// Questions
// ─────────────────────────────────────────────────────────────────

/// One selectable answer and the trait increments it carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Answer {
    pub id: &'static str,
    pub text: &'static str,
    /// Partial weights; traits not listed contribute zero.
    pub scores: &'static [(Trait, u32)],
}

impl Answer {
    pub fn weight(&self, t: Trait) -> u32 {
        self.scores
            .iter()
            .filter(|(scored, _)| *scored == t)
            .map(|(_, weight)| *weight)
            .sum()
    }
}

/// A multiple-choice question; exactly one answer may be chosen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Question {
    pub id: &'static str,
    pub prompt: &'static str,
    pub answers: &'static [Answer],
}

impl Question {
    /// Look up one of this question's answers by id.
    pub fn answer(&self, answer_id: &str) -> Option<&'static Answer> {
        self.answers.iter().find(|a| a.id == answer_id)
    }
}

// ─────────────────────────────────────────────────────────────────
// Personas
// ─────────────────────────────────────────────────────────────────

/// A named archetype with an ideal level profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Persona {
    pub id: &'static str,
    pub name: &'static str,
    pub emoji: &'static str,
    pub tagline: &'static str,
    pub description: &'static str,
    /// Short adjectives shown as "key traits".
    pub traits: &'static [&'static str],
    pub strengths: &'static [&'static str],
    pub watch_outs: &'static [&'static str],
    pub next_steps: &'static [&'static str],
    /// Required level per trait. A trait missing here is not scored.
    pub ideal_profile: &'static [(Trait, Level)],
}

impl Persona {
    pub fn ideal_level(&self, t: Trait) -> Option<Level> {
        self.ideal_profile
            .iter()
            .find(|(profiled, _)| *profiled == t)
            .map(|(_, level)| *level)
    }
}

// ─────────────────────────────────────────────────────────────────
// Audience Segments
// ─────────────────────────────────────────────────────────────────

/// Coarse audience bucket chosen by first match on required levels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AudienceSegment {
    pub id: &'static str,
    pub name: &'static str,
    /// Required levels; an empty list marks the fallback segment.
    pub requirements: &'static [(Trait, Level)],
    pub what_this_means: &'static [&'static str],
    pub what_to_improve: &'static [&'static str],
}

impl AudienceSegment {
    pub fn is_fallback(&self) -> bool {
        self.requirements.is_empty()
    }
}

// ─────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────
