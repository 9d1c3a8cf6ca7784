//! Scoring: answers to traits, traits to levels, levels to persona and segment.
//!
//! Every function here is total and pure. Bad input (unknown question or
//! answer ids) is skipped rather than reported.

use serde::Serialize;
use tracing::{debug, trace};

use super::catalog::{Catalog, DEFAULT_SEGMENT_ID};
use super::types::{Answers, AudienceSegment, Level, Persona, Trait, TraitLevels, TraitScores};

/// Maximum score used to band every trait, for matching and display alike.
pub const MAX_TRAIT_SCORE: i32 = 21;

/// Ratio (in percent) at or above which a trait is high.
const HIGH_PERCENT: i64 = 60;

/// Ratio (in percent) at or above which a trait is medium.
const MEDIUM_PERCENT: i64 = 35;

/// Personas preferred on a tie when raw vision beats raw structure.
pub const VISION_LEANING: &[&str] = &["fox", "lion", "hawk", "octopus"];

/// Personas preferred on a tie when raw structure is at least raw vision.
pub const STRUCTURE_LEANING: &[&str] = &["owl", "elephant", "beaver"];

// ─────────────────────────────────────────────────────────────────
// Aggregation
// ─────────────────────────────────────────────────────────────────

/// Sum the weights of every recorded, valid answer.
///
/// Questions without an answer, unknown question ids and answer ids that do
/// not belong to their question are ignored.
pub fn calculate_traits(catalog: &Catalog, answers: &Answers) -> TraitScores {
    let mut traits = TraitScores::default();

    for question in catalog.questions() {
        let Some(answer_id) = answers.get(question.id) else {
            continue;
        };
        let Some(answer) = question.answer(answer_id) else {
            trace!(question = question.id, answer = %answer_id, "Ignoring stale answer id");
            continue;
        };

        for (t, weight) in answer.scores {
            traits.add(*t, i32::try_from(*weight).unwrap_or(i32::MAX));
        }
    }

    traits
}

// ─────────────────────────────────────────────────────────────────
// Classification
// ─────────────────────────────────────────────────────────────────

/// Band a raw score against a maximum.
///
/// `score / max >= 0.6` is high, `>= 0.35` is medium, anything else low.
/// Bounds are closed and compared exactly with integer arithmetic. A
/// non-positive maximum bands everything low.
pub fn classify(score: i32, max: i32) -> Level {
    if max <= 0 {
        return Level::Low;
    }
    let scaled = i64::from(score) * 100;
    let max = i64::from(max);

    if scaled >= max * HIGH_PERCENT {
        Level::High
    } else if scaled >= max * MEDIUM_PERCENT {
        Level::Medium
    } else {
        Level::Low
    }
}

/// Levels for all four traits against [`MAX_TRAIT_SCORE`].
pub fn trait_levels(traits: &TraitScores) -> TraitLevels {
    TraitLevels {
        vision: classify(traits.vision, MAX_TRAIT_SCORE),
        structure: classify(traits.structure, MAX_TRAIT_SCORE),
        speed: classify(traits.speed, MAX_TRAIT_SCORE),
        empathy: classify(traits.empathy, MAX_TRAIT_SCORE),
    }
}

// ─────────────────────────────────────────────────────────────────
// Persona Matching
// ─────────────────────────────────────────────────────────────────

/// How well a level vector fits a persona's ideal profile.
///
/// 3 per exact trait, 1 per adjacent trait, 0 for opposite or unprofiled.
pub fn profile_match_score(levels: &TraitLevels, persona: &Persona) -> u32 {
    persona
        .ideal_profile
        .iter()
        .map(|(t, ideal)| {
            let actual = levels.get(*t);
            if actual == *ideal {
                3
            } else if actual.is_adjacent(*ideal) {
                1
            } else {
                0
            }
        })
        .sum()
}

/// Whether `persona` takes over the lead when it ties the current best.
fn wins_tie(persona: &Persona, traits: &TraitScores) -> bool {
    if traits.vision > traits.structure {
        VISION_LEANING.contains(&persona.id)
    } else {
        STRUCTURE_LEANING.contains(&persona.id)
    }
}

/// Pick the best-fitting persona.
///
/// Personas are visited in catalog order. A higher score takes the lead;
/// a tie hands the lead to the challenger only when [`wins_tie`] says so.
/// The tie rule is applied at every tie, so catalog order affects results.
pub fn determine_persona(catalog: &Catalog, traits: &TraitScores) -> &'static Persona {
    let levels = trait_levels(traits);
    let personas = catalog.personas();

    let mut best = &personas[0];
    let mut best_score: Option<u32> = None;

    for persona in personas {
        let score = profile_match_score(&levels, persona);
        trace!(persona = persona.id, score, "Persona match score");

        match best_score {
            Some(current) if score < current => {}
            Some(current) if score == current => {
                if wins_tie(persona, traits) {
                    debug!(from = best.id, to = persona.id, score, "Tie broken toward persona");
                    best = persona;
                }
            }
            _ => {
                best = persona;
                best_score = Some(score);
            }
        }
    }

    debug!(persona = best.id, score = ?best_score, "Persona determined");
    best
}

// ─────────────────────────────────────────────────────────────────
// Segment Matching
// ─────────────────────────────────────────────────────────────────

/// First segment whose requirements all hold; the default segment otherwise.
///
/// Segments without requirements are skipped during the scan. The fallback
/// is the segment with id [`DEFAULT_SEGMENT_ID`], or the last segment if the
/// catalog has none by that id.
pub fn determine_segment(catalog: &Catalog, traits: &TraitScores) -> &'static AudienceSegment {
    let levels = trait_levels(traits);
    let segments = catalog.segments();

    let matched = segments.iter().find(|segment| {
        !segment.is_fallback()
            && segment
                .requirements
                .iter()
                .all(|(t, required)| levels.get(*t) == *required)
    });

    let segment = match matched {
        Some(segment) => segment,
        None => catalog
            .segment(DEFAULT_SEGMENT_ID)
            .unwrap_or(&segments[segments.len() - 1]),
    };

    debug!(segment = segment.id, "Audience segment determined");
    segment
}

// ─────────────────────────────────────────────────────────────────
// Assessment
// ─────────────────────────────────────────────────────────────────

/// Everything derived from one set of trait scores.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Assessment {
    pub traits: TraitScores,
    pub levels: TraitLevels,
    #[serde(serialize_with = "serialize_persona_id")]
    pub persona: &'static Persona,
    #[serde(serialize_with = "serialize_segment_id")]
    pub segment: &'static AudienceSegment,
}

impl Assessment {
    /// Assess already-computed trait scores (e.g. from a share link).
    pub fn from_traits(catalog: &Catalog, traits: TraitScores) -> Self {
        Self {
            traits,
            levels: trait_levels(&traits),
            persona: determine_persona(catalog, &traits),
            segment: determine_segment(catalog, &traits),
        }
    }

    /// Keep a persona chosen elsewhere (a share link) and derive the rest.
    pub fn with_persona(catalog: &Catalog, persona: &'static Persona, traits: TraitScores) -> Self {
        Self {
            traits,
            levels: trait_levels(&traits),
            persona,
            segment: determine_segment(catalog, &traits),
        }
    }

    /// Assess a set of answers.
    pub fn from_answers(catalog: &Catalog, answers: &Answers) -> Self {
        Self::from_traits(catalog, calculate_traits(catalog, answers))
    }

    /// Level of one trait, using the same bands as matching.
    pub fn level(&self, t: Trait) -> Level {
        self.levels.get(t)
    }
}

fn serialize_persona_id<S: serde::Serializer>(
    persona: &&'static Persona,
    serializer: S,
) -> std::result::Result<S::Ok, S::Error> {
    serializer.serialize_str(persona.id)
}

fn serialize_segment_id<S: serde::Serializer>(
    segment: &&'static AudienceSegment,
    serializer: S,
) -> std::result::Result<S::Ok, S::Error> {
    serializer.serialize_str(segment.id)
}

// ─────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::survey::catalog::{PERSONAS, QUESTIONS, SEGMENTS};

    fn answers(pairs: &[(&str, &str)]) -> Answers {
        pairs
            .iter()
            .map(|(q, a)| (q.to_string(), a.to_string()))
            .collect()
    }

    fn vision_answers() -> Answers {
        answers(&[
            ("q1", "q1d"),
            ("q2", "q2d"),
            ("q3", "q3d"),
            ("q4", "q4d"),
            ("q5", "q5b"),
            ("q6", "q6c"),
            ("q7", "q7c"),
        ])
    }

    // ── aggregation ──────────────────────────────────────────────

    #[test]
    fn test_empty_answers_score_zero() {
        let catalog = Catalog::bundled();
        let traits = calculate_traits(&catalog, &Answers::new());
        assert_eq!(traits, TraitScores::default());

        let levels = trait_levels(&traits);
        for t in Trait::all() {
            assert_eq!(levels.get(*t), Level::Low);
        }
        assert_eq!(determine_segment(&catalog, &traits).id, "balanced-leader");
    }

    #[test]
    fn test_vision_leaning_answers() {
        let catalog = Catalog::bundled();
        let traits = calculate_traits(&catalog, &vision_answers());
        assert_eq!(traits, TraitScores::new(18, 4, 0, 1));

        let levels = trait_levels(&traits);
        assert_eq!(levels.vision, Level::High);
        assert_eq!(levels.structure, Level::Low);
        assert_eq!(levels.speed, Level::Low);
        assert_eq!(levels.empathy, Level::Low);

        // lion and octopus both score 9; octopus wins the vision-leaning tie
        let persona = determine_persona(&catalog, &traits);
        assert_eq!(persona.id, "octopus");
        assert!(VISION_LEANING.contains(&persona.id));
        assert_eq!(determine_segment(&catalog, &traits).id, "balanced-leader");
    }

    #[test]
    fn test_unknown_ids_are_ignored() {
        let catalog = Catalog::bundled();
        let mut recorded = answers(&[("q1", "q1a"), ("q3", "q3c")]);
        let clean = calculate_traits(&catalog, &recorded);

        recorded.insert("q99".into(), "q99a".into());
        recorded.insert("q2".into(), "q7a".into());
        recorded.insert("q4".into(), String::new());

        assert_eq!(calculate_traits(&catalog, &recorded), clean);
        assert_eq!(clean, TraitScores::new(1, 0, 6, 0));
    }

    #[test]
    fn test_aggregation_is_order_independent() {
        let catalog = Catalog::bundled();
        let pairs = [
            ("q7", "q7b"),
            ("q2", "q2a"),
            ("q5", "q5d"),
            ("q1", "q1c"),
            ("q4", "q4a"),
        ];

        let forward: Answers = answers(&pairs);
        let mut reversed = Answers::new();
        for (q, a) in pairs.iter().rev() {
            reversed.insert(q.to_string(), a.to_string());
        }
        assert_eq!(
            calculate_traits(&catalog, &forward),
            calculate_traits(&catalog, &reversed)
        );

        // Every prefix in either order agrees with a manual per-answer sum.
        for n in 0..=pairs.len() {
            let subset = answers(&pairs[..n]);
            let mut expected = TraitScores::default();
            for (q, a) in &pairs[..n] {
                let answer = catalog.question(q).unwrap().answer(a).unwrap();
                for t in Trait::all() {
                    expected.add(*t, answer.weight(*t) as i32);
                }
            }
            assert_eq!(calculate_traits(&catalog, &subset), expected);
        }
    }

    // ── classification ───────────────────────────────────────────

    #[test]
    fn test_classify_boundaries() {
        // 3/5 = 0.6 exactly, 7/20 = 0.35 exactly
        assert_eq!(classify(3, 5), Level::High);
        assert_eq!(classify(7, 20), Level::Medium);
        assert_eq!(classify(59, 100), Level::Medium);
        assert_eq!(classify(34, 100), Level::Low);
        assert_eq!(classify(60, 100), Level::High);
        assert_eq!(classify(35, 100), Level::Medium);
    }

    #[test]
    fn test_classify_against_max() {
        // 12.6 is the high cut and 7.35 the medium cut for 21
        assert_eq!(classify(13, MAX_TRAIT_SCORE), Level::High);
        assert_eq!(classify(12, MAX_TRAIT_SCORE), Level::Medium);
        assert_eq!(classify(8, MAX_TRAIT_SCORE), Level::Medium);
        assert_eq!(classify(7, MAX_TRAIT_SCORE), Level::Low);
        assert_eq!(classify(-4, MAX_TRAIT_SCORE), Level::Low);
        assert_eq!(classify(500, MAX_TRAIT_SCORE), Level::High);
    }

    #[test]
    fn test_classify_non_positive_max() {
        assert_eq!(classify(10, 0), Level::Low);
        assert_eq!(classify(10, -5), Level::Low);
    }

    #[test]
    fn test_classify_is_monotonic() {
        for max in [1, 5, 20, MAX_TRAIT_SCORE, 100] {
            let mut previous = Level::Low;
            for score in -10..=(max * 2) {
                let level = classify(score, max);
                assert!(level >= previous, "classify({}, {}) went down", score, max);
                previous = level;
            }
        }
    }

    // ── persona matching ─────────────────────────────────────────

    #[test]
    fn test_profile_match_score() {
        let owl = Catalog::bundled().persona("owl").unwrap();
        let exact = TraitLevels {
            vision: Level::Medium,
            structure: Level::High,
            speed: Level::Low,
            empathy: Level::Medium,
        };
        assert_eq!(profile_match_score(&exact, owl), 12);

        let opposite = TraitLevels {
            vision: Level::Medium,
            structure: Level::Low,
            speed: Level::High,
            empathy: Level::High,
        };
        // 3 + 0 + 0 + 1
        assert_eq!(profile_match_score(&opposite, owl), 4);
    }

    #[test]
    fn test_unprofiled_traits_score_nothing() {
        static PARTIAL: &[Persona] = &[Persona {
            id: "partial",
            name: "Partial",
            emoji: "",
            tagline: "",
            description: "",
            traits: &[],
            strengths: &[],
            watch_outs: &[],
            next_steps: &[],
            ideal_profile: &[(Trait::Speed, Level::High)],
        }];
        let levels = trait_levels(&TraitScores::new(21, 21, 21, 21));
        assert_eq!(profile_match_score(&levels, &PARTIAL[0]), 3);
    }

    #[test]
    fn test_structure_heavy_answers_pick_owl_family() {
        let catalog = Catalog::bundled();
        let recorded = answers(&[
            ("q1", "q1b"),
            ("q2", "q2b"),
            ("q3", "q3a"),
            ("q4", "q4b"),
            ("q5", "q5c"),
            ("q6", "q6b"),
            ("q7", "q7b"),
        ]);
        let traits = calculate_traits(&catalog, &recorded);
        assert_eq!(traits, TraitScores::new(1, 19, 0, 0));

        let persona = determine_persona(&catalog, &traits);
        assert!(STRUCTURE_LEANING.contains(&persona.id), "got {}", persona.id);
    }

    #[test]
    fn test_exact_profiles_select_their_persona() {
        let catalog = Catalog::bundled();
        let score_for = |level: Level| match level {
            Level::High => 18,
            Level::Medium => 10,
            Level::Low => 0,
        };
        for persona in catalog.personas() {
            let traits = TraitScores::new(
                score_for(persona.ideal_level(Trait::Vision).unwrap()),
                score_for(persona.ideal_level(Trait::Structure).unwrap()),
                score_for(persona.ideal_level(Trait::Speed).unwrap()),
                score_for(persona.ideal_level(Trait::Empathy).unwrap()),
            );
            assert_eq!(determine_persona(&catalog, &traits).id, persona.id);
        }
    }

    #[test]
    fn test_tie_break_depends_on_raw_vision_vs_structure() {
        static TIED: &[Persona] = &[
            Persona {
                id: "dolphin",
                name: "The Dolphin",
                emoji: "",
                tagline: "",
                description: "",
                traits: &[],
                strengths: &[],
                watch_outs: &[],
                next_steps: &[],
                ideal_profile: &[],
            },
            Persona {
                id: "fox",
                name: "The Fox",
                emoji: "",
                tagline: "",
                description: "",
                traits: &[],
                strengths: &[],
                watch_outs: &[],
                next_steps: &[],
                ideal_profile: &[],
            },
            Persona {
                id: "owl",
                name: "The Owl",
                emoji: "",
                tagline: "",
                description: "",
                traits: &[],
                strengths: &[],
                watch_outs: &[],
                next_steps: &[],
                ideal_profile: &[],
            },
        ];
        let catalog = Catalog::new(QUESTIONS, TIED, SEGMENTS).unwrap();

        // Everyone scores 0. Vision ahead: fox takes over, owl cannot.
        assert_eq!(determine_persona(&catalog, &TraitScores::new(5, 4, 0, 0)).id, "fox");
        // Structure ahead or equal: fox cannot, owl takes over.
        assert_eq!(determine_persona(&catalog, &TraitScores::new(4, 5, 0, 0)).id, "owl");
        assert_eq!(determine_persona(&catalog, &TraitScores::new(3, 3, 0, 0)).id, "owl");
    }

    #[test]
    fn test_tie_break_is_order_dependent() {
        static LION_FIRST: &[Persona] = &[tie_persona("lion"), tie_persona("hawk")];
        static DOLPHIN_ONLY: &[Persona] = &[tie_persona("dolphin"), tie_persona("beaver")];

        let vision_ahead = TraitScores::new(9, 1, 0, 0);

        // Both vision-leaning: the later one keeps taking over.
        let catalog = Catalog::new(QUESTIONS, LION_FIRST, SEGMENTS).unwrap();
        assert_eq!(determine_persona(&catalog, &vision_ahead).id, "hawk");

        // Neither qualifies: the first encountered keeps the lead.
        let catalog = Catalog::new(QUESTIONS, DOLPHIN_ONLY, SEGMENTS).unwrap();
        assert_eq!(determine_persona(&catalog, &vision_ahead).id, "dolphin");
    }

    const fn tie_persona(id: &'static str) -> Persona {
        Persona {
            id,
            name: id,
            emoji: "",
            tagline: "",
            description: "",
            traits: &[],
            strengths: &[],
            watch_outs: &[],
            next_steps: &[],
            ideal_profile: &[],
        }
    }

    // ── segment matching ─────────────────────────────────────────

    #[test]
    fn test_segment_first_match_wins() {
        let catalog = Catalog::bundled();
        // Satisfies reliable-executor too; strategic-builder is checked first
        let traits = TraitScores::new(15, 15, 8, 0);
        assert_eq!(determine_segment(&catalog, &traits).id, "strategic-builder");

        let traits = TraitScores::new(8, 0, 15, 0);
        assert_eq!(determine_segment(&catalog, &traits).id, "fast-mover");

        let traits = TraitScores::new(0, 8, 0, 15);
        assert_eq!(determine_segment(&catalog, &traits).id, "people-first-operator");

        let traits = TraitScores::new(15, 0, 0, 8);
        assert_eq!(determine_segment(&catalog, &traits).id, "creative-catalyst");

        let traits = TraitScores::new(0, 15, 8, 0);
        assert_eq!(determine_segment(&catalog, &traits).id, "reliable-executor");
    }

    #[test]
    fn test_segment_always_resolves() {
        let catalog = Catalog::bundled();
        for v in (0..=21).step_by(3) {
            for st in (0..=21).step_by(3) {
                for sp in (0..=21).step_by(7) {
                    for e in (0..=21).step_by(7) {
                        let segment =
                            determine_segment(&catalog, &TraitScores::new(v, st, sp, e));
                        assert!(catalog.segment(segment.id).is_some());
                    }
                }
            }
        }
    }

    #[test]
    fn test_segment_fallback_without_default_id() {
        static NO_DEFAULT: &[AudienceSegment] = &[
            AudienceSegment {
                id: "empathy-only",
                name: "Empathy",
                requirements: &[(Trait::Empathy, Level::High)],
                what_this_means: &[],
                what_to_improve: &[],
            },
            AudienceSegment {
                id: "catch-all",
                name: "Catch All",
                requirements: &[(Trait::Speed, Level::High)],
                what_this_means: &[],
                what_to_improve: &[],
            },
        ];
        let catalog = Catalog::new(QUESTIONS, PERSONAS, NO_DEFAULT).unwrap();
        let segment = determine_segment(&catalog, &TraitScores::default());
        assert_eq!(segment.id, "catch-all");
    }

    #[test]
    fn test_empty_requirements_never_match_in_scan() {
        static EMPTY_FIRST: &[AudienceSegment] = &[
            AudienceSegment {
                id: "balanced-leader",
                name: "Balanced Leader",
                requirements: &[],
                what_this_means: &[],
                what_to_improve: &[],
            },
            AudienceSegment {
                id: "fast-mover",
                name: "Fast Mover",
                requirements: &[(Trait::Speed, Level::High)],
                what_this_means: &[],
                what_to_improve: &[],
            },
        ];
        let catalog = Catalog::new(QUESTIONS, PERSONAS, EMPTY_FIRST).unwrap();
        let fast = TraitScores::new(0, 0, 20, 0);
        assert_eq!(determine_segment(&catalog, &fast).id, "fast-mover");
        assert_eq!(
            determine_segment(&catalog, &TraitScores::default()).id,
            "balanced-leader"
        );
    }

    // ── assessment ───────────────────────────────────────────────

    #[test]
    fn test_assessment_serializes_ids() {
        let assessment = Assessment::from_answers(&Catalog::bundled(), &vision_answers());
        let json = serde_json::to_value(assessment).unwrap();
        assert_eq!(json["persona"], "octopus");
        assert_eq!(json["segment"], "balanced-leader");
        assert_eq!(json["traits"]["vision"], 18);
        assert_eq!(json["levels"]["vision"], "high");
        assert_eq!(assessment.level(Trait::Structure), Level::Low);
    }

    #[test]
    fn test_with_persona_keeps_given_persona() {
        let catalog = Catalog::bundled();
        let owl = catalog.persona("owl").unwrap();
        let traits = TraitScores::new(18, 4, 0, 1);

        let assessment = Assessment::with_persona(&catalog, owl, traits);
        assert_eq!(assessment.persona.id, "owl");
        assert_eq!(assessment.segment, determine_segment(&catalog, &traits));
        assert_eq!(assessment.levels, trait_levels(&traits));
    }
}
