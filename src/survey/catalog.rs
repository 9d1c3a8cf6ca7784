//! Bundled survey catalog: questions, personas and audience segments.
//!
//! Order matters. Persona order decides tie outcomes in the persona matcher
//! and segment order decides first-match classification, so entries must
//! stay exactly as authored.

use crate::error::{Error, Result};

use super::types::{Answer, AudienceSegment, Level, Persona, Question, Trait};

/// Id of the segment returned when no other segment matches.
pub const DEFAULT_SEGMENT_ID: &str = "balanced-leader";

/// Read-only view over the three catalogs, passed into the scoring functions.
///
/// Built only through [`Catalog::bundled`] or the validating [`Catalog::new`],
/// so every catalog has at least one question, persona and segment.
#[derive(Debug, Clone, Copy)]
pub struct Catalog {
    questions: &'static [Question],
    personas: &'static [Persona],
    segments: &'static [AudienceSegment],
}

impl Catalog {
    /// The catalog shipped with the binary.
    pub const fn bundled() -> Self {
        Self {
            questions: QUESTIONS,
            personas: PERSONAS,
            segments: SEGMENTS,
        }
    }

    /// Build a custom catalog, rejecting empty lists.
    pub fn new(
        questions: &'static [Question],
        personas: &'static [Persona],
        segments: &'static [AudienceSegment],
    ) -> Result<Self> {
        if questions.is_empty() {
            return Err(Error::Internal("catalog needs at least one question".into()));
        }
        if personas.is_empty() {
            return Err(Error::Internal("catalog needs at least one persona".into()));
        }
        if segments.is_empty() {
            return Err(Error::Internal("catalog needs at least one segment".into()));
        }
        Ok(Self {
            questions,
            personas,
            segments,
        })
    }

    pub fn questions(&self) -> &'static [Question] {
        self.questions
    }

    pub fn personas(&self) -> &'static [Persona] {
        self.personas
    }

    pub fn segments(&self) -> &'static [AudienceSegment] {
        self.segments
    }

    pub fn total_questions(&self) -> usize {
        self.questions.len()
    }

    pub fn question(&self, id: &str) -> Option<&'static Question> {
        self.questions.iter().find(|q| q.id == id)
    }

    pub fn persona(&self, id: &str) -> Option<&'static Persona> {
        self.personas.iter().find(|p| p.id == id)
    }

    pub fn segment(&self, id: &str) -> Option<&'static AudienceSegment> {
        self.segments.iter().find(|s| s.id == id)
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::bundled()
    }
}

// ─────────────────────────────────────────────────────────────────
// Questions
// ─────────────────────────────────────────────────────────────────

pub const QUESTIONS: &[Question] = &[
    Question {
        id: "q1",
        prompt: "What best describes your decision style?",
        answers: &[
            Answer {
                id: "q1a",
                text: "I decide fast and iterate",
                scores: &[(Trait::Speed, 3), (Trait::Vision, 1)],
            },
            Answer {
                id: "q1b",
                text: "I collect evidence first",
                scores: &[(Trait::Structure, 2), (Trait::Vision, 1)],
            },
            Answer {
                id: "q1c",
                text: "I align people before deciding",
                scores: &[(Trait::Empathy, 3), (Trait::Structure, 1)],
            },
            Answer {
                id: "q1d",
                text: "I map the strategy then act",
                scores: &[(Trait::Vision, 3), (Trait::Structure, 1)],
            },
        ],
    },
    Question {
        id: "q2",
        prompt: "When a project is unclear, you...",
        answers: &[
            Answer {
                id: "q2a",
                text: "Prototype a quick version",
                scores: &[(Trait::Speed, 2), (Trait::Vision, 2)],
            },
            Answer {
                id: "q2b",
                text: "Write a plan and milestones",
                scores: &[(Trait::Structure, 3)],
            },
            Answer {
                id: "q2c",
                text: "Talk to users/stakeholders",
                scores: &[(Trait::Empathy, 2), (Trait::Vision, 1)],
            },
            Answer {
                id: "q2d",
                text: "Research patterns and competitors",
                scores: &[(Trait::Vision, 2), (Trait::Structure, 1)],
            },
        ],
    },
    Question {
        id: "q3",
        prompt: "Your default work mode is...",
        answers: &[
            Answer {
                id: "q3a",
                text: "Deep focus, minimal meetings",
                scores: &[(Trait::Structure, 2)],
            },
            Answer {
                id: "q3b",
                text: "Collaboration-heavy, energy from people",
                scores: &[(Trait::Empathy, 3)],
            },
            Answer {
                id: "q3c",
                text: "Short sprints and fast shipping",
                scores: &[(Trait::Speed, 3)],
            },
            Answer {
                id: "q3d",
                text: "Exploration and idea generation",
                scores: &[(Trait::Vision, 3)],
            },
        ],
    },
    Question {
        id: "q4",
        prompt: "What stresses you most?",
        answers: &[
            Answer {
                id: "q4a",
                text: "Slow approvals and bureaucracy",
                scores: &[(Trait::Speed, 2)],
            },
            Answer {
                id: "q4b",
                text: "Chaos and lack of structure",
                scores: &[(Trait::Structure, 3)],
            },
            Answer {
                id: "q4c",
                text: "Conflict and misalignment",
                scores: &[(Trait::Empathy, 3)],
            },
            Answer {
                id: "q4d",
                text: "No room for creativity",
                scores: &[(Trait::Vision, 3)],
            },
        ],
    },
    Question {
        id: "q5",
        prompt: "If you had 2 hours to improve a process, you'd...",
        answers: &[
            Answer {
                id: "q5a",
                text: "Automate something immediately",
                scores: &[(Trait::Speed, 2), (Trait::Structure, 1)],
            },
            Answer {
                id: "q5b",
                text: "Redesign the system end-to-end",
                scores: &[(Trait::Vision, 2), (Trait::Structure, 2)],
            },
            Answer {
                id: "q5c",
                text: "Create a clear checklist/SOP",
                scores: &[(Trait::Structure, 3)],
            },
            Answer {
                id: "q5d",
                text: "Teach the team and align expectations",
                scores: &[(Trait::Empathy, 3)],
            },
        ],
    },
    Question {
        id: "q6",
        prompt: "When you communicate, you prefer...",
        answers: &[
            Answer {
                id: "q6a",
                text: "Short and direct",
                scores: &[(Trait::Speed, 2)],
            },
            Answer {
                id: "q6b",
                text: "Structured docs and clarity",
                scores: &[(Trait::Structure, 3)],
            },
            Answer {
                id: "q6c",
                text: "Stories and examples",
                scores: &[(Trait::Vision, 2), (Trait::Empathy, 1)],
            },
            Answer {
                id: "q6d",
                text: "1:1 or small groups",
                scores: &[(Trait::Empathy, 2), (Trait::Structure, 1)],
            },
        ],
    },
    Question {
        id: "q7",
        prompt: "Your biggest strength is...",
        answers: &[
            Answer {
                id: "q7a",
                text: "Shipping and momentum",
                scores: &[(Trait::Speed, 3)],
            },
            Answer {
                id: "q7b",
                text: "Systems and reliability",
                scores: &[(Trait::Structure, 3)],
            },
            Answer {
                id: "q7c",
                text: "Creativity and strategy",
                scores: &[(Trait::Vision, 3)],
            },
            Answer {
                id: "q7d",
                text: "People, trust, and support",
                scores: &[(Trait::Empathy, 3)],
            },
        ],
    },
];

// ─────────────────────────────────────────────────────────────────
// Personas
// ─────────────────────────────────────────────────────────────────

pub const PERSONAS: &[Persona] = &[
    Persona {
        id: "owl",
        name: "The Owl",
        emoji: "🦉",
        tagline: "Wisdom through structure",
        description: "You see the full picture and build reliable systems. Your methodical approach ensures nothing falls through the cracks.",
        traits: &["Analytical", "Organized", "Strategic", "Detail-oriented"],
        strengths: &[
            "Creating sustainable processes that scale",
            "Spotting risks before they become problems",
            "Building documentation others actually use",
        ],
        watch_outs: &[
            "Analysis paralysis can slow momentum",
            "May over-engineer simple solutions",
            "Risk of prioritizing process over people",
        ],
        next_steps: &[
            "Set \"good enough\" deadlines for decisions",
            "Schedule regular check-ins focused on relationships, not tasks",
            "Practice shipping MVPs before perfecting",
        ],
        ideal_profile: &[
            (Trait::Vision, Level::Medium),
            (Trait::Structure, Level::High),
            (Trait::Speed, Level::Low),
            (Trait::Empathy, Level::Medium),
        ],
    },
    Persona {
        id: "fox",
        name: "The Fox",
        emoji: "🦊",
        tagline: "Strategic and adaptive",
        description: "You navigate complexity with creativity. Your ability to see patterns and pivot quickly makes you invaluable in uncertain environments.",
        traits: &["Creative", "Adaptive", "Strategic", "Quick-thinking"],
        strengths: &[
            "Finding unconventional solutions",
            "Adapting strategy when conditions change",
            "Connecting dots others miss",
        ],
        watch_outs: &[
            "May jump to new ideas too quickly",
            "Can overwhelm teams with constant pivots",
            "Risk of under-investing in execution",
        ],
        next_steps: &[
            "Commit to seeing one initiative through before starting another",
            "Document your strategic thinking for others to follow",
            "Partner with execution-focused teammates",
        ],
        ideal_profile: &[
            (Trait::Vision, Level::High),
            (Trait::Structure, Level::Medium),
            (Trait::Speed, Level::Medium),
            (Trait::Empathy, Level::Low),
        ],
    },
    Persona {
        id: "dolphin",
        name: "The Dolphin",
        emoji: "🐬",
        tagline: "Connection drives results",
        description: "You lead through relationships. Your emotional intelligence and collaborative spirit create environments where people do their best work.",
        traits: &["Empathetic", "Collaborative", "Supportive", "Communicative"],
        strengths: &[
            "Building trust across teams and stakeholders",
            "Navigating conflict with grace",
            "Creating psychological safety",
        ],
        watch_outs: &[
            "May avoid necessary difficult conversations",
            "Can prioritize harmony over results",
            "Risk of taking on others' emotional weight",
        ],
        next_steps: &[
            "Practice giving direct feedback with kindness",
            "Set boundaries on your availability",
            "Balance relationship-building with outcome focus",
        ],
        ideal_profile: &[
            (Trait::Vision, Level::Low),
            (Trait::Structure, Level::Medium),
            (Trait::Speed, Level::Medium),
            (Trait::Empathy, Level::High),
        ],
    },
    Persona {
        id: "lion",
        name: "The Lion",
        emoji: "🦁",
        tagline: "Bold vision, fast action",
        description: "You lead from the front with conviction. Your combination of strategic thinking and bias for action inspires teams to achieve ambitious goals.",
        traits: &["Bold", "Decisive", "Visionary", "Action-oriented"],
        strengths: &[
            "Setting ambitious direction and rallying teams",
            "Making tough calls under pressure",
            "Turning vision into momentum",
        ],
        watch_outs: &[
            "May move faster than the team can follow",
            "Can overlook details in pursuit of speed",
            "Risk of steamrolling quieter voices",
        ],
        next_steps: &[
            "Build in reflection time before major decisions",
            "Actively solicit dissenting opinions",
            "Delegate execution to trust your team more",
        ],
        ideal_profile: &[
            (Trait::Vision, Level::High),
            (Trait::Structure, Level::Low),
            (Trait::Speed, Level::High),
            (Trait::Empathy, Level::Low),
        ],
    },
    Persona {
        id: "elephant",
        name: "The Elephant",
        emoji: "🐘",
        tagline: "Steady strength, deep care",
        description: "You combine reliability with genuine care for people. Your memory for context and commitment to relationships creates lasting organizational strength.",
        traits: &["Reliable", "Caring", "Patient", "Thorough"],
        strengths: &[
            "Building lasting systems and relationships",
            "Remembering context others forget",
            "Supporting team members through challenges",
        ],
        watch_outs: &[
            "May resist change even when needed",
            "Can be slow to adapt to new situations",
            "Risk of holding onto past grievances",
        ],
        next_steps: &[
            "Experiment with one new approach each quarter",
            "Practice letting go of \"how we've always done it\"",
            "Balance care for others with self-care",
        ],
        ideal_profile: &[
            (Trait::Vision, Level::Low),
            (Trait::Structure, Level::High),
            (Trait::Speed, Level::Low),
            (Trait::Empathy, Level::High),
        ],
    },
    Persona {
        id: "hawk",
        name: "The Hawk",
        emoji: "🦅",
        tagline: "Precision at speed",
        description: "You spot opportunities from a mile away and strike decisively. Your sharp focus and speed make you exceptional at capturing high-value targets.",
        traits: &["Focused", "Swift", "Perceptive", "Decisive"],
        strengths: &[
            "Identifying and seizing opportunities quickly",
            "Cutting through noise to find signal",
            "Executing with precision under pressure",
        ],
        watch_outs: &[
            "May miss the human element in decisions",
            "Can be perceived as cold or detached",
            "Risk of tunnel vision on targets",
        ],
        next_steps: &[
            "Schedule regular 1:1s focused on relationship, not tasks",
            "Practice asking \"who might this affect?\" before acting",
            "Build in deliberate pause before major moves",
        ],
        ideal_profile: &[
            (Trait::Vision, Level::High),
            (Trait::Structure, Level::Medium),
            (Trait::Speed, Level::High),
            (Trait::Empathy, Level::Low),
        ],
    },
    Persona {
        id: "beaver",
        name: "The Beaver",
        emoji: "🦫",
        tagline: "Build it right, build it fast",
        description: "You combine craftsmanship with efficiency. Your ability to create quality work at speed makes you the backbone of any high-performing team.",
        traits: &["Industrious", "Efficient", "Practical", "Reliable"],
        strengths: &[
            "Shipping quality work consistently",
            "Optimizing processes for efficiency",
            "Building infrastructure others depend on",
        ],
        watch_outs: &[
            "May prioritize doing over thinking strategically",
            "Can get lost in the work without stepping back",
            "Risk of burnout from constant productivity",
        ],
        next_steps: &[
            "Block time weekly for strategic thinking",
            "Say no to projects that don't align with priorities",
            "Celebrate completion, not just progress",
        ],
        ideal_profile: &[
            (Trait::Vision, Level::Low),
            (Trait::Structure, Level::High),
            (Trait::Speed, Level::High),
            (Trait::Empathy, Level::Low),
        ],
    },
    Persona {
        id: "octopus",
        name: "The Octopus",
        emoji: "🐙",
        tagline: "Creative connection",
        description: "You bring ideas and people together in unexpected ways. Your combination of vision and empathy creates innovative solutions that actually get adopted.",
        traits: &["Versatile", "Creative", "Empathetic", "Integrative"],
        strengths: &[
            "Bridging creative ideas with human needs",
            "Managing multiple initiatives simultaneously",
            "Building coalitions around new concepts",
        ],
        watch_outs: &[
            "May spread attention too thin",
            "Can struggle with follow-through on individual threads",
            "Risk of complexity overwhelming simplicity",
        ],
        next_steps: &[
            "Ruthlessly prioritize your top 3 initiatives",
            "Find an execution partner for each major project",
            "Practice saying \"not now\" to good ideas",
        ],
        ideal_profile: &[
            (Trait::Vision, Level::High),
            (Trait::Structure, Level::Low),
            (Trait::Speed, Level::Low),
            (Trait::Empathy, Level::High),
        ],
    },
];

// ─────────────────────────────────────────────────────────────────
// Audience Segments
// ─────────────────────────────────────────────────────────────────

pub const SEGMENTS: &[AudienceSegment] = &[
    AudienceSegment {
        id: "strategic-builder",
        name: "Strategic Builder",
        requirements: &[(Trait::Vision, Level::High), (Trait::Structure, Level::High)],
        what_this_means: &[
            "You think long-term and build systems to match",
            "Others look to you for direction and reliability",
            "You excel at turning strategy into sustainable processes",
        ],
        what_to_improve: &[
            "Move faster on decisions with incomplete information",
            "Build in more flexibility for changing conditions",
        ],
    },
    AudienceSegment {
        id: "fast-mover",
        name: "Fast Mover",
        requirements: &[(Trait::Speed, Level::High), (Trait::Vision, Level::Medium)],
        what_this_means: &[
            "You bias toward action and learn by doing",
            "Teams rely on you to break through blockers",
            "You create momentum when others get stuck in planning",
        ],
        what_to_improve: &[
            "Pause occasionally to validate direction",
            "Document learnings so the team can keep up",
        ],
    },
    AudienceSegment {
        id: "people-first-operator",
        name: "People-First Operator",
        requirements: &[(Trait::Empathy, Level::High), (Trait::Structure, Level::Medium)],
        what_this_means: &[
            "You lead through relationships and trust",
            "Others feel heard and supported around you",
            "You build teams that stick together through challenges",
        ],
        what_to_improve: &[
            "Balance care with accountability",
            "Practice delivering hard feedback directly",
        ],
    },
    AudienceSegment {
        id: "creative-catalyst",
        name: "Creative Catalyst",
        requirements: &[(Trait::Vision, Level::High), (Trait::Empathy, Level::Medium)],
        what_this_means: &[
            "You generate ideas that inspire action",
            "Others look to you for creative direction",
            "You connect concepts in ways others don't see",
        ],
        what_to_improve: &[
            "Partner with executers to ship your ideas",
            "Commit to fewer initiatives with deeper focus",
        ],
    },
    AudienceSegment {
        id: "reliable-executor",
        name: "Reliable Executor",
        requirements: &[(Trait::Structure, Level::High), (Trait::Speed, Level::Medium)],
        what_this_means: &[
            "You deliver consistently and build trust through reliability",
            "Teams depend on your follow-through",
            "You turn plans into reality efficiently",
        ],
        what_to_improve: &[
            "Step back to question if you're building the right thing",
            "Make time for strategic thinking, not just doing",
        ],
    },
    AudienceSegment {
        id: "balanced-leader",
        name: "Balanced Leader",
        requirements: &[],
        what_this_means: &[
            "You bring a well-rounded approach to challenges",
            "You adapt your style to what situations require",
            "You can connect with diverse working styles",
        ],
        what_to_improve: &[
            "Consider developing a signature strength",
            "Lean into situations that play to your natural tendencies",
        ],
    },
];

// ─────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────
