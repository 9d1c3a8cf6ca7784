//! Plain-text rendering of survey screens and result pages.

use std::fmt::Write as _;

use crate::survey::{Answer, Assessment, AudienceSegment, Persona, Question, Trait};

/// Question screen: header, progress bar, prompt and numbered answers.
///
/// `step` is zero-based. The selected answer, if any, is marked.
pub fn render_question(
    question: &Question,
    step: usize,
    total: usize,
    percent: u8,
    selected: Option<&Answer>,
) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "Question {} of {}  {}  {}%",
        step + 1,
        total,
        progress_bar(percent, 20),
        percent
    );
    let _ = writeln!(out);
    let _ = writeln!(out, "{}", question.prompt);
    let _ = writeln!(out);

    for (index, answer) in question.answers.iter().enumerate() {
        let marker = if selected.is_some_and(|s| s.id == answer.id) {
            '*'
        } else {
            ' '
        };
        let _ = writeln!(out, " {} {}. {}", marker, index + 1, answer.text);
    }
    out
}

fn progress_bar(percent: u8, width: usize) -> String {
    let filled = (usize::from(percent.min(100)) * width + 50) / 100;
    format!("[{}{}]", "#".repeat(filled), "-".repeat(width - filled))
}

/// Full result page for an assessment, ending with the share link.
pub fn render_result(assessment: &Assessment, share_link: &str) -> String {
    let persona = assessment.persona;
    let segment = assessment.segment;
    let mut out = String::new();

    let _ = writeln!(out, "{}  You are {}", persona.emoji, persona.name);
    let _ = writeln!(out, "\"{}\"", persona.tagline);
    let _ = writeln!(out);
    let _ = writeln!(out, "{}", persona.description);
    let _ = writeln!(out);

    let _ = writeln!(out, "Your Trait Profile");
    for t in Trait::all() {
        let _ = writeln!(
            out,
            "  {:<10} {:<6} ({})",
            t.display_name(),
            assessment.level(*t).slug(),
            assessment.traits.get(*t)
        );
    }
    let _ = writeln!(out);

    let _ = writeln!(out, "Key Traits: {}", persona.traits.join(", "));
    let _ = writeln!(out);

    write_list(&mut out, "Strengths", persona.strengths);
    write_list(&mut out, "Watch-outs", persona.watch_outs);
    write_list(&mut out, "Next Steps", persona.next_steps);

    let _ = writeln!(out, "Audience Analysis: {}", segment.name);
    let _ = writeln!(out);
    write_list(&mut out, "What this means", segment.what_this_means);
    write_list(&mut out, "What to improve", segment.what_to_improve);

    let _ = writeln!(out, "Share link: {}", share_link);
    out
}

fn write_list(out: &mut String, title: &str, items: &[&str]) {
    let _ = writeln!(out, "{}", title);
    for item in items {
        let _ = writeln!(out, "  • {}", item);
    }
    let _ = writeln!(out);
}

/// The "copy result" text shared outside the app.
pub fn share_text(persona: &Persona, segment: &AudienceSegment, base_url: &str) -> String {
    format!(
        "My Work Persona: {} {}\n\"{}\"\n\nSegment: {}\n\nKey Traits: {}\n\nTake the survey: {}",
        persona.emoji,
        persona.name,
        persona.tagline,
        segment.name,
        persona.traits.join(", "),
        base_url
    )
}
