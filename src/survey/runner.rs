//! Line-oriented interactive driver for a [`SurveySession`].

use std::io::{BufRead, Write};

use tracing::debug;

use crate::error::Result;
use crate::progress::ProgressStore;
use crate::render::render_question;

use super::session::{Outcome, Step, SurveySession};

enum Command {
    Choose(&'static str),
    Next,
    Back,
    Quit,
}

fn parse_command<S: ProgressStore>(session: &SurveySession<S>, line: &str) -> Option<Command> {
    let question = session.current_question();
    let line = line.to_ascii_lowercase();
    match line.as_str() {
        "" => return Some(Command::Next),
        "b" | "back" => return Some(Command::Back),
        "q" | "quit" => return Some(Command::Quit),
        _ => {}
    }

    if let Ok(n) = line.parse::<usize>() {
        return question
            .answers
            .get(n.checked_sub(1)?)
            .map(|a| Command::Choose(a.id));
    }
    question.answer(&line).map(|a| Command::Choose(a.id))
}

/// Ask questions until the survey completes or the user leaves.
///
/// Returns `None` when the user quits or input ends; progress stays saved.
pub fn run_interactive<S, R, W>(
    session: &mut SurveySession<S>,
    input: R,
    mut output: W,
) -> Result<Option<Outcome>>
where
    S: ProgressStore,
    R: BufRead,
    W: Write,
{
    let mut lines = input.lines();

    loop {
        let question = session.current_question();
        write!(
            output,
            "\n{}",
            render_question(
                question,
                session.current_step(),
                session.total_steps(),
                session.progress_percent(),
                session.selected_answer(),
            )
        )?;
        write!(
            output,
            "\nChoose 1-{} (Enter = next, b = back, q = quit): ",
            question.answers.len()
        )?;
        output.flush()?;

        let Some(line) = lines.next().transpose()? else {
            writeln!(output)?;
            debug!("Input closed, leaving survey");
            return Ok(None);
        };

        let step = match parse_command(session, line.trim()) {
            Some(Command::Choose(answer_id)) => {
                session.select(answer_id)?;
                session.next()?
            }
            Some(Command::Next) if session.can_go_next() => session.next()?,
            Some(Command::Next) => {
                writeln!(output, "Pick an answer first.")?;
                continue;
            }
            Some(Command::Back) => {
                if !session.back() {
                    writeln!(output, "Already at the first question.")?;
                }
                continue;
            }
            Some(Command::Quit) => {
                writeln!(
                    output,
                    "Progress saved. Run 'work-persona survey' to pick up where you left off."
                )?;
                return Ok(None);
            }
            None => {
                writeln!(
                    output,
                    "Unrecognised choice {:?}. Enter a number from 1 to {}.",
                    line.trim(),
                    question.answers.len()
                )?;
                continue;
            }
        };

        if let Step::Completed(outcome) = step {
            return Ok(Some(outcome));
        }
    }
}
