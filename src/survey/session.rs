//! One user's walk through the questionnaire.
//!
//! The session owns the current step and the chosen answers and writes them
//! through a [`ProgressKeeper`] after every change, so an interrupted survey
//! resumes where it stopped.

use chrono::Utc;
use serde::Serialize;
use tracing::{debug, info};

use crate::error::{Error, Result};
use crate::progress::{ProgressKeeper, ProgressStore, SurveyProgress};

use super::catalog::Catalog;
use super::codec::encode_results;
use super::scoring::Assessment;
use super::types::{Answer, Answers, Question};

/// Final result of a completed survey.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Outcome {
    #[serde(flatten)]
    pub assessment: Assessment,
    /// Relative share link, e.g. `/results?p=owl&v=...`.
    pub link: String,
}

impl Outcome {
    pub fn new(assessment: Assessment) -> Self {
        let link = encode_results(assessment.persona, &assessment.traits);
        Self { assessment, link }
    }
}

/// What a successful [`SurveySession::next`] did.
#[derive(Debug, Clone, PartialEq)]
pub enum Step {
    Advanced,
    Completed(Outcome),
}

pub struct SurveySession<S> {
    catalog: Catalog,
    keeper: ProgressKeeper<S>,
    current_step: usize,
    answers: Answers,
}

impl<S: ProgressStore> SurveySession<S> {
    /// Start a session, resuming unfinished saved progress if there is any.
    pub fn start(catalog: Catalog, keeper: ProgressKeeper<S>) -> Self {
        let mut session = Self {
            catalog,
            keeper,
            current_step: 0,
            answers: Answers::new(),
        };

        match session.keeper.load() {
            Some(saved) if !saved.is_completed() => {
                let last = catalog.total_questions().saturating_sub(1);
                session.current_step = saved.current_step.min(last);
                session.answers = saved.answers;
                info!(
                    step = session.current_step,
                    answered = session.answers.len(),
                    "Resuming saved survey"
                );
            }
            Some(_) => debug!("Saved survey already completed, starting over"),
            None => debug!("No saved survey, starting fresh"),
        }

        session
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn keeper(&self) -> &ProgressKeeper<S> {
        &self.keeper
    }

    pub fn current_step(&self) -> usize {
        self.current_step
    }

    pub fn total_steps(&self) -> usize {
        self.catalog.total_questions()
    }

    pub fn answers(&self) -> &Answers {
        &self.answers
    }

    pub fn current_question(&self) -> &'static Question {
        &self.catalog.questions()[self.current_step]
    }

    /// Answer already chosen for the current question, if any.
    pub fn selected_answer(&self) -> Option<&'static Answer> {
        let question = self.current_question();
        self.answers
            .get(question.id)
            .and_then(|answer_id| question.answer(answer_id))
    }

    /// Record an answer for the current question.
    pub fn select(&mut self, answer_id: &str) -> Result<()> {
        let question = self.current_question();
        let answer = question.answer(answer_id).ok_or_else(|| Error::UnknownAnswer {
            question_id: question.id.to_string(),
            answer_id: answer_id.to_string(),
        })?;

        self.answers
            .insert(question.id.to_string(), answer.id.to_string());
        debug!(question = question.id, answer = answer.id, "Answer selected");
        self.persist(false);
        Ok(())
    }

    pub fn can_go_next(&self) -> bool {
        self.selected_answer().is_some()
    }

    pub fn can_go_back(&self) -> bool {
        self.current_step > 0
    }

    pub fn is_last_step(&self) -> bool {
        self.current_step + 1 >= self.total_steps()
    }

    /// Percentage shown in the progress bar, counting the current question.
    pub fn progress_percent(&self) -> u8 {
        let total = self.total_steps().max(1);
        let percent = ((self.current_step + 1) as f64 / total as f64 * 100.0).round();
        percent.min(100.0) as u8
    }

    /// Move forward. On the last question this finishes the survey.
    pub fn next(&mut self) -> Result<Step> {
        if !self.can_go_next() {
            return Err(Error::AnswerRequired {
                question_id: self.current_question().id.to_string(),
            });
        }

        if self.is_last_step() {
            let outcome = Outcome::new(Assessment::from_answers(&self.catalog, &self.answers));
            self.persist(true);
            info!(
                persona = outcome.assessment.persona.id,
                segment = outcome.assessment.segment.id,
                "Survey completed"
            );
            return Ok(Step::Completed(outcome));
        }

        self.current_step += 1;
        self.persist(false);
        Ok(Step::Advanced)
    }

    /// Step back one question. Returns false on the first question.
    pub fn back(&mut self) -> bool {
        if !self.can_go_back() {
            return false;
        }
        self.current_step -= 1;
        self.persist(false);
        true
    }

    /// Forget stored progress and begin again at the first question.
    pub fn restart(&mut self) {
        self.keeper.clear();
        self.current_step = 0;
        self.answers.clear();
        debug!("Survey restarted");
    }

    fn persist(&self, completed: bool) {
        let progress = SurveyProgress {
            current_step: self.current_step,
            answers: self.answers.clone(),
            completed_at: completed.then(Utc::now),
        };
        self.keeper.save(&progress);
    }
}
