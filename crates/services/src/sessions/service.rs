use chrono::{DateTime, Utc};
use std::fmt;
use std::sync::Arc;

use quiz_core::model::{AnswerSheet, Phase, Question, QuestionBank, QuizAction};
use quiz_core::scoring::Report;

use super::progress::QuizProgress;
use crate::error::SessionError;

//
// ─── CHOICE OUTCOME ────────────────────────────────────────────────────────────
//

/// Outcome of answering the current question.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChoiceOutcome {
    /// Bank position the choice was recorded at.
    pub position: usize,
    /// The option index that was recorded.
    pub choice: usize,
    /// True when this choice completed the quiz.
    pub is_complete: bool,
}

//
// ─── SESSION ───────────────────────────────────────────────────────────────────
//

/// In-memory quiz session over a shared question bank.
///
/// Moves linearly through `Intro → Quiz → Result`, recording one choice per
/// question; `reset` returns to the creation state from any phase. Every
/// transition is atomic: a rejected action leaves the session untouched.
///
/// The session fires no telemetry itself; that belongs to
/// [`QuizFlowService`](super::QuizFlowService).
pub struct QuizSession {
    bank: Arc<QuestionBank>,
    phase: Phase,
    current: usize,
    answers: AnswerSheet,
    unlocked: bool,
    started_at: Option<DateTime<Utc>>,
    completed_at: Option<DateTime<Utc>>,
}

impl QuizSession {
    /// Create a session in the intro phase.
    ///
    /// Banks are non-empty by construction, so a fresh session always has a
    /// first question to present.
    #[must_use]
    pub fn new(bank: Arc<QuestionBank>) -> Self {
        Self {
            bank,
            phase: Phase::Intro,
            current: 0,
            answers: AnswerSheet::new(),
            unlocked: false,
            started_at: None,
            completed_at: None,
        }
    }

    #[must_use]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Index of the question currently presented. Stays within
    /// `[0, bank.size())` in every phase.
    #[must_use]
    pub fn current_index(&self) -> usize {
        self.current
    }

    /// The question awaiting an answer, present only during the quiz phase.
    #[must_use]
    pub fn current_question(&self) -> Option<&Question> {
        if self.phase == Phase::Quiz {
            self.bank.get(self.current).ok()
        } else {
            None
        }
    }

    #[must_use]
    pub fn answers(&self) -> &AnswerSheet {
        &self.answers
    }

    #[must_use]
    pub fn unlocked(&self) -> bool {
        self.unlocked
    }

    #[must_use]
    pub fn started_at(&self) -> Option<DateTime<Utc>> {
        self.started_at
    }

    #[must_use]
    pub fn completed_at(&self) -> Option<DateTime<Utc>> {
        self.completed_at
    }

    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.phase == Phase::Result
    }

    #[must_use]
    pub fn bank(&self) -> &QuestionBank {
        &self.bank
    }

    /// Progress snapshot, recomputed per read.
    #[must_use]
    pub fn progress(&self) -> QuizProgress {
        QuizProgress {
            total: self.bank.size(),
            answered: self.answers.filled(),
            remaining: self.bank.size().saturating_sub(self.answers.filled()),
            is_complete: self.is_complete(),
        }
    }

    /// Scores derived from the recorded answers, recomputed on demand.
    ///
    /// # Errors
    ///
    /// Propagates `ScoringError` via `SessionError::Scoring`; unreachable
    /// for banks built through `QuestionBank::from_questions`.
    pub fn report(&self) -> Result<Report, SessionError> {
        Ok(Report::evaluate(&self.bank, &self.answers)?)
    }

    /// Begin the quiz. Valid only in the intro phase.
    ///
    /// `now` should come from the services layer clock.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::InvalidTransition` outside the intro phase.
    pub fn start(&mut self, now: DateTime<Utc>) -> Result<(), SessionError> {
        if self.phase != Phase::Intro {
            return Err(SessionError::InvalidTransition {
                action: QuizAction::Start,
                phase: self.phase,
            });
        }

        self.phase = Phase::Quiz;
        self.current = 0;
        self.answers.clear();
        self.started_at = Some(now);
        Ok(())
    }

    /// Record a choice for the current question and advance.
    ///
    /// The final choice moves the session to the result phase instead of
    /// advancing the index; there is no back-navigation.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::InvalidTransition` outside the quiz phase and
    /// `SessionError::ChoiceOutOfRange` when `choice` does not index the
    /// current question's options. Neither mutates the session.
    pub fn choose_option(
        &mut self,
        choice: usize,
        now: DateTime<Utc>,
    ) -> Result<ChoiceOutcome, SessionError> {
        if self.phase != Phase::Quiz {
            return Err(SessionError::InvalidTransition {
                action: QuizAction::ChooseOption,
                phase: self.phase,
            });
        }

        let question = self.bank.get(self.current)?;
        if !question.accepts_choice(choice) {
            return Err(SessionError::ChoiceOutOfRange {
                choice,
                options: question.options().len(),
            });
        }

        let position = self.current;
        self.answers.record(position, choice)?;

        let is_complete = position + 1 >= self.bank.size();
        if is_complete {
            self.phase = Phase::Result;
            self.completed_at = Some(now);
        } else {
            self.current += 1;
        }

        Ok(ChoiceOutcome {
            position,
            choice,
            is_complete,
        })
    }

    /// Reveal the expanded report. Valid only in the result phase.
    ///
    /// There is no real gate behind this: any accepted call succeeds, and
    /// repeating it simply keeps the report unlocked.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::InvalidTransition` outside the result phase.
    pub fn unlock_report(&mut self) -> Result<(), SessionError> {
        if self.phase != Phase::Result {
            return Err(SessionError::InvalidTransition {
                action: QuizAction::UnlockReport,
                phase: self.phase,
            });
        }

        self.unlocked = true;
        Ok(())
    }

    /// Return to the creation state. Valid from any phase.
    pub fn reset(&mut self) {
        self.phase = Phase::Intro;
        self.current = 0;
        self.answers.clear();
        self.unlocked = false;
        self.started_at = None;
        self.completed_at = None;
    }
}

impl fmt::Debug for QuizSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("QuizSession")
            .field("phase", &self.phase)
            .field("current", &self.current)
            .field("answered", &self.answers.filled())
            .field("unlocked", &self.unlocked)
            .field("started_at", &self.started_at)
            .field("completed_at", &self.completed_at)
            .finish_non_exhaustive()
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//

#[cfg(test)]
mod tests {
    use super::*;
    use quiz_core::model::{Dimension, QuestionDraft, QuestionId};
    use quiz_core::scoring::MetricLevel;
    use quiz_core::time::fixed_now;

    fn bank() -> Arc<QuestionBank> {
        let questions = [
            (1, Dimension::Logic, 0),
            (2, Dimension::Numeric, 1),
            (3, Dimension::Verbal, 2),
        ]
        .into_iter()
        .map(|(id, dimension, answer)| {
            QuestionDraft {
                id: QuestionId::new(id),
                dimension,
                stem: format!("Q{id}"),
                options: vec!["a".into(), "b".into(), "c".into(), "d".into()],
                answer,
            }
            .validate()
            .unwrap()
        })
        .collect();
        Arc::new(QuestionBank::from_questions(questions).unwrap())
    }

    fn assert_creation_state(session: &QuizSession) {
        assert_eq!(session.phase(), Phase::Intro);
        assert_eq!(session.current_index(), 0);
        assert!(session.answers().is_empty());
        assert!(!session.unlocked());
        assert_eq!(session.started_at(), None);
        assert_eq!(session.completed_at(), None);
        assert!(session.current_question().is_none());
    }

    #[test]
    fn new_session_is_in_creation_state() {
        assert_creation_state(&QuizSession::new(bank()));
    }

    #[test]
    fn choose_before_start_is_rejected_without_mutation() {
        let mut session = QuizSession::new(bank());
        let err = session.choose_option(0, fixed_now()).unwrap_err();

        assert!(matches!(
            err,
            SessionError::InvalidTransition {
                action: QuizAction::ChooseOption,
                phase: Phase::Intro,
            }
        ));
        assert_creation_state(&session);
    }

    #[test]
    fn start_twice_is_rejected() {
        let mut session = QuizSession::new(bank());
        session.start(fixed_now()).unwrap();

        let err = session.start(fixed_now()).unwrap_err();
        assert!(matches!(
            err,
            SessionError::InvalidTransition {
                action: QuizAction::Start,
                phase: Phase::Quiz,
            }
        ));
    }

    #[test]
    fn full_traversal_reaches_result_and_stops() {
        let mut session = QuizSession::new(bank());
        let now = fixed_now();
        session.start(now).unwrap();
        assert_eq!(session.started_at(), Some(now));

        let first = session.choose_option(0, now).unwrap();
        assert_eq!(first.position, 0);
        assert!(!first.is_complete);
        assert_eq!(session.current_index(), 1);

        session.choose_option(1, now).unwrap();
        let last = session.choose_option(2, now).unwrap();
        assert!(last.is_complete);
        assert_eq!(session.phase(), Phase::Result);
        assert_eq!(session.completed_at(), Some(now));
        assert_eq!(session.progress().answered, 3);

        // One past the end is an invalid transition, not an index error.
        let err = session.choose_option(0, now).unwrap_err();
        assert!(matches!(
            err,
            SessionError::InvalidTransition {
                action: QuizAction::ChooseOption,
                phase: Phase::Result,
            }
        ));
    }

    #[test]
    fn out_of_range_choice_leaves_session_unchanged() {
        let mut session = QuizSession::new(bank());
        session.start(fixed_now()).unwrap();

        let err = session.choose_option(4, fixed_now()).unwrap_err();
        assert!(matches!(
            err,
            SessionError::ChoiceOutOfRange {
                choice: 4,
                options: 4
            }
        ));
        assert_eq!(session.current_index(), 0);
        assert!(session.answers().is_empty());
        assert_eq!(session.phase(), Phase::Quiz);
    }

    #[test]
    fn unlock_outside_result_is_rejected() {
        let mut session = QuizSession::new(bank());
        let err = session.unlock_report().unwrap_err();
        assert!(matches!(
            err,
            SessionError::InvalidTransition {
                action: QuizAction::UnlockReport,
                phase: Phase::Intro,
            }
        ));
        assert!(!session.unlocked());
    }

    #[test]
    fn unlock_is_idempotent_in_result() {
        let mut session = QuizSession::new(bank());
        let now = fixed_now();
        session.start(now).unwrap();
        for choice in [0, 0, 0] {
            session.choose_option(choice, now).unwrap();
        }

        session.unlock_report().unwrap();
        session.unlock_report().unwrap();
        assert!(session.unlocked());
    }

    #[test]
    fn reset_from_unlocked_result_restores_creation_state() {
        let mut session = QuizSession::new(bank());
        let now = fixed_now();
        session.start(now).unwrap();
        for choice in [0, 1, 2] {
            session.choose_option(choice, now).unwrap();
        }
        session.unlock_report().unwrap();

        session.reset();
        assert_creation_state(&session);
    }

    #[test]
    fn report_is_recomputed_from_recorded_answers() {
        let mut session = QuizSession::new(bank());
        let now = fixed_now();
        session.start(now).unwrap();

        session.choose_option(0, now).unwrap();
        let mid = session.report().unwrap();
        assert_eq!(mid.total_correct, 1);

        session.choose_option(1, now).unwrap();
        session.choose_option(2, now).unwrap();
        let done = session.report().unwrap();
        assert_eq!(done.total_correct, 3);
        assert_eq!(done.metric, 140);
        assert_eq!(done.level, MetricLevel::Top);
    }
}
