use serde::Serialize;

use quiz_core::model::{Dimension, Phase, QuestionId};
use quiz_core::scoring::Report;

use super::progress::QuizProgress;
use super::service::QuizSession;
use crate::error::SessionError;

/// Label shown next to an option: `A` for index 0, `B` for 1, and so on.
#[must_use]
pub fn option_label(index: usize) -> char {
    u32::try_from(index)
        .ok()
        .and_then(|i| char::from_u32('A' as u32 + i))
        .unwrap_or('?')
}

//
// ─── QUESTION VIEW ─────────────────────────────────────────────────────────────
//

/// Presentation-agnostic snapshot of the question being asked.
///
/// This is intentionally **not** a UI view-model: no pre-formatted strings,
/// no localization assumptions. The presentation layer decides how to label
/// and lay out options.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QuestionView {
    /// Zero-based position within the bank.
    pub position: usize,
    pub total: usize,
    pub id: QuestionId,
    pub dimension: Dimension,
    pub stem: String,
    pub options: Vec<String>,
}

//
// ─── SESSION VIEW ──────────────────────────────────────────────────────────────
//

/// Everything the presentation layer may read after a state change.
///
/// Derived scores are recomputed on every projection; `unlocked` tells the
/// presentation layer whether the expanded report may be revealed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SessionView {
    pub phase: Phase,
    pub progress: QuizProgress,
    /// Present only while a question awaits an answer.
    pub question: Option<QuestionView>,
    pub answers: Vec<usize>,
    pub unlocked: bool,
    pub report: Report,
}

impl SessionView {
    /// Project the session into a read-only snapshot.
    ///
    /// # Errors
    ///
    /// Propagates scoring errors; unreachable for sessions over banks built
    /// through `QuestionBank::from_questions`.
    pub fn project(session: &QuizSession) -> Result<Self, SessionError> {
        let question = session.current_question().map(|q| QuestionView {
            position: session.current_index(),
            total: session.bank().size(),
            id: q.id(),
            dimension: q.dimension(),
            stem: q.stem().to_string(),
            options: q.options().to_vec(),
        });

        Ok(Self {
            phase: session.phase(),
            progress: session.progress(),
            question,
            answers: session.answers().iter().collect(),
            unlocked: session.unlocked(),
            report: session.report()?,
        })
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//

#[cfg(test)]
mod tests {
    use super::*;
    use quiz_core::model::{QuestionBank, QuestionDraft};
    use quiz_core::time::fixed_now;
    use std::sync::Arc;

    fn bank() -> Arc<QuestionBank> {
        let questions = (1..=2)
            .map(|id| {
                QuestionDraft {
                    id: QuestionId::new(id),
                    dimension: Dimension::Numeric,
                    stem: format!("Q{id}"),
                    options: vec!["a".into(), "b".into(), "c".into(), "d".into()],
                    answer: 0,
                }
                .validate()
                .unwrap()
            })
            .collect();
        Arc::new(QuestionBank::from_questions(questions).unwrap())
    }

    #[test]
    fn option_labels_follow_the_alphabet() {
        assert_eq!(option_label(0), 'A');
        assert_eq!(option_label(3), 'D');
    }

    #[test]
    fn intro_projection_has_no_question() {
        let session = QuizSession::new(bank());
        let view = SessionView::project(&session).unwrap();

        assert_eq!(view.phase, Phase::Intro);
        assert!(view.question.is_none());
        assert!(view.answers.is_empty());
        assert!(!view.unlocked);
        assert_eq!(view.report.total_correct, 0);
    }

    #[test]
    fn quiz_projection_carries_the_current_question() {
        let mut session = QuizSession::new(bank());
        session.start(fixed_now()).unwrap();
        session.choose_option(0, fixed_now()).unwrap();

        let view = SessionView::project(&session).unwrap();
        let question = view.question.expect("question in quiz phase");

        assert_eq!(question.position, 1);
        assert_eq!(question.total, 2);
        assert_eq!(question.stem, "Q2");
        assert_eq!(view.answers, vec![0]);
        assert_eq!(view.progress.answered, 1);
        assert_eq!(view.progress.remaining, 1);
    }

    #[test]
    fn result_projection_reflects_unlock_and_scores() {
        let mut session = QuizSession::new(bank());
        session.start(fixed_now()).unwrap();
        session.choose_option(0, fixed_now()).unwrap();
        session.choose_option(3, fixed_now()).unwrap();
        session.unlock_report().unwrap();

        let view = SessionView::project(&session).unwrap();
        assert_eq!(view.phase, Phase::Result);
        assert!(view.question.is_none());
        assert!(view.unlocked);
        assert_eq!(view.report.total_correct, 1);
        assert_eq!(view.report.metric, 105);
    }
}
