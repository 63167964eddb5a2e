//! Shared error types for the services crate.

use thiserror::Error;

use quiz_core::model::{AnswerSheetError, BankError, Phase, QuestionError, QuizAction};
use quiz_core::scoring::ScoringError;

/// Errors emitted by the quiz session state machine.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SessionError {
    #[error("action {action} is not valid in phase {phase}")]
    InvalidTransition { action: QuizAction, phase: Phase },

    #[error("option {choice} is not one of the {options} options")]
    ChoiceOutOfRange { choice: usize, options: usize },

    #[error(transparent)]
    Bank(#[from] BankError),
    #[error(transparent)]
    Answers(#[from] AnswerSheetError),
    #[error(transparent)]
    Scoring(#[from] ScoringError),
}

/// Errors emitted while loading a question bank asset.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum BankLoadError {
    #[error(transparent)]
    Parse(#[from] serde_json::Error),
    #[error(transparent)]
    Question(#[from] QuestionError),
    #[error(transparent)]
    Bank(#[from] BankError),
}
