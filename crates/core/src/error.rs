use thiserror::Error;

use crate::model::{AnswerSheetError, BankError, QuestionError};
use crate::scoring::ScoringError;

#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Question(#[from] QuestionError),
    #[error(transparent)]
    Bank(#[from] BankError),
    #[error(transparent)]
    Answers(#[from] AnswerSheetError),
    #[error(transparent)]
    Scoring(#[from] ScoringError),
}
