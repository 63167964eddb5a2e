use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

use crate::model::ids::QuestionId;

/// Number of answer options every question carries.
pub const OPTIONS_PER_QUESTION: usize = 4;

//
// ─── DIMENSION ─────────────────────────────────────────────────────────────────
//

/// Question category used for sub-scoring.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Dimension {
    Logic,
    Numeric,
    Verbal,
}

impl Dimension {
    /// All dimensions, in the order sub-scores are reported.
    pub const ALL: [Dimension; 3] = [Dimension::Logic, Dimension::Numeric, Dimension::Verbal];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Dimension::Logic => "logic",
            Dimension::Numeric => "numeric",
            Dimension::Verbal => "verbal",
        }
    }
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

//
// ─── QUESTION TYPES ────────────────────────────────────────────────────────────
//

/// Raw question record as found in a bank asset, prior to validation.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct QuestionDraft {
    pub id: QuestionId,
    pub dimension: Dimension,
    pub stem: String,
    pub options: Vec<String>,
    pub answer: usize,
}

impl QuestionDraft {
    /// Validate the draft into an immutable `Question`.
    ///
    /// # Errors
    ///
    /// Returns `QuestionError` if the stem or any option is blank, the
    /// option count is not exactly [`OPTIONS_PER_QUESTION`], or the answer
    /// key does not index into the options.
    pub fn validate(self) -> Result<Question, QuestionError> {
        if self.stem.trim().is_empty() {
            return Err(QuestionError::EmptyStem { id: self.id });
        }

        if self.options.len() != OPTIONS_PER_QUESTION {
            return Err(QuestionError::WrongOptionCount {
                id: self.id,
                expected: OPTIONS_PER_QUESTION,
                got: self.options.len(),
            });
        }

        if let Some(index) = self.options.iter().position(|opt| opt.trim().is_empty()) {
            return Err(QuestionError::EmptyOption { id: self.id, index });
        }

        if self.answer >= self.options.len() {
            return Err(QuestionError::AnswerOutOfRange {
                id: self.id,
                answer: self.answer,
                len: self.options.len(),
            });
        }

        Ok(Question {
            id: self.id,
            dimension: self.dimension,
            stem: self.stem,
            options: self.options,
            answer: self.answer,
        })
    }
}

/// A validated multiple-choice question. Immutable once built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Question {
    id: QuestionId,
    dimension: Dimension,
    stem: String,
    options: Vec<String>,
    answer: usize,
}

impl Question {
    #[must_use]
    pub fn id(&self) -> QuestionId {
        self.id
    }

    #[must_use]
    pub fn dimension(&self) -> Dimension {
        self.dimension
    }

    #[must_use]
    pub fn stem(&self) -> &str {
        &self.stem
    }

    /// Answer options, in presentation order.
    #[must_use]
    pub fn options(&self) -> &[String] {
        &self.options
    }

    /// Index of the correct option.
    #[must_use]
    pub fn answer(&self) -> usize {
        self.answer
    }

    /// Returns true if `choice` indexes into this question's options.
    #[must_use]
    pub fn accepts_choice(&self, choice: usize) -> bool {
        choice < self.options.len()
    }
}

//
// ─── QUESTION VALIDATION ERRORS ────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum QuestionError {
    #[error("question {id} has an empty stem")]
    EmptyStem { id: QuestionId },

    #[error("question {id} must have {expected} options, got {got}")]
    WrongOptionCount {
        id: QuestionId,
        expected: usize,
        got: usize,
    },

    #[error("question {id} option {index} is empty")]
    EmptyOption { id: QuestionId, index: usize },

    #[error("question {id} answer key {answer} is outside its {len} options")]
    AnswerOutOfRange {
        id: QuestionId,
        answer: usize,
        len: usize,
    },
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
