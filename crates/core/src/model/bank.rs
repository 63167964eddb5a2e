use std::collections::HashSet;
use thiserror::Error;

use crate::model::ids::QuestionId;
use crate::model::question::{Dimension, Question};

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum BankError {
    #[error("question bank cannot be empty")]
    Empty,

    #[error("duplicate question id {0} in bank")]
    DuplicateId(QuestionId),

    #[error("question index {index} out of range for bank of {size}")]
    OutOfRange { index: usize, size: usize },
}

//
// ─── QUESTION BANK ─────────────────────────────────────────────────────────────
//

/// Fixed, ordered collection of questions.
///
/// The bank is loaded once at startup and never mutated; its order defines
/// the presentation order. An empty bank is a configuration error, so every
/// constructed bank has at least one question.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestionBank {
    questions: Vec<Question>,
}

impl QuestionBank {
    /// Build a bank from validated questions.
    ///
    /// # Errors
    ///
    /// Returns `BankError::Empty` if no questions are given and
    /// `BankError::DuplicateId` if two questions share an id.
    pub fn from_questions(questions: Vec<Question>) -> Result<Self, BankError> {
        if questions.is_empty() {
            return Err(BankError::Empty);
        }

        let mut seen = HashSet::with_capacity(questions.len());
        for question in &questions {
            if !seen.insert(question.id()) {
                return Err(BankError::DuplicateId(question.id()));
            }
        }

        Ok(Self { questions })
    }

    /// Number of questions in the bank. Always at least 1.
    #[must_use]
    pub fn size(&self) -> usize {
        self.questions.len()
    }

    /// Question at `index`, in presentation order.
    ///
    /// # Errors
    ///
    /// Returns `BankError::OutOfRange` if `index` is not in `[0, size())`.
    pub fn get(&self, index: usize) -> Result<&Question, BankError> {
        self.questions.get(index).ok_or(BankError::OutOfRange {
            index,
            size: self.questions.len(),
        })
    }

    /// Dimension of the question at `index`.
    ///
    /// # Errors
    ///
    /// Returns `BankError::OutOfRange` if `index` is not in `[0, size())`.
    pub fn dimension_of(&self, index: usize) -> Result<Dimension, BankError> {
        self.get(index).map(Question::dimension)
    }

    #[must_use]
    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    pub fn iter(&self) -> impl Iterator<Item = &Question> {
        self.questions.iter()
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::question::QuestionDraft;

    fn question(id: u64, dimension: Dimension) -> Question {
        QuestionDraft {
            id: QuestionId::new(id),
            dimension,
            stem: format!("Q{id}"),
            options: vec!["a".into(), "b".into(), "c".into(), "d".into()],
            answer: 0,
        }
        .validate()
        .unwrap()
    }

    #[test]
    fn empty_bank_is_a_configuration_error() {
        let err = QuestionBank::from_questions(Vec::new()).unwrap_err();
        assert!(matches!(err, BankError::Empty));
    }

    #[test]
    fn duplicate_ids_rejected() {
        let err = QuestionBank::from_questions(vec![
            question(1, Dimension::Logic),
            question(1, Dimension::Verbal),
        ])
        .unwrap_err();
        assert_eq!(err, BankError::DuplicateId(QuestionId::new(1)));
    }

    #[test]
    fn get_preserves_load_order() {
        let bank = QuestionBank::from_questions(vec![
            question(3, Dimension::Logic),
            question(1, Dimension::Numeric),
        ])
        .unwrap();

        assert_eq!(bank.size(), 2);
        assert_eq!(bank.get(0).unwrap().id(), QuestionId::new(3));
        assert_eq!(bank.dimension_of(1).unwrap(), Dimension::Numeric);
    }

    #[test]
    fn get_out_of_range() {
        let bank = QuestionBank::from_questions(vec![question(1, Dimension::Logic)]).unwrap();
        let err = bank.get(1).unwrap_err();
        assert_eq!(err, BankError::OutOfRange { index: 1, size: 1 });
    }
}
