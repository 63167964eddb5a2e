use serde::Serialize;
use std::fmt;
use thiserror::Error;

use crate::model::{AnswerSheet, Dimension, QuestionBank};

/// Metric assigned when no question is answered correctly.
const METRIC_FLOOR: f64 = 70.0;
/// Distance between the floor and the all-correct metric of 140.
const METRIC_SPAN: f64 = 70.0;

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ScoringError {
    #[error("cannot estimate a metric over zero questions")]
    EmptyBank,
}

//
// ─── TOTALS ────────────────────────────────────────────────────────────────────
//

/// Count of questions answered with the bank's correct option.
///
/// Unanswered positions count as incorrect; a sheet longer than the bank
/// contributes nothing beyond the bank's size. Never fails.
#[must_use]
pub fn total_correct(bank: &QuestionBank, answers: &AnswerSheet) -> usize {
    bank.iter()
        .enumerate()
        .filter(|(position, question)| answers.choice_at(*position) == Some(question.answer()))
        .count()
}

/// Estimated composite metric: `round(70 + (correct / total) * 70)`.
///
/// The result always lies in `[70, 140]`.
///
/// # Errors
///
/// Returns `ScoringError::EmptyBank` when `total` is zero. Bank
/// construction already forbids empty banks, so this only guards direct
/// callers.
pub fn estimated_metric(total_correct: usize, total: usize) -> Result<u32, ScoringError> {
    if total == 0 {
        return Err(ScoringError::EmptyBank);
    }

    // NOTE: counts are bounded by the bank size, far below f64's exact
    // integer range, and the rounded result stays within [70, 140].
    #[allow(clippy::cast_precision_loss)]
    let ratio = total_correct.min(total) as f64 / total as f64;

    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let metric = (METRIC_FLOOR + ratio * METRIC_SPAN).round() as u32;

    Ok(metric)
}

//
// ─── METRIC LEVEL ──────────────────────────────────────────────────────────────
//

/// Coarse bucket for a metric value. Tier lower bounds are inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MetricLevel {
    Basic,
    Average,
    Excellent,
    Top,
}

impl MetricLevel {
    /// Bucket a metric: `>= 126` top, `>= 111` excellent, `>= 91` average,
    /// below that basic.
    #[must_use]
    pub fn from_metric(metric: u32) -> Self {
        match metric {
            126.. => MetricLevel::Top,
            111..=125 => MetricLevel::Excellent,
            91..=110 => MetricLevel::Average,
            _ => MetricLevel::Basic,
        }
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            MetricLevel::Basic => "basic",
            MetricLevel::Average => "average",
            MetricLevel::Excellent => "excellent",
            MetricLevel::Top => "top",
        }
    }
}

impl fmt::Display for MetricLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

//
// ─── DIMENSION BREAKDOWN ───────────────────────────────────────────────────────
//

/// Per-dimension sub-score.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DimensionScore {
    pub dimension: Dimension,
    pub correct: usize,
    pub total: usize,
    /// `round(100 * correct / total)`, in `[0, 100]`.
    pub percentage: u32,
}

/// Sub-scores for every dimension present in the bank, in [`Dimension::ALL`]
/// order.
///
/// Dimensions with no questions in the bank are skipped entirely rather
/// than reported as 0%, so no division by zero can occur.
#[must_use]
pub fn dimension_breakdown(bank: &QuestionBank, answers: &AnswerSheet) -> Vec<DimensionScore> {
    Dimension::ALL
        .iter()
        .filter_map(|&dimension| {
            let mut total = 0_usize;
            let mut correct = 0_usize;
            for (position, question) in bank.iter().enumerate() {
                if question.dimension() != dimension {
                    continue;
                }
                total += 1;
                if answers.choice_at(position) == Some(question.answer()) {
                    correct += 1;
                }
            }

            if total == 0 {
                return None;
            }

            #[allow(clippy::cast_precision_loss)]
            let share = correct as f64 / total as f64;
            #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
            let percentage = (share * 100.0).round() as u32;

            Some(DimensionScore {
                dimension,
                correct,
                total,
                percentage,
            })
        })
        .collect()
}

//
// ─── REPORT ────────────────────────────────────────────────────────────────────
//

/// Aggregate scoring projection over a bank and an answer sheet.
///
/// Reports carry no lifecycle of their own: they are recomputed from
/// `(bank, answers)` on demand and can never drift from the recorded
/// answers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Report {
    pub total_correct: usize,
    pub total_questions: usize,
    pub metric: u32,
    pub level: MetricLevel,
    pub breakdown: Vec<DimensionScore>,
}

impl Report {
    /// Evaluate the full report for the given bank and answers.
    ///
    /// # Errors
    ///
    /// Returns `ScoringError::EmptyBank` only for a zero-size bank, which
    /// `QuestionBank` construction already rules out.
    pub fn evaluate(bank: &QuestionBank, answers: &AnswerSheet) -> Result<Self, ScoringError> {
        let correct = total_correct(bank, answers);
        let metric = estimated_metric(correct, bank.size())?;

        Ok(Self {
            total_correct: correct,
            total_questions: bank.size(),
            metric,
            level: MetricLevel::from_metric(metric),
            breakdown: dimension_breakdown(bank, answers),
        })
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
