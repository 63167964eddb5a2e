use serde::Serialize;

/// Aggregated view of quiz progress, useful for the presentation layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QuizProgress {
    pub total: usize,
    pub answered: usize,
    pub remaining: usize,
    pub is_complete: bool,
}
