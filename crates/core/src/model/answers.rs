use thiserror::Error;

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AnswerSheetError {
    #[error("cannot record answer at position {position}: only {filled} answered so far")]
    NonContiguous { position: usize, filled: usize },
}

//
// ─── ANSWER SHEET ──────────────────────────────────────────────────────────────
//

/// The option indices a user has selected, in question order.
///
/// Invariant: answers form a gap-free prefix. Position `i` is filled exactly
/// when question `i` has been answered; the linear flow never skips ahead.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AnswerSheet {
    choices: Vec<usize>,
}

impl AnswerSheet {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the option chosen at `position`.
    ///
    /// Appends when `position` is the next unanswered slot; overwrites when
    /// the position is already filled (re-choosing the current question).
    ///
    /// # Errors
    ///
    /// Returns `AnswerSheetError::NonContiguous` if `position` lies past the
    /// filled prefix.
    pub fn record(&mut self, position: usize, choice: usize) -> Result<(), AnswerSheetError> {
        if position > self.choices.len() {
            return Err(AnswerSheetError::NonContiguous {
                position,
                filled: self.choices.len(),
            });
        }

        if position == self.choices.len() {
            self.choices.push(choice);
        } else {
            self.choices[position] = choice;
        }
        Ok(())
    }

    /// The choice recorded at `position`, or `None` beyond the filled prefix.
    #[must_use]
    pub fn choice_at(&self, position: usize) -> Option<usize> {
        self.choices.get(position).copied()
    }

    /// Number of questions answered so far.
    #[must_use]
    pub fn filled(&self) -> usize {
        self.choices.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.choices.is_empty()
    }

    pub fn clear(&mut self) {
        self.choices.clear();
    }

    pub fn iter(&self) -> impl Iterator<Item = usize> + '_ {
        self.choices.iter().copied()
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
