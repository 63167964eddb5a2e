//! Question bank assets.
//!
//! The bank is static data, loaded once at startup: a JSON array of raw
//! question records that are validated into a [`QuestionBank`].

use quiz_core::model::{QuestionBank, QuestionDraft};

use crate::error::BankLoadError;

/// The bundled fifteen-question bank, five questions per dimension.
const BUILTIN_BANK_JSON: &str = include_str!("../assets/builtin_bank.json");

/// Parse and validate a bank from a JSON array of question records.
///
/// # Errors
///
/// Returns `BankLoadError` when the JSON does not parse, a record fails
/// validation, or the resulting bank is empty / has duplicate ids.
pub fn from_json(raw: &str) -> Result<QuestionBank, BankLoadError> {
    let drafts: Vec<QuestionDraft> = serde_json::from_str(raw)?;
    let questions = drafts
        .into_iter()
        .map(QuestionDraft::validate)
        .collect::<Result<Vec<_>, _>>()?;
    Ok(QuestionBank::from_questions(questions)?)
}

/// The bank embedded in this crate.
///
/// # Panics
///
/// Panics if the embedded asset is invalid, which is a build defect rather
/// than a runtime condition; the asset is covered by tests.
#[must_use]
pub fn builtin() -> QuestionBank {
    from_json(BUILTIN_BANK_JSON).expect("builtin question bank should be valid")
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
