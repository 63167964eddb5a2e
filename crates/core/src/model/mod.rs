mod answers;
mod bank;
mod ids;
mod question;
mod session;

pub use answers::{AnswerSheet, AnswerSheetError};
pub use bank::{BankError, QuestionBank};
pub use ids::{ParseIdError, QuestionId};
pub use question::{
    Dimension, OPTIONS_PER_QUESTION, Question, QuestionDraft, QuestionError,
};
pub use session::{Phase, QuizAction};
