#![forbid(unsafe_code)]

pub mod error;
pub mod question_bank;
pub mod sessions;
pub mod telemetry;

pub use quiz_core::Clock;

pub use error::{BankLoadError, SessionError};
pub use sessions::{
    ChoiceOutcome, QuestionView, QuizFlowService, QuizProgress, QuizSession, SessionView,
};
pub use telemetry::{LogSink, NullSink, RecordingSink, TelemetryEvent, TelemetrySink};
