use serde::Serialize;
use std::fmt;

//
// ─── PHASE ─────────────────────────────────────────────────────────────────────
//

/// Stage of a quiz session.
///
/// Sessions move linearly `Intro → Quiz → Result`; only a reset goes back.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    Intro,
    Quiz,
    Result,
}

impl Phase {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Phase::Intro => "intro",
            Phase::Quiz => "quiz",
            Phase::Result => "result",
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

//
// ─── ACTIONS ───────────────────────────────────────────────────────────────────
//

/// The user actions a session responds to.
///
/// Used to name the rejected action when a transition is invalid for the
/// current phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuizAction {
    Start,
    ChooseOption,
    UnlockReport,
    Reset,
}

impl QuizAction {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            QuizAction::Start => "start",
            QuizAction::ChooseOption => "choose_option",
            QuizAction::UnlockReport => "unlock_report",
            QuizAction::Reset => "reset",
        }
    }
}

impl fmt::Display for QuizAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
