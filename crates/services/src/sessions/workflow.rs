use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use quiz_core::model::QuestionBank;

use super::service::{ChoiceOutcome, QuizSession};
use crate::Clock;
use crate::error::SessionError;
use crate::telemetry::{TelemetryEvent, TelemetrySink};

/// Orchestrates quiz sessions and fires telemetry around their transitions.
///
/// Telemetry is a side effect of accepted transitions, never a gate: a
/// rejected action fires nothing, and a failing sink cannot fail the quiz.
pub struct QuizFlowService {
    clock: Clock,
    bank: Arc<QuestionBank>,
    telemetry: Arc<dyn TelemetrySink>,
    visit_recorded: AtomicBool,
}

impl QuizFlowService {
    #[must_use]
    pub fn new(clock: Clock, bank: Arc<QuestionBank>, telemetry: Arc<dyn TelemetrySink>) -> Self {
        Self {
            clock,
            bank,
            telemetry,
            visit_recorded: AtomicBool::new(false),
        }
    }

    #[must_use]
    pub fn bank(&self) -> &QuestionBank {
        &self.bank
    }

    /// Record the initial page visit.
    ///
    /// Fires `visit` at most once per service instance no matter how often
    /// the hosting layer calls this; it is independent of session state.
    pub fn record_visit(&self) {
        if !self.visit_recorded.swap(true, Ordering::Relaxed) {
            self.telemetry.notify(TelemetryEvent::Visit);
        }
    }

    /// Build a fresh session over the shared bank, in the intro phase.
    #[must_use]
    pub fn open_session(&self) -> QuizSession {
        QuizSession::new(Arc::clone(&self.bank))
    }

    /// Begin the quiz and fire `start_test`.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::InvalidTransition` outside the intro phase;
    /// nothing fires on rejection.
    pub fn start(&self, session: &mut QuizSession) -> Result<(), SessionError> {
        session.start(self.clock.now())?;
        self.telemetry.notify(TelemetryEvent::StartTest);
        Ok(())
    }

    /// Answer the current question; fires `finish_test` on the final answer.
    ///
    /// # Errors
    ///
    /// Propagates state-machine rejections; nothing fires on rejection.
    pub fn answer_current(
        &self,
        session: &mut QuizSession,
        choice: usize,
    ) -> Result<ChoiceOutcome, SessionError> {
        let outcome = session.choose_option(choice, self.clock.now())?;
        if outcome.is_complete {
            self.telemetry.notify(TelemetryEvent::FinishTest);
        }
        Ok(outcome)
    }

    /// Unlock the expanded report; fires `unlock_click` then
    /// `unlock_success`.
    ///
    /// There is no verification step behind the pair: every accepted call
    /// fires both again, including repeats on an already-unlocked report.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::InvalidTransition` outside the result phase;
    /// nothing fires on rejection.
    pub fn unlock_report(&self, session: &mut QuizSession) -> Result<(), SessionError> {
        session.unlock_report()?;
        self.telemetry.notify(TelemetryEvent::UnlockClick);
        self.telemetry.notify(TelemetryEvent::UnlockSuccess);
        Ok(())
    }

    /// Return the session to its creation state.
    ///
    /// No telemetry fires here; the original flow never tracked resets.
    pub fn reset(&self, session: &mut QuizSession) {
        session.reset();
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
