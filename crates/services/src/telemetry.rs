use std::fmt;
use std::sync::Mutex;

//
// ─── EVENTS ────────────────────────────────────────────────────────────────────
//

/// Named, payload-less notification of a user action.
///
/// The wire names match what the analytics collector expects and must not
/// change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TelemetryEvent {
    Visit,
    StartTest,
    FinishTest,
    UnlockClick,
    UnlockSuccess,
}

impl TelemetryEvent {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            TelemetryEvent::Visit => "visit",
            TelemetryEvent::StartTest => "start_test",
            TelemetryEvent::FinishTest => "finish_test",
            TelemetryEvent::UnlockClick => "unlock_click",
            TelemetryEvent::UnlockSuccess => "unlock_success",
        }
    }
}

impl fmt::Display for TelemetryEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

//
// ─── SINK CONTRACT ─────────────────────────────────────────────────────────────
//

/// Best-effort event notification.
///
/// Implementations must never panic, block, or surface failures to the
/// caller: a missing or broken collector must not alter quiz transitions or
/// scores. Delivery is strictly one-way.
pub trait TelemetrySink: Send + Sync {
    fn notify(&self, event: TelemetryEvent);
}

/// Log-only fallback used when no real collector is wired up.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogSink;

impl TelemetrySink for LogSink {
    fn notify(&self, event: TelemetryEvent) {
        tracing::info!(event = event.as_str(), "telemetry event");
    }
}

/// Sink that discards every event.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSink;

impl TelemetrySink for NullSink {
    fn notify(&self, _event: TelemetryEvent) {}
}

/// In-memory sink capturing events in order, for tests and embedding
/// presentation layers.
#[derive(Debug, Default)]
pub struct RecordingSink {
    events: Mutex<Vec<TelemetryEvent>>,
}

impl RecordingSink {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the events recorded so far, oldest first.
    #[must_use]
    pub fn events(&self) -> Vec<TelemetryEvent> {
        self.events.lock().map(|g| g.clone()).unwrap_or_default()
    }
}

impl TelemetrySink for RecordingSink {
    fn notify(&self, event: TelemetryEvent) {
        // A poisoned lock is swallowed: sinks are best-effort by contract.
        if let Ok(mut guard) = self.events.lock() {
            guard.push(event);
        }
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wire_names_are_stable() {
        assert_eq!(TelemetryEvent::Visit.as_str(), "visit");
        assert_eq!(TelemetryEvent::StartTest.as_str(), "start_test");
        assert_eq!(TelemetryEvent::FinishTest.as_str(), "finish_test");
        assert_eq!(TelemetryEvent::UnlockClick.as_str(), "unlock_click");
        assert_eq!(TelemetryEvent::UnlockSuccess.to_string(), "unlock_success");
    }

    #[test]
    fn recording_sink_captures_in_order() {
        let sink = RecordingSink::new();
        sink.notify(TelemetryEvent::Visit);
        sink.notify(TelemetryEvent::StartTest);

        assert_eq!(
            sink.events(),
            vec![TelemetryEvent::Visit, TelemetryEvent::StartTest]
        );
    }

    #[test]
    fn null_and_log_sinks_accept_everything() {
        NullSink.notify(TelemetryEvent::FinishTest);
        LogSink.notify(TelemetryEvent::FinishTest);
    }
}
