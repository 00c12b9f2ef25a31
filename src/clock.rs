use std::time::{Duration, Instant};

/// Tracks elapsed time for one session.
///
/// Two readings coexist on purpose: `display_seconds` is recomputed on each
/// runtime tick and is only ever used for display, while `elapsed()` is
/// derived from the raw start/stop instants so scoring never inherits the
/// display value's per-second rounding.
///
/// The clock does not defend against double-start or double-stop; the
/// controller's state machine is the only caller and guards the sequence.
#[derive(Debug, Default)]
pub struct SessionClock {
    pub started_at: Option<Instant>,
    pub stopped_at: Option<Instant>,
    display_seconds: u64,
}

impl SessionClock {
    pub fn start(&mut self) {
        self.started_at = Some(Instant::now());
        self.stopped_at = None;
        self.display_seconds = 0;
    }

    /// Freezes the display value and captures the raw stop instant.
    pub fn stop(&mut self) {
        if self.is_running() {
            self.stopped_at = Some(Instant::now());
        }
    }

    pub fn reset(&mut self) {
        self.started_at = None;
        self.stopped_at = None;
        self.display_seconds = 0;
    }

    pub fn is_running(&self) -> bool {
        self.started_at.is_some() && self.stopped_at.is_none()
    }

    /// Recomputes the display value. A tick that arrives after `stop()` is
    /// a no-op: the display must stay frozen once the session has ended.
    pub fn on_tick(&mut self) {
        if let (Some(started_at), None) = (self.started_at, self.stopped_at) {
            self.display_seconds = started_at.elapsed().as_secs();
        }
    }

    pub fn display_seconds(&self) -> u64 {
        self.display_seconds
    }

    /// Raw elapsed time from start to stop (or to now while running).
    /// `None` before the first start.
    pub fn elapsed(&self) -> Option<Duration> {
        let started_at = self.started_at?;
        match self.stopped_at {
            Some(stopped_at) => Some(stopped_at.duration_since(started_at)),
            None => Some(started_at.elapsed()),
        }
    }
}
