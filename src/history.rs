use crate::score::SessionResult;

/// Append-only, in-memory log of completed-session results.
///
/// Storage is unbounded and insertion-ordered; bounding to the most recent
/// five entries is purely a rendering decision made by the view through
/// `recent`. Nothing is persisted across runs of the program.
#[derive(Debug, Default)]
pub struct HistoryLog {
    entries: Vec<SessionResult>,
}

impl HistoryLog {
    pub fn record(&mut self, result: SessionResult) {
        self.entries.push(result);
    }

    /// Up to the last `n` results, most-recent-first.
    pub fn recent(&self, n: usize) -> Vec<SessionResult> {
        self.entries.iter().rev().take(n).copied().collect()
    }

    /// The most recently recorded result.
    pub fn last(&self) -> Option<&SessionResult> {
        self.entries.last()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
