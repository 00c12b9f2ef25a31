use std::time::Duration;

/// One "word" in the WPM convention is five characters.
pub const CHARS_PER_WORD: f64 = 5.0;

/// Floor applied to elapsed time before the WPM division. A completion
/// inside the first second would otherwise divide by (close to) zero and
/// produce an unbounded WPM; flooring keeps the result large but finite.
const MIN_ELAPSED: Duration = Duration::from_secs(1);

/// Final metrics for one completed session. Created once per completion,
/// immutable thereafter.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SessionResult {
    pub wpm: u64,
    pub accuracy: u8,
}

/// Computes WPM and accuracy from the passage length, the final error
/// count, and the raw elapsed time.
///
/// `wpm = round((total_chars / 5) / elapsed_minutes)` and
/// `accuracy = round((total_chars - error_count) / total_chars * 100)`,
/// clamped to `[0, 100]`. The clamp is defensive; the diff already bounds
/// `error_count` by `total_chars`.
pub fn compute(total_chars: usize, error_count: usize, elapsed: Duration) -> SessionResult {
    if total_chars == 0 {
        // Empty passages are rejected at provider construction.
        return SessionResult {
            wpm: 0,
            accuracy: 100,
        };
    }

    let elapsed_minutes = elapsed.max(MIN_ELAPSED).as_secs_f64() / 60.0;
    let wpm = ((total_chars as f64 / CHARS_PER_WORD) / elapsed_minutes).round() as u64;

    let correct = total_chars.saturating_sub(error_count);
    let accuracy = ((correct as f64 / total_chars as f64) * 100.0)
        .round()
        .clamp(0.0, 100.0) as u8;

    SessionResult { wpm, accuracy }
}
