use crate::clock::SessionClock;
use crate::diff::{classify, CharState, Classification};
use crate::history::HistoryLog;
use crate::passage::{Passage, PassageProvider};
use crate::score::{self, SessionResult};
use std::fmt;

/// Where one attempt is in its lifecycle. `Completed` can only be left via
/// an explicit restart.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SessionState {
    NotStarted,
    InProgress,
    Completed,
}

/// Message derived on completion, picked by comparing the fresh result
/// against the history as it stood before that result was recorded.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Feedback {
    FirstScore { wpm: u64 },
    Improvement { delta: u64, wpm: u64 },
    Excellent { wpm: u64, accuracy: u8 },
    Encouragement,
}

impl fmt::Display for Feedback {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Feedback::FirstScore { wpm } => {
                write!(f, "Test complete! Your first score is {wpm} WPM!")
            }
            Feedback::Improvement { delta, wpm } => {
                write!(
                    f,
                    "Great job! You improved by {delta} WPM! Your new best is {wpm} WPM."
                )
            }
            Feedback::Excellent { wpm, accuracy } => {
                write!(f, "Excellent work! {wpm} WPM with {accuracy}% accuracy!")
            }
            Feedback::Encouragement => {
                write!(f, "Test finished. You did great! Try again to improve!")
            }
        }
    }
}

/// Drives one typing session at a time: receives input-change events,
/// re-diffs the typed buffer against the target, starts and stops the
/// clock, and on completion scores the attempt and appends it to the
/// history. Owns every piece of cross-session state (passage cursor,
/// history log) so nothing lives in module globals.
#[derive(Debug)]
pub struct SessionController {
    provider: PassageProvider,
    passage: Passage,
    target: Vec<char>,
    typed: String,
    classification: Classification,
    pub clock: SessionClock,
    history: HistoryLog,
    state: SessionState,
    input_enabled: bool,
    result: Option<SessionResult>,
    feedback: Option<Feedback>,
}

impl SessionController {
    pub fn new(mut provider: PassageProvider) -> Self {
        let passage = provider.next();
        let target: Vec<char> = passage.text().chars().collect();
        let classification = classify(&target, &[]);
        Self {
            provider,
            passage,
            target,
            typed: String::new(),
            classification,
            clock: SessionClock::default(),
            history: HistoryLog::default(),
            state: SessionState::NotStarted,
            input_enabled: true,
            result: None,
            feedback: None,
        }
    }

    /// Single entry point for input-driven logic. `typed` is the full
    /// buffer as it now stands; the diff always runs over the whole thing,
    /// so backspace needs no special casing. Ignored once input has been
    /// disabled by completion.
    pub fn on_input_changed(&mut self, typed: &str) {
        if !self.input_enabled {
            return;
        }

        if self.state == SessionState::NotStarted && !typed.is_empty() {
            self.clock.start();
            self.state = SessionState::InProgress;
        }

        self.typed.clear();
        self.typed.push_str(typed);
        let typed_chars: Vec<char> = typed.chars().collect();
        self.classification = classify(&self.target, &typed_chars);

        if self.state == SessionState::InProgress && typed_chars.len() == self.target.len() {
            self.complete();
        }
    }

    /// Single entry point for restart, valid from any state. Stops the
    /// clock defensively, clears all transient state, and advances the
    /// passage rotation.
    pub fn on_restart_requested(&mut self) {
        self.clock.stop();
        self.clock.reset();
        self.typed.clear();
        self.input_enabled = true;
        self.result = None;
        self.feedback = None;
        self.load_next_passage();
        self.state = SessionState::NotStarted;
    }

    /// Forwarded from the runtime's 1-second tick; only refreshes the
    /// display clock, never mutates session state.
    pub fn on_clock_tick(&mut self) {
        self.clock.on_tick();
    }

    fn complete(&mut self) {
        self.clock.stop();
        self.input_enabled = false;
        self.state = SessionState::Completed;

        let elapsed = self.clock.elapsed().unwrap_or_default();
        let result = score::compute(self.target.len(), self.classification.error_count, elapsed);

        // Pick feedback before recording, so "previous" means the previous
        // session and not the one just finished.
        self.feedback = Some(self.pick_feedback(result));
        self.history.record(result);
        self.result = Some(result);
    }

    fn pick_feedback(&self, result: SessionResult) -> Feedback {
        match self.history.last() {
            None => Feedback::FirstScore { wpm: result.wpm },
            Some(prev) if result.wpm > prev.wpm => Feedback::Improvement {
                delta: result.wpm - prev.wpm,
                wpm: result.wpm,
            },
            _ if result.wpm >= 50 && result.accuracy > 95 => Feedback::Excellent {
                wpm: result.wpm,
                accuracy: result.accuracy,
            },
            _ => Feedback::Encouragement,
        }
    }

    /// Advances the rotation and reclassifies against an empty buffer.
    /// Callers must have cleared the typed buffer first; restart is the
    /// only flow that does this.
    pub fn load_next_passage(&mut self) -> &Passage {
        self.passage = self.provider.next();
        self.target = self.passage.text().chars().collect();
        self.classification = classify(&self.target, &[]);
        &self.passage
    }

    // --- read accessors for the view layer ---

    pub fn passage(&self) -> &Passage {
        &self.passage
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn typed(&self) -> &str {
        &self.typed
    }

    pub fn char_states(&self) -> &[CharState] {
        &self.classification.states
    }

    pub fn error_count(&self) -> usize {
        self.classification.error_count
    }

    pub fn elapsed_display_seconds(&self) -> u64 {
        self.clock.display_seconds()
    }

    pub fn is_input_enabled(&self) -> bool {
        self.input_enabled
    }

    pub fn result(&self) -> Option<SessionResult> {
        self.result
    }

    pub fn feedback(&self) -> Option<&Feedback> {
        self.feedback.as_ref()
    }

    pub fn history(&self) -> &HistoryLog {
        &self.history
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use std::time::{Duration, Instant};

    fn controller_with(passages: &[&str]) -> SessionController {
        let provider =
            PassageProvider::new(passages.iter().map(|s| s.to_string()).collect()).unwrap();
        SessionController::new(provider)
    }

    /// Types the whole passage, backdating the clock origin just before
    /// the final keystroke so the session scores as if it took `elapsed`.
    fn complete_session(controller: &mut SessionController, elapsed: Duration) {
        let text = controller.passage().text().to_string();
        let chars: Vec<char> = text.chars().collect();
        for i in 1..chars.len() {
            let prefix: String = chars[..i].iter().collect();
            controller.on_input_changed(&prefix);
        }
        controller.clock.started_at = Some(Instant::now() - elapsed);
        controller.on_input_changed(&text);
    }

    // 50 code points, so wpm = round(10 / elapsed_minutes)
    const FIFTY: &str = "the quick brown fox jumps over the lazy dog again!";

    #[test]
    fn starts_not_started_with_passage_loaded() {
        let controller = controller_with(&["abc"]);
        assert_eq!(controller.state(), SessionState::NotStarted);
        assert_eq!(controller.passage().text(), "abc");
        assert_eq!(controller.char_states()[0], CharState::Current);
        assert!(controller.is_input_enabled());
        assert!(!controller.clock.is_running());
    }

    #[test]
    fn first_input_starts_clock_and_session() {
        let mut controller = controller_with(&["abc"]);
        controller.on_input_changed("a");
        assert_eq!(controller.state(), SessionState::InProgress);
        assert!(controller.clock.is_running());
    }

    #[test]
    fn empty_input_does_not_start_session() {
        let mut controller = controller_with(&["abc"]);
        controller.on_input_changed("");
        assert_eq!(controller.state(), SessionState::NotStarted);
        assert!(!controller.clock.is_running());
    }

    #[test]
    fn error_count_updates_before_completion() {
        let mut controller = controller_with(&["abc"]);
        controller.on_input_changed("ax");
        assert_eq!(controller.error_count(), 1);
        assert_eq!(controller.state(), SessionState::InProgress);

        // backspace re-diffs the shorter buffer; the error disappears
        controller.on_input_changed("a");
        assert_eq!(controller.error_count(), 0);
    }

    #[test]
    fn completion_fires_exactly_once() {
        let mut controller = controller_with(&["hi"]);
        controller.on_input_changed("h");
        controller.on_input_changed("hi");

        assert_eq!(controller.state(), SessionState::Completed);
        assert!(!controller.is_input_enabled());
        assert!(!controller.clock.is_running());
        assert_eq!(controller.history().len(), 1);

        // further events at the same length must not re-score or re-record
        let result = controller.result().unwrap();
        controller.on_input_changed("hi");
        controller.on_input_changed("hix");
        assert_eq!(controller.history().len(), 1);
        assert_eq!(controller.result().unwrap(), result);
    }

    #[test]
    fn completion_scores_from_raw_elapsed() {
        let mut controller = controller_with(&[FIFTY]);
        complete_session(&mut controller, Duration::from_secs(60));
        let result = controller.result().unwrap();
        assert_eq!(result.wpm, 10);
        assert_eq!(result.accuracy, 100);
    }

    #[test]
    fn errors_lower_accuracy() {
        let mut controller = controller_with(&["abcde"]);
        controller.on_input_changed("a");
        controller.clock.started_at = Some(Instant::now() - Duration::from_secs(60));
        controller.on_input_changed("abxxe");
        let result = controller.result().unwrap();
        // 3 of 5 correct
        assert_eq!(result.accuracy, 60);
        assert_eq!(controller.error_count(), 2);
    }

    #[test]
    fn first_session_gets_first_score_feedback() {
        let mut controller = controller_with(&[FIFTY]);
        complete_session(&mut controller, Duration::from_secs(60));
        assert_matches!(
            controller.feedback(),
            Some(Feedback::FirstScore { wpm: 10 })
        );
    }

    #[test]
    fn first_score_never_repeats() {
        let mut controller = controller_with(&[FIFTY]);
        complete_session(&mut controller, Duration::from_secs(60));
        controller.on_restart_requested();
        complete_session(&mut controller, Duration::from_secs(60));
        assert_matches!(controller.feedback(), Some(Feedback::Encouragement));
    }

    #[test]
    fn improvement_feedback_cites_delta() {
        let mut controller = controller_with(&[FIFTY]);
        // 40s -> 15 wpm, then 30s -> 20 wpm
        complete_session(&mut controller, Duration::from_secs(40));
        controller.on_restart_requested();
        complete_session(&mut controller, Duration::from_secs(30));
        assert_matches!(
            controller.feedback(),
            Some(Feedback::Improvement { delta: 5, wpm: 20 })
        );
    }

    #[test]
    fn excellent_feedback_needs_speed_and_accuracy() {
        let mut controller = controller_with(&[FIFTY]);
        // 12s -> 50 wpm, 100% accuracy
        complete_session(&mut controller, Duration::from_secs(10));
        controller.on_restart_requested();
        complete_session(&mut controller, Duration::from_secs(12));
        assert_matches!(
            controller.feedback(),
            Some(Feedback::Excellent {
                wpm: 50,
                accuracy: 100
            })
        );
    }

    #[test]
    fn slower_low_speed_run_gets_encouragement() {
        let mut controller = controller_with(&[FIFTY]);
        complete_session(&mut controller, Duration::from_secs(30));
        controller.on_restart_requested();
        complete_session(&mut controller, Duration::from_secs(40));
        assert_matches!(controller.feedback(), Some(Feedback::Encouragement));
    }

    #[test]
    fn restart_clears_transient_state_and_advances_passage() {
        let mut controller = controller_with(&["ab", "cd"]);
        let first = controller.passage().text().to_string();
        controller.on_input_changed("a");
        controller.on_input_changed("ab");
        assert_eq!(controller.state(), SessionState::Completed);

        controller.on_restart_requested();
        assert_eq!(controller.state(), SessionState::NotStarted);
        assert!(controller.is_input_enabled());
        assert!(controller.typed().is_empty());
        assert_eq!(controller.error_count(), 0);
        assert!(controller.feedback().is_none());
        assert!(controller.result().is_none());
        assert_eq!(controller.elapsed_display_seconds(), 0);
        assert_ne!(controller.passage().text(), first);

        // history survives the restart
        assert_eq!(controller.history().len(), 1);
    }

    #[test]
    fn restart_mid_session_stops_the_clock() {
        let mut controller = controller_with(&["abc"]);
        controller.on_input_changed("a");
        assert!(controller.clock.is_running());
        controller.on_restart_requested();
        assert!(!controller.clock.is_running());
        assert_eq!(controller.history().len(), 0);
    }

    #[test]
    fn ticks_after_completion_leave_display_frozen() {
        let mut controller = controller_with(&["hi"]);
        controller.on_input_changed("h");
        controller.clock.started_at = Some(Instant::now() - Duration::from_secs(4));
        controller.on_clock_tick();
        controller.on_input_changed("hi");
        let frozen = controller.elapsed_display_seconds();
        assert_eq!(frozen, 4);

        controller.clock.started_at = Some(Instant::now() - Duration::from_secs(90));
        controller.on_clock_tick();
        assert_eq!(controller.elapsed_display_seconds(), frozen);
    }

    #[test]
    fn history_orders_most_recent_first_across_sessions() {
        let mut controller = controller_with(&[FIFTY]);
        for secs in [60, 40, 30] {
            complete_session(&mut controller, Duration::from_secs(secs));
            controller.on_restart_requested();
        }
        let recent = controller.history().recent(5);
        let wpms: Vec<u64> = recent.iter().map(|r| r.wpm).collect();
        assert_eq!(wpms, vec![20, 15, 10]);
    }

    #[test]
    fn sub_second_completion_has_finite_wpm() {
        let mut controller = controller_with(&["hi"]);
        controller.on_input_changed("h");
        controller.on_input_changed("hi");
        let result = controller.result().unwrap();
        // two chars floored at one second: (2/5) / (1/60) = 24
        assert_eq!(result.wpm, 24);
    }

    #[test]
    fn feedback_messages_render() {
        assert_eq!(
            Feedback::FirstScore { wpm: 42 }.to_string(),
            "Test complete! Your first score is 42 WPM!"
        );
        assert_eq!(
            Feedback::Improvement { delta: 5, wpm: 20 }.to_string(),
            "Great job! You improved by 5 WPM! Your new best is 20 WPM."
        );
        assert_eq!(
            Feedback::Excellent {
                wpm: 55,
                accuracy: 98
            }
            .to_string(),
            "Excellent work! 55 WPM with 98% accuracy!"
        );
        assert!(Feedback::Encouragement.to_string().contains("Try again"));
    }
}
