//! Timed feedback after a judgment, expressed as a pure function of the clock.
//!
//! The page samples `performance.now()` and asks which phase it is in; nothing here sleeps
//! or schedules, so the game core stays synchronous.

use serde::Serialize;

use crate::config::FeedbackTiming;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum FeedbackPhase {
    /// Picked card (and the right one, on a miss) highlighted.
    Highlight,
    /// Highlight removed, board held still before the next prompt.
    Settle,
    Done,
}

/// What the page shows for the last pick: the phase, and whether it was a hit or a miss.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct FeedbackView {
    pub phase: FeedbackPhase,
    pub correct: bool,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FeedbackTimeline {
    start_ms: f64,
    correct: bool,
    timing: FeedbackTiming,
}

impl FeedbackTimeline {
    pub fn start(now_ms: f64, correct: bool, timing: FeedbackTiming) -> Self {
        Self { start_ms: now_ms, correct, timing }
    }

    pub fn phase(&self, now_ms: f64) -> FeedbackPhase {
        let elapsed = now_ms - self.start_ms;
        if elapsed < self.timing.highlight_ms {
            FeedbackPhase::Highlight
        } else if elapsed < self.timing.total_ms() {
            FeedbackPhase::Settle
        } else {
            FeedbackPhase::Done
        }
    }

    pub fn view(&self, now_ms: f64) -> FeedbackView {
        FeedbackView { phase: self.phase(now_ms), correct: self.correct }
    }

    pub fn is_done(&self, now_ms: f64) -> bool {
        self.phase(now_ms) == FeedbackPhase::Done
    }

    /// Milliseconds until `Done`, zero once it is reached.
    pub fn remaining_ms(&self, now_ms: f64) -> f64 {
        (self.start_ms + self.timing.total_ms() - now_ms).max(0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn phases_follow_durations() {
        let timing = FeedbackTiming { highlight_ms: 100.0, settle_ms: 50.0 };
        let t = FeedbackTimeline::start(1_000.0, true, timing);
        assert_eq!(t.phase(1_000.0), FeedbackPhase::Highlight);
        assert_eq!(t.phase(1_099.9), FeedbackPhase::Highlight);
        assert_eq!(t.phase(1_100.0), FeedbackPhase::Settle);
        assert_eq!(t.phase(1_149.0), FeedbackPhase::Settle);
        assert_eq!(t.phase(1_150.0), FeedbackPhase::Done);
        assert!(t.is_done(5_000.0));
    }

    #[test]
    fn view_carries_hit_or_miss() {
        let t = FeedbackTimeline::start(0.0, false, FeedbackTiming::default());
        let view = t.view(10.0);
        assert_eq!(view, FeedbackView { phase: FeedbackPhase::Highlight, correct: false });
        let json = serde_json::to_value(view).unwrap();
        assert_eq!(json, serde_json::json!({"phase": "highlight", "correct": false}));
    }

    #[test]
    fn remaining_never_negative() {
        let t = FeedbackTimeline::start(0.0, false, FeedbackTiming::default());
        assert_eq!(t.remaining_ms(200.0), 1_000.0);
        assert_eq!(t.remaining_ms(10_000.0), 0.0);
    }

    #[test]
    fn zero_durations_finish_immediately() {
        let timing = FeedbackTiming { highlight_ms: 0.0, settle_ms: 0.0 };
        let t = FeedbackTimeline::start(10.0, false, timing);
        assert_eq!(t.phase(10.0), FeedbackPhase::Done);
    }
}
