//! Correct / incorrect counters and the accuracy figure shown to the player.

use serde::Serialize;

use crate::error::{GameError, Result};

#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreSnapshot {
    pub correct: u32,
    pub incorrect: u32,
    /// Cards still to be matched, never below zero.
    pub remaining: u32,
    /// Percentage in `[0, 100]`, two decimals.
    pub accuracy: f64,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ScoreTracker {
    total_cards: u32,
    correct: u32,
    incorrect: u32,
}

/// Convert an untyped numeric total (as JS hands it over) into a card count.
pub fn card_count(value: f64) -> Result<u32> {
    if !value.is_finite() || value.fract() != 0.0 {
        return Err(GameError::invalid(format!(
            "total card count must be an integer, got {value}"
        )));
    }
    if value < 0.0 {
        return Err(GameError::invalid(format!(
            "total card count must not be negative, got {value}"
        )));
    }
    if value > f64::from(u32::MAX) {
        return Err(GameError::invalid(format!("total card count {value} is too large")));
    }
    Ok(value as u32)
}

/// `correct / attempts * 100` rounded to two decimals; zero before any attempt.
pub fn accuracy(correct: u32, incorrect: u32) -> f64 {
    let attempts = u64::from(correct) + u64::from(incorrect);
    if attempts == 0 {
        return 0.0;
    }
    let pct = correct as f64 / attempts as f64 * 100.0;
    (pct * 100.0).round() / 100.0
}

impl ScoreTracker {
    /// Signed on purpose: a negative total is a caller error that must be reported.
    pub fn new(total_cards: i64) -> Result<Self> {
        Ok(Self {
            total_cards: Self::checked_total(total_cards)?,
            correct: 0,
            incorrect: 0,
        })
    }

    fn checked_total(total_cards: i64) -> Result<u32> {
        u32::try_from(total_cards).map_err(|_| {
            GameError::invalid(format!(
                "total card count must be a non-negative integer, got {total_cards}"
            ))
        })
    }

    /// Increments unconditionally; callers only report genuinely correct judgments.
    pub fn record_correct(&mut self) {
        self.correct = self.correct.saturating_add(1);
    }

    pub fn record_incorrect(&mut self) {
        self.incorrect = self.incorrect.saturating_add(1);
    }

    pub fn correct(&self) -> u32 {
        self.correct
    }

    pub fn incorrect(&self) -> u32 {
        self.incorrect
    }

    pub fn total_cards(&self) -> u32 {
        self.total_cards
    }

    pub fn snapshot(&self) -> ScoreSnapshot {
        self.snapshot_for(self.total_cards)
    }

    /// Snapshot against an explicit total instead of the stored one.
    pub fn snapshot_for(&self, total_cards: u32) -> ScoreSnapshot {
        ScoreSnapshot {
            correct: self.correct,
            incorrect: self.incorrect,
            remaining: total_cards.saturating_sub(self.correct),
            accuracy: accuracy(self.correct, self.incorrect),
        }
    }

    /// Zero both counters. A supplied total replaces the stored one; `None` keeps it.
    pub fn reset(&mut self, total_cards: Option<i64>) -> Result<()> {
        if let Some(total) = total_cards {
            self.total_cards = Self::checked_total(total)?;
        }
        self.correct = 0;
        self.incorrect = 0;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_tracker_reports_zeroes() {
        let t = ScoreTracker::new(0).unwrap();
        assert_eq!(
            t.snapshot(),
            ScoreSnapshot { correct: 0, incorrect: 0, remaining: 0, accuracy: 0.0 }
        );
    }

    #[test]
    fn negative_total_is_rejected() {
        assert!(matches!(ScoreTracker::new(-1), Err(GameError::InvalidArgument(_))));
    }

    #[test]
    fn card_count_rejects_fractions_and_non_finite() {
        assert_eq!(card_count(10.0), Ok(10));
        assert!(card_count(2.5).is_err());
        assert!(card_count(-3.0).is_err());
        assert!(card_count(f64::NAN).is_err());
        assert!(card_count(f64::INFINITY).is_err());
    }

    #[test]
    fn seven_of_ten() {
        let mut t = ScoreTracker::new(10).unwrap();
        for _ in 0..7 {
            t.record_correct();
        }
        for _ in 0..3 {
            t.record_incorrect();
        }
        let s = t.snapshot();
        assert_eq!((s.correct, s.incorrect, s.remaining), (7, 3, 3));
        assert_eq!(s.accuracy, 70.0);
    }

    #[test]
    fn accuracy_rounds_to_two_decimals() {
        assert_eq!(accuracy(1, 2), 33.33);
        assert_eq!(accuracy(2, 1), 66.67);
        assert_eq!(accuracy(1, 5), 16.67);
        assert_eq!(accuracy(0, 4), 0.0);
        assert_eq!(accuracy(4, 0), 100.0);
        assert_eq!(accuracy(0, 0), 0.0);
    }

    #[test]
    fn accuracy_stays_in_range() {
        for c in 0..40 {
            for i in 0..40 {
                let a = accuracy(c, i);
                assert!((0.0..=100.0).contains(&a), "accuracy({c}, {i}) = {a}");
            }
        }
    }

    #[test]
    fn remaining_is_clamped() {
        let mut t = ScoreTracker::new(1).unwrap();
        t.record_correct();
        t.record_correct();
        assert_eq!(t.snapshot().remaining, 0);
    }

    #[test]
    fn reset_keeps_or_replaces_total() {
        let mut t = ScoreTracker::new(5).unwrap();
        t.record_correct();
        t.record_incorrect();
        t.reset(None).unwrap();
        assert_eq!(t.total_cards(), 5);
        assert_eq!((t.correct(), t.incorrect()), (0, 0));
        t.reset(Some(8)).unwrap();
        assert_eq!(t.snapshot().remaining, 8);
        assert!(t.reset(Some(-2)).is_err());
        assert_eq!(t.total_cards(), 8);
    }
}
