use serde::Deserialize;

/// How long the post-judgment feedback stays on screen.
#[derive(Clone, Copy, Debug, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FeedbackTiming {
    /// Picked / correct cards stay highlighted this long.
    pub highlight_ms: f64,
    /// Pause after the highlight before the next round is shown.
    pub settle_ms: f64,
}

impl Default for FeedbackTiming {
    fn default() -> Self {
        Self { highlight_ms: 800.0, settle_ms: 400.0 }
    }
}

impl FeedbackTiming {
    pub fn total_ms(&self) -> f64 {
        self.highlight_ms.max(0.0) + self.settle_ms.max(0.0)
    }
}

/// Per-controller settings, supplied by the page as a plain object (every key optional).
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct GameConfig {
    /// Fixed shuffle seed for reproducible deals; entropy when absent.
    pub seed: Option<u64>,
    pub feedback: FeedbackTiming,
    /// Raise the console log level to debug.
    pub verbose: bool,
}
