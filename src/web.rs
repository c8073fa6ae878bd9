//! Browser-facing bindings. The page owns one `KarutaGame` per playthrough and drives it
//! from click handlers; all state lives in the wrapped controller.

use serde::Serialize;
use serde_wasm_bindgen::Serializer;
use wasm_bindgen::prelude::*;

use crate::config::GameConfig;
use crate::controller::GameController;
use crate::error::GameError;
use crate::feedback::FeedbackTimeline;
use crate::performance_now;
use crate::poem::{PoemCatalog, PoemRecord};
use crate::score::{ScoreTracker, card_count};
use crate::validate;

/// Serialize for JS with `null` for missing values and plain objects for maps.
fn to_js<T: Serialize>(value: &T) -> Result<JsValue, JsValue> {
    value
        .serialize(&Serializer::json_compatible())
        .map_err(|e| JsValue::from_str(&format!("encode failed: {e}")))
}

/// Each new game sets the level, so a quiet game after a verbose one is quiet again.
fn log_filter(verbose: bool) -> log::LevelFilter {
    if verbose {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Info
    }
}

fn is_absent(value: &JsValue) -> bool {
    value.is_undefined() || value.is_null()
}

fn js_count(value: &JsValue) -> Result<i64, GameError> {
    let n = value
        .as_f64()
        .ok_or_else(|| GameError::invalid("total card count must be a number"))?;
    card_count(n).map(i64::from)
}

#[wasm_bindgen]
pub struct KarutaGame {
    controller: GameController,
    feedback: Option<FeedbackTimeline>,
}

#[wasm_bindgen]
impl KarutaGame {
    /// `config` is an optional plain object; see `GameConfig` for the keys.
    #[wasm_bindgen(constructor)]
    pub fn new(config: JsValue) -> Result<KarutaGame, JsValue> {
        let config: GameConfig = if is_absent(&config) {
            GameConfig::default()
        } else {
            serde_wasm_bindgen::from_value(config)
                .map_err(|e| GameError::invalid(format!("invalid game config: {e}")))?
        };
        log::set_max_level(log_filter(config.verbose));
        Ok(KarutaGame {
            controller: GameController::new(config),
            feedback: None,
        })
    }

    /// Start a game from an array of poem objects already fetched by the page.
    #[wasm_bindgen(js_name = initGame)]
    pub fn init_game(&mut self, poems: JsValue) -> Result<JsValue, JsValue> {
        let poems: Vec<PoemRecord> = serde_wasm_bindgen::from_value(poems)
            .map_err(|e| GameError::invalid(format!("poems must be an array of poem records: {e}")))?;
        self.feedback = None;
        to_js(&self.controller.init_game(poems)?)
    }

    /// Validate the raw poem JSON as served and start a game from it.
    #[wasm_bindgen(js_name = loadCatalog)]
    pub fn load_catalog(&mut self, json: &str) -> Result<JsValue, JsValue> {
        let catalog = PoemCatalog::from_json(json)?;
        self.feedback = None;
        to_js(&self.controller.init_from_catalog(&catalog)?)
    }

    #[wasm_bindgen(js_name = selectCard)]
    pub fn select_card(&mut self, id: u32) -> Result<JsValue, JsValue> {
        let judgment = self.controller.select_card(id);
        if judgment.correct_record.is_some() {
            let timing = self.controller.config().feedback;
            self.feedback = Some(FeedbackTimeline::start(performance_now(), judgment.correct, timing));
        }
        to_js(&judgment)
    }

    #[wasm_bindgen(js_name = nextRound)]
    pub fn next_round(&mut self) -> bool {
        self.feedback = None;
        self.controller.next_round()
    }

    pub fn restart(&mut self) -> Result<JsValue, JsValue> {
        self.feedback = None;
        to_js(&self.controller.restart()?)
    }

    #[wasm_bindgen(js_name = isGameOver)]
    pub fn is_game_over(&self) -> bool {
        self.controller.is_game_over()
    }

    pub fn state(&self) -> Result<JsValue, JsValue> {
        to_js(&self.controller.state())
    }

    #[wasm_bindgen(js_name = scoreSnapshot)]
    pub fn score_snapshot(&self) -> Result<JsValue, JsValue> {
        to_js(&self.controller.score_snapshot())
    }

    #[wasm_bindgen(js_name = currentPrompt)]
    pub fn current_prompt(&self) -> Result<JsValue, JsValue> {
        to_js(&self.controller.current_prompt())
    }

    /// `{ phase, correct }` with phase `"highlight"`, `"settle"` or `"done"`, or `null` when
    /// no pick is being shown.
    #[wasm_bindgen(js_name = feedbackPhase)]
    pub fn feedback_phase(&self) -> Result<JsValue, JsValue> {
        let view = self.feedback.map(|f| f.view(performance_now()));
        to_js(&view)
    }

    /// Call `callback` once the feedback for the last pick has played out (immediately on the
    /// next task when nothing is showing). Returns the timeout handle.
    #[wasm_bindgen(js_name = scheduleAfterFeedback)]
    pub fn schedule_after_feedback(&self, callback: &js_sys::Function) -> Result<i32, JsValue> {
        let win = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
        let delay = self
            .feedback
            .map(|f| f.remaining_ms(performance_now()))
            .unwrap_or(0.0);
        win.set_timeout_with_callback_and_timeout_and_arguments_0(callback, delay.ceil() as i32)
    }
}

/// Score counters usable on their own, e.g. for a practice mode without rounds.
#[wasm_bindgen]
pub struct ScoreBoard {
    tracker: ScoreTracker,
}

#[wasm_bindgen]
impl ScoreBoard {
    /// Rejects anything that is not a non-negative integer, including non-numbers.
    #[wasm_bindgen(constructor)]
    pub fn new(total_cards: JsValue) -> Result<ScoreBoard, JsValue> {
        let tracker = ScoreTracker::new(js_count(&total_cards)?)?;
        Ok(ScoreBoard { tracker })
    }

    #[wasm_bindgen(js_name = recordCorrect)]
    pub fn record_correct(&mut self) {
        self.tracker.record_correct();
    }

    #[wasm_bindgen(js_name = recordIncorrect)]
    pub fn record_incorrect(&mut self) {
        self.tracker.record_incorrect();
    }

    /// Snapshot against `total_cards`, or the stored total when omitted.
    pub fn snapshot(&self, total_cards: JsValue) -> Result<JsValue, JsValue> {
        let snap = if is_absent(&total_cards) {
            self.tracker.snapshot()
        } else {
            let total = u32::try_from(js_count(&total_cards)?)
                .map_err(|_| GameError::invalid("total card count is too large"))?;
            self.tracker.snapshot_for(total)
        };
        to_js(&snap)
    }

    pub fn reset(&mut self, total_cards: JsValue) -> Result<(), JsValue> {
        let total = if is_absent(&total_cards) {
            None
        } else {
            Some(js_count(&total_cards)?)
        };
        Ok(self.tracker.reset(total)?)
    }
}

fn validate_with(
    value: JsValue,
    check: fn(&serde_json::Value) -> validate::Validation,
) -> Result<JsValue, JsValue> {
    let value: serde_json::Value = if value.is_undefined() {
        serde_json::Value::Null
    } else {
        serde_wasm_bindgen::from_value(value)
            .map_err(|e| GameError::invalid(format!("unreadable value: {e}")))?
    };
    to_js(&check(&value))
}

/// `{ valid, errors }` for a single poem object.
#[wasm_bindgen(js_name = validatePoemRecord)]
pub fn validate_poem_record(value: JsValue) -> Result<JsValue, JsValue> {
    validate_with(value, validate::validate_record)
}

/// `{ valid, errors }` for a whole catalog array.
#[wasm_bindgen(js_name = validatePoemCollection)]
pub fn validate_poem_collection(value: JsValue) -> Result<JsValue, JsValue> {
    validate_with(value, validate::validate_collection)
}
