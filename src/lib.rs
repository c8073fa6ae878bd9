//! Karuta Quiz core crate.
//!
//! The upper verse of a poem is read; the player picks the card with its lower verse from
//! the cards still on the table. `GameController` holds the whole game and is the only
//! type the page drives; the `web` module exposes it to JS as `KarutaGame`.

use wasm_bindgen::prelude::*;

pub mod config;
pub mod controller;
pub mod error;
pub mod feedback;
pub mod poem;
pub mod score;
pub mod sequencer;
pub mod validate;
mod web;

pub use config::{FeedbackTiming, GameConfig};
pub use controller::{GameController, GameState};
pub use error::{GameError, Result};
pub use feedback::{FeedbackPhase, FeedbackTimeline, FeedbackView};
pub use poem::{CATALOG_SIZE, MAX_POEM_ID, MIN_POEM_ID, PoemCatalog, PoemRecord};
pub use score::{ScoreSnapshot, ScoreTracker};
pub use sequencer::{Judgment, RoundSequencer};
pub use validate::{Validation, validate_collection, validate_record};
pub use web::{KarutaGame, ScoreBoard, validate_poem_collection, validate_poem_record};

// Optional small allocator for size (feature gated)
#[cfg(feature = "wee_alloc")]
#[global_allocator]
static ALLOC: wee_alloc::WeeAlloc = wee_alloc::WeeAlloc::INIT;

#[wasm_bindgen(start)]
pub fn wasm_start() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
    // Logger accepts debug; the global filter starts at info and `verbose` configs raise it.
    if console_log::init_with_level(log::Level::Debug).is_ok() {
        log::set_max_level(log::LevelFilter::Info);
    }
}

/// Milliseconds from `performance.now()`, or 0 outside a browser.
pub(crate) fn performance_now() -> f64 {
    web_sys::window()
        .and_then(|w| w.performance())
        .map(|p| p.now())
        .unwrap_or(0.0)
}
