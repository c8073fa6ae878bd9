//! The one object the page talks to: deals a game, judges picks, and reports state.

use serde::Serialize;

use crate::config::GameConfig;
use crate::error::{GameError, Result};
use crate::poem::{PoemCatalog, PoemRecord};
use crate::score::{ScoreSnapshot, ScoreTracker};
use crate::sequencer::{Judgment, RoundSequencer};

/// Everything the page needs to draw a frame. Rebuilt on every call, never stored.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GameState {
    pub remaining_cards: Vec<PoemRecord>,
    pub current_prompt: Option<PoemRecord>,
    pub current_round: usize,
    pub total_rounds: usize,
    pub score: u32,
    pub incorrect_count: u32,
    pub is_game_over: bool,
}

pub struct GameController {
    sequencer: RoundSequencer,
    score: ScoreTracker,
    config: GameConfig,
}

impl GameController {
    /// Idle controller; no game is running until [`GameController::init_game`].
    pub fn new(config: GameConfig) -> Self {
        Self {
            sequencer: RoundSequencer::new(config.seed),
            score: ScoreTracker::default(),
            config,
        }
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Start a fresh playthrough, discarding any previous one.
    pub fn init_game(&mut self, poems: Vec<PoemRecord>) -> Result<GameState> {
        let total = poems.len() as i64;
        self.sequencer.init_game(poems)?;
        self.score.reset(Some(total))?;
        log::info!("new game dealt with {total} poem(s)");
        Ok(self.state())
    }

    pub fn init_from_catalog(&mut self, catalog: &PoemCatalog) -> Result<GameState> {
        self.init_game(catalog.records().to_vec())
    }

    /// Re-deal the poems of the last game with fresh shuffles and zeroed counters.
    pub fn restart(&mut self) -> Result<GameState> {
        if self.sequencer.poems().is_empty() {
            return Err(GameError::invalid("no game has been started yet"));
        }
        let poems = self.sequencer.poems().to_vec();
        self.init_game(poems)
    }

    /// Judge a pick and count it. Picks after the game ended are ignored and not counted.
    pub fn select_card(&mut self, id: u32) -> Judgment {
        if self.sequencer.is_game_over() {
            return Judgment::none();
        }
        let judgment = self.sequencer.judge(id);
        if judgment.correct {
            self.score.record_correct();
        } else {
            self.score.record_incorrect();
        }
        judgment
    }

    pub fn next_round(&mut self) -> bool {
        self.sequencer.advance()
    }

    pub fn is_game_over(&self) -> bool {
        self.sequencer.is_game_over()
    }

    pub fn current_prompt(&self) -> Option<&PoemRecord> {
        self.sequencer.current_prompt()
    }

    /// Cards on the table in display order.
    pub fn choices(&self) -> impl Iterator<Item = &PoemRecord> + '_ {
        self.sequencer.remaining()
    }

    /// Owned copy; mutating it never reaches the running game.
    pub fn state(&self) -> GameState {
        self.sequencer.state_with(self.score.correct(), self.score.incorrect())
    }

    /// Score summary for the page. Here `remaining` counts rounds not yet finished, so repeat
    /// picks within a round leave it alone and it is zero once the game is over.
    pub fn score_snapshot(&self) -> ScoreSnapshot {
        let snap = self.score.snapshot();
        let remaining = u32::try_from(self.sequencer.rounds_left()).unwrap_or(u32::MAX);
        ScoreSnapshot { remaining, ..snap }
    }
}

impl Default for GameController {
    fn default() -> Self {
        Self::new(GameConfig::default())
    }
}
