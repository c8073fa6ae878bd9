//! Round progression: which poem is read each round and which cards are still on the table.

use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use serde::Serialize;

use crate::controller::GameState;
use crate::error::{GameError, Result};
use crate::poem::PoemRecord;

/// Outcome of picking a card for the current prompt.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Judgment {
    pub correct: bool,
    /// The poem that was being read. `None` only once the game is over.
    pub correct_record: Option<PoemRecord>,
}

impl Judgment {
    pub(crate) fn none() -> Self {
        Self { correct: false, correct_record: None }
    }
}

/// Owns the two shuffles of a playthrough. Records are held once and both orderings index
/// into them, so the reading order and the pool never copy a poem.
pub struct RoundSequencer {
    poems: Vec<PoemRecord>,
    reading_order: Vec<usize>,
    pool: Vec<usize>,
    round: usize,
    over: bool,
    rng: StdRng,
}

impl RoundSequencer {
    /// Idle sequencer; reports game over until [`RoundSequencer::init_game`] deals poems.
    pub fn new(seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(s) => StdRng::seed_from_u64(s),
            None => StdRng::from_entropy(),
        };
        Self {
            poems: Vec::new(),
            reading_order: Vec::new(),
            pool: Vec::new(),
            round: 0,
            over: true,
            rng,
        }
    }

    /// Deal a new playthrough: reading order and pool are shuffled independently.
    pub fn init_game(&mut self, poems: Vec<PoemRecord>) -> Result<GameState> {
        if poems.is_empty() {
            return Err(GameError::invalid("cannot start a game without poems"));
        }
        let mut reading_order: Vec<usize> = (0..poems.len()).collect();
        let mut pool = reading_order.clone();
        reading_order.shuffle(&mut self.rng);
        pool.shuffle(&mut self.rng);

        self.poems = poems;
        self.reading_order = reading_order;
        self.pool = pool;
        self.round = 0;
        self.over = false;
        Ok(self.state_with(0, 0))
    }

    pub fn current_prompt(&self) -> Option<&PoemRecord> {
        if self.over {
            return None;
        }
        self.reading_order.get(self.round).map(|&i| &self.poems[i])
    }

    /// Compare the picked card against the poem being read. A match takes the card off the
    /// table; a miss leaves the pool alone.
    pub fn judge(&mut self, selected_id: u32) -> Judgment {
        let Some(prompt) = self.current_prompt().cloned() else {
            return Judgment::none();
        };
        let correct = prompt.id == selected_id;
        if correct {
            let poems = &self.poems;
            if let Some(pos) = self.pool.iter().position(|&i| poems[i].id == selected_id) {
                self.pool.remove(pos);
            }
        }
        log::debug!(
            "round {}: picked {selected_id}, reading {} -> {}",
            self.round + 1,
            prompt.id,
            if correct { "match" } else { "miss" }
        );
        Judgment { correct, correct_record: Some(prompt) }
    }

    /// Move to the next round. Ends the game as soon as the rounds run out or the pool is
    /// empty, whichever happens first.
    pub fn advance(&mut self) -> bool {
        if self.over {
            return false;
        }
        self.round += 1;
        if self.round >= self.reading_order.len() || self.pool.is_empty() {
            self.over = true;
            log::info!("game over after {} round(s)", self.round);
            return false;
        }
        true
    }

    pub fn is_game_over(&self) -> bool {
        self.over
    }

    /// One-based round number, clamped so it never passes the last round. Zero while idle,
    /// matching `total_rounds`.
    pub fn current_round(&self) -> usize {
        (self.round + 1).min(self.total_rounds())
    }

    /// Rounds not yet finished, the current one included; zero once the game is over.
    pub fn rounds_left(&self) -> usize {
        if self.over {
            return 0;
        }
        self.total_rounds().saturating_sub(self.round)
    }

    pub fn total_rounds(&self) -> usize {
        self.reading_order.len()
    }

    /// Cards still on the table, in display order.
    pub fn remaining(&self) -> impl Iterator<Item = &PoemRecord> + '_ {
        self.pool.iter().map(|&i| &self.poems[i])
    }

    pub fn remaining_len(&self) -> usize {
        self.pool.len()
    }

    pub fn reading_order(&self) -> impl Iterator<Item = &PoemRecord> + '_ {
        self.reading_order.iter().map(|&i| &self.poems[i])
    }

    /// Poems of the current playthrough, in the order they were dealt in.
    pub fn poems(&self) -> &[PoemRecord] {
        &self.poems
    }

    /// Build the exposed state around externally tracked counters.
    pub fn state_with(&self, score: u32, incorrect_count: u32) -> GameState {
        GameState {
            remaining_cards: self.remaining().cloned().collect(),
            current_prompt: self.current_prompt().cloned(),
            current_round: self.current_round(),
            total_rounds: self.total_rounds(),
            score,
            incorrect_count,
            is_game_over: self.over,
        }
    }
}
