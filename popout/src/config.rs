use serde::{Deserialize, Serialize};

use crate::error::GameError;
use crate::eval::Heuristic;

/// Largest supported row or column count. Keeps every heuristic score far
/// inside the `(LOST, WON)` sentinel window.
pub const MAX_DIMENSION: usize = 64;
pub const MAX_SEARCH_DEPTH: u8 = 10;

/// Board geometry and the number in a row needed to win.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub rows: usize,
    pub columns: usize,
    pub win_length: usize,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            rows: 6,
            columns: 7,
            win_length: 4,
        }
    }
}

impl GameConfig {
    pub fn new(rows: usize, columns: usize, win_length: usize) -> Result<Self, GameError> {
        let config = Self {
            rows,
            columns,
            win_length,
        };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), GameError> {
        let dims = 1..=MAX_DIMENSION;
        if !dims.contains(&self.rows) || !dims.contains(&self.columns) {
            return Err(GameError::InvalidDimensions {
                rows: self.rows,
                columns: self.columns,
            });
        }
        if self.win_length < 2 || self.win_length > self.rows.max(self.columns) {
            return Err(GameError::InvalidWinLength {
                win_length: self.win_length,
            });
        }
        Ok(())
    }
}

/// Knobs for [`SearchEngine`](crate::SearchEngine).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Plies searched below the root before the heuristic takes over.
    pub max_depth: u8,
    pub heuristic: Heuristic,
    /// Shuffle move order at every ply so symmetric positions don't always
    /// resolve to the same column.
    pub shuffle: bool,
    /// Seed for the shuffle; `None` draws one from the OS.
    pub seed: Option<u64>,
    /// Alpha-beta cutoffs. Disabling yields plain minimax with identical results.
    pub pruning: bool,
    /// Search root children on the rayon pool.
    pub parallel: bool,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            max_depth: 7,
            heuristic: Heuristic::default(),
            shuffle: true,
            seed: None,
            pruning: true,
            parallel: false,
        }
    }
}

impl SearchConfig {
    pub fn validate(&self) -> Result<(), GameError> {
        if !(1..=MAX_SEARCH_DEPTH).contains(&self.max_depth) {
            return Err(GameError::DepthOutOfRange(self.max_depth));
        }
        Ok(())
    }

    pub fn from_json(json: &str) -> Result<Self, GameError> {
        let config: SearchConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }
}
