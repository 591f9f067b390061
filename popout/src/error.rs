use thiserror::Error;

use crate::board::Player;
use crate::moves::Move;

#[derive(Debug, Error)]
pub enum GameError {
    #[error("{player} has no legal move in an ongoing position")]
    NoLegalMove { player: Player },
    #[error("illegal move {mv} for {player}: {reason}")]
    IllegalMove {
        player: Player,
        mv: Move,
        reason: &'static str,
    },
    #[error("{found} moved out of turn, expected {expected}")]
    OutOfTurn { expected: Player, found: Player },
    #[error("column {column} is out of bounds")]
    ColumnOutOfBounds { column: usize },
    #[error("invalid move string at position {position}: {reason}")]
    ParseMove { position: usize, reason: String },
    #[error("invalid board diagram: {reason}")]
    InvalidDiagram { reason: String },
    #[error("board dimensions {rows}x{columns} are out of range (1-64)")]
    InvalidDimensions { rows: usize, columns: usize },
    #[error("win length {win_length} does not fit the board")]
    InvalidWinLength { win_length: usize },
    #[error("depth {0} is out of range (1-10)")]
    DepthOutOfRange(u8),
    #[error(transparent)]
    Config(#[from] serde_json::Error),
}
