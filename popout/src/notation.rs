//! Move histories such as `1d3 2d3 1p3`: whitespace-separated tokens, each a
//! player number followed by a move.
use crate::board::{Board, Player};
use crate::config::GameConfig;
use crate::error::GameError;
use crate::moves::{parse_move_at, Move};

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct PlayedMove {
    pub player: Player,
    pub mv: Move,
}

/// Error positions are char indices into `history`.
pub fn parse_history(history: &str) -> Result<Vec<PlayedMove>, GameError> {
    let chars: Vec<char> = history.chars().collect();
    let mut moves = Vec::new();
    let mut idx = 0;
    while idx < chars.len() {
        if chars[idx].is_whitespace() {
            idx += 1;
            continue;
        }
        let position = idx;
        while idx < chars.len() && !chars[idx].is_whitespace() {
            idx += 1;
        }
        let token: String = chars[position..idx].iter().collect();
        let player = match chars[position] {
            '1' => Player::One,
            '2' => Player::Two,
            other => {
                return Err(GameError::ParseMove {
                    position,
                    reason: format!("expected 1 or 2, found {other}"),
                })
            }
        };
        let mv = parse_move_at(&token[1..], position + 1)?;
        moves.push(PlayedMove { player, mv });
    }
    Ok(moves)
}

impl Board {
    /// Replays `moves` from an empty board. The first mover takes the first
    /// turn (player one for an empty history), players must alternate and
    /// every move is checked.
    pub fn from_history(config: &GameConfig, moves: &[PlayedMove]) -> Result<Self, GameError> {
        let first = moves.first().map_or(Player::One, |m| m.player);
        let mut board = Board::new(config, first)?;
        for played in moves {
            if played.player != board.turn() {
                return Err(GameError::OutOfTurn {
                    expected: board.turn(),
                    found: played.player,
                });
            }
            board = board.apply(played.player, played.mv)?;
        }
        Ok(board)
    }
}
