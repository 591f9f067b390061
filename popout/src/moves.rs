use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::board::{Board, Player};
use crate::error::GameError;

/// A drop into `column`, or a pop of the mover's own bottom piece from it.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct Move {
    pub column: usize,
    pub pop: bool,
}

impl Move {
    pub fn drop(column: usize) -> Self {
        Self { column, pop: false }
    }

    pub fn pop(column: usize) -> Self {
        Self { column, pop: true }
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let op = if self.pop { 'p' } else { 'd' };
        write!(f, "{op}{}", self.column)
    }
}

impl FromStr for Move {
    type Err = GameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_move_at(s, 0)
    }
}

/// Parses `d<col>` / `p<col>`, reporting errors relative to `offset`.
pub(crate) fn parse_move_at(s: &str, offset: usize) -> Result<Move, GameError> {
    let mut chars = s.chars();
    let pop = match chars.next() {
        Some('d' | 'D') => false,
        Some('p' | 'P') => true,
        Some(other) => {
            return Err(GameError::ParseMove {
                position: offset,
                reason: format!("expected d or p, found {other}"),
            })
        }
        None => {
            return Err(GameError::ParseMove {
                position: offset,
                reason: "empty move".to_string(),
            })
        }
    };
    let digits = chars.as_str();
    if digits.is_empty() {
        return Err(GameError::ParseMove {
            position: offset + 1,
            reason: "missing column number".to_string(),
        });
    }
    let column = digits.parse::<usize>().map_err(|_| GameError::ParseMove {
        position: offset + 1,
        reason: format!("expected column number, found {digits}"),
    })?;
    Ok(Move { column, pop })
}

impl Board {
    /// Every legal move for `player`, column by column, pop before drop.
    pub fn legal_moves(&self, player: Player) -> Vec<Move> {
        let can_pop = !self.pop_used(player);
        let mut moves = Vec::with_capacity(self.columns() * 2);
        for column in 0..self.columns() {
            if can_pop && self.bottom(column) == Some(player) {
                moves.push(Move::pop(column));
            }
            if self.top(column).is_none() {
                moves.push(Move::drop(column));
            }
        }
        moves
    }

    /// Checks `mv` against the same rules [`Board::legal_moves`] applies.
    pub fn is_legal(&self, player: Player, mv: Move) -> Result<(), GameError> {
        if mv.column >= self.columns() {
            return Err(GameError::ColumnOutOfBounds { column: mv.column });
        }
        let illegal = |reason: &'static str| GameError::IllegalMove { player, mv, reason };
        if mv.pop {
            if self.pop_used(player) {
                return Err(illegal("pop already used"));
            }
            if self.bottom(mv.column) != Some(player) {
                return Err(illegal("bottom piece is not the mover's"));
            }
        } else if self.top(mv.column).is_some() {
            return Err(illegal("column is full"));
        }
        Ok(())
    }

    /// Builds the position reached when `player` plays `mv`. The receiver is
    /// left untouched and the returned board has the turn passed to the
    /// opponent.
    pub fn apply(&self, player: Player, mv: Move) -> Result<Board, GameError> {
        self.is_legal(player, mv)?;
        let mut child = self.clone();
        let column = mv.column;
        if mv.pop {
            for row in 0..child.rows() - 1 {
                let above = child.cell(row + 1, column);
                child.set(row, column, above);
            }
            child.set(child.rows() - 1, column, None);
            child = child.with_pop_used(player);
        } else {
            let row = child.column_height(column);
            child.set(row, column, Some(player));
        }
        child.set_turn(player.opponent());
        Ok(child)
    }
}
