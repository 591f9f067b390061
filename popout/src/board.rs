use std::fmt;

use serde::{Deserialize, Serialize};

use crate::config::GameConfig;
use crate::error::GameError;

#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Player {
    One,
    Two,
}

impl Player {
    pub(crate) fn idx(self) -> usize {
        match self {
            Player::One => 0,
            Player::Two => 1,
        }
    }

    pub fn opponent(self) -> Player {
        match self {
            Player::One => Player::Two,
            Player::Two => Player::One,
        }
    }

    pub fn number(self) -> u8 {
        self.idx() as u8 + 1
    }

    fn symbol(self) -> char {
        match self {
            Player::One => '1',
            Player::Two => '2',
        }
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "player {}", self.number())
    }
}

/// Owner of a single grid cell.
pub type Cell = Option<Player>;

/// Grid contents plus the bookkeeping a PopOut position needs.
///
/// Row `0` is the bottom of the board. Pieces always rest on the bottom or on
/// another piece; the only way to change a board is [`Board::apply`], which
/// returns a fresh copy.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Board {
    cells: Vec<Cell>,
    rows: usize,
    columns: usize,
    win_length: usize,
    turn: Player,
    pop_used: [bool; 2],
}

impl Board {
    pub fn new(config: &GameConfig, turn: Player) -> Result<Self, GameError> {
        config.validate()?;
        Ok(Self {
            cells: vec![None; config.rows * config.columns],
            rows: config.rows,
            columns: config.columns,
            win_length: config.win_length,
            turn,
            pop_used: [false; 2],
        })
    }

    /// Parses a top-to-bottom picture of the board. `.` is empty, `1`/`X` is
    /// player one and `2`/`O` is player two.
    pub fn from_diagram(win_length: usize, turn: Player, rows: &[&str]) -> Result<Self, GameError> {
        let columns = rows.first().map(|r| r.chars().count()).unwrap_or(0);
        let config = GameConfig::new(rows.len(), columns, win_length)?;
        let mut board = Self::new(&config, turn)?;
        for (line_idx, line) in rows.iter().enumerate() {
            let row = config.rows - 1 - line_idx;
            if line.chars().count() != columns {
                return Err(GameError::InvalidDiagram {
                    reason: format!("row {row} has {} cells, expected {columns}", line.chars().count()),
                });
            }
            for (column, ch) in line.chars().enumerate() {
                let cell = match ch {
                    '.' => None,
                    '1' | 'X' | 'x' => Some(Player::One),
                    '2' | 'O' | 'o' => Some(Player::Two),
                    _ => {
                        return Err(GameError::InvalidDiagram {
                            reason: format!("unexpected {ch:?} at row {row} column {column}"),
                        })
                    }
                };
                board.set(row, column, cell);
            }
        }
        for column in 0..columns {
            let height = board.column_height(column);
            if (height..board.rows).any(|row| board.cell(row, column).is_some()) {
                return Err(GameError::InvalidDiagram {
                    reason: format!("floating piece in column {column}"),
                });
            }
        }
        Ok(board)
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn columns(&self) -> usize {
        self.columns
    }

    pub fn win_length(&self) -> usize {
        self.win_length
    }

    /// The player to move in this position.
    pub fn turn(&self) -> Player {
        self.turn
    }

    pub fn pop_used(&self, player: Player) -> bool {
        self.pop_used[player.idx()]
    }

    /// Marks a player's pop as spent. Pops never come back.
    pub fn with_pop_used(mut self, player: Player) -> Self {
        self.pop_used[player.idx()] = true;
        self
    }

    /// # Panics
    /// If `row` or `column` is outside the board.
    pub fn cell(&self, row: usize, column: usize) -> Cell {
        assert!(row < self.rows && column < self.columns, "cell ({row}, {column}) is off the board");
        self.cells[row * self.columns + column]
    }

    pub(crate) fn set(&mut self, row: usize, column: usize, cell: Cell) {
        self.cells[row * self.columns + column] = cell;
    }

    pub(crate) fn set_turn(&mut self, turn: Player) {
        self.turn = turn;
    }

    pub fn bottom(&self, column: usize) -> Cell {
        self.cell(0, column)
    }

    pub fn top(&self, column: usize) -> Cell {
        self.cell(self.rows - 1, column)
    }

    /// Number of pieces stacked in `column`.
    pub fn column_height(&self, column: usize) -> usize {
        (0..self.rows)
            .take_while(|&row| self.cell(row, column).is_some())
            .count()
    }

    pub fn is_full(&self) -> bool {
        self.cells.iter().all(Option::is_some)
    }

    pub fn piece_count(&self, player: Player) -> usize {
        self.cells.iter().filter(|&&c| c == Some(player)).count()
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in (0..self.rows).rev() {
            for column in 0..self.columns {
                let ch = self.cell(row, column).map_or('.', Player::symbol);
                write!(f, "{ch}")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_board_is_empty() {
        let board = Board::new(&GameConfig::default(), Player::One).unwrap();
        assert_eq!((board.rows(), board.columns(), board.win_length()), (6, 7, 4));
        assert_eq!(board.turn(), Player::One);
        assert!(!board.pop_used(Player::One));
        assert!(!board.pop_used(Player::Two));
        assert!(!board.is_full());
        assert!((0..7).all(|c| board.column_height(c) == 0 && board.bottom(c).is_none()));
    }

    #[test]
    fn diagram_rows_are_top_down() {
        let board = Board::from_diagram(3, Player::Two, &["....", "X...", "12.."]).unwrap();
        assert_eq!(board.rows(), 3);
        assert_eq!(board.columns(), 4);
        assert_eq!(board.bottom(0), Some(Player::One));
        assert_eq!(board.cell(1, 0), Some(Player::One));
        assert_eq!(board.bottom(1), Some(Player::Two));
        assert_eq!(board.top(0), None);
        assert_eq!(board.column_height(0), 2);
        assert_eq!(board.piece_count(Player::One), 2);
        assert_eq!(board.to_string(), "....\n1...\n12..\n");
    }

    #[test]
    fn diagram_round_trips_through_display() {
        let rows = ["..2..", ".12..", "2121."];
        let board = Board::from_diagram(3, Player::One, &rows).unwrap();
        let rendered = board.to_string();
        let lines: Vec<&str> = rendered.lines().collect();
        assert_eq!(lines, rows);
    }

    #[test]
    fn diagram_rejects_malformed_input() {
        assert!(matches!(
            Board::from_diagram(3, Player::One, &["1...", "...."]),
            Err(GameError::InvalidDiagram { .. })
        ));
        assert!(matches!(
            Board::from_diagram(3, Player::One, &["....", "..."]),
            Err(GameError::InvalidDiagram { .. })
        ));
        assert!(matches!(
            Board::from_diagram(3, Player::One, &["....", "..z."]),
            Err(GameError::InvalidDiagram { .. })
        ));
        assert!(matches!(
            Board::from_diagram(3, Player::One, &[]),
            Err(GameError::InvalidDimensions { .. })
        ));
    }

    #[test]
    fn full_board() {
        let board = Board::from_diagram(3, Player::One, &["122", "211", "122"]).unwrap();
        assert!(board.is_full());
        assert!((0..3).all(|c| board.column_height(c) == 3));
    }

    #[test]
    fn pop_flags_are_per_player() {
        let board = Board::new(&GameConfig::default(), Player::One)
            .unwrap()
            .with_pop_used(Player::Two);
        assert!(!board.pop_used(Player::One));
        assert!(board.pop_used(Player::Two));
    }
}
