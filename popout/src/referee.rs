use crate::board::{Board, Player};

/// Terminal classification of a position.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Outcome {
    Win(Player),
    Draw,
    Ongoing,
}

impl Outcome {
    pub fn is_terminal(self) -> bool {
        !matches!(self, Outcome::Ongoing)
    }
}

/// Decides whether a position is won, drawn, or still in play.
pub trait TerminalOracle {
    fn classify(&self, board: &Board) -> Outcome;
}

impl<F> TerminalOracle for F
where
    F: Fn(&Board) -> Outcome,
{
    fn classify(&self, board: &Board) -> Outcome {
        self(board)
    }
}

/// Stock oracle: `win_length` in a row horizontally, vertically or
/// diagonally. When a pop completes lines for both players the player who
/// just moved takes the game. A full board with no line is a draw.
#[derive(Copy, Clone, Debug, Default)]
pub struct Referee;

const DIRECTIONS: [(isize, isize); 4] = [(0, 1), (1, 0), (1, 1), (1, -1)];

impl Referee {
    pub fn has_line(board: &Board, player: Player) -> bool {
        for row in 0..board.rows() {
            for column in 0..board.columns() {
                if board.cell(row, column) != Some(player) {
                    continue;
                }
                if DIRECTIONS
                    .iter()
                    .any(|&(dr, dc)| run_from(board, player, row, column, dr, dc))
                {
                    return true;
                }
            }
        }
        false
    }
}

fn run_from(board: &Board, player: Player, row: usize, column: usize, dr: isize, dc: isize) -> bool {
    (1..board.win_length()).all(|step| {
        let r = row as isize + dr * step as isize;
        let c = column as isize + dc * step as isize;
        r >= 0
            && c >= 0
            && (r as usize) < board.rows()
            && (c as usize) < board.columns()
            && board.cell(r as usize, c as usize) == Some(player)
    })
}

impl TerminalOracle for Referee {
    fn classify(&self, board: &Board) -> Outcome {
        let one = Referee::has_line(board, Player::One);
        let two = Referee::has_line(board, Player::Two);
        match (one, two) {
            (true, true) => Outcome::Win(board.turn().opponent()),
            (true, false) => Outcome::Win(Player::One),
            (false, true) => Outcome::Win(Player::Two),
            (false, false) if board.is_full() => Outcome::Draw,
            (false, false) => Outcome::Ongoing,
        }
    }
}
