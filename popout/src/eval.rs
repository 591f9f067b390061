//! Static evaluation of non-terminal positions.
//!
//! Scores are from the root player's point of view and always land strictly
//! inside `(LOST, WON)`: boards are capped at 64x64, which keeps the largest
//! possible heuristic many orders of magnitude below the sentinels.
use serde::{Deserialize, Serialize};

use crate::board::{Board, Player};

pub type Score = i64;

pub const WON: Score = Score::MAX - 1;
pub const LOST: Score = Score::MIN + 1;
pub const TIE: Score = 0;

#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Heuristic {
    /// Horizontal and vertical runs of same-owner cells. Diagonals are not
    /// counted.
    #[default]
    Lines,
    /// 8-connected groups of same-owner cells.
    Clusters,
}

impl Heuristic {
    pub fn evaluate(self, board: &Board, root: Player) -> Score {
        let totals = match self {
            Heuristic::Lines => line_totals(board),
            Heuristic::Clusters => cluster_totals(board),
        };
        let score = totals[root.idx()] - totals[root.opponent().idx()];
        debug_assert!(LOST < score && score < WON, "heuristic {score} escaped the sentinels");
        score
    }
}

/// `(runs + 2)^2 * (length + 2)^3` summed over run lengths `2..=win_length`.
fn line_totals(board: &Board) -> [Score; 2] {
    let longest = board.rows().max(board.columns());
    let mut runs = [vec![0 as Score; longest + 1], vec![0 as Score; longest + 1]];

    for row in 0..board.rows() {
        tally_runs(&mut runs, (0..board.columns()).map(|c| board.cell(row, c)));
    }
    for column in 0..board.columns() {
        tally_runs(&mut runs, (0..board.rows()).map(|r| board.cell(r, column)));
    }

    let mut totals = [0; 2];
    for (total, counts) in totals.iter_mut().zip(&runs) {
        for length in 2..=board.win_length() {
            let count = counts.get(length).copied().unwrap_or(0);
            let length = length as Score;
            *total += (count + 2).pow(2) * (length + 2).pow(3);
        }
    }
    totals
}

fn tally_runs(runs: &mut [Vec<Score>; 2], line: impl Iterator<Item = Option<Player>>) {
    let mut current: Option<Player> = None;
    let mut length = 0;
    for cell in line {
        if cell == current {
            length += 1;
            continue;
        }
        if let Some(owner) = current {
            runs[owner.idx()][length] += 1;
        }
        current = cell;
        length = 1;
    }
    if let Some(owner) = current {
        runs[owner.idx()][length] += 1;
    }
}

/// `clusters^2 * size^3` summed over every cluster size present.
fn cluster_totals(board: &Board) -> [Score; 2] {
    let (rows, columns) = (board.rows(), board.columns());
    let mut sizes = [vec![0 as Score; rows * columns + 1], vec![0 as Score; rows * columns + 1]];
    let mut seen = vec![false; rows * columns];
    let mut stack = Vec::new();

    for row in 0..rows {
        for column in 0..columns {
            let Some(owner) = board.cell(row, column) else {
                continue;
            };
            if seen[row * columns + column] {
                continue;
            }
            seen[row * columns + column] = true;
            stack.push((row, column));
            let mut size = 0;
            while let Some((r, c)) = stack.pop() {
                size += 1;
                for nr in r.saturating_sub(1)..=(r + 1).min(rows - 1) {
                    for nc in c.saturating_sub(1)..=(c + 1).min(columns - 1) {
                        let idx = nr * columns + nc;
                        if !seen[idx] && board.cell(nr, nc) == Some(owner) {
                            seen[idx] = true;
                            stack.push((nr, nc));
                        }
                    }
                }
            }
            sizes[owner.idx()][size] += 1;
        }
    }

    let mut totals = [0; 2];
    for (total, counts) in totals.iter_mut().zip(&sizes) {
        for (size, &count) in counts.iter().enumerate().skip(1) {
            *total += count.pow(2) * (size as Score).pow(3);
        }
    }
    totals
}
