//! PopOut engine with alpha-beta pruning.
//! PopOut is connect-N on a fixed grid where a player may drop a piece into a
//! column or, once per game, pop their own bottom piece out of a column. The
//! engine is stateless between turns: callers hand it a [`Board`] and the
//! player to move, and it returns one legal [`Move`] chosen by a depth-limited
//! minimax search. Win/draw detection is consumed through [`TerminalOracle`];
//! [`Referee`] is the stock implementation.
mod board;
mod config;
mod error;
mod eval;
mod moves;
mod notation;
mod referee;
mod search;

pub use board::{Board, Cell, Player};
pub use config::{GameConfig, SearchConfig, MAX_DIMENSION, MAX_SEARCH_DEPTH};
pub use error::GameError;
pub use eval::{Heuristic, Score, LOST, TIE, WON};
pub use moves::Move;
pub use notation::{parse_history, PlayedMove};
pub use referee::{Outcome, Referee, TerminalOracle};
pub use search::{SearchEngine, SearchOutcome, SearchStats};
