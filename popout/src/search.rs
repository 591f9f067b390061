//! Depth-limited minimax with alpha-beta pruning.
//!
//! Maximising and minimising are keyed off whether the side to move is the
//! root player, never off recursion parity. Terminal positions are scored
//! with the `WON`/`LOST`/`TIE` sentinels before the depth bound is checked.
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rayon::prelude::*;
use tracing::{debug, trace, warn};

use crate::board::{Board, Player};
use crate::config::SearchConfig;
use crate::error::GameError;
use crate::eval::{Score, LOST, TIE, WON};
use crate::moves::Move;
use crate::referee::{Outcome, Referee, TerminalOracle};

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct SearchStats {
    /// Positions visited below the root.
    pub nodes: u64,
    /// Positions scored by the heuristic.
    pub leaves: u64,
    /// Sibling loops cut short by alpha-beta.
    pub cutoffs: u64,
}

impl SearchStats {
    fn merge(&mut self, other: SearchStats) {
        self.nodes += other.nodes;
        self.leaves += other.leaves;
        self.cutoffs += other.cutoffs;
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SearchOutcome {
    pub mv: Move,
    pub value: Score,
    pub stats: SearchStats,
}

pub struct SearchEngine<O = Referee> {
    config: SearchConfig,
    oracle: O,
    rng: StdRng,
}

impl SearchEngine<Referee> {
    pub fn with_referee(config: SearchConfig) -> Result<Self, GameError> {
        Self::new(config, Referee)
    }
}

impl<O: TerminalOracle + Sync> SearchEngine<O> {
    pub fn new(config: SearchConfig, oracle: O) -> Result<Self, GameError> {
        config.validate()?;
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Ok(Self { config, oracle, rng })
    }

    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    /// Picks the move `player` should make on `board`. The caller is expected
    /// to have checked that the game is not already over.
    pub fn choose_move(&mut self, board: &Board, player: Player) -> Result<Move, GameError> {
        Ok(self.search(board, player)?.mv)
    }

    /// Like [`SearchEngine::choose_move`] but also reports the minimax value of
    /// the chosen move and how much of the tree was visited.
    pub fn search(&mut self, board: &Board, player: Player) -> Result<SearchOutcome, GameError> {
        let mut moves = board.legal_moves(player);
        if moves.is_empty() {
            warn!(%player, "no legal move at the root");
            return Err(GameError::NoLegalMove { player });
        }
        if self.config.shuffle {
            moves.shuffle(&mut self.rng);
        }

        let (winner, stats) = self.immediate_win(board, player, &moves)?;
        let outcome = match winner {
            Some(mv) => SearchOutcome { mv, value: WON, stats },
            None if self.config.parallel => self.search_parallel(board, player, &moves, stats)?,
            None => self.search_sequential(board, player, &moves, stats)?,
        };
        debug!(
            mv = %outcome.mv,
            value = outcome.value,
            depth = self.config.max_depth,
            nodes = outcome.stats.nodes,
            leaves = outcome.stats.leaves,
            cutoffs = outcome.stats.cutoffs,
            "search complete"
        );
        Ok(outcome)
    }

    /// A move that wins on the spot beats any deeper line that also scores
    /// `WON`, so those are taken before the tree is searched. The children
    /// it classified are counted in the returned stats either way.
    fn immediate_win(
        &self,
        board: &Board,
        player: Player,
        moves: &[Move],
    ) -> Result<(Option<Move>, SearchStats), GameError> {
        let mut stats = SearchStats::default();
        for &mv in moves {
            let child = board.apply(player, mv)?;
            stats.nodes += 1;
            if self.oracle.classify(&child) == Outcome::Win(player) {
                return Ok((Some(mv), stats));
            }
        }
        Ok((None, stats))
    }

    fn search_sequential(
        &mut self,
        board: &Board,
        player: Player,
        moves: &[Move],
        stats: SearchStats,
    ) -> Result<SearchOutcome, GameError> {
        let mut searcher = Searcher {
            config: &self.config,
            oracle: &self.oracle,
            root: player,
            rng: &mut self.rng,
            stats,
        };
        let mut alpha = Score::MIN;
        let mut best: Option<(Move, Score)> = None;
        for &mv in moves {
            let child = board.apply(player, mv)?;
            let value = searcher.minimax(&child, 1, alpha, Score::MAX, player.opponent())?;
            trace!(%mv, value, "root move");
            if best.map_or(true, |(_, best_value)| value > best_value) {
                best = Some((mv, value));
                if searcher.config.pruning {
                    alpha = value;
                    if value >= WON {
                        break;
                    }
                }
            }
        }
        let stats = searcher.stats;
        let (mv, value) = best.ok_or(GameError::NoLegalMove { player })?;
        Ok(SearchOutcome { mv, value, stats })
    }

    /// Root children are independent subtrees, so each one gets searched on
    /// the rayon pool with the full window and its own shuffle RNG.
    fn search_parallel(
        &mut self,
        board: &Board,
        player: Player,
        moves: &[Move],
        mut stats: SearchStats,
    ) -> Result<SearchOutcome, GameError> {
        let jobs: Vec<(Move, u64)> = moves.iter().map(|&mv| (mv, self.rng.gen())).collect();
        let config = &self.config;
        let oracle = &self.oracle;
        let results = jobs
            .into_par_iter()
            .map(|(mv, seed)| -> Result<(Move, Score, SearchStats), GameError> {
                let child = board.apply(player, mv)?;
                let mut rng = StdRng::seed_from_u64(seed);
                let mut searcher = Searcher {
                    config,
                    oracle,
                    root: player,
                    rng: &mut rng,
                    stats: SearchStats::default(),
                };
                let value = searcher.minimax(&child, 1, Score::MIN, Score::MAX, player.opponent())?;
                trace!(%mv, value, "root move");
                Ok((mv, value, searcher.stats))
            })
            .collect::<Result<Vec<_>, _>>()?;

        let mut best: Option<(Move, Score)> = None;
        for (mv, value, child_stats) in results {
            stats.merge(child_stats);
            if best.map_or(true, |(_, best_value)| value > best_value) {
                best = Some((mv, value));
            }
        }
        let (mv, value) = best.ok_or(GameError::NoLegalMove { player })?;
        Ok(SearchOutcome { mv, value, stats })
    }
}

/// One depth-first walk. Holds everything a recursive call needs so the
/// recursion itself only carries the per-node frame.
struct Searcher<'a, O> {
    config: &'a SearchConfig,
    oracle: &'a O,
    root: Player,
    rng: &'a mut StdRng,
    stats: SearchStats,
}

impl<O: TerminalOracle> Searcher<'_, O> {
    fn minimax(
        &mut self,
        board: &Board,
        depth: u8,
        mut alpha: Score,
        mut beta: Score,
        to_move: Player,
    ) -> Result<Score, GameError> {
        self.stats.nodes += 1;
        match self.oracle.classify(board) {
            Outcome::Win(winner) if winner == self.root => return Ok(WON),
            Outcome::Win(_) => return Ok(LOST),
            Outcome::Draw => return Ok(TIE),
            Outcome::Ongoing => {}
        }
        if depth >= self.config.max_depth {
            self.stats.leaves += 1;
            return Ok(self.config.heuristic.evaluate(board, self.root));
        }

        let mut moves = board.legal_moves(to_move);
        if moves.is_empty() {
            warn!(player = %to_move, depth, "ongoing position with no legal move");
            return Err(GameError::NoLegalMove { player: to_move });
        }
        if self.config.shuffle {
            moves.shuffle(&mut *self.rng);
        }

        let maximizing = to_move == self.root;
        let mut best = if maximizing { Score::MIN } else { Score::MAX };
        for mv in moves {
            let child = board.apply(to_move, mv)?;
            let value = self.minimax(&child, depth + 1, alpha, beta, to_move.opponent())?;
            if maximizing {
                best = best.max(value);
                alpha = alpha.max(best);
            } else {
                best = best.min(value);
                beta = beta.min(best);
            }
            if self.config.pruning && alpha >= beta {
                self.stats.cutoffs += 1;
                break;
            }
        }
        debug_assert!((LOST..=WON).contains(&best));
        Ok(best)
    }
}
