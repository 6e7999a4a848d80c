//! Negamax search with alpha-beta pruning
//!
//! Every node plays a candidate with [`Board::mark_cell`], checks the four
//! strikes through it for a win, recurses and then undoes the move, so the
//! strike index is updated incrementally instead of being rebuilt.
//!
//! # Features
//!
//! - Candidate generation within a Chebyshev radius of existing marks
//! - Move ordering by the strikes a move would join or break
//! - Root moves split round-robin across scoped worker threads, each with
//!   its own board copy
//!
//! # Example
//!
//! ```
//! use connectn::board::{Board, Offset, Player};
//! use connectn::search::Searcher;
//!
//! let searcher = Searcher::with_threads(2, 1);
//! let board = Board::new(5);
//!
//! let result = searcher.search(&board, Player::P1, 5);
//! assert_eq!(result.best_move, Some(Offset::ZERO));
//! ```

use rustc_hash::FxHashSet;
use tracing::{trace, warn};

use crate::board::{Board, Offset, Player};
use crate::eval::{evaluate, metric_weight, RankMetric, RankScore};
use crate::rules::winning_strike;
use crate::strike::StrikeSet;

/// Infinity score for alpha-beta bounds
const INF: i64 = RankScore::WIN * 2;

/// Maximum moves to consider at the root
const MAX_ROOT_MOVES: usize = 24;

/// Maximum moves to consider at internal nodes
const MAX_INTERNAL_MOVES: usize = 12;

/// Default candidate radius around existing marks
pub const DEFAULT_RADIUS: i32 = 2;

/// Search result containing the best move found and associated statistics.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchResult {
    /// Best move found, if any
    pub best_move: Option<Offset>,
    /// Score of the best move for the side to move
    pub score: i64,
    /// Depth searched
    pub depth: u8,
    /// Total nodes searched across all workers
    pub nodes: u64,
}

/// Per-thread search state
struct Worker {
    nodes: u64,
    radius: i32,
    victory_length: u32,
}

impl Worker {
    fn new(radius: i32, victory_length: u32) -> Self {
        Self {
            nodes: 0,
            radius,
            victory_length,
        }
    }

    /// Search this worker's share of root moves, returning the best as
    /// `(score, root index)`. Earlier moves win ties.
    fn search_root(
        &mut self,
        board: &mut Board,
        player: Player,
        moves: &[(usize, Offset)],
        depth: u8,
    ) -> Option<(i64, usize)> {
        let mut best: Option<(i64, usize)> = None;
        let mut alpha = -INF;

        for &(index, pos) in moves {
            let Some(score) = self.try_move(board, player, pos, depth, alpha, INF) else {
                continue;
            };
            trace!(%pos, score, "root candidate");

            if best.map_or(true, |(s, _)| score > s) {
                best = Some((score, index));
            }
            alpha = alpha.max(score);
        }

        best
    }

    /// Play `pos`, score it for `player` and undo it.
    fn try_move(
        &mut self,
        board: &mut Board,
        player: Player,
        pos: Offset,
        depth: u8,
        alpha: i64,
        beta: i64,
    ) -> Option<i64> {
        board.mark_cell(pos, player).ok()?;

        // Sooner wins score higher
        let score = if winning_strike(board.strikes(), pos, self.victory_length).is_some() {
            self.nodes += 1;
            RankScore::WIN + i64::from(depth)
        } else {
            -self.negamax(board, player.other(), depth.saturating_sub(1), -beta, -alpha)
        };

        let undone = board.undo_last_move();
        debug_assert!(undone.is_ok(), "undo after search move failed");
        Some(score)
    }

    fn negamax(&mut self, board: &mut Board, player: Player, depth: u8, mut alpha: i64, beta: i64) -> i64 {
        self.nodes += 1;

        if depth == 0 {
            return evaluate(board, player, self.victory_length);
        }

        let moves = ordered_moves(board, player, self.radius, self.victory_length, MAX_INTERNAL_MOVES);
        if moves.is_empty() {
            return evaluate(board, player, self.victory_length);
        }

        let mut best = -INF;
        for pos in moves {
            let Some(score) = self.try_move(board, player, pos, depth, alpha, beta) else {
                continue;
            };

            best = best.max(score);
            alpha = alpha.max(score);
            if alpha >= beta {
                break;
            }
        }

        best
    }
}

/// Unoccupied cells within Chebyshev `radius` of any mark, in move order.
///
/// The origin is the only candidate on an empty board.
pub fn candidate_moves(board: &Board, radius: i32) -> Vec<Offset> {
    if board.is_empty() {
        return if board.is_unoccupied(Offset::ZERO) {
            vec![Offset::ZERO]
        } else {
            Vec::new()
        };
    }

    let mut moves = Vec::with_capacity(64);
    let mut seen = FxHashSet::default();

    for mv in board.move_history() {
        for dx in -radius..=radius {
            for dy in -radius..=radius {
                let pos = mv.cell + Offset::new(dx, dy);
                if board.is_unoccupied(pos) && seen.insert(pos) {
                    moves.push(pos);
                }
            }
        }
    }

    moves
}

/// Weight of the strikes `player` would form by marking `pos`, read from
/// the strikes bordering it on each axis.
pub fn move_potential(strikes: &StrikeSet, pos: Offset, player: Player, victory_length: u32) -> i64 {
    strikes
        .axes()
        .iter()
        .map(|axis| {
            let before_cell = pos - axis.step;
            let after_cell = pos + axis.step;
            let before = strikes.strike_at(before_cell, axis).filter(|s| s.player == player);
            let after = strikes.strike_at(after_cell, axis).filter(|s| s.player == player);

            let length = 1 + before.map_or(0, |s| s.len) + after.map_or(0, |s| s.len);
            let open_before = match before {
                Some(s) => s.extendable_before,
                None => strikes.owner(before_cell) != Some(player.other()),
            };
            let open_after = match after {
                Some(s) => s.extendable_after,
                None => strikes.owner(after_cell) != Some(player.other()),
            };

            let metric = RankMetric {
                length: length.min(victory_length),
                extensions: u32::from(open_before) + u32::from(open_after),
            };
            metric_weight(metric, victory_length)
        })
        .fold(0i64, i64::saturating_add)
}

/// Candidates ordered by attacking plus blocking potential, best first.
fn ordered_moves(board: &Board, player: Player, radius: i32, victory_length: u32, limit: usize) -> Vec<Offset> {
    let strikes = board.strikes();
    let mut scored: Vec<(i64, Offset)> = candidate_moves(board, radius)
        .into_iter()
        .map(|pos| {
            let attack = move_potential(strikes, pos, player, victory_length);
            let block = move_potential(strikes, pos, player.other(), victory_length);
            (attack.saturating_add(block), pos)
        })
        .collect();

    // Stable sort keeps generation order among equals
    scored.sort_by(|a, b| b.0.cmp(&a.0));
    scored.truncate(limit);
    scored.into_iter().map(|(_, pos)| pos).collect()
}

/// Results of the worker threads that finished. A panicked worker's root
/// moves are lost, so it is logged.
fn collect_outcomes<T>(joined: impl IntoIterator<Item = std::thread::Result<T>>) -> Vec<T> {
    joined
        .into_iter()
        .enumerate()
        .filter_map(|(worker, outcome)| match outcome {
            Ok(value) => Some(value),
            Err(_) => {
                warn!(worker, "search worker panicked, its root moves were skipped");
                None
            }
        })
        .collect()
}

/// Negamax searcher.
///
/// Stateless between searches; every call works on private board copies.
#[derive(Debug, Clone)]
pub struct Searcher {
    max_depth: u8,
    num_threads: usize,
    radius: i32,
}

impl Searcher {
    /// Create a searcher using the available CPU cores, up to eight.
    #[must_use]
    pub fn new(max_depth: u8) -> Self {
        let num_threads = std::thread::available_parallelism()
            .map(|n| n.get().min(8))
            .unwrap_or(4);
        Self::with_threads(max_depth, num_threads)
    }

    /// Create a searcher with an explicit thread count.
    #[must_use]
    pub fn with_threads(max_depth: u8, num_threads: usize) -> Self {
        Self {
            max_depth: max_depth.max(1),
            num_threads: num_threads.max(1),
            radius: DEFAULT_RADIUS,
        }
    }

    /// Consider moves up to `radius` cells from existing marks.
    #[must_use]
    pub fn with_radius(mut self, radius: i32) -> Self {
        self.radius = radius.max(1);
        self
    }

    #[inline]
    pub fn max_depth(&self) -> u8 {
        self.max_depth
    }

    #[inline]
    pub fn threads(&self) -> usize {
        self.num_threads
    }

    #[inline]
    pub fn radius(&self) -> i32 {
        self.radius
    }

    /// Find the best move for `player`.
    ///
    /// The result does not depend on the thread count: each root move gets
    /// the same score whichever worker searches it, and ties go to the
    /// earlier move in candidate order.
    #[must_use]
    pub fn search(&self, board: &Board, player: Player, victory_length: u32) -> SearchResult {
        let depth = self.max_depth;
        let moves: Vec<(usize, Offset)> =
            ordered_moves(board, player, self.radius, victory_length, MAX_ROOT_MOVES)
                .into_iter()
                .enumerate()
                .collect();

        let mut result = SearchResult {
            best_move: None,
            score: 0,
            depth,
            nodes: 0,
        };
        if moves.is_empty() {
            return result;
        }

        let threads = self.num_threads.min(moves.len());
        let radius = self.radius;
        let outcomes: Vec<(Option<(i64, usize)>, u64)> = if threads == 1 {
            let mut worker = Worker::new(radius, victory_length);
            let best = worker.search_root(&mut board.clone(), player, &moves, depth);
            vec![(best, worker.nodes)]
        } else {
            std::thread::scope(|s| {
                let handles: Vec<_> = (0..threads)
                    .map(|t| {
                        let share: Vec<_> = moves.iter().copied().skip(t).step_by(threads).collect();
                        let mut board = board.clone();
                        s.spawn(move || {
                            let mut worker = Worker::new(radius, victory_length);
                            let best = worker.search_root(&mut board, player, &share, depth);
                            (best, worker.nodes)
                        })
                    })
                    .collect();

                collect_outcomes(handles.into_iter().map(|h| h.join()))
            })
        };

        let mut best: Option<(i64, usize)> = None;
        for (outcome, nodes) in outcomes {
            result.nodes += nodes;
            if let Some((score, index)) = outcome {
                let better = match best {
                    None => true,
                    Some((s, i)) => score > s || (score == s && index < i),
                };
                if better {
                    best = Some((score, index));
                }
            }
        }

        if let Some((score, index)) = best {
            result.score = score;
            result.best_move = moves.get(index).map(|&(_, pos)| pos);
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collect_outcomes_skips_panicked_workers() {
        let joined: Vec<std::thread::Result<u64>> = vec![Ok(3), Err(Box::new("worker died") as Box<dyn std::any::Any + Send>), Ok(5)];
        assert_eq!(collect_outcomes(joined), vec![3, 5]);
    }

    fn at(x: i32, y: i32) -> Offset {
        Offset::new(x, y)
    }

    fn board_with(p1: &[(i32, i32)], p2: &[(i32, i32)]) -> Board {
        let mut board = Board::new(4);
        let longest = p1.len().max(p2.len());
        for i in 0..longest {
            if let Some(&(x, y)) = p1.get(i) {
                board.mark_cell(at(x, y), Player::P1).unwrap();
            }
            if let Some(&(x, y)) = p2.get(i) {
                board.mark_cell(at(x, y), Player::P2).unwrap();
            }
        }
        board
    }

    #[test]
    fn test_search_empty_board() {
        let searcher = Searcher::with_threads(3, 1);
        let board = Board::new(4);

        let result = searcher.search(&board, Player::P1, 5);
        assert_eq!(result.best_move, Some(Offset::ZERO));
    }

    #[test]
    fn test_search_finds_winning_move() {
        let searcher = Searcher::with_threads(2, 1);
        let board = board_with(&[(0, 0), (1, 0), (2, 0), (3, 0)], &[(0, 1), (1, 1), (4, 4)]);

        let result = searcher.search(&board, Player::P1, 5);
        assert!(matches!(result.best_move, Some(p) if p == at(4, 0) || p == at(-1, 0)));
        assert!(result.score >= RankScore::WIN);
    }

    #[test]
    fn test_search_blocks_opponent_win() {
        let searcher = Searcher::with_threads(2, 1);
        // P2 threatens to complete a closed four at (4, 0)
        let board = board_with(&[(-1, 0), (0, 3), (2, 3)], &[(0, 0), (1, 0), (2, 0), (3, 0)]);

        let result = searcher.search(&board, Player::P1, 5);
        assert_eq!(result.best_move, Some(at(4, 0)));
    }

    #[test]
    fn test_search_counts_nodes() {
        let searcher = Searcher::with_threads(2, 1);
        let board = board_with(&[(0, 0)], &[(1, 1)]);
        let result = searcher.search(&board, Player::P1, 5);
        assert!(result.nodes > 0);
        assert_eq!(result.depth, 2);
    }

    #[test]
    fn test_search_does_not_modify_board() {
        let searcher = Searcher::with_threads(2, 2);
        let board = board_with(&[(0, 0), (1, 0)], &[(0, 1)]);
        let before = board.clone();
        let _ = searcher.search(&board, Player::P2, 5);
        assert_eq!(board, before);
    }

    #[test]
    fn test_parallel_matches_single_thread() {
        let board = board_with(&[(0, 0), (1, 1), (2, 0)], &[(1, 0), (0, 2), (3, 3)]);

        let single = Searcher::with_threads(2, 1).search(&board, Player::P1, 5);
        let parallel = Searcher::with_threads(2, 4).search(&board, Player::P1, 5);
        assert_eq!(single.best_move, parallel.best_move);
        assert_eq!(single.score, parallel.score);
    }

    #[test]
    fn test_candidate_moves_radius() {
        let board = board_with(&[(0, 0)], &[]);
        let moves = candidate_moves(&board, 1);
        assert_eq!(moves.len(), 8);
        assert!(moves.iter().all(|m| m.chebyshev(Offset::ZERO) == 1));

        let wide = candidate_moves(&board, 2);
        assert_eq!(wide.len(), 24);
    }

    #[test]
    fn test_move_potential_prefers_joining() {
        let board = board_with(&[(0, 0), (2, 0)], &[(3, 3)]);
        let strikes = board.strikes();
        let bridge = move_potential(strikes, at(1, 0), Player::P1, 5);
        let aside = move_potential(strikes, at(1, 3), Player::P1, 5);
        assert!(bridge > aside);
    }
}
