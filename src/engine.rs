//! Main AI engine integrating all search components
//!
//! The engine picks a move with a fixed priority:
//!
//! 1. **Immediate win**: a cell that completes a strike for the mover
//! 2. **Block**: a cell that would complete a strike for the opponent
//! 3. **Minimax**: negamax search over candidate moves
//!
//! # Example
//!
//! ```
//! use connectn::config::GameOptions;
//! use connectn::{AIEngine, Game, Offset};
//!
//! let mut game = Game::new(GameOptions { border: 4, strike_length: 5 });
//! game.mark_cell(Offset::new(0, 0)).unwrap();
//!
//! let engine = AIEngine::with_config(2, 1);
//! let result = engine.get_move_with_stats(&game);
//! println!("Best move: {:?}", result.best_move);
//! println!("Search type: {:?}", result.search_type);
//! println!("Time: {}ms", result.time_ms);
//! ```

use std::time::Instant;

use tracing::debug;

use crate::board::{Board, Offset, Player};
use crate::eval::RankScore;
use crate::game::Game;
use crate::rules::completes_strike;
use crate::search::{candidate_moves, SearchResult, Searcher};

/// Default search depth in plies
pub const DEFAULT_DEPTH: u8 = 3;

/// Which phase of the move selection produced the result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchType {
    /// The move completes a strike for the mover
    ImmediateWin,
    /// The move takes the cell the opponent needs to win
    Block,
    /// Regular negamax search result
    Minimax,
}

/// Result of a move search with detailed statistics.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoveResult {
    /// Best move found, if any
    pub best_move: Option<Offset>,
    /// Score of the move for the side to move
    pub score: i64,
    /// Phase that found this move
    pub search_type: SearchType,
    /// Time taken in milliseconds
    pub time_ms: u64,
    /// Number of nodes searched
    pub nodes: u64,
}

impl MoveResult {
    #[inline]
    fn immediate_win(pos: Offset, time_ms: u64) -> Self {
        Self {
            best_move: Some(pos),
            score: RankScore::WIN,
            search_type: SearchType::ImmediateWin,
            time_ms,
            nodes: 1,
        }
    }

    #[inline]
    fn block(pos: Offset, time_ms: u64) -> Self {
        Self {
            best_move: Some(pos),
            score: 0,
            search_type: SearchType::Block,
            time_ms,
            nodes: 1,
        }
    }

    #[inline]
    fn from_minimax(result: SearchResult, time_ms: u64) -> Self {
        Self {
            best_move: result.best_move,
            score: result.score,
            search_type: SearchType::Minimax,
            time_ms,
            nodes: result.nodes,
        }
    }

    #[inline]
    fn no_move(time_ms: u64) -> Self {
        Self {
            best_move: None,
            score: 0,
            search_type: SearchType::Minimax,
            time_ms,
            nodes: 0,
        }
    }
}

/// Connect-N AI engine.
///
/// Cheap tactical checks run before the full search, so forced moves come
/// back in microseconds.
///
/// # Example
///
/// ```
/// use connectn::{AIEngine, Game};
///
/// let engine = AIEngine::with_config(2, 1);
/// let game = Game::default();
/// assert_eq!(engine.get_move(&game), Some(connectn::Offset::ZERO));
/// ```
#[derive(Debug, Clone)]
pub struct AIEngine {
    searcher: Searcher,
}

impl AIEngine {
    /// Engine with the default depth, using the available cores.
    #[must_use]
    pub fn new() -> Self {
        Self {
            searcher: Searcher::new(DEFAULT_DEPTH),
        }
    }

    /// Engine with an explicit depth and worker thread count.
    #[must_use]
    pub fn with_config(max_depth: u8, threads: usize) -> Self {
        Self {
            searcher: Searcher::with_threads(max_depth, threads),
        }
    }

    /// Best move for the player to move, or `None` once the game is over.
    #[must_use]
    pub fn get_move(&self, game: &Game) -> Option<Offset> {
        self.get_move_with_stats(game).best_move
    }

    /// Best move for the player to move with search statistics.
    #[must_use]
    pub fn get_move_with_stats(&self, game: &Game) -> MoveResult {
        let start = Instant::now();
        let elapsed = || start.elapsed().as_millis() as u64;

        if game.over() {
            return MoveResult::no_move(elapsed());
        }

        let board = game.board();
        let player = game.current_player();
        let victory_length = game.options().strike_length;

        let result = if let Some(pos) = find_completing_move(board, player, victory_length) {
            MoveResult::immediate_win(pos, elapsed())
        } else if let Some(pos) = find_completing_move(board, player.other(), victory_length) {
            MoveResult::block(pos, elapsed())
        } else {
            let search = self.searcher.search(board, player, victory_length);
            MoveResult::from_minimax(search, elapsed())
        };

        debug!(
            %player,
            best_move = ?result.best_move,
            search_type = ?result.search_type,
            score = result.score,
            nodes = result.nodes,
            time_ms = result.time_ms,
            "ai move"
        );
        result
    }

    /// Change the search depth, keeping the thread count.
    pub fn set_max_depth(&mut self, depth: u8) {
        self.searcher = Searcher::with_threads(depth, self.searcher.threads()).with_radius(self.searcher.radius());
    }

    #[inline]
    pub fn max_depth(&self) -> u8 {
        self.searcher.max_depth()
    }

    #[inline]
    pub fn threads(&self) -> usize {
        self.searcher.threads()
    }
}

impl Default for AIEngine {
    fn default() -> Self {
        Self::new()
    }
}

/// A cell next to `player`'s marks that completes a strike for them.
fn find_completing_move(board: &Board, player: Player, victory_length: u32) -> Option<Offset> {
    let strikes = board.strikes();
    candidate_moves(board, 1)
        .into_iter()
        .find(|&pos| completes_strike(strikes, pos, player, victory_length))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GameOptions;

    fn at(x: i32, y: i32) -> Offset {
        Offset::new(x, y)
    }

    fn game_with(moves: &[(i32, i32)]) -> Game {
        let mut game = Game::new(GameOptions {
            border: 4,
            strike_length: 5,
        });
        for &(x, y) in moves {
            game.mark_cell(at(x, y)).unwrap();
        }
        game
    }

    #[test]
    fn test_engine_with_config() {
        let engine = AIEngine::with_config(4, 2);
        assert_eq!(engine.max_depth(), 4);
        assert_eq!(engine.threads(), 2);
    }

    #[test]
    fn test_engine_set_depth() {
        let mut engine = AIEngine::with_config(4, 2);
        engine.set_max_depth(2);
        assert_eq!(engine.max_depth(), 2);
        assert_eq!(engine.threads(), 2);
    }

    #[test]
    fn test_engine_finds_immediate_win() {
        // P1 on y = 0, P2 scattered
        let game = game_with(&[(0, 0), (0, 2), (1, 0), (2, 3), (2, 0), (-2, 2), (3, 0), (3, 3)]);

        let result = AIEngine::with_config(2, 1).get_move_with_stats(&game);
        assert!(matches!(result.best_move, Some(p) if p == at(4, 0) || p == at(-1, 0)));
        assert_eq!(result.search_type, SearchType::ImmediateWin);
    }

    #[test]
    fn test_engine_blocks_opponent_win() {
        // P2 has four on y = 1 with one open end; P1 has nothing to win with
        let game = game_with(&[(-1, 1), (0, 1), (3, 3), (1, 1), (-2, -2), (2, 1), (0, -3), (3, 1)]);

        let result = AIEngine::with_config(2, 1).get_move_with_stats(&game);
        assert_eq!(result.best_move, Some(at(4, 1)));
        assert_eq!(result.search_type, SearchType::Block);
    }

    #[test]
    fn test_engine_empty_board() {
        let game = game_with(&[]);
        let result = AIEngine::with_config(2, 1).get_move_with_stats(&game);
        assert_eq!(result.best_move, Some(Offset::ZERO));
        assert_eq!(result.search_type, SearchType::Minimax);
    }

    #[test]
    fn test_engine_no_move_after_win() {
        let game = game_with(&[(0, 0), (0, 1), (1, 0), (1, 1), (2, 0), (2, 1), (3, 0), (3, 1), (4, 0)]);
        assert!(game.over());
        assert_eq!(AIEngine::with_config(2, 1).get_move(&game), None);
    }

    #[test]
    fn test_engine_move_is_legal() {
        let game = game_with(&[(0, 0), (1, 1), (0, 1)]);
        let engine = AIEngine::with_config(2, 2);
        let pos = engine.get_move(&game).unwrap();
        assert!(game.board().is_unoccupied(pos));
    }
}
