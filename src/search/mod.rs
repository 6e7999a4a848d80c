//! Search and computer players
//!
//! Contains:
//! - Negamax search with alpha-beta pruning over make/undo on board copies
//! - Candidate generation and move ordering from the strike index
//! - Player agents: minimax AI, random and obstructive players

pub mod agents;
pub mod minimax;

pub use agents::{AiPlayer, ObstructivePlayer, PlayerAgent, PlayerKind, RandomPlayer};
pub use minimax::{candidate_moves, move_potential, SearchResult, Searcher, DEFAULT_RADIUS};
