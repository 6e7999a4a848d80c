//! Connect-N engine on an unbounded grid
//!
//! Two players take turns marking cells; the first to get `strike_length`
//! marks in a row along any of four axes wins. The grid has no edges: every
//! mark opens a disk of playable cells around it.
//!
//! # Architecture
//!
//! The engine is organized into several modules:
//! - [`strike`]: Incremental tracking of maximal same-player runs
//! - [`board`]: Cells, frontier, undo and the geometry types
//! - [`rules`]: Victory detection
//! - [`eval`]: Position ranking from strike features
//! - [`search`]: Negamax search and the non-human players
//! - [`engine`]: AI engine combining tactics and search
//! - [`game`]: Turn order and game state
//! - [`config`]: Game options and command line
//! - [`ui`]: egui front end
//!
//! # Quick Start
//!
//! ```
//! use connectn::config::GameOptions;
//! use connectn::{AIEngine, Game, Offset, Player};
//!
//! let mut game = Game::new(GameOptions { border: 4, strike_length: 4 });
//! game.mark_cell(Offset::new(0, 0)).unwrap();
//!
//! // AI responds as P2
//! let engine = AIEngine::with_config(2, 1);
//! if let Some(pos) = engine.get_move(&game) {
//!     game.mark_cell(pos).unwrap();
//!     println!("AI plays at {pos}");
//! }
//! assert_eq!(game.current_player(), Player::P1);
//!
//! // Every run of marks is tracked incrementally
//! let longest = game.board().strikes().iter().map(|s| s.len).max();
//! assert_eq!(longest, Some(1));
//! ```
//!
//! # Search Priority
//!
//! The AI engine follows this search priority:
//! 1. Immediate winning move
//! 2. Block the opponent's winning move
//! 3. Negamax with alpha-beta pruning, root split across threads

pub mod board;
pub mod config;
pub mod engine;
pub mod eval;
pub mod game;
pub mod rules;
pub mod search;
pub mod strike;
pub mod ui;

// Re-export commonly used types for convenience
pub use board::{Board, Camera, Cell, Offset, Player, PlayerMove, Rect};
pub use config::GameOptions;
pub use engine::{AIEngine, MoveResult, SearchType};
pub use game::Game;
pub use strike::{Strike, StrikeSet};
