//! GUI module for the Connect-N game
//!
//! This module provides a native Rust GUI using egui/eframe.

mod app;
mod board_view;
mod game_state;
mod theme;

pub use app::ConnectApp;
pub use game_state::{GameState, Replay};
