//! Board representation for connect-N on an unbounded grid

pub mod board;
pub mod geom;

#[cfg(test)]
mod tests;

use std::fmt;

// Re-exports
pub use board::{Board, BoardError};
pub use geom::{Camera, Offset, Rect};

/// The two players
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Player {
    P1,
    P2,
}

impl Player {
    pub const ALL: [Player; 2] = [Player::P1, Player::P2];

    /// Get the opponent
    #[inline]
    pub fn other(self) -> Player {
        match self {
            Player::P1 => Player::P2,
            Player::P2 => Player::P1,
        }
    }

    /// Index for per-player arrays
    #[inline]
    pub fn index(self) -> usize {
        match self {
            Player::P1 => 0,
            Player::P2 => 1,
        }
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Player::P1 => write!(f, "P1"),
            Player::P2 => write!(f, "P2"),
        }
    }
}

/// State of a single board cell.
///
/// Cells outside the playable frontier are `Unavailable`; the board never
/// stores them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Cell {
    Unavailable,
    Unoccupied,
    Occupied(Player),
}

impl Cell {
    #[inline]
    pub fn is_occupied_by(self, player: Player) -> bool {
        self == Cell::Occupied(player)
    }

    #[inline]
    pub fn player(self) -> Option<Player> {
        match self {
            Cell::Occupied(p) => Some(p),
            _ => None,
        }
    }
}

/// A mark placed by a player
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PlayerMove {
    pub cell: Offset,
    pub player: Player,
}
