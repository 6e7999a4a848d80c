//! Occupancy board with a growing playable frontier and exact undo

use std::sync::Arc;

use rustc_hash::{FxHashMap, FxHashSet};
use thiserror::Error;

use super::geom::{Offset, Rect};
use super::{Cell, Player, PlayerMove};
use crate::strike::{StrikeError, StrikeSet};

/// Errors returned by [`Board`] mutators. A rejected call leaves the board
/// untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum BoardError {
    #[error("cell {0} is outside the playable area")]
    Unavailable(Offset),
    #[error("cell {0} is already occupied")]
    Occupied(Offset),
    #[error("no moves to undo")]
    NoMoves,
    #[error(transparent)]
    Strike(#[from] StrikeError),
}

/// A single cell change. The only transitions a move makes are
/// unavailable -> unoccupied and unoccupied -> occupied, so the new state
/// alone is enough to revert it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct CellDelta {
    cell: Offset,
    new_state: Cell,
}

/// Everything a move changed
#[derive(Debug, Clone, PartialEq, Eq)]
struct BoardDelta {
    cells: Vec<CellDelta>,
    old_bound: Rect,
    new_bound: Rect,
}

/// Unbounded board.
///
/// Only cells within `border` of some mark (or of the origin, before the
/// first move) are available. Every mark is also fed to the board's
/// [`StrikeSet`].
#[derive(Debug, Clone, PartialEq)]
pub struct Board {
    /// Available cells; anything missing is unavailable
    cells: FxHashMap<Offset, Cell>,
    unoccupied: FxHashSet<Offset>,
    player_cells: [FxHashSet<Offset>; 2],
    strikes: StrikeSet,
    deltas: Vec<BoardDelta>,
    history: Vec<PlayerMove>,
    /// Offsets of the disk opened around each mark, shared between clones
    disk: Arc<[Offset]>,
    border: i32,
    bound: Rect,
}

impl Board {
    pub fn new(border: u32) -> Self {
        let b = border as i32;
        let disk: Arc<[Offset]> = (-b..=b)
            .flat_map(|dx| (-b..=b).map(move |dy| Offset::new(dx, dy)))
            .filter(|ds| ds.is_inside_circle(b))
            .collect();

        let mut board = Self {
            cells: FxHashMap::default(),
            unoccupied: FxHashSet::default(),
            player_cells: [FxHashSet::default(), FxHashSet::default()],
            strikes: StrikeSet::new(),
            deltas: Vec::new(),
            history: Vec::new(),
            disk,
            border: b,
            bound: Rect::new(-b, -b, 2 * b + 1, 2 * b + 1),
        };

        let disk = Arc::clone(&board.disk);
        for &ds in disk.iter() {
            board.open(ds);
        }
        board
    }

    /// State of a cell
    #[inline]
    pub fn cell(&self, pos: Offset) -> Cell {
        self.cells.get(&pos).copied().unwrap_or(Cell::Unavailable)
    }

    #[inline]
    pub fn is_unoccupied(&self, pos: Offset) -> bool {
        self.unoccupied.contains(&pos)
    }

    /// Unoccupied cells in no particular order
    pub fn unoccupied_cells(&self) -> impl Iterator<Item = Offset> + '_ {
        self.unoccupied.iter().copied()
    }

    #[inline]
    pub fn unoccupied_count(&self) -> usize {
        self.unoccupied.len()
    }

    /// Cells marked by `player` in no particular order
    pub fn player_cells(&self, player: Player) -> impl Iterator<Item = Offset> + '_ {
        self.player_cells[player.index()].iter().copied()
    }

    #[inline]
    pub fn move_count(&self) -> usize {
        self.history.len()
    }

    /// No cell has been marked yet
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.history.is_empty()
    }

    #[inline]
    pub fn latest_move(&self) -> Option<PlayerMove> {
        self.history.last().copied()
    }

    #[inline]
    pub fn move_history(&self) -> &[PlayerMove] {
        &self.history
    }

    /// Smallest rectangle holding every available cell
    #[inline]
    pub fn bound(&self) -> Rect {
        self.bound
    }

    #[inline]
    pub fn border(&self) -> i32 {
        self.border
    }

    #[inline]
    pub fn strikes(&self) -> &StrikeSet {
        &self.strikes
    }

    /// Mark an unoccupied cell and open the frontier around it.
    pub fn mark_cell(&mut self, pos: Offset, player: Player) -> Result<(), BoardError> {
        match self.cell(pos) {
            Cell::Unavailable => return Err(BoardError::Unavailable(pos)),
            Cell::Occupied(_) => return Err(BoardError::Occupied(pos)),
            Cell::Unoccupied => {}
        }
        self.strikes.insert(pos, player)?;

        self.cells.insert(pos, Cell::Occupied(player));
        self.unoccupied.remove(&pos);
        self.player_cells[player.index()].insert(pos);
        self.history.push(PlayerMove { cell: pos, player });

        let mut delta = BoardDelta {
            cells: vec![CellDelta {
                cell: pos,
                new_state: Cell::Occupied(player),
            }],
            old_bound: self.bound,
            new_bound: self.bound,
        };

        let b = self.border;
        let around = Rect::new(pos.x - b, pos.y - b, 2 * b + 1, 2 * b + 1);
        self.bound = self.bound.grow_to_contain_rect(around);
        delta.new_bound = self.bound;

        let disk = Arc::clone(&self.disk);
        for &ds in disk.iter() {
            let cell = pos + ds;
            if !self.cells.contains_key(&cell) {
                self.open(cell);
                delta.cells.push(CellDelta {
                    cell,
                    new_state: Cell::Unoccupied,
                });
            }
        }

        self.deltas.push(delta);
        Ok(())
    }

    /// Revert the most recent mark, returning it.
    pub fn undo_last_move(&mut self) -> Result<PlayerMove, BoardError> {
        let Some(last) = self.history.last().copied() else {
            return Err(BoardError::NoMoves);
        };
        self.strikes.remove(last.cell)?;

        self.history.pop();
        let Some(delta) = self.deltas.pop() else {
            return Ok(last);
        };

        self.bound = delta.old_bound;
        for change in delta.cells {
            match change.new_state {
                Cell::Unoccupied => {
                    self.cells.remove(&change.cell);
                    self.unoccupied.remove(&change.cell);
                }
                Cell::Occupied(player) => {
                    self.cells.insert(change.cell, Cell::Unoccupied);
                    self.player_cells[player.index()].remove(&change.cell);
                    self.unoccupied.insert(change.cell);
                }
                Cell::Unavailable => {}
            }
        }

        Ok(last)
    }

    /// Turn an unavailable cell into an unoccupied one
    fn open(&mut self, pos: Offset) {
        self.cells.insert(pos, Cell::Unoccupied);
        self.unoccupied.insert(pos);
    }
}
