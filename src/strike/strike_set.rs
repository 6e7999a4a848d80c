//! Incremental strike tracking
//!
//! A [`StrikeSet`] keeps, for every occupied cell and every axis, the maximal
//! run of same-player marks ("strike") through that cell, updated in O(1)
//! strikes per insert or remove.
//!
//! Strikes live in an arena indexed by [`StrikeId`]. Cells refer to strikes
//! by index only; a strike's cells are `start + k * step` for `k < len`.
//! Removing or merging a strike tombstones its slot (`len == 0`) and pushes
//! the index onto a free list, so a `StrikeId` is only meaningful until the
//! next mutation.

use rustc_hash::FxHashMap;
use thiserror::Error;

use crate::board::{Offset, Player};

use super::axis::{Axes, Axis, AXIS_COUNT};

/// Index of a strike in the arena
pub type StrikeId = usize;

/// Per-cell strike slots, one per axis
type Slots = [Option<StrikeId>; AXIS_COUNT];

/// Errors returned by [`StrikeSet`] mutators. Neither mutates the set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum StrikeError {
    #[error("cell {0} is already occupied")]
    AlreadyOccupied(Offset),
    #[error("cell {0} is not occupied")]
    NotOccupied(Offset),
}

/// A maximal run of one player's marks along one axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Strike {
    pub player: Player,
    /// First cell (smallest offset along the axis)
    pub start: Offset,
    pub axis: Axis,
    /// Number of cells; 0 for a tombstone or a vacant sentinel
    pub len: u32,
    /// The cell before `start` is not held by the opponent
    pub extendable_before: bool,
    /// The cell after the last one is not held by the opponent
    pub extendable_after: bool,
}

impl Strike {
    /// Zero-length placeholder reported for unoccupied cells.
    ///
    /// Its `player` is always `P1` and carries no meaning; test ownership
    /// with [`Strike::is_owned_by`], which is false for a vacant strike.
    pub fn vacant(cell: Offset, axis: Axis) -> Self {
        Self {
            player: Player::P1,
            start: cell,
            axis,
            len: 0,
            extendable_before: false,
            extendable_after: false,
        }
    }

    #[inline]
    pub fn is_live(&self) -> bool {
        self.len > 0
    }

    /// Last cell of the strike
    #[inline]
    pub fn end(&self) -> Offset {
        self.start + self.axis.step.scale(self.len as i32 - 1)
    }

    /// Number of extendable ends (0..=2)
    #[inline]
    pub fn extensions(&self) -> u32 {
        u32::from(self.extendable_before) + u32::from(self.extendable_after)
    }

    pub fn cells(&self) -> impl Iterator<Item = Offset> {
        let start = self.start;
        let step = self.axis.step;
        (0..self.len as i32).map(move |k| start + step.scale(k))
    }

    /// Position of `cell` within the strike, counted from `start`
    pub fn offset_of(&self, cell: Offset) -> Option<u32> {
        let k = self.axis.steps_between(self.start, cell)?;
        (k >= 0 && (k as u32) < self.len).then_some(k as u32)
    }

    #[inline]
    pub fn contains(&self, cell: Offset) -> bool {
        self.offset_of(cell).is_some()
    }

    #[inline]
    pub fn is_owned_by(&self, player: Player) -> bool {
        self.is_live() && self.player == player
    }
}

/// Strike index over an unbounded board.
///
/// Not synchronized: parallel users clone the whole set.
#[derive(Debug, Clone, Default)]
pub struct StrikeSet {
    axes: Axes,
    strikes: Vec<Strike>,
    free: Vec<StrikeId>,
    cells: FxHashMap<Offset, Slots>,
    owners: FxHashMap<Offset, Player>,
}

impl StrikeSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Empty set tracking a custom axis table
    pub fn with_axes(axes: Axes) -> Self {
        Self {
            axes,
            ..Self::default()
        }
    }

    #[inline]
    pub fn axes(&self) -> &Axes {
        &self.axes
    }

    /// Owner of a cell, if occupied
    #[inline]
    pub fn owner(&self, cell: Offset) -> Option<Player> {
        self.owners.get(&cell).copied()
    }

    /// Number of occupied cells
    #[inline]
    pub fn occupied(&self) -> usize {
        self.owners.len()
    }

    /// No cell is occupied
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.owners.is_empty()
    }

    /// Number of live strikes
    pub fn len(&self) -> usize {
        self.strikes.len() - self.free.len()
    }

    /// Live strike through `cell` along `axis`
    pub fn strike_at(&self, cell: Offset, axis: Axis) -> Option<&Strike> {
        let id = self.cells.get(&cell)?[axis.id]?;
        Some(&self.strikes[id])
    }

    /// The strike through `cell` on every axis, or a vacant sentinel where
    /// the cell is unoccupied.
    ///
    /// A sentinel's `player` field is meaningless, so compare owners with
    /// [`Strike::is_owned_by`] rather than reading `player` directly.
    pub fn strikes_through(&self, cell: Offset) -> [Strike; AXIS_COUNT] {
        let slots = self.cells.get(&cell);
        std::array::from_fn(|i| {
            slots
                .and_then(|s| s[i])
                .map(|id| self.strikes[id])
                .unwrap_or_else(|| Strike::vacant(cell, self.axes[i]))
        })
    }

    /// Iterate over live strikes in arena order
    pub fn iter(&self) -> impl Iterator<Item = &Strike> {
        self.strikes.iter().filter(|s| s.is_live())
    }

    /// All live strikes in arena order
    pub fn strikes(&self) -> Vec<Strike> {
        self.iter().copied().collect()
    }

    /// Place `player`'s mark on `cell`.
    pub fn insert(&mut self, cell: Offset, player: Player) -> Result<(), StrikeError> {
        if self.owners.contains_key(&cell) {
            return Err(StrikeError::AlreadyOccupied(cell));
        }

        self.owners.insert(cell, player);
        self.cells.insert(cell, [None; AXIS_COUNT]);

        let axes = self.axes;
        for axis in axes.iter() {
            let id = self.join(cell, player, axis);
            if let Some(slots) = self.cells.get_mut(&cell) {
                slots[axis.id] = Some(id);
            }
        }

        Ok(())
    }

    /// Clear the mark on `cell`. Any occupied cell may be removed.
    pub fn remove(&mut self, cell: Offset) -> Result<(), StrikeError> {
        let (Some(player), Some(slots)) = (self.owner(cell), self.cells.get(&cell).copied()) else {
            return Err(StrikeError::NotOccupied(cell));
        };

        // Reverse axis order hands slots back to the free list in the order
        // `insert` took them
        let axes = self.axes;
        for axis in axes.iter().rev() {
            // Opponent strikes facing the cell may grow into it again
            if let Some((p, id)) = self.neighbour(cell - axis.step, axis) {
                if p != player {
                    self.strikes[id].extendable_after = true;
                }
            }
            if let Some((p, id)) = self.neighbour(cell + axis.step, axis) {
                if p != player {
                    self.strikes[id].extendable_before = true;
                }
            }

            if let Some(id) = slots[axis.id] {
                self.cut(cell, id, axis);
            }
        }

        self.cells.remove(&cell);
        self.owners.remove(&cell);
        Ok(())
    }

    /// Owner and strike of the cell along `axis`
    #[inline]
    fn neighbour(&self, cell: Offset, axis: Axis) -> Option<(Player, StrikeId)> {
        let player = *self.owners.get(&cell)?;
        let id = self.cells.get(&cell)?[axis.id]?;
        Some((player, id))
    }

    /// Attach a freshly placed cell to the strikes around it on one axis.
    fn join(&mut self, cell: Offset, player: Player, axis: Axis) -> StrikeId {
        let before = self.neighbour(cell - axis.step, axis);
        let after = self.neighbour(cell + axis.step, axis);

        let friend = |n: Option<(Player, StrikeId)>| n.filter(|&(p, _)| p == player).map(|(_, id)| id);
        let foe = |n: Option<(Player, StrikeId)>| n.filter(|&(p, _)| p != player).map(|(_, id)| id);

        let id = match (friend(before), friend(after)) {
            (None, None) => self.alloc(Strike {
                player,
                start: cell,
                axis,
                len: 1,
                extendable_before: true,
                extendable_after: true,
            }),
            (Some(b), None) => {
                self.strikes[b].len += 1;
                b
            }
            (None, Some(a)) => {
                let strike = &mut self.strikes[a];
                strike.start = cell;
                strike.len += 1;
                a
            }
            (Some(b), Some(a)) => {
                self.merge(b, a);
                b
            }
        };

        // Restriction is mutual
        if let Some(f) = foe(before) {
            self.strikes[id].extendable_before = false;
            self.strikes[f].extendable_after = false;
        }
        if let Some(f) = foe(after) {
            self.strikes[id].extendable_after = false;
            self.strikes[f].extendable_before = false;
        }

        id
    }

    /// `before` absorbs `after` plus the cell bridging them.
    fn merge(&mut self, before: StrikeId, after: StrikeId) {
        let absorbed = self.strikes[after];
        for c in absorbed.cells() {
            if let Some(slots) = self.cells.get_mut(&c) {
                slots[absorbed.axis.id] = Some(before);
            }
        }

        let strike = &mut self.strikes[before];
        strike.len += absorbed.len + 1;
        strike.extendable_after = absorbed.extendable_after;

        self.release(after);
    }

    /// Take `cell` out of strike `id`, shrinking or splitting it.
    fn cut(&mut self, cell: Offset, id: StrikeId, axis: Axis) {
        let strike = self.strikes[id];
        debug_assert!(strike.contains(cell), "{cell} is outside {strike:?}");
        let Some(offset) = strike.offset_of(cell) else {
            return;
        };

        if strike.len == 1 {
            self.release(id);
        } else if offset == 0 {
            let s = &mut self.strikes[id];
            s.start = s.start + axis.step;
            s.len -= 1;
            s.extendable_before = true;
        } else if offset == strike.len - 1 {
            let s = &mut self.strikes[id];
            s.len -= 1;
            s.extendable_after = true;
        } else {
            let s = &mut self.strikes[id];
            s.len = offset;
            s.extendable_after = true;

            let suffix = Strike {
                player: strike.player,
                start: cell + axis.step,
                axis,
                len: strike.len - offset - 1,
                extendable_before: true,
                extendable_after: strike.extendable_after,
            };
            let suffix_id = self.alloc(suffix);
            for c in suffix.cells() {
                if let Some(slots) = self.cells.get_mut(&c) {
                    slots[axis.id] = Some(suffix_id);
                }
            }
        }
    }

    fn alloc(&mut self, strike: Strike) -> StrikeId {
        match self.free.pop() {
            Some(id) => {
                self.strikes[id] = strike;
                id
            }
            None => {
                self.strikes.push(strike);
                self.strikes.len() - 1
            }
        }
    }

    fn release(&mut self, id: StrikeId) {
        self.strikes[id].len = 0;
        self.free.push(id);
    }

    /// Check every structural invariant, describing the first violation.
    #[cfg(test)]
    pub(crate) fn check_invariants(&self) -> Result<(), String> {
        if self.cells.len() != self.owners.len() {
            return Err(format!(
                "{} indexed cells but {} owners",
                self.cells.len(),
                self.owners.len()
            ));
        }

        let mut members = vec![0u32; self.strikes.len()];
        for (&cell, slots) in &self.cells {
            let owner = self.owners.get(&cell).ok_or(format!("{cell} indexed without owner"))?;
            for axis in self.axes.iter() {
                let id = slots[axis.id].ok_or(format!("{cell} has no strike on axis {}", axis.id))?;
                let s = self.strikes[id];
                if !s.is_live() {
                    return Err(format!("{cell} points at tombstone {id}"));
                }
                if s.player != *owner || s.axis != axis || !s.contains(cell) {
                    return Err(format!("{cell} points at foreign strike {s:?}"));
                }
                members[id] += 1;
            }
        }

        for (id, s) in self.strikes.iter().enumerate() {
            let freed = self.free.contains(&id);
            if freed == s.is_live() {
                return Err(format!("strike {id} live={} but freed={freed}", s.is_live()));
            }
            if !s.is_live() {
                continue;
            }
            if members[id] != s.len {
                return Err(format!("strike {id} has len {} but {} members", s.len, members[id]));
            }

            let step = s.axis.step;
            // Maximality on both ends
            for (edge, extendable) in [(s.start - step, s.extendable_before), (s.end() + step, s.extendable_after)] {
                let neighbour = self.owners.get(&edge).copied();
                if neighbour == Some(s.player) {
                    return Err(format!("strike {id} is not maximal at {edge}"));
                }
                if extendable != (neighbour != Some(s.player.other())) {
                    return Err(format!("strike {id} has wrong extendable flag at {edge}"));
                }
            }
        }

        Ok(())
    }
}

/// Two sets are equal when they index the same cells to the same live
/// strikes; tombstones and free-list order are ignored.
impl PartialEq for StrikeSet {
    fn eq(&self, other: &Self) -> bool {
        if self.axes != other.axes || self.owners != other.owners || self.cells != other.cells {
            return false;
        }

        let live = |set: &StrikeSet, id: usize| set.strikes.get(id).filter(|s| s.is_live()).copied();
        let n = self.strikes.len().max(other.strikes.len());
        (0..n).all(|id| live(self, id) == live(other, id))
    }
}

impl Eq for StrikeSet {}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(x: i32, y: i32) -> Offset {
        Offset::new(x, y)
    }

    #[test]
    fn test_vacant_sentinel() {
        let set = StrikeSet::new();
        for strike in set.strikes_through(at(3, 3)) {
            assert!(!strike.is_live());
            assert_eq!(strike.start, at(3, 3));
        }
    }

    #[test]
    fn test_strike_cells_and_end() {
        let strike = Strike {
            player: Player::P2,
            start: at(0, 0),
            axis: Axis::UP_RIGHT,
            len: 3,
            extendable_before: true,
            extendable_after: false,
        };
        let cells: Vec<_> = strike.cells().collect();
        assert_eq!(cells, vec![at(0, 0), at(1, -1), at(2, -2)]);
        assert_eq!(strike.end(), at(2, -2));
        assert_eq!(strike.extensions(), 1);
        assert_eq!(strike.offset_of(at(1, -1)), Some(1));
        assert_eq!(strike.offset_of(at(3, -3)), None);
        assert_eq!(strike.offset_of(at(-1, 1)), None);
    }

    #[test]
    fn test_slot_reused_after_release() {
        let mut set = StrikeSet::new();
        set.insert(at(0, 0), Player::P1).unwrap();
        assert_eq!(set.strikes.len(), 4);
        let first = set.strikes();

        set.remove(at(0, 0)).unwrap();
        assert_eq!(set.len(), 0);
        assert_eq!(set.free.len(), 4);

        set.insert(at(0, 0), Player::P1).unwrap();
        assert_eq!(set.strikes.len(), 4);
        assert!(set.free.is_empty());
        assert_eq!(set.strikes(), first);
        set.check_invariants().unwrap();
    }

    #[test]
    fn test_merge_frees_after_slot() {
        let mut set = StrikeSet::new();
        set.insert(at(0, 0), Player::P1).unwrap();
        set.insert(at(2, 0), Player::P1).unwrap();
        let kept = set.cells[&at(0, 0)][Axis::RIGHT.id].unwrap();
        let absorbed = set.cells[&at(2, 0)][Axis::RIGHT.id].unwrap();
        let gone = set.strikes[absorbed];

        // The freed slot may be reused right away by a later axis of the
        // same insert
        set.insert(at(1, 0), Player::P1).unwrap();
        assert!(!set.strikes().contains(&gone));
        assert!(set.strikes[absorbed].axis != Axis::RIGHT || !set.strikes[absorbed].is_live());

        for x in 0..3 {
            assert_eq!(set.cells[&at(x, 0)][Axis::RIGHT.id], Some(kept));
        }
        assert_eq!(set.strikes[kept].len, 3);
        assert_eq!(set.len(), 10);
        set.check_invariants().unwrap();
    }

    #[test]
    fn test_vacant_sentinel_is_owned_by_nobody() {
        let mut set = StrikeSet::new();
        set.insert(at(0, 0), Player::P2).unwrap();

        for strike in set.strikes_through(at(5, 5)) {
            assert!(!strike.is_live());
            assert!(!strike.is_owned_by(Player::P1));
            assert!(!strike.is_owned_by(Player::P2));
        }
        assert!(set.strikes_through(at(0, 0)).iter().all(|s| s.is_owned_by(Player::P2)));
    }

    #[test]
    fn test_equality_ignores_tombstones() {
        let empty = StrikeSet::new();
        let mut set = StrikeSet::new();
        set.insert(at(1, 2), Player::P2).unwrap();
        assert_ne!(set, empty);
        set.remove(at(1, 2)).unwrap();
        assert_eq!(set, empty);
    }
}
