//! Win condition checking
//!
//! Victory is read straight off the [`StrikeSet`]: after a mark, the only
//! strikes that can have reached the victory length are the four through
//! the marked cell.

use crate::board::{Offset, Player};
use crate::strike::{Strike, StrikeSet};

/// The first strike through `pos` at least `victory_length` long.
#[inline]
pub fn winning_strike(strikes: &StrikeSet, pos: Offset, victory_length: u32) -> Option<Strike> {
    strikes
        .strikes_through(pos)
        .into_iter()
        .find(|s| s.is_live() && s.len >= victory_length)
}

/// Whether marking the empty cell `pos` would give `player` a strike of at
/// least `victory_length`, judged from the strikes bordering it. No
/// allocation and no mutation.
#[inline]
pub fn completes_strike(strikes: &StrikeSet, pos: Offset, player: Player, victory_length: u32) -> bool {
    strikes.owner(pos).is_none()
        && strikes.axes().iter().any(|axis| {
            let side = |cell: Offset| {
                strikes
                    .strike_at(cell, axis)
                    .filter(|s| s.player == player)
                    .map_or(0, |s| s.len)
            };
            1 + side(pos - axis.step) + side(pos + axis.step) >= victory_length
        })
}

/// Remembers the strike that ended the game.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VictoryChecker {
    victory_length: u32,
    strike: Option<Vec<Offset>>,
    player: Option<Player>,
}

impl VictoryChecker {
    pub fn new(victory_length: u32) -> Self {
        Self {
            victory_length,
            strike: None,
            player: None,
        }
    }

    #[inline]
    pub fn victory_length(&self) -> u32 {
        self.victory_length
    }

    /// Check the strikes through `pos`, recording the first winning one.
    pub fn check_at(&mut self, strikes: &StrikeSet, pos: Offset) -> bool {
        match winning_strike(strikes, pos, self.victory_length) {
            Some(strike) => {
                self.strike = Some(strike.cells().collect());
                self.player = Some(strike.player);
                true
            }
            None => false,
        }
    }

    #[inline]
    pub fn reached(&self) -> bool {
        self.strike.is_some()
    }

    /// Cells of the winning strike, from its start
    pub fn victorious_strike(&self) -> Option<&[Offset]> {
        self.strike.as_deref()
    }

    #[inline]
    pub fn victorious_player(&self) -> Option<Player> {
        self.player
    }

    pub fn reset(&mut self) {
        self.strike = None;
        self.player = None;
    }

    /// Cells of `player`'s strikes touching `pos` from either side on each
    /// axis. Marking `pos` would join all of them.
    pub fn candidates_around_for(&self, strikes: &StrikeSet, pos: Offset, player: Player) -> Vec<Offset> {
        let mut candidates = Vec::new();
        for axis in strikes.axes().iter() {
            for neighbour in [pos + axis.step, pos - axis.step] {
                if let Some(strike) = strikes.strike_at(neighbour, axis) {
                    if strike.is_owned_by(player) {
                        candidates.extend(strike.cells());
                    }
                }
            }
        }
        candidates
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(x: i32, y: i32) -> Offset {
        Offset::new(x, y)
    }

    fn strikes_with(cells: &[(i32, i32)], player: Player) -> StrikeSet {
        let mut set = StrikeSet::new();
        for &(x, y) in cells {
            set.insert(at(x, y), player).unwrap();
        }
        set
    }

    #[test]
    fn test_exact_length_wins() {
        let set = strikes_with(&[(0, 0), (1, 1), (2, 2), (3, 3), (4, 4)], Player::P2);
        let mut checker = VictoryChecker::new(5);

        assert!(checker.check_at(&set, at(2, 2)));
        assert!(checker.reached());
        assert_eq!(checker.victorious_player(), Some(Player::P2));
        assert_eq!(
            checker.victorious_strike(),
            Some(&[at(0, 0), at(1, 1), at(2, 2), at(3, 3), at(4, 4)][..])
        );
    }

    #[test]
    fn test_one_short_does_not_win() {
        let set = strikes_with(&[(0, 0), (0, 1), (0, 2), (0, 3)], Player::P1);
        let mut checker = VictoryChecker::new(5);

        assert!(!checker.check_at(&set, at(0, 3)));
        assert!(!checker.reached());
        assert_eq!(checker.victorious_strike(), None);
        assert_eq!(winning_strike(&set, at(0, 3), 5), None);
        assert!(winning_strike(&set, at(0, 3), 4).is_some());
    }

    #[test]
    fn test_overline_wins() {
        let set = strikes_with(&[(0, 0), (1, 0), (2, 0), (3, 0)], Player::P1);
        let strike = winning_strike(&set, at(1, 0), 3).unwrap();
        assert_eq!(strike.len, 4);
    }

    #[test]
    fn test_unoccupied_cell_never_wins() {
        let set = StrikeSet::new();
        let mut checker = VictoryChecker::new(1);
        assert!(!checker.check_at(&set, at(0, 0)));
    }

    #[test]
    fn test_completes_strike_across_gap() {
        let set = strikes_with(&[(0, 0), (1, 0), (3, 0)], Player::P1);
        assert!(completes_strike(&set, at(2, 0), Player::P1, 4));
        assert!(!completes_strike(&set, at(2, 0), Player::P1, 5));
        assert!(!completes_strike(&set, at(2, 0), Player::P2, 2));
        // Occupied cells never complete anything
        assert!(!completes_strike(&set, at(1, 0), Player::P1, 2));
    }

    #[test]
    fn test_reset() {
        let set = strikes_with(&[(0, 0), (1, 0)], Player::P1);
        let mut checker = VictoryChecker::new(2);
        assert!(checker.check_at(&set, at(0, 0)));

        checker.reset();
        assert!(!checker.reached());
        assert_eq!(checker.victorious_player(), None);
        assert_eq!(checker.victory_length(), 2);
    }

    #[test]
    fn test_candidates_around() {
        let mut set = strikes_with(&[(1, 0), (2, 0), (-1, 0), (0, 1)], Player::P1);
        set.insert(at(1, 1), Player::P2).unwrap();
        let checker = VictoryChecker::new(5);

        let mut mine = checker.candidates_around_for(&set, at(0, 0), Player::P1);
        mine.sort();
        assert_eq!(mine, vec![at(-1, 0), at(0, 1), at(1, 0), at(2, 0)]);

        let theirs = checker.candidates_around_for(&set, at(0, 0), Player::P2);
        assert_eq!(theirs, vec![at(1, 1)]);
    }
}
