//! Per-player strike statistics

use rustc_hash::FxHashMap;

use crate::board::{Board, Player};
use crate::strike::StrikeSet;

use super::patterns::metric_weight;

/// Strike shape used as a ranking feature
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RankMetric {
    pub length: u32,
    /// Number of extendable ends (0..=2)
    pub extensions: u32,
}

/// Strike counts per metric for both players
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BoardRank {
    counts: [FxHashMap<RankMetric, u32>; 2],
}

impl BoardRank {
    /// Tally the live strikes of a set.
    ///
    /// Strikes at or over `victory_length` are counted at the victory length
    /// whatever their ends; shorter strikes with no open end are skipped.
    pub fn from_strikes(strikes: &StrikeSet, victory_length: u32) -> Self {
        let mut rank = Self::default();
        for strike in strikes.iter() {
            let metric = RankMetric {
                length: strike.len.min(victory_length),
                extensions: strike.extensions(),
            };
            if metric.length < victory_length && metric.extensions == 0 {
                continue;
            }
            *rank.counts[strike.player.index()].entry(metric).or_default() += 1;
        }
        rank
    }

    /// Number of `player`'s strikes with the given metric
    pub fn count(&self, player: Player, metric: RankMetric) -> u32 {
        self.counts[player.index()].get(&metric).copied().unwrap_or(0)
    }

    pub fn metrics(&self, player: Player) -> &FxHashMap<RankMetric, u32> {
        &self.counts[player.index()]
    }

    /// Score from `player`'s point of view: own weight minus opponent's.
    pub fn score_for(&self, player: Player, victory_length: u32) -> i64 {
        self.side_score(player, victory_length) - self.side_score(player.other(), victory_length)
    }

    fn side_score(&self, player: Player, victory_length: u32) -> i64 {
        self.counts[player.index()]
            .iter()
            .map(|(&metric, &n)| metric_weight(metric, victory_length).saturating_mul(i64::from(n)))
            .fold(0i64, i64::saturating_add)
    }
}

/// Evaluate the board from the perspective of `player`.
#[must_use]
pub fn evaluate(board: &Board, player: Player, victory_length: u32) -> i64 {
    BoardRank::from_strikes(board.strikes(), victory_length).score_for(player, victory_length)
}
