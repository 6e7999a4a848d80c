//! Position ranking for connect-N
//!
//! A position is ranked by counting each player's strikes by length and
//! number of open ends, then weighting the counts. The evaluation is
//! symmetric, as negamax requires.

pub mod patterns;
pub mod rank;

pub use patterns::{metric_weight, RankScore};
pub use rank::{evaluate, BoardRank, RankMetric};
