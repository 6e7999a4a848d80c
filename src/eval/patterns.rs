//! Strike weights for position ranking

use super::rank::RankMetric;

/// Score constants for ranking
pub struct RankScore;

impl RankScore {
    /// A completed strike
    pub const WIN: i64 = 1_000_000_000;
    /// An open strike one cell short of the victory length
    pub const NEAR_WIN: i64 = 10_000_000;
    /// Each missing cell divides the weight by this much
    pub const GROWTH: i64 = 8;
    /// A strike with a single open end is worth this fraction of an open one
    pub const CLOSED_DIVISOR: i64 = 4;
}

/// Weight of one strike with the given metric.
///
/// Grows geometrically with length; open ends double-count through
/// [`RankScore::CLOSED_DIVISOR`]. Dead strikes weigh nothing.
pub fn metric_weight(metric: RankMetric, victory_length: u32) -> i64 {
    if metric.length >= victory_length {
        return RankScore::WIN;
    }
    if metric.extensions == 0 {
        return 0;
    }

    let missing = victory_length - metric.length;
    let open = RankScore::GROWTH
        .checked_pow(missing - 1)
        .map_or(0, |d| RankScore::NEAR_WIN / d)
        .max(1);

    if metric.extensions >= 2 {
        open
    } else {
        (open / RankScore::CLOSED_DIVISOR).max(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn m(length: u32, extensions: u32) -> RankMetric {
        RankMetric { length, extensions }
    }

    #[test]
    fn test_weight_hierarchy() {
        assert_eq!(metric_weight(m(6, 0), 6), RankScore::WIN);
        assert_eq!(metric_weight(m(7, 2), 6), RankScore::WIN);
        assert!(metric_weight(m(5, 2), 6) > metric_weight(m(5, 1), 6));
        assert!(metric_weight(m(5, 1), 6) > metric_weight(m(4, 2), 6));
        assert!(metric_weight(m(4, 2), 6) > metric_weight(m(3, 2), 6));
        assert!(metric_weight(m(2, 1), 6) > 0);
        assert!(metric_weight(m(5, 2), 6) < RankScore::WIN);
    }

    #[test]
    fn test_dead_strike_is_worthless() {
        assert_eq!(metric_weight(m(5, 0), 6), 0);
        assert_eq!(metric_weight(m(1, 0), 6), 0);
    }

    #[test]
    fn test_long_victory_length_stays_positive() {
        assert_eq!(metric_weight(m(1, 2), 40), 1);
        assert_eq!(metric_weight(m(1, 1), 40), 1);
    }
}
