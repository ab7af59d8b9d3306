use super::super::domain::RfmScore;
use super::thresholds::QuantileThresholds;

/// Day count standing in for "no qualifying order in the window".
pub const NO_ORDER_DAYS: i64 = 999;

/// Fixed freshness rubric; does not depend on the population.
pub fn recency_score(days_since_last_order: i64) -> RfmScore {
    let rank = if days_since_last_order <= 7 {
        5
    } else if days_since_last_order <= 30 {
        4
    } else if days_since_last_order <= 60 {
        3
    } else if days_since_last_order <= 90 {
        2
    } else {
        1
    };
    RfmScore::from_rank(rank)
}

/// Compares against the highest breakpoint first, so a value sitting exactly
/// on a breakpoint takes the higher score.
pub fn quantile_score<T: PartialOrd>(value: &T, thresholds: &QuantileThresholds<T>) -> RfmScore {
    let rank = if *value >= thresholds.q4 {
        5
    } else if *value >= thresholds.q3 {
        4
    } else if *value >= thresholds.q2 {
        3
    } else if *value >= thresholds.q1 {
        2
    } else {
        1
    };
    RfmScore::from_rank(rank)
}
