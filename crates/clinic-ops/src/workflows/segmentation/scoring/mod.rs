mod classifier;
mod rules;
mod thresholds;

pub use classifier::{classify, SEGMENT_RULES};
pub use rules::{quantile_score, recency_score, NO_ORDER_DAYS};
pub use thresholds::QuantileThresholds;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

use super::activity::CustomerActivity;
use super::domain::RfmScores;

/// Scores customers against thresholds derived from one run's population.
///
/// Built fresh for every analysis; never reuse a scorer across runs.
#[derive(Debug, Clone)]
pub struct RfmScorer {
    frequency: QuantileThresholds<u32>,
    monetary: QuantileThresholds<Decimal>,
}

impl RfmScorer {
    pub fn from_population(population: &[CustomerActivity]) -> Self {
        let frequency =
            QuantileThresholds::from_values(population.iter().map(|row| row.order_count).collect());
        let monetary =
            QuantileThresholds::from_values(population.iter().map(|row| row.total_spent).collect());

        Self {
            frequency,
            monetary,
        }
    }

    pub fn frequency_thresholds(&self) -> &QuantileThresholds<u32> {
        &self.frequency
    }

    pub fn monetary_thresholds(&self) -> &QuantileThresholds<Decimal> {
        &self.monetary
    }

    pub fn score(&self, activity: &CustomerActivity, now: DateTime<Utc>) -> RfmScores {
        let days = activity
            .days_since_last_order(now)
            .unwrap_or(NO_ORDER_DAYS);

        RfmScores::new(
            recency_score(days),
            quantile_score(&activity.order_count, &self.frequency),
            quantile_score(&activity.total_spent, &self.monetary),
        )
    }
}
