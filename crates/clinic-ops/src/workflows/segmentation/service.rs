use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::{debug, info, warn};

use super::activity::{ActivityWindow, CustomerActivitySource};
use super::domain::{Segment, SegmentDistribution, TenantId};
use super::report::{generate_insights, AnalysisResult, RfmCustomer, SegmentationSummary};
use super::scoring::{classify, RfmScorer};

pub const DEFAULT_LOOKBACK_DAYS: u32 = 365;

/// Longest lookback accepted from configuration and request parameters.
pub const MAX_LOOKBACK_DAYS: u32 = 36_500;

/// Facade composing the activity source, scorer, classifier and insight rubric.
///
/// Holds no per-run state: every call reads the source once and recomputes
/// thresholds from that population.
pub struct SegmentationService<S> {
    source: Arc<S>,
    default_lookback_days: u32,
}

impl<S> SegmentationService<S>
where
    S: CustomerActivitySource + 'static,
{
    pub fn new(source: Arc<S>) -> Self {
        Self::with_default_lookback(source, DEFAULT_LOOKBACK_DAYS)
    }

    pub fn with_default_lookback(source: Arc<S>, default_lookback_days: u32) -> Self {
        Self {
            source,
            default_lookback_days,
        }
    }

    pub fn default_lookback_days(&self) -> u32 {
        self.default_lookback_days
    }

    /// Run a full analysis for `tenant_id` (or every tenant) as of now.
    pub fn analyze(
        &self,
        tenant_id: Option<TenantId>,
        lookback_days: Option<u32>,
    ) -> AnalysisResult {
        self.analyze_as_of(tenant_id, lookback_days, Utc::now())
    }

    /// Run a full analysis with an explicit evaluation instant.
    pub fn analyze_as_of(
        &self,
        tenant_id: Option<TenantId>,
        lookback_days: Option<u32>,
        now: DateTime<Utc>,
    ) -> AnalysisResult {
        let lookback_days = lookback_days.unwrap_or(self.default_lookback_days);
        let window = ActivityWindow::lookback(now, lookback_days);

        let population = match self
            .source
            .fetch_customer_order_stats(tenant_id.as_ref(), &window)
        {
            Ok(rows) => rows,
            Err(err) => {
                warn!(
                    tenant = ?tenant_id,
                    error = %err,
                    "customer activity unavailable; returning empty analysis"
                );
                return AnalysisResult::unavailable(now, tenant_id, lookback_days);
            }
        };

        let scorer = RfmScorer::from_population(&population);
        debug!(
            frequency = ?scorer.frequency_thresholds().as_array(),
            monetary = ?scorer.monetary_thresholds().as_array(),
            "derived quantile thresholds"
        );

        let mut distribution = SegmentDistribution::zeroed();
        let mut customers: Vec<RfmCustomer> = population
            .into_iter()
            .map(|activity| {
                let scores = scorer.score(&activity, now);
                let segment = classify(&scores);
                distribution.record(segment);
                RfmCustomer::new(activity, scores, segment)
            })
            .collect();

        let insights = generate_insights(&customers, &distribution);
        // Stable, so equal totals keep the source's row order.
        customers.sort_by(|a, b| b.total_score.cmp(&a.total_score));

        info!(
            tenant = ?tenant_id,
            lookback_days,
            customers = customers.len(),
            insights = insights.len(),
            "customer segmentation analysis complete"
        );

        AnalysisResult {
            success: true,
            analyzed_at: now,
            tenant_id,
            lookback_days,
            total_customers: customers.len(),
            segment_distribution: distribution,
            customers,
            insights,
        }
    }

    /// Customers currently in `segment`, using the default lookback window.
    pub fn customers_by_segment(
        &self,
        segment: Segment,
        tenant_id: Option<TenantId>,
    ) -> Vec<RfmCustomer> {
        self.customers_by_segment_as_of(segment, tenant_id, Utc::now())
    }

    pub fn customers_by_segment_as_of(
        &self,
        segment: Segment,
        tenant_id: Option<TenantId>,
        now: DateTime<Utc>,
    ) -> Vec<RfmCustomer> {
        let result = self.analyze_as_of(tenant_id, None, now);
        result.customers_in(segment).cloned().collect()
    }

    /// Leaderboard and follow-up priorities over the default lookback window.
    pub fn summary(&self, tenant_id: Option<TenantId>) -> SegmentationSummary {
        self.summary_as_of(tenant_id, Utc::now())
    }

    pub fn summary_as_of(
        &self,
        tenant_id: Option<TenantId>,
        now: DateTime<Utc>,
    ) -> SegmentationSummary {
        self.analyze_as_of(tenant_id, None, now).summary()
    }
}
