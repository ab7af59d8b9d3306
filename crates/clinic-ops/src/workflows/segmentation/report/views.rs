use super::super::activity::CustomerActivity;
use super::super::domain::{
    RfmScore, RfmScores, Segment, SegmentDistribution, TenantId, UrgencyTier,
};
use chrono::{DateTime, Utc};
use serde::Serialize;

/// Fully scored customer as returned to callers.
#[derive(Debug, Clone, Serialize)]
pub struct RfmCustomer {
    #[serde(flatten)]
    pub activity: CustomerActivity,
    pub recency_score: RfmScore,
    pub frequency_score: RfmScore,
    pub monetary_score: RfmScore,
    pub rfm_score: String,
    pub total_score: u8,
    pub segment: Segment,
    pub segment_label: &'static str,
    pub recommended_action: &'static str,
}

impl RfmCustomer {
    pub fn new(activity: CustomerActivity, scores: RfmScores, segment: Segment) -> Self {
        Self {
            activity,
            recency_score: scores.recency,
            frequency_score: scores.frequency,
            monetary_score: scores.monetary,
            rfm_score: scores.code(),
            total_score: scores.total(),
            segment,
            segment_label: segment.label(),
            recommended_action: segment.recommended_action(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum InsightKind {
    Champions,
    AtRisk,
    Dormant,
    NewCustomers,
}

#[derive(Debug, Clone, Serialize)]
pub struct Insight {
    pub kind: InsightKind,
    pub title: &'static str,
    pub description: String,
    pub action_items: Vec<&'static str>,
}

#[derive(Debug, Clone, Serialize)]
pub struct AnalysisResult {
    pub success: bool,
    pub analyzed_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tenant_id: Option<TenantId>,
    pub lookback_days: u32,
    pub total_customers: usize,
    pub segment_distribution: SegmentDistribution,
    pub customers: Vec<RfmCustomer>,
    pub insights: Vec<Insight>,
}

impl AnalysisResult {
    /// Result returned when the activity source could not be read.
    pub fn unavailable(
        analyzed_at: DateTime<Utc>,
        tenant_id: Option<TenantId>,
        lookback_days: u32,
    ) -> Self {
        Self {
            success: false,
            analyzed_at,
            tenant_id,
            lookback_days,
            total_customers: 0,
            segment_distribution: SegmentDistribution::zeroed(),
            customers: Vec::new(),
            insights: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct TopSegmentEntry {
    pub segment: Segment,
    pub label: &'static str,
    pub count: usize,
    pub percentage: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct ActionPriorityEntry {
    pub segment: Segment,
    pub label: &'static str,
    pub count: usize,
    pub urgency: UrgencyTier,
}

#[derive(Debug, Clone, Serialize)]
pub struct SegmentationSummary {
    pub success: bool,
    pub total_customers: usize,
    pub segment_distribution: SegmentDistribution,
    pub top_segments: Vec<TopSegmentEntry>,
    pub action_priority: Vec<ActionPriorityEntry>,
}
