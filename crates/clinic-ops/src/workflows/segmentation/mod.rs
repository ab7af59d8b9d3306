//! Customer lifecycle segmentation (RFM analysis).
//!
//! Order history is aggregated per customer, scored on recency, frequency and
//! monetary value against thresholds derived from the same population, and
//! classified into one of ten lifecycle segments.

pub mod activity;
pub mod domain;
pub mod ledger;
pub mod report;
pub mod router;
pub mod scoring;
pub mod service;

#[cfg(test)]
mod tests;

pub use activity::{
    ActivitySourceError, ActivityWindow, CustomerActivity, CustomerActivitySource,
};
pub use domain::{
    CustomerId, RfmScore, RfmScores, Segment, SegmentDistribution, SegmentParseError, TenantId,
    UrgencyTier,
};
pub use ledger::{InMemoryCustomerLedger, LedgerImportError, LedgerImporter};
pub use report::{
    ActionPriorityEntry, AnalysisResult, Insight, InsightKind, RfmCustomer, SegmentationSummary,
    TopSegmentEntry,
};
pub use router::segmentation_router;
pub use service::{SegmentationService, DEFAULT_LOOKBACK_DAYS, MAX_LOOKBACK_DAYS};
