mod insights;
mod summary;
pub mod views;

pub(crate) use insights::generate_insights;
pub use views::{
    ActionPriorityEntry, AnalysisResult, Insight, InsightKind, RfmCustomer, SegmentationSummary,
    TopSegmentEntry,
};
