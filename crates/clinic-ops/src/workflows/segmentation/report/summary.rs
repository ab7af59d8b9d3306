use super::super::domain::Segment;
use super::insights::format_percentage;
use super::views::{
    ActionPriorityEntry, AnalysisResult, RfmCustomer, SegmentationSummary, TopSegmentEntry,
};

const TOP_SEGMENT_LIMIT: usize = 5;

impl AnalysisResult {
    pub fn summary(&self) -> SegmentationSummary {
        let total = self.total_customers;

        let mut top_segments: Vec<TopSegmentEntry> = self
            .segment_distribution
            .iter()
            .map(|(segment, count)| TopSegmentEntry {
                segment,
                label: segment.label(),
                count,
                percentage: format!("{}%", format_percentage(count, total)),
            })
            .collect();
        // Stable: equal counts keep canonical segment order.
        top_segments.sort_by(|a, b| b.count.cmp(&a.count));
        top_segments.truncate(TOP_SEGMENT_LIMIT);

        let mut action_priority: Vec<ActionPriorityEntry> = self
            .segment_distribution
            .iter()
            .filter(|(_, count)| *count > 0)
            .map(|(segment, count)| ActionPriorityEntry {
                segment,
                label: segment.label(),
                count,
                urgency: segment.urgency(),
            })
            .collect();
        action_priority.sort_by_key(|entry| entry.urgency);

        SegmentationSummary {
            success: self.success,
            total_customers: total,
            segment_distribution: self.segment_distribution.clone(),
            top_segments,
            action_priority,
        }
    }

    pub fn customers_in(&self, segment: Segment) -> impl Iterator<Item = &RfmCustomer> + '_ {
        self.customers
            .iter()
            .filter(move |customer| customer.segment == segment)
    }
}
