use super::common::*;
use crate::workflows::segmentation::domain::{CustomerId, Segment, TenantId, UrgencyTier};
use crate::workflows::segmentation::{ActivityWindow, SegmentationService};
use chrono::Duration;
use std::sync::Arc;

fn segment_of(result: &crate::workflows::segmentation::AnalysisResult, id: u64) -> Segment {
    result
        .customers
        .iter()
        .find(|customer| customer.activity.customer_id == CustomerId(id))
        .map(|customer| customer.segment)
        .expect("customer present")
}

#[test]
fn scenario_population_scores_and_segments() {
    let (service, _) = service_with(scenario_population());
    let result = service.analyze_as_of(None, None, now());

    assert!(result.success);
    assert_eq!(result.total_customers, 4);

    let codes: Vec<_> = result
        .customers
        .iter()
        .map(|customer| {
            (
                customer.activity.customer_id.0,
                customer.rfm_score.as_str(),
                customer.segment,
            )
        })
        .collect();
    assert_eq!(
        codes,
        vec![
            (4, "5-5-5", Segment::Champions),
            (3, "5-3-3", Segment::Potential),
            (2, "5-2-2", Segment::New),
            (1, "1-1-1", Segment::Hibernating),
        ]
    );
    assert_eq!(result.customers[0].total_score, 15);
    assert_eq!(result.customers[3].total_score, 3);
}

#[test]
fn distribution_partitions_the_population() {
    let (service, _) = service_with(scenario_population());
    let result = service.analyze_as_of(None, None, now());

    assert_eq!(result.segment_distribution.total(), result.total_customers);
    assert_eq!(result.segment_distribution.count(Segment::Champions), 1);
    assert_eq!(result.segment_distribution.count(Segment::Lost), 0);
    assert_eq!(result.segment_distribution.iter().count(), 10);
}

#[test]
fn scores_stay_within_range() {
    let rows = (0..40)
        .map(|id| {
            let days = if id % 7 == 0 { None } else { Some((id * 13) % 200) };
            activity(id as u64, (id * 3 % 11) as u32, (id * 977 % 12_000) as i64, days)
        })
        .collect();
    let (service, _) = service_with(rows);
    let result = service.analyze_as_of(None, None, now());

    for customer in &result.customers {
        for score in [customer.recency_score, customer.frequency_score, customer.monetary_score] {
            assert!((1..=5).contains(&score.get()));
        }
        assert!((3..=15).contains(&customer.total_score));
    }
}

#[test]
fn repeated_runs_are_identical() {
    let (service, _) = service_with(scenario_population());
    let first = service.analyze_as_of(None, None, now());
    let second = service.analyze_as_of(None, None, now());

    let project = |result: &crate::workflows::segmentation::AnalysisResult| {
        result
            .customers
            .iter()
            .map(|customer| {
                (
                    customer.activity.customer_id,
                    customer.rfm_score.clone(),
                    customer.segment,
                )
            })
            .collect::<Vec<_>>()
    };
    assert_eq!(project(&first), project(&second));
}

#[test]
fn equal_totals_keep_source_order() {
    let rows = vec![
        activity(30, 2, 100, Some(10)),
        activity(10, 2, 100, Some(10)),
        activity(20, 2, 100, Some(10)),
    ];
    let (service, _) = service_with(rows);
    let result = service.analyze_as_of(None, None, now());
    let ids: Vec<_> = result
        .customers
        .iter()
        .map(|customer| customer.activity.customer_id.0)
        .collect();
    assert_eq!(ids, vec![30, 10, 20]);
}

#[test]
fn empty_population_is_a_successful_empty_report() {
    let (service, _) = service_with(Vec::new());
    let result = service.analyze_as_of(Some(TenantId(9)), None, now());

    assert!(result.success);
    assert_eq!(result.total_customers, 0);
    assert_eq!(result.segment_distribution.total(), 0);
    assert!(result.customers.is_empty());
    assert!(result.insights.is_empty());
}

#[test]
fn unavailable_source_degrades_to_failure_result() {
    let service = SegmentationService::new(Arc::new(UnavailableSource));
    let result = service.analyze_as_of(Some(TenantId(1)), Some(90), now());

    assert!(!result.success);
    assert_eq!(result.total_customers, 0);
    assert_eq!(result.lookback_days, 90);
    assert_eq!(result.segment_distribution.iter().count(), 10);
    assert_eq!(result.segment_distribution.total(), 0);
    assert!(result.customers.is_empty());
    assert!(result.insights.is_empty());

    let summary = service.summary_as_of(None, now());
    assert!(!summary.success);
    assert!(summary.action_priority.is_empty());
}

#[test]
fn lookback_window_is_passed_to_the_source() {
    let (service, source) = service_with(scenario_population());
    service.analyze_as_of(Some(TenantId(1)), Some(30), now());
    service.analyze_as_of(None, None, now());

    let requests = source.requests.lock().expect("requests mutex poisoned");
    assert_eq!(
        requests[0],
        (Some(TenantId(1)), ActivityWindow::lookback(now(), 30))
    );
    assert_eq!(requests[1].1.since, now() - Duration::days(365));
}

#[test]
fn oversized_lookback_covers_all_history_without_failing() {
    let (service, source) = service_with(scenario_population());
    let result = service.analyze_as_of(None, Some(200_000_000), now());

    assert!(result.success);
    assert_eq!(result.total_customers, 4);
    assert_eq!(result.lookback_days, 200_000_000);
    let requests = source.requests.lock().expect("requests mutex poisoned");
    assert_eq!(requests[0].1.since, chrono::DateTime::<chrono::Utc>::MIN_UTC);
    drop(requests);

    let result = service.analyze_as_of(None, Some(u32::MAX), now());
    assert!(result.success);
}

#[test]
fn configured_default_lookback_applies_when_omitted() {
    let source = Arc::new(StaticSource::new(Vec::new()));
    let service = SegmentationService::with_default_lookback(source.clone(), 120);
    let result = service.analyze_as_of(None, None, now());
    assert_eq!(result.lookback_days, 120);
    let requests = source.requests.lock().expect("requests mutex poisoned");
    assert_eq!(requests[0].1.since, now() - Duration::days(120));
}

#[test]
fn ledger_backed_analysis_per_tenant() {
    let service = SegmentationService::new(Arc::new(clinic_ledger()));
    let result = service.analyze_as_of(Some(TenantId(1)), None, now());

    assert_eq!(result.total_customers, 4);
    assert_eq!(segment_of(&result, 101), Segment::Champions);
    assert_eq!(segment_of(&result, 102), Segment::New);
    assert_eq!(segment_of(&result, 103), Segment::AtRisk);
    assert_eq!(segment_of(&result, 104), Segment::Hibernating);

    let ids: Vec<_> = result
        .customers
        .iter()
        .map(|customer| customer.activity.customer_id.0)
        .collect();
    assert_eq!(ids, vec![101, 102, 103, 104]);
}

#[test]
fn thresholds_follow_the_population_in_scope() {
    let service = SegmentationService::new(Arc::new(clinic_ledger()));

    let tenant = service.analyze_as_of(Some(TenantId(1)), None, now());
    let everyone = service.analyze_as_of(None, None, now());

    let amy_tenant = tenant
        .customers
        .iter()
        .find(|customer| customer.activity.customer_id == CustomerId(101))
        .expect("amy present");
    let amy_all = everyone
        .customers
        .iter()
        .find(|customer| customer.activity.customer_id == CustomerId(101))
        .expect("amy present");

    assert_eq!(amy_tenant.rfm_score, "5-5-5");
    assert_eq!(amy_all.rfm_score, "5-5-4");
    assert_eq!(segment_of(&everyone, 201), Segment::Champions);
    assert_eq!(segment_of(&everyone, 202), Segment::Hibernating);
}

#[test]
fn shorter_window_rescores_customers() {
    let service = SegmentationService::new(Arc::new(clinic_ledger()));
    let result = service.analyze_as_of(Some(TenantId(1)), Some(30), now());

    assert_eq!(segment_of(&result, 101), Segment::Champions);
    assert_eq!(segment_of(&result, 102), Segment::Potential);
    assert_eq!(segment_of(&result, 103), Segment::Hibernating);

    let cora = result
        .customers
        .iter()
        .find(|customer| customer.activity.customer_id == CustomerId(103))
        .expect("cora present");
    assert_eq!(cora.activity.order_count, 0);
    assert!(cora.activity.last_order_at.is_none());
    assert_eq!(cora.rfm_score, "1-2-2");
}

#[test]
fn customers_by_segment_filters_a_fresh_run() {
    let service = SegmentationService::new(Arc::new(clinic_ledger()));
    let at_risk = service.customers_by_segment_as_of(Segment::AtRisk, Some(TenantId(1)), now());
    assert_eq!(at_risk.len(), 1);
    assert_eq!(at_risk[0].activity.customer_name, "Cora Lin");

    let lost = service.customers_by_segment_as_of(Segment::Lost, None, now());
    assert!(lost.is_empty());
}

#[test]
fn summary_ranks_segments_and_priorities() {
    let (service, _) = service_with(scenario_population());
    let summary = service.summary_as_of(None, now());

    assert!(summary.success);
    assert_eq!(summary.total_customers, 4);

    let top: Vec<_> = summary
        .top_segments
        .iter()
        .map(|entry| (entry.segment, entry.count, entry.percentage.as_str()))
        .collect();
    assert_eq!(
        top,
        vec![
            (Segment::Champions, 1, "25.0%"),
            (Segment::Potential, 1, "25.0%"),
            (Segment::New, 1, "25.0%"),
            (Segment::Hibernating, 1, "25.0%"),
            (Segment::Loyal, 0, "0.0%"),
        ]
    );

    let priority: Vec<_> = summary
        .action_priority
        .iter()
        .map(|entry| (entry.segment, entry.urgency))
        .collect();
    assert_eq!(
        priority,
        vec![
            (Segment::New, UrgencyTier::Medium),
            (Segment::Hibernating, UrgencyTier::Medium),
            (Segment::Champions, UrgencyTier::Low),
            (Segment::Potential, UrgencyTier::Low),
        ]
    );
}

#[test]
fn summary_on_empty_population_uses_guarded_percentages() {
    let (service, _) = service_with(Vec::new());
    let summary = service.summary_as_of(None, now());
    assert_eq!(summary.top_segments.len(), 5);
    assert!(summary
        .top_segments
        .iter()
        .all(|entry| entry.percentage == "0.0%"));
    assert!(summary.action_priority.is_empty());
}
