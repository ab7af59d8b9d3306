use crate::infra::{end_of_day, load_ledger, synthetic_ledger};
use chrono::{DateTime, NaiveDate, Utc};
use clap::Args;
use clinic_ops::error::AppError;
use clinic_ops::workflows::segmentation::{
    AnalysisResult, SegmentationService, SegmentationSummary, TenantId, MAX_LOOKBACK_DAYS,
};
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Args, Debug)]
pub(crate) struct SegmentationReportArgs {
    /// Customer/order ledger CSV export
    #[arg(long)]
    pub(crate) ledger_csv: PathBuf,
    /// Restrict the analysis to a single tenant
    #[arg(long)]
    pub(crate) tenant_id: Option<u64>,
    /// Days of order history to consider (defaults to 365)
    #[arg(
        long,
        value_parser = clap::value_parser!(u32).range(1..=i64::from(MAX_LOOKBACK_DAYS))
    )]
    pub(crate) lookback_days: Option<u32>,
    /// Include every scored customer in the output
    #[arg(long)]
    pub(crate) list_customers: bool,
    /// Evaluate as of this date (YYYY-MM-DD). Defaults to now.
    #[arg(long, value_parser = crate::infra::parse_date)]
    pub(crate) as_of: Option<NaiveDate>,
}

#[derive(Args, Debug)]
pub(crate) struct SegmentationSummaryArgs {
    /// Customer/order ledger CSV export
    #[arg(long)]
    pub(crate) ledger_csv: PathBuf,
    /// Restrict the summary to a single tenant
    #[arg(long)]
    pub(crate) tenant_id: Option<u64>,
    /// Evaluate as of this date (YYYY-MM-DD). Defaults to now.
    #[arg(long, value_parser = crate::infra::parse_date)]
    pub(crate) as_of: Option<NaiveDate>,
}

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Restrict the demo to a single tenant (1 or 2)
    #[arg(long)]
    pub(crate) tenant_id: Option<u64>,
    /// Override the reporting date (defaults to today)
    #[arg(long, value_parser = crate::infra::parse_date)]
    pub(crate) today: Option<NaiveDate>,
    /// Include every scored customer in the output
    #[arg(long)]
    pub(crate) list_customers: bool,
}

pub(crate) fn run_segmentation_report(args: SegmentationReportArgs) -> Result<(), AppError> {
    let SegmentationReportArgs {
        ledger_csv,
        tenant_id,
        lookback_days,
        list_customers,
        as_of,
    } = args;

    let ledger = load_ledger(Some(&ledger_csv))?;
    let service = SegmentationService::new(Arc::new(ledger));
    let now = evaluation_instant(as_of);
    let result = service.analyze_as_of(tenant_id.map(TenantId), lookback_days, now);

    print!("{}", render_report(&result, list_customers));
    Ok(())
}

pub(crate) fn run_segmentation_summary(args: SegmentationSummaryArgs) -> Result<(), AppError> {
    let SegmentationSummaryArgs {
        ledger_csv,
        tenant_id,
        as_of,
    } = args;

    let ledger = load_ledger(Some(&ledger_csv))?;
    let service = SegmentationService::new(Arc::new(ledger));
    let summary = service.summary_as_of(tenant_id.map(TenantId), evaluation_instant(as_of));

    print!("{}", render_summary(&summary));
    Ok(())
}

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let DemoArgs {
        tenant_id,
        today,
        list_customers,
    } = args;

    let now = evaluation_instant(today);
    let service = SegmentationService::new(Arc::new(synthetic_ledger(now)));
    let result = service.analyze_as_of(tenant_id.map(TenantId), None, now);

    println!("Customer segmentation demo (synthetic clinic ledger)");
    print!("{}", render_report(&result, list_customers));
    println!();
    print!("{}", render_summary(&result.summary()));
    Ok(())
}

fn evaluation_instant(date: Option<NaiveDate>) -> DateTime<Utc> {
    date.map(end_of_day).unwrap_or_else(Utc::now)
}

pub(crate) fn render_report(result: &AnalysisResult, list_customers: bool) -> String {
    let mut out = String::new();
    let scope = match result.tenant_id {
        Some(tenant) => format!("tenant {tenant}"),
        None => "all tenants".to_string(),
    };
    out.push_str(&format!(
        "RFM analysis for {} | last {} days | evaluated {}\n",
        scope,
        result.lookback_days,
        result.analyzed_at.format("%Y-%m-%d %H:%M UTC")
    ));

    if !result.success {
        out.push_str("Customer activity is unavailable; no customers were scored.\n");
        return out;
    }

    out.push_str(&format!("Customers analyzed: {}\n", result.total_customers));
    out.push_str("\nSegment distribution\n");
    for (segment, count) in result.segment_distribution.iter() {
        out.push_str(&format!("- {:<20} {}\n", segment.label(), count));
    }

    if !result.insights.is_empty() {
        out.push_str("\nInsights\n");
        for insight in &result.insights {
            out.push_str(&format!("- {}: {}\n", insight.title, insight.description));
            for item in &insight.action_items {
                out.push_str(&format!("    * {item}\n"));
            }
        }
    }

    if list_customers {
        out.push_str("\nCustomers by total score\n");
        for customer in &result.customers {
            let last_order = customer
                .activity
                .last_order_at
                .map(|at| at.format("%Y-%m-%d").to_string())
                .unwrap_or_else(|| "never".to_string());
            out.push_str(&format!(
                "- {} | {} | RFM {} ({}) | {} | {} orders | spent {} | last order {}\n",
                customer.activity.customer_id,
                customer.activity.customer_name,
                customer.rfm_score,
                customer.total_score,
                customer.segment_label,
                customer.activity.order_count,
                customer.activity.total_spent,
                last_order
            ));
        }
    }

    out
}

pub(crate) fn render_summary(summary: &SegmentationSummary) -> String {
    let mut out = String::new();
    if !summary.success {
        out.push_str("Segmentation summary unavailable.\n");
        return out;
    }

    out.push_str(&format!(
        "Segmentation summary ({} customers)\n",
        summary.total_customers
    ));
    out.push_str("Top segments\n");
    for entry in &summary.top_segments {
        out.push_str(&format!(
            "- {:<20} {:>4} ({})\n",
            entry.label, entry.count, entry.percentage
        ));
    }

    if !summary.action_priority.is_empty() {
        out.push_str("Follow-up priority\n");
        for entry in &summary.action_priority {
            out.push_str(&format!(
                "- [{}] {} ({})\n",
                entry.urgency.label(),
                entry.label,
                entry.count
            ));
        }
    }

    out
}
