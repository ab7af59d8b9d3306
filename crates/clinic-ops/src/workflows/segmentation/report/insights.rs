use super::super::domain::{Segment, SegmentDistribution};
use super::views::{Insight, InsightKind, RfmCustomer};
use rust_decimal::Decimal;

pub(crate) fn generate_insights(
    customers: &[RfmCustomer],
    distribution: &SegmentDistribution,
) -> Vec<Insight> {
    let total = customers.len();
    let mut insights = Vec::new();

    let champions = distribution.count(Segment::Champions);
    if champions > 0 {
        let revenue: Decimal = customers
            .iter()
            .filter(|customer| customer.segment == Segment::Champions)
            .map(|customer| customer.activity.total_spent)
            .sum();

        insights.push(Insight {
            kind: InsightKind::Champions,
            title: "Champion customer analysis",
            description: format!(
                "You have {champions} champion customer{} ({}% of total), contributing ${} in revenue",
                plural(champions),
                format_percentage(champions, total),
                format_amount(revenue)
            ),
            action_items: vec![
                "Offer VIP-only perks to keep them loyal",
                "Invite them to the referral reward program",
                "Notify them first when new treatments launch",
            ],
        });
    }

    let at_risk = distribution.count(Segment::AtRisk);
    if at_risk > 0 {
        insights.push(Insight {
            kind: InsightKind::AtRisk,
            title: "Churn risk alert",
            description: format!(
                "{at_risk} high-value customer{} at risk of churning ({}% of total) and need{} immediate attention",
                if at_risk == 1 { " is" } else { "s are" },
                format_percentage(at_risk, total),
                if at_risk == 1 { "s" } else { "" }
            ),
            action_items: vec![
                "Send an exclusive comeback offer right away",
                "Schedule a personal care call",
                "Find out why they stopped visiting and fix it",
            ],
        });
    }

    let dormant =
        distribution.count(Segment::Hibernating) + distribution.count(Segment::AboutToSleep);
    if dormant > 0 {
        insights.push(Insight {
            kind: InsightKind::Dormant,
            title: "Dormant customer reactivation",
            description: format!(
                "{dormant} customer{} dormant ({}% of total) and can be re-engaged with a wake-up campaign",
                if dormant == 1 { " is" } else { "s are" },
                format_percentage(dormant, total)
            ),
            action_items: vec![
                "Send a limited-time comeback offer (7-day validity recommended)",
                "Push treatment result reminders",
                "Offer an exclusive discount for the first return visit",
            ],
        });
    }

    let new_customers = distribution.count(Segment::New);
    if new_customers > 0 {
        insights.push(Insight {
            kind: InsightKind::NewCustomers,
            title: "New customer nurturing plan",
            description: format!(
                "{new_customers} new customer{} in the critical window for building a long-term relationship",
                if new_customers == 1 { " is" } else { "s are" }
            ),
            action_items: vec![
                "Send a welcome gift and treatment introduction",
                "Assign staff to follow up on first-visit feedback",
                "Offer a second-visit discount to drive repeat purchases",
            ],
        });
    }

    insights
}

fn plural(count: usize) -> &'static str {
    if count == 1 {
        ""
    } else {
        "s"
    }
}

/// Share of `total` as a one-decimal percentage; an empty total counts as one.
pub(crate) fn percentage(count: usize, total: usize) -> f64 {
    (count as f64 / total.max(1) as f64) * 100.0
}

pub(crate) fn format_percentage(count: usize, total: usize) -> String {
    format!("{:.1}", percentage(count, total))
}

/// Renders an amount with thousands separators and at most two decimals.
pub(crate) fn format_amount(amount: Decimal) -> String {
    let rounded = amount.round_dp(2).normalize().to_string();
    let (sign, digits) = match rounded.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", rounded.as_str()),
    };
    let (whole, fraction) = match digits.split_once('.') {
        Some((whole, fraction)) => (whole, Some(fraction)),
        None => (digits, None),
    };

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (index, ch) in whole.chars().enumerate() {
        if index > 0 && (whole.len() - index) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    match fraction {
        Some(fraction) => format!("{sign}{grouped}.{fraction}"),
        None => format!("{sign}{grouped}"),
    }
}
