use chrono::{DateTime, Duration, NaiveDate, Utc};
use clinic_ops::error::AppError;
use clinic_ops::workflows::segmentation::ledger::{
    CustomerRecord, OrderId, OrderRecord, OrderStatus, TenantRecord,
};
use clinic_ops::workflows::segmentation::{
    CustomerId, InMemoryCustomerLedger, LedgerImporter, TenantId,
};
use metrics_exporter_prometheus::PrometheusHandle;
use rust_decimal::Decimal;
use std::path::Path;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;
use tracing::info;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

pub(crate) fn parse_date(raw: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|err| format!("failed to parse '{raw}' as YYYY-MM-DD ({err})"))
}

/// Evaluation instant for a reporting date: the end of that day in UTC.
pub(crate) fn end_of_day(date: NaiveDate) -> DateTime<Utc> {
    let midnight = date.and_time(chrono::NaiveTime::MIN).and_utc();
    midnight + Duration::days(1) - Duration::seconds(1)
}

pub(crate) fn load_ledger(path: Option<&Path>) -> Result<InMemoryCustomerLedger, AppError> {
    match path {
        Some(path) => {
            let ledger = LedgerImporter::from_path(path)?;
            info!(
                path = %path.display(),
                tenants = ledger.tenant_count(),
                customers = ledger.customer_count(),
                orders = ledger.order_count(),
                "loaded customer ledger"
            );
            Ok(ledger)
        }
        None => Ok(InMemoryCustomerLedger::new()),
    }
}

/// Two clinics with enough order history to populate most segments.
/// Order dates are relative to `today` so the demo looks the same whenever it runs.
pub(crate) fn synthetic_ledger(today: DateTime<Utc>) -> InMemoryCustomerLedger {
    let mut ledger = InMemoryCustomerLedger::new();
    ledger.upsert_tenant(TenantRecord {
        id: TenantId(1),
        name: "Harbor Aesthetics".to_string(),
    });
    ledger.upsert_tenant(TenantRecord {
        id: TenantId(2),
        name: "Lotus Dermatology".to_string(),
    });

    let customers: [(u64, u64, &str, &[(i64, i64)]); 12] = [
        (1, 1, "Amy Chen", &[(2, 8_000), (21, 6_500), (44, 9_000), (80, 4_000)]),
        (2, 1, "Ben Wu", &[(4, 1_200)]),
        (3, 1, "Cora Lin", &[(120, 3_000), (150, 2_500), (210, 4_200)]),
        (4, 1, "Dan Ho", &[]),
        (5, 1, "Ivy Kao", &[(12, 2_200), (40, 1_800), (95, 2_600)]),
        (6, 1, "Jon Sato", &[(75, 900), (130, 650)]),
        (7, 2, "Eve Tsai", &[(1, 15_000), (33, 12_000), (61, 15_500)]),
        (8, 2, "Finn Lee", &[(200, 800)]),
        (9, 2, "Gia Park", &[(25, 1_500), (52, 2_100)]),
        (10, 2, "Hal Yang", &[(9, 450)]),
        (11, 2, "Kit Moon", &[(55, 5_200), (88, 4_800), (140, 6_000), (170, 3_900)]),
        (12, 2, "Lia Song", &[(300, 1_100)]),
    ];

    for (id, tenant, name, orders) in customers {
        ledger.upsert_customer(CustomerRecord {
            id: CustomerId(id),
            tenant_id: TenantId(tenant),
            name: name.to_string(),
            line_user_id: Some(format!("U{id:04}")),
        });
        for (index, (days_ago, total)) in orders.iter().enumerate() {
            ledger.upsert_order(OrderRecord {
                id: OrderId(format!("demo-{id}-{index}")),
                customer_id: CustomerId(id),
                status: OrderStatus::Completed,
                total: Decimal::from(*total),
                created_at: today - Duration::days(*days_ago),
            });
        }
    }

    // Cancelled orders never count toward activity.
    ledger.upsert_order(OrderRecord {
        id: OrderId("demo-4-cancelled".to_string()),
        customer_id: CustomerId(4),
        status: OrderStatus::Cancelled,
        total: Decimal::from(20_000),
        created_at: today - Duration::days(3),
    });

    ledger
}
