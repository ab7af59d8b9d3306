use std::sync::{Arc, Mutex};

use chrono::{DateTime, Duration, TimeZone, Utc};
use rust_decimal::Decimal;

use crate::workflows::segmentation::activity::{
    ActivitySourceError, ActivityWindow, CustomerActivity, CustomerActivitySource,
};
use crate::workflows::segmentation::domain::{CustomerId, TenantId};
use crate::workflows::segmentation::ledger::{
    CustomerRecord, InMemoryCustomerLedger, OrderId, OrderRecord, OrderStatus, TenantRecord,
};
use crate::workflows::segmentation::SegmentationService;

pub(super) fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 6, 30, 12, 0, 0).unwrap()
}

pub(super) fn activity(
    id: u64,
    order_count: u32,
    total_spent: i64,
    days_ago: Option<i64>,
) -> CustomerActivity {
    CustomerActivity {
        customer_id: CustomerId(id),
        customer_name: format!("Customer {id}"),
        line_user_id: Some(format!("U{id:04}")),
        tenant_id: TenantId(1),
        tenant_name: "Harbor Aesthetics".to_string(),
        last_order_at: days_ago.map(|days| now() - Duration::days(days)),
        order_count,
        total_spent: Decimal::from(total_spent),
    }
}

/// Four-customer population: 0/1/5/20 orders with 0/500/5,000/50,000 spend.
/// The zero-order customer has never purchased; the others ordered today.
pub(super) fn scenario_population() -> Vec<CustomerActivity> {
    vec![
        activity(1, 0, 0, None),
        activity(2, 1, 500, Some(0)),
        activity(3, 5, 5_000, Some(0)),
        activity(4, 20, 50_000, Some(0)),
    ]
}

/// Returns a fixed population and records the windows it was asked for.
#[derive(Default)]
pub(super) struct StaticSource {
    rows: Vec<CustomerActivity>,
    pub(super) requests: Mutex<Vec<(Option<TenantId>, ActivityWindow)>>,
}

impl StaticSource {
    pub(super) fn new(rows: Vec<CustomerActivity>) -> Self {
        Self {
            rows,
            requests: Mutex::new(Vec::new()),
        }
    }
}

impl CustomerActivitySource for StaticSource {
    fn fetch_customer_order_stats(
        &self,
        tenant_id: Option<&TenantId>,
        window: &ActivityWindow,
    ) -> Result<Vec<CustomerActivity>, ActivitySourceError> {
        self.requests
            .lock()
            .expect("requests mutex poisoned")
            .push((tenant_id.copied(), *window));
        Ok(self
            .rows
            .iter()
            .filter(|row| tenant_id.map_or(true, |tenant| row.tenant_id == *tenant))
            .cloned()
            .collect())
    }
}

pub(super) struct UnavailableSource;

impl CustomerActivitySource for UnavailableSource {
    fn fetch_customer_order_stats(
        &self,
        _tenant_id: Option<&TenantId>,
        _window: &ActivityWindow,
    ) -> Result<Vec<CustomerActivity>, ActivitySourceError> {
        Err(ActivitySourceError::Unavailable("connection refused".to_string()))
    }
}

pub(super) fn service_with(
    rows: Vec<CustomerActivity>,
) -> (SegmentationService<StaticSource>, Arc<StaticSource>) {
    let source = Arc::new(StaticSource::new(rows));
    (SegmentationService::new(source.clone()), source)
}

/// Two tenants with order histories covering several segments.
pub(super) fn clinic_ledger() -> InMemoryCustomerLedger {
    let mut ledger = InMemoryCustomerLedger::new();
    ledger.upsert_tenant(TenantRecord {
        id: TenantId(1),
        name: "Harbor Aesthetics".to_string(),
    });
    ledger.upsert_tenant(TenantRecord {
        id: TenantId(2),
        name: "Lotus Dermatology".to_string(),
    });

    let customers = [
        (101, 1, "Amy Chen"),
        (102, 1, "Ben Wu"),
        (103, 1, "Cora Lin"),
        (104, 1, "Dan Ho"),
        (201, 2, "Eve Tsai"),
        (202, 2, "Finn Lee"),
    ];
    for (id, tenant, name) in customers {
        ledger.upsert_customer(CustomerRecord {
            id: CustomerId(id),
            tenant_id: TenantId(tenant),
            name: name.to_string(),
            line_user_id: Some(format!("U{id}")),
        });
    }

    let orders: [(u64, i64, i64); 10] = [
        (101, 2, 8_000),
        (101, 20, 6_500),
        (101, 45, 9_000),
        (101, 70, 4_000),
        (102, 5, 1_200),
        (103, 120, 3_000),
        (103, 150, 2_500),
        (201, 1, 15_000),
        (201, 60, 15_000),
        (202, 200, 800),
    ];
    for (index, (customer, days_ago, total)) in orders.into_iter().enumerate() {
        ledger.upsert_order(OrderRecord {
            id: OrderId(format!("ord-{index}")),
            customer_id: CustomerId(customer),
            status: OrderStatus::Completed,
            total: Decimal::from(total),
            created_at: now() - Duration::days(days_ago),
        });
    }
    ledger.upsert_order(OrderRecord {
        id: OrderId("ord-cancelled".to_string()),
        customer_id: CustomerId(104),
        status: OrderStatus::Cancelled,
        total: Decimal::from(20_000),
        created_at: now() - Duration::days(1),
    });

    ledger
}
