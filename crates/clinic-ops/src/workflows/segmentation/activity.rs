use chrono::{DateTime, Duration, Utc};
use rust_decimal::Decimal;
use serde::Serialize;

use super::domain::{CustomerId, TenantId};

/// Aggregated order statistics for one customer over a lookback window.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CustomerActivity {
    pub customer_id: CustomerId,
    pub customer_name: String,
    pub line_user_id: Option<String>,
    pub tenant_id: TenantId,
    pub tenant_name: String,
    pub last_order_at: Option<DateTime<Utc>>,
    pub order_count: u32,
    pub total_spent: Decimal,
}

impl CustomerActivity {
    /// Whole days elapsed between the last qualifying order and `now`.
    pub fn days_since_last_order(&self, now: DateTime<Utc>) -> Option<i64> {
        self.last_order_at
            .map(|last_order| (now - last_order).num_days().max(0))
    }
}

/// Closed interval of order timestamps that count toward an analysis run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActivityWindow {
    pub since: DateTime<Utc>,
    pub until: DateTime<Utc>,
}

impl ActivityWindow {
    /// Window ending at `now`; spans reaching past the earliest representable
    /// instant start there instead.
    pub fn lookback(now: DateTime<Utc>, lookback_days: u32) -> Self {
        let since = Duration::try_days(i64::from(lookback_days))
            .and_then(|span| now.checked_sub_signed(span))
            .unwrap_or(DateTime::<Utc>::MIN_UTC);

        Self { since, until: now }
    }

    pub fn contains(&self, at: DateTime<Utc>) -> bool {
        at >= self.since && at <= self.until
    }
}

/// Read-only storage capability feeding the segmentation engine.
///
/// Implementations return one row per customer in scope, including customers
/// without a qualifying order, and an empty list when the tenant has none.
pub trait CustomerActivitySource: Send + Sync {
    fn fetch_customer_order_stats(
        &self,
        tenant_id: Option<&TenantId>,
        window: &ActivityWindow,
    ) -> Result<Vec<CustomerActivity>, ActivitySourceError>;
}

#[derive(Debug, thiserror::Error)]
pub enum ActivitySourceError {
    #[error("activity store unavailable: {0}")]
    Unavailable(String),
}
