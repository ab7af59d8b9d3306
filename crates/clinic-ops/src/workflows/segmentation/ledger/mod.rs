//! In-memory customer/order ledger backing the activity aggregator.

mod import;
mod parser;

pub use import::{LedgerImportError, LedgerImporter};

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};

use super::activity::{
    ActivitySourceError, ActivityWindow, CustomerActivity, CustomerActivitySource,
};
use super::domain::{CustomerId, TenantId};

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct OrderId(pub String);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderStatus {
    Pending,
    Completed,
    Cancelled,
    Refunded,
    Other,
}

impl OrderStatus {
    pub fn parse(raw: &str) -> Self {
        match raw.trim().to_ascii_lowercase().as_str() {
            "completed" | "complete" | "paid" => Self::Completed,
            "pending" => Self::Pending,
            "cancelled" | "canceled" => Self::Cancelled,
            "refunded" => Self::Refunded,
            _ => Self::Other,
        }
    }

    pub const fn is_terminal_completed(self) -> bool {
        matches!(self, Self::Completed)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TenantRecord {
    pub id: TenantId,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CustomerRecord {
    pub id: CustomerId,
    pub tenant_id: TenantId,
    pub name: String,
    pub line_user_id: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct OrderRecord {
    pub id: OrderId,
    pub customer_id: CustomerId,
    pub status: OrderStatus,
    pub total: Decimal,
    pub created_at: DateTime<Utc>,
}

/// Tenants, customers and orders; customers keep insertion order.
///
/// Every order id is stored once and belongs to exactly one customer.
/// Writes happen while the ledger is owned (`&mut self`); once shared behind an
/// `Arc` it only serves reads, apart from the availability switch.
#[derive(Debug)]
pub struct InMemoryCustomerLedger {
    tenants: HashMap<TenantId, TenantRecord>,
    customers: Vec<CustomerRecord>,
    customer_index: HashMap<CustomerId, usize>,
    orders: HashMap<OrderId, OrderRecord>,
    orders_by_customer: HashMap<CustomerId, Vec<OrderId>>,
    available: AtomicBool,
}

impl Default for InMemoryCustomerLedger {
    fn default() -> Self {
        Self {
            tenants: HashMap::new(),
            customers: Vec::new(),
            customer_index: HashMap::new(),
            orders: HashMap::new(),
            orders_by_customer: HashMap::new(),
            available: AtomicBool::new(true),
        }
    }
}

impl InMemoryCustomerLedger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn upsert_tenant(&mut self, tenant: TenantRecord) {
        self.tenants.insert(tenant.id, tenant);
    }

    /// Registers a customer; a repeated id replaces the earlier record in place.
    pub fn upsert_customer(&mut self, customer: CustomerRecord) {
        match self.customer_index.get(&customer.id) {
            Some(&position) => self.customers[position] = customer,
            None => {
                self.customer_index.insert(customer.id, self.customers.len());
                self.customers.push(customer);
            }
        }
    }

    /// Records an order; a repeated order id replaces the earlier record,
    /// moving it to the new customer when the owner changed.
    pub fn upsert_order(&mut self, order: OrderRecord) {
        let previous_owner = self
            .orders
            .get(&order.id)
            .map(|existing| existing.customer_id);

        if previous_owner != Some(order.customer_id) {
            if let Some(owner) = previous_owner {
                if let Some(ids) = self.orders_by_customer.get_mut(&owner) {
                    ids.retain(|id| *id != order.id);
                }
            }
            self.orders_by_customer
                .entry(order.customer_id)
                .or_default()
                .push(order.id.clone());
        }

        self.orders.insert(order.id.clone(), order);
    }

    pub fn tenant_count(&self) -> usize {
        self.tenants.len()
    }

    pub fn customer_count(&self) -> usize {
        self.customers.len()
    }

    pub fn order_count(&self) -> usize {
        self.orders.len()
    }

    pub fn set_available(&self, available: bool) {
        self.available.store(available, Ordering::Release);
    }

    pub fn is_available(&self) -> bool {
        self.available.load(Ordering::Acquire)
    }

    fn aggregate(
        &self,
        customer: &CustomerRecord,
        window: &ActivityWindow,
    ) -> Option<CustomerActivity> {
        let tenant = self.tenants.get(&customer.tenant_id)?;

        let mut order_count: u32 = 0;
        let mut last_order_at: Option<DateTime<Utc>> = None;
        let mut total_spent = Decimal::ZERO;

        let qualifying = self
            .orders_by_customer
            .get(&customer.id)
            .into_iter()
            .flatten()
            .filter_map(|id| self.orders.get(id))
            .filter(|order| {
                order.status.is_terminal_completed() && window.contains(order.created_at)
            });

        for order in qualifying {
            order_count = order_count.saturating_add(1);
            total_spent += order.total;
            last_order_at = Some(match last_order_at {
                Some(current) => current.max(order.created_at),
                None => order.created_at,
            });
        }

        Some(CustomerActivity {
            customer_id: customer.id,
            customer_name: customer.name.clone(),
            line_user_id: customer.line_user_id.clone(),
            tenant_id: tenant.id,
            tenant_name: tenant.name.clone(),
            last_order_at,
            order_count,
            total_spent,
        })
    }
}

impl CustomerActivitySource for InMemoryCustomerLedger {
    fn fetch_customer_order_stats(
        &self,
        tenant_id: Option<&TenantId>,
        window: &ActivityWindow,
    ) -> Result<Vec<CustomerActivity>, ActivitySourceError> {
        if !self.is_available() {
            return Err(ActivitySourceError::Unavailable(
                "customer ledger is offline".to_string(),
            ));
        }

        Ok(self
            .customers
            .iter()
            .filter(|customer| tenant_id.map_or(true, |tenant| customer.tenant_id == *tenant))
            .filter_map(|customer| self.aggregate(customer, window))
            .collect())
    }
}
