use rust_decimal::Decimal;
use std::io::Read;
use std::path::Path;
use std::str::FromStr;

use super::parser::{parse_rows, parse_timestamp, LedgerRow};
use super::{
    CustomerRecord, InMemoryCustomerLedger, OrderId, OrderRecord, OrderStatus, TenantRecord,
};
use crate::workflows::segmentation::domain::{CustomerId, TenantId};

#[derive(Debug, thiserror::Error)]
pub enum LedgerImportError {
    #[error("failed to read ledger export: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid ledger CSV data: {0}")]
    Csv(#[from] csv::Error),
    #[error("ledger row {row}: {reason}")]
    InvalidRow { row: usize, reason: String },
}

/// Builds an [`InMemoryCustomerLedger`] from a flat customer/order CSV export.
///
/// Each row names a tenant and a customer; rows that also carry an order id
/// contribute that order. A row without an order id only registers the customer.
pub struct LedgerImporter;

impl LedgerImporter {
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<InMemoryCustomerLedger, LedgerImportError> {
        let file = std::fs::File::open(path)?;
        Self::from_reader(file)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<InMemoryCustomerLedger, LedgerImportError> {
        let rows = parse_rows(reader)?;
        let mut ledger = InMemoryCustomerLedger::new();

        for (index, row) in rows.into_iter().enumerate() {
            // Header is line 1, first data row is line 2.
            apply_row(&mut ledger, row, index + 2)?;
        }

        Ok(ledger)
    }
}

fn apply_row(
    ledger: &mut InMemoryCustomerLedger,
    row: LedgerRow,
    line: usize,
) -> Result<(), LedgerImportError> {
    let tenant_id = TenantId(row.tenant_id);
    let customer_id = CustomerId(row.customer_id);

    ledger.upsert_tenant(TenantRecord {
        id: tenant_id,
        name: row.tenant_name,
    });
    ledger.upsert_customer(CustomerRecord {
        id: customer_id,
        tenant_id,
        name: row.customer_name,
        line_user_id: row.line_user_id,
    });

    let Some(order_id) = row.order_id else {
        return Ok(());
    };

    let total = match row.order_total.as_deref() {
        Some(raw) => Decimal::from_str(raw.trim()).map_err(|err| LedgerImportError::InvalidRow {
            row: line,
            reason: format!("order total '{raw}' is not a decimal ({err})"),
        })?,
        None => Decimal::ZERO,
    };
    if total.is_sign_negative() {
        return Err(LedgerImportError::InvalidRow {
            row: line,
            reason: format!("order total {total} must not be negative"),
        });
    }

    let created_at = row
        .order_created_at
        .as_deref()
        .and_then(parse_timestamp)
        .ok_or_else(|| LedgerImportError::InvalidRow {
            row: line,
            reason: format!("order {order_id} is missing a valid creation timestamp"),
        })?;

    let status = row
        .order_status
        .as_deref()
        .map(OrderStatus::parse)
        .unwrap_or(OrderStatus::Pending);

    ledger.upsert_order(OrderRecord {
        id: OrderId(order_id),
        customer_id,
        status,
        total,
        created_at,
    });

    Ok(())
}
