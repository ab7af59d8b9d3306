use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Deserializer};
use std::io::Read;

#[derive(Debug, Deserialize)]
pub(crate) struct LedgerRow {
    #[serde(rename = "Tenant ID")]
    pub(crate) tenant_id: u64,
    #[serde(rename = "Tenant Name")]
    pub(crate) tenant_name: String,
    #[serde(rename = "Customer ID")]
    pub(crate) customer_id: u64,
    #[serde(rename = "Customer Name")]
    pub(crate) customer_name: String,
    #[serde(
        rename = "LINE User ID",
        default,
        deserialize_with = "empty_string_as_none"
    )]
    pub(crate) line_user_id: Option<String>,
    #[serde(rename = "Order ID", default, deserialize_with = "empty_string_as_none")]
    pub(crate) order_id: Option<String>,
    #[serde(
        rename = "Order Status",
        default,
        deserialize_with = "empty_string_as_none"
    )]
    pub(crate) order_status: Option<String>,
    #[serde(
        rename = "Order Total",
        default,
        deserialize_with = "empty_string_as_none"
    )]
    pub(crate) order_total: Option<String>,
    #[serde(
        rename = "Order Created At",
        default,
        deserialize_with = "empty_string_as_none"
    )]
    pub(crate) order_created_at: Option<String>,
}

pub(crate) fn parse_rows<R: Read>(reader: R) -> Result<Vec<LedgerRow>, csv::Error> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);

    csv_reader.deserialize::<LedgerRow>().collect()
}

fn empty_string_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    Ok(opt.filter(|value| !value.trim().is_empty()))
}

/// Accepts RFC 3339 timestamps or bare `YYYY-MM-DD` dates (midnight UTC).
pub(crate) fn parse_timestamp(value: &str) -> Option<DateTime<Utc>> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
        return Some(dt.with_timezone(&Utc));
    }

    NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}
