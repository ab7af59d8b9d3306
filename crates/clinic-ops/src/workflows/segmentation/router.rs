use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Router,
};
use serde::Deserialize;
use serde_json::json;

use super::activity::CustomerActivitySource;
use super::domain::{Segment, TenantId};
use super::service::{SegmentationService, MAX_LOOKBACK_DAYS};

#[derive(Debug, Default, Deserialize)]
pub struct AnalysisQuery {
    #[serde(default)]
    pub tenant_id: Option<u64>,
    #[serde(default)]
    pub lookback_days: Option<u32>,
}

#[derive(Debug, Default, Deserialize)]
pub struct TenantQuery {
    #[serde(default)]
    pub tenant_id: Option<u64>,
}

/// Router builder exposing the segmentation analysis endpoints.
pub fn segmentation_router<S>(service: Arc<SegmentationService<S>>) -> Router
where
    S: CustomerActivitySource + 'static,
{
    Router::new()
        .route("/api/v1/segmentation/analysis", get(analysis_handler::<S>))
        .route(
            "/api/v1/segmentation/segments/:segment",
            get(segment_handler::<S>),
        )
        .route("/api/v1/segmentation/summary", get(summary_handler::<S>))
        .with_state(service)
}

pub(crate) async fn analysis_handler<S>(
    State(service): State<Arc<SegmentationService<S>>>,
    Query(query): Query<AnalysisQuery>,
) -> Response
where
    S: CustomerActivitySource + 'static,
{
    if let Some(days) = query.lookback_days {
        if !(1..=MAX_LOOKBACK_DAYS).contains(&days) {
            let payload = json!({
                "error": format!("lookback_days must be between 1 and {MAX_LOOKBACK_DAYS}")
            });
            return (StatusCode::BAD_REQUEST, axum::Json(payload)).into_response();
        }
    }

    let result = service.analyze(query.tenant_id.map(TenantId), query.lookback_days);
    let status = if result.success {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };
    (status, axum::Json(result)).into_response()
}

pub(crate) async fn segment_handler<S>(
    State(service): State<Arc<SegmentationService<S>>>,
    Path(segment): Path<String>,
    Query(query): Query<TenantQuery>,
) -> Response
where
    S: CustomerActivitySource + 'static,
{
    let segment = match segment.parse::<Segment>() {
        Ok(segment) => segment,
        Err(err) => {
            let payload = json!({ "error": err.to_string() });
            return (StatusCode::NOT_FOUND, axum::Json(payload)).into_response();
        }
    };

    let customers = service.customers_by_segment(segment, query.tenant_id.map(TenantId));
    let payload = json!({
        "segment": segment,
        "label": segment.label(),
        "count": customers.len(),
        "customers": customers,
    });
    (StatusCode::OK, axum::Json(payload)).into_response()
}

pub(crate) async fn summary_handler<S>(
    State(service): State<Arc<SegmentationService<S>>>,
    Query(query): Query<TenantQuery>,
) -> Response
where
    S: CustomerActivitySource + 'static,
{
    let summary = service.summary(query.tenant_id.map(TenantId));
    let status = if summary.success {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };
    (status, axum::Json(summary)).into_response()
}
