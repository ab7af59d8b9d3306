use crate::cli::ServeArgs;
use crate::infra::{load_ledger, AppState};
use crate::routes::with_segmentation_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use clinic_ops::config::AppConfig;
use clinic_ops::error::AppError;
use clinic_ops::telemetry;
use clinic_ops::workflows::segmentation::SegmentationService;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use tracing::{info, warn};

pub(crate) async fn run(mut args: ServeArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;

    if let Some(host) = args.host.take() {
        config.server.host = host;
    }
    if let Some(port) = args.port.take() {
        config.server.port = port;
    }
    if let Some(path) = args.ledger_csv.take() {
        config.segmentation.ledger_csv = Some(path);
    }

    telemetry::init(&config.telemetry)?;

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(std::sync::atomic::AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
    };

    if config.segmentation.ledger_csv.is_none() {
        warn!("no ledger export configured; serving an empty customer ledger");
    }
    let ledger = load_ledger(config.segmentation.ledger_csv.as_deref())?;
    let service = Arc::new(SegmentationService::with_default_lookback(
        Arc::new(ledger),
        config.segmentation.lookback_days,
    ));

    let app = with_segmentation_routes(service)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(
        ?config.environment,
        %addr,
        lookback_days = config.segmentation.lookback_days,
        "customer segmentation service ready"
    );

    axum::serve(listener, app).await?;
    Ok(())
}
