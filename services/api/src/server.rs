use crate::cli::ServeArgs;
use crate::demo::seeded_directory;
use crate::infra::{AppState, InMemoryAnalysisStore, LoggingDecisionNotifier};
use crate::routes::with_analysis_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use edital_ai::config::AppConfig;
use edital_ai::error::AppError;
use edital_ai::telemetry;
use edital_ai::workflows::procurement::analysis::BidAnalysisService;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use tracing::info;

pub(crate) async fn run(mut args: ServeArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;

    if let Some(host) = args.host.take() {
        config.server.host = host;
    }
    if let Some(port) = args.port.take() {
        config.server.port = port;
    }

    telemetry::init(&config.telemetry)?;

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(std::sync::atomic::AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
    };

    let directory = Arc::new(seeded_directory()?);
    let store = Arc::new(InMemoryAnalysisStore::default());
    let notifier = Arc::new(LoggingDecisionNotifier);
    let weights = config.scoring.weights;
    let analysis_service = Arc::new(BidAnalysisService::new(
        directory, store, notifier, weights,
    ));

    let app = with_analysis_routes(analysis_service)
        .layer(Extension(app_state))
        .layer(Extension(weights))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, "edital viability analyzer ready");

    axum::serve(listener, app).await?;
    Ok(())
}
