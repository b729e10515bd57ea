use crate::cli::ServeArgs;
use crate::infra::{build_orchestrator, load_catalog, load_row_source, AppState};
use crate::routes::with_scoring_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use tender_scoring::assessment::InMemoryResultStore;
use tender_scoring::config::AppConfig;
use tender_scoring::error::AppError;
use tender_scoring::telemetry;
use tracing::{info, warn};

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

    let rows = load_row_source(args.rows.as_deref())?;
    let catalog = load_catalog(args.assessments.as_deref())?;
    let catalog_len = catalog.len();
    if catalog.is_empty() {
        warn!("no assessment definitions loaded; every score request will return 404");
    }

    let orchestrator = Arc::new(build_orchestrator(
        rows,
        InMemoryResultStore::default(),
        &config.scoring,
    ));

    let app = with_scoring_routes(orchestrator, Arc::new(catalog), &config.scoring.principal)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(
        ?config.environment,
        %addr,
        policy = config.scoring.exclusion_policy.label(),
        assessments = catalog_len,
        "tender scoring service ready"
    );

    axum::serve(listener, app).await?;
    Ok(())
}
