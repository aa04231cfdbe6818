use crate::cli::ServeArgs;
use crate::infra::{load_catalog, AppState, InMemoryLeadRepository};
use crate::routes::with_service_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use loan_match::config::AppConfig;
use loan_match::eligibility::CatalogHandle;
use loan_match::error::AppError;
use loan_match::leads::LeadService;
use loan_match::telemetry;
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

    let reference_dir = config.reference.data_dir.clone();
    let catalog = Arc::new(CatalogHandle::new(load_catalog(&reference_dir)));

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(std::sync::atomic::AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
        catalog: catalog.clone(),
        reference_dir,
    };

    let repository = Arc::new(InMemoryLeadRepository::default());
    let lead_service = Arc::new(LeadService::new(repository, catalog));

    let app = with_service_routes(lead_service)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, reference_dir = %config.reference.data_dir.display(), "loan match service ready");

    axum::serve(listener, app).await?;
    Ok(())
}
