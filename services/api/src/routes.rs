use crate::infra::{load_catalog, AppState};
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::Extension;
use axum::Json;
use loan_match::leads::{lead_router, LeadRepository, LeadService};
use serde_json::json;
use std::sync::Arc;
use tracing::{error, info};

pub(crate) fn with_service_routes<R>(service: Arc<LeadService<R>>) -> axum::Router
where
    R: LeadRepository + 'static,
{
    lead_router(service)
        .route("/health", axum::routing::get(healthcheck))
        .route("/ready", axum::routing::get(readiness_endpoint))
        .route("/metrics", axum::routing::get(metrics_endpoint))
        .route(
            "/api/v1/catalog/reload",
            axum::routing::post(reload_catalog_endpoint),
        )
}

pub(crate) async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

pub(crate) async fn readiness_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(std::sync::atomic::Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

pub(crate) async fn metrics_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}

/// Rebuild the catalog from the reference directory and swap it in. In-flight evaluations
/// finish against the catalog they started with.
pub(crate) async fn reload_catalog_endpoint(
    Extension(state): Extension<AppState>,
) -> impl IntoResponse {
    let reference_dir = state.reference_dir.clone();
    let catalog = match tokio::task::spawn_blocking(move || load_catalog(&reference_dir)).await {
        Ok(catalog) => catalog,
        Err(err) => {
            error!(error = %err, "catalog reload task failed");
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "error": "catalog reload failed" })),
            );
        }
    };

    let lenders = catalog.len();
    let serviceable = catalog
        .rules()
        .filter(|rule| rule.allowed_pincodes.as_ref().is_some_and(|set| !set.is_empty()))
        .count();
    state.catalog.replace(catalog);
    info!(lenders, serviceable, "policy catalog reloaded");

    (
        StatusCode::OK,
        Json(json!({ "status": "reloaded", "lenders": lenders, "serviceable_lenders": serviceable })),
    )
}
