use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post, put},
    Json, Router,
};
use serde::Deserialize;
use serde_json::json;

use super::domain::LeadStatus;
use super::repository::{LeadRepository, RepositoryError};
use super::service::{LeadService, LeadServiceError};
use crate::eligibility::Lead;

/// Payload for saving a lead as a draft or a final submission.
#[derive(Debug, Deserialize)]
pub struct SaveLeadRequest {
    pub lead: Lead,
    #[serde(default)]
    pub status: LeadStatus,
}

/// Router builder exposing eligibility checks and lead storage.
pub fn lead_router<R>(service: Arc<LeadService<R>>) -> Router
where
    R: LeadRepository + 'static,
{
    Router::new()
        .route("/api/v1/eligibility", post(eligibility_handler::<R>))
        .route("/api/v1/lenders", get(lenders_handler::<R>))
        .route("/api/v1/leads", put(save_handler::<R>))
        .route("/api/v1/leads/:mobile_number", get(load_handler::<R>))
        .with_state(service)
}

pub(crate) async fn eligibility_handler<R>(
    State(service): State<Arc<LeadService<R>>>,
    Json(lead): Json<Lead>,
) -> Response
where
    R: LeadRepository + 'static,
{
    (StatusCode::OK, Json(service.evaluate(&lead))).into_response()
}

pub(crate) async fn lenders_handler<R>(State(service): State<Arc<LeadService<R>>>) -> Response
where
    R: LeadRepository + 'static,
{
    let catalog = service.catalog().snapshot();
    (StatusCode::OK, Json(catalog.summaries())).into_response()
}

pub(crate) async fn save_handler<R>(
    State(service): State<Arc<LeadService<R>>>,
    Json(request): Json<SaveLeadRequest>,
) -> Response
where
    R: LeadRepository + 'static,
{
    match service.save(request.lead, request.status) {
        Ok(record) => (StatusCode::OK, Json(record)).into_response(),
        Err(err) => error_response(err),
    }
}

pub(crate) async fn load_handler<R>(
    State(service): State<Arc<LeadService<R>>>,
    Path(mobile_number): Path<String>,
) -> Response
where
    R: LeadRepository + 'static,
{
    match service.load_draft(&mobile_number) {
        Ok(record) => (StatusCode::OK, Json(record)).into_response(),
        Err(err) => error_response(err),
    }
}

fn error_response(err: LeadServiceError) -> Response {
    let status = match &err {
        LeadServiceError::MissingMobileNumber | LeadServiceError::Intake(_) => {
            StatusCode::UNPROCESSABLE_ENTITY
        }
        LeadServiceError::Repository(RepositoryError::NotFound) => StatusCode::NOT_FOUND,
        LeadServiceError::Repository(RepositoryError::Unavailable(_)) => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    };
    (status, Json(json!({ "error": err.to_string() }))).into_response()
}
