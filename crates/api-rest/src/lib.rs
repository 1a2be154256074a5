//! # API REST
//!
//! REST API for the ward view.
//!
//! Handles:
//! - HTTP endpoints with axum
//! - OpenAPI/Swagger documentation
//! - REST-specific concerns (JSON bodies, status codes, CORS)
//!
//! Payload translation is delegated to `ward-openmrs` and reconciliation to `ward-core`. The
//! server never fetches from upstream; callers post the snapshots they already hold.

#![warn(rust_2018_idioms)]

use std::sync::Arc;

use axum::{extract::State, http::StatusCode, response::Json, routing::get, routing::post, Router};
use serde::{Deserialize, Serialize};
use tower_http::cors::CorsLayer;
use utoipa::{OpenApi, ToSchema};
use utoipa_swagger_ui::SwaggerUi;
use ward_core::{
    filter_beds, filter_requests, reconcile, BedViewModel, InpatientRequest, WardCensus,
    WardConfig, WardPatient,
};
use ward_openmrs::{AdmissionLocationDoc, InpatientAdmissionDoc, InpatientRequestDoc};

/// Application state shared across REST API handlers.
#[derive(Clone)]
pub struct AppState {
    cfg: Arc<WardConfig>,
}

impl AppState {
    pub fn new(cfg: Arc<WardConfig>) -> Self {
        Self { cfg }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct HealthRes {
    pub ok: bool,
    pub message: String,
}

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct WardViewReq {
    /// Admission-location document as returned by the location endpoint.
    #[schema(value_type = Object)]
    pub admission_location: serde_json::Value,
    /// Inpatient admissions loaded so far: a results page or a bare array.
    #[schema(value_type = Object)]
    pub inpatient_admissions: serde_json::Value,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct WardViewRes {
    #[schema(value_type = Vec<Object>)]
    pub beds: Vec<BedViewModel>,
    #[schema(value_type = Vec<Object>)]
    pub unassigned: Vec<WardPatient>,
    #[schema(value_type = Object)]
    pub census: WardCensus,
    /// Mirrors the `next` link of the admissions page that was posted.
    pub has_more_admissions: bool,
    /// Page size clients should request the next admissions page with.
    pub admissions_page_size: usize,
}

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct WardRequestsReq {
    pub ward_location_uuid: String,
    #[schema(value_type = Object)]
    pub inpatient_requests: serde_json::Value,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct WardRequestsRes {
    #[schema(value_type = Vec<Object>)]
    pub requests: Vec<InpatientRequest>,
    pub disposition_types: Vec<String>,
}

#[derive(OpenApi)]
#[openapi(
    paths(health, ward_view, ward_requests),
    components(schemas(HealthRes, WardViewReq, WardViewRes, WardRequestsReq, WardRequestsRes))
)]
struct ApiDoc;

/// Build the REST router with Swagger UI and permissive CORS.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/ward/view", post(ward_view))
        .route("/ward/requests", post(ward_requests))
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Health check response", body = HealthRes)
    )
)]
#[axum::debug_handler]
async fn health(State(_state): State<AppState>) -> Json<HealthRes> {
    Json(HealthRes {
        ok: true,
        message: "Ward REST API is alive".into(),
    })
}

#[utoipa::path(
    post,
    path = "/ward/view",
    request_body = WardViewReq,
    responses(
        (status = 200, description = "Reconciled ward view", body = WardViewRes),
        (status = 400, description = "Malformed location or admissions payload")
    )
)]
/// Reconcile a bed layout with the admissions loaded so far.
///
/// Grid cells without beds are dropped and beds are ordered by bed number before reconciling.
///
/// # Errors
/// Returns `400 Bad Request` if either payload fails to translate.
#[axum::debug_handler]
async fn ward_view(
    State(state): State<AppState>,
    Json(req): Json<WardViewReq>,
) -> Result<Json<WardViewRes>, (StatusCode, String)> {
    let location = AdmissionLocationDoc::from_value(req.admission_location).map_err(|e| {
        tracing::warn!("rejected admission location: {e}");
        (StatusCode::BAD_REQUEST, e.to_string())
    })?;
    let admissions = InpatientAdmissionDoc::from_value(req.inpatient_admissions).map_err(|e| {
        tracing::warn!("rejected inpatient admissions: {e}");
        (StatusCode::BAD_REQUEST, e.to_string())
    })?;

    let bed_layouts = filter_beds(&location);
    let view = reconcile(&bed_layouts, &admissions.results);
    let census = view.census();

    tracing::info!(
        ward = %location.ward.uuid,
        beds = census.beds,
        unassigned = census.unassigned_patients,
        degraded = census.degraded_patients,
        "reconciled ward view"
    );

    Ok(Json(WardViewRes {
        beds: view.beds,
        unassigned: view.unassigned,
        census,
        has_more_admissions: admissions.has_more,
        admissions_page_size: state.cfg.page_size(),
    }))
}

#[utoipa::path(
    post,
    path = "/ward/requests",
    request_body = WardRequestsReq,
    responses(
        (status = 200, description = "Pending requests for the ward", body = WardRequestsRes),
        (status = 400, description = "Malformed requests payload")
    )
)]
/// Filter inpatient requests down to those pending for one ward.
///
/// Only the disposition types configured at startup are kept.
#[axum::debug_handler]
async fn ward_requests(
    State(state): State<AppState>,
    Json(req): Json<WardRequestsReq>,
) -> Result<Json<WardRequestsRes>, (StatusCode, String)> {
    if req.ward_location_uuid.trim().is_empty() {
        return Err((
            StatusCode::BAD_REQUEST,
            "wardLocationUuid cannot be empty".into(),
        ));
    }

    let page = InpatientRequestDoc::from_value(req.inpatient_requests).map_err(|e| {
        tracing::warn!("rejected inpatient requests: {e}");
        (StatusCode::BAD_REQUEST, e.to_string())
    })?;

    let types = state.cfg.disposition_types();
    let requests = filter_requests(&page.results, req.ward_location_uuid.trim(), types)
        .into_iter()
        .cloned()
        .collect();

    Ok(Json(WardRequestsRes {
        requests,
        disposition_types: types.iter().map(|t| t.to_string()).collect(),
    }))
}
