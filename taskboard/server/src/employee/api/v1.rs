use axum::{
    Json, Router,
    extract::{Path, Query, State},
    routing::get,
};
use serde::Deserialize;
use std::sync::Arc;
use utoipa::IntoParams;

use crate::employee::{EmployeeService, LeadsView};
use crate::model::{Lead, LeadStatus, LeadUpdate};
use crate::web::DashboardState;
use crate::web::api::v1::{ApiResult, ServerErrorResponse, backend_failure};

#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct LeadsQuery {
    /// Only leads with this status
    #[serde(default)]
    #[param(value_type = Option<String>)]
    status: Option<LeadStatus>,
}

/// Handler for GET /api/v1/employee/leads.
#[tracing::instrument(skip(state))]
#[utoipa::path(
    get,
    path = "/api/v1/employee/leads",
    responses(
        (status = 200, description = "Leads with counters", body = LeadsView),
        (status = 502, description = "Dashboard API unavailable", body = ServerErrorResponse)
    ),
    tag = "Employee"
)]
pub async fn get_leads_handler(
    State(state): State<Arc<DashboardState>>,
    Query(query): Query<LeadsQuery>,
) -> ApiResult<LeadsView> {
    EmployeeService::new(state.backend.as_ref())
        .leads(query.status)
        .await
        .map(Json)
        .map_err(|err| backend_failure(err, "Failed to fetch leads"))
}

/// Handler for GET /api/v1/employee/leads/{id}.
#[tracing::instrument(skip(state))]
#[utoipa::path(
    get,
    path = "/api/v1/employee/leads/{id}",
    params(("id" = String, Path, description = "Lead id")),
    responses(
        (status = 200, description = "The lead"),
        (status = 404, description = "Lead not found", body = ServerErrorResponse),
        (status = 502, description = "Dashboard API unavailable", body = ServerErrorResponse)
    ),
    tag = "Employee"
)]
pub async fn get_lead_handler(
    State(state): State<Arc<DashboardState>>,
    Path(id): Path<String>,
) -> ApiResult<Lead> {
    EmployeeService::new(state.backend.as_ref())
        .lead(&id)
        .await
        .map(Json)
        .map_err(|err| backend_failure(err, "Failed to fetch lead"))
}

/// Handler for PUT /api/v1/employee/leads/{id}.
#[tracing::instrument(skip(state))]
#[utoipa::path(
    put,
    path = "/api/v1/employee/leads/{id}",
    params(("id" = String, Path, description = "Lead id")),
    request_body = LeadUpdate,
    responses(
        (status = 200, description = "Lead updated"),
        (status = 502, description = "Dashboard API unavailable", body = ServerErrorResponse)
    ),
    tag = "Employee"
)]
pub async fn update_lead_handler(
    State(state): State<Arc<DashboardState>>,
    Path(id): Path<String>,
    Json(update): Json<LeadUpdate>,
) -> ApiResult<Lead> {
    EmployeeService::new(state.backend.as_ref())
        .update_lead(&id, &update)
        .await
        .map(Json)
        .map_err(|err| backend_failure(err, "Failed to update lead"))
}

/// Creates and returns the employee API router.
pub fn create_api_router(state: Arc<DashboardState>) -> Router {
    Router::new()
        .route("/employee/leads", get(get_leads_handler))
        .route(
            "/employee/leads/{id}",
            get(get_lead_handler).put(update_lead_handler),
        )
        .with_state(state)
}
