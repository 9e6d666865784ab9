use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    routing::get,
};
use serde::Deserialize;
use std::sync::Arc;
use utoipa::IntoParams;

use crate::aggregate::LeadDistribution;
use crate::model::Role;
use crate::teamlead::{PeopleView, SubtaskError, SubtaskForm, TeamLeadService};
use crate::view::{TaskListView, TaskView};
use crate::web::DashboardState;
use crate::web::api::v1::{
    ApiError, ApiResult, DeleteQuery, ServerErrorResponse, backend_failure, require_confirmation,
    validation_failure,
};

fn subtask_failure(err: SubtaskError, action: &str) -> ApiError {
    match err {
        SubtaskError::Invalid(err) => validation_failure(err),
        SubtaskError::Backend(err) => backend_failure(err, action),
    }
}

/// People listings a team lead can assign from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PeopleGroup {
    Employees,
    Managers,
    Teamleads,
}

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Path)]
pub struct PeoplePath {
    /// One of employees, managers or teamleads
    #[param(value_type = String)]
    group: PeopleGroup,
}

impl From<PeopleGroup> for Role {
    fn from(group: PeopleGroup) -> Self {
        match group {
            PeopleGroup::Employees => Role::Employee,
            PeopleGroup::Managers => Role::Manager,
            PeopleGroup::Teamleads => Role::TeamLead,
        }
    }
}

#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct DistributionQuery {
    /// Leads required by the subtask
    #[serde(default)]
    total: u32,
    /// Number of selected people
    #[serde(default)]
    assignees: usize,
}

impl From<DistributionQuery> for LeadDistribution {
    fn from(query: DistributionQuery) -> Self {
        LeadDistribution::new(query.total, query.assignees)
    }
}

/// Handler for GET /api/v1/teamlead/subtasks.
#[tracing::instrument(skip(state))]
#[utoipa::path(
    get,
    path = "/api/v1/teamlead/subtasks",
    operation_id = "get_teamlead_subtasks",
    responses(
        (status = 200, description = "Subtasks with status counters", body = TaskListView),
        (status = 502, description = "Dashboard API unavailable", body = ServerErrorResponse)
    ),
    tag = "TeamLead"
)]
pub async fn get_subtasks_handler(
    State(state): State<Arc<DashboardState>>,
) -> ApiResult<TaskListView> {
    TeamLeadService::new(state.backend.as_ref())
        .subtasks()
        .await
        .map(Json)
        .map_err(|err| backend_failure(err, "Failed to fetch subtasks"))
}

/// Handler for POST /api/v1/teamlead/subtasks.
///
/// The lead target is split across the selected people before the subtask
/// is forwarded.
#[tracing::instrument(skip(state))]
#[utoipa::path(
    post,
    path = "/api/v1/teamlead/subtasks",
    request_body = SubtaskForm,
    responses(
        (status = 201, description = "Subtask created", body = TaskView),
        (status = 422, description = "Invalid subtask", body = ServerErrorResponse),
        (status = 502, description = "Dashboard API unavailable", body = ServerErrorResponse)
    ),
    tag = "TeamLead"
)]
pub async fn create_subtask_handler(
    State(state): State<Arc<DashboardState>>,
    Json(form): Json<SubtaskForm>,
) -> Result<(StatusCode, Json<TaskView>), ApiError> {
    TeamLeadService::new(state.backend.as_ref())
        .create_subtask(form)
        .await
        .map(|view| (StatusCode::CREATED, Json(view)))
        .map_err(|err| subtask_failure(err, "Failed to create subtask"))
}

/// Handler for GET /api/v1/teamlead/subtasks/{id}.
#[tracing::instrument(skip(state))]
#[utoipa::path(
    get,
    path = "/api/v1/teamlead/subtasks/{id}",
    params(("id" = String, Path, description = "Subtask id")),
    responses(
        (status = 200, description = "Subtask with feedback feed", body = TaskView),
        (status = 404, description = "Subtask not found", body = ServerErrorResponse),
        (status = 502, description = "Dashboard API unavailable", body = ServerErrorResponse)
    ),
    tag = "TeamLead"
)]
pub async fn get_subtask_handler(
    State(state): State<Arc<DashboardState>>,
    Path(id): Path<String>,
) -> ApiResult<TaskView> {
    TeamLeadService::new(state.backend.as_ref())
        .subtask(&id)
        .await
        .map(Json)
        .map_err(|err| backend_failure(err, "Failed to fetch subtask"))
}

/// Handler for PUT /api/v1/teamlead/subtasks/{id}.
#[tracing::instrument(skip(state))]
#[utoipa::path(
    put,
    path = "/api/v1/teamlead/subtasks/{id}",
    params(("id" = String, Path, description = "Subtask id")),
    request_body = SubtaskForm,
    responses(
        (status = 200, description = "Subtask updated", body = TaskView),
        (status = 422, description = "Invalid subtask", body = ServerErrorResponse),
        (status = 502, description = "Dashboard API unavailable", body = ServerErrorResponse)
    ),
    tag = "TeamLead"
)]
pub async fn update_subtask_handler(
    State(state): State<Arc<DashboardState>>,
    Path(id): Path<String>,
    Json(form): Json<SubtaskForm>,
) -> ApiResult<TaskView> {
    TeamLeadService::new(state.backend.as_ref())
        .update_subtask(&id, form)
        .await
        .map(Json)
        .map_err(|err| subtask_failure(err, "Failed to update subtask"))
}

/// Handler for DELETE /api/v1/teamlead/subtasks/{id}?confirm=true.
#[tracing::instrument(skip(state))]
#[utoipa::path(
    delete,
    path = "/api/v1/teamlead/subtasks/{id}",
    params(("id" = String, Path, description = "Subtask id")),
    responses(
        (status = 204, description = "Subtask deleted"),
        (status = 400, description = "Delete not confirmed", body = ServerErrorResponse),
        (status = 502, description = "Dashboard API unavailable", body = ServerErrorResponse)
    ),
    tag = "TeamLead"
)]
pub async fn delete_subtask_handler(
    State(state): State<Arc<DashboardState>>,
    Path(id): Path<String>,
    Query(query): Query<DeleteQuery>,
) -> Result<StatusCode, ApiError> {
    require_confirmation(&query)?;
    TeamLeadService::new(state.backend.as_ref())
        .delete_subtask(&id)
        .await
        .map(|_| StatusCode::NO_CONTENT)
        .map_err(|err| backend_failure(err, "Failed to delete subtask"))
}

/// Handler for GET /api/v1/teamlead/distribution.
#[tracing::instrument]
#[utoipa::path(
    get,
    path = "/api/v1/teamlead/distribution",
    responses(
        (status = 200, description = "How the leads split", body = LeadDistribution)
    ),
    tag = "TeamLead"
)]
pub async fn get_distribution_handler(
    Query(query): Query<DistributionQuery>,
) -> Json<LeadDistribution> {
    Json(query.into())
}

/// Handler for GET /api/v1/teamlead/{group}.
#[tracing::instrument(skip(state))]
#[utoipa::path(
    get,
    path = "/api/v1/teamlead/{group}",
    responses(
        (status = 200, description = "People of the requested role", body = PeopleView),
        (status = 502, description = "Dashboard API unavailable", body = ServerErrorResponse)
    ),
    tag = "TeamLead"
)]
pub async fn get_people_handler(
    State(state): State<Arc<DashboardState>>,
    Path(path): Path<PeoplePath>,
) -> ApiResult<PeopleView> {
    TeamLeadService::new(state.backend.as_ref())
        .people(Role::from(path.group))
        .await
        .map(Json)
        .map_err(|err| backend_failure(err, "Failed to fetch people"))
}

/// Creates and returns the team lead API router.
pub fn create_api_router(state: Arc<DashboardState>) -> Router {
    Router::new()
        .route(
            "/teamlead/subtasks",
            get(get_subtasks_handler).post(create_subtask_handler),
        )
        .route(
            "/teamlead/subtasks/{id}",
            get(get_subtask_handler)
                .put(update_subtask_handler)
                .delete(delete_subtask_handler),
        )
        .route("/teamlead/distribution", get(get_distribution_handler))
        .route("/teamlead/{group}", get(get_people_handler))
        .with_state(state)
}
