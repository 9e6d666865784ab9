use axum::{
    Json, Router,
    extract::{Path, State},
    routing::get,
};
use std::sync::Arc;

use crate::admin::AdminService;
use crate::model::EmployeeTaskUpdate;
use crate::view::{TaskListView, TaskView};
use crate::web::DashboardState;
use crate::web::api::v1::{ApiResult, ServerErrorResponse, backend_failure};

/// Handler for GET /api/v1/admin/employee-tasks/{id}.
#[tracing::instrument(skip(state))]
#[utoipa::path(
    get,
    path = "/api/v1/admin/employee-tasks/{id}",
    params(("id" = String, Path, description = "Employee task id")),
    responses(
        (status = 200, description = "Task with feedback feed", body = TaskView),
        (status = 404, description = "Task not found", body = ServerErrorResponse),
        (status = 502, description = "Dashboard API unavailable", body = ServerErrorResponse)
    ),
    tag = "Admin"
)]
pub async fn get_employee_task_handler(
    State(state): State<Arc<DashboardState>>,
    Path(id): Path<String>,
) -> ApiResult<TaskView> {
    AdminService::new(state.backend.as_ref())
        .employee_task(&id)
        .await
        .map(Json)
        .map_err(|err| backend_failure(err, "Failed to fetch employee task"))
}

/// Handler for POST /api/v1/admin/employee-tasks/{id}.
#[tracing::instrument(skip(state))]
#[utoipa::path(
    post,
    path = "/api/v1/admin/employee-tasks/{id}",
    params(("id" = String, Path, description = "Employee task id")),
    request_body = EmployeeTaskUpdate,
    responses(
        (status = 200, description = "Updated task", body = TaskView),
        (status = 502, description = "Dashboard API unavailable", body = ServerErrorResponse)
    ),
    tag = "Admin"
)]
pub async fn review_employee_task_handler(
    State(state): State<Arc<DashboardState>>,
    Path(id): Path<String>,
    Json(update): Json<EmployeeTaskUpdate>,
) -> ApiResult<TaskView> {
    AdminService::new(state.backend.as_ref())
        .review_employee_task(&id, &update)
        .await
        .map(Json)
        .map_err(|err| backend_failure(err, "Failed to update employee task"))
}

/// Handler for GET /api/v1/admin/manager-tasks.
#[tracing::instrument(skip(state))]
#[utoipa::path(
    get,
    path = "/api/v1/admin/manager-tasks",
    responses(
        (status = 200, description = "Manager tasks with status counters", body = TaskListView),
        (status = 502, description = "Dashboard API unavailable", body = ServerErrorResponse)
    ),
    tag = "Admin"
)]
pub async fn get_manager_tasks_handler(
    State(state): State<Arc<DashboardState>>,
) -> ApiResult<TaskListView> {
    AdminService::new(state.backend.as_ref())
        .manager_tasks()
        .await
        .map(Json)
        .map_err(|err| backend_failure(err, "Failed to fetch manager tasks"))
}

/// Creates and returns the admin API router.
pub fn create_api_router(state: Arc<DashboardState>) -> Router {
    Router::new()
        .route(
            "/admin/employee-tasks/{id}",
            get(get_employee_task_handler).post(review_employee_task_handler),
        )
        .route("/admin/manager-tasks", get(get_manager_tasks_handler))
        .with_state(state)
}
