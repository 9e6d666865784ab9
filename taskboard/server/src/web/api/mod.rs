use axum::{Json, Router, routing::get};
use std::sync::Arc;
use utoipa::OpenApi;

use crate::web::DashboardState;

pub mod v1;

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::admin::api::v1::get_employee_task_handler,
        crate::admin::api::v1::review_employee_task_handler,
        crate::admin::api::v1::get_manager_tasks_handler,
        crate::manager::api::v1::get_posts_handler,
        crate::manager::api::v1::create_post_handler,
        crate::manager::api::v1::update_post_handler,
        crate::manager::api::v1::delete_post_handler,
        crate::manager::api::v1::get_submissions_handler,
        crate::manager::api::v1::get_submission_handler,
        crate::manager::api::v1::update_submission_handler,
        crate::manager::api::v1::delete_submission_handler,
        crate::manager::api::v1::get_subtasks_handler,
        crate::teamlead::api::v1::get_subtasks_handler,
        crate::teamlead::api::v1::create_subtask_handler,
        crate::teamlead::api::v1::get_subtask_handler,
        crate::teamlead::api::v1::update_subtask_handler,
        crate::teamlead::api::v1::delete_subtask_handler,
        crate::teamlead::api::v1::get_distribution_handler,
        crate::teamlead::api::v1::get_people_handler,
        crate::employee::api::v1::get_leads_handler,
        crate::employee::api::v1::get_lead_handler,
        crate::employee::api::v1::update_lead_handler,
    ),
    tags(
        (name = "Admin", description = "Employee and manager task review"),
        (name = "Manager", description = "Posts, submissions and subtasks"),
        (name = "TeamLead", description = "Subtask assignment and lead distribution"),
        (name = "Employee", description = "Personal lead tracking"),
    )
)]
pub struct ApiDoc;

#[tracing::instrument]
async fn openapi_handler() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

/// Creates the API routes for JSON API endpoints.
pub fn create_api_router(state: Arc<DashboardState>) -> Router {
    let api_routes = Router::new()
        .merge(crate::admin::api::v1::create_api_router(state.clone()))
        .merge(crate::manager::api::v1::create_api_router(state.clone()))
        .merge(crate::teamlead::api::v1::create_api_router(state.clone()))
        .merge(crate::employee::api::v1::create_api_router(state));
    Router::new()
        .nest("/api/v1", api_routes)
        .route("/api-docs/openapi.json", get(openapi_handler))
}
