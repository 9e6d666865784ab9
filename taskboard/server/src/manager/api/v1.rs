use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, patch},
};
use serde::Deserialize;
use std::sync::Arc;
use utoipa::IntoParams;

use crate::manager::{ManagerService, PostsView, SubmissionsView};
use crate::model::{
    Post, PostDraft, PostPatch, Submission, SubmissionQuery, SubmissionUpdate, TaskStatus,
};
use crate::search::Settled;
use crate::view::TaskListView;
use crate::web::DashboardState;
use crate::web::api::v1::{
    ApiError, ApiResult, DeleteQuery, ServerErrorResponse, backend_failure, require_confirmation,
    validation_failure,
};

/// Query parameters of the submissions listing.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct SubmissionsParams {
    /// Page number, starting at 1
    #[serde(default)]
    page: Option<u32>,
    /// Submissions per page
    #[serde(default)]
    limit: Option<u32>,
    /// Free-text search
    #[serde(default)]
    search: Option<String>,
    /// Only submissions with this status
    #[serde(default)]
    #[param(value_type = Option<String>)]
    status: Option<TaskStatus>,
    /// Identifies the search box sending the request.
    #[serde(default)]
    client: Option<String>,
    /// Grows with every keystroke of `client`.
    #[serde(default)]
    seq: Option<u64>,
}

impl SubmissionsParams {
    fn to_query(&self) -> SubmissionQuery {
        let defaults = SubmissionQuery::default();
        SubmissionQuery {
            page: self.page.filter(|page| *page > 0).unwrap_or(defaults.page),
            limit: self.limit.filter(|limit| *limit > 0).unwrap_or(defaults.limit),
            search: self
                .search
                .as_deref()
                .map(str::trim)
                .filter(|search| !search.is_empty())
                .map(str::to_string),
            status: self.status,
        }
    }
}

/// Handler for GET /api/v1/manager/posts.
#[tracing::instrument(skip(state))]
#[utoipa::path(
    get,
    path = "/api/v1/manager/posts",
    responses(
        (status = 200, description = "Manager posts", body = PostsView),
        (status = 502, description = "Dashboard API unavailable", body = ServerErrorResponse)
    ),
    tag = "Manager"
)]
pub async fn get_posts_handler(State(state): State<Arc<DashboardState>>) -> ApiResult<PostsView> {
    ManagerService::new(state.backend.as_ref())
        .posts()
        .await
        .map(Json)
        .map_err(|err| backend_failure(err, "Failed to fetch posts"))
}

/// Handler for POST /api/v1/manager/posts.
#[tracing::instrument(skip(state))]
#[utoipa::path(
    post,
    path = "/api/v1/manager/posts",
    request_body = PostDraft,
    responses(
        (status = 201, description = "Post created"),
        (status = 422, description = "Invalid post", body = ServerErrorResponse),
        (status = 502, description = "Dashboard API unavailable", body = ServerErrorResponse)
    ),
    tag = "Manager"
)]
pub async fn create_post_handler(
    State(state): State<Arc<DashboardState>>,
    Json(draft): Json<PostDraft>,
) -> Result<(StatusCode, Json<Post>), ApiError> {
    if draft.title.trim().is_empty() {
        return Err(validation_failure("Post title must not be blank"));
    }
    ManagerService::new(state.backend.as_ref())
        .create_post(&draft)
        .await
        .map(|post| (StatusCode::CREATED, Json(post)))
        .map_err(|err| backend_failure(err, "Failed to create post"))
}

/// Handler for PATCH /api/v1/manager/posts/{id}.
#[tracing::instrument(skip(state))]
#[utoipa::path(
    patch,
    path = "/api/v1/manager/posts/{id}",
    params(("id" = String, Path, description = "Post id")),
    request_body = PostPatch,
    responses(
        (status = 200, description = "Post updated"),
        (status = 502, description = "Dashboard API unavailable", body = ServerErrorResponse)
    ),
    tag = "Manager"
)]
pub async fn update_post_handler(
    State(state): State<Arc<DashboardState>>,
    Path(id): Path<String>,
    Json(patch): Json<PostPatch>,
) -> ApiResult<Post> {
    ManagerService::new(state.backend.as_ref())
        .update_post(&id, &patch)
        .await
        .map(Json)
        .map_err(|err| backend_failure(err, "Failed to update post"))
}

/// Handler for DELETE /api/v1/manager/posts/{id}?confirm=true.
#[tracing::instrument(skip(state))]
#[utoipa::path(
    delete,
    path = "/api/v1/manager/posts/{id}",
    params(("id" = String, Path, description = "Post id")),
    responses(
        (status = 204, description = "Post deleted"),
        (status = 400, description = "Delete not confirmed", body = ServerErrorResponse),
        (status = 502, description = "Dashboard API unavailable", body = ServerErrorResponse)
    ),
    tag = "Manager"
)]
pub async fn delete_post_handler(
    State(state): State<Arc<DashboardState>>,
    Path(id): Path<String>,
    Query(query): Query<DeleteQuery>,
) -> Result<StatusCode, ApiError> {
    require_confirmation(&query)?;
    ManagerService::new(state.backend.as_ref())
        .delete_post(&id)
        .await
        .map(|_| StatusCode::NO_CONTENT)
        .map_err(|err| backend_failure(err, "Failed to delete post"))
}

/// Handler for GET /api/v1/manager/submissions.
///
/// Requests carrying `client` and `seq` are debounced; one replaced by a
/// newer request of the same client is answered with 204 and never reaches
/// the upstream API.
#[tracing::instrument(skip(state))]
#[utoipa::path(
    get,
    path = "/api/v1/manager/submissions",
    responses(
        (status = 200, description = "One page of submissions", body = SubmissionsView),
        (status = 204, description = "Replaced by a newer search request"),
        (status = 502, description = "Dashboard API unavailable", body = ServerErrorResponse)
    ),
    tag = "Manager"
)]
pub async fn get_submissions_handler(
    State(state): State<Arc<DashboardState>>,
    Query(params): Query<SubmissionsParams>,
) -> Result<Response, ApiError> {
    if let (Some(client), Some(seq)) = (params.client.as_deref(), params.seq) {
        if state.search.settle(client, seq).await == Settled::Superseded {
            return Ok(StatusCode::NO_CONTENT.into_response());
        }
    }

    ManagerService::new(state.backend.as_ref())
        .submissions(&params.to_query(), params.seq)
        .await
        .map(|view| Json(view).into_response())
        .map_err(|err| backend_failure(err, "Failed to fetch submissions"))
}

/// Handler for GET /api/v1/manager/submissions/{id}.
#[tracing::instrument(skip(state))]
#[utoipa::path(
    get,
    path = "/api/v1/manager/submissions/{id}",
    params(("id" = String, Path, description = "Submission id")),
    responses(
        (status = 200, description = "The submission"),
        (status = 404, description = "Submission not found", body = ServerErrorResponse),
        (status = 502, description = "Dashboard API unavailable", body = ServerErrorResponse)
    ),
    tag = "Manager"
)]
pub async fn get_submission_handler(
    State(state): State<Arc<DashboardState>>,
    Path(id): Path<String>,
) -> ApiResult<Submission> {
    ManagerService::new(state.backend.as_ref())
        .submission(&id)
        .await
        .map(Json)
        .map_err(|err| backend_failure(err, "Failed to fetch submission"))
}

/// Handler for PUT /api/v1/manager/submissions/{id}.
#[tracing::instrument(skip(state))]
#[utoipa::path(
    put,
    path = "/api/v1/manager/submissions/{id}",
    params(("id" = String, Path, description = "Submission id")),
    request_body = SubmissionUpdate,
    responses(
        (status = 200, description = "Submission updated"),
        (status = 502, description = "Dashboard API unavailable", body = ServerErrorResponse)
    ),
    tag = "Manager"
)]
pub async fn update_submission_handler(
    State(state): State<Arc<DashboardState>>,
    Path(id): Path<String>,
    Json(update): Json<SubmissionUpdate>,
) -> ApiResult<Submission> {
    ManagerService::new(state.backend.as_ref())
        .update_submission(&id, &update)
        .await
        .map(Json)
        .map_err(|err| backend_failure(err, "Failed to update submission"))
}

/// Handler for DELETE /api/v1/manager/submissions/{id}?confirm=true.
#[tracing::instrument(skip(state))]
#[utoipa::path(
    delete,
    path = "/api/v1/manager/submissions/{id}",
    params(("id" = String, Path, description = "Submission id")),
    responses(
        (status = 204, description = "Submission deleted"),
        (status = 400, description = "Delete not confirmed", body = ServerErrorResponse),
        (status = 502, description = "Dashboard API unavailable", body = ServerErrorResponse)
    ),
    tag = "Manager"
)]
pub async fn delete_submission_handler(
    State(state): State<Arc<DashboardState>>,
    Path(id): Path<String>,
    Query(query): Query<DeleteQuery>,
) -> Result<StatusCode, ApiError> {
    require_confirmation(&query)?;
    ManagerService::new(state.backend.as_ref())
        .delete_submission(&id)
        .await
        .map(|_| StatusCode::NO_CONTENT)
        .map_err(|err| backend_failure(err, "Failed to delete submission"))
}

/// Handler for GET /api/v1/manager/subtasks.
#[tracing::instrument(skip(state))]
#[utoipa::path(
    get,
    path = "/api/v1/manager/subtasks",
    responses(
        (status = 200, description = "Subtasks with status counters", body = TaskListView),
        (status = 502, description = "Dashboard API unavailable", body = ServerErrorResponse)
    ),
    tag = "Manager"
)]
pub async fn get_subtasks_handler(
    State(state): State<Arc<DashboardState>>,
) -> ApiResult<TaskListView> {
    ManagerService::new(state.backend.as_ref())
        .subtasks()
        .await
        .map(Json)
        .map_err(|err| backend_failure(err, "Failed to fetch subtasks"))
}

/// Creates and returns the manager API router.
pub fn create_api_router(state: Arc<DashboardState>) -> Router {
    Router::new()
        .route(
            "/manager/posts",
            get(get_posts_handler).post(create_post_handler),
        )
        .route(
            "/manager/posts/{id}",
            patch(update_post_handler).delete(delete_post_handler),
        )
        .route("/manager/submissions", get(get_submissions_handler))
        .route(
            "/manager/submissions/{id}",
            get(get_submission_handler)
                .put(update_submission_handler)
                .delete(delete_submission_handler),
        )
        .route("/manager/subtasks", get(get_subtasks_handler))
        .with_state(state)
}
