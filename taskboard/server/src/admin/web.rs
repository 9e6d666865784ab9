use askama::Template;
use axum::{Router, extract::State, response::Html, routing::get};
use std::sync::Arc;

use crate::admin::AdminService;
use crate::aggregate::StatusCounts;
use crate::web::{DashboardState, WebError};

#[derive(Template)]
#[template(path = "stats_cards.html")]
pub struct StatsCardsTemplate<'a> {
    pub title: &'a str,
    pub stats: StatusCounts,
}

/// Handler for the manager task stats cards partial.
#[tracing::instrument(skip(state))]
async fn manager_task_stats_handler(
    State(state): State<Arc<DashboardState>>,
) -> Result<Html<String>, WebError> {
    let overview = AdminService::new(state.backend.as_ref())
        .manager_tasks()
        .await?;
    let template = StatsCardsTemplate {
        title: "Manager tasks",
        stats: overview.stats,
    };
    template.render().map(Html).map_err(WebError::from)
}

/// Creates and returns the admin page router.
pub fn create_web_router(state: Arc<DashboardState>) -> Router {
    Router::new()
        .route("/admin/manager-tasks/stats", get(manager_task_stats_handler))
        .with_state(state)
}
