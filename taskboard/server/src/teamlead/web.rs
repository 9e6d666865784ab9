use askama::Template;
use axum::{Router, extract::Query, response::Html, routing::get};

use crate::aggregate::LeadDistribution;
use crate::teamlead::api::v1::DistributionQuery;
use crate::web::WebError;

#[derive(Template)]
#[template(path = "teamlead/distribution_preview.html")]
pub struct DistributionPreviewTemplate {
    pub distribution: LeadDistribution,
}

/// Handler for the live lead distribution shown next to the subtask form.
#[tracing::instrument]
async fn distribution_preview_handler(
    Query(query): Query<DistributionQuery>,
) -> Result<Html<String>, WebError> {
    let template = DistributionPreviewTemplate {
        distribution: query.into(),
    };
    template.render().map(Html).map_err(WebError::from)
}

/// Creates and returns the team lead page router.
pub fn create_web_router() -> Router {
    Router::new().route(
        "/teamlead/distribution-preview",
        get(distribution_preview_handler),
    )
}
