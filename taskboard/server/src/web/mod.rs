use askama::Template;
use axum::Router;
use axum::http::StatusCode;
use axum::response::Html;
use std::sync::Arc;
use std::time::Duration;
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::backend::{BackendError, DashboardBackend, HttpBackend};
use crate::config::Config;
use crate::search::SearchDebouncer;

pub mod api;

/// State shared by every router: the upstream API and the search debouncer.
#[derive(Clone)]
pub struct DashboardState {
    pub backend: Arc<dyn DashboardBackend>,
    pub search: Arc<SearchDebouncer>,
}

impl DashboardState {
    pub fn new(backend: Arc<dyn DashboardBackend>, search_debounce: Duration) -> Self {
        Self {
            backend,
            search: Arc::new(SearchDebouncer::new(search_debounce)),
        }
    }

    pub fn from_config(config: &Config) -> Result<Self, BackendError> {
        let backend = HttpBackend::from_config(config)?;
        Ok(Self::new(
            Arc::new(backend),
            Duration::from_millis(config.search_debounce_ms),
        ))
    }
}

impl std::fmt::Debug for DashboardState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DashboardState")
            .field("search", &self.search)
            .finish_non_exhaustive()
    }
}

/// Custom error type for HTML handler operations.
#[derive(Debug, thiserror::Error)]
pub enum WebError {
    /// Represents an error during template rendering.
    #[error("Template rendering failed")]
    Template(#[from] askama::Error),
    /// Represents a failed call to the upstream API.
    #[error("Dashboard API call failed")]
    Backend(#[from] BackendError),
}

impl axum::response::IntoResponse for WebError {
    fn into_response(self) -> axum::response::Response {
        tracing::error!("Failed to render page: {:?}", self);
        let (status_code, user_facing_error_message) = match self {
            WebError::Backend(_) => (
                StatusCode::BAD_GATEWAY,
                "The dashboard data could not be loaded. Please try again later.",
            ),
            WebError::Template(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "An unexpected error occurred while processing your request. Please try again later.",
            ),
        };
        (
            status_code,
            Html(format!(
                "<h1>Something went wrong</h1><p>{}</p>",
                user_facing_error_message
            )),
        )
            .into_response()
    }
}

/// Builds the complete application router.
pub fn create_app(state: Arc<DashboardState>) -> Router {
    let pages = Router::new()
        .route("/health", axum::routing::get(health_check_handler))
        .route("/", axum::routing::get(welcome_handler))
        .merge(crate::admin::web::create_web_router(state.clone()))
        .merge(crate::teamlead::web::create_web_router());

    Router::new()
        .merge(pages)
        .merge(api::create_api_router(state))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CorsLayer::permissive()),
        )
}

#[tracing::instrument(skip(config))]
pub async fn start_web_server(config: Config) -> anyhow::Result<()> {
    let server_address = format!("0.0.0.0:{}", &config.port);
    let listener = tokio::net::TcpListener::bind(&server_address).await?;
    tracing::info!("Web server running on http://{}", server_address);

    let state = Arc::new(DashboardState::from_config(&config)?);
    tracing::info!("Forwarding dashboard API calls to {}", config.backend_url);

    axum::serve(listener, create_app(state)).await?;
    Ok(())
}

#[tracing::instrument]
pub async fn health_check_handler() -> &'static str {
    "OK"
}

#[tracing::instrument]
pub async fn welcome_handler() -> Result<Html<String>, WebError> {
    IndexTemplate.render().map(Html).map_err(WebError::from)
}

#[derive(Template)]
#[template(path = "index.html")]
struct IndexTemplate;
