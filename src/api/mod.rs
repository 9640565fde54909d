pub mod handlers;
pub mod models;
pub mod openapi;

use crate::core::services::LedgerService;
use crate::infrastructure::{
    cache::in_memory::InMemoryCache, logging::in_memory::InMemoryLogging, storage::in_memory::InMemoryStorage,
};
use axum::{Router, routing::get};
use openapi::ApiDoc;
use std::sync::Arc;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

pub type AppService = LedgerService<InMemoryLogging, InMemoryStorage, InMemoryCache>;

/// Full application router: health check, `/api` routes and the OpenAPI UI.
pub fn app(service: Arc<AppService>) -> Router {
    Router::new()
        .route("/", get(|| async { "OK" }))
        .nest("/api", handlers::api_routes(service))
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
}
