//! services/api/src/web/mod.rs
//!
//! Assembles the HTTP application: contract routes, authorization, CORS and
//! the Swagger UI serving the generated document.

pub mod middleware;
pub mod problem;
pub mod rest;

pub use middleware::require_authorization;
pub use problem::HttpError;
pub use rest::{echo_query_handler, pull_signals_handler, push_signal_handler, status_handler};

use crate::config::Config;
use crate::contract::{PULL_SIGNALS_PATH, SIGNALS_PATH, STATUS_PATH};
use axum::{
    http::{
        header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE},
        Method,
    },
    middleware as axum_middleware,
    routing::{get, post},
    Router,
};
use contract_openapi::to_openapi_path;
use tower_http::cors::CorsLayer;
use utoipa::openapi::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

pub const SWAGGER_UI_PATH: &str = "/swagger-ui";
pub const OPENAPI_JSON_PATH: &str = "/api-docs/openapi.json";

/// Builds the router. `openapi` is served as-is by the Swagger UI.
pub fn create_app(config: &Config, openapi: OpenApi) -> Router {
    let cors = match &config.cors_allowed_origin {
        Some(origin) => CorsLayer::new()
            .allow_origin(origin.clone())
            .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
            .allow_headers([AUTHORIZATION, CONTENT_TYPE, ACCEPT]),
        None => CorsLayer::permissive(),
    };

    // Public routes (no auth required)
    let public_routes = Router::new()
        .route(STATUS_PATH, get(status_handler))
        .route("/test", get(echo_query_handler));

    // Signal routes (authorization header required)
    let signal_routes = Router::new()
        .route(SIGNALS_PATH, post(push_signal_handler))
        .route(&to_openapi_path(PULL_SIGNALS_PATH), get(pull_signals_handler))
        .layer(axum_middleware::from_fn(require_authorization));

    let api_router = Router::new()
        .merge(public_routes)
        .merge(signal_routes)
        .layer(cors);

    Router::new()
        .merge(api_router)
        .merge(SwaggerUi::new(SWAGGER_UI_PATH).url(OPENAPI_JSON_PATH, openapi))
}
