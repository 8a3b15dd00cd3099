//! Top-level router: nests every API module and applies the shared layers.

use std::time::Duration;

use axum::extract::DefaultBodyLimit;
use axum::http::{header, HeaderValue, Method};
use axum::routing::get;
use axum::{middleware, Router};
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::services::ServeDir;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use crate::config::{ServerConfig, StorageConfig};

use super::account::account_routes;
use super::admin::admin_routes;
use super::middleware::auth_middleware;
use super::response::ApiResponse;
use super::state::AppState;
use super::user::user_routes;

/// Room for the non-file multipart fields on top of the image itself.
const FORM_OVERHEAD_BYTES: usize = 64 * 1024;

/// Settings the router needs from configuration.
#[derive(Debug, Clone)]
pub struct RouterOptions {
    pub cors_origins: Vec<String>,
    pub request_timeout: Duration,
    pub max_body_bytes: usize,
    /// Mount path and directory of locally stored images.
    pub uploads: Option<(String, std::path::PathBuf)>,
}

impl RouterOptions {
    pub fn from_config(server: &ServerConfig, storage: &StorageConfig) -> Self {
        let uploads = storage
            .public_base_url
            .starts_with('/')
            .then(|| (storage.public_base_url.clone(), storage.upload_dir.clone()));

        Self {
            cors_origins: server.cors_origins_list(),
            request_timeout: Duration::from_secs(server.request_timeout_secs),
            max_body_bytes: storage.max_upload_bytes + FORM_OVERHEAD_BYTES,
            uploads,
        }
    }
}

impl Default for RouterOptions {
    fn default() -> Self {
        Self::from_config(&ServerConfig::default(), &StorageConfig::default())
    }
}

fn cors_layer(origins: &[String]) -> CorsLayer {
    let allow_origin = if origins.is_empty() {
        AllowOrigin::from(Any)
    } else {
        let values: Vec<HeaderValue> = origins
            .iter()
            .filter_map(|origin| match origin.parse::<HeaderValue>() {
                Ok(value) => Some(value),
                Err(e) => {
                    tracing::warn!("CORS: Invalid origin '{}': {}", origin, e);
                    None
                }
            })
            .collect();
        AllowOrigin::list(values)
    };

    CorsLayer::new()
        .allow_origin(allow_origin)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::PATCH,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION, header::ACCEPT])
}

async fn health() -> ApiResponse<()> {
    ApiResponse::message("OK")
}

/// Create the complete application router.
///
/// # Routes
///
/// - `GET /health`
/// - `/api/auth/*` - see `account_routes`
/// - `/api/admin/*` - see `admin_routes`
/// - `/api/user/*` - see `user_routes`
pub fn app_router(state: AppState, options: &RouterOptions) -> Router {
    let api = Router::new()
        .nest("/auth", account_routes())
        .nest("/admin", admin_routes())
        .nest("/user", user_routes())
        .layer(middleware::from_fn_with_state(
            state.tokens.clone(),
            auth_middleware,
        ));

    let mut router = Router::new()
        .route("/health", get(health))
        .nest("/api", api)
        .with_state(state);

    if let Some((path, dir)) = &options.uploads {
        router = router.nest_service(path, ServeDir::new(dir));
    }

    router
        .layer(DefaultBodyLimit::max(options.max_body_bytes))
        .layer(TimeoutLayer::new(options.request_timeout))
        .layer(cors_layer(&options.cors_origins))
        .layer(TraceLayer::new_for_http())
}
