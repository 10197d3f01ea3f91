//! Route configuration and setup

use crate::auth::middleware::auth_middleware;
use crate::handlers;
use crate::state::AppState;
use axum::{
    extract::DefaultBodyLimit,
    http::{HeaderValue, Method},
    routing::{get, post},
    Router,
};
use bootcamp_core::Config;
use std::sync::Arc;
use tower::limit::ConcurrencyLimitLayer;
use tower_http::cors::{Any, CorsLayer};
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

// Multipart framing on top of the picture itself. Oversized pictures fail
// inside the multipart stream and get the usual upload redirect; the outer
// hard limit only stops bodies far beyond that.
const UPLOAD_OVERHEAD_BYTES: usize = 64 * 1024;

/// Setup all application routes
pub fn setup_routes(config: &Config, state: Arc<AppState>) -> Result<Router<()>, anyhow::Error> {
    let cors = setup_cors(config)?;
    crate::error::set_production_mode(config.is_production());

    let protected = protected_routes(config).route_layer(axum::middleware::from_fn_with_state(
        state.clone(),
        auth_middleware,
    ));

    let mut app = public_routes().merge(protected);

    let media_prefix = config.media_url.trim_end_matches('/');
    if media_prefix.starts_with('/') && media_prefix.len() > 1 {
        app = app.nest_service(media_prefix, ServeDir::new(&config.media_root));
        tracing::info!(prefix = %media_prefix, "Serving media files");
    } else {
        tracing::info!(media_url = %config.media_url, "Media served externally");
    }

    let http_concurrency_limit = std::env::var("HTTP_CONCURRENCY_LIMIT")
        .ok()
        .and_then(|s| s.parse::<usize>().ok())
        .unwrap_or(1_000)
        .max(1);
    tracing::info!(
        http_concurrency_limit = http_concurrency_limit,
        "HTTP concurrency limit layer enabled"
    );

    let app = app
        .layer(ConcurrencyLimitLayer::new(http_concurrency_limit))
        .layer(RequestBodyLimitLayer::new(
            config
                .max_picture_size_bytes
                .saturating_mul(2)
                .saturating_add(UPLOAD_OVERHEAD_BYTES),
        ))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    Ok(app)
}

fn public_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/", get(handlers::feed::home))
        .route("/network/", get(handlers::network::network))
        .route("/profile/{username}/", get(handlers::profile::profile))
        .route("/login/", post(handlers::login::login))
        .route("/health", get(handlers::health::health_check))
}

fn protected_routes(config: &Config) -> Router<Arc<AppState>> {
    let upload_limit = config
        .max_picture_size_bytes
        .saturating_add(UPLOAD_OVERHEAD_BYTES);

    let upload = Router::new()
        .route(
            "/settings/picture/upload/",
            post(handlers::picture::upload_picture),
        )
        .layer(DefaultBodyLimit::max(upload_limit));

    Router::new()
        .route(
            "/settings/",
            get(handlers::settings::get_settings).post(handlers::settings::update_settings),
        )
        .route(
            "/settings/password/",
            get(handlers::password::get_password).post(handlers::password::change_password),
        )
        .route("/settings/picture/", get(handlers::picture::picture_page))
        .route(
            "/settings/picture/save/",
            post(handlers::picture::save_picture),
        )
        .merge(upload)
}

fn setup_cors(config: &Config) -> Result<CorsLayer, anyhow::Error> {
    let cors = if config.cors_origins.iter().any(|o| o == "*") {
        tracing::warn!("CORS configured to allow all origins - not recommended for production");
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
            .allow_headers(Any)
    } else {
        let origins = config
            .cors_origins
            .iter()
            .map(|o| o.parse::<HeaderValue>())
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| anyhow::anyhow!("Invalid CORS origin: {}", e))?;
        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
            .allow_headers(Any)
    };
    Ok(cors)
}
