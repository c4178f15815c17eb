use std::sync::Arc;

use axum::{
    routing::post,
    Router,
};
use tower_http::cors::CorsLayer;
use tower::ServiceBuilder;
use axum::extract::DefaultBodyLimit;

use crate::config::SnapConfig;
use crate::error::Result;
use crate::snap::Snapper;
use super::handlers::*;

/// Builds the router. Fails on an invalid config or a CRS pair the backend cannot build, so a
/// bad setup is reported at startup rather than on the first request.
pub fn create_router(config: SnapConfig) -> Result<Router> {
    config.validate()?;
    Snapper::from_config(&config)?;

    let body_limit = config.server.body_limit_bytes;

    let router = Router::new()
        .route("/api/perpendicular/azimuth", post(perpendicular_azimuth))
        .route("/api/perpendicular/destination", post(perpendicular_destination))
        .route("/api/fallback", post(fallback_path))
        .route("/api/snap", post(snap))
        .route("/api/batch", post(upload_batch))
        .layer(
            ServiceBuilder::new()
                .layer(DefaultBodyLimit::max(body_limit))
                .layer(CorsLayer::permissive())
        )
        .with_state(Arc::new(config));

    Ok(router)
}
