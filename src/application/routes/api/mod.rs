pub mod decor;
pub mod health;

use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post};

use crate::application::rate_limit::RateLimitLayer;
use crate::application::state::AppState;

/// Body limit for `/api/decor`: the 6 MiB photo plus form overhead. Anything
/// larger is reported as an oversized photo.
const DECOR_BODY_LIMIT_BYTES: usize = 8 * 1024 * 1024;

pub(super) fn router(decor_rate_limit_per_minute: u32) -> axum::Router<AppState> {
    axum::Router::new()
        .route("/test", get(health::liveness))
        .merge(decor_routes(decor_rate_limit_per_minute))
}

fn decor_routes(rate_limit_per_minute: u32) -> axum::Router<AppState> {
    let router = axum::Router::new().route(
        "/decor",
        post(decor::decorate).layer(DefaultBodyLimit::max(DECOR_BODY_LIMIT_BYTES)),
    );

    // 0 disables the limit
    if rate_limit_per_minute == 0 {
        router
    } else {
        router.layer(RateLimitLayer::per_minute(rate_limit_per_minute))
    }
}
