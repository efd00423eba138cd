//! Public storefront routes.
//!
//! ```text
//! GET, OPTIONS /apps/countdown/settings   app proxy subpath
//! GET, OPTIONS /api/storefront/settings   direct storefront call
//! GET, OPTIONS /api/settings              signed app proxy call
//! ```
//!
//! Panics and timeouts inside these routes are handled here so the 500 and
//! 408 responses still pass through the CORS middleware.

use std::time::Duration;

use axum::http::StatusCode;
use axum::routing::get;
use axum::{middleware, Router};
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::timeout::TimeoutLayer;

use crate::error::panic_response;
use crate::handlers::proxy_settings;
use crate::middleware::proxy_cors;
use crate::state::AppState;

pub const APP_PROXY_SETTINGS_PATH: &str = "/apps/countdown/settings";
pub const STOREFRONT_SETTINGS_PATH: &str = "/api/storefront/settings";
pub const SIGNED_PROXY_SETTINGS_PATH: &str = "/api/settings";

pub fn router(request_timeout: Duration) -> Router<AppState> {
    Router::new()
        .route(
            APP_PROXY_SETTINGS_PATH,
            get(proxy_settings::get_settings).options(proxy_settings::preflight),
        )
        .route(
            STOREFRONT_SETTINGS_PATH,
            get(proxy_settings::get_settings).options(proxy_settings::preflight),
        )
        .route(
            SIGNED_PROXY_SETTINGS_PATH,
            get(proxy_settings::get_signed_settings).options(proxy_settings::preflight),
        )
        .layer(CatchPanicLayer::custom(panic_response))
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            request_timeout,
        ))
        .layer(middleware::from_fn(proxy_cors::apply))
}
