//! Route definitions for the admin settings form, mounted at `/api/admin`.
//!
//! ```text
//! GET  /settings -> get_settings
//! POST /settings -> save_settings     (form-encoded)
//! PUT  /settings -> replace_settings  (JSON)
//! ```

use axum::routing::get;
use axum::Router;

use crate::handlers::admin_settings;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new().route(
        "/settings",
        get(admin_settings::get_settings)
            .post(admin_settings::save_settings)
            .put(admin_settings::replace_settings),
    )
}
