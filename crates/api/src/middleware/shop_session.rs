//! Session-token extractor for admin handlers.

use axum::extract::FromRequestParts;
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;
use countdown_core::error::CoreError;

use crate::auth::session_token::validate_session_token;
use crate::error::AppError;
use crate::state::AppState;

/// Authenticated merchant session extracted from a Bearer session token.
///
/// ```ignore
/// async fn my_handler(session: ShopSession) -> AppResult<Json<()>> {
///     tracing::info!(shop = %session.shop, "handling request");
///     Ok(Json(()))
/// }
/// ```
#[derive(Debug, Clone)]
pub struct ShopSession {
    /// The shop domain the token is bound to.
    pub shop: String,
    /// Staff member id, when present in the token.
    pub user_id: Option<String>,
}

impl FromRequestParts<AppState> for ShopSession {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let auth_header = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| {
                AppError::Core(CoreError::Unauthorized(
                    "Missing Authorization header".into(),
                ))
            })?;

        let token = auth_header.strip_prefix("Bearer ").ok_or_else(|| {
            AppError::Core(CoreError::Unauthorized(
                "Invalid Authorization format. Expected: Bearer <token>".into(),
            ))
        })?;

        let claims = validate_session_token(token, &state.config.session).map_err(|e| {
            tracing::debug!(error = %e, "Rejected session token");
            AppError::Core(CoreError::Unauthorized(
                "Invalid or expired session token".into(),
            ))
        })?;

        let shop = claims.shop().ok_or_else(|| {
            AppError::Core(CoreError::Unauthorized(
                "Session token is not bound to a shop".into(),
            ))
        })?;

        Ok(ShopSession {
            shop: shop.to_string(),
            user_id: claims.sub.clone(),
        })
    }
}
