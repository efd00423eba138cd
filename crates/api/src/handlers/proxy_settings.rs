//! Public settings endpoints for the storefront widget.
//!
//! Read-only. [`get_settings`] is unauthenticated: the shop comes from the
//! `shop` query parameter, and only when that is absent or blank is the
//! `X-Shopify-Shop-Domain` header consulted. [`get_signed_settings`] only
//! answers requests carrying a valid app proxy signature and takes the shop
//! from the signed parameters.

use axum::extract::rejection::QueryRejection;
use axum::extract::{Query, State};
use axum::http::header::CACHE_CONTROL;
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use countdown_core::settings::ShopSettings;
use serde::Deserialize;

use crate::auth::app_proxy::verify_app_proxy;
use crate::error::{AppError, AppResult};
use crate::response::{MessageResponse, SettingsResponse};
use crate::state::AppState;

/// Header the app proxy forwards with the requesting shop's domain.
pub const SHOP_DOMAIN_HEADER: &str = "x-shopify-shop-domain";

#[derive(Debug, Default, Deserialize)]
pub struct ProxyQuery {
    pub shop: Option<String>,
}

/// Pick the shop for a proxy request: query parameter first, then header.
pub fn resolve_shop(query: &ProxyQuery, headers: &HeaderMap) -> Option<String> {
    let from_query = query
        .shop
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty());

    let from_header = || {
        headers
            .get(SHOP_DOMAIN_HEADER)
            .and_then(|v| v.to_str().ok())
            .map(str::trim)
            .filter(|s| !s.is_empty())
    };

    from_query.or_else(from_header).map(str::to_string)
}

/// GET /apps/countdown/settings, GET /api/storefront/settings
///
/// - 200 `{success: true, settings}` with a public cache lifetime
/// - 200 `{success: false, message}` when the shop has no usable settings
/// - 400 when no shop can be resolved
pub async fn get_settings(
    State(state): State<AppState>,
    query: Result<Query<ProxyQuery>, QueryRejection>,
    headers: HeaderMap,
) -> AppResult<Response> {
    let query = match query {
        Ok(Query(q)) => q,
        Err(rejection) => {
            tracing::debug!(error = %rejection, "Unparseable proxy query string");
            ProxyQuery::default()
        }
    };

    let shop = resolve_shop(&query, &headers)
        .ok_or_else(|| AppError::BadRequest("Shop parameter required".into()))?;

    read_settings(&state, &shop).await
}

/// GET /api/settings
///
/// Signed app proxy read. Same responses as [`get_settings`]; an unsigned
/// or tampered request is a 401.
pub async fn get_signed_settings(
    State(state): State<AppState>,
    query: Result<Query<Vec<(String, String)>>, QueryRejection>,
) -> AppResult<Response> {
    let Query(params) = query.map_err(|rejection| {
        tracing::debug!(error = %rejection, "Unparseable app proxy query string");
        AppError::BadRequest("Malformed query string".into())
    })?;

    let shop = verify_app_proxy(&params, &state.config.session.api_secret).map_err(|e| {
        tracing::warn!(error = %e, "Rejected app proxy request");
        e
    })?;

    read_settings(&state, &shop).await
}

async fn read_settings(state: &AppState, shop: &str) -> AppResult<Response> {
    let Some(raw) = state.store.get(shop).await? else {
        return Ok(Json(MessageResponse::no_settings()).into_response());
    };

    let settings = match ShopSettings::decode(&raw) {
        Ok(settings) => settings,
        Err(e) => {
            tracing::warn!(shop = %shop, error = %e, "Saved settings could not be decoded");
            return Ok(Json(MessageResponse::no_settings()).into_response());
        }
    };

    let cache_control = format!("public, max-age={}", state.config.proxy_cache_max_age_secs);

    Ok((
        [(CACHE_CONTROL, cache_control)],
        Json(SettingsResponse::found(settings)),
    )
        .into_response())
}

/// OPTIONS on the proxy settings paths.
///
/// The CORS headers are added by [`crate::middleware::proxy_cors`].
pub async fn preflight() -> StatusCode {
    StatusCode::NO_CONTENT
}
