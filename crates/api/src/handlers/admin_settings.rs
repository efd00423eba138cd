//! Handlers for the merchant admin settings form.
//!
//! Both operations require a [`ShopSession`]; the shop is always taken from
//! the session token, never from the request.

use axum::extract::rejection::{FormRejection, JsonRejection};
use axum::extract::State;
use axum::response::IntoResponse;
use axum::{Form, Json};
use countdown_core::form::SettingsForm;
use countdown_core::settings::ShopSettings;

use crate::error::{AppError, AppResult};
use crate::middleware::shop_session::ShopSession;
use crate::response::SettingsResponse;
use crate::state::AppState;

/// GET /api/admin/settings
///
/// Return the shop's settings merged over the defaults. When nothing usable
/// is stored, the defaults come back with `success: false`.
pub async fn get_settings(
    session: ShopSession,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let Some(raw) = state.store.get(&session.shop).await? else {
        tracing::debug!(shop = %session.shop, "No saved settings; serving defaults");
        return Ok(Json(SettingsResponse::fallback(ShopSettings::default())));
    };

    match ShopSettings::decode(&raw) {
        Ok(settings) => Ok(Json(SettingsResponse::found(settings))),
        Err(e) => {
            tracing::warn!(
                shop = %session.shop,
                error = %e,
                "Saved settings could not be decoded; serving defaults",
            );
            Ok(Json(SettingsResponse::fallback(ShopSettings::default())))
        }
    }
}

/// POST /api/admin/settings
///
/// Save the form-encoded settings submission.
pub async fn save_settings(
    session: ShopSession,
    State(state): State<AppState>,
    form: Result<Form<SettingsForm>, FormRejection>,
) -> AppResult<impl IntoResponse> {
    let Form(form) = form.map_err(|rejection| {
        tracing::debug!(shop = %session.shop, error = %rejection, "Rejected settings form body");
        AppError::BadRequest(rejection.body_text())
    })?;
    persist(&state, &session, form).await
}

/// PUT /api/admin/settings
///
/// Same as [`save_settings`] for a JSON body.
pub async fn replace_settings(
    session: ShopSession,
    State(state): State<AppState>,
    form: Result<Json<SettingsForm>, JsonRejection>,
) -> AppResult<impl IntoResponse> {
    let Json(form) = form.map_err(|rejection| {
        tracing::debug!(shop = %session.shop, error = %rejection, "Rejected settings JSON body");
        AppError::BadRequest(rejection.body_text())
    })?;
    persist(&state, &session, form).await
}

async fn persist(
    state: &AppState,
    session: &ShopSession,
    form: SettingsForm,
) -> AppResult<Json<SettingsResponse<ShopSettings>>> {
    let settings = form.into_settings()?;
    let encoded = settings.encode()?;

    state.store.upsert(&session.shop, &encoded).await?;

    tracing::info!(
        shop = %session.shop,
        user_id = ?session.user_id,
        end_action = %settings.end_action,
        has_end_date = settings.has_end_date(),
        "Shop settings saved",
    );

    Ok(Json(SettingsResponse::found(settings)))
}
