//! Response envelopes shared by the admin and proxy handlers.
//!
//! Every body carries a top-level `success` flag. Errors are rendered by
//! [`crate::error::AppError`] as `{ "success": false, "error": ..., "code": ... }`.

use serde::Serialize;

/// Message used whenever a shop has no usable settings record.
pub const NO_SETTINGS_MESSAGE: &str = "No settings found";

/// `{ "success": ..., "settings": T }` with an optional explanatory message.
#[derive(Debug, Serialize)]
pub struct SettingsResponse<T: Serialize> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<&'static str>,
    pub settings: T,
}

impl<T: Serialize> SettingsResponse<T> {
    pub fn found(settings: T) -> Self {
        Self {
            success: true,
            message: None,
            settings,
        }
    }

    /// Settings served in place of a missing or unreadable record.
    pub fn fallback(settings: T) -> Self {
        Self {
            success: false,
            message: Some(NO_SETTINGS_MESSAGE),
            settings,
        }
    }
}

/// `{ "success": false, "message": ... }` -- a normal outcome, not an error.
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub success: bool,
    pub message: &'static str,
}

impl MessageResponse {
    pub fn no_settings() -> Self {
        Self {
            success: false,
            message: NO_SETTINGS_MESSAGE,
        }
    }
}
