//! Per-shop countdown bar settings and their JSON codec.
//!
//! The persisted and transmitted form is a JSON object with camelCase keys.
//! Decoding is lenient about shape: missing or `null` fields take their
//! defaults and `barPosition` may be a bare string or a sequence. Encoding
//! always writes the normalized form.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize, Serializer};

use crate::error::CoreError;

// ---------------------------------------------------------------------------
// Defaults
// ---------------------------------------------------------------------------

pub const DEFAULT_BAR_MESSAGE: &str = "Flash Sale Ends In...";
pub const DEFAULT_BUTTON_TEXT: &str = "Shop Now";
pub const DEFAULT_BUTTON_LINK: &str = "/collections/all";
pub const DEFAULT_BAR_COLOR: &str = "#288d40";

// ---------------------------------------------------------------------------
// Enumerations
// ---------------------------------------------------------------------------

/// Where the bar is pinned on the storefront page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BarPosition {
    #[default]
    Top,
    Bottom,
}

impl BarPosition {
    pub fn as_str(self) -> &'static str {
        match self {
            BarPosition::Top => "top",
            BarPosition::Bottom => "bottom",
        }
    }
}

impl FromStr for BarPosition {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "top" => Ok(BarPosition::Top),
            "bottom" => Ok(BarPosition::Bottom),
            other => Err(CoreError::Validation(format!(
                "barPosition must be 'top' or 'bottom', got '{other}'"
            ))),
        }
    }
}

impl fmt::Display for BarPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What the bar does once the countdown passes its end date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EndAction {
    #[default]
    Hide,
    ShowEnded,
    ShowCustom,
}

impl EndAction {
    pub fn as_str(self) -> &'static str {
        match self {
            EndAction::Hide => "hide",
            EndAction::ShowEnded => "show_ended",
            EndAction::ShowCustom => "show_custom",
        }
    }
}

impl FromStr for EndAction {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "hide" => Ok(EndAction::Hide),
            "show_ended" => Ok(EndAction::ShowEnded),
            "show_custom" => Ok(EndAction::ShowCustom),
            other => Err(CoreError::Validation(format!(
                "endAction must be one of hide, show_ended, show_custom; got '{other}'"
            ))),
        }
    }
}

impl fmt::Display for EndAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// ShopSettings
// ---------------------------------------------------------------------------

/// The full settings set for one shop's bar.
///
/// `bar_position` holds exactly one position; on the wire it is always
/// written as a one-element sequence (`["top"]`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", from = "RawSettings")]
pub struct ShopSettings {
    pub bar_message: String,
    pub button_text: String,
    pub button_link: String,
    pub end_date: String,
    pub bar_color: String,
    #[serde(serialize_with = "serialize_position")]
    pub bar_position: BarPosition,
    pub end_action: EndAction,
    pub custom_end_message: String,
}

impl Default for ShopSettings {
    fn default() -> Self {
        Self {
            bar_message: DEFAULT_BAR_MESSAGE.to_string(),
            button_text: DEFAULT_BUTTON_TEXT.to_string(),
            button_link: DEFAULT_BUTTON_LINK.to_string(),
            end_date: String::new(),
            bar_color: DEFAULT_BAR_COLOR.to_string(),
            bar_position: BarPosition::Top,
            end_action: EndAction::Hide,
            custom_end_message: String::new(),
        }
    }
}

impl ShopSettings {
    /// Decode a stored or transmitted settings value, merging it over the
    /// defaults.
    ///
    /// Anything that is not a JSON object, or that carries an unknown
    /// `barPosition` / `endAction`, is a [`CoreError::Decode`].
    pub fn decode(raw: &str) -> Result<Self, CoreError> {
        let value: serde_json::Value =
            serde_json::from_str(raw).map_err(|e| CoreError::Decode(e.to_string()))?;
        Self::from_value(value)
    }

    /// Same as [`ShopSettings::decode`] for an already-parsed JSON value.
    pub fn from_value(value: serde_json::Value) -> Result<Self, CoreError> {
        if !value.is_object() {
            return Err(CoreError::Decode(
                "settings must be a JSON object".to_string(),
            ));
        }
        serde_json::from_value(value).map_err(|e| CoreError::Decode(e.to_string()))
    }

    /// Encode to the normalized JSON string that gets persisted.
    pub fn encode(&self) -> Result<String, CoreError> {
        serde_json::to_string(self).map_err(|e| CoreError::Internal(e.to_string()))
    }

    pub fn has_end_date(&self) -> bool {
        !self.end_date.trim().is_empty()
    }

    /// The button is only rendered when both its label and its link are set.
    pub fn has_button(&self) -> bool {
        !self.button_text.is_empty() && !self.button_link.is_empty()
    }
}

fn serialize_position<S: Serializer>(position: &BarPosition, s: S) -> Result<S::Ok, S::Error> {
    [position].serialize(s)
}

// ---------------------------------------------------------------------------
// Lenient wire shape
// ---------------------------------------------------------------------------

/// `barPosition` as it may appear on the wire.
#[derive(Deserialize)]
#[serde(untagged)]
enum PositionField {
    One(BarPosition),
    Many(Vec<BarPosition>),
}

impl PositionField {
    fn first(self) -> Option<BarPosition> {
        match self {
            PositionField::One(p) => Some(p),
            PositionField::Many(list) => list.into_iter().next(),
        }
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawSettings {
    bar_message: Option<String>,
    button_text: Option<String>,
    button_link: Option<String>,
    end_date: Option<String>,
    bar_color: Option<String>,
    bar_position: Option<PositionField>,
    end_action: Option<EndAction>,
    custom_end_message: Option<String>,
}

impl From<RawSettings> for ShopSettings {
    fn from(raw: RawSettings) -> Self {
        let defaults = ShopSettings::default();
        Self {
            bar_message: raw.bar_message.unwrap_or(defaults.bar_message),
            button_text: raw.button_text.unwrap_or(defaults.button_text),
            button_link: raw.button_link.unwrap_or(defaults.button_link),
            end_date: raw.end_date.unwrap_or(defaults.end_date),
            bar_color: raw.bar_color.unwrap_or(defaults.bar_color),
            bar_position: raw
                .bar_position
                .and_then(PositionField::first)
                .unwrap_or(defaults.bar_position),
            end_action: raw.end_action.unwrap_or(defaults.end_action),
            custom_end_message: raw
                .custom_end_message
                .unwrap_or(defaults.custom_end_message),
        }
    }
}
