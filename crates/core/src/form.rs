//! The admin settings form: the flat field set it submits, and the reducer
//! that tracks edits to the form state.

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::color::{self, Hsb};
use crate::error::CoreError;
use crate::settings::{BarPosition, EndAction, ShopSettings};

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

pub const MAX_MESSAGE_LENGTH: u64 = 200;
pub const MAX_BUTTON_TEXT_LENGTH: u64 = 100;
pub const MAX_LINK_LENGTH: u64 = 2048;
pub const MAX_END_DATE_LENGTH: u64 = 64;

// ---------------------------------------------------------------------------
// Submitted form
// ---------------------------------------------------------------------------

/// The settings fields exactly as the admin form submits them.
///
/// Every field is a plain string; missing or blank choice fields fall back
/// to their defaults when converted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct SettingsForm {
    #[validate(length(max = MAX_MESSAGE_LENGTH))]
    pub bar_message: Option<String>,
    #[validate(length(max = MAX_BUTTON_TEXT_LENGTH))]
    pub button_text: Option<String>,
    #[validate(length(max = MAX_LINK_LENGTH))]
    pub button_link: Option<String>,
    #[validate(length(max = MAX_END_DATE_LENGTH))]
    pub end_date: Option<String>,
    pub bar_color: Option<String>,
    pub bar_position: Option<String>,
    pub end_action: Option<String>,
    #[validate(length(max = MAX_MESSAGE_LENGTH))]
    pub custom_end_message: Option<String>,
}

impl SettingsForm {
    /// Validate the submission and build the settings to persist.
    pub fn into_settings(self) -> Result<ShopSettings, CoreError> {
        self.validate()
            .map_err(|e| CoreError::Validation(e.to_string()))?;

        let defaults = ShopSettings::default();

        let bar_color = match non_blank(self.bar_color) {
            Some(hex) => color::normalize_hex(&hex)?,
            None => defaults.bar_color,
        };
        let bar_position = match non_blank(self.bar_position) {
            Some(p) => p.trim().parse::<BarPosition>()?,
            None => defaults.bar_position,
        };
        let end_action = match non_blank(self.end_action) {
            Some(a) => a.trim().parse::<EndAction>()?,
            None => defaults.end_action,
        };

        Ok(ShopSettings {
            bar_message: self.bar_message.unwrap_or(defaults.bar_message),
            button_text: self.button_text.unwrap_or(defaults.button_text),
            button_link: self.button_link.unwrap_or(defaults.button_link),
            end_date: self.end_date.unwrap_or(defaults.end_date),
            bar_color,
            bar_position,
            end_action,
            custom_end_message: self.custom_end_message.unwrap_or_default(),
        })
    }
}

impl From<&ShopSettings> for SettingsForm {
    fn from(settings: &ShopSettings) -> Self {
        Self {
            bar_message: Some(settings.bar_message.clone()),
            button_text: Some(settings.button_text.clone()),
            button_link: Some(settings.button_link.clone()),
            end_date: Some(settings.end_date.clone()),
            bar_color: Some(settings.bar_color.clone()),
            bar_position: Some(settings.bar_position.to_string()),
            end_action: Some(settings.end_action.to_string()),
            custom_end_message: Some(settings.custom_end_message.clone()),
        }
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

// ---------------------------------------------------------------------------
// Form state reducer
// ---------------------------------------------------------------------------

/// A single edit made in the admin form.
#[derive(Debug, Clone, PartialEq)]
pub enum SettingsChange {
    BarMessage(String),
    ButtonText(String),
    ButtonLink(String),
    EndDate(String),
    /// The colour picker reports HSB; the form state keeps hex.
    BarColor(Hsb),
    BarPosition(BarPosition),
    EndAction(EndAction),
    CustomEndMessage(String),
}

/// Apply one edit to the form state, returning the new state.
pub fn reduce(state: &ShopSettings, change: SettingsChange) -> ShopSettings {
    let mut next = state.clone();
    match change {
        SettingsChange::BarMessage(v) => next.bar_message = v,
        SettingsChange::ButtonText(v) => next.button_text = v,
        SettingsChange::ButtonLink(v) => next.button_link = v,
        SettingsChange::EndDate(v) => next.end_date = v,
        SettingsChange::BarColor(hsb) => next.bar_color = color::hsb_to_hex(hsb),
        SettingsChange::BarPosition(p) => next.bar_position = p,
        SettingsChange::EndAction(a) => next.end_action = a,
        SettingsChange::CustomEndMessage(v) => next.custom_end_message = v,
    }
    next
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    fn full_form() -> SettingsForm {
        SettingsForm {
            bar_message: Some("Summer sale ends in".into()),
            button_text: Some("Browse".into()),
            button_link: Some("/collections/summer".into()),
            end_date: Some("2030-08-31T23:59".into()),
            bar_color: Some("#AA0000".into()),
            bar_position: Some("bottom".into()),
            end_action: Some("show_custom".into()),
            custom_end_message: Some("See you next summer".into()),
        }
    }

    #[test]
    fn full_form_converts() {
        let settings = full_form().into_settings().unwrap();
        assert_eq!(settings.bar_message, "Summer sale ends in");
        assert_eq!(settings.bar_color, "#aa0000");
        assert_eq!(settings.bar_position, BarPosition::Bottom);
        assert_eq!(settings.end_action, EndAction::ShowCustom);
        assert_eq!(settings.custom_end_message, "See you next summer");
    }

    #[test]
    fn empty_form_yields_defaults() {
        let settings = SettingsForm::default().into_settings().unwrap();
        assert_eq!(settings, ShopSettings::default());
    }

    #[test]
    fn blank_choice_fields_yield_defaults() {
        let form = SettingsForm {
            bar_color: Some(" ".into()),
            bar_position: Some(String::new()),
            end_action: Some(String::new()),
            ..SettingsForm::default()
        };
        let settings = form.into_settings().unwrap();
        assert_eq!(settings.bar_color, "#288d40");
        assert_eq!(settings.bar_position, BarPosition::Top);
        assert_eq!(settings.end_action, EndAction::Hide);
    }

    #[test]
    fn invalid_choices_are_rejected() {
        let bad_position = SettingsForm {
            bar_position: Some("left".into()),
            ..full_form()
        };
        assert_matches!(bad_position.into_settings(), Err(CoreError::Validation(_)));

        let bad_action = SettingsForm {
            end_action: Some("explode".into()),
            ..full_form()
        };
        assert_matches!(bad_action.into_settings(), Err(CoreError::Validation(_)));

        let bad_color = SettingsForm {
            bar_color: Some("green".into()),
            ..full_form()
        };
        assert_matches!(bad_color.into_settings(), Err(CoreError::Validation(_)));
    }

    #[test]
    fn overlong_message_is_rejected() {
        let form = SettingsForm {
            bar_message: Some("x".repeat(MAX_MESSAGE_LENGTH as usize + 1)),
            ..full_form()
        };
        assert_matches!(form.into_settings(), Err(CoreError::Validation(_)));
    }

    #[test]
    fn settings_flatten_back_into_the_form() {
        let settings = full_form().into_settings().unwrap();
        let form = SettingsForm::from(&settings);
        assert_eq!(form.bar_position.as_deref(), Some("bottom"));
        assert_eq!(form.end_action.as_deref(), Some("show_custom"));
        assert_eq!(form.into_settings().unwrap(), settings);
    }

    #[test]
    fn reducer_updates_a_single_field() {
        let start = ShopSettings::default();
        let next = reduce(&start, SettingsChange::ButtonText("Grab it".into()));
        assert_eq!(next.button_text, "Grab it");
        assert_eq!(next.bar_message, start.bar_message);
        assert_eq!(start.button_text, "Shop Now");
    }

    #[test]
    fn reducer_converts_picker_colour_to_hex() {
        let next = reduce(
            &ShopSettings::default(),
            SettingsChange::BarColor(Hsb {
                hue: 0.0,
                saturation: 1.0,
                brightness: 1.0,
            }),
        );
        assert_eq!(next.bar_color, "#ff0000");
    }

    #[test]
    fn reducer_chains_edits() {
        let changes = vec![
            SettingsChange::EndAction(EndAction::ShowCustom),
            SettingsChange::CustomEndMessage("Thanks!".into()),
            SettingsChange::BarPosition(BarPosition::Bottom),
        ];
        let end = changes
            .into_iter()
            .fold(ShopSettings::default(), |state, change| reduce(&state, change));
        assert_eq!(end.end_action, EndAction::ShowCustom);
        assert_eq!(end.custom_end_message, "Thanks!");
        assert_eq!(end.bar_position, BarPosition::Bottom);
    }
}
