//! The storefront countdown bar state machine.
//!
//! ```text
//! Loading ──dismissed / fetch failed / no settings──▶ Hidden
//!    │
//!    ├──no or unparseable end date──▶ Visible (no timer)
//!    │
//!    └──end date parsed──▶ Active ──end reached──▶ Ended
//!
//! any visible state ──dismiss──▶ Hidden
//! ```

use chrono::{DateTime, FixedOffset, Utc};
use countdown_core::countdown::{self, end_outcome, EndOutcome, Tick};
use countdown_core::settings::{EndAction, ShopSettings, DEFAULT_BAR_COLOR, DEFAULT_BAR_MESSAGE};

use crate::session::SessionFlags;
use crate::source::SettingsSource;
use crate::surface::BarSurface;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WidgetState {
    /// Settings not applied yet.
    Loading,
    /// Not shown: dismissed, unavailable, or ended with `hide`.
    Hidden,
    /// Shown without a running countdown.
    Visible,
    /// Shown and counting down.
    Active,
    /// The countdown reached its end and the end action was applied.
    Ended,
}

/// One mount of the bar on a page.
#[derive(Debug)]
pub struct CountdownWidget<S, F> {
    surface: S,
    session: F,
    state: WidgetState,
    end: Option<DateTime<Utc>>,
    end_action: EndAction,
    custom_end_message: String,
}

impl<S: BarSurface, F: SessionFlags> CountdownWidget<S, F> {
    pub fn new(surface: S, session: F) -> Self {
        Self {
            surface,
            session,
            state: WidgetState::Loading,
            end: None,
            end_action: EndAction::Hide,
            custom_end_message: String::new(),
        }
    }

    pub fn state(&self) -> WidgetState {
        self.state
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    /// Fetch the shop's settings and bring the bar up.
    ///
    /// A bar dismissed earlier in the session stays hidden and nothing is
    /// fetched. Fetch failures and missing settings hide the bar silently.
    pub async fn load<C>(
        &mut self,
        source: &C,
        shop: &str,
        local_offset: FixedOffset,
        now: DateTime<Utc>,
    ) -> WidgetState
    where
        C: SettingsSource + ?Sized,
    {
        if self.session.is_dismissed() {
            tracing::debug!(shop, "Countdown bar dismissed this session");
            return self.hide();
        }

        match source.fetch(shop).await {
            Ok(Some(settings)) => self.apply(&settings, local_offset, now),
            Ok(None) => {
                tracing::info!(shop, "No countdown bar settings for shop");
                self.hide()
            }
            Err(e) => {
                tracing::error!(shop, error = %e, "Failed to load countdown bar settings");
                self.hide()
            }
        }
    }

    /// Apply settings to the surface and start the countdown when an end
    /// date is configured. The first tick runs immediately.
    pub fn apply(
        &mut self,
        settings: &ShopSettings,
        local_offset: FixedOffset,
        now: DateTime<Utc>,
    ) -> WidgetState {
        self.surface
            .set_background(non_empty_or(&settings.bar_color, DEFAULT_BAR_COLOR));
        self.surface.set_position(settings.bar_position);
        self.surface
            .set_message(non_empty_or(&settings.bar_message, DEFAULT_BAR_MESSAGE));

        if settings.has_button() {
            self.surface
                .show_button(&settings.button_text, &settings.button_link);
        } else {
            self.surface.hide_button();
        }

        self.surface.show();
        self.end_action = settings.end_action;
        self.custom_end_message = settings.custom_end_message.clone();

        if !settings.has_end_date() {
            tracing::warn!("No end date set for countdown bar");
            self.state = WidgetState::Visible;
            return self.state;
        }

        match countdown::parse_end_date(&settings.end_date, local_offset) {
            Ok(end) => {
                self.end = Some(end);
                self.state = WidgetState::Active;
                self.tick(now)
            }
            Err(e) => {
                tracing::error!(end_date = %settings.end_date, error = %e, "Invalid countdown end date");
                self.state = WidgetState::Visible;
                self.state
            }
        }
    }

    /// Recompute the timer. Does nothing outside [`WidgetState::Active`].
    pub fn tick(&mut self, now: DateTime<Utc>) -> WidgetState {
        if self.state != WidgetState::Active {
            return self.state;
        }
        let Some(end) = self.end else {
            return self.state;
        };

        match countdown::tick(end, now) {
            Tick::Running(remaining) => self.surface.set_timer(&remaining.display()),
            Tick::Finished => self.finish(),
        }
        self.state
    }

    /// Close the bar for the rest of the browsing session.
    pub fn dismiss(&mut self) -> WidgetState {
        self.session.mark_dismissed();
        tracing::debug!("Countdown bar dismissed");
        self.hide()
    }

    fn finish(&mut self) {
        match end_outcome(self.end_action, &self.custom_end_message) {
            EndOutcome::HideBar => self.surface.hide(),
            EndOutcome::HideTimer { message } => {
                if let Some(message) = message {
                    self.surface.set_message(&message);
                }
                self.surface.hide_timer();
            }
        }
        tracing::info!(end_action = %self.end_action, "Countdown finished");
        self.state = WidgetState::Ended;
    }

    fn hide(&mut self) -> WidgetState {
        self.surface.hide();
        self.state = WidgetState::Hidden;
        self.state
    }
}

fn non_empty_or<'a>(value: &'a str, fallback: &'a str) -> &'a str {
    if value.is_empty() {
        fallback
    } else {
        value
    }
}
