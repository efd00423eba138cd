//! The bar's rendering surface.
//!
//! The widget never touches a concrete UI. It drives a [`BarSurface`], and
//! [`BarView`] is the plain-data surface used by the preview binary and
//! the tests.

use std::fmt;

use countdown_core::countdown::TimerDisplay;
use countdown_core::settings::BarPosition;

pub trait BarSurface {
    fn set_background(&mut self, color: &str);

    fn set_position(&mut self, position: BarPosition);

    fn set_message(&mut self, text: &str);

    fn show_button(&mut self, text: &str, link: &str);

    fn hide_button(&mut self);

    fn set_timer(&mut self, display: &TimerDisplay);

    fn hide_timer(&mut self);

    fn show(&mut self);

    fn hide(&mut self);
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ButtonView {
    pub text: String,
    pub link: String,
}

/// Rendered state of the bar.
///
/// The bar starts hidden with its timer cells displayed and empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BarView {
    pub visible: bool,
    pub background: Option<String>,
    pub position: Option<BarPosition>,
    pub message: Option<String>,
    pub button: Option<ButtonView>,
    pub timer: Option<TimerDisplay>,
    pub timer_visible: bool,
}

impl Default for BarView {
    fn default() -> Self {
        Self {
            visible: false,
            background: None,
            position: None,
            message: None,
            button: None,
            timer: None,
            timer_visible: true,
        }
    }
}

impl BarSurface for BarView {
    fn set_background(&mut self, color: &str) {
        self.background = Some(color.to_string());
    }

    fn set_position(&mut self, position: BarPosition) {
        self.position = Some(position);
    }

    fn set_message(&mut self, text: &str) {
        self.message = Some(text.to_string());
    }

    fn show_button(&mut self, text: &str, link: &str) {
        self.button = Some(ButtonView {
            text: text.to_string(),
            link: link.to_string(),
        });
    }

    fn hide_button(&mut self) {
        self.button = None;
    }

    fn set_timer(&mut self, display: &TimerDisplay) {
        self.timer = Some(display.clone());
    }

    fn hide_timer(&mut self) {
        self.timer_visible = false;
    }

    fn show(&mut self) {
        self.visible = true;
    }

    fn hide(&mut self) {
        self.visible = false;
    }
}

/// One-line text rendering, e.g.
/// `[top #288d40] Flash Sale Ends In... 01:02:03:04 [Shop Now -> /collections/all]`.
impl fmt::Display for BarView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !self.visible {
            return f.write_str("(hidden)");
        }

        let position = self.position.map(BarPosition::as_str).unwrap_or("top");
        let background = self.background.as_deref().unwrap_or("");
        write!(f, "[{position} {background}] {}", self.message.as_deref().unwrap_or(""))?;

        if self.timer_visible {
            if let Some(t) = &self.timer {
                write!(f, " {}:{}:{}:{}", t.days, t.hours, t.minutes, t.seconds)?;
            }
        }
        if let Some(button) = &self.button {
            write!(f, " [{} -> {}]", button.text, button.link)?;
        }
        Ok(())
    }
}

/// A [`BarView`] that logs every change through `tracing`.
#[derive(Debug, Default)]
pub struct LogSurface {
    view: BarView,
}

impl LogSurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn view(&self) -> &BarView {
        &self.view
    }

    fn render(&self) {
        tracing::info!(bar = %self.view, "Countdown bar rendered");
    }
}

impl BarSurface for LogSurface {
    fn set_background(&mut self, color: &str) {
        self.view.set_background(color);
    }

    fn set_position(&mut self, position: BarPosition) {
        self.view.set_position(position);
    }

    fn set_message(&mut self, text: &str) {
        self.view.set_message(text);
    }

    fn show_button(&mut self, text: &str, link: &str) {
        self.view.show_button(text, link);
    }

    fn hide_button(&mut self) {
        self.view.hide_button();
    }

    fn set_timer(&mut self, display: &TimerDisplay) {
        self.view.set_timer(display);
        self.render();
    }

    fn hide_timer(&mut self) {
        self.view.hide_timer();
        self.render();
    }

    fn show(&mut self) {
        self.view.show();
        self.render();
    }

    fn hide(&mut self) {
        self.view.hide();
        self.render();
    }
}
