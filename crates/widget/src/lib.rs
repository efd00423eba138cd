//! Storefront side of the countdown bar.
//!
//! [`ticker::MountedWidget`] is the entry point: it fetches a shop's
//! settings through a [`source::SettingsSource`], renders them on a
//! [`surface::BarSurface`] and keeps the timer running until the
//! countdown ends, the shopper dismisses the bar, or the page goes away.

pub mod error;
pub mod session;
pub mod source;
pub mod surface;
pub mod ticker;
pub mod widget;

pub use error::WidgetError;
pub use session::{MemorySessionFlags, SessionFlags};
pub use source::{ProxyClient, SettingsSource};
pub use surface::{BarSurface, BarView, LogSurface};
pub use ticker::{MountConfig, MountedWidget, Ticker};
pub use widget::{CountdownWidget, WidgetState};
