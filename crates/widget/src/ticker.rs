//! Once-per-second countdown driver.

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, FixedOffset, Utc};
use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior};
use tokio_util::sync::CancellationToken;

use crate::session::SessionFlags;
use crate::source::SettingsSource;
use crate::surface::BarSurface;
use crate::widget::{CountdownWidget, WidgetState};

/// Interval between timer recomputations.
pub const TICK_INTERVAL: Duration = Duration::from_secs(1);

pub type SharedWidget<S, F> = Arc<Mutex<CountdownWidget<S, F>>>;

/// Handle on a running countdown loop.
///
/// The loop exits on its own once the widget leaves
/// [`WidgetState::Active`]. [`Ticker::teardown`] consumes the handle, so the
/// loop is cancelled at most once.
#[derive(Debug)]
pub struct Ticker {
    cancel: CancellationToken,
    handle: JoinHandle<()>,
}

impl Ticker {
    /// Spawn the loop. The first tick fires one interval from now; the
    /// immediate tick is the caller's job (see [`CountdownWidget::apply`]).
    pub fn start<S, F, C>(widget: SharedWidget<S, F>, clock: C) -> Self
    where
        S: BarSurface + Send + 'static,
        F: SessionFlags + Send + 'static,
        C: Fn() -> DateTime<Utc> + Send + 'static,
    {
        let cancel = CancellationToken::new();
        let handle = tokio::spawn(run(widget, clock, cancel.clone()));
        Self { cancel, handle }
    }

    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }

    /// Stop the loop and wait for it to exit.
    pub async fn teardown(self) {
        self.cancel.cancel();
        if let Err(e) = self.handle.await {
            tracing::error!(error = %e, "Countdown ticker task failed");
        }
    }
}

async fn run<S, F, C>(widget: SharedWidget<S, F>, clock: C, cancel: CancellationToken)
where
    S: BarSurface,
    F: SessionFlags,
    C: Fn() -> DateTime<Utc>,
{
    let mut interval = tokio::time::interval_at(Instant::now() + TICK_INTERVAL, TICK_INTERVAL);
    interval.set_missed_tick_behavior(MissedTickBehavior::Skip);

    loop {
        tokio::select! {
            _ = cancel.cancelled() => {
                tracing::debug!("Countdown ticker cancelled");
                break;
            }
            _ = interval.tick() => {
                let state = widget.lock().await.tick(clock());
                if state != WidgetState::Active {
                    tracing::debug!(?state, "Countdown ticker stopping");
                    break;
                }
            }
        }
    }
}

/// Where and for whom the bar is mounted.
#[derive(Debug, Clone)]
pub struct MountConfig {
    pub shop: String,
    /// Offset used for end dates written without one.
    pub local_offset: FixedOffset,
}

/// A bar mounted on a page, with its ticker when one is running.
#[derive(Debug)]
pub struct MountedWidget<S, F> {
    widget: SharedWidget<S, F>,
    ticker: Option<Ticker>,
}

impl<S, F> MountedWidget<S, F>
where
    S: BarSurface + Send + 'static,
    F: SessionFlags + Send + 'static,
{
    /// Load settings and start ticking when the countdown is active.
    pub async fn mount<C>(config: &MountConfig, surface: S, session: F, source: &C) -> Self
    where
        C: SettingsSource + ?Sized,
    {
        Self::mount_with_clock(config, surface, session, source, Utc::now).await
    }

    pub async fn mount_with_clock<C, K>(
        config: &MountConfig,
        surface: S,
        session: F,
        source: &C,
        clock: K,
    ) -> Self
    where
        C: SettingsSource + ?Sized,
        K: Fn() -> DateTime<Utc> + Send + 'static,
    {
        let mut widget = CountdownWidget::new(surface, session);
        let state = widget
            .load(source, &config.shop, config.local_offset, clock())
            .await;

        let widget = Arc::new(Mutex::new(widget));
        let ticker =
            (state == WidgetState::Active).then(|| Ticker::start(Arc::clone(&widget), clock));

        Self { widget, ticker }
    }

    pub fn widget(&self) -> &SharedWidget<S, F> {
        &self.widget
    }

    pub async fn state(&self) -> WidgetState {
        self.widget.lock().await.state()
    }

    pub fn is_ticking(&self) -> bool {
        self.ticker.as_ref().is_some_and(|t| !t.is_finished())
    }

    /// Close the bar for the session and stop the ticker.
    pub async fn dismiss(&mut self) {
        self.widget.lock().await.dismiss();
        if let Some(ticker) = self.ticker.take() {
            ticker.teardown().await;
        }
    }

    /// Unmount: stop the ticker if it is still running.
    pub async fn teardown(self) {
        if let Some(ticker) = self.ticker {
            ticker.teardown().await;
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::Duration as ChronoDuration;
    use countdown_core::settings::{EndAction, ShopSettings};

    use super::*;
    use crate::session::MemorySessionFlags;
    use crate::surface::BarView;

    fn active_widget(end: DateTime<Utc>, now: DateTime<Utc>) -> SharedWidget<BarView, MemorySessionFlags> {
        let settings = ShopSettings {
            end_date: end.to_rfc3339(),
            end_action: EndAction::ShowEnded,
            ..ShopSettings::default()
        };
        let mut widget = CountdownWidget::new(BarView::default(), MemorySessionFlags::new());
        widget.apply(&settings, FixedOffset::east_opt(0).unwrap(), now);
        Arc::new(Mutex::new(widget))
    }

    #[tokio::test(start_paused = true)]
    async fn ticker_stops_itself_when_countdown_ends() {
        let start = Utc::now();
        let widget = active_widget(start + ChronoDuration::seconds(2), start);
        let origin = Instant::now();

        // Clock follows tokio's paused time.
        let clock = move || start + ChronoDuration::from_std(origin.elapsed()).unwrap();
        let ticker = Ticker::start(Arc::clone(&widget), clock);

        tokio::time::sleep(Duration::from_millis(3_500)).await;

        assert!(ticker.is_finished());
        assert_eq!(widget.lock().await.state(), WidgetState::Ended);
        assert_eq!(
            widget.lock().await.surface().message.as_deref(),
            Some("Sale Ended")
        );
        ticker.teardown().await;
    }

    #[tokio::test(start_paused = true)]
    async fn teardown_cancels_running_ticker() {
        let start = Utc::now();
        let widget = active_widget(start + ChronoDuration::hours(1), start);
        let ticker = Ticker::start(Arc::clone(&widget), move || start);

        tokio::time::sleep(Duration::from_millis(1_500)).await;
        assert!(!ticker.is_finished());

        ticker.teardown().await;
        assert_eq!(widget.lock().await.state(), WidgetState::Active);
    }
}
