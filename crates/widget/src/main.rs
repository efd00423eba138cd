//! Preview the storefront bar in a terminal.
//!
//! Reads `PROXY_BASE` (e.g. `http://127.0.0.1:3000/apps/countdown`) and
//! `SHOP`, mounts the bar over a logging surface, and runs until the
//! countdown ends or Ctrl-C.

use chrono::{FixedOffset, Local, Offset};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use countdown_widget::{LogSurface, MemorySessionFlags, MountConfig, MountedWidget, ProxyClient};

const DEFAULT_PROXY_BASE: &str = "http://127.0.0.1:3000/apps/countdown";

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "countdown_widget=debug,countdown_preview=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let proxy_base =
        std::env::var("PROXY_BASE").unwrap_or_else(|_| DEFAULT_PROXY_BASE.to_string());
    let shop = std::env::var("SHOP").expect("SHOP must be set");
    let local_offset: FixedOffset = Local::now().offset().fix();

    tracing::info!(%proxy_base, %shop, "Mounting countdown bar preview");

    let client = ProxyClient::new(proxy_base).expect("Failed to build HTTP client");
    let config = MountConfig { shop, local_offset };
    let mut mounted =
        MountedWidget::mount(&config, LogSurface::new(), MemorySessionFlags::new(), &client).await;

    let interrupted = tokio::select! {
        _ = wait_until_idle(&mounted) => false,
        _ = tokio::signal::ctrl_c() => true,
    };

    if interrupted {
        tracing::info!("Received Ctrl-C, dismissing bar");
        mounted.dismiss().await;
    } else {
        tracing::info!(state = ?mounted.state().await, "Countdown bar settled");
    }
    mounted.teardown().await;
}

/// Resolve once no ticker is running.
async fn wait_until_idle<S, F>(mounted: &MountedWidget<S, F>)
where
    S: countdown_widget::BarSurface + Send + 'static,
    F: countdown_widget::SessionFlags + Send + 'static,
{
    let mut poll = tokio::time::interval(countdown_widget::ticker::TICK_INTERVAL);
    while mounted.is_ticking() {
        poll.tick().await;
    }
}
