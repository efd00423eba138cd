//! Where the widget gets its settings from.

use std::time::Duration;

use async_trait::async_trait;
use countdown_core::settings::ShopSettings;
use serde::Deserialize;

use crate::error::WidgetError;

/// A provider of a shop's saved settings.
///
/// `Ok(None)` means the shop has nothing usable saved.
#[async_trait]
pub trait SettingsSource: Send + Sync {
    async fn fetch(&self, shop: &str) -> Result<Option<ShopSettings>, WidgetError>;
}

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Reads settings from the public proxy endpoint.
///
/// `base_url` is the proxy prefix, e.g. `https://shop.example/apps/countdown`;
/// requests go to `{base_url}/settings?shop=...`.
#[derive(Debug, Clone)]
pub struct ProxyClient {
    http: reqwest::Client,
    base_url: String,
}

/// Body of the proxy endpoint, success and not-found alike.
#[derive(Debug, Deserialize)]
struct ProxyBody {
    success: bool,
    #[serde(default)]
    settings: Option<ShopSettings>,
}

impl ProxyClient {
    pub fn new(base_url: impl Into<String>) -> Result<Self, WidgetError> {
        let http = reqwest::Client::builder().timeout(REQUEST_TIMEOUT).build()?;
        Ok(Self {
            http,
            base_url: base_url.into(),
        })
    }

    pub fn settings_url(&self) -> String {
        format!("{}/settings", self.base_url.trim_end_matches('/'))
    }
}

#[async_trait]
impl SettingsSource for ProxyClient {
    async fn fetch(&self, shop: &str) -> Result<Option<ShopSettings>, WidgetError> {
        let response = self
            .http
            .get(self.settings_url())
            .query(&[("shop", shop)])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(WidgetError::Status(status.as_u16()));
        }

        let body: ProxyBody = response.json().await?;
        if !body.success {
            return Ok(None);
        }
        Ok(body.settings)
    }
}
