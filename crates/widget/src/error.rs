/// Failures while fetching settings for the storefront bar.
///
/// None of these reach the page: every one degrades to a hidden bar.
#[derive(Debug, thiserror::Error)]
pub enum WidgetError {
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Settings endpoint answered HTTP {0}")]
    Status(u16),
}
