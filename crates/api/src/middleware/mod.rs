//! Request extractors and per-router middleware.
//!
//! - [`shop_session::ShopSession`] -- binds an admin request to its shop.
//! - [`proxy_cors`] -- open CORS headers for storefront proxy routes.

pub mod proxy_cors;
pub mod shop_session;
