pub mod admin_settings;
pub mod proxy_settings;
