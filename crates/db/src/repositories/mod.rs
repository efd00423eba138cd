//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async methods that
//! accept `&PgPool` as the first argument.

pub mod shop_setting_repo;

pub use shop_setting_repo::ShopSettingRepo;
