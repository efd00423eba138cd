//! Row structs for the settings tables.

pub mod shop_setting;
