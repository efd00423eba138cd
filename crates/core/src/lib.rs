//! Domain types for the countdown bar: shop settings and their codec, the
//! admin form reducer, colour conversion for the picker, and countdown
//! arithmetic shared by the storefront widget.

pub mod color;
pub mod countdown;
pub mod error;
pub mod form;
pub mod settings;
