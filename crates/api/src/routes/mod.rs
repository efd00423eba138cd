//! Route tree.
//!
//! ```text
//! /health                                   health check
//!
//! /api/admin/settings                       admin read/write (session token)
//!
//! /apps/countdown/settings                  storefront read (public, CORS *)
//! /api/storefront/settings                  storefront read (public, CORS *)
//! /api/settings                             storefront read (signed app proxy, CORS *)
//! ```

pub mod admin_settings;
pub mod health;
pub mod proxy;
