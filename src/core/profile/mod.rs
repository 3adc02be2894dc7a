//! Content Profile Catalog
//!
//! Read-only table of denominational content profiles. Each profile bundles the
//! theological emphases woven into generated material, the phrasing sources it
//! prefers, the topics it steers away from, and guidance text for every
//! intensity level.
//!
//! Lookups never fail: an unknown or missing key resolves to the neutral
//! profile, and callers can see that substitution in the returned key.

mod catalog;

pub use catalog::*;
