//! Domain logic for the Curify inspiration feed.
//!
//! Everything in this crate is pure and synchronous: callers hand in
//! already-fetched catalog data and get back plain serializable views.

pub mod catalog;
pub mod error;
pub mod inspiration;
pub mod interleave;
pub mod locale;
pub mod projection;
pub mod prompt;
pub mod registry;
pub mod types;
