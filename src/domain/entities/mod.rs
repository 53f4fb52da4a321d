//! Core domain entities representing the business data model.
//!
//! - [`ShortLink`] - A stored short code to URL mapping
//! - [`NewShortLink`] - Input data for creating a mapping
//!
//! Entities are plain data structures without business logic. Records are
//! created once and never mutated.

pub mod short_link;

pub use short_link::{NewShortLink, ShortLink};
