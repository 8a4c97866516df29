//! Core domain entities.
//!
//! - [`UrlRecord`] - The authoritative, persisted short code to origin mapping
//! - [`UrlMapping`] - The cacheable projection of a record

pub mod url;

pub use url::{UrlMapping, UrlRecord};
