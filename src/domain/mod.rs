//! Domain layer containing business entities and repository contracts.
//!
//! - [`entities`] - Core data structures ([`entities::UrlRecord`], [`entities::UrlMapping`])
//! - [`repositories`] - Data access trait definitions
//!
//! The domain layer has no dependencies on infrastructure or presentation
//! layers. Repository traits are implemented in [`crate::infrastructure`] and
//! orchestrated by [`crate::application::services`].

pub mod entities;
pub mod repositories;
