//! Application layer services implementing business logic.
//!
//! Services consume the repository and cache traits and provide a clean API
//! for HTTP handlers and the admin CLI.
//!
//! # Available Services
//!
//! - [`services::url_service::UrlService`] - Short URL creation, resolution and maintenance

pub mod services;
