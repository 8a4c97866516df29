//! Utility functions for code generation, URL validation and database errors.
//!
//! - [`code_generator`] - Random short code generation
//! - [`url_validator`] - Origin URL validation
//! - [`db_error`] - PostgreSQL constraint inspection

pub mod code_generator;
pub mod db_error;
pub mod url_validator;
