//! Origin URL validation.
//!
//! An origin is accepted when it parses as a URL, uses the `http` or `https`
//! scheme and names a non-empty host. Nothing else about the URL (path,
//! query, port, fragment) is inspected.

use thiserror::Error;
use url::Url;

/// Reasons an origin URL is rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UrlValidationError {
    #[error("URL cannot be parsed: {0}")]
    Malformed(String),

    #[error("Unsupported URL scheme '{0}', expected http or https")]
    UnsupportedScheme(String),

    #[error("URL has no host")]
    MissingHost,
}

/// Checks whether `candidate` is an acceptable origin URL.
///
/// Rules are applied in order: parse, scheme, host. The function is total
/// over any input and has no side effects.
///
/// # Examples
///
/// ```
/// use shortlink::utils::url_validator::{validate_origin, UrlValidationError};
///
/// assert!(validate_origin("https://example.com/path?q=1").is_ok());
/// assert_eq!(
///     validate_origin("ftp://example.com"),
///     Err(UrlValidationError::UnsupportedScheme("ftp".to_string()))
/// );
/// ```
pub fn validate_origin(candidate: &str) -> Result<(), UrlValidationError> {
    let parsed =
        Url::parse(candidate).map_err(|e| UrlValidationError::Malformed(e.to_string()))?;

    match parsed.scheme() {
        "http" | "https" => {}
        other => return Err(UrlValidationError::UnsupportedScheme(other.to_string())),
    }

    if parsed.host_str().is_none_or(str::is_empty) {
        return Err(UrlValidationError::MissingHost);
    }

    Ok(())
}
