//! URL validation and normalization.
//!
//! Every URL accepted for shortening is re-serialized to its canonical ASCII
//! form before storage, so lookups always redirect to a well-formed target.

use url::Url;

/// Errors that can occur during URL validation.
#[derive(Debug, thiserror::Error)]
pub enum UrlValidationError {
    #[error("URL must not be blank")]
    Blank,

    #[error("Invalid URL format: {0}")]
    InvalidFormat(String),

    #[error("URL must use the http or https scheme")]
    UnsupportedScheme,

    #[error("URL must have a valid host")]
    MissingHost,
}

/// Validates a URL and returns its canonical ASCII serialization.
///
/// # Rules
///
/// 1. **Blank input**: rejected before parsing
/// 2. **Scheme**: only `http` and `https`, matched case-sensitively against
///    the input as written
/// 3. **Host**: must be present and non-empty
/// 4. **Serialization**: percent-encoding applied per the WHATWG URL rules,
///    non-ASCII hosts converted to punycode, host lowercased; path, query,
///    and fragment are otherwise preserved
///
/// The returned string is the form that gets persisted, not the raw input.
///
/// # Security
///
/// The scheme check rejects `javascript:`, `data:`, `file:`, and every other
/// non-HTTP(S) scheme, so a resolved redirect always points at a web URL.
///
/// # Errors
///
/// Returns the specific [`UrlValidationError`] for the first rule violated.
///
/// # Examples
///
/// ```ignore
/// assert_eq!(
///     normalize_url("https://example.com/path?q=1").unwrap(),
///     "https://example.com/path?q=1"
/// );
///
/// assert_eq!(
///     normalize_url("https://example.com/a b").unwrap(),
///     "https://example.com/a%20b"
/// );
///
/// assert!(normalize_url("ftp://example.com").is_err());
/// ```
pub fn normalize_url(input: &str) -> Result<String, UrlValidationError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(UrlValidationError::Blank);
    }

    let url =
        Url::parse(trimmed).map_err(|e| UrlValidationError::InvalidFormat(e.to_string()))?;

    // The parser lowercases the scheme, so compare against the input as
    // written to keep the match case-sensitive.
    if !matches!(trimmed.get(..url.scheme().len()), Some("http" | "https")) {
        return Err(UrlValidationError::UnsupportedScheme);
    }

    match url.host_str() {
        Some(host) if !host.is_empty() => {}
        _ => return Err(UrlValidationError::MissingHost),
    }

    Ok(url.to_string())
}
