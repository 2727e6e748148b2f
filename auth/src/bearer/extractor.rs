use super::errors::BearerError;

/// Scheme prefix of a bearer credential, including the separating space.
pub const BEARER_PREFIX: &str = "Bearer ";

/// Extract the token from an `Authorization` header value.
///
/// The scheme match is case-sensitive and expects exactly one space.
///
/// # Arguments
/// * `header` - Raw header value, `None` when the header is absent
///
/// # Returns
/// The token following the `Bearer ` prefix
///
/// # Errors
/// * `MissingHeader` - Header absent or empty
/// * `MalformedHeader` - Header does not use the bearer scheme or carries no token
pub fn extract_bearer(header: Option<&str>) -> Result<&str, BearerError> {
    let value = match header {
        Some(value) if !value.is_empty() => value,
        _ => return Err(BearerError::MissingHeader),
    };

    match value.strip_prefix(BEARER_PREFIX) {
        Some(token) if !token.is_empty() => Ok(token),
        _ => Err(BearerError::MalformedHeader),
    }
}
