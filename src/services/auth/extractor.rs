use crate::services::auth::AuthError;

/// Pull the bare token out of a raw `Authorization` header value.
///
/// The header must be exactly `Bearer <token>`: two parts, one space, the
/// scheme case-sensitive. The token part is returned verbatim, no trimming.
/// Pure function; all the cryptographic work happens later.
pub fn extract_bearer_token(header: Option<&str>) -> Result<&str, AuthError> {
    let header = header.ok_or(AuthError::MissingHeader)?;

    let parts: Vec<&str> = header.split(' ').collect();
    if parts.len() != 2 {
        return Err(AuthError::MalformedHeader);
    }
    if parts[0] != "Bearer" {
        return Err(AuthError::UnsupportedScheme);
    }

    Ok(parts[1])
}
