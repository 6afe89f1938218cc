//! Bearer Token Extraction
//!
//! Reads `Authorization: Bearer <token>` from request headers.

use http::{HeaderMap, header};

/// Why a bearer token could not be read from the headers
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BearerError {
    #[error("Missing Authorization header")]
    Missing,

    #[error("Authorization header must use the Bearer scheme")]
    Malformed,
}

/// Extract the bearer token from the `Authorization` header
///
/// The scheme is matched case-insensitively; the token must be non-empty
/// and contain no whitespace.
pub fn extract_bearer(headers: &HeaderMap) -> Result<&str, BearerError> {
    let value = headers
        .get(header::AUTHORIZATION)
        .ok_or(BearerError::Missing)?
        .to_str()
        .map_err(|_| BearerError::Malformed)?;

    let (scheme, token) = value.trim().split_once(' ').ok_or(BearerError::Malformed)?;
    if !scheme.eq_ignore_ascii_case("bearer") {
        return Err(BearerError::Malformed);
    }

    let token = token.trim();
    if token.is_empty() || token.contains(char::is_whitespace) {
        return Err(BearerError::Malformed);
    }

    Ok(token)
}

#[cfg(test)]
mod tests {
    use super::*;
    use http::HeaderValue;

    fn headers_with(value: &'static str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(header::AUTHORIZATION, HeaderValue::from_static(value));
        headers
    }

    #[test]
    fn test_extract_bearer() {
        let headers = headers_with("Bearer abc.def");
        assert_eq!(extract_bearer(&headers), Ok("abc.def"));

        let headers = headers_with("bearer abc.def");
        assert_eq!(extract_bearer(&headers), Ok("abc.def"));
    }

    #[test]
    fn test_missing_header() {
        assert_eq!(extract_bearer(&HeaderMap::new()), Err(BearerError::Missing));
    }

    #[test]
    fn test_wrong_scheme() {
        assert_eq!(
            extract_bearer(&headers_with("Basic dXNlcjpwYXNz")),
            Err(BearerError::Malformed)
        );
        assert_eq!(extract_bearer(&headers_with("abc.def")), Err(BearerError::Malformed));
        assert_eq!(extract_bearer(&headers_with("Bearer ")), Err(BearerError::Malformed));
        assert_eq!(extract_bearer(&headers_with("Bearer a b")), Err(BearerError::Malformed));
    }
}
