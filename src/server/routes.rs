//! API request handlers

use axum::{
    extract::State,
    http::{header::CONTENT_TYPE, StatusCode, Uri},
    response::{IntoResponse, Response},
};
use percent_encoding::percent_decode_str;

use super::AppState;
use crate::content::{validate_slug, SlugError};

const JSON_UTF8: &str = "application/json; charset=utf-8";
const TEXT_UTF8: &str = "text/plain; charset=utf-8";

/// Request-time failures, each mapped to a client-visible status
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RequestError {
    /// Slug segment is not valid percent-encoded UTF-8
    BadEncoding,
    /// Decoded slug failed validation
    InvalidSlug(SlugError),
    /// No article (or route) matches
    NotFound,
}

impl IntoResponse for RequestError {
    fn into_response(self) -> Response {
        match self {
            RequestError::BadEncoding | RequestError::InvalidSlug(_) => {
                (StatusCode::BAD_REQUEST, "Bad Request").into_response()
            }
            RequestError::NotFound => (StatusCode::NOT_FOUND, "Not Found").into_response(),
        }
    }
}

/// GET /api/articles
pub async fn list_articles(State(state): State<AppState>) -> Response {
    (
        [(CONTENT_TYPE, JSON_UTF8)],
        state.catalog.index_json().clone(),
    )
        .into_response()
}

/// GET /api/articles/:slug
pub async fn get_article(
    State(state): State<AppState>,
    uri: Uri,
) -> Result<Response, RequestError> {
    // The route guarantees the slug is the last path segment.
    let raw = uri.path().rsplit('/').next().unwrap_or_default();
    let slug = decode_slug(raw)
        .inspect_err(|e| tracing::debug!("Rejected slug segment {:?}: {:?}", raw, e))?;

    match state.catalog.body(&slug) {
        Some(body) => Ok(([(CONTENT_TYPE, TEXT_UTF8)], body.clone()).into_response()),
        None => Err(RequestError::NotFound),
    }
}

/// Fallback for every unmatched path or method
pub async fn not_found() -> RequestError {
    RequestError::NotFound
}

/// Percent-decode a raw path segment and validate the result as a slug
pub fn decode_slug(raw: &str) -> Result<String, RequestError> {
    if has_malformed_escape(raw) {
        return Err(RequestError::BadEncoding);
    }
    let decoded = percent_decode_str(raw)
        .decode_utf8()
        .map_err(|_| RequestError::BadEncoding)?;
    validate_slug(&decoded).map_err(RequestError::InvalidSlug)?;
    Ok(decoded.into_owned())
}

/// A `%` must be followed by two hex digits
fn has_malformed_escape(raw: &str) -> bool {
    let bytes = raw.as_bytes();
    bytes.iter().enumerate().any(|(i, &b)| {
        b == b'%'
            && !(bytes.get(i + 1).is_some_and(u8::is_ascii_hexdigit)
                && bytes.get(i + 2).is_some_and(u8::is_ascii_hexdigit))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_plain_slug() {
        assert_eq!(decode_slug("hello-world").unwrap(), "hello-world");
    }

    #[test]
    fn test_decode_escaped_slug() {
        assert_eq!(decode_slug("hello%2Dworld").unwrap(), "hello-world");
        assert_eq!(decode_slug("v1%2e2").unwrap(), "v1.2");
    }

    #[test]
    fn test_decode_traversal_rejected() {
        assert_eq!(
            decode_slug("%2e%2e%2fsecret"),
            Err(RequestError::InvalidSlug(SlugError::PathSeparator))
        );
        assert_eq!(
            decode_slug("%2e%2e"),
            Err(RequestError::InvalidSlug(SlugError::ParentDirectory))
        );
        assert_eq!(
            decode_slug("a%5Cb"),
            Err(RequestError::InvalidSlug(SlugError::PathSeparator))
        );
    }

    #[test]
    fn test_decode_bad_encoding() {
        assert_eq!(decode_slug("bad%zz"), Err(RequestError::BadEncoding));
        assert_eq!(decode_slug("trailing%"), Err(RequestError::BadEncoding));
        assert_eq!(decode_slug("short%4"), Err(RequestError::BadEncoding));
        assert_eq!(decode_slug("%ff%fe"), Err(RequestError::BadEncoding));
    }

    #[test]
    fn test_decode_non_ascii_rejected() {
        // Valid UTF-8, but outside the slug charset.
        assert_eq!(
            decode_slug("%E6%97%A5%E8%A8%98"),
            Err(RequestError::InvalidSlug(SlugError::Charset))
        );
        assert_eq!(
            decode_slug("a%20b"),
            Err(RequestError::InvalidSlug(SlugError::Charset))
        );
    }

    #[test]
    fn test_error_statuses() {
        assert_eq!(
            RequestError::BadEncoding.into_response().status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            RequestError::InvalidSlug(SlugError::TooLong)
                .into_response()
                .status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            RequestError::NotFound.into_response().status(),
            StatusCode::NOT_FOUND
        );
    }
}
