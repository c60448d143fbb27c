//! CORS origin negotiation and preflight handling

use axum::{
    extract::{Request, State},
    http::{
        header::{
            ACCESS_CONTROL_ALLOW_HEADERS, ACCESS_CONTROL_ALLOW_METHODS,
            ACCESS_CONTROL_ALLOW_ORIGIN, ACCESS_CONTROL_MAX_AGE, ORIGIN, VARY,
        },
        HeaderMap, HeaderValue, Method, StatusCode,
    },
    middleware::Next,
    response::{IntoResponse, Response},
};
use std::convert::Infallible;
use std::str::FromStr;

use super::{AppState, API_PREFIX};

const ALLOW_METHODS: &str = "GET, OPTIONS";
const ALLOW_HEADERS: &str = "content-type";
const MAX_AGE_SECS: &str = "86400";

/// Longest `Origin` header value considered
const MAX_ORIGIN_LEN: usize = 256;

/// Which origins may read API responses cross-origin
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum AllowedOrigins {
    /// Any origin; responses carry `access-control-allow-origin: *`
    #[default]
    Any,
    /// Only these exact origins
    List(Vec<String>),
}

impl FromStr for AllowedOrigins {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::parse(s))
    }
}

impl AllowedOrigins {
    /// `*` (or a blank value) means any origin; otherwise a comma separated
    /// list with entries trimmed and empty entries dropped.
    pub fn parse(s: &str) -> Self {
        let s = s.trim();
        if s.is_empty() {
            return AllowedOrigins::Any;
        }

        let origins: Vec<String> = s
            .split(',')
            .map(str::trim)
            .filter(|o| !o.is_empty())
            .map(str::to_string)
            .collect();

        if origins.iter().any(|o| o == "*") {
            AllowedOrigins::Any
        } else {
            AllowedOrigins::List(origins)
        }
    }

    /// Add the allow-origin headers for `origin`, if it is allowed
    pub fn apply(&self, origin: &str, headers: &mut HeaderMap) {
        match self {
            AllowedOrigins::Any => {
                headers.insert(ACCESS_CONTROL_ALLOW_ORIGIN, HeaderValue::from_static("*"));
            }
            AllowedOrigins::List(origins) => {
                if !origins.iter().any(|o| o == origin) {
                    tracing::debug!("Origin {} not in allow-list", origin);
                    return;
                }
                if let Ok(value) = HeaderValue::from_str(origin) {
                    headers.insert(ACCESS_CONTROL_ALLOW_ORIGIN, value);
                    headers.append(VARY, HeaderValue::from_static("Origin"));
                }
            }
        }
    }
}

/// Answers preflight requests under the API prefix and adds CORS headers to
/// every other API response
pub async fn cors_middleware(State(state): State<AppState>, req: Request, next: Next) -> Response {
    if !req.uri().path().starts_with(API_PREFIX) {
        return next.run(req).await;
    }

    let origin = request_origin(req.headers());

    let mut resp = if req.method() == Method::OPTIONS {
        preflight_response()
    } else {
        next.run(req).await
    };

    if let Some(origin) = origin {
        state.cors.apply(&origin, resp.headers_mut());
    }
    resp
}

fn preflight_response() -> Response {
    let mut resp = StatusCode::NO_CONTENT.into_response();
    let headers = resp.headers_mut();
    headers.insert(
        ACCESS_CONTROL_ALLOW_METHODS,
        HeaderValue::from_static(ALLOW_METHODS),
    );
    headers.insert(
        ACCESS_CONTROL_ALLOW_HEADERS,
        HeaderValue::from_static(ALLOW_HEADERS),
    );
    headers.insert(ACCESS_CONTROL_MAX_AGE, HeaderValue::from_static(MAX_AGE_SECS));
    resp
}

fn request_origin(headers: &HeaderMap) -> Option<String> {
    let raw = headers.get(ORIGIN)?.to_str().ok()?.trim();
    if raw.is_empty() || raw.len() > MAX_ORIGIN_LEN {
        return None;
    }
    Some(raw.to_string())
}
