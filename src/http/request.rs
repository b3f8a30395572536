//! Request handling and transformation.
//!
//! # Responsibilities
//! - Generate unique request ID (UUID v4)
//! - Extract routing-relevant information (path, query, cookies, headers)
//!
//! # Design Decisions
//! - Request ID added as early as possible for tracing
//! - Query parameters keep their order; repeated keys are kept as sent
//! - Cookie names are case-sensitive; the first occurrence of a name wins

use std::borrow::Cow;
use std::collections::HashMap;

use axum::http::header::{AsHeaderName, COOKIE};
use axum::http::{HeaderMap, HeaderName, HeaderValue, Request};
use tower_http::request_id::{MakeRequestId, RequestId};
use url::form_urlencoded;
use uuid::Uuid;

/// Header carrying the request correlation ID.
pub const X_REQUEST_ID: &str = "x-request-id";

/// Header telling the upstream renderer which locale the page is in.
pub const X_LOCALE: HeaderName = HeaderName::from_static("x-locale");

/// Header telling the upstream renderer the page's text direction.
pub const X_TEXT_DIRECTION: HeaderName = HeaderName::from_static("x-text-direction");

/// Generates a fresh UUID v4 for every request lacking an `x-request-id`.
#[derive(Debug, Clone, Copy, Default)]
pub struct MakeRequestUuidV4;

impl MakeRequestId for MakeRequestUuidV4 {
    fn make_request_id<B>(&mut self, _request: &Request<B>) -> Option<RequestId> {
        HeaderValue::from_str(&Uuid::new_v4().to_string())
            .ok()
            .map(RequestId::new)
    }
}

/// The parts of an HTTP request the locale router looks at.
#[derive(Debug, Clone, Default)]
pub struct IncomingRequest {
    path: String,
    query_params: Vec<(String, String)>,
    cookies: HashMap<String, String>,
    headers: HeaderMap,
}

impl IncomingRequest {
    /// A request for `path` with no query, cookies or headers.
    ///
    /// A missing leading `/` is added.
    pub fn new(path: impl Into<String>) -> Self {
        let mut path = path.into();
        if !path.starts_with('/') {
            path.insert(0, '/');
        }
        Self {
            path,
            ..Self::default()
        }
    }

    /// A request for a `path?query` target.
    pub fn from_target(target: &str) -> Self {
        let (path, query) = target.split_once('?').unwrap_or((target, ""));
        Self::new(path).with_query(query)
    }

    /// Capture the routing view of an HTTP request.
    pub fn from_request<B>(request: &Request<B>) -> Self {
        let uri = request.uri();
        let mut incoming = Self::new(uri.path());
        if let Some(query) = uri.query() {
            incoming.query_params = parse_query(query);
        }
        incoming.cookies = parse_cookies(request.headers());
        incoming.headers = request.headers().clone();
        incoming
    }

    /// Append the pairs of an `application/x-www-form-urlencoded` query.
    pub fn with_query(mut self, query: &str) -> Self {
        self.query_params.extend(parse_query(query));
        self
    }

    pub fn with_query_param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query_params.push((key.into(), value.into()));
        self
    }

    pub fn with_cookie(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.cookies.entry(name.into()).or_insert_with(|| value.into());
        self
    }

    pub fn with_header(mut self, name: HeaderName, value: HeaderValue) -> Self {
        self.headers.append(name, value);
        self
    }

    /// Request path; always starts with `/`.
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Decoded query pairs in request order.
    pub fn query_params(&self) -> &[(String, String)] {
        &self.query_params
    }

    pub fn cookie(&self, name: &str) -> Option<&str> {
        self.cookies.get(name).map(String::as_str)
    }

    /// Value of a header, if present and valid UTF-8. Names are
    /// case-insensitive.
    ///
    /// A header sent on several lines is joined with `", "` into one list.
    pub fn header<K: AsHeaderName>(&self, name: K) -> Option<Cow<'_, str>> {
        let mut values = self
            .headers
            .get_all(name)
            .into_iter()
            .filter_map(|v| v.to_str().ok());

        let first = values.next()?;
        let Some(second) = values.next() else {
            return Some(Cow::Borrowed(first));
        };

        let mut joined = format!("{first}, {second}");
        for value in values {
            joined.push_str(", ");
            joined.push_str(value);
        }
        Some(Cow::Owned(joined))
    }
}

fn parse_query(query: &str) -> Vec<(String, String)> {
    form_urlencoded::parse(query.as_bytes())
        .map(|(k, v)| (k.into_owned(), v.into_owned()))
        .collect()
}

/// Parse every `Cookie` header into a name → value map.
pub fn parse_cookies(headers: &HeaderMap) -> HashMap<String, String> {
    let mut cookies = HashMap::new();
    for header in headers.get_all(COOKIE) {
        let Ok(header) = header.to_str() else {
            continue;
        };
        for cookie in header.split(';') {
            let Some((name, value)) = cookie.trim().split_once('=') else {
                continue;
            };
            let value = value.trim();
            let value = value
                .strip_prefix('"')
                .and_then(|v| v.strip_suffix('"'))
                .unwrap_or(value);
            cookies
                .entry(name.trim().to_string())
                .or_insert_with(|| value.to_string());
        }
    }
    cookies
}
