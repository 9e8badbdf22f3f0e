// Copyright 2019-2026 Maravilla Labs, operated by SOLUTAS GmbH, Switzerland
// SPDX-License-Identifier: Apache-2.0
// SPDX-License-Identifier: MIT

//! HTTP request abstraction for the settings core.
//!
//! Server adapters convert their native request type into a
//! [`PlaytimeRequest`], which gives the core what it needs: submitted form
//! fields and the signals used to pick a language.

use crate::body::{parse_form_body, BodyParseError};
use crate::localization::LanguageHints;
use std::collections::HashMap;

/// Query parameter and cookie name carrying an explicit language choice.
pub const LANGUAGE_PARAM: &str = "lang";

/// A platform-agnostic HTTP request.
///
/// # Example
///
/// ```rust
/// use playtime::PlaytimeRequest;
///
/// let request = PlaytimeRequest::new("/settings/general", "GET")
///     .with_query([("lang".into(), "de".into())].into());
/// assert_eq!(request.language_hints().query.as_deref(), Some("de"));
/// ```
#[derive(Debug, Clone)]
pub struct PlaytimeRequest {
    /// The request path (e.g., "/settings/snes")
    pub path: String,

    /// The HTTP method (e.g., "GET", "POST")
    pub method: String,

    /// HTTP headers, names lowercased
    pub headers: HashMap<String, String>,

    /// Request body (for POST)
    pub body: Option<Vec<u8>>,

    /// Query parameters (parsed from URL)
    pub query: HashMap<String, String>,

    /// Cookies
    pub cookies: HashMap<String, String>,
}

impl PlaytimeRequest {
    /// Creates a new request with the given path and method.
    pub fn new(path: impl Into<String>, method: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            method: method.into(),
            headers: HashMap::new(),
            body: None,
            query: HashMap::new(),
            cookies: HashMap::new(),
        }
    }

    /// Adds headers to the request. Names are lowercased.
    pub fn with_headers(mut self, headers: HashMap<String, String>) -> Self {
        self.headers = headers
            .into_iter()
            .map(|(k, v)| (k.to_ascii_lowercase(), v))
            .collect();
        self
    }

    /// Adds a body to the request.
    pub fn with_body(mut self, body: Vec<u8>) -> Self {
        self.body = Some(body);
        self
    }

    /// Adds query parameters to the request.
    pub fn with_query(mut self, query: HashMap<String, String>) -> Self {
        self.query = query;
        self
    }

    /// Adds cookies to the request.
    pub fn with_cookies(mut self, cookies: HashMap<String, String>) -> Self {
        self.cookies = cookies;
        self
    }

    /// Returns a header value by (case-insensitive) name.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .get(&name.to_ascii_lowercase())
            .map(String::as_str)
    }

    /// Returns the Content-Type header, if present.
    pub fn content_type(&self) -> Option<&str> {
        self.header("content-type")
    }

    /// Parses the body into form fields.
    ///
    /// A request without a body has no fields.
    pub fn form_fields(&self) -> Result<HashMap<String, String>, BodyParseError> {
        match &self.body {
            Some(body) => parse_form_body(body, self.content_type()),
            None => Ok(HashMap::new()),
        }
    }

    /// Collects the language signals of this request.
    pub fn language_hints(&self) -> LanguageHints {
        LanguageHints {
            query: self.query.get(LANGUAGE_PARAM).cloned(),
            cookie: self.cookies.get(LANGUAGE_PARAM).cloned(),
            accept_language: self.header("accept-language").map(str::to_string),
        }
    }
}

impl Default for PlaytimeRequest {
    fn default() -> Self {
        Self::new("/", "GET")
    }
}

/// Parses a `Cookie` header into name/value pairs.
pub fn parse_cookie_header(header: &str) -> HashMap<String, String> {
    header
        .split(';')
        .filter_map(|pair| {
            let (name, value) = pair.split_once('=')?;
            let name = name.trim();
            if name.is_empty() {
                None
            } else {
                Some((name.to_string(), value.trim().trim_matches('"').to_string()))
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_request() {
        let req = PlaytimeRequest::new("/settings/snes", "GET");
        assert_eq!(req.path, "/settings/snes");
        assert_eq!(req.method, "GET");
        assert!(req.form_fields().unwrap().is_empty());
    }

    #[test]
    fn test_form_fields() {
        let req = PlaytimeRequest::new("/settings/general", "POST")
            .with_headers([("Content-Type".into(), "application/x-www-form-urlencoded".into())].into())
            .with_body(b"language=de&auto-save-interval=5".to_vec());

        let fields = req.form_fields().unwrap();
        assert_eq!(fields["language"], "de");
        assert_eq!(fields["auto-save-interval"], "5");
    }

    #[test]
    fn test_language_hints() {
        let req = PlaytimeRequest::new("/settings", "GET")
            .with_query([("lang".into(), "de".into())].into())
            .with_cookies(parse_cookie_header("session=abc; lang=en"))
            .with_headers([("Accept-Language".into(), "fr-CH, fr;q=0.9".into())].into());

        let hints = req.language_hints();
        assert_eq!(hints.query.as_deref(), Some("de"));
        assert_eq!(hints.cookie.as_deref(), Some("en"));
        assert_eq!(hints.accept_language.as_deref(), Some("fr-CH, fr;q=0.9"));
    }

    #[test]
    fn test_parse_cookie_header() {
        let cookies = parse_cookie_header("a=1; b=\"two\"; broken; =x");
        assert_eq!(cookies.len(), 2);
        assert_eq!(cookies["a"], "1");
        assert_eq!(cookies["b"], "two");
    }
}
