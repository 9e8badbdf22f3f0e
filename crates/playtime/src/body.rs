// Copyright 2019-2026 Maravilla Labs, operated by SOLUTAS GmbH, Switzerland
// SPDX-License-Identifier: Apache-2.0
// SPDX-License-Identifier: MIT

//! Form body parsing for settings submissions.

use std::collections::HashMap;

/// Content type of the settings forms.
pub const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";

/// Errors that can occur while parsing a request body.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum BodyParseError {
    /// The body is not a urlencoded form.
    #[error("Unsupported content type: {0}")]
    UnsupportedContentType(String),
}

/// Parses a urlencoded form body into flat fields.
///
/// A missing content type is read as a form. An empty body yields no
/// fields whatever the content type. When a key repeats, the first value
/// wins, so a checkbox followed by a hidden field of the same name reads as
/// checked.
pub fn parse_form_body(
    body: &[u8],
    content_type: Option<&str>,
) -> Result<HashMap<String, String>, BodyParseError> {
    if body.is_empty() {
        return Ok(HashMap::new());
    }

    match content_type.map(str::trim) {
        None | Some("") => Ok(parse_form_urlencoded(body)),
        Some(ct) if is_form_content_type(ct) => Ok(parse_form_urlencoded(body)),
        Some(ct) => Err(BodyParseError::UnsupportedContentType(ct.to_string())),
    }
}

/// Returns true for `application/x-www-form-urlencoded`, parameters ignored.
pub fn is_form_content_type(content_type: &str) -> bool {
    content_type
        .split(';')
        .next()
        .is_some_and(|mime| mime.trim().eq_ignore_ascii_case(FORM_CONTENT_TYPE))
}

/// Parses `key=value&...` pairs, first occurrence wins.
pub fn parse_form_urlencoded(bytes: &[u8]) -> HashMap<String, String> {
    let mut form = HashMap::new();
    for (k, v) in form_urlencoded::parse(bytes) {
        form.entry(k.into_owned()).or_insert_with(|| v.into_owned());
    }
    form
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_urlencoded() {
        let form = parse_form_body(
            b"shader=crt-geom.glslp&volume=0.7&control-keyboard-0-start=Enter+Key",
            Some("application/x-www-form-urlencoded"),
        )
        .unwrap();
        assert_eq!(form["shader"], "crt-geom.glslp");
        assert_eq!(form["volume"], "0.7");
        assert_eq!(form["control-keyboard-0-start"], "Enter Key");
    }

    #[test]
    fn test_content_type_parameters() {
        assert!(is_form_content_type("application/x-www-form-urlencoded; charset=UTF-8"));
        assert!(is_form_content_type("Application/X-WWW-Form-Urlencoded"));
        assert!(!is_form_content_type("multipart/form-data; boundary=x"));

        let form = parse_form_body(b"core=snes9x", None).unwrap();
        assert_eq!(form["core"], "snes9x");
    }

    #[test]
    fn test_first_value_wins() {
        let form = parse_form_urlencoded(b"fps=1&fps=0");
        assert_eq!(form["fps"], "1");
    }

    #[test]
    fn test_unsupported_and_empty() {
        assert!(parse_form_body(b"", Some("application/json")).unwrap().is_empty());
        assert_eq!(
            parse_form_body(b"{}", Some("application/json")).unwrap_err(),
            BodyParseError::UnsupportedContentType("application/json".to_string())
        );
    }
}
