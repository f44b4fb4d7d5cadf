// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Extraction of the JSON object embedded in a noisy device response.
//!
//! Devices pad their answers with null bytes and sometimes surround the
//! object with protocol noise. Only the first balanced `{...}` is considered;
//! anything after it is ignored.

use serde_json::{Map, Value};

use crate::error::ParseError;

/// Strips null bytes and surrounding whitespace, decoding lossily as UTF-8.
///
/// # Examples
///
/// ```
/// use smartwindow_lib::response::scrub;
///
/// assert_eq!(scrub(b"\x00 {\"value\":1}\n\x00"), "{\"value\":1}");
/// ```
#[must_use]
pub fn scrub(raw: &[u8]) -> String {
    let cleaned: Vec<u8> = raw.iter().copied().filter(|b| *b != 0).collect();
    String::from_utf8_lossy(&cleaned).trim().to_string()
}

/// Locates the first brace-balanced `{...}` substring.
///
/// Braces inside JSON strings are not counted. Returns `None` when there is
/// no `{` or the first object never closes.
#[must_use]
pub fn find_object(text: &str) -> Option<&str> {
    let start = text.find('{')?;
    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;

    for (offset, ch) in text[start..].char_indices() {
        if in_string {
            if escaped {
                escaped = false;
            } else if ch == '\\' {
                escaped = true;
            } else if ch == '"' {
                in_string = false;
            }
            continue;
        }
        match ch {
            '"' => in_string = true,
            '{' => depth += 1,
            '}' => {
                depth -= 1;
                if depth == 0 {
                    return Some(&text[start..=start + offset]);
                }
            }
            _ => {}
        }
    }
    None
}

/// Scrubs `raw` and strictly decodes the first embedded object.
///
/// # Errors
///
/// Returns [`ParseError::NoJsonObject`] if no object is found and
/// [`ParseError::Json`] if the candidate is not valid JSON.
pub fn try_extract_json(raw: &[u8]) -> Result<Map<String, Value>, ParseError> {
    let text = scrub(raw);
    let candidate = find_object(&text).ok_or_else(|| ParseError::NoJsonObject(text.clone()))?;
    Ok(serde_json::from_str(candidate)?)
}

/// Like [`try_extract_json`], but logs the raw payload and returns `None` on
/// failure instead of raising.
///
/// # Examples
///
/// ```
/// use smartwindow_lib::response::extract_json;
///
/// let object = extract_json(b"\x00\x00{\"value\": 42}\x00trailing").unwrap();
/// assert_eq!(object["value"], 42);
///
/// assert!(extract_json(b"no object here").is_none());
/// ```
#[must_use]
pub fn extract_json(raw: &[u8]) -> Option<Map<String, Value>> {
    match try_extract_json(raw) {
        Ok(object) => Some(object),
        Err(e) => {
            tracing::warn!(
                error = %e,
                payload = %String::from_utf8_lossy(raw),
                "Discarding unparseable device response"
            );
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scrub_removes_embedded_nulls() {
        assert_eq!(scrub(b"{\"va\x00lue\": 1}"), "{\"value\": 1}");
    }

    #[test]
    fn find_object_ignores_leading_and_trailing_noise() {
        assert_eq!(
            find_object("ACK {\"value\": 42} more"),
            Some("{\"value\": 42}")
        );
    }

    #[test]
    fn find_object_takes_first_of_several() {
        assert_eq!(
            find_object("{\"value\": 1}{\"value\": 2}"),
            Some("{\"value\": 1}")
        );
    }

    #[test]
    fn find_object_handles_nesting() {
        assert_eq!(
            find_object("x{\"a\": {\"b\": 1}, \"value\": 3}y"),
            Some("{\"a\": {\"b\": 1}, \"value\": 3}")
        );
    }

    #[test]
    fn find_object_skips_braces_in_strings() {
        assert_eq!(
            find_object(r#"{"msg": "a } b \" {", "value": 1} tail"#),
            Some(r#"{"msg": "a } b \" {", "value": 1}"#)
        );
    }

    #[test]
    fn find_object_unbalanced() {
        assert_eq!(find_object("{\"value\": 1"), None);
        assert_eq!(find_object("no braces"), None);
        assert_eq!(find_object(""), None);
    }

    #[test]
    fn extract_noisy_response() {
        let object = extract_json(b"\x00\x00{\"value\": 42}\x00trailing").unwrap();
        assert_eq!(object.get("value"), Some(&Value::from(42)));
    }

    #[test]
    fn extract_without_brace_returns_none() {
        assert!(extract_json(b"\x00\x00garbage\x00").is_none());
    }

    #[test]
    fn extract_invalid_json_returns_none() {
        assert!(extract_json(b"{value: 42}").is_none());
        assert!(matches!(
            try_extract_json(b"{value: 42}"),
            Err(ParseError::Json(_))
        ));
    }

    #[test]
    fn extract_non_utf8_noise() {
        let object = extract_json(b"\xff\xfe{\"value\": true}\xff").unwrap();
        assert_eq!(object["value"], Value::Bool(true));
    }
}
