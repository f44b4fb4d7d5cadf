// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Decoding of the `value` field carried by every device response.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::ParseError;

use super::extract::try_extract_json;

/// The `value` of a device response.
///
/// The firmware answers with an integer for positions and color indices, a
/// boolean (or 0/1) for on/off queries and a number for sensor readings. The
/// calling entity decides which interpretation applies.
///
/// # Examples
///
/// ```
/// use smartwindow_lib::response::Reading;
///
/// let reading: Reading = serde_json::from_str("60").unwrap();
/// assert_eq!(reading.as_integer(), Some(60));
///
/// let reading: Reading = serde_json::from_str("true").unwrap();
/// assert_eq!(reading.as_bool(), Some(true));
///
/// let reading: Reading = serde_json::from_str("21.5").unwrap();
/// assert_eq!(reading.as_f64(), Some(21.5));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Reading {
    /// A boolean value.
    Bool(bool),
    /// An integral value.
    Integer(i64),
    /// A fractional value.
    Number(f64),
    /// A textual value.
    Text(String),
}

impl Reading {
    /// Interprets the reading as an integer.
    ///
    /// Whole floats and numeric strings are accepted; booleans are not.
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub fn as_integer(&self) -> Option<i64> {
        match self {
            Self::Integer(i) => Some(*i),
            Self::Number(f) if f.fract() == 0.0 && f.is_finite() => Some(*f as i64),
            Self::Text(s) => s.trim().parse().ok(),
            Self::Bool(_) | Self::Number(_) => None,
        }
    }

    /// Interprets the reading as on/off.
    ///
    /// Integers are truthy when non-zero.
    #[must_use]
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            Self::Integer(i) => Some(*i != 0),
            Self::Text(s) => match s.trim().to_ascii_lowercase().as_str() {
                "true" | "on" | "1" => Some(true),
                "false" | "off" | "0" => Some(false),
                _ => None,
            },
            Self::Number(_) => None,
        }
    }

    /// Interprets the reading as a number.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Integer(i) => Some(*i as f64),
            Self::Number(f) => Some(*f),
            Self::Text(s) => s.trim().parse().ok(),
            Self::Bool(_) => None,
        }
    }
}

impl fmt::Display for Reading {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bool(b) => write!(f, "{b}"),
            Self::Integer(i) => write!(f, "{i}"),
            Self::Number(n) => write!(f, "{n}"),
            Self::Text(s) => f.write_str(s),
        }
    }
}

impl From<bool> for Reading {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<i64> for Reading {
    fn from(value: i64) -> Self {
        Self::Integer(value)
    }
}

impl From<f64> for Reading {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

/// Success shape of a device response: `{"value": <int|bool|number>}`.
#[derive(Debug, Clone, Deserialize)]
struct ValueResponse {
    #[serde(default)]
    value: Option<Reading>,
}

/// Extracts the embedded object from `raw` and decodes its `value`.
///
/// # Errors
///
/// Returns `ParseError::MissingField` if the object has no (or a null)
/// `value`, and the extraction errors of [`try_extract_json`] otherwise.
///
/// # Examples
///
/// ```
/// use smartwindow_lib::response::{parse_reading, Reading};
///
/// let reading = parse_reading(b"\x00{\"value\": 120}\x00").unwrap();
/// assert_eq!(reading, Reading::Integer(120));
///
/// assert!(parse_reading(b"{\"status\": \"ok\"}").is_err());
/// ```
pub fn parse_reading(raw: &[u8]) -> Result<Reading, ParseError> {
    let object = try_extract_json(raw)?;
    let response: ValueResponse = serde_json::from_value(serde_json::Value::Object(object))?;
    response
        .value
        .ok_or_else(|| ParseError::MissingField("value".to_string()))
}
