// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Serde model of the cloud building tree.
//!
//! Field names follow the cloud API verbatim. Missing or `null` lists are
//! read as empty. Room, window and sensor entries are decoded one by one: an
//! entry that does not decode is logged and skipped, the rest of the tree is
//! kept.

use serde::de::{DeserializeOwned, Error as _};
use serde::{Deserialize, Deserializer};

use crate::response::Reading;

/// Service tag enabling the LED strip.
pub const SERVICE_LIGHT: &str = "S9";

/// Service tag enabling the window actuator.
pub const SERVICE_SWITCH: &str = "S5";

/// One building of the account.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Building {
    /// The home inside the building.
    #[serde(rename = "Home", default, deserialize_with = "null_as_default")]
    pub home: Home,
}

/// A home: bearer token plus rooms.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Home {
    /// Token sent with every device request of this home.
    #[serde(rename = "Bearer", default)]
    pub bearer: Option<String>,
    /// Rooms of the home.
    #[serde(rename = "Rooms", default, deserialize_with = "lenient_list")]
    pub rooms: Vec<Room>,
}

/// A room holding windows.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Room {
    /// Room display name.
    #[serde(rename = "Name", default)]
    pub name: Option<String>,
    /// Windows of the room.
    #[serde(rename = "Windows", default, deserialize_with = "lenient_list")]
    pub windows: Vec<Window>,
}

/// One window device.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Window {
    /// Cloud id, numeric or textual.
    #[serde(rename = "Id_Window", default, deserialize_with = "id_as_string")]
    pub id: Option<String>,
    /// Window display name.
    #[serde(rename = "Name", default)]
    pub name: Option<String>,
    /// Device IP address.
    #[serde(rename = "Ip", default)]
    pub ip: Option<String>,
    /// Capability tags, e.g. `S5`, `S9`.
    #[serde(rename = "Services", default, deserialize_with = "null_as_default")]
    pub services: Vec<String>,
    /// Declared sensors.
    #[serde(rename = "Sensors", default, deserialize_with = "lenient_list")]
    pub sensors: Vec<SensorDecl>,
}

impl Window {
    /// Returns `true` if the window declares `tag` in its services.
    #[must_use]
    pub fn has_service(&self, tag: &str) -> bool {
        self.services.iter().any(|s| s == tag)
    }

    /// Returns the IP address, ignoring blank values.
    #[must_use]
    pub fn address(&self) -> Option<&str> {
        self.ip.as_deref().map(str::trim).filter(|ip| !ip.is_empty())
    }
}

/// A sensor declaration: opcode to read it with and last cloud value.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SensorDecl {
    /// Opcode the device answers this sensor on. Numeric strings are accepted.
    #[serde(rename = "Op", deserialize_with = "op_from_number_or_text")]
    pub op: u16,
    /// Last value known to the cloud.
    #[serde(rename = "Value", default)]
    pub value: Option<Reading>,
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Decodes each entry on its own, dropping the ones that fail.
pub(super) fn decode_entries<T: DeserializeOwned>(entries: Vec<serde_json::Value>) -> Vec<T> {
    let kind = std::any::type_name::<T>().rsplit("::").next().unwrap_or("entry");
    entries
        .into_iter()
        .filter_map(|entry| match serde_json::from_value(entry) {
            Ok(item) => Some(item),
            Err(e) => {
                tracing::warn!(kind, error = %e, "Skipping undecodable topology entry");
                None
            }
        })
        .collect()
}

fn lenient_list<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let entries = Option::<Vec<serde_json::Value>>::deserialize(deserializer)?;
    Ok(decode_entries(entries.unwrap_or_default()))
}

fn op_from_number_or_text<'de, D>(deserializer: D) -> Result<u16, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawOp {
        Number(i64),
        Text(String),
    }

    match RawOp::deserialize(deserializer)? {
        RawOp::Number(n) => {
            u16::try_from(n).map_err(|_| D::Error::custom(format!("opcode {n} out of range")))
        }
        RawOp::Text(s) => s
            .trim()
            .parse()
            .map_err(|_| D::Error::custom(format!("opcode {s:?} is not a number"))),
    }
}

fn id_as_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawId {
        Number(i64),
        Text(String),
    }

    Ok(Option::<RawId>::deserialize(deserializer)?.map(|id| match id {
        RawId::Number(n) => n.to_string(),
        RawId::Text(s) => s,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn window_with_numeric_id() {
        let window: Window = serde_json::from_str(
            r#"{"Id_Window": 17, "Name": "North", "Ip": "10.0.0.2", "Services": ["S5", "S9"]}"#,
        )
        .unwrap();
        assert_eq!(window.id.as_deref(), Some("17"));
        assert!(window.has_service(SERVICE_SWITCH));
        assert!(window.has_service(SERVICE_LIGHT));
        assert!(window.sensors.is_empty());
    }

    #[test]
    fn nulls_read_as_empty() {
        let room: Room = serde_json::from_str(r#"{"Name": "Hall", "Windows": null}"#).unwrap();
        assert!(room.windows.is_empty());

        let window: Window =
            serde_json::from_str(r#"{"Services": null, "Sensors": null}"#).unwrap();
        assert!(window.services.is_empty());
        assert_eq!(window.id, None);
    }

    #[test]
    fn blank_ip_is_no_address() {
        let window: Window = serde_json::from_str(r#"{"Ip": "  "}"#).unwrap();
        assert_eq!(window.address(), None);
    }

    #[test]
    fn sensor_values_of_any_shape() {
        let sensors: Vec<SensorDecl> = serde_json::from_str(
            r#"[{"Op": 4, "Value": 21.5}, {"Op": 5, "Value": "40"}, {"Op": 58}]"#,
        )
        .unwrap();
        assert_eq!(sensors[0].value, Some(Reading::Number(21.5)));
        assert_eq!(sensors[1].value, Some(Reading::Text("40".to_string())));
        assert_eq!(sensors[2].value, None);
    }

    #[test]
    fn sensor_op_may_be_numeric_text() {
        let sensor: SensorDecl = serde_json::from_str(r#"{"Op": " 58 ", "Value": 600}"#).unwrap();
        assert_eq!(sensor.op, 58);
    }

    #[test]
    fn undecodable_sensors_are_skipped() {
        let window: Window = serde_json::from_str(
            r#"{"Ip": "10.0.0.2", "Sensors": [
                {"Value": 21},
                {"Op": "four"},
                {"Op": 70000},
                {"Op": "5", "Value": 40}
            ]}"#,
        )
        .unwrap();
        assert_eq!(window.sensors.len(), 1);
        assert_eq!(window.sensors[0].op, 5);
    }

    #[test]
    fn undecodable_windows_are_skipped() {
        let room: Room = serde_json::from_str(
            r#"{"Name": "Hall", "Windows": [
                {"Ip": 12},
                "not a window",
                {"Ip": "10.0.0.3", "Name": "East"}
            ]}"#,
        )
        .unwrap();
        assert_eq!(room.windows.len(), 1);
        assert_eq!(room.windows[0].address(), Some("10.0.0.3"));
    }
}
