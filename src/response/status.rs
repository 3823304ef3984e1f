// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Status response parsing.

use std::collections::BTreeMap;

use serde_json::Value;

use crate::error::ParseError;

/// Status key reporting whether the controller is connected to the mount.
pub const MOUNT_CONNECTED_KEY: &str = "mount.is_connected";

/// Snapshot of the controller state returned by `GET /status`.
///
/// The controller reports a flat map of dotted keys to string values. Nested
/// JSON objects are flattened into dotted keys and scalars are stringified,
/// so `{"mount": {"is_connected": true}}` and
/// `{"mount.is_connected": "True"}` both produce the key
/// `mount.is_connected`.
///
/// When two entries flatten to the same key, the one spelled with fewer
/// nesting levels wins, so a literal `"mount.is_connected"` key takes
/// precedence over `{"mount": {"is_connected": ..}}` regardless of order.
///
/// # Examples
///
/// ```
/// use heater_control::response::{StatusLookup, StatusSnapshot};
///
/// let snapshot = StatusSnapshot::from_json(r#"{"mount.is_connected": "True"}"#).unwrap();
/// assert_eq!(snapshot.get("mount.is_connected"), Some("True"));
/// assert_eq!(snapshot.lookup_bool("mount.is_connected"), StatusLookup::Value(true));
/// assert_eq!(snapshot.lookup_bool("focuser.moving"), StatusLookup::Missing);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StatusSnapshot {
    values: BTreeMap<String, String>,
}

/// Result of a typed status lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StatusLookup<T> {
    /// The key is not present in the snapshot.
    Missing,
    /// The key is present but its value could not be parsed.
    Invalid {
        /// The raw value as reported by the controller.
        raw: String,
    },
    /// The key is present and parsed successfully.
    Value(T),
}

impl StatusSnapshot {
    /// Parses a JSON status body.
    ///
    /// # Errors
    ///
    /// Returns `ParseError::Json` if the body is not valid JSON and
    /// `ParseError::UnexpectedFormat` if it is not a JSON object.
    pub fn from_json(body: &str) -> Result<Self, ParseError> {
        let value: Value = serde_json::from_str(body)?;
        let Value::Object(map) = value else {
            return Err(ParseError::UnexpectedFormat(
                "status response is not a JSON object".to_string(),
            ));
        };

        let mut flat = BTreeMap::new();
        for (key, value) in map {
            flatten_into(&mut flat, key, value, 0);
        }
        let values = flat
            .into_iter()
            .map(|(key, (_, value))| (key, value))
            .collect();
        Ok(Self { values })
    }

    /// Returns the raw value for a key.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    /// Looks up a key and parses it as a controller boolean.
    ///
    /// See [`parse_device_bool`] for the accepted tokens.
    #[must_use]
    pub fn lookup_bool(&self, key: &str) -> StatusLookup<bool> {
        match self.get(key) {
            None => StatusLookup::Missing,
            Some(raw) => match parse_device_bool(raw) {
                Some(value) => StatusLookup::Value(value),
                None => StatusLookup::Invalid {
                    raw: raw.to_string(),
                },
            },
        }
    }

    /// Returns the number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns `true` if the snapshot has no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Iterates over entries in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for StatusSnapshot {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            values: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

/// Parses a boolean as reported by the controller.
///
/// Comparison is case-insensitive. Accepted tokens are `true`/`false`,
/// `1`/`0`, `yes`/`no` and `on`/`off`. Anything else yields `None`.
#[must_use]
pub fn parse_device_bool(raw: &str) -> Option<bool> {
    const TRUE: [&str; 4] = ["true", "1", "yes", "on"];
    const FALSE: [&str; 4] = ["false", "0", "no", "off"];

    let token = raw.trim();
    if TRUE.iter().any(|t| t.eq_ignore_ascii_case(token)) {
        Some(true)
    } else if FALSE.iter().any(|t| t.eq_ignore_ascii_case(token)) {
        Some(false)
    } else {
        None
    }
}

/// Flattened values tagged with the nesting depth they were found at.
type Flattened = BTreeMap<String, (usize, String)>;

fn flatten_into(values: &mut Flattened, key: String, value: Value, depth: usize) {
    let scalar = match value {
        Value::Null => return,
        Value::String(s) => s,
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        array @ Value::Array(_) => array.to_string(),
        Value::Object(map) => {
            for (child, value) in map {
                flatten_into(values, format!("{key}.{child}"), value, depth + 1);
            }
            return;
        }
    };
    match values.get(&key) {
        Some((existing, _)) if *existing <= depth => {}
        _ => {
            values.insert(key, (depth, scalar));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_flat_map() {
        let snapshot = StatusSnapshot::from_json(
            r#"{"mount.is_connected": "False", "heaters.m1.power": "20"}"#,
        )
        .unwrap();
        assert_eq!(snapshot.len(), 2);
        assert_eq!(snapshot.get("heaters.m1.power"), Some("20"));
        assert_eq!(
            snapshot.lookup_bool(MOUNT_CONNECTED_KEY),
            StatusLookup::Value(false)
        );
    }

    #[test]
    fn flattens_nested_objects_and_scalars() {
        let snapshot = StatusSnapshot::from_json(
            r#"{"mount": {"is_connected": true, "ra": 12.5}, "tags": ["a"], "note": null}"#,
        )
        .unwrap();
        assert_eq!(snapshot.get("mount.is_connected"), Some("true"));
        assert_eq!(snapshot.get("mount.ra"), Some("12.5"));
        assert_eq!(snapshot.get("tags"), Some(r#"["a"]"#));
        assert_eq!(snapshot.get("note"), None);
    }

    #[test]
    fn literal_dotted_key_beats_nested_object() {
        for body in [
            r#"{"mount.is_connected": "False", "mount": {"is_connected": true}}"#,
            r#"{"mount": {"is_connected": true}, "mount.is_connected": "False"}"#,
        ] {
            let snapshot = StatusSnapshot::from_json(body).unwrap();
            assert_eq!(snapshot.get(MOUNT_CONNECTED_KEY), Some("False"), "{body}");
            assert_eq!(snapshot.len(), 1);
        }
    }

    #[test]
    fn shallower_nesting_wins_collisions() {
        let snapshot =
            StatusSnapshot::from_json(r#"{"a": {"b": {"c": "deep"}, "b.c": "shallow"}}"#).unwrap();
        assert_eq!(snapshot.get("a.b.c"), Some("shallow"));
    }

    #[test]
    fn rejects_non_object() {
        let err = StatusSnapshot::from_json("[1, 2]").unwrap_err();
        assert!(matches!(err, ParseError::UnexpectedFormat(_)));
    }

    #[test]
    fn rejects_invalid_json() {
        assert!(matches!(
            StatusSnapshot::from_json("not json"),
            Err(ParseError::Json(_))
        ));
    }

    #[test]
    fn lookup_distinguishes_missing_and_invalid() {
        let snapshot: StatusSnapshot = [("mount.is_connected", "maybe")].into_iter().collect();
        assert_eq!(
            snapshot.lookup_bool(MOUNT_CONNECTED_KEY),
            StatusLookup::Invalid {
                raw: "maybe".to_string()
            }
        );
        assert_eq!(snapshot.lookup_bool("other"), StatusLookup::Missing);
    }

    #[test]
    fn device_bool_tokens() {
        for raw in ["true", "True", "TRUE", "1", "yes", "On", " true "] {
            assert_eq!(parse_device_bool(raw), Some(true), "{raw}");
        }
        for raw in ["false", "False", "0", "NO", "off"] {
            assert_eq!(parse_device_bool(raw), Some(false), "{raw}");
        }
        for raw in ["", "2", "connected", "t"] {
            assert_eq!(parse_device_bool(raw), None, "{raw}");
        }
    }
}
