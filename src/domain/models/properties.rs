//! Case-insensitive adapter properties.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::BTreeMap;
use std::fmt::Display;
use std::str::FromStr;

/// String-keyed adapter arguments.
///
/// Keys compare case-insensitively. Adding a key twice keeps both entries; lookups see
/// the value added last.
///
/// # Examples
///
/// ```
/// use logbridge::Properties;
///
/// let mut props = Properties::new();
/// props.insert("Level", "Info");
/// props.insert("level", "Warn");
///
/// assert_eq!(props.get("LEVEL"), Some("Warn"));
/// assert_eq!(props.len(), 2);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Properties {
    entries: Vec<(String, String)>,
}

impl Properties {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.entries.push((key.into(), value.into()));
    }

    /// Builder-style [`insert`](Self::insert).
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(key, value);
        self
    }

    /// The last value recorded for `key`.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .rev()
            .find(|(k, _)| k.eq_ignore_ascii_case(key))
            .map(|(_, v)| v.as_str())
    }

    /// Every value recorded for `key`, in insertion order.
    pub fn get_all<'a>(&'a self, key: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        self.entries
            .iter()
            .filter(move |(k, _)| k.eq_ignore_ascii_case(key))
            .map(|(_, v)| v.as_str())
    }

    pub fn get_or<'a>(&'a self, key: &str, default: &'a str) -> &'a str {
        self.get(key).unwrap_or(default)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// Parse the value for `key`, returning `default` when absent, empty or malformed.
    ///
    /// Malformed values never fail the caller: they are reported as a diagnostic trace.
    pub fn parse_or<T>(&self, key: &str, default: T) -> T
    where
        T: FromStr + Display,
        T::Err: Display,
    {
        match self.get(key).map(str::trim) {
            None | Some("") => default,
            Some(text) => text.parse().unwrap_or_else(|err: T::Err| {
                tracing::trace!(
                    target: "logbridge",
                    key,
                    value = text,
                    default = %default,
                    error = %err,
                    "failed to convert property value, using default"
                );
                default
            }),
        }
    }

    /// Like [`parse_or`](Self::parse_or) for booleans, also accepting `yes`/`no`/`1`/`0`.
    pub fn flag_or(&self, key: &str, default: bool) -> bool {
        match self.get(key).map(|v| v.trim().to_ascii_lowercase()) {
            None => default,
            Some(text) => match text.as_str() {
                "" => default,
                "true" | "yes" | "1" | "on" => true,
                "false" | "no" | "0" | "off" => false,
                _ => {
                    tracing::trace!(
                        target: "logbridge",
                        key,
                        value = %text,
                        default,
                        "failed to convert property value to bool, using default"
                    );
                    default
                }
            },
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// First value that is present and non-empty.
pub fn coalesce<'a>(values: impl IntoIterator<Item = Option<&'a str>>) -> Option<&'a str> {
    values.into_iter().flatten().find(|v| !v.is_empty())
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Properties {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect(),
        }
    }
}

impl<K: Into<String>, V: Into<String>> Extend<(K, V)> for Properties {
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        self.entries
            .extend(iter.into_iter().map(|(k, v)| (k.into(), v.into())));
    }
}

// Serialized as a plain map; duplicate keys collapse to the effective value.
impl Serialize for Properties {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut effective: BTreeMap<String, &str> = BTreeMap::new();
        for (key, value) in &self.entries {
            effective.insert(key.to_ascii_lowercase(), value);
        }
        effective.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Properties {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let map = BTreeMap::<String, String>::deserialize(deserializer)?;
        Ok(map.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::Level;

    #[test]
    fn test_lookup_is_case_insensitive_last_wins() {
        let props: Properties = [("showDateTime", "true"), ("SHOWDATETIME", "false")]
            .into_iter()
            .collect();

        assert_eq!(props.get("showdatetime"), Some("false"));
        assert_eq!(props.get_all("ShowDateTime").collect::<Vec<_>>(), vec!["true", "false"]);
        assert!(props.get("missing").is_none());
        assert_eq!(props.get_or("missing", "fallback"), "fallback");
    }

    #[test]
    fn test_parse_or_degrades() {
        let props = Properties::new()
            .with("count", "12")
            .with("ratio", "not-a-number")
            .with("level", "warn")
            .with("empty", "");

        assert_eq!(props.parse_or("count", 0_i32), 12);
        assert!((props.parse_or("ratio", 1.5_f64) - 1.5).abs() < f64::EPSILON);
        assert_eq!(props.parse_or("level", Level::All), Level::Warn);
        assert_eq!(props.parse_or("empty", 7_u8), 7);
        assert_eq!(props.parse_or("absent", 3_i64), 3);
    }

    #[test]
    fn test_flag_or() {
        let props = Properties::new()
            .with("a", "TRUE")
            .with("b", "no")
            .with("c", "maybe");

        assert!(props.flag_or("a", false));
        assert!(!props.flag_or("b", true));
        assert!(props.flag_or("c", true));
        assert!(!props.flag_or("d", false));
    }

    #[test]
    fn test_coalesce() {
        assert_eq!(coalesce([None, Some(""), Some("x"), Some("y")]), Some("x"));
        assert_eq!(coalesce([None, Some("")]), None);
    }

    #[test]
    fn test_serde_round_trip_uses_effective_values() {
        let props = Properties::new().with("Level", "Info").with("level", "Warn");
        let json = serde_json::to_string(&props).unwrap();
        assert_eq!(json, r#"{"level":"Warn"}"#);

        let back: Properties = serde_json::from_str(r#"{"showLogName":"false"}"#).unwrap();
        assert!(!back.flag_or("showlogname", true));
    }
}
