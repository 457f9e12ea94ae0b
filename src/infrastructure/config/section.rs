//! The `logging` section document and its validation into a [`LogSetting`].
//!
//! ```yaml
//! factory_adapter:
//!   type: console
//!   args:
//!     - key: level
//!       value: Warn
//!     - key: showDateTime
//!       value: false
//! ```
//!
//! `factory_adapter` may also be a list (at most one element is accepted) and `args` may
//! be a plain map, which is the shape environment overrides produce.

use serde::Deserialize;
use std::collections::BTreeMap;
use std::fmt;

use crate::domain::errors::{LoggingError, LoggingResult};
use crate::domain::models::{LogSetting, Properties};

/// Raw, unvalidated `logging` section.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SectionDocument {
    #[serde(default)]
    factory_adapter: Option<OneOrMany<AdapterElement>>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
enum OneOrMany<T> {
    Many(Vec<T>),
    One(T),
}

#[derive(Debug, Clone, Deserialize)]
struct AdapterElement {
    #[serde(rename = "type", default)]
    adapter_type: Option<String>,
    #[serde(default, alias = "arguments")]
    args: Option<Arguments>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
enum Arguments {
    List(Vec<Argument>),
    Map(BTreeMap<String, Scalar>),
}

#[derive(Debug, Clone, Deserialize)]
struct Argument {
    #[serde(default)]
    key: Option<String>,
    #[serde(default)]
    value: Option<Scalar>,
}

/// Argument values arrive typed from YAML and the environment; adapters see text.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
enum Scalar {
    Text(String),
    Bool(bool),
    Int(i64),
    Float(f64),
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(text) => f.write_str(text),
            Self::Bool(flag) => write!(f, "{flag}"),
            Self::Int(number) => write!(f, "{number}"),
            Self::Float(number) => write!(f, "{number}"),
        }
    }
}

impl SectionDocument {
    /// Validate the document. `Ok(None)` means no adapter element is present.
    pub fn into_setting(self) -> LoggingResult<Option<LogSetting>> {
        let mut elements = match self.factory_adapter {
            None => return Ok(None),
            Some(OneOrMany::One(element)) => vec![element],
            Some(OneOrMany::Many(elements)) => elements,
        };

        if elements.len() > 1 {
            return Err(LoggingError::configuration(format!(
                "expected at most one factory_adapter element, found {}",
                elements.len()
            )));
        }
        let Some(element) = elements.pop() else {
            return Ok(None);
        };

        let adapter_type = element
            .adapter_type
            .map(|name| name.trim().to_string())
            .filter(|name| !name.is_empty())
            .ok_or_else(|| LoggingError::configuration("factory_adapter element has no 'type'"))?;

        let properties = match element.args {
            None => Properties::new(),
            Some(Arguments::Map(map)) => map.into_iter().map(|(key, value)| (key, value.to_string())).collect(),
            Some(Arguments::List(args)) => {
                let mut properties = Properties::new();
                for (position, arg) in args.into_iter().enumerate() {
                    let key = arg
                        .key
                        .filter(|key| !key.trim().is_empty())
                        .ok_or_else(|| {
                            LoggingError::configuration(format!(
                                "argument #{} of adapter '{adapter_type}' has no 'key'",
                                position + 1
                            ))
                        })?;
                    let value = arg.value.map(|value| value.to_string()).unwrap_or_default();
                    properties.insert(key, value);
                }
                properties
            }
        };

        Ok(Some(LogSetting::new(adapter_type, properties)))
    }
}

/// Validate an already deserialized section.
pub fn parse_section(document: SectionDocument) -> LoggingResult<Option<LogSetting>> {
    document.into_setting()
}

/// Parse and validate a standalone YAML (or JSON) section document.
pub fn parse_section_str(text: &str) -> LoggingResult<Option<LogSetting>> {
    let document: SectionDocument = serde_yaml::from_str(text)
        .map_err(|err| LoggingError::configuration_with("malformed logging section", err))?;
    parse_section(document)
}
