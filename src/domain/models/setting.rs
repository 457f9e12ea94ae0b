//! Declarative adapter settings.

use serde::{Deserialize, Serialize};

use super::properties::Properties;

/// Resolved settings naming the adapter to build and its arguments.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogSetting {
    /// Adapter identifier: a registered name or one of its aliases.
    pub adapter_type: String,
    /// Arguments handed to the adapter constructor.
    #[serde(default)]
    pub properties: Properties,
}

impl LogSetting {
    pub fn new(adapter_type: impl Into<String>, properties: Properties) -> Self {
        Self {
            adapter_type: adapter_type.into(),
            properties,
        }
    }
}

/// In-memory configuration accepted by `LogManager::configure`.
///
/// # Examples
///
/// ```
/// use logbridge::{FactoryAdapterConfiguration, LogConfiguration, Properties};
///
/// let config = LogConfiguration::new(FactoryAdapterConfiguration {
///     adapter_type: "console".to_string(),
///     arguments: Properties::new().with("level", "Warn"),
/// });
/// assert_eq!(config.factory_adapter.adapter_type, "console");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogConfiguration {
    pub factory_adapter: FactoryAdapterConfiguration,
}

impl LogConfiguration {
    pub const fn new(factory_adapter: FactoryAdapterConfiguration) -> Self {
        Self { factory_adapter }
    }

    /// Shorthand for an adapter with the given arguments.
    pub fn adapter(adapter_type: impl Into<String>, arguments: Properties) -> Self {
        Self::new(FactoryAdapterConfiguration {
            adapter_type: adapter_type.into(),
            arguments,
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FactoryAdapterConfiguration {
    #[serde(rename = "type", default)]
    pub adapter_type: String,
    #[serde(default)]
    pub arguments: Properties,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_configuration() {
        let json = r#"{"factory_adapter":{"type":"console","arguments":{"level":"Warn"}}}"#;
        let config: LogConfiguration = serde_json::from_str(json).unwrap();

        assert_eq!(config.factory_adapter.adapter_type, "console");
        assert_eq!(config.factory_adapter.arguments.get("LEVEL"), Some("Warn"));
    }

    #[test]
    fn test_missing_type_deserializes_empty() {
        let config: LogConfiguration = serde_json::from_str(r#"{"factory_adapter":{}}"#).unwrap();
        assert!(config.factory_adapter.adapter_type.is_empty());
        assert!(config.factory_adapter.arguments.is_empty());
    }
}
