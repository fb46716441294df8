//! Free-form configuration handed to every generator factory.
//!
//! The core never interprets these keys. Built-in generators read `seed`;
//! custom factories are free to define their own.

use crate::error::GeneratorError;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value as JsonValue};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Options(Map<String, JsonValue>);

impl Options {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses options from a JSON object.
    ///
    /// # Errors
    /// Returns `GeneratorError::InvalidOptions` if the input is not a JSON object.
    pub fn from_json(source: &str) -> Result<Self, GeneratorError> {
        serde_json::from_str(source).map_err(|e| GeneratorError::InvalidOptions {
            message: e.to_string(),
        })
    }

    /// Parses options from a YAML mapping.
    ///
    /// # Errors
    /// Returns `GeneratorError::InvalidOptions` if the input is not a YAML mapping.
    pub fn from_yaml(source: &str) -> Result<Self, GeneratorError> {
        serde_yaml::from_str(source).map_err(|e| GeneratorError::InvalidOptions {
            message: e.to_string(),
        })
    }

    #[must_use]
    pub fn with(mut self, key: &str, value: impl Into<JsonValue>) -> Self {
        self.0.insert(key.to_string(), value.into());
        self
    }

    pub fn get(&self, key: &str) -> Option<&JsonValue> {
        self.0.get(key)
    }

    /// The RNG seed for built-in generators, if one was configured.
    pub fn seed(&self) -> Option<u64> {
        self.get("seed").and_then(JsonValue::as_u64)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}
