//! Tool interface
//!
//! A tool is a named, schema-described handler the host framework invokes
//! with JSON arguments. Handlers read the session through a [`ToolContext`]
//! and answer with a [`ToolOutput`]: the text to say plus an optional
//! [`StatePatch`] for the session owner to merge.

use chrono::NaiveDateTime;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use thiserror::Error;

use crate::session::{SessionState, StatePatch};

/// JSON schema of a single parameter
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PropertySchema {
    #[serde(rename = "type")]
    pub prop_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl PropertySchema {
    /// String parameter with a description
    pub fn string(description: impl Into<String>) -> Self {
        Self {
            prop_type: "string".to_string(),
            description: Some(description.into()),
        }
    }

    /// Parameter declared by type only
    pub fn of_type(prop_type: impl Into<String>) -> Self {
        Self {
            prop_type: prop_type.into(),
            description: None,
        }
    }
}

/// JSON schema of a tool's argument object
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InputSchema {
    #[serde(rename = "type")]
    pub schema_type: String,
    #[serde(default)]
    pub properties: BTreeMap<String, PropertySchema>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub required: Vec<String>,
}

impl InputSchema {
    /// Empty object schema
    pub fn object() -> Self {
        Self {
            schema_type: "object".to_string(),
            properties: BTreeMap::new(),
            required: Vec::new(),
        }
    }

    /// Add a property
    pub fn property(mut self, name: impl Into<String>, schema: PropertySchema, required: bool) -> Self {
        let name = name.into();
        if required {
            self.required.push(name.clone());
        }
        self.properties.insert(name, schema);
        self
    }

    pub fn is_required(&self, name: &str) -> bool {
        self.required.iter().any(|r| r == name)
    }
}

/// Declaration the host uses to advertise and validate a tool
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolSchema {
    pub name: String,
    pub description: String,
    #[serde(rename = "parameters")]
    pub input_schema: InputSchema,
}

/// What a handler sees of the world for one call
#[derive(Debug, Clone, Copy)]
pub struct ToolContext<'a> {
    /// Session data as of the start of this call
    pub state: &'a SessionState,
    /// Local wall-clock time of the call
    pub now: NaiveDateTime,
}

impl<'a> ToolContext<'a> {
    pub fn new(state: &'a SessionState, now: NaiveDateTime) -> Self {
        Self { state, now }
    }
}

/// Handler result: spoken text plus requested session changes
#[derive(Debug, Clone, PartialEq)]
pub struct ToolOutput {
    pub message: String,
    pub patch: Option<StatePatch>,
}

impl ToolOutput {
    /// Text-only response
    pub fn text(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            patch: None,
        }
    }

    /// Attach a patch; empty patches are discarded
    pub fn with_patch(mut self, patch: StatePatch) -> Self {
        self.patch = if patch.is_empty() { None } else { Some(patch) };
        self
    }

    pub fn is_patched(&self) -> bool {
        self.patch.is_some()
    }
}

/// Dispatch errors
///
/// Handlers themselves never fail; these come from routing a call.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ToolError {
    #[error("Tool not found: {0}")]
    NotFound(String),
}

impl ToolError {
    pub fn not_found(name: impl Into<String>) -> Self {
        ToolError::NotFound(name.into())
    }
}

/// A session tool
pub trait Tool: Send + Sync {
    /// Name the host dispatches on
    fn name(&self) -> &str;

    /// Free-text description for the language model
    fn description(&self) -> &str;

    /// Argument schema; no parameters by default
    fn input_schema(&self) -> InputSchema {
        InputSchema::object()
    }

    fn schema(&self) -> ToolSchema {
        ToolSchema {
            name: self.name().to_string(),
            description: self.description().to_string(),
            input_schema: self.input_schema(),
        }
    }

    /// Run the handler. Unmet preconditions produce a fallback message and
    /// no patch rather than an error.
    fn execute(&self, input: Value, ctx: &ToolContext<'_>) -> ToolOutput;
}

/// Decode call arguments into a typed struct.
///
/// A missing or non-object payload yields `T::default()`.
pub fn parse_arguments<T>(tool: &str, input: Value) -> T
where
    T: DeserializeOwned + Default,
{
    if input.is_null() {
        return T::default();
    }
    match serde_json::from_value(input) {
        Ok(args) => args,
        Err(e) => {
            tracing::warn!(tool = tool, error = %e, "Malformed tool arguments, using defaults");
            T::default()
        }
    }
}

/// Field deserializer that maps anything but a JSON string to `""`
pub fn lenient_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::String(s) => Ok(s),
        _ => Ok(String::new()),
    }
}
