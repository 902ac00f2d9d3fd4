use std::path::Path;

use serde_json::{Map, Value};

use crate::ConfigError;

/// Desired state of a job, as written by the user.
///
/// The document is opaque apart from `name`, which is the only key used to
/// match against the registry.
#[derive(Debug, Clone, PartialEq)]
pub struct JobDefinition {
    settings: Map<String, Value>,
}

impl JobDefinition {
    #[must_use]
    pub fn new(settings: Map<String, Value>) -> Self {
        Self { settings }
    }

    /// The job's name, or `None` if it is missing, not a string, or empty.
    #[must_use]
    pub fn name(&self) -> Option<&str> {
        self.settings
            .get("name")
            .and_then(Value::as_str)
            .filter(|name| !name.is_empty())
    }

    #[must_use]
    pub fn settings(&self) -> &Map<String, Value> {
        &self.settings
    }

    /// Pretty-printed JSON payload handed to the bridge.
    ///
    /// # Errors
    ///
    /// Returns the `serde_json` error if serialization fails.
    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(&self.settings)
    }
}

impl TryFrom<Value> for JobDefinition {
    type Error = Value;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            Value::Object(settings) => Ok(Self { settings }),
            other => Err(other),
        }
    }
}

/// Load a job definition from a JSON file.
///
/// Does not check for `name`; the reconciler does that.
///
/// # Errors
///
/// - [`ConfigError::NotFound`] if `path` does not exist.
/// - [`ConfigError::Malformed`] if the content is not JSON or not an object.
/// - [`ConfigError::Io`] for any other read failure.
pub fn load_job_definition(path: &Path) -> Result<JobDefinition, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            ConfigError::NotFound {
                path: path.display().to_string(),
            }
        } else {
            ConfigError::Io {
                path: path.display().to_string(),
                source: e,
            }
        }
    })?;

    let value: Value = serde_json::from_str(&content).map_err(|e| ConfigError::Malformed {
        path: path.display().to_string(),
        reason: e.to_string(),
    })?;

    let definition = JobDefinition::try_from(value).map_err(|other| ConfigError::Malformed {
        path: path.display().to_string(),
        reason: format!("expected a JSON object, found {}", json_kind(&other)),
    })?;

    tracing::debug!(path = %path.display(), "loaded job definition");
    Ok(definition)
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
