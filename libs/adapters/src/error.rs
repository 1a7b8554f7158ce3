//! Error types for YAML adapters.

use thiserror::Error;
use zonepool_scheduler::PoolListError;

/// Errors that can occur when parsing or rendering adapted objects.
#[derive(Debug, Error)]
pub enum AdapterError {
    /// The document is not valid YAML, or does not fit the object.
    #[error("yaml error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// The document is not the expected YAML shape.
    #[error("{object}: expected a {expected}")]
    UnexpectedShape {
        object: &'static str,
        expected: &'static str,
    },

    /// The field is not part of the object.
    #[error("{object}: unknown field '{field}'")]
    UnknownField { object: &'static str, field: String },

    /// The field exists but callers may not set it.
    #[error("{object}: '{field}' is a read only field")]
    ReadOnlyField { object: &'static str, field: String },

    /// A field value failed validation.
    #[error("{object}: invalid value: {message}")]
    Invalid {
        object: &'static str,
        message: String,
    },

    /// Parsed pools do not form a valid pool list.
    #[error("invalid pool list: {0}")]
    PoolList(#[from] PoolListError),
}

impl AdapterError {
    pub(crate) fn invalid(object: &'static str, message: impl Into<String>) -> Self {
        Self::Invalid {
            object,
            message: message.into(),
        }
    }
}
