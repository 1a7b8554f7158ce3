//! Field visibility rules and the adapter trait.

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_yaml::{Mapping, Value};

use crate::error::AdapterError;

/// Whether callers may set a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldRule {
    pub name: &'static str,
    pub read_only: bool,
}

impl FieldRule {
    pub const fn read_only(name: &'static str) -> Self {
        Self {
            name,
            read_only: true,
        }
    }

    pub const fn writable(name: &'static str) -> Self {
        Self {
            name,
            read_only: false,
        }
    }
}

/// Maps an object to and from YAML under a field visibility policy.
pub trait YamlAdapter {
    type Object: Serialize + DeserializeOwned;

    /// Object name used in error messages.
    const OBJECT_NAME: &'static str;

    /// Fields as declared by the object.
    fn base_fields() -> &'static [FieldRule];

    /// Adapter overrides applied on top of [`Self::base_fields`].
    fn modifications() -> &'static [FieldRule] {
        &[]
    }

    /// Checks applied after a successful parse.
    fn validate(_object: &Self::Object) -> Result<(), AdapterError> {
        Ok(())
    }

    /// Effective field rules.
    fn fields() -> Vec<FieldRule> {
        Self::base_fields()
            .iter()
            .map(|base| {
                Self::modifications()
                    .iter()
                    .find(|m| m.name == base.name)
                    .copied()
                    .unwrap_or(*base)
            })
            .collect()
    }

    /// Reject keys that are unknown or read-only.
    fn check_fields(mapping: &Mapping) -> Result<(), AdapterError> {
        let fields = Self::fields();
        for key in mapping.keys() {
            let name = match key {
                Value::String(s) => s.as_str(),
                other => {
                    return Err(AdapterError::UnknownField {
                        object: Self::OBJECT_NAME,
                        field: format!("{other:?}"),
                    })
                }
            };

            match fields.iter().find(|f| f.name == name) {
                None => {
                    return Err(AdapterError::UnknownField {
                        object: Self::OBJECT_NAME,
                        field: name.to_string(),
                    })
                }
                Some(rule) if rule.read_only => {
                    return Err(AdapterError::ReadOnlyField {
                        object: Self::OBJECT_NAME,
                        field: name.to_string(),
                    })
                }
                Some(_) => {}
            }
        }
        Ok(())
    }

    /// Parse one object from a YAML value.
    fn parse_value(value: Value) -> Result<Self::Object, AdapterError> {
        let Value::Mapping(mapping) = &value else {
            return Err(AdapterError::UnexpectedShape {
                object: Self::OBJECT_NAME,
                expected: "mapping",
            });
        };
        Self::check_fields(mapping)?;

        let object: Self::Object = serde_yaml::from_value(value)?;
        Self::validate(&object)?;
        Ok(object)
    }

    /// Parse one object from YAML text.
    fn parse_str(contents: &str) -> Result<Self::Object, AdapterError> {
        Self::parse_value(serde_yaml::from_str(contents)?)
    }

    /// Render an object, including read-only fields.
    fn render(object: &Self::Object) -> Result<Value, AdapterError> {
        Ok(serde_yaml::to_value(object)?)
    }
}
