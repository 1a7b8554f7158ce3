//! Pool definitions (`pools.yaml`).
//!
//! ```yaml
//! - id: 794ccc2c-d751-44fe-b57f-8894c9f5c842
//!   name: default
//!   attributes:
//!     tier: gold
//!   capabilities: [dnssec]
//!   catalog_zone:
//!     catalog_zone_fqdn: cat.example.org.
//!     catalog_zone_refresh: 60
//! ```

use serde::{Deserialize, Serialize};
use serde_yaml::{Mapping, Value};
use tracing::debug;
use zonepool_scheduler::{Pool, PoolList};

use crate::catalog_zone::{PoolCatalogZone, PoolCatalogZoneYamlAdapter};
use crate::error::AdapterError;
use crate::field::{FieldRule, YamlAdapter};

const ID_FIELD: &str = "id";
const ATTRIBUTES_FIELD: &str = "attributes";
const CAPABILITIES_FIELD: &str = "capabilities";
const CATALOG_ZONE_FIELD: &str = "catalog_zone";

const POOL_FIELDS: &[FieldRule] = &[
    FieldRule::writable(ID_FIELD),
    FieldRule::writable("name"),
    FieldRule::writable("description"),
    FieldRule::writable(ATTRIBUTES_FIELD),
    FieldRule::writable(CAPABILITIES_FIELD),
    FieldRule::writable("region"),
    FieldRule::writable(CATALOG_ZONE_FIELD),
];

/// A pool as defined by an operator, with its catalog zone settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PoolDefinition {
    #[serde(flatten)]
    pub pool: Pool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub catalog_zone: Option<PoolCatalogZone>,
}

/// YAML adapter for pool definitions.
#[derive(Debug, Clone, Copy, Default)]
pub struct PoolYamlAdapter;

impl PoolYamlAdapter {
    /// Parse a `pools.yaml` document: a sequence of pool definitions.
    pub fn parse_document(contents: &str) -> Result<Vec<PoolDefinition>, AdapterError> {
        let Value::Sequence(items) = serde_yaml::from_str::<Value>(contents)? else {
            return Err(AdapterError::UnexpectedShape {
                object: Self::OBJECT_NAME,
                expected: "sequence of pools",
            });
        };

        let definitions = items
            .into_iter()
            .map(Self::parse_value)
            .collect::<Result<Vec<_>, _>>()?;
        debug!(pool_count = definitions.len(), "Parsed pool definitions");
        Ok(definitions)
    }

    /// Collect the scheduling view of parsed definitions.
    pub fn pool_list(definitions: &[PoolDefinition]) -> Result<PoolList, AdapterError> {
        Ok(PoolList::from_pools(definitions.iter().map(|d| d.pool.clone()))?)
    }

    /// Parse a `pools.yaml` document straight into a pool list.
    pub fn load_pools(contents: &str) -> Result<PoolList, AdapterError> {
        Self::pool_list(&Self::parse_document(contents)?)
    }
}

impl YamlAdapter for PoolYamlAdapter {
    type Object = PoolDefinition;

    const OBJECT_NAME: &'static str = "Pool";

    fn base_fields() -> &'static [FieldRule] {
        POOL_FIELDS
    }

    fn validate(definition: &PoolDefinition) -> Result<(), AdapterError> {
        if definition.pool.name.as_deref().is_some_and(str::is_empty) {
            return Err(AdapterError::invalid(
                Self::OBJECT_NAME,
                format!("pool {} has an empty name", definition.pool.id()),
            ));
        }
        Ok(())
    }

    // The nested catalog zone goes through its own adapter so its field
    // visibility applies inside pool documents too.
    fn parse_value(value: Value) -> Result<PoolDefinition, AdapterError> {
        let Value::Mapping(mut mapping) = value else {
            return Err(AdapterError::UnexpectedShape {
                object: Self::OBJECT_NAME,
                expected: "mapping",
            });
        };
        Self::check_fields(&mapping)?;

        // Unquoted numeric IDs (`id: 42`) are read as strings.
        if let Some(Value::Number(n)) = mapping.get(ID_FIELD) {
            let id = Value::String(n.to_string());
            mapping.insert(Value::from(ID_FIELD), id);
        }

        let catalog_zone = mapping
            .remove(CATALOG_ZONE_FIELD)
            .filter(|v| !v.is_null())
            .map(PoolCatalogZoneYamlAdapter::parse_value)
            .transpose()?;
        let pool: Pool = serde_yaml::from_value(Value::Mapping(mapping))?;

        let definition = PoolDefinition { pool, catalog_zone };
        Self::validate(&definition)?;
        Ok(definition)
    }

    /// Render every pool field in declaration order. Unset fields render as
    /// null, or as an empty collection for attributes and capabilities.
    fn render(definition: &PoolDefinition) -> Result<Value, AdapterError> {
        let Value::Mapping(mut sparse) = serde_yaml::to_value(&definition.pool)? else {
            return Err(AdapterError::UnexpectedShape {
                object: Self::OBJECT_NAME,
                expected: "mapping",
            });
        };
        if let Some(catalog_zone) = &definition.catalog_zone {
            sparse.insert(
                Value::from(CATALOG_ZONE_FIELD),
                PoolCatalogZoneYamlAdapter::render(catalog_zone)?,
            );
        }

        let mut rendered = Mapping::new();
        for rule in Self::fields() {
            let value = sparse
                .remove(rule.name)
                .unwrap_or_else(|| empty_value(rule.name));
            rendered.insert(Value::from(rule.name), value);
        }
        Ok(Value::Mapping(rendered))
    }
}

fn empty_value(field: &str) -> Value {
    match field {
        ATTRIBUTES_FIELD => Value::Mapping(Mapping::new()),
        CAPABILITIES_FIELD => Value::Sequence(Vec::new()),
        _ => Value::Null,
    }
}
