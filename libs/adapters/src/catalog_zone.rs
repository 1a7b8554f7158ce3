//! Pool catalog zone settings.
//!
//! A catalog zone advertises the zones hosted by a pool to secondary
//! servers. Its settings are read-only on the object; the YAML adapter used
//! for pool definitions makes them writable.

use serde::{Deserialize, Serialize};

use crate::error::AdapterError;
use crate::field::{FieldRule, YamlAdapter};

/// TSIG algorithms accepted for catalog zone transfers.
pub const TSIG_ALGORITHMS: &[&str] = &[
    "hmac-md5",
    "hmac-sha1",
    "hmac-sha224",
    "hmac-sha256",
    "hmac-sha384",
    "hmac-sha512",
];

/// Catalog zone settings for a pool.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PoolCatalogZone {
    /// Absolute name of the catalog zone.
    #[serde(default)]
    pub catalog_zone_fqdn: Option<String>,

    /// SOA refresh interval in seconds.
    #[serde(default)]
    pub catalog_zone_refresh: Option<u32>,

    /// Shared secret used to sign transfers.
    #[serde(default)]
    pub catalog_zone_tsig_key: Option<String>,

    #[serde(default)]
    pub catalog_zone_tsig_algorithm: Option<String>,
}

impl PoolCatalogZone {
    pub const FIELDS: &'static [FieldRule] = &[
        FieldRule::read_only("catalog_zone_fqdn"),
        FieldRule::read_only("catalog_zone_refresh"),
        FieldRule::read_only("catalog_zone_tsig_key"),
        FieldRule::read_only("catalog_zone_tsig_algorithm"),
    ];

    const OBJECT_NAME: &'static str = "PoolCatalogZone";

    /// Check field values and their combinations.
    pub fn validate(&self) -> Result<(), AdapterError> {
        if let Some(fqdn) = &self.catalog_zone_fqdn {
            if fqdn.len() < 2 || !fqdn.ends_with('.') {
                return Err(AdapterError::invalid(
                    Self::OBJECT_NAME,
                    format!("catalog_zone_fqdn '{fqdn}' must be an absolute name ending in '.'"),
                ));
            }
        }

        if self.catalog_zone_refresh == Some(0) {
            return Err(AdapterError::invalid(
                Self::OBJECT_NAME,
                "catalog_zone_refresh must be positive",
            ));
        }

        match (&self.catalog_zone_tsig_key, &self.catalog_zone_tsig_algorithm) {
            (Some(_), Some(algorithm)) => {
                if !TSIG_ALGORITHMS.contains(&algorithm.as_str()) {
                    return Err(AdapterError::invalid(
                        Self::OBJECT_NAME,
                        format!("unsupported TSIG algorithm '{algorithm}'"),
                    ));
                }
            }
            (None, None) => {}
            _ => {
                return Err(AdapterError::invalid(
                    Self::OBJECT_NAME,
                    "catalog_zone_tsig_key and catalog_zone_tsig_algorithm must be set together",
                ))
            }
        }

        Ok(())
    }
}

const CATALOG_ZONE_MODIFICATIONS: &[FieldRule] = &[
    FieldRule::writable("catalog_zone_fqdn"),
    FieldRule::writable("catalog_zone_refresh"),
    FieldRule::writable("catalog_zone_tsig_key"),
    FieldRule::writable("catalog_zone_tsig_algorithm"),
];

/// YAML adapter that lets operators set catalog zone settings.
#[derive(Debug, Clone, Copy, Default)]
pub struct PoolCatalogZoneYamlAdapter;

impl YamlAdapter for PoolCatalogZoneYamlAdapter {
    type Object = PoolCatalogZone;

    const OBJECT_NAME: &'static str = PoolCatalogZone::OBJECT_NAME;

    fn base_fields() -> &'static [FieldRule] {
        PoolCatalogZone::FIELDS
    }

    fn modifications() -> &'static [FieldRule] {
        CATALOG_ZONE_MODIFICATIONS
    }

    fn validate(object: &PoolCatalogZone) -> Result<(), AdapterError> {
        object.validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// An adapter that keeps the object's default visibility.
    struct ReadOnlyAdapter;

    impl YamlAdapter for ReadOnlyAdapter {
        type Object = PoolCatalogZone;
        const OBJECT_NAME: &'static str = "PoolCatalogZone";

        fn base_fields() -> &'static [FieldRule] {
            PoolCatalogZone::FIELDS
        }
    }

    const FULL: &str = r#"
catalog_zone_fqdn: cat.example.org.
catalog_zone_refresh: 60
catalog_zone_tsig_key: SomeSecretKey
catalog_zone_tsig_algorithm: hmac-sha256
"#;

    #[test]
    fn test_adapter_makes_fields_writable() {
        let fields = PoolCatalogZoneYamlAdapter::fields();
        assert_eq!(fields.len(), 4);
        assert!(fields.iter().all(|f| !f.read_only));
    }

    #[test]
    fn test_parse_writable_fields() {
        let zone = PoolCatalogZoneYamlAdapter::parse_str(FULL).unwrap();
        assert_eq!(zone.catalog_zone_fqdn.as_deref(), Some("cat.example.org."));
        assert_eq!(zone.catalog_zone_refresh, Some(60));
        assert_eq!(zone.catalog_zone_tsig_key.as_deref(), Some("SomeSecretKey"));
        assert_eq!(zone.catalog_zone_tsig_algorithm.as_deref(), Some("hmac-sha256"));
    }

    #[test]
    fn test_default_visibility_is_read_only() {
        let err = ReadOnlyAdapter::parse_str(FULL).unwrap_err();
        assert!(matches!(err, AdapterError::ReadOnlyField { .. }));
    }

    #[test]
    fn test_unknown_field_rejected() {
        let err = PoolCatalogZoneYamlAdapter::parse_str("catalog_zone_serial: 1").unwrap_err();
        assert!(matches!(
            err,
            AdapterError::UnknownField { field, .. } if field == "catalog_zone_serial"
        ));
    }

    #[test]
    fn test_relative_fqdn_rejected() {
        let err = PoolCatalogZoneYamlAdapter::parse_str("catalog_zone_fqdn: cat.example.org")
            .unwrap_err();
        assert!(matches!(err, AdapterError::Invalid { .. }));
    }

    #[test]
    fn test_tsig_pairing() {
        let err =
            PoolCatalogZoneYamlAdapter::parse_str("catalog_zone_tsig_key: secret").unwrap_err();
        assert!(matches!(err, AdapterError::Invalid { .. }));

        let err = PoolCatalogZoneYamlAdapter::parse_str(
            "catalog_zone_tsig_key: secret\ncatalog_zone_tsig_algorithm: hmac-sha3",
        )
        .unwrap_err();
        assert!(matches!(err, AdapterError::Invalid { .. }));
    }

    #[test]
    fn test_zero_refresh_rejected() {
        let err = PoolCatalogZoneYamlAdapter::parse_str("catalog_zone_refresh: 0").unwrap_err();
        assert!(matches!(err, AdapterError::Invalid { .. }));
    }

    #[test]
    fn test_render_emits_every_field() {
        let zone = PoolCatalogZone {
            catalog_zone_fqdn: Some("cat.example.org.".to_string()),
            ..PoolCatalogZone::default()
        };
        let value = PoolCatalogZoneYamlAdapter::render(&zone).unwrap();
        let mapping = value.as_mapping().unwrap();
        assert_eq!(mapping.len(), 4);
    }
}
