//! Typed ID definitions for placement resources.

use crate::define_id;

// =============================================================================
// Placement
// =============================================================================

define_id!(PoolId, "pool");
define_id!(ZoneId, "zone");

// =============================================================================
// Callers and Requests
// =============================================================================

define_id!(TenantId, "tenant");
define_id!(RequestId, "req");

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::IdError;
    use proptest::prelude::*;

    #[test]
    fn test_generated_pool_id_has_prefix() {
        let id = PoolId::new();
        assert!(id.as_str().starts_with("pool_"));
        assert_eq!(PoolId::parse(id.as_str()).unwrap(), id);
    }

    #[test]
    fn test_uuid_shaped_id_accepted() {
        let id: PoolId = "794ccc2c-d751-44fe-b57f-8894c9f5c842".parse().unwrap();
        assert_eq!(id.to_string(), "794ccc2c-d751-44fe-b57f-8894c9f5c842");
    }

    #[test]
    fn test_operator_chosen_id_accepted() {
        let id: PoolId = "pool-42".parse().unwrap();
        assert_eq!(id.as_str(), "pool-42");
    }

    #[test]
    fn test_empty_id_rejected() {
        let result: Result<PoolId, _> = "".parse();
        assert!(result.unwrap_err().is_empty());
    }

    #[test]
    fn test_whitespace_rejected() {
        let result: Result<ZoneId, _> = "zone 1".parse();
        assert_eq!(
            result.unwrap_err(),
            IdError::InvalidCharacter { ch: ' ', position: 4 }
        );
    }

    #[test]
    fn test_too_long_rejected() {
        let long = "a".repeat(crate::MAX_ID_LEN + 1);
        assert!(matches!(
            PoolId::parse(&long),
            Err(IdError::TooLong { max: 255, actual: 256 })
        ));
    }

    #[test]
    fn test_deserialize_rejects_invalid_text() {
        let result: Result<PoolId, _> = serde_json::from_str("\"\"");
        assert!(result.is_err());

        let parsed: PoolId = serde_json::from_str("\"pool-42\"").unwrap();
        assert_eq!(parsed.as_str(), "pool-42");
    }

    #[test]
    fn test_all_id_prefixes_unique() {
        let prefixes = vec![
            PoolId::PREFIX,
            ZoneId::PREFIX,
            TenantId::PREFIX,
            RequestId::PREFIX,
        ];

        let unique: std::collections::HashSet<_> = prefixes.iter().collect();
        assert_eq!(prefixes.len(), unique.len(), "Duplicate ID prefixes found!");
    }

    proptest! {
        #[test]
        fn prop_valid_tokens_parse_unchanged(s in "[A-Za-z0-9._:-]{1,64}") {
            let id = PoolId::parse(&s).unwrap();
            prop_assert_eq!(id.as_str(), s.as_str());
        }

        #[test]
        fn prop_tokens_with_space_rejected(a in "[a-z]{1,8}", b in "[a-z]{1,8}") {
            let s = format!("{a} {b}");
            prop_assert!(PoolId::parse(&s).is_err());
        }
    }
}
