//! # zonepool-adapters
//!
//! YAML adapters for objects that cross the operator boundary.
//!
//! Each object declares its fields and whether callers may set them. An
//! adapter can flip that visibility for its format. Parsing rejects unknown
//! and read-only fields; rendering emits every field.
//!
//! Adapters perform no placement logic. They only decide which pool and
//! catalog zone attributes reach the scheduler.

mod catalog_zone;
mod error;
mod field;
mod pool;

pub use catalog_zone::{PoolCatalogZone, PoolCatalogZoneYamlAdapter, TSIG_ALGORITHMS};
pub use error::AdapterError;
pub use field::{FieldRule, YamlAdapter};
pub use pool::{PoolDefinition, PoolYamlAdapter};
