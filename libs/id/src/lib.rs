//! # zonepool-id
//!
//! Typed identifiers for the zone placement control plane.
//!
//! ## Design Principles
//!
//! - IDs are opaque: the scheduler never interprets their contents
//! - IDs are immutable once created
//! - All IDs have a canonical string representation with strict parsing
//! - IDs are typed to prevent mixing different resource types
//!
//! ## ID Format
//!
//! Any non-empty ASCII token of at most [`MAX_ID_LEN`] bytes made of
//! alphanumerics and `-`, `_`, `.`, `:` is accepted, so both UUIDs and
//! operator-chosen names parse:
//!
//! - `794ccc2c-d751-44fe-b57f-8894c9f5c842`
//! - `pool-42`
//!
//! Freshly generated IDs use a prefixed ULID: `{prefix}_{ulid}`, e.g.
//! `zone_01HV4Z3MXNKPQR9HSTZ7WCLD4E`.

mod error;
mod macros;
mod types;

pub use error::IdError;
pub use types::*;

/// Re-export ulid for consumers that need raw ULID operations
pub use ulid::Ulid;

/// Maximum length of an identifier in bytes.
pub const MAX_ID_LEN: usize = 255;

/// Validate identifier text.
pub fn validate(s: &str) -> Result<(), IdError> {
    if s.is_empty() {
        return Err(IdError::Empty);
    }

    if s.len() > MAX_ID_LEN {
        return Err(IdError::TooLong {
            max: MAX_ID_LEN,
            actual: s.len(),
        });
    }

    if let Some((position, ch)) = s
        .char_indices()
        .find(|(_, c)| !(c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.' | ':')))
    {
        return Err(IdError::InvalidCharacter { ch, position });
    }

    Ok(())
}
