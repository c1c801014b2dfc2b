//! Product identifier newtype.
//!
//! Catalog records carry a plain integer `id`. Wrapping it keeps product ids
//! from being confused with quantities or other integers flowing through the
//! cart handlers.

use core::fmt;
use core::num::ParseIntError;
use core::str::FromStr;

use serde::{Deserialize, Serialize};

/// A catalog product identifier.
///
/// Serialized transparently as the integer used by the catalog resource.
///
/// # Example
///
/// ```rust
/// use vitrina_core::ProductId;
///
/// let id: ProductId = "42".parse().unwrap();
/// assert_eq!(id, ProductId::new(42));
/// assert_eq!(id.to_string(), "42");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductId(i64);

impl ProductId {
    /// Create a new ID from an i64 value.
    #[must_use]
    pub const fn new(id: i64) -> Self {
        Self(id)
    }

    /// Get the underlying i64 value.
    #[must_use]
    pub const fn as_i64(&self) -> i64 {
        self.0
    }
}

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i64> for ProductId {
    fn from(id: i64) -> Self {
        Self(id)
    }
}

impl From<ProductId> for i64 {
    fn from(id: ProductId) -> Self {
        id.0
    }
}

/// Error returned when a product id cannot be parsed from text.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("invalid product id {input:?}: {source}")]
pub struct ParseProductIdError {
    input: String,
    source: ParseIntError,
}

impl FromStr for ProductId {
    type Err = ParseProductIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim()
            .parse::<i64>()
            .map(Self)
            .map_err(|source| ParseProductIdError {
                input: s.to_owned(),
                source,
            })
    }
}
