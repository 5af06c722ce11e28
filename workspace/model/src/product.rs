use serde::{Deserialize, Serialize};
use std::fmt;

/// Categorical product identifier as it appears in the input files.
///
/// Identifiers are kept as text so that codes like `P-001` and plain numbers
/// share one type. `Ord` is plain text order; use [`sort_product_ids`] for the
/// numeric-aware order of a whole collection.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductId(String);

impl ProductId {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into().trim().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }

    pub fn as_integer(&self) -> Option<i64> {
        self.0.parse::<i64>().ok()
    }
}

/// Sorts a collection of identifiers.
///
/// The order is picked once for the whole collection: by integer value when
/// every identifier is an integer (ties on text, so `01` and `1` stay apart),
/// otherwise as text. Mixing the two per pair would not be a total order.
pub fn sort_product_ids(ids: &mut [ProductId]) {
    if ids.iter().all(|id| id.as_integer().is_some()) {
        ids.sort_by_cached_key(|id| (id.as_integer(), id.0.clone()));
    } else {
        ids.sort();
    }
}

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ProductId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for ProductId {
    fn from(value: String) -> Self {
        Self::new(value)
    }
}
