//! Variant identity.
//!
//! A product is a base item with one or more purchasable variants. The
//! canonical cart-line identity is `(ProductId, VariantKey)`, where the
//! variant key is derived from the variant's presentation attributes.
//!
//! The key is a normalized composite: the color name, joined with the size
//! by `/` when the product model carries one. The same key is used
//! uniformly for cart mutation, post-purchase cleanup, and order display.

use crate::ids::ProductId;
use serde::{Deserialize, Serialize};
use std::fmt;

/// The attribute-derived discriminator for a purchasable variant.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct VariantKey(String);

impl VariantKey {
    /// Derive a key from a color name and an optional size.
    ///
    /// Attributes are trimmed and ASCII-lowercased so that "Crimson" and
    /// "crimson " derive the same key.
    pub fn from_attributes(color: &str, size: Option<&str>) -> Self {
        let mut key = normalize(color);
        if let Some(size) = size {
            let size = normalize(size);
            if !size.is_empty() {
                key.push('/');
                key.push_str(&size);
            }
        }
        Self(key)
    }

    /// Construct from an already-derived key (e.g., a server payload).
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    /// Get the key as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for VariantKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

fn normalize(attribute: &str) -> String {
    attribute.trim().to_ascii_lowercase()
}

/// Cart-line identity: at most one line per key exists in a cart.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LineKey {
    pub product_id: ProductId,
    pub variant_key: VariantKey,
}

impl LineKey {
    pub fn new(product_id: ProductId, variant_key: VariantKey) -> Self {
        Self {
            product_id,
            variant_key,
        }
    }
}

impl fmt::Display for LineKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.product_id, self.variant_key)
    }
}
