//! Cart line types.

use crate::cart::{LineKey, VariantKey};
use crate::error::CommerceError;
use crate::ids::ProductId;
use crate::money::Money;
use serde::{Deserialize, Serialize};

/// Maximum quantity allowed per cart line.
pub const MAX_QUANTITY_PER_LINE: i64 = 9999;

/// A single line in the cart, identified by `(product_id, variant_key)`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CartLine {
    /// Product being purchased.
    pub product_id: ProductId,
    /// Variant discriminator.
    pub variant_key: VariantKey,
    /// Quantity, always >= 1.
    pub quantity: i64,
    /// Unit price (variants inherit the base product price).
    pub unit_price: Money,
    /// Product name (denormalized for display).
    pub display_name: String,
    /// Reference to the variant's display image, if any.
    pub image_ref: Option<String>,
}

impl CartLine {
    /// Create a new cart line.
    ///
    /// Returns an error if the quantity is below 1 or above
    /// `MAX_QUANTITY_PER_LINE`, or if the unit price is negative.
    pub fn new(
        product_id: ProductId,
        variant_key: VariantKey,
        quantity: i64,
        unit_price: Money,
        display_name: impl Into<String>,
    ) -> Result<Self, CommerceError> {
        validate_quantity(quantity)?;
        if unit_price.is_negative() {
            return Err(CommerceError::validation(
                "unit_price",
                "must not be negative",
            ));
        }
        Ok(Self {
            product_id,
            variant_key,
            quantity,
            unit_price,
            display_name: display_name.into(),
            image_ref: None,
        })
    }

    /// Attach a display image reference.
    pub fn with_image(mut self, image_ref: impl Into<String>) -> Self {
        self.image_ref = Some(image_ref.into());
        self
    }

    /// The line's identity.
    pub fn key(&self) -> LineKey {
        LineKey::new(self.product_id.clone(), self.variant_key.clone())
    }

    /// Check whether this line matches the given identity.
    pub fn matches(&self, key: &LineKey) -> bool {
        self.product_id == key.product_id && self.variant_key == key.variant_key
    }

    /// Line total (unit price x quantity).
    pub fn line_total(&self) -> Result<Money, CommerceError> {
        self.unit_price
            .try_mul(self.quantity)
            .ok_or(CommerceError::Overflow)
    }
}

/// Validate a quantity for a cart line.
pub fn validate_quantity(quantity: i64) -> Result<(), CommerceError> {
    if quantity < 1 {
        return Err(CommerceError::InvalidQuantity(quantity));
    }
    if quantity > MAX_QUANTITY_PER_LINE {
        return Err(CommerceError::QuantityExceedsLimit(
            quantity,
            MAX_QUANTITY_PER_LINE,
        ));
    }
    Ok(())
}
