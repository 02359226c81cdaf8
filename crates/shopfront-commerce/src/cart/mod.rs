//! Cart line, variant identity, coupon, and totals types.

mod coupon;
mod line;
mod totals;
mod variant;

pub use coupon::CouponResult;
pub use line::{validate_quantity, CartLine, MAX_QUANTITY_PER_LINE};
pub use totals::{compute_totals, Totals};
pub use variant::{LineKey, VariantKey};
