//! Checkout draft, shipping validation, and order reference types.

mod draft;
mod order;
mod shipping;

pub use draft::{CheckoutDraft, PaymentMethod};
pub use order::{GatewayAuthorization, GatewayProof, OrderNotification, OrderReceipt};
pub use shipping::{
    validate_email, validate_name, validate_phone, validate_postal_code, ShippingDetails,
    MIN_NAME_LEN, PHONE_DIGITS, POSTAL_CODE_DIGITS,
};
