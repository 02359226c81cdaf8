//! Shipping details and field validation.
//!
//! Validation is purely local and synchronous: it is recomputed on every
//! field change and blocks submission, so invalid input never reaches the
//! network layer.

use crate::error::CommerceError;
use serde::{Deserialize, Serialize};

/// Minimum length for the recipient name, after trimming.
pub const MIN_NAME_LEN: usize = 2;
/// Postal codes are exactly this many ASCII digits.
pub const POSTAL_CODE_DIGITS: usize = 5;
/// Phone numbers are exactly this many digits, separators aside.
pub const PHONE_DIGITS: usize = 10;

/// Shipping details collected during checkout.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct ShippingDetails {
    /// Recipient full name.
    pub full_name: String,
    /// Contact email; also receives the purchase confirmation.
    pub email: String,
    /// Contact phone number.
    pub phone: String,
    /// Street address.
    pub address1: String,
    /// City.
    pub city: String,
    /// Postal/ZIP code.
    pub postal_code: String,
}

impl ShippingDetails {
    /// Validate every field, returning the first failure.
    pub fn validate(&self) -> Result<(), CommerceError> {
        validate_name(&self.full_name)?;
        validate_email(&self.email)?;
        validate_phone(&self.phone)?;
        validate_postal_code(&self.postal_code)?;
        validate_non_empty("address1", &self.address1)?;
        validate_non_empty("city", &self.city)?;
        Ok(())
    }
}

/// Recipient name: trimmed length of at least `MIN_NAME_LEN`.
pub fn validate_name(name: &str) -> Result<(), CommerceError> {
    if name.trim().chars().count() < MIN_NAME_LEN {
        return Err(CommerceError::validation(
            "full_name",
            format!("must be at least {MIN_NAME_LEN} characters"),
        ));
    }
    Ok(())
}

/// Email: `local@domain` with a dotted domain and no whitespace.
pub fn validate_email(email: &str) -> Result<(), CommerceError> {
    let err = || CommerceError::validation("email", "must be a well-formed email address");
    if email.chars().any(char::is_whitespace) {
        return Err(err());
    }
    let (local, domain) = email.split_once('@').ok_or_else(err)?;
    if local.is_empty() || domain.is_empty() || domain.contains('@') {
        return Err(err());
    }
    let (host, tld) = domain.rsplit_once('.').ok_or_else(err)?;
    if host.is_empty() || tld.is_empty() {
        return Err(err());
    }
    Ok(())
}

/// Phone: exactly `PHONE_DIGITS` digits once spaces and hyphens are
/// stripped.
pub fn validate_phone(phone: &str) -> Result<(), CommerceError> {
    let stripped: String = phone
        .chars()
        .filter(|c| !matches!(c, ' ' | '-'))
        .collect();
    if stripped.len() != PHONE_DIGITS || !stripped.chars().all(|c| c.is_ascii_digit()) {
        return Err(CommerceError::validation(
            "phone",
            format!("must be exactly {PHONE_DIGITS} digits"),
        ));
    }
    Ok(())
}

/// Postal code: exactly `POSTAL_CODE_DIGITS` ASCII digits.
pub fn validate_postal_code(postal_code: &str) -> Result<(), CommerceError> {
    if postal_code.len() != POSTAL_CODE_DIGITS
        || !postal_code.chars().all(|c| c.is_ascii_digit())
    {
        return Err(CommerceError::validation(
            "postal_code",
            format!("must be exactly {POSTAL_CODE_DIGITS} digits"),
        ));
    }
    Ok(())
}

fn validate_non_empty(field: &str, value: &str) -> Result<(), CommerceError> {
    if value.trim().is_empty() {
        return Err(CommerceError::validation(field, "must not be empty"));
    }
    Ok(())
}
