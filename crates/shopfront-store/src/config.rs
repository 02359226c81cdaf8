//! Store configuration.

use serde::{Deserialize, Serialize};
use shopfront_commerce::Currency;
use std::time::Duration;

/// Configuration shared by the cart store and the checkout orchestrator.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Bound on every outbound service call. A call that exceeds it is
    /// treated as a network error and, where applicable, rolled back.
    #[serde(with = "duration_millis")]
    pub request_timeout: Duration,
    /// Tax rate applied to the subtotal (e.g., 0.07 for 7%).
    pub tax_rate: f64,
    /// Currency the cart operates in.
    pub currency: Currency,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            request_timeout: Duration::from_secs(10),
            tax_rate: 0.0,
            currency: Currency::USD,
        }
    }
}

mod duration_millis {
    use serde::{Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    pub fn serialize<S: Serializer>(d: &Duration, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_u64(d.as_millis() as u64)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Duration, D::Error> {
        Ok(Duration::from_millis(u64::deserialize(d)?))
    }
}
