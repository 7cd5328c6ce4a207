use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::AmortError;

/// All monetary values. Wraps Decimal to prevent accidental f64 usage.
pub type Money = Decimal;

/// Rates expressed as decimals (0.0229 = 2.29%). Never as percentages.
pub type Rate = Decimal;

/// How often payments are made per year.
///
/// Only the three frequencies the schedule math recognizes are
/// representable; anything else is rejected at the boundary with
/// [`AmortError::UnsupportedFrequency`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub enum PaymentFrequency {
    Monthly,
    BiWeekly,
    Weekly,
}

impl PaymentFrequency {
    /// Number of payments per year.
    pub fn per_year(self) -> u32 {
        match self {
            PaymentFrequency::Monthly => 12,
            PaymentFrequency::BiWeekly => 26,
            PaymentFrequency::Weekly => 52,
        }
    }

    /// Human-readable cadence label.
    pub fn label(self) -> &'static str {
        match self {
            PaymentFrequency::Monthly => "monthly",
            PaymentFrequency::BiWeekly => "bi-weekly",
            PaymentFrequency::Weekly => "weekly",
        }
    }
}

impl TryFrom<u32> for PaymentFrequency {
    type Error = AmortError;

    fn try_from(per_year: u32) -> Result<Self, Self::Error> {
        match per_year {
            12 => Ok(PaymentFrequency::Monthly),
            26 => Ok(PaymentFrequency::BiWeekly),
            52 => Ok(PaymentFrequency::Weekly),
            other => Err(AmortError::UnsupportedFrequency { frequency: other }),
        }
    }
}

impl From<PaymentFrequency> for u32 {
    fn from(freq: PaymentFrequency) -> u32 {
        freq.per_year()
    }
}

/// Standard computation output envelope
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComputationOutput<T: Serialize> {
    pub result: T,
    pub methodology: String,
    pub assumptions: serde_json::Value,
    pub warnings: Vec<String>,
    pub metadata: ComputationMetadata,
}

/// Metadata for every computation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComputationMetadata {
    pub version: String,
    pub computation_time_us: u64,
    pub precision: String,
}

/// Helper to wrap computation results with metadata
pub fn with_metadata<T: Serialize>(
    methodology: &str,
    assumptions: &impl Serialize,
    warnings: Vec<String>,
    elapsed_us: u64,
    result: T,
) -> ComputationOutput<T> {
    ComputationOutput {
        result,
        methodology: methodology.to_string(),
        assumptions: serde_json::to_value(assumptions).unwrap_or_default(),
        warnings,
        metadata: ComputationMetadata {
            version: env!("CARGO_PKG_VERSION").to_string(),
            computation_time_us: elapsed_us,
            precision: "rust_decimal_128bit".to_string(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn frequency_from_recognized_values() {
        assert_eq!(PaymentFrequency::try_from(12).unwrap(), PaymentFrequency::Monthly);
        assert_eq!(PaymentFrequency::try_from(26).unwrap(), PaymentFrequency::BiWeekly);
        assert_eq!(PaymentFrequency::try_from(52).unwrap(), PaymentFrequency::Weekly);
    }

    #[test]
    fn frequency_rejects_weekly_misspelled_as_daily() {
        let err = PaymentFrequency::try_from(365).unwrap_err();
        assert!(matches!(err, AmortError::UnsupportedFrequency { frequency: 365 }));
    }

    #[test]
    fn frequency_serde_round_trips_as_integer() {
        let json = serde_json::to_string(&PaymentFrequency::BiWeekly).unwrap();
        assert_eq!(json, "26");
        let back: PaymentFrequency = serde_json::from_str("52").unwrap();
        assert_eq!(back, PaymentFrequency::Weekly);
    }
}
