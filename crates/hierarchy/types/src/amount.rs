//! Payment amounts

use serde::{Deserialize, Serialize};

/// Payment amount in the smallest unit of the host currency
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
#[serde(transparent)]
pub struct Amount(pub u64);

impl Amount {
    pub const MAX: Amount = Amount(u64::MAX);

    pub const fn new(value: u64) -> Self {
        Self(value)
    }

    pub const fn zero() -> Self {
        Self(0)
    }

    pub const fn value(&self) -> u64 {
        self.0
    }

    pub fn is_zero(&self) -> bool {
        self.0 == 0
    }

    pub fn saturating_add(self, other: Self) -> Self {
        Self(self.0.saturating_add(other.0))
    }

    pub fn saturating_sub(self, other: Self) -> Self {
        Self(self.0.saturating_sub(other.0))
    }

    /// Multiply by a unitless factor, clamping at [`Amount::MAX`]
    pub fn saturating_mul(self, factor: u64) -> Self {
        Self(self.0.saturating_mul(factor))
    }
}

impl std::fmt::Display for Amount {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for Amount {
    fn from(value: u64) -> Self {
        Self(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_saturating_arithmetic() {
        assert_eq!(Amount::MAX.saturating_add(Amount::new(1)), Amount::MAX);
        assert_eq!(Amount::zero().saturating_sub(Amount::new(5)), Amount::zero());
        assert_eq!(Amount::new(u64::MAX / 2).saturating_mul(3), Amount::MAX);
        assert_eq!(Amount::new(7).saturating_mul(6), Amount::new(42));
    }

    #[test]
    fn test_serializes_as_plain_number() {
        let json = serde_json::to_string(&Amount::new(1500)).unwrap();
        assert_eq!(json, "1500");
    }
}
