//! Pricing Engine — admission price of the next slot

use crate::MembershipStore;
use hierarchy_types::{Amount, HierarchyError, HierarchyResult, PricingConfig, PricingPolicy};
use serde::{Deserialize, Serialize};

/// Computes the payment required for the next admission
///
/// The price is a pure function of the store's capacity and occupancy, so
/// it is re-evaluated on every admission and is deterministic for a given
/// state.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PricingEngine {
    config: PricingConfig,
}

impl PricingEngine {
    pub fn new(config: PricingConfig) -> HierarchyResult<Self> {
        if config.emission_rate == 0 {
            return Err(HierarchyError::InvalidEmissionRate);
        }
        Ok(Self { config })
    }

    pub fn config(&self) -> &PricingConfig {
        &self.config
    }

    /// Price of the next admission for the given store
    pub fn calculate_price(&self, store: &MembershipStore) -> Amount {
        self.price_at(store.capacity(), store.occupancy())
    }

    /// Price of an admission made while `occupancy` members are live
    pub fn price_at(&self, capacity: usize, occupancy: usize) -> Amount {
        let base = Amount::new(self.config.emission_rate).saturating_mul(capacity as u64);
        match self.config.policy {
            PricingPolicy::Flat => base,
            PricingPolicy::Proportional => base.saturating_mul(occupancy.max(1) as u64),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hierarchy_types::{Permissions, UserId, DEFAULT_EMISSION_RATE};

    #[test]
    fn test_flat_price_ignores_occupancy() {
        let engine = PricingEngine::new(PricingConfig::flat(10)).unwrap();
        let mut store = MembershipStore::new(UserId::new("admin"), 5).unwrap();

        let before = engine.calculate_price(&store);
        store
            .insert(UserId::new("u1"), &UserId::new("admin"), Permissions::none())
            .unwrap();
        let after = engine.calculate_price(&store);

        assert_eq!(before, Amount::new(50));
        assert_eq!(before, after);
    }

    #[test]
    fn test_proportional_price_grows_with_occupancy() {
        let engine = PricingEngine::new(PricingConfig::proportional(10)).unwrap();

        assert_eq!(engine.price_at(5, 1), Amount::new(50));
        assert_eq!(engine.price_at(5, 2), Amount::new(100));
        assert_eq!(engine.price_at(5, 4), Amount::new(200));
    }

    #[test]
    fn test_price_is_monotonic_and_positive() {
        for config in [PricingConfig::flat(3), PricingConfig::proportional(3)] {
            let engine = PricingEngine::new(config).unwrap();
            let mut last = Amount::zero();
            for occupancy in 1..10 {
                let price = engine.price_at(10, occupancy);
                assert!(!price.is_zero());
                assert!(price >= last);
                last = price;
            }
        }
    }

    #[test]
    fn test_price_saturates() {
        let engine = PricingEngine::new(PricingConfig::proportional(u64::MAX)).unwrap();
        assert_eq!(engine.price_at(usize::MAX, usize::MAX), Amount::MAX);
    }

    #[test]
    fn test_zero_emission_rate_rejected() {
        let result = PricingEngine::new(PricingConfig::flat(0));
        assert_eq!(result.unwrap_err(), HierarchyError::InvalidEmissionRate);
    }

    #[test]
    fn test_default_engine_uses_default_rate() {
        let engine = PricingEngine::default();
        assert_eq!(engine.price_at(2, 1), Amount::new(2 * DEFAULT_EMISSION_RATE));
    }
}
