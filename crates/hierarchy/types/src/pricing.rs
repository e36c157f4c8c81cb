//! Admission pricing configuration

use serde::{Deserialize, Serialize};

/// Payment units charged per capacity slot by default
pub const DEFAULT_EMISSION_RATE: u64 = 1_000_000_000;

/// Shape of the admission price curve
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum PricingPolicy {
    /// `capacity × emission_rate`, independent of occupancy
    #[default]
    Flat,
    /// `capacity × emission_rate × occupancy`, growing as the hierarchy fills
    Proportional,
}

impl std::fmt::Display for PricingPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PricingPolicy::Flat => write!(f, "flat"),
            PricingPolicy::Proportional => write!(f, "proportional"),
        }
    }
}

impl std::str::FromStr for PricingPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "flat" => Ok(PricingPolicy::Flat),
            "proportional" => Ok(PricingPolicy::Proportional),
            other => Err(format!("unknown pricing policy: {}", other)),
        }
    }
}

/// Pricing parameters fixed when the hierarchy is created
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PricingConfig {
    #[serde(default)]
    pub policy: PricingPolicy,
    #[serde(default = "default_emission_rate")]
    pub emission_rate: u64,
}

impl PricingConfig {
    pub fn new(policy: PricingPolicy, emission_rate: u64) -> Self {
        Self {
            policy,
            emission_rate,
        }
    }

    pub fn flat(emission_rate: u64) -> Self {
        Self::new(PricingPolicy::Flat, emission_rate)
    }

    pub fn proportional(emission_rate: u64) -> Self {
        Self::new(PricingPolicy::Proportional, emission_rate)
    }
}

impl Default for PricingConfig {
    fn default() -> Self {
        Self::flat(DEFAULT_EMISSION_RATE)
    }
}

fn default_emission_rate() -> u64 {
    DEFAULT_EMISSION_RATE
}
