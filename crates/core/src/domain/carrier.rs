use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::shipment::SpeedTier;

#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CarrierName(pub String);

impl CarrierName {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for CarrierName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Price multipliers applied to a carrier's base rate per speed tier.
/// `standard` is normally `1`, meaning no surcharge.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpeedSurcharges {
    pub standard: Decimal,
    pub express: Decimal,
    pub overnight: Decimal,
}

impl SpeedSurcharges {
    pub fn for_tier(&self, tier: SpeedTier) -> Decimal {
        match tier {
            SpeedTier::Standard => self.standard,
            SpeedTier::Express => self.express,
            SpeedTier::Overnight => self.overnight,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CarrierProfile {
    pub name: CarrierName,
    pub base_rate: Decimal,
    pub weight_multiplier: Decimal,
    pub speed_surcharges: SpeedSurcharges,
    /// Delivery reliability on a 0-100 scale.
    pub reliability: u8,
    pub features: Vec<String>,
    /// Carriers trusted with heavy packages.
    pub premium: bool,
}
