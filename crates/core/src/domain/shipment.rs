use std::fmt;
use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SpeedTier {
    Standard,
    Express,
    Overnight,
}

impl SpeedTier {
    pub const ALL: [SpeedTier; 3] = [SpeedTier::Standard, SpeedTier::Express, SpeedTier::Overnight];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Standard => "standard",
            Self::Express => "express",
            Self::Overnight => "overnight",
        }
    }

    /// Transit days before the distance multiplier is applied.
    pub fn base_days(self) -> u32 {
        match self {
            Self::Standard => 4,
            Self::Express => 2,
            Self::Overnight => 1,
        }
    }
}

impl fmt::Display for SpeedTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error("unsupported speed tier `{0}` (expected standard|express|overnight)")]
pub struct UnknownSpeedTier(pub String);

impl FromStr for SpeedTier {
    type Err = UnknownSpeedTier;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "standard" => Ok(Self::Standard),
            "express" => Ok(Self::Express),
            "overnight" => Ok(Self::Overnight),
            _ => Err(UnknownSpeedTier(value.trim().to_owned())),
        }
    }
}

/// Raw shipment input as entered by a user, before validation.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ShipmentForm {
    pub origin_city: String,
    pub destination_city: String,
    pub weight_kg: Option<Decimal>,
    pub speed_tier: Option<String>,
}

impl ShipmentForm {
    pub fn new(
        origin_city: impl Into<String>,
        destination_city: impl Into<String>,
        weight_kg: Decimal,
        speed_tier: impl Into<String>,
    ) -> Self {
        Self {
            origin_city: origin_city.into(),
            destination_city: destination_city.into(),
            weight_kg: Some(weight_kg),
            speed_tier: Some(speed_tier.into()),
        }
    }
}

/// A shipment that passed validation. The cost calculator and the
/// recommendation engine assume the invariants checked by the validator.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShipmentRequest {
    pub origin_city: String,
    pub destination_city: String,
    pub weight_kg: Decimal,
    pub speed_tier: SpeedTier,
}

#[cfg(test)]
mod tests {
    use super::SpeedTier;

    #[test]
    fn speed_tier_parses_case_insensitively() {
        assert_eq!("Express".parse::<SpeedTier>(), Ok(SpeedTier::Express));
        assert_eq!(" OVERNIGHT ".parse::<SpeedTier>(), Ok(SpeedTier::Overnight));
        assert!("same-day".parse::<SpeedTier>().is_err());
    }

    #[test]
    fn base_days_follow_tier_ordering() {
        let days: Vec<u32> = SpeedTier::ALL.iter().map(|tier| tier.base_days()).collect();
        assert_eq!(days, vec![4, 2, 1]);
    }
}
