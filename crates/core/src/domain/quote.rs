use std::fmt;
use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::carrier::CarrierName;
use crate::domain::shipment::ShipmentRequest;

/// Estimated delivery time. Renders as `Next day` or `<n> days`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub enum Eta {
    NextDay,
    Days(u32),
}

impl Eta {
    pub fn from_days(days: u32) -> Self {
        if days == 1 {
            Self::NextDay
        } else {
            Self::Days(days)
        }
    }

    pub fn days(self) -> u32 {
        match self {
            Self::NextDay => 1,
            Self::Days(days) => days,
        }
    }
}

impl fmt::Display for Eta {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NextDay => f.write_str("Next day"),
            Self::Days(days) => write!(f, "{days} days"),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error("unrecognized eta `{0}` (expected `Next day` or `<n> days`)")]
pub struct EtaParseError(pub String);

impl FromStr for Eta {
    type Err = EtaParseError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let trimmed = value.trim();
        if trimmed.eq_ignore_ascii_case("next day") {
            return Ok(Self::NextDay);
        }

        trimmed
            .strip_suffix(" days")
            .and_then(|count| count.trim().parse::<u32>().ok())
            .filter(|days| *days > 0)
            .map(Self::from_days)
            .ok_or_else(|| EtaParseError(value.to_owned()))
    }
}

impl From<Eta> for String {
    fn from(value: Eta) -> Self {
        value.to_string()
    }
}

impl TryFrom<String> for Eta {
    type Error = EtaParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// Itemized price and delivery estimate of one carrier for one shipment.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CostBreakdown {
    pub carrier: CarrierName,
    pub base_rate: Decimal,
    pub weight_charges: Decimal,
    pub speed_surcharge: Decimal,
    pub distance_multiplier: Decimal,
    pub total_cost: Decimal,
    pub eta: Eta,
    pub reliability: u8,
    pub features: Vec<String>,
    pub premium: bool,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RecommendationReason {
    OvernightSpeed,
    HeavyPackage,
    CostSavings { savings: Decimal },
    Balanced,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recommendation {
    pub recommended: CarrierName,
    pub reason: RecommendationReason,
    pub reason_text: String,
    pub cheapest_alternative: Option<CarrierName>,
    pub fastest_alternative: Option<CarrierName>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CarrierHighlight {
    pub carrier: CarrierName,
    pub detail: String,
}

/// Headline facts over a full breakdown set.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuoteInsights {
    pub cheapest: CarrierHighlight,
    pub fastest: CarrierHighlight,
    pub most_reliable: CarrierHighlight,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShipmentQuote {
    pub request: ShipmentRequest,
    pub breakdowns: Vec<CostBreakdown>,
    pub recommendation: Recommendation,
    pub insights: QuoteInsights,
}
