use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;

use crate::domain::carrier::CarrierProfile;
use crate::domain::quote::{CostBreakdown, Eta};
use crate::domain::shipment::{ShipmentRequest, SpeedTier};
use crate::engine::catalog::CarrierCatalog;
use crate::engine::distance::DistanceTable;

/// Upper bound on the distance multiplier when estimating transit days.
pub const DEFAULT_ETA_DISTANCE_CAP: Decimal = Decimal::from_parts(22, 0, 0, false, 1);

pub trait CostCalculator: Send + Sync {
    fn compute(
        &self,
        request: &ShipmentRequest,
        catalog: &CarrierCatalog,
        distances: &DistanceTable,
    ) -> Vec<CostBreakdown>;
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DeterministicCostCalculator {
    eta_distance_cap: Decimal,
}

impl DeterministicCostCalculator {
    pub fn new(eta_distance_cap: Decimal) -> Self {
        Self { eta_distance_cap }
    }

    pub fn eta_distance_cap(&self) -> Decimal {
        self.eta_distance_cap
    }
}

impl Default for DeterministicCostCalculator {
    fn default() -> Self {
        Self::new(DEFAULT_ETA_DISTANCE_CAP)
    }
}

impl CostCalculator for DeterministicCostCalculator {
    fn compute(
        &self,
        request: &ShipmentRequest,
        catalog: &CarrierCatalog,
        distances: &DistanceTable,
    ) -> Vec<CostBreakdown> {
        let distance_multiplier = distances.lookup(&request.origin_city, &request.destination_city);
        let eta = estimate_eta(request.speed_tier, distance_multiplier, self.eta_distance_cap);

        catalog
            .iter()
            .map(|carrier| price_carrier(carrier, request, distance_multiplier, eta))
            .collect()
    }
}

/// One breakdown per carrier, in catalog order.
pub fn compute_costs(
    request: &ShipmentRequest,
    catalog: &CarrierCatalog,
    distances: &DistanceTable,
) -> Vec<CostBreakdown> {
    DeterministicCostCalculator::default().compute(request, catalog, distances)
}

pub fn price_carrier(
    carrier: &CarrierProfile,
    request: &ShipmentRequest,
    distance_multiplier: Decimal,
    eta: Eta,
) -> CostBreakdown {
    let base_rate = carrier.base_rate;
    let weight_charges = (request.weight_kg * carrier.weight_multiplier).ceil();
    let tier_multiplier = carrier.speed_surcharges.for_tier(request.speed_tier);
    let speed_surcharge = (base_rate * (tier_multiplier - Decimal::ONE)).ceil();
    let subtotal = base_rate + weight_charges + speed_surcharge;
    let total_cost = (subtotal * distance_multiplier).ceil();

    CostBreakdown {
        carrier: carrier.name.clone(),
        base_rate,
        weight_charges,
        speed_surcharge,
        distance_multiplier,
        total_cost,
        eta,
        reliability: carrier.reliability,
        features: carrier.features.clone(),
        premium: carrier.premium,
    }
}

pub fn estimate_eta(tier: SpeedTier, distance_multiplier: Decimal, cap: Decimal) -> Eta {
    let base_days = tier.base_days();
    let capped = distance_multiplier.min(cap);
    // Multipliers are positive, so the product fits in a u32.
    let days = (Decimal::from(base_days) * capped).ceil().to_u32().unwrap_or(base_days);
    Eta::from_days(days)
}
