use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::quote::{CostBreakdown, Recommendation, RecommendationReason};
use crate::domain::shipment::{ShipmentRequest, SpeedTier};

/// Thresholds used by the recommendation rules.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecommendationPolicy {
    /// Packages heavier than this go to a premium carrier when one is quoted.
    pub heavy_package_kg: Decimal,
    /// The cheapest option wins outright when it costs less than this share of the fastest.
    pub savings_ratio: Decimal,
    /// A balanced pick may cost at most this multiple of the cheapest option.
    pub balanced_cost_ratio: Decimal,
    /// A balanced pick may be at most this many days slower than the fastest option.
    pub balanced_eta_slack_days: u32,
}

impl Default for RecommendationPolicy {
    fn default() -> Self {
        Self {
            heavy_package_kg: Decimal::TEN,
            savings_ratio: Decimal::new(7, 1),
            balanced_cost_ratio: Decimal::new(12, 1),
            balanced_eta_slack_days: 1,
        }
    }
}

pub trait RecommendationEngine: Send + Sync {
    fn recommend(
        &self,
        breakdowns: &[CostBreakdown],
        request: &ShipmentRequest,
    ) -> Option<Recommendation>;
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DeterministicRecommendationEngine {
    policy: RecommendationPolicy,
}

impl DeterministicRecommendationEngine {
    pub fn new(policy: RecommendationPolicy) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> &RecommendationPolicy {
        &self.policy
    }
}

impl RecommendationEngine for DeterministicRecommendationEngine {
    fn recommend(
        &self,
        breakdowns: &[CostBreakdown],
        request: &ShipmentRequest,
    ) -> Option<Recommendation> {
        recommend_with_policy(breakdowns, request, &self.policy)
    }
}

/// Picks one carrier using the default policy. `None` only when no
/// breakdowns were supplied.
pub fn recommend(
    breakdowns: &[CostBreakdown],
    request: &ShipmentRequest,
) -> Option<Recommendation> {
    recommend_with_policy(breakdowns, request, &RecommendationPolicy::default())
}

/// Lowest total cost; the earliest entry wins ties.
pub fn cheapest(breakdowns: &[CostBreakdown]) -> Option<&CostBreakdown> {
    breakdowns.iter().min_by_key(|breakdown| breakdown.total_cost)
}

/// Fewest transit days; the earliest entry wins ties.
pub fn fastest(breakdowns: &[CostBreakdown]) -> Option<&CostBreakdown> {
    breakdowns.iter().min_by_key(|breakdown| breakdown.eta.days())
}

fn recommend_with_policy(
    breakdowns: &[CostBreakdown],
    request: &ShipmentRequest,
    policy: &RecommendationPolicy,
) -> Option<Recommendation> {
    let cheapest = cheapest(breakdowns)?;
    let fastest = fastest(breakdowns)?;

    let (chosen, reason, reason_text) = if request.speed_tier == SpeedTier::Overnight {
        let text = format!(
            "For overnight delivery, {} offers the most reliable next-day service with excellent tracking.",
            fastest.carrier
        );
        (fastest, RecommendationReason::OvernightSpeed, text)
    } else if request.weight_kg > policy.heavy_package_kg {
        let chosen = breakdowns.iter().find(|breakdown| breakdown.premium).unwrap_or(cheapest);
        let text = format!(
            "For heavier packages ({}kg), {} offers the best balance of reliability and handling expertise.",
            request.weight_kg.normalize(),
            chosen.carrier
        );
        (chosen, RecommendationReason::HeavyPackage, text)
    } else if cheapest.total_cost < fastest.total_cost * policy.savings_ratio {
        let savings = fastest.total_cost - cheapest.total_cost;
        let text = format!(
            "{} offers excellent value with significant cost savings (₹{} less than premium options).",
            cheapest.carrier, savings
        );
        (cheapest, RecommendationReason::CostSavings { savings }, text)
    } else {
        let cost_ceiling = cheapest.total_cost * policy.balanced_cost_ratio;
        let slowest_allowed = fastest.eta.days() + policy.balanced_eta_slack_days;
        let chosen = breakdowns
            .iter()
            .find(|breakdown| {
                breakdown.total_cost <= cost_ceiling
                    && (breakdown.eta == fastest.eta || breakdown.eta.days() <= slowest_allowed)
            })
            .unwrap_or(cheapest);
        let text = format!(
            "{} provides the optimal balance of cost-effectiveness and delivery speed for your shipment.",
            chosen.carrier
        );
        (chosen, RecommendationReason::Balanced, text)
    };

    let alternative = |candidate: &CostBreakdown| {
        (candidate.carrier != chosen.carrier).then(|| candidate.carrier.clone())
    };

    Some(Recommendation {
        recommended: chosen.carrier.clone(),
        reason,
        reason_text,
        cheapest_alternative: alternative(cheapest),
        fastest_alternative: alternative(fastest),
    })
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;

    use super::{
        recommend, DeterministicRecommendationEngine, RecommendationEngine, RecommendationPolicy,
    };
    use crate::domain::carrier::CarrierName;
    use crate::domain::quote::{CostBreakdown, Eta, RecommendationReason};
    use crate::domain::shipment::{ShipmentRequest, SpeedTier};
    use crate::engine::catalog::CarrierCatalog;
    use crate::engine::distance::DistanceTable;
    use crate::engine::pricing::compute_costs;

    fn breakdown(name: &str, total: i64, days: u32, premium: bool) -> CostBreakdown {
        CostBreakdown {
            carrier: CarrierName(name.to_owned()),
            base_rate: Decimal::from(100),
            weight_charges: Decimal::ZERO,
            speed_surcharge: Decimal::ZERO,
            distance_multiplier: Decimal::ONE,
            total_cost: Decimal::from(total),
            eta: Eta::from_days(days),
            reliability: 90,
            features: Vec::new(),
            premium,
        }
    }

    fn request(weight: i64, tier: SpeedTier) -> ShipmentRequest {
        ShipmentRequest {
            origin_city: "Mumbai".to_owned(),
            destination_city: "Pune".to_owned(),
            weight_kg: Decimal::from(weight),
            speed_tier: tier,
        }
    }

    fn name(value: &str) -> CarrierName {
        CarrierName(value.to_owned())
    }

    #[test]
    fn empty_breakdowns_yield_no_recommendation() {
        assert!(recommend(&[], &request(1, SpeedTier::Standard)).is_none());
    }

    #[test]
    fn overnight_picks_fastest_carrier() {
        let breakdowns = vec![
            breakdown("Slow Cheap", 100, 3, false),
            breakdown("Quick", 400, 1, false),
            breakdown("Also Quick", 300, 1, true),
        ];

        let recommendation =
            recommend(&breakdowns, &request(2, SpeedTier::Overnight)).expect("recommendation");
        assert_eq!(recommendation.recommended, name("Quick"));
        assert_eq!(recommendation.reason, RecommendationReason::OvernightSpeed);
        assert_eq!(recommendation.cheapest_alternative, Some(name("Slow Cheap")));
        assert_eq!(recommendation.fastest_alternative, None);
        assert!(recommendation.reason_text.starts_with("For overnight delivery, Quick"));
    }

    #[test]
    fn overnight_with_standard_tables_matches_minimum_eta() {
        let shipment = ShipmentRequest {
            destination_city: "Delhi".to_owned(),
            ..request(1, SpeedTier::Overnight)
        };
        let breakdowns =
            compute_costs(&shipment, &CarrierCatalog::standard(), &DistanceTable::standard());

        let minimum_days = breakdowns.iter().map(|b| b.eta.days()).min();
        let recommendation = recommend(&breakdowns, &shipment).expect("recommendation");
        let chosen = breakdowns
            .iter()
            .find(|b| b.carrier == recommendation.recommended)
            .expect("recommended carrier is quoted");
        assert_eq!(Some(chosen.eta.days()), minimum_days);
        assert_eq!(recommendation.cheapest_alternative, Some(name("Ecom Express")));
    }

    #[test]
    fn heavy_package_prefers_first_premium_carrier() {
        let catalog = CarrierCatalog::standard();
        let shipment = request(15, SpeedTier::Standard);
        let breakdowns = compute_costs(&shipment, &catalog, &DistanceTable::standard());

        let recommendation = recommend(&breakdowns, &shipment).expect("recommendation");
        assert_eq!(recommendation.recommended, name("BlueDart Express"));
        assert_eq!(recommendation.reason, RecommendationReason::HeavyPackage);
        assert_eq!(
            recommendation.reason_text,
            "For heavier packages (15kg), BlueDart Express offers the best balance of reliability and handling expertise."
        );
    }

    #[test]
    fn heavy_package_without_premium_carrier_falls_back_to_cheapest() {
        let breakdowns = vec![
            breakdown("Budget", 300, 4, false),
            breakdown("Cheapest", 250, 5, false),
        ];

        let recommendation =
            recommend(&breakdowns, &request(12, SpeedTier::Express)).expect("recommendation");
        assert_eq!(recommendation.recommended, name("Cheapest"));
        assert_eq!(recommendation.reason, RecommendationReason::HeavyPackage);
        assert_eq!(recommendation.cheapest_alternative, None);
        assert_eq!(recommendation.fastest_alternative, Some(name("Budget")));
    }

    #[test]
    fn ten_kilograms_is_not_heavy() {
        let breakdowns = vec![breakdown("Premium", 100, 2, true), breakdown("Cheap", 60, 4, false)];

        let recommendation =
            recommend(&breakdowns, &request(10, SpeedTier::Standard)).expect("recommendation");
        assert_eq!(recommendation.recommended, name("Cheap"));
    }

    #[test]
    fn large_savings_pick_cheapest_and_quote_difference() {
        let breakdowns = vec![breakdown("Fast", 200, 3, false), breakdown("Thrifty", 100, 5, false)];

        let recommendation =
            recommend(&breakdowns, &request(3, SpeedTier::Standard)).expect("recommendation");
        assert_eq!(recommendation.recommended, name("Thrifty"));
        assert_eq!(
            recommendation.reason,
            RecommendationReason::CostSavings { savings: Decimal::from(100) }
        );
        assert_eq!(
            recommendation.reason_text,
            "Thrifty offers excellent value with significant cost savings (₹100 less than premium options)."
        );
        assert_eq!(recommendation.cheapest_alternative, None);
        assert_eq!(recommendation.fastest_alternative, Some(name("Fast")));
    }

    #[test]
    fn balanced_pick_is_first_within_cost_and_speed_window() {
        let breakdowns = vec![
            breakdown("Pricey Slow", 120, 6, false),
            breakdown("Balanced", 110, 4, false),
            breakdown("Cheapest Slow", 100, 6, false),
        ];

        let recommendation =
            recommend(&breakdowns, &request(3, SpeedTier::Express)).expect("recommendation");
        assert_eq!(recommendation.recommended, name("Balanced"));
        assert_eq!(recommendation.reason, RecommendationReason::Balanced);
        assert_eq!(recommendation.cheapest_alternative, Some(name("Cheapest Slow")));
        assert_eq!(recommendation.fastest_alternative, None);
    }

    #[test]
    fn balanced_falls_back_to_cheapest_when_nothing_fits() {
        let breakdowns =
            vec![breakdown("Cheap Slow", 100, 6, false), breakdown("Fast", 130, 2, false)];

        let recommendation =
            recommend(&breakdowns, &request(3, SpeedTier::Standard)).expect("recommendation");
        assert_eq!(recommendation.recommended, name("Cheap Slow"));
        assert_eq!(recommendation.reason, RecommendationReason::Balanced);
        assert_eq!(recommendation.fastest_alternative, Some(name("Fast")));
    }

    #[test]
    fn ties_resolve_to_catalog_order() {
        let breakdowns = vec![
            breakdown("First", 100, 3, false),
            breakdown("Second", 100, 3, false),
        ];

        let recommendation =
            recommend(&breakdowns, &request(3, SpeedTier::Standard)).expect("recommendation");
        assert_eq!(recommendation.recommended, name("First"));
        assert_eq!(recommendation.cheapest_alternative, None);
        assert_eq!(recommendation.fastest_alternative, None);
    }

    #[test]
    fn custom_policy_moves_heavy_threshold() {
        let engine = DeterministicRecommendationEngine::new(RecommendationPolicy {
            heavy_package_kg: Decimal::from(5),
            ..RecommendationPolicy::default()
        });
        let breakdowns = vec![breakdown("Cheap", 60, 4, false), breakdown("Premium", 100, 2, true)];

        let recommendation = engine
            .recommend(&breakdowns, &request(8, SpeedTier::Standard))
            .expect("recommendation");
        assert_eq!(recommendation.recommended, name("Premium"));
        assert_eq!(recommendation.reason, RecommendationReason::HeavyPackage);
    }
}
