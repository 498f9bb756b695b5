pub mod catalog;
pub mod distance;
pub mod insights;
pub mod pricing;
pub mod recommendation;
pub mod validation;

use tracing::{info, warn};

use crate::config::AppConfig;
use crate::domain::quote::{QuoteInsights, ShipmentQuote};
use crate::domain::shipment::ShipmentForm;
use crate::errors::DomainError;

use self::{
    catalog::CarrierCatalog,
    distance::DistanceTable,
    pricing::{CostCalculator, DeterministicCostCalculator},
    recommendation::{DeterministicRecommendationEngine, RecommendationEngine},
    validation::{DeterministicShipmentValidator, ShipmentValidator},
};

pub trait QuoteRuntime: Send + Sync {
    fn quote(&self, form: &ShipmentForm) -> Result<ShipmentQuote, DomainError>;
}

/// Validates a shipment, prices it with every catalog carrier and picks one.
pub struct DeterministicQuoteRuntime<V, C, R> {
    validator: V,
    calculator: C,
    recommender: R,
    catalog: CarrierCatalog,
    distances: DistanceTable,
}

impl<V, C, R> DeterministicQuoteRuntime<V, C, R> {
    pub fn new(
        validator: V,
        calculator: C,
        recommender: R,
        catalog: CarrierCatalog,
        distances: DistanceTable,
    ) -> Self {
        Self { validator, calculator, recommender, catalog, distances }
    }

    pub fn catalog(&self) -> &CarrierCatalog {
        &self.catalog
    }

    pub fn distances(&self) -> &DistanceTable {
        &self.distances
    }
}

pub type StandardQuoteRuntime = DeterministicQuoteRuntime<
    DeterministicShipmentValidator,
    DeterministicCostCalculator,
    DeterministicRecommendationEngine,
>;

impl Default for StandardQuoteRuntime {
    fn default() -> Self {
        Self::new(
            DeterministicShipmentValidator::default(),
            DeterministicCostCalculator::default(),
            DeterministicRecommendationEngine::default(),
            CarrierCatalog::standard(),
            DistanceTable::standard(),
        )
    }
}

impl StandardQuoteRuntime {
    pub fn from_config(config: &AppConfig) -> Self {
        Self::new(
            DeterministicShipmentValidator::new(config.pricing.max_weight_kg),
            DeterministicCostCalculator::new(config.pricing.eta_distance_cap),
            DeterministicRecommendationEngine::new(config.recommendation),
            CarrierCatalog::standard(),
            DistanceTable::standard_with_default(config.pricing.default_distance_multiplier),
        )
    }
}

impl<V, C, R> QuoteRuntime for DeterministicQuoteRuntime<V, C, R>
where
    V: ShipmentValidator,
    C: CostCalculator,
    R: RecommendationEngine,
{
    fn quote(&self, form: &ShipmentForm) -> Result<ShipmentQuote, DomainError> {
        let request = self.validator.check(form).map_err(|violation| {
            warn!(
                event_name = "shipment.quote.rejected",
                code = violation.code(),
                origin_city = %form.origin_city,
                destination_city = %form.destination_city,
                "shipment request failed validation"
            );
            DomainError::InvalidShipment(violation)
        })?;

        let breakdowns = self.calculator.compute(&request, &self.catalog, &self.distances);
        let recommendation = self
            .recommender
            .recommend(&breakdowns, &request)
            .ok_or(DomainError::EmptyCatalog)?;
        let insights = QuoteInsights::from_breakdowns(&breakdowns).ok_or(DomainError::EmptyCatalog)?;

        info!(
            event_name = "shipment.quote.completed",
            origin_city = %request.origin_city,
            destination_city = %request.destination_city,
            speed_tier = %request.speed_tier,
            carriers = breakdowns.len(),
            recommended = %recommendation.recommended,
            "shipment quote computed"
        );

        Ok(ShipmentQuote { request, breakdowns, recommendation, insights })
    }
}
