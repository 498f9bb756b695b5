pub mod config;
pub mod domain;
pub mod engine;
pub mod errors;

pub use config::{AppConfig, ConfigError, ConfigOverrides, LoadOptions, LogFormat};
pub use domain::carrier::{CarrierName, CarrierProfile, SpeedSurcharges};
pub use domain::quote::{
    CarrierHighlight, CostBreakdown, Eta, QuoteInsights, Recommendation, RecommendationReason,
    ShipmentQuote,
};
pub use domain::shipment::{ShipmentForm, ShipmentRequest, SpeedTier};
pub use engine::{DeterministicQuoteRuntime, QuoteRuntime, StandardQuoteRuntime};
pub use errors::{ApplicationError, DomainError};
