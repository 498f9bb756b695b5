use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::shipment::{ShipmentForm, ShipmentRequest, SpeedTier};

pub const DEFAULT_MAX_WEIGHT_KG: Decimal = Decimal::from_parts(50, 0, 0, false, 0);

#[derive(Clone, Debug, Error, PartialEq, Eq, Serialize, Deserialize)]
pub enum ShipmentViolation {
    #[error("Please select a pickup city")]
    MissingOrigin,
    #[error("Please select a destination city")]
    MissingDestination,
    #[error("Pickup and destination cities must be different")]
    SameCity,
    #[error("Please enter a valid package weight")]
    InvalidWeight,
    #[error("Maximum weight limit is {max_kg}kg")]
    WeightLimitExceeded { max_kg: Decimal },
    #[error("Please select delivery speed")]
    MissingSpeedTier,
    #[error("Unsupported delivery speed `{0}` (expected standard|express|overnight)")]
    UnsupportedSpeedTier(String),
}

impl ShipmentViolation {
    pub fn code(&self) -> &'static str {
        match self {
            Self::MissingOrigin => "MISSING_ORIGIN",
            Self::MissingDestination => "MISSING_DESTINATION",
            Self::SameCity => "SAME_CITY",
            Self::InvalidWeight => "INVALID_WEIGHT",
            Self::WeightLimitExceeded { .. } => "WEIGHT_LIMIT_EXCEEDED",
            Self::MissingSpeedTier => "MISSING_SPEED_TIER",
            Self::UnsupportedSpeedTier(_) => "UNSUPPORTED_SPEED_TIER",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationResult {
    pub valid: bool,
    pub code: Option<String>,
    pub message: String,
}

impl ValidationResult {
    pub fn passed() -> Self {
        Self { valid: true, code: None, message: "Shipment request is valid".to_string() }
    }

    pub fn failed(violation: &ShipmentViolation) -> Self {
        Self {
            valid: false,
            code: Some(violation.code().to_string()),
            message: violation.to_string(),
        }
    }
}

pub trait ShipmentValidator: Send + Sync {
    fn check(&self, form: &ShipmentForm) -> Result<ShipmentRequest, ShipmentViolation>;

    fn validate(&self, form: &ShipmentForm) -> ValidationResult {
        match self.check(form) {
            Ok(_) => ValidationResult::passed(),
            Err(violation) => ValidationResult::failed(&violation),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DeterministicShipmentValidator {
    max_weight_kg: Decimal,
}

impl DeterministicShipmentValidator {
    pub fn new(max_weight_kg: Decimal) -> Self {
        Self { max_weight_kg }
    }

    pub fn max_weight_kg(&self) -> Decimal {
        self.max_weight_kg
    }
}

impl Default for DeterministicShipmentValidator {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_WEIGHT_KG)
    }
}

impl ShipmentValidator for DeterministicShipmentValidator {
    fn check(&self, form: &ShipmentForm) -> Result<ShipmentRequest, ShipmentViolation> {
        check_with_limit(form, self.max_weight_kg)
    }
}

pub fn check(form: &ShipmentForm) -> Result<ShipmentRequest, ShipmentViolation> {
    check_with_limit(form, DEFAULT_MAX_WEIGHT_KG)
}

pub fn validate(form: &ShipmentForm) -> ValidationResult {
    DeterministicShipmentValidator::default().validate(form)
}

/// Rules run in a fixed order and stop at the first failure.
fn check_with_limit(
    form: &ShipmentForm,
    max_weight_kg: Decimal,
) -> Result<ShipmentRequest, ShipmentViolation> {
    let origin = form.origin_city.trim();
    if origin.is_empty() {
        return Err(ShipmentViolation::MissingOrigin);
    }

    let destination = form.destination_city.trim();
    if destination.is_empty() {
        return Err(ShipmentViolation::MissingDestination);
    }

    if origin.to_lowercase() == destination.to_lowercase() {
        return Err(ShipmentViolation::SameCity);
    }

    let weight_kg = match form.weight_kg {
        Some(weight) if weight > Decimal::ZERO => weight,
        _ => return Err(ShipmentViolation::InvalidWeight),
    };

    if weight_kg > max_weight_kg {
        return Err(ShipmentViolation::WeightLimitExceeded {
            max_kg: max_weight_kg.normalize(),
        });
    }

    let raw_tier = form.speed_tier.as_deref().map(str::trim).unwrap_or_default();
    if raw_tier.is_empty() {
        return Err(ShipmentViolation::MissingSpeedTier);
    }
    let speed_tier = raw_tier
        .parse::<SpeedTier>()
        .map_err(|error| ShipmentViolation::UnsupportedSpeedTier(error.0))?;

    Ok(ShipmentRequest {
        origin_city: origin.to_owned(),
        destination_city: destination.to_owned(),
        weight_kg,
        speed_tier,
    })
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use rust_decimal::Decimal;

    use super::{
        check, validate, DeterministicShipmentValidator, ShipmentValidator, ShipmentViolation,
    };
    use crate::domain::shipment::{ShipmentForm, SpeedTier};

    fn form(
        origin: &str,
        destination: &str,
        weight: Option<Decimal>,
        speed: Option<&str>,
    ) -> ShipmentForm {
        ShipmentForm {
            origin_city: origin.to_owned(),
            destination_city: destination.to_owned(),
            weight_kg: weight,
            speed_tier: speed.map(str::to_owned),
        }
    }

    #[test]
    fn accepts_well_formed_request() {
        let result = validate(&form("Mumbai", "Delhi", Some(Decimal::from(5)), Some("express")));
        assert!(result.valid);
        assert_eq!(result.code, None);

        let request =
            check(&form("Mumbai", "Delhi", Some(Decimal::from(5)), Some("express"))).expect("valid");
        assert_eq!(request.speed_tier, SpeedTier::Express);
        assert_eq!(request.weight_kg, Decimal::from(5));
    }

    #[test]
    fn rejects_each_broken_rule_with_distinct_message() {
        let cases = [
            (form("  ", "Delhi", Some(Decimal::ONE), Some("standard")), "MISSING_ORIGIN"),
            (form("Mumbai", "", Some(Decimal::ONE), Some("standard")), "MISSING_DESTINATION"),
            (form("Mumbai", "mumbai", Some(Decimal::ONE), Some("standard")), "SAME_CITY"),
            (form("Mumbai", "Delhi", Some(Decimal::ZERO), Some("standard")), "INVALID_WEIGHT"),
            (
                form("Mumbai", "Delhi", Some(Decimal::new(505, 1)), Some("standard")),
                "WEIGHT_LIMIT_EXCEEDED",
            ),
            (form("Mumbai", "Delhi", Some(Decimal::ONE), None), "MISSING_SPEED_TIER"),
        ];

        let mut messages = HashSet::new();
        for (input, expected_code) in cases {
            let result = validate(&input);
            assert!(!result.valid, "{expected_code} should be rejected");
            assert_eq!(result.code.as_deref(), Some(expected_code));
            assert!(messages.insert(result.message), "{expected_code} message should be unique");
        }
    }

    #[test]
    fn missing_weight_and_negative_weight_are_invalid() {
        assert_eq!(
            check(&form("Pune", "Delhi", None, Some("standard"))),
            Err(ShipmentViolation::InvalidWeight)
        );
        assert_eq!(
            check(&form("Pune", "Delhi", Some(Decimal::NEGATIVE_ONE), Some("standard"))),
            Err(ShipmentViolation::InvalidWeight)
        );
    }

    #[test]
    fn weight_limit_is_inclusive() {
        assert!(check(&form("Pune", "Delhi", Some(Decimal::from(50)), Some("overnight"))).is_ok());
        let error = check(&form("Pune", "Delhi", Some(Decimal::new(505, 1)), Some("overnight")))
            .expect_err("50.5kg should be rejected");
        assert_eq!(error.to_string(), "Maximum weight limit is 50kg");
    }

    #[test]
    fn first_failing_rule_wins() {
        let result = validate(&form("", "", None, None));
        assert_eq!(result.code.as_deref(), Some("MISSING_ORIGIN"));
    }

    #[test]
    fn empty_and_unknown_speed_tiers_are_distinct() {
        assert_eq!(
            check(&form("Pune", "Delhi", Some(Decimal::ONE), Some(" "))),
            Err(ShipmentViolation::MissingSpeedTier)
        );
        assert_eq!(
            check(&form("Pune", "Delhi", Some(Decimal::ONE), Some("same-day"))),
            Err(ShipmentViolation::UnsupportedSpeedTier("same-day".to_owned()))
        );
    }

    #[test]
    fn configured_limit_is_respected() {
        let validator = DeterministicShipmentValidator::new(Decimal::from(20));
        let result = validator.validate(&form("Pune", "Delhi", Some(Decimal::from(25)), Some("express")));
        assert!(!result.valid);
        assert_eq!(result.message, "Maximum weight limit is 20kg");
    }

    #[test]
    fn city_names_are_trimmed_in_validated_request() {
        let request = check(&form(" Mumbai ", "Pune\t", Some(Decimal::new(25, 1)), Some("Standard")))
            .expect("valid request");
        assert_eq!(request.origin_city, "Mumbai");
        assert_eq!(request.destination_city, "Pune");
    }
}
