use thiserror::Error;

use crate::{config::ConfigError, engine::validation::ShipmentViolation};

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum DomainError {
    #[error("invalid shipment request: {0}")]
    InvalidShipment(#[from] ShipmentViolation),
    #[error("carrier catalog is empty; nothing to quote")]
    EmptyCatalog,
}

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum ApplicationError {
    #[error(transparent)]
    Domain(#[from] DomainError),
    #[error("configuration failure: {0}")]
    Configuration(String),
}

impl From<ConfigError> for ApplicationError {
    fn from(value: ConfigError) -> Self {
        Self::Configuration(value.to_string())
    }
}

impl ApplicationError {
    /// Stable classification used in machine-readable command output.
    pub fn error_class(&self) -> &'static str {
        match self {
            Self::Domain(DomainError::InvalidShipment(_)) => "validation",
            Self::Domain(DomainError::EmptyCatalog) => "catalog",
            Self::Configuration(_) => "config",
        }
    }

    pub fn user_message(&self) -> String {
        match self {
            Self::Domain(DomainError::InvalidShipment(violation)) => violation.to_string(),
            Self::Domain(DomainError::EmptyCatalog) => {
                "No carriers are available to quote this shipment.".to_owned()
            }
            Self::Configuration(_) => {
                "The estimator is misconfigured. Run `shipwise doctor` for details.".to_owned()
            }
        }
    }

    pub fn violation_code(&self) -> Option<&'static str> {
        match self {
            Self::Domain(DomainError::InvalidShipment(violation)) => Some(violation.code()),
            _ => None,
        }
    }
}
