use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::engine::distance::DEFAULT_DISTANCE_MULTIPLIER;
use crate::engine::pricing::DEFAULT_ETA_DISTANCE_CAP;
use crate::engine::recommendation::RecommendationPolicy;
use crate::engine::validation::DEFAULT_MAX_WEIGHT_KG;

pub const CONFIG_FILE_CANDIDATES: [&str; 2] = ["shipwise.toml", "config/shipwise.toml"];

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AppConfig {
    pub pricing: PricingConfig,
    pub recommendation: RecommendationPolicy,
    pub logging: LoggingConfig,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PricingConfig {
    pub default_distance_multiplier: Decimal,
    pub eta_distance_cap: Decimal,
    pub max_weight_kg: Decimal,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LoggingConfig {
    pub level: String,
    pub format: LogFormat,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LogFormat {
    Compact,
    Pretty,
    Json,
}

#[derive(Clone, Debug, Default)]
pub struct ConfigOverrides {
    pub log_level: Option<String>,
    pub log_format: Option<LogFormat>,
    pub default_distance_multiplier: Option<Decimal>,
    pub eta_distance_cap: Option<Decimal>,
}

#[derive(Clone, Debug, Default)]
pub struct LoadOptions {
    pub config_path: Option<PathBuf>,
    pub require_file: bool,
    pub overrides: ConfigOverrides,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not read config file `{path}`: {source}")]
    ReadFile { path: PathBuf, source: std::io::Error },
    #[error("could not parse config file `{path}`: {source}")]
    ParseFile { path: PathBuf, source: toml::de::Error },
    #[error("required config file was not found: `{0}`")]
    MissingConfigFile(PathBuf),
    #[error("environment variable interpolation failed for `{var}`")]
    MissingEnvInterpolation { var: String },
    #[error("unterminated environment interpolation expression")]
    UnterminatedInterpolation,
    #[error("invalid environment override for `{key}`: `{value}`")]
    InvalidEnvOverride { key: String, value: String },
    #[error("configuration validation failed: {0}")]
    Validation(String),
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            pricing: PricingConfig {
                default_distance_multiplier: DEFAULT_DISTANCE_MULTIPLIER,
                eta_distance_cap: DEFAULT_ETA_DISTANCE_CAP,
                max_weight_kg: DEFAULT_MAX_WEIGHT_KG,
            },
            recommendation: RecommendationPolicy::default(),
            logging: LoggingConfig { level: "warn".to_string(), format: LogFormat::Compact },
        }
    }
}

impl FromStr for LogFormat {
    type Err = ConfigError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "compact" => Ok(Self::Compact),
            "pretty" => Ok(Self::Pretty),
            "json" => Ok(Self::Json),
            other => Err(ConfigError::Validation(format!(
                "unsupported log format `{other}` (expected compact|pretty|json)"
            ))),
        }
    }
}

impl AppConfig {
    pub fn load(options: LoadOptions) -> Result<Self, ConfigError> {
        let mut config = Self::default();
        let maybe_path = resolve_config_path(options.config_path.as_deref());

        if let Some(path) = maybe_path {
            let patch = read_patch(&path)?;
            config.apply_patch(patch);
        } else if options.require_file {
            let expected =
                options.config_path.unwrap_or_else(|| PathBuf::from(CONFIG_FILE_CANDIDATES[0]));
            return Err(ConfigError::MissingConfigFile(expected));
        }

        config.apply_env_overrides()?;
        config.apply_overrides(options.overrides);
        config.validate()?;

        Ok(config)
    }

    fn apply_patch(&mut self, patch: ConfigPatch) {
        if let Some(pricing) = patch.pricing {
            if let Some(value) = pricing.default_distance_multiplier {
                self.pricing.default_distance_multiplier = value;
            }
            if let Some(value) = pricing.eta_distance_cap {
                self.pricing.eta_distance_cap = value;
            }
            if let Some(value) = pricing.max_weight_kg {
                self.pricing.max_weight_kg = value;
            }
        }

        if let Some(recommendation) = patch.recommendation {
            if let Some(value) = recommendation.heavy_package_kg {
                self.recommendation.heavy_package_kg = value;
            }
            if let Some(value) = recommendation.savings_ratio {
                self.recommendation.savings_ratio = value;
            }
            if let Some(value) = recommendation.balanced_cost_ratio {
                self.recommendation.balanced_cost_ratio = value;
            }
            if let Some(value) = recommendation.balanced_eta_slack_days {
                self.recommendation.balanced_eta_slack_days = value;
            }
        }

        if let Some(logging) = patch.logging {
            if let Some(level) = logging.level {
                self.logging.level = level;
            }
            if let Some(format) = logging.format {
                self.logging.format = format;
            }
        }
    }

    fn apply_env_overrides(&mut self) -> Result<(), ConfigError> {
        if let Some(value) = read_env("SHIPWISE_PRICING_DEFAULT_DISTANCE_MULTIPLIER") {
            self.pricing.default_distance_multiplier =
                parse_decimal("SHIPWISE_PRICING_DEFAULT_DISTANCE_MULTIPLIER", &value)?;
        }
        if let Some(value) = read_env("SHIPWISE_PRICING_ETA_DISTANCE_CAP") {
            self.pricing.eta_distance_cap =
                parse_decimal("SHIPWISE_PRICING_ETA_DISTANCE_CAP", &value)?;
        }
        if let Some(value) = read_env("SHIPWISE_PRICING_MAX_WEIGHT_KG") {
            self.pricing.max_weight_kg = parse_decimal("SHIPWISE_PRICING_MAX_WEIGHT_KG", &value)?;
        }

        if let Some(value) = read_env("SHIPWISE_RECOMMENDATION_HEAVY_PACKAGE_KG") {
            self.recommendation.heavy_package_kg =
                parse_decimal("SHIPWISE_RECOMMENDATION_HEAVY_PACKAGE_KG", &value)?;
        }
        if let Some(value) = read_env("SHIPWISE_RECOMMENDATION_SAVINGS_RATIO") {
            self.recommendation.savings_ratio =
                parse_decimal("SHIPWISE_RECOMMENDATION_SAVINGS_RATIO", &value)?;
        }
        if let Some(value) = read_env("SHIPWISE_RECOMMENDATION_BALANCED_COST_RATIO") {
            self.recommendation.balanced_cost_ratio =
                parse_decimal("SHIPWISE_RECOMMENDATION_BALANCED_COST_RATIO", &value)?;
        }
        if let Some(value) = read_env("SHIPWISE_RECOMMENDATION_BALANCED_ETA_SLACK_DAYS") {
            self.recommendation.balanced_eta_slack_days =
                parse_u32("SHIPWISE_RECOMMENDATION_BALANCED_ETA_SLACK_DAYS", &value)?;
        }

        let log_level =
            read_env("SHIPWISE_LOGGING_LEVEL").or_else(|| read_env("SHIPWISE_LOG_LEVEL"));
        if let Some(value) = log_level {
            self.logging.level = value;
        }
        let log_format =
            read_env("SHIPWISE_LOGGING_FORMAT").or_else(|| read_env("SHIPWISE_LOG_FORMAT"));
        if let Some(value) = log_format {
            self.logging.format = value.parse()?;
        }

        Ok(())
    }

    fn apply_overrides(&mut self, overrides: ConfigOverrides) {
        if let Some(log_level) = overrides.log_level {
            self.logging.level = log_level;
        }
        if let Some(log_format) = overrides.log_format {
            self.logging.format = log_format;
        }
        if let Some(multiplier) = overrides.default_distance_multiplier {
            self.pricing.default_distance_multiplier = multiplier;
        }
        if let Some(cap) = overrides.eta_distance_cap {
            self.pricing.eta_distance_cap = cap;
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        validate_pricing(&self.pricing)?;
        validate_recommendation(&self.recommendation)?;
        validate_logging(&self.logging)?;
        Ok(())
    }
}

/// The first existing config file, honouring an explicit path when given.
pub fn resolve_config_path(explicit_path: Option<&Path>) -> Option<PathBuf> {
    if let Some(path) = explicit_path {
        return path.exists().then_some(path.to_path_buf());
    }

    CONFIG_FILE_CANDIDATES.into_iter().map(PathBuf::from).find(|path| path.exists())
}

fn read_patch(path: &Path) -> Result<ConfigPatch, ConfigError> {
    let raw = fs::read_to_string(path)
        .map_err(|source| ConfigError::ReadFile { path: path.to_path_buf(), source })?;

    let interpolated = interpolate_env_vars(&raw)?;
    toml::from_str::<ConfigPatch>(&interpolated)
        .map_err(|source| ConfigError::ParseFile { path: path.to_path_buf(), source })
}

fn interpolate_env_vars(input: &str) -> Result<String, ConfigError> {
    let mut output = String::with_capacity(input.len());
    let mut chars = input.chars().peekable();

    while let Some(ch) = chars.next() {
        if ch == '$' && matches!(chars.peek(), Some('{')) {
            chars.next();
            let mut key = String::new();

            loop {
                match chars.next() {
                    Some('}') => break,
                    Some(next) => key.push(next),
                    None => return Err(ConfigError::UnterminatedInterpolation),
                }
            }

            let value = env::var(&key)
                .map_err(|_| ConfigError::MissingEnvInterpolation { var: key.clone() })?;
            output.push_str(&value);
            continue;
        }

        output.push(ch);
    }

    Ok(output)
}

fn validate_pricing(pricing: &PricingConfig) -> Result<(), ConfigError> {
    if pricing.default_distance_multiplier <= Decimal::ZERO {
        return Err(ConfigError::Validation(
            "pricing.default_distance_multiplier must be greater than zero".to_string(),
        ));
    }

    if pricing.eta_distance_cap < Decimal::ONE {
        return Err(ConfigError::Validation(
            "pricing.eta_distance_cap must be at least 1".to_string(),
        ));
    }

    if pricing.max_weight_kg <= Decimal::ZERO {
        return Err(ConfigError::Validation(
            "pricing.max_weight_kg must be greater than zero".to_string(),
        ));
    }

    Ok(())
}

fn validate_recommendation(policy: &RecommendationPolicy) -> Result<(), ConfigError> {
    if policy.heavy_package_kg <= Decimal::ZERO {
        return Err(ConfigError::Validation(
            "recommendation.heavy_package_kg must be greater than zero".to_string(),
        ));
    }

    if policy.savings_ratio <= Decimal::ZERO || policy.savings_ratio > Decimal::ONE {
        return Err(ConfigError::Validation(
            "recommendation.savings_ratio must be in range (0, 1]".to_string(),
        ));
    }

    if policy.balanced_cost_ratio < Decimal::ONE {
        return Err(ConfigError::Validation(
            "recommendation.balanced_cost_ratio must be at least 1".to_string(),
        ));
    }

    Ok(())
}

fn validate_logging(logging: &LoggingConfig) -> Result<(), ConfigError> {
    let level = logging.level.trim().to_ascii_lowercase();
    match level.as_str() {
        "trace" | "debug" | "info" | "warn" | "error" => Ok(()),
        _ => Err(ConfigError::Validation(
            "logging.level must be one of trace|debug|info|warn|error".to_string(),
        )),
    }
}

fn read_env(key: &str) -> Option<String> {
    env::var(key).ok().filter(|value| !value.trim().is_empty())
}

fn parse_u32(key: &str, value: &str) -> Result<u32, ConfigError> {
    value.trim().parse::<u32>().map_err(|_| ConfigError::InvalidEnvOverride {
        key: key.to_string(),
        value: value.to_string(),
    })
}

fn parse_decimal(key: &str, value: &str) -> Result<Decimal, ConfigError> {
    Decimal::from_str(value.trim()).map_err(|_| ConfigError::InvalidEnvOverride {
        key: key.to_string(),
        value: value.to_string(),
    })
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct ConfigPatch {
    pricing: Option<PricingPatch>,
    recommendation: Option<RecommendationPatch>,
    logging: Option<LoggingPatch>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct PricingPatch {
    default_distance_multiplier: Option<Decimal>,
    eta_distance_cap: Option<Decimal>,
    max_weight_kg: Option<Decimal>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct RecommendationPatch {
    heavy_package_kg: Option<Decimal>,
    savings_ratio: Option<Decimal>,
    balanced_cost_ratio: Option<Decimal>,
    balanced_eta_slack_days: Option<u32>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct LoggingPatch {
    level: Option<String>,
    format: Option<LogFormat>,
}
