use std::env;
use std::fs;
use std::path::Path;

use shipwise_core::config::{resolve_config_path, AppConfig};
use toml::Value;

use super::{load_config, CommandResult};

struct Field {
    key_path: &'static str,
    env_keys: &'static [&'static str],
    value: String,
}

pub fn run() -> CommandResult {
    let config = match load_config("config") {
        Ok(config) => config,
        Err(result) => return result,
    };

    let config_file_path = resolve_config_path(None);
    let config_file_doc = load_config_file_doc(config_file_path.as_deref());

    let mut lines = vec!["effective config (source precedence: env > file > default):".to_string()];
    for field in fields(&config) {
        let source = field_source(
            field.key_path,
            field.env_keys,
            config_file_doc.as_ref(),
            config_file_path.as_deref(),
        );
        lines.push(render_line(field.key_path, &field.value, source));
    }

    CommandResult::rendered(lines.join("\n"))
}

fn fields(config: &AppConfig) -> Vec<Field> {
    let pricing = &config.pricing;
    let policy = &config.recommendation;

    vec![
        Field {
            key_path: "pricing.default_distance_multiplier",
            env_keys: &["SHIPWISE_PRICING_DEFAULT_DISTANCE_MULTIPLIER"],
            value: pricing.default_distance_multiplier.to_string(),
        },
        Field {
            key_path: "pricing.eta_distance_cap",
            env_keys: &["SHIPWISE_PRICING_ETA_DISTANCE_CAP"],
            value: pricing.eta_distance_cap.to_string(),
        },
        Field {
            key_path: "pricing.max_weight_kg",
            env_keys: &["SHIPWISE_PRICING_MAX_WEIGHT_KG"],
            value: pricing.max_weight_kg.to_string(),
        },
        Field {
            key_path: "recommendation.heavy_package_kg",
            env_keys: &["SHIPWISE_RECOMMENDATION_HEAVY_PACKAGE_KG"],
            value: policy.heavy_package_kg.to_string(),
        },
        Field {
            key_path: "recommendation.savings_ratio",
            env_keys: &["SHIPWISE_RECOMMENDATION_SAVINGS_RATIO"],
            value: policy.savings_ratio.to_string(),
        },
        Field {
            key_path: "recommendation.balanced_cost_ratio",
            env_keys: &["SHIPWISE_RECOMMENDATION_BALANCED_COST_RATIO"],
            value: policy.balanced_cost_ratio.to_string(),
        },
        Field {
            key_path: "recommendation.balanced_eta_slack_days",
            env_keys: &["SHIPWISE_RECOMMENDATION_BALANCED_ETA_SLACK_DAYS"],
            value: policy.balanced_eta_slack_days.to_string(),
        },
        Field {
            key_path: "logging.level",
            env_keys: &["SHIPWISE_LOGGING_LEVEL", "SHIPWISE_LOG_LEVEL"],
            value: config.logging.level.clone(),
        },
        Field {
            key_path: "logging.format",
            env_keys: &["SHIPWISE_LOGGING_FORMAT", "SHIPWISE_LOG_FORMAT"],
            value: format!("{:?}", config.logging.format).to_ascii_lowercase(),
        },
    ]
}

fn load_config_file_doc(path: Option<&Path>) -> Option<Value> {
    let path = path?;
    let raw = fs::read_to_string(path).ok()?;
    raw.parse::<Value>().ok()
}

fn field_source(
    key_path: &str,
    env_keys: &[&str],
    config_file_doc: Option<&Value>,
    config_file_path: Option<&Path>,
) -> String {
    if let Some(env_key) = env_keys.iter().find(|key| env::var_os(key).is_some()) {
        return format!("env ({env_key})");
    }

    if let Some(doc) = config_file_doc {
        if contains_path(doc, key_path) {
            let file_path = config_file_path
                .map(|path| path.display().to_string())
                .unwrap_or_else(|| "config file".to_string());
            return format!("file ({file_path})");
        }
    }

    "default".to_string()
}

fn contains_path(root: &Value, key_path: &str) -> bool {
    let mut current = root;
    for key in key_path.split('.') {
        let Some(next) = current.get(key) else {
            return false;
        };
        current = next;
    }
    true
}

fn render_line(key: &str, value: &str, source: String) -> String {
    format!("- {key} = {value} (source: {source})")
}
