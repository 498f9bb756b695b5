pub mod carriers;
pub mod cities;
pub mod config;
pub mod doctor;
pub mod quote;

use serde::Serialize;
use shipwise_core::config::{AppConfig, ConfigError, LoadOptions};

pub const EXIT_VALIDATION: u8 = 2;
pub const EXIT_CONFIG: u8 = 3;
pub const EXIT_CATALOG: u8 = 4;

#[derive(Debug, Clone)]
pub struct CommandResult {
    pub exit_code: u8,
    pub output: String,
}

#[derive(Debug, Serialize)]
struct CommandOutcome {
    command: String,
    status: String,
    error_class: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    code: Option<String>,
    message: String,
}

impl CommandResult {
    pub fn failure(
        command: &str,
        error_class: &str,
        message: impl Into<String>,
        exit_code: u8,
    ) -> Self {
        Self::failure_with_code(command, error_class, None, message, exit_code)
    }

    pub fn failure_with_code(
        command: &str,
        error_class: &str,
        code: Option<&str>,
        message: impl Into<String>,
        exit_code: u8,
    ) -> Self {
        let payload = CommandOutcome {
            command: command.to_string(),
            status: "error".to_string(),
            error_class: Some(error_class.to_string()),
            code: code.map(str::to_string),
            message: message.into(),
        };
        Self { exit_code, output: serialize_payload(payload) }
    }

    pub fn config_failure(command: &str, error: &ConfigError) -> Self {
        Self::failure(command, "config", format!("config validation failed: {error}"), EXIT_CONFIG)
    }

    /// Plain output, exit code 0.
    pub fn rendered(output: impl Into<String>) -> Self {
        Self { exit_code: 0, output: output.into() }
    }
}

pub(crate) fn load_config(command: &str) -> Result<AppConfig, CommandResult> {
    AppConfig::load(LoadOptions::default())
        .map_err(|error| CommandResult::config_failure(command, &error))
}

pub(crate) fn to_json<T: Serialize>(command: &str, value: &T) -> CommandResult {
    match serde_json::to_string_pretty(value) {
        Ok(output) => CommandResult::rendered(output),
        Err(error) => CommandResult::failure(command, "serialization", error.to_string(), 1),
    }
}

fn serialize_payload(payload: CommandOutcome) -> String {
    serde_json::to_string(&payload).unwrap_or_else(|error| {
        format!(
            "{{\"command\":\"unknown\",\"status\":\"error\",\"error_class\":\"serialization\",\"message\":\"{}\"}}",
            error.to_string().replace('\\', "\\\\").replace('"', "\\\"")
        )
    })
}
