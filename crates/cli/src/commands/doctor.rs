use rust_decimal::Decimal;
use serde::Serialize;
use shipwise_core::config::{AppConfig, LoadOptions};
use shipwise_core::domain::shipment::ShipmentForm;
use shipwise_core::engine::catalog::CarrierCatalog;
use shipwise_core::engine::distance::DistanceTable;
use shipwise_core::engine::{QuoteRuntime, StandardQuoteRuntime};
use tracing::info;

use super::{CommandResult, EXIT_CONFIG};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
enum CheckStatus {
    Pass,
    Fail,
    Skipped,
}

#[derive(Debug, Serialize)]
struct DoctorCheck {
    name: &'static str,
    status: CheckStatus,
    details: String,
}

#[derive(Debug, Serialize)]
struct DoctorReport {
    overall_status: CheckStatus,
    summary: String,
    checks: Vec<DoctorCheck>,
}

pub fn run(json_output: bool) -> CommandResult {
    let report = build_report(AppConfig::load(LoadOptions::default()));
    let exit_code = exit_code(&report);

    info!(
        event_name = "cli.doctor.completed",
        overall_status = ?report.overall_status,
        checks = report.checks.len(),
        "doctor report built"
    );

    let output = if json_output {
        serde_json::to_string_pretty(&report).unwrap_or_else(|error| {
            format!(
                "{{\"overall_status\":\"fail\",\"summary\":\"doctor serialization failed\",\"error\":\"{}\"}}",
                escape_json(&error.to_string())
            )
        })
    } else {
        render_human(&report)
    };

    CommandResult { exit_code, output }
}

fn exit_code(report: &DoctorReport) -> u8 {
    let config_failed = report
        .checks
        .iter()
        .any(|check| check.name == "config_validation" && check.status == CheckStatus::Fail);

    match report.overall_status {
        CheckStatus::Pass => 0,
        _ if config_failed => EXIT_CONFIG,
        _ => 1,
    }
}

fn build_report<E: std::fmt::Display>(loaded: Result<AppConfig, E>) -> DoctorReport {
    let mut checks = Vec::new();
    let catalog = CarrierCatalog::standard();

    match loaded {
        Ok(config) => {
            checks.push(DoctorCheck {
                name: "config_validation",
                status: CheckStatus::Pass,
                details: "configuration loaded and validated".to_string(),
            });
            let distances =
                DistanceTable::standard_with_default(config.pricing.default_distance_multiplier);
            checks.push(check_catalog(&catalog));
            checks.push(check_distance_table(&distances));
            checks.push(check_sample_quote(&config));
        }
        Err(error) => {
            checks.push(DoctorCheck {
                name: "config_validation",
                status: CheckStatus::Fail,
                details: error.to_string(),
            });
            checks.push(check_catalog(&catalog));
            checks.push(check_distance_table(&DistanceTable::standard()));
            checks.push(DoctorCheck {
                name: "sample_quote",
                status: CheckStatus::Skipped,
                details: "skipped because configuration did not load".to_string(),
            });
        }
    }

    let all_pass = checks.iter().all(|check| check.status == CheckStatus::Pass);
    let overall_status = if all_pass { CheckStatus::Pass } else { CheckStatus::Fail };
    let summary = if all_pass {
        "doctor: all readiness checks passed".to_string()
    } else {
        "doctor: one or more readiness checks failed".to_string()
    };

    DoctorReport { overall_status, summary, checks }
}

fn check_catalog(catalog: &CarrierCatalog) -> DoctorCheck {
    if catalog.is_empty() {
        return DoctorCheck {
            name: "carrier_catalog",
            status: CheckStatus::Fail,
            details: "carrier catalog is empty".to_string(),
        };
    }

    let problems: Vec<String> = catalog
        .iter()
        .filter_map(|carrier| {
            let surcharges = carrier.speed_surcharges;
            if carrier.base_rate <= Decimal::ZERO || carrier.weight_multiplier <= Decimal::ZERO {
                Some(format!("{} has a non-positive rate", carrier.name))
            } else if surcharges.standard < Decimal::ONE
                || surcharges.express < surcharges.standard
                || surcharges.overnight < surcharges.express
            {
                Some(format!("{} has decreasing speed surcharges", carrier.name))
            } else if carrier.reliability > 100 {
                Some(format!("{} has reliability above 100", carrier.name))
            } else {
                None
            }
        })
        .collect();

    if problems.is_empty() {
        DoctorCheck {
            name: "carrier_catalog",
            status: CheckStatus::Pass,
            details: format!("{} carriers with consistent rates", catalog.len()),
        }
    } else {
        DoctorCheck {
            name: "carrier_catalog",
            status: CheckStatus::Fail,
            details: problems.join("; "),
        }
    }
}

fn check_distance_table(distances: &DistanceTable) -> DoctorCheck {
    let non_positive = distances
        .multipliers()
        .chain(std::iter::once(distances.default_multiplier()))
        .any(|multiplier| multiplier <= Decimal::ZERO);

    if non_positive {
        return DoctorCheck {
            name: "distance_table",
            status: CheckStatus::Fail,
            details: "distance table contains a non-positive multiplier".to_string(),
        };
    }

    DoctorCheck {
        name: "distance_table",
        status: CheckStatus::Pass,
        details: format!(
            "{} routes, fallback multiplier {}",
            distances.route_count(),
            distances.default_multiplier()
        ),
    }
}

fn check_sample_quote(config: &AppConfig) -> DoctorCheck {
    let runtime = StandardQuoteRuntime::from_config(config);
    let form = ShipmentForm::new("Mumbai", "Delhi", Decimal::ONE, "express");

    match runtime.quote(&form) {
        Ok(quote) => DoctorCheck {
            name: "sample_quote",
            status: CheckStatus::Pass,
            details: format!(
                "Mumbai -> Delhi priced by {} carriers, recommended {}",
                quote.breakdowns.len(),
                quote.recommendation.recommended
            ),
        },
        Err(error) => DoctorCheck {
            name: "sample_quote",
            status: CheckStatus::Fail,
            details: error.to_string(),
        },
    }
}

fn render_human(report: &DoctorReport) -> String {
    let mut lines = Vec::new();
    lines.push(report.summary.clone());

    for check in &report.checks {
        let marker = match check.status {
            CheckStatus::Pass => "ok",
            CheckStatus::Fail => "fail",
            CheckStatus::Skipped => "skip",
        };
        lines.push(format!("- [{marker}] {}: {}", check.name, check.details));
    }

    lines.join("\n")
}

fn escape_json(value: &str) -> String {
    value.replace('\\', "\\\\").replace('"', "\\\"")
}

#[cfg(test)]
mod tests {
    use shipwise_core::config::AppConfig;

    use super::{build_report, exit_code, render_human, CheckStatus};

    #[test]
    fn default_configuration_passes_every_check() {
        let report = build_report::<String>(Ok(AppConfig::default()));

        assert_eq!(report.overall_status, CheckStatus::Pass);
        assert_eq!(report.checks.len(), 4);
        assert_eq!(exit_code(&report), 0);
        assert!(render_human(&report).contains("- [ok] distance_table: 36 routes"));
    }

    #[test]
    fn config_failure_skips_sample_quote() {
        let report = build_report::<String>(Err("logging.level must be one of".to_string()));

        assert_eq!(report.overall_status, CheckStatus::Fail);
        assert_eq!(report.checks[0].status, CheckStatus::Fail);
        assert_eq!(report.checks[3].status, CheckStatus::Skipped);
        assert_eq!(exit_code(&report), 3);
    }
}
