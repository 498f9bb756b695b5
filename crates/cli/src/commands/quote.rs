use std::str::FromStr;

use clap::Args;
use rust_decimal::Decimal;
use shipwise_core::domain::quote::{CostBreakdown, ShipmentQuote};
use shipwise_core::domain::shipment::ShipmentForm;
use shipwise_core::engine::{QuoteRuntime, StandardQuoteRuntime};
use shipwise_core::errors::ApplicationError;

use super::{load_config, to_json, CommandResult, EXIT_CATALOG, EXIT_VALIDATION};

const COMMAND: &str = "quote";

#[derive(Clone, Debug, Args)]
pub struct QuoteArgs {
    #[arg(long = "from", help = "Pickup city")]
    pub origin: Option<String>,
    #[arg(long = "to", help = "Destination city")]
    pub destination: Option<String>,
    #[arg(long, help = "Package weight in kilograms")]
    pub weight: Option<String>,
    #[arg(long, help = "Delivery speed: standard, express or overnight")]
    pub speed: Option<String>,
    #[arg(long, default_value = "catalog", help = "Row order: cost, eta, reliability or catalog")]
    pub sort: SortOrder,
    #[arg(long, help = "Emit machine-readable JSON output")]
    pub json: bool,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SortOrder {
    Cost,
    Eta,
    Reliability,
    #[default]
    Catalog,
}

impl FromStr for SortOrder {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "cost" => Ok(Self::Cost),
            "eta" => Ok(Self::Eta),
            "reliability" => Ok(Self::Reliability),
            "catalog" => Ok(Self::Catalog),
            other => Err(format!(
                "unsupported sort order `{other}` (expected cost|eta|reliability|catalog)"
            )),
        }
    }
}

pub fn run(args: &QuoteArgs) -> CommandResult {
    let config = match load_config(COMMAND) {
        Ok(config) => config,
        Err(result) => return result,
    };

    let runtime = StandardQuoteRuntime::from_config(&config);
    let form = build_form(args);

    let mut quote = match runtime.quote(&form) {
        Ok(quote) => quote,
        Err(error) => return failure(ApplicationError::from(error)),
    };
    sort_breakdowns(&mut quote.breakdowns, args.sort);

    if args.json {
        return to_json(COMMAND, &quote);
    }
    CommandResult::rendered(render_human(&quote))
}

/// An unparseable weight is passed on as absent so the validator reports it.
fn build_form(args: &QuoteArgs) -> ShipmentForm {
    ShipmentForm {
        origin_city: args.origin.clone().unwrap_or_default(),
        destination_city: args.destination.clone().unwrap_or_default(),
        weight_kg: args.weight.as_deref().and_then(|raw| Decimal::from_str(raw.trim()).ok()),
        speed_tier: args.speed.clone(),
    }
}

fn failure(error: ApplicationError) -> CommandResult {
    let exit_code = match error.error_class() {
        "validation" => EXIT_VALIDATION,
        _ => EXIT_CATALOG,
    };
    CommandResult::failure_with_code(
        COMMAND,
        error.error_class(),
        error.violation_code(),
        error.user_message(),
        exit_code,
    )
}

/// Stable sort, so ties keep catalog order.
pub fn sort_breakdowns(breakdowns: &mut [CostBreakdown], order: SortOrder) {
    match order {
        SortOrder::Cost => breakdowns.sort_by_key(|breakdown| breakdown.total_cost),
        SortOrder::Eta => breakdowns.sort_by_key(|breakdown| breakdown.eta.days()),
        SortOrder::Reliability => {
            breakdowns.sort_by(|left, right| right.reliability.cmp(&left.reliability))
        }
        SortOrder::Catalog => {}
    }
}

fn render_human(quote: &ShipmentQuote) -> String {
    let request = &quote.request;
    let mut lines = vec![format!(
        "{} -> {}, {} kg, {}",
        request.origin_city,
        request.destination_city,
        request.weight_kg.normalize(),
        request.speed_tier
    )];

    lines.push(format!(
        "{:<18} {:>7} {:>10} {:>12}   {}",
        "carrier", "total", "eta", "reliability", "breakdown"
    ));
    for breakdown in &quote.breakdowns {
        let marker = if breakdown.carrier == quote.recommendation.recommended { "*" } else { " " };
        lines.push(format!(
            "{marker}{:<17} {:>7} {:>10} {:>11}%   ({} + {} + {}) x {}",
            breakdown.carrier.as_str(),
            breakdown.total_cost,
            breakdown.eta.to_string(),
            breakdown.reliability,
            breakdown.base_rate,
            breakdown.weight_charges,
            breakdown.speed_surcharge,
            breakdown.distance_multiplier,
        ));
    }

    let recommendation = &quote.recommendation;
    lines.push(String::new());
    lines.push(format!("recommended: {}", recommendation.recommended));
    lines.push(format!("  {}", recommendation.reason_text));
    if let Some(cheapest) = &recommendation.cheapest_alternative {
        lines.push(format!("  cheaper alternative: {cheapest}"));
    }
    if let Some(fastest) = &recommendation.fastest_alternative {
        lines.push(format!("  faster alternative: {fastest}"));
    }

    let insights = &quote.insights;
    lines.push(format!(
        "cheapest: {} ({}) | fastest: {} ({}) | most reliable: {} ({})",
        insights.cheapest.carrier,
        insights.cheapest.detail,
        insights.fastest.carrier,
        insights.fastest.detail,
        insights.most_reliable.carrier,
        insights.most_reliable.detail,
    ));

    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;
    use shipwise_core::domain::shipment::ShipmentForm;
    use shipwise_core::engine::{QuoteRuntime, StandardQuoteRuntime};

    use super::{build_form, render_human, sort_breakdowns, QuoteArgs, SortOrder};

    fn args(weight: &str) -> QuoteArgs {
        QuoteArgs {
            origin: Some("Mumbai".to_owned()),
            destination: Some("Pune".to_owned()),
            weight: Some(weight.to_owned()),
            speed: Some("standard".to_owned()),
            sort: SortOrder::Catalog,
            json: false,
        }
    }

    #[test]
    fn unparseable_weight_becomes_missing() {
        let form = build_form(&args("two"));
        assert_eq!(form.weight_kg, None);

        let form = build_form(&args(" 2.5 "));
        assert_eq!(form.weight_kg, Some(Decimal::new(25, 1)));
    }

    #[test]
    fn sort_order_parses_case_insensitively() {
        assert_eq!("Cost".parse::<SortOrder>(), Ok(SortOrder::Cost));
        assert_eq!(" eta ".parse::<SortOrder>(), Ok(SortOrder::Eta));
        assert!("price".parse::<SortOrder>().is_err());
    }

    #[test]
    fn sort_orders_are_stable() {
        let quote = StandardQuoteRuntime::default()
            .quote(&ShipmentForm::new("Mumbai", "Pune", Decimal::from(2), "standard"))
            .expect("valid shipment");

        let mut by_cost = quote.breakdowns.clone();
        sort_breakdowns(&mut by_cost, SortOrder::Cost);
        let names: Vec<&str> = by_cost.iter().map(|b| b.carrier.as_str()).collect();
        assert_eq!(
            names,
            ["Ecom Express", "Delhivery", "DTDC Courier", "BlueDart Express", "FedEx India"]
        );

        let mut by_reliability = quote.breakdowns.clone();
        sort_breakdowns(&mut by_reliability, SortOrder::Reliability);
        assert_eq!(by_reliability[0].carrier.as_str(), "FedEx India");
        assert_eq!(by_reliability[4].carrier.as_str(), "Ecom Express");

        let mut by_catalog = quote.breakdowns.clone();
        sort_breakdowns(&mut by_catalog, SortOrder::Catalog);
        assert_eq!(by_catalog, quote.breakdowns);
    }

    #[test]
    fn human_output_marks_recommendation() {
        let quote = StandardQuoteRuntime::default()
            .quote(&ShipmentForm::new("Mumbai", "Pune", Decimal::from(2), "standard"))
            .expect("valid shipment");

        let output = render_human(&quote);
        assert!(output.starts_with("Mumbai -> Pune, 2 kg, standard"));
        assert!(output.contains("*Ecom Express"));
        assert!(output.contains("recommended: Ecom Express"));
        assert!(output.contains("most reliable: FedEx India (98%)"));
    }
}
