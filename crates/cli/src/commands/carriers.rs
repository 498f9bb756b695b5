use shipwise_core::domain::carrier::CarrierProfile;
use shipwise_core::engine::catalog::CarrierCatalog;

use super::{to_json, CommandResult};

pub fn run(json_output: bool) -> CommandResult {
    let catalog = CarrierCatalog::standard();
    let carriers: Vec<&CarrierProfile> = catalog.iter().collect();

    if json_output {
        return to_json("carriers", &carriers);
    }

    let mut lines = vec![format!("{} carriers:", carriers.len())];
    lines.extend(carriers.into_iter().map(render_carrier));
    CommandResult::rendered(lines.join("\n"))
}

fn render_carrier(carrier: &CarrierProfile) -> String {
    let tier = if carrier.premium { ", premium" } else { "" };
    format!(
        "- {}: base {} + {}/kg, express x{}, overnight x{}, reliability {}%{tier}\n    {}",
        carrier.name,
        carrier.base_rate,
        carrier.weight_multiplier,
        carrier.speed_surcharges.express,
        carrier.speed_surcharges.overnight,
        carrier.reliability,
        carrier.features.join(", "),
    )
}
