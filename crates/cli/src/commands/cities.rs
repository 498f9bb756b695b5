use shipwise_core::engine::distance::{DistanceTable, SUPPORTED_CITIES};

use super::CommandResult;

pub fn run() -> CommandResult {
    CommandResult::rendered(render(&DistanceTable::standard()))
}

fn render(distances: &DistanceTable) -> String {
    let mut lines = vec![format!(
        "supported cities (* has route-specific distances, others use {}x):",
        distances.default_multiplier()
    )];

    for city in SUPPORTED_CITIES {
        let marker =
            if distances.has_routes_from(city) || distances.has_routes_to(city) { "*" } else { " " };
        lines.push(format!("{marker} {city}"));
    }

    lines.join("\n")
}
