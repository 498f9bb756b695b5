use crate::domain::quote::{CarrierHighlight, CostBreakdown, QuoteInsights};
use crate::engine::recommendation::{cheapest, fastest};

impl QuoteInsights {
    pub fn from_breakdowns(breakdowns: &[CostBreakdown]) -> Option<Self> {
        let cheapest = cheapest(breakdowns)?;
        let fastest = fastest(breakdowns)?;
        let most_reliable = most_reliable(breakdowns)?;

        Some(Self {
            cheapest: CarrierHighlight {
                carrier: cheapest.carrier.clone(),
                detail: cheapest.total_cost.to_string(),
            },
            fastest: CarrierHighlight {
                carrier: fastest.carrier.clone(),
                detail: fastest.eta.to_string(),
            },
            most_reliable: CarrierHighlight {
                carrier: most_reliable.carrier.clone(),
                detail: format!("{}%", most_reliable.reliability),
            },
        })
    }
}

/// Highest reliability; the earliest entry wins ties.
pub fn most_reliable(breakdowns: &[CostBreakdown]) -> Option<&CostBreakdown> {
    breakdowns.iter().fold(None, |best: Option<&CostBreakdown>, candidate| match best {
        Some(current) if current.reliability >= candidate.reliability => Some(current),
        _ => Some(candidate),
    })
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;

    use super::most_reliable;
    use crate::domain::quote::QuoteInsights;
    use crate::domain::shipment::{ShipmentRequest, SpeedTier};
    use crate::engine::catalog::CarrierCatalog;
    use crate::engine::distance::DistanceTable;
    use crate::engine::pricing::compute_costs;

    #[test]
    fn standard_quote_highlights() {
        let request = ShipmentRequest {
            origin_city: "Mumbai".to_owned(),
            destination_city: "Pune".to_owned(),
            weight_kg: Decimal::from(2),
            speed_tier: SpeedTier::Standard,
        };
        let breakdowns =
            compute_costs(&request, &CarrierCatalog::standard(), &DistanceTable::standard());

        let insights = QuoteInsights::from_breakdowns(&breakdowns).expect("insights");
        assert_eq!(insights.cheapest.carrier.as_str(), "Ecom Express");
        assert_eq!(insights.cheapest.detail, "192");
        assert_eq!(insights.fastest.carrier.as_str(), "BlueDart Express");
        assert_eq!(insights.fastest.detail, "5 days");
        assert_eq!(insights.most_reliable.carrier.as_str(), "FedEx India");
        assert_eq!(insights.most_reliable.detail, "98%");
    }

    #[test]
    fn empty_set_has_no_insights() {
        assert!(QuoteInsights::from_breakdowns(&[]).is_none());
        assert!(most_reliable(&[]).is_none());
    }
}
