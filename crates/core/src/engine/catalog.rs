use rust_decimal::Decimal;

use crate::domain::carrier::{CarrierName, CarrierProfile, SpeedSurcharges};

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CarrierCatalog {
    carriers: Vec<CarrierProfile>,
}

impl CarrierCatalog {
    pub fn new(carriers: Vec<CarrierProfile>) -> Self {
        Self { carriers }
    }

    /// The five domestic carriers quoted by default, in display order.
    pub fn standard() -> Self {
        Self::new(vec![
            carrier(
                "BlueDart Express",
                180,
                28,
                [18, 26],
                96,
                &[
                    "Real-time tracking",
                    "Insurance coverage",
                    "Signature confirmation",
                    "Weekend delivery",
                ],
                true,
            ),
            carrier(
                "DTDC Courier",
                140,
                22,
                [16, 23],
                89,
                &["Affordable pricing", "COD available", "Bulk discounts", "SMS notifications"],
                false,
            ),
            carrier(
                "FedEx India",
                220,
                32,
                [19, 29],
                98,
                &["Global network", "Express options", "Customs clearance", "Premium packaging"],
                true,
            ),
            carrier(
                "Ecom Express",
                120,
                20,
                [15, 21],
                87,
                &[
                    "E-commerce optimized",
                    "Bulk shipping",
                    "Returns management",
                    "API integration",
                ],
                false,
            ),
            carrier(
                "Delhivery",
                130,
                24,
                [17, 24],
                91,
                &["Technology driven", "Flexible delivery", "Warehousing", "Last mile expertise"],
                false,
            ),
        ])
    }

    pub fn find(&self, name: &str) -> Option<&CarrierProfile> {
        self.carriers.iter().find(|carrier| carrier.name.as_str().eq_ignore_ascii_case(name.trim()))
    }

    pub fn iter(&self) -> impl Iterator<Item = &CarrierProfile> {
        self.carriers.iter()
    }

    pub fn len(&self) -> usize {
        self.carriers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.carriers.is_empty()
    }
}

// Surcharges are given in tenths for express and overnight; standard is always 1.
fn carrier(
    name: &str,
    base_rate: i64,
    weight_multiplier: i64,
    [express, overnight]: [i64; 2],
    reliability: u8,
    features: &[&str],
    premium: bool,
) -> CarrierProfile {
    CarrierProfile {
        name: CarrierName(name.to_owned()),
        base_rate: Decimal::from(base_rate),
        weight_multiplier: Decimal::from(weight_multiplier),
        speed_surcharges: SpeedSurcharges {
            standard: Decimal::ONE,
            express: Decimal::new(express, 1),
            overnight: Decimal::new(overnight, 1),
        },
        reliability,
        features: features.iter().map(|feature| (*feature).to_owned()).collect(),
        premium,
    }
}
