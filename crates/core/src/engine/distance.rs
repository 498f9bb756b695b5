use std::collections::HashMap;

use rust_decimal::Decimal;

/// Multiplier used for any city pair without an explicit entry.
pub const DEFAULT_DISTANCE_MULTIPLIER: Decimal = Decimal::from_parts(16, 0, 0, false, 1);

/// Cities offered to users. Only the first six have explicit distance rows.
pub const SUPPORTED_CITIES: [&str; 20] = [
    "Mumbai",
    "Delhi",
    "Bangalore",
    "Chennai",
    "Kolkata",
    "Pune",
    "Hyderabad",
    "Ahmedabad",
    "Jaipur",
    "Lucknow",
    "Kanpur",
    "Nagpur",
    "Indore",
    "Thane",
    "Bhopal",
    "Visakhapatnam",
    "Pimpri-Chinchwad",
    "Patna",
    "Vadodara",
    "Ghaziabad",
];

// Tenths, keyed origin -> destination. Declared per origin; not mirrored.
const STANDARD_ROUTES: &[(&str, &[(&str, i64)])] = &[
    (
        "mumbai",
        &[
            ("delhi", 18),
            ("bangalore", 15),
            ("chennai", 16),
            ("kolkata", 21),
            ("pune", 12),
            ("hyderabad", 14),
        ],
    ),
    (
        "delhi",
        &[
            ("mumbai", 18),
            ("bangalore", 19),
            ("chennai", 22),
            ("kolkata", 17),
            ("pune", 16),
            ("hyderabad", 15),
        ],
    ),
    (
        "bangalore",
        &[
            ("mumbai", 15),
            ("delhi", 19),
            ("chennai", 13),
            ("kolkata", 23),
            ("pune", 14),
            ("hyderabad", 12),
        ],
    ),
    (
        "chennai",
        &[
            ("mumbai", 16),
            ("delhi", 22),
            ("bangalore", 13),
            ("kolkata", 19),
            ("pune", 15),
            ("hyderabad", 13),
        ],
    ),
    (
        "kolkata",
        &[
            ("mumbai", 21),
            ("delhi", 17),
            ("bangalore", 23),
            ("chennai", 19),
            ("pune", 20),
            ("hyderabad", 18),
        ],
    ),
    (
        "pune",
        &[
            ("mumbai", 12),
            ("delhi", 16),
            ("bangalore", 14),
            ("chennai", 15),
            ("kolkata", 20),
            ("hyderabad", 13),
        ],
    ),
];

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DistanceTable {
    routes: HashMap<String, HashMap<String, Decimal>>,
    default_multiplier: Decimal,
}

impl Default for DistanceTable {
    fn default() -> Self {
        Self::standard()
    }
}

impl DistanceTable {
    pub fn new(default_multiplier: Decimal) -> Self {
        Self { routes: HashMap::new(), default_multiplier }
    }

    /// The built-in route table with the default fallback of `1.6`.
    pub fn standard() -> Self {
        Self::standard_with_default(DEFAULT_DISTANCE_MULTIPLIER)
    }

    pub fn standard_with_default(default_multiplier: Decimal) -> Self {
        let mut table = Self::new(default_multiplier);
        for (origin, destinations) in STANDARD_ROUTES {
            for (destination, tenths) in destinations.iter() {
                table.insert(origin, destination, Decimal::new(*tenths, 1));
            }
        }
        table
    }

    /// Adds or replaces the multiplier for one ordered pair.
    pub fn insert(&mut self, origin: &str, destination: &str, multiplier: Decimal) {
        self.routes.entry(normalize(origin)).or_default().insert(normalize(destination), multiplier);
    }

    pub fn default_multiplier(&self) -> Decimal {
        self.default_multiplier
    }

    pub fn lookup(&self, origin: &str, destination: &str) -> Decimal {
        self.explicit(origin, destination).unwrap_or(self.default_multiplier)
    }

    /// The declared multiplier for the ordered pair, without the fallback.
    pub fn explicit(&self, origin: &str, destination: &str) -> Option<Decimal> {
        self.routes
            .get(&normalize(origin))
            .and_then(|destinations| destinations.get(&normalize(destination)))
            .copied()
    }

    pub fn has_routes_from(&self, origin: &str) -> bool {
        self.routes.contains_key(&normalize(origin))
    }

    pub fn has_routes_to(&self, destination: &str) -> bool {
        let destination = normalize(destination);
        self.routes.values().any(|destinations| destinations.contains_key(&destination))
    }

    pub fn route_count(&self) -> usize {
        self.routes.values().map(HashMap::len).sum()
    }

    pub fn multipliers(&self) -> impl Iterator<Item = Decimal> + '_ {
        self.routes.values().flat_map(|destinations| destinations.values().copied())
    }
}

fn normalize(city: &str) -> String {
    city.trim().to_lowercase()
}
