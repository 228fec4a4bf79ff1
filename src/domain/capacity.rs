use std::collections::BTreeMap;

use rust_decimal::Decimal;

use crate::error::{DamLevelsError, Result};

pub const BIG_SIX_DAMS: &str = "Big Six Dams";
pub const SMALL_DAMS: &str = "Small Dams";
pub const ALL_DAMS: &str = "All Dams";

/// Capacities in Ml of the six largest dams of the Western Cape Water
/// Supply System.
///
/// Source: https://en.wikipedia.org/wiki/Western_Cape_Water_Supply_System
pub const BIG_SIX_CAPACITY: [(&str, u32); 6] = [
    ("Theewaterskloof", 480_188),
    ("Wemmershoek", 58_644),
    ("Steensbras Lower", 33_517),
    ("Steensbras Upper", 31_757),
    ("Voëlvlei", 164_095),
    ("Berg River", 130_010),
];

/// Capacities in Ml of the small dams, same source as the big six.
pub const SMALL_CAPACITY: [(&str, u32); 7] = [
    ("Hely-Hutchinson", 925),
    ("Woodhead", 954),
    ("Victoria", 128),
    ("De Villiers", 243),
    ("Kleinplaats", 1_368),
    ("Lewis Gay", 182),
    ("Land-en-Zeezicht", 451),
];

/// Maximum storage per dam plus the aggregate groups.
#[derive(Debug, Clone, PartialEq)]
pub struct CapacityTable {
    capacity: BTreeMap<String, Decimal>,
}

impl CapacityTable {
    pub fn new() -> Self {
        let mut capacity = BTreeMap::new();

        let big_six = Self::insert_group(&mut capacity, &BIG_SIX_CAPACITY);
        let small = Self::insert_group(&mut capacity, &SMALL_CAPACITY);

        capacity.insert(String::from(BIG_SIX_DAMS), big_six);
        capacity.insert(String::from(SMALL_DAMS), small);
        capacity.insert(String::from(ALL_DAMS), big_six + small);

        Self { capacity }
    }

    fn insert_group(capacity: &mut BTreeMap<String, Decimal>, group: &[(&str, u32)]) -> Decimal {
        let mut total = Decimal::ZERO;
        for (name, ml) in group {
            let ml = Decimal::from(*ml);
            capacity.insert(name.to_string(), ml);
            total += ml;
        }
        total
    }

    pub fn capacity_of(&self, name: &str) -> Result<Decimal> {
        self.capacity
            .get(name)
            .copied()
            .ok_or_else(|| DamLevelsError::UnknownDam {
                name: name.to_owned(),
            })
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, Decimal)> {
        self.capacity.iter().map(|(name, ml)| (name.as_str(), *ml))
    }

    pub fn len(&self) -> usize {
        self.capacity.len()
    }

    pub fn is_empty(&self) -> bool {
        self.capacity.is_empty()
    }
}

impl Default for CapacityTable {
    fn default() -> Self {
        Self::new()
    }
}
