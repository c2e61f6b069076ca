//! Census region and division lookup for U.S. states
//!
//! Keyed by the exact label string. Abbreviated or misspelled labels get
//! no classification.

use std::collections::HashMap;
use std::sync::LazyLock;

/// Census Bureau region and division of a state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Region {
    pub region: &'static str,
    pub division: &'static str,
}

const STATE_TABLE: &[(&str, &str, &str)] = &[
    ("Alabama", "South", "East South Central"),
    ("Alaska", "West", "Pacific"),
    ("Arizona", "West", "Mountain"),
    ("Arkansas", "South", "West South Central"),
    ("California", "West", "Pacific"),
    ("Colorado", "West", "Mountain"),
    ("Connecticut", "Northeast", "New England"),
    ("Delaware", "South", "South Atlantic"),
    ("District of Columbia", "South", "South Atlantic"),
    ("Florida", "South", "South Atlantic"),
    ("Georgia", "South", "South Atlantic"),
    ("Hawaii", "West", "Pacific"),
    ("Idaho", "West", "Mountain"),
    ("Illinois", "Midwest", "East North Central"),
    ("Indiana", "Midwest", "East North Central"),
    ("Iowa", "Midwest", "West North Central"),
    ("Kansas", "Midwest", "West North Central"),
    ("Kentucky", "South", "East South Central"),
    ("Louisiana", "South", "West South Central"),
    ("Maine", "Northeast", "New England"),
    ("Maryland", "South", "South Atlantic"),
    ("Massachusetts", "Northeast", "New England"),
    ("Michigan", "Midwest", "East North Central"),
    ("Minnesota", "Midwest", "West North Central"),
    ("Mississippi", "South", "East South Central"),
    ("Missouri", "Midwest", "West North Central"),
    ("Montana", "West", "Mountain"),
    ("Nebraska", "Midwest", "West North Central"),
    ("Nevada", "West", "Mountain"),
    ("New Hampshire", "Northeast", "New England"),
    ("New Jersey", "Northeast", "Middle Atlantic"),
    ("New Mexico", "West", "Mountain"),
    ("New York", "Northeast", "Middle Atlantic"),
    ("North Carolina", "South", "South Atlantic"),
    ("North Dakota", "Midwest", "West North Central"),
    ("Ohio", "Midwest", "East North Central"),
    ("Oklahoma", "South", "West South Central"),
    ("Oregon", "West", "Pacific"),
    ("Pennsylvania", "Northeast", "Middle Atlantic"),
    ("Rhode Island", "Northeast", "New England"),
    ("South Carolina", "South", "South Atlantic"),
    ("South Dakota", "Midwest", "West North Central"),
    ("Tennessee", "South", "East South Central"),
    ("Texas", "South", "West South Central"),
    ("Utah", "West", "Mountain"),
    ("Vermont", "Northeast", "New England"),
    ("Virginia", "South", "South Atlantic"),
    ("Washington", "West", "Pacific"),
    ("West Virginia", "South", "South Atlantic"),
    ("Wisconsin", "Midwest", "East North Central"),
    ("Wyoming", "West", "Mountain"),
];

/// The 50 states plus the District of Columbia
pub const STATE_LABELS: [&str; 51] = {
    let mut labels = [""; 51];
    let mut i = 0;
    while i < STATE_TABLE.len() {
        labels[i] = STATE_TABLE[i].0;
        i += 1;
    }
    labels
};

static REGIONS: LazyLock<HashMap<&'static str, Region>> = LazyLock::new(|| {
    STATE_TABLE
        .iter()
        .map(|&(label, region, division)| (label, Region { region, division }))
        .collect()
});

/// Look up a state's region by its exact label.
pub fn region_of(label: &str) -> Option<Region> {
    REGIONS.get(label).copied()
}
