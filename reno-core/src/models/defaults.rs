//! First-run values for the property record and the estimate table.

use chrono::{Local, NaiveDate};

use super::estimate::{EstimateCategory, EstimateItem};
use super::property::{GarageType, Property, PropertyType};

/// `M/D/YYYY`, the date layout used for inspection and report dates.
pub const INSPECTION_DATE_FORMAT: &str = "%-m/%-d/%Y";

struct CategorySeed {
    id: &'static str,
    name: &'static str,
    token: &'static str,
    /// (id, name, unit price, quantity)
    items: &'static [(&'static str, &'static str, u64, u64)],
}

// Zero entries are lines that have not been assessed yet.
const SEED: &[CategorySeed] = &[
    CategorySeed {
        id: "exterior",
        name: "Exterior",
        token: "cat-exterior",
        items: &[
            ("ext-1", "Roof", 4, 1500),
            ("ext-2", "Gutter", 1, 100),
            ("ext-3", "Foundation", 0, 0),
            ("ext-4", "Siding", 0, 0),
            ("ext-5", "Exterior Painting", 2, 1700),
        ],
    },
    CategorySeed {
        id: "interior",
        name: "Interior",
        token: "cat-interior",
        items: &[
            ("int-1", "Interior Painting", 3, 1500),
            ("int-2", "Floor", 4, 1000),
            ("int-3", "Windows", 350, 9),
            ("int-4", "Interior Door", 150, 9),
            ("int-5", "Entry Door", 1000, 1),
            ("int-6", "Back Door", 400, 1),
        ],
    },
    CategorySeed {
        id: "kitchen-bath",
        name: "Kitchen & Bath",
        token: "cat-kitchen",
        items: &[
            ("kb-1", "Kitchen Cabinet", 200, 22),
            ("kb-2", "Kitchen countertop", 45, 50),
            ("kb-3", "Appliances", 5000, 1),
            ("kb-4", "Bathroom-Master", 1000, 1),
            ("kb-5", "Bathroom 2", 500, 1),
            ("kb-6", "Bathroom 3", 0, 0),
        ],
    },
    CategorySeed {
        id: "system",
        name: "System",
        token: "cat-system",
        items: &[
            ("sys-1", "HVAC", 0, 0),
            ("sys-2", "Water Heater", 1000, 1),
            ("sys-3", "Electricity", 1000, 1),
            ("sys-4", "Plumbing", 1000, 1),
            ("sys-5", "Lights & Hardware", 2000, 1),
            ("sys-6", "Garage Door", 1500, 0),
        ],
    },
    CategorySeed {
        id: "landscaping",
        name: "Landscaping",
        token: "cat-landscaping",
        items: &[
            ("land-1", "Deck", 5000, 0),
            ("land-2", "Fence", 10, 0),
            ("land-3", "Cut Tree", 800, 0),
            ("land-4", "Sod-grass", 100, 0),
            ("land-5", "Pine Straw", 12, 20),
        ],
    },
    CategorySeed {
        id: "others",
        name: "Others",
        token: "cat-others",
        items: &[
            ("oth-1", "Dumpster", 500, 2),
            ("oth-2", "Other 1", 0, 0),
            ("oth-3", "Other 2", 0, 0),
            ("oth-4", "Other 3", 0, 0),
        ],
    },
];

/// Empty property dated today.
pub fn default_property() -> Property {
    property_inspected_on(Local::now().date_naive())
}

pub(crate) fn property_inspected_on(date: NaiveDate) -> Property {
    Property {
        address: String::new(),
        property_type: PropertyType::SingleFamily,
        year_built: String::new(),
        sqft: String::new(),
        lot_size: String::new(),
        beds: String::new(),
        baths: String::new(),
        estimated_arv: String::new(),
        garage_type: GarageType::None,
        inspection_date: date.format(INSPECTION_DATE_FORMAT).to_string(),
    }
}

/// The six seeded categories in display order.
pub fn default_categories() -> Vec<EstimateCategory> {
    SEED.iter()
        .map(|seed| EstimateCategory {
            id: seed.id.to_string(),
            name: seed.name.to_string(),
            color_var: format!("var(--{})", seed.token),
            text_var: format!("var(--{}-text)", seed.token),
            items: seed
                .items
                .iter()
                .map(|&(id, name, unit_price, qty)| EstimateItem {
                    id: id.to_string(),
                    name: name.to_string(),
                    unit_price,
                    qty,
                    conditions: String::new(),
                    note: None,
                })
                .collect(),
        })
        .collect()
}
