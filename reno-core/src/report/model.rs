use chrono::NaiveDate;

use crate::calculations::{EstimateTotals, format_currency, item_cost};
use crate::models::{Estimate, INSPECTION_DATE_FORMAT, Property};

pub const REPORT_TITLE: &str = "PropertyPro Renovation Report";
pub const TABLE_HEADER: [&str; 5] = ["Item", "Conditions", "Unit Price", "Qty", "Cost"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetailRow {
    pub label: String,
    pub value: String,
}

impl DetailRow {
    fn new(label: &str, value: impl Into<String>) -> Self {
        Self {
            label: label.to_string(),
            value: value.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TableRow {
    /// Upper-cased category name spanning the table.
    Category(String),
    /// Name, conditions, unit price, quantity, cost. Only the cost gets
    /// thousands separators.
    Item([String; 5]),
}

/// Everything the exported document shows, already formatted as text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Report {
    pub title: String,
    pub generated_on: String,
    pub property_rows: Vec<DetailRow>,
    pub estimate_rows: Vec<TableRow>,
    pub totals: Vec<DetailRow>,
    pub analysis: Option<String>,
}

fn or_default<'a>(value: &'a str, fallback: &'a str) -> &'a str {
    if value.is_empty() { fallback } else { value }
}

pub fn build_report(
    property: &Property,
    estimate: &Estimate,
    analysis: Option<&str>,
    generated_on: NaiveDate,
) -> Report {
    let property_rows = vec![
        DetailRow::new("Address", or_default(&property.address, "Not Provided")),
        DetailRow::new("Type", property.property_type.label()),
        DetailRow::new("Year Built", or_default(&property.year_built, "N/A")),
        DetailRow::new(
            "Dimensions",
            format!(
                "{} SqFt / {} Acres",
                or_default(&property.sqft, "0"),
                or_default(&property.lot_size, "0")
            ),
        ),
        DetailRow::new(
            "Config",
            format!(
                "{} Beds / {} Baths",
                or_default(&property.beds, "0"),
                or_default(&property.baths, "0")
            ),
        ),
        DetailRow::new("Est. ARV", or_default(&property.estimated_arv, "$0")),
    ];

    let mut estimate_rows = Vec::new();
    for category in &estimate.categories {
        estimate_rows.push(TableRow::Category(category.name.to_uppercase()));
        for item in &category.items {
            estimate_rows.push(TableRow::Item([
                item.name.clone(),
                or_default(&item.conditions, "-").to_string(),
                format!("${}", item.unit_price),
                item.qty.to_string(),
                format_currency(item_cost(item)),
            ]));
        }
    }

    let totals = EstimateTotals::for_categories(&estimate.categories);

    Report {
        title: REPORT_TITLE.to_string(),
        generated_on: format!("Generated on {}", generated_on.format(INSPECTION_DATE_FORMAT)),
        property_rows,
        estimate_rows,
        totals: vec![
            DetailRow::new("Subtotal", format_currency(totals.subtotal)),
            DetailRow::new("Contingency (15%)", format_currency(totals.contingency)),
            DetailRow::new("Total Budget", format_currency(totals.grand_total)),
        ],
        analysis: analysis.filter(|text| !text.is_empty()).map(str::to_string),
    }
}
