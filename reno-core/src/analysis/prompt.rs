use crate::calculations::{format_currency, grand_subtotal};
use crate::models::{Estimate, Property, PropertyType};

/// The fields the prompt is built from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalysisInput {
    pub address: String,
    pub year_built: String,
    pub property_type: PropertyType,
    pub sqft: String,
    pub estimated_arv: String,
    /// Grand subtotal, before contingency.
    pub total_cost: u64,
}

impl AnalysisInput {
    pub fn new(property: &Property, estimate: &Estimate) -> Self {
        Self {
            address: property.address.clone(),
            year_built: property.year_built.clone(),
            property_type: property.property_type,
            sqft: property.sqft.clone(),
            estimated_arv: property.estimated_arv.clone(),
            total_cost: grand_subtotal(&estimate.categories),
        }
    }
}

pub fn build_prompt(input: &AnalysisInput) -> String {
    format!(
        "Analyze this property investment opportunity:\n\
         \x20   Property: {address}\n\
         \x20   Year Built: {year_built}\n\
         \x20   Type: {property_type}\n\
         \x20   SqFt: {sqft}\n\
         \x20   Estimated After Repair Value (ARV): {arv}\n\
         \x20   Current Estimated Renovation Cost: {cost}\n\
         \n\
         \x20   Provide a concise summary including:\n\
         \x20   1. Potential red flags for this age of property.\n\
         \x20   2. ROI suggestion (is the renovation budget reasonable compared to ARV?).\n\
         \x20   3. Three missing renovation items commonly needed for this property type.",
        address = input.address,
        year_built = input.year_built,
        property_type = input.property_type.as_str(),
        sqft = input.sqft,
        arv = input.estimated_arv,
        cost = format_currency(input.total_cost),
    )
}
