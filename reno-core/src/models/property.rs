use serde::{Deserialize, Serialize};

/// Bedroom counts offered by the intake form.
pub const BED_OPTIONS: [&str; 5] = ["1", "2", "3", "4", "5"];

/// Bathroom counts offered by the intake form.
pub const BATH_OPTIONS: [&str; 6] = ["1", "1.5", "2", "2.5", "3", "4"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum PropertyType {
    #[default]
    #[serde(rename = "single-family")]
    SingleFamily,
    #[serde(rename = "multi-family")]
    MultiFamily,
    #[serde(rename = "condo")]
    Condo,
    #[serde(rename = "commercial")]
    Commercial,
}

impl PropertyType {
    pub fn all() -> &'static [PropertyType] {
        &[
            PropertyType::SingleFamily,
            PropertyType::MultiFamily,
            PropertyType::Condo,
            PropertyType::Commercial,
        ]
    }

    /// Stored identifier, also what the analysis prompt quotes.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::SingleFamily => "single-family",
            Self::MultiFamily => "multi-family",
            Self::Condo => "condo",
            Self::Commercial => "commercial",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::SingleFamily => "Single Family",
            Self::MultiFamily => "Multi-Family",
            Self::Condo => "Condo / Townhome",
            Self::Commercial => "Commercial",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        Self::all().iter().copied().find(|t| t.as_str() == s)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum GarageType {
    #[default]
    #[serde(rename = "none")]
    None,
    #[serde(rename = "1-car")]
    OneCar,
    #[serde(rename = "2-car")]
    TwoCar,
    #[serde(rename = "3-car")]
    ThreeCar,
    #[serde(rename = "detached")]
    Detached,
    #[serde(rename = "carport")]
    Carport,
}

impl GarageType {
    pub fn all() -> &'static [GarageType] {
        &[
            GarageType::None,
            GarageType::OneCar,
            GarageType::TwoCar,
            GarageType::ThreeCar,
            GarageType::Detached,
            GarageType::Carport,
        ]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::None => "none",
            Self::OneCar => "1-car",
            Self::TwoCar => "2-car",
            Self::ThreeCar => "3-car",
            Self::Detached => "detached",
            Self::Carport => "carport",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::None => "None",
            Self::OneCar => "1-Car Attached",
            Self::TwoCar => "2-Car Attached",
            Self::ThreeCar => "3-Car Attached",
            Self::Detached => "Detached",
            Self::Carport => "Carport",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        Self::all().iter().copied().find(|g| g.as_str() == s)
    }
}

/// The single property under assessment.
///
/// Every numeric-looking field is kept as the text the user typed. Nothing is
/// rejected at entry; consumers parse what they need and tolerate garbage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Property {
    pub address: String,
    #[serde(rename = "type")]
    pub property_type: PropertyType,
    pub year_built: String,
    pub sqft: String,
    pub lot_size: String,
    pub beds: String,
    pub baths: String,
    #[serde(rename = "estimatedARV")]
    pub estimated_arv: String,
    pub garage_type: GarageType,
    pub inspection_date: String,
}

/// Free-text fields of a [`Property`], addressable by the intake form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PropertyField {
    Address,
    YearBuilt,
    Sqft,
    LotSize,
    Beds,
    Baths,
    EstimatedArv,
    InspectionDate,
}

impl PropertyField {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Address => "Property Address",
            Self::YearBuilt => "Year Built",
            Self::Sqft => "Square Footage",
            Self::LotSize => "Lot Size (Acres)",
            Self::Beds => "Bedrooms",
            Self::Baths => "Bathrooms",
            Self::EstimatedArv => "Estimated ARV",
            Self::InspectionDate => "Inspection Date",
        }
    }
}

/// A single change to the property record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PropertyEdit {
    Text(PropertyField, String),
    Type(PropertyType),
    Garage(GarageType),
}

impl Property {
    pub fn field(&self, field: PropertyField) -> &str {
        match field {
            PropertyField::Address => &self.address,
            PropertyField::YearBuilt => &self.year_built,
            PropertyField::Sqft => &self.sqft,
            PropertyField::LotSize => &self.lot_size,
            PropertyField::Beds => &self.beds,
            PropertyField::Baths => &self.baths,
            PropertyField::EstimatedArv => &self.estimated_arv,
            PropertyField::InspectionDate => &self.inspection_date,
        }
    }

    fn field_mut(&mut self, field: PropertyField) -> &mut String {
        match field {
            PropertyField::Address => &mut self.address,
            PropertyField::YearBuilt => &mut self.year_built,
            PropertyField::Sqft => &mut self.sqft,
            PropertyField::LotSize => &mut self.lot_size,
            PropertyField::Beds => &mut self.beds,
            PropertyField::Baths => &mut self.baths,
            PropertyField::EstimatedArv => &mut self.estimated_arv,
            PropertyField::InspectionDate => &mut self.inspection_date,
        }
    }

    /// Applies `edit`, returning whether anything changed.
    pub fn apply(&mut self, edit: PropertyEdit) -> bool {
        match edit {
            PropertyEdit::Text(field, value) => {
                let slot = self.field_mut(field);
                if *slot == value {
                    return false;
                }
                *slot = value;
            }
            PropertyEdit::Type(t) => {
                if self.property_type == t {
                    return false;
                }
                self.property_type = t;
            }
            PropertyEdit::Garage(g) => {
                if self.garage_type == g {
                    return false;
                }
                self.garage_type = g;
            }
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::models::default_property;

    #[test]
    fn property_serializes_with_stored_field_names() {
        let mut p = default_property();
        p.estimated_arv = "$200,000".to_string();
        p.property_type = PropertyType::Condo;
        p.garage_type = GarageType::TwoCar;

        let json: serde_json::Value = serde_json::to_value(&p).unwrap();

        assert_eq!(json["type"], "condo");
        assert_eq!(json["garageType"], "2-car");
        assert_eq!(json["estimatedARV"], "$200,000");
        assert!(json.get("yearBuilt").is_some());
        assert!(json.get("lotSize").is_some());
        assert!(json.get("inspectionDate").is_some());
    }

    #[test]
    fn property_type_parse_matches_as_str() {
        for t in PropertyType::all() {
            assert_eq!(PropertyType::parse(t.as_str()), Some(*t));
        }
        assert_eq!(PropertyType::parse("castle"), None);
    }

    #[test]
    fn garage_type_labels_match_form_options() {
        let labels: Vec<_> = GarageType::all().iter().map(|g| g.label()).collect();
        assert_eq!(
            labels,
            vec![
                "None",
                "1-Car Attached",
                "2-Car Attached",
                "3-Car Attached",
                "Detached",
                "Carport"
            ]
        );
    }

    #[test]
    fn apply_text_edit_keeps_malformed_input() {
        let mut p = default_property();

        let changed = p.apply(PropertyEdit::Text(PropertyField::YearBuilt, "nineteen-ten".into()));

        assert!(changed);
        assert_eq!(p.year_built, "nineteen-ten");
    }

    #[test]
    fn apply_reports_no_change_for_identical_value() {
        let mut p = default_property();

        assert!(!p.apply(PropertyEdit::Type(PropertyType::SingleFamily)));
        assert!(!p.apply(PropertyEdit::Garage(GarageType::None)));
        assert!(!p.apply(PropertyEdit::Text(PropertyField::Address, String::new())));
    }

    #[test]
    fn field_reads_back_what_apply_wrote() {
        let mut p = default_property();
        p.apply(PropertyEdit::Text(PropertyField::Baths, "2.5".into()));

        assert_eq!(p.field(PropertyField::Baths), "2.5");
    }
}
