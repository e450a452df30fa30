use egui::Ui;
use reno_core::models::{
    BATH_OPTIONS, BED_OPTIONS, GarageType, PropertyEdit, PropertyField, PropertyType,
};

use crate::app::RenoApp;

pub struct IntakeScreen;

impl IntakeScreen {
    const GROUP_WIDTH: f32 = 560.0;
    const LABEL_WIDTH: f32 = 170.0;
    const INPUT_WIDTH: f32 = 320.0;

    pub fn show(app: &mut RenoApp, ui: &mut Ui) {
        // Collected first so the property borrow ends before saving.
        let mut edits: Vec<PropertyEdit> = Vec::new();
        let property = app.session.property().clone();

        ui.heading("Property Details");
        ui.label("Comprehensive property intake for investors");
        ui.separator();

        egui::ScrollArea::vertical().show(ui, |ui| {
            let group_width = ui.available_width().min(Self::GROUP_WIDTH);

            ui.allocate_ui(egui::vec2(group_width, 0.0), |ui| {
                ui.group(|ui| {
                    ui.set_min_width(group_width - 20.0);
                    egui::Grid::new("property_grid")
                        .num_columns(2)
                        .spacing([10.0, 8.0])
                        .show(ui, |ui| {
                            Self::text_row(
                                ui,
                                PropertyField::Address,
                                property.field(PropertyField::Address),
                                "123 Investment St, City, State",
                                &mut edits,
                            );

                            Self::label(ui, "Property Type");
                            egui::ComboBox::from_id_salt("property_type")
                                .width(200.0)
                                .selected_text(property.property_type.label())
                                .show_ui(ui, |ui| {
                                    for kind in PropertyType::all() {
                                        let selected = property.property_type == *kind;
                                        if ui.selectable_label(selected, kind.label()).clicked()
                                            && !selected
                                        {
                                            edits.push(PropertyEdit::Type(*kind));
                                        }
                                    }
                                });
                            ui.end_row();

                            Self::text_row(
                                ui,
                                PropertyField::YearBuilt,
                                property.field(PropertyField::YearBuilt),
                                "e.g. 1985",
                                &mut edits,
                            );
                            Self::text_row(
                                ui,
                                PropertyField::Sqft,
                                property.field(PropertyField::Sqft),
                                "e.g. 2,400",
                                &mut edits,
                            );
                            Self::text_row(
                                ui,
                                PropertyField::LotSize,
                                property.field(PropertyField::LotSize),
                                "0.25",
                                &mut edits,
                            );

                            Self::label(ui, "Configuration");
                            ui.horizontal(|ui| {
                                Self::option_combo(
                                    ui,
                                    PropertyField::Beds,
                                    "Beds",
                                    property.field(PropertyField::Beds),
                                    &BED_OPTIONS,
                                    &mut edits,
                                );
                                Self::option_combo(
                                    ui,
                                    PropertyField::Baths,
                                    "Baths",
                                    property.field(PropertyField::Baths),
                                    &BATH_OPTIONS,
                                    &mut edits,
                                );
                            });
                            ui.end_row();

                            Self::text_row(
                                ui,
                                PropertyField::EstimatedArv,
                                property.field(PropertyField::EstimatedArv),
                                "$0.00",
                                &mut edits,
                            );

                            Self::label(ui, "Garage Type");
                            egui::ComboBox::from_id_salt("garage_type")
                                .width(200.0)
                                .selected_text(property.garage_type.label())
                                .show_ui(ui, |ui| {
                                    for garage in GarageType::all() {
                                        let selected = property.garage_type == *garage;
                                        if ui.selectable_label(selected, garage.label()).clicked()
                                            && !selected
                                        {
                                            edits.push(PropertyEdit::Garage(*garage));
                                        }
                                    }
                                });
                            ui.end_row();

                            Self::text_row(
                                ui,
                                PropertyField::InspectionDate,
                                property.field(PropertyField::InspectionDate),
                                "M/D/YYYY",
                                &mut edits,
                            );
                        });
                });
            });

            ui.add_space(20.0);

            ui.horizontal(|ui| {
                if ui.button("Proceed to Estimate ➡").clicked() {
                    app.proceed();
                }
                if ui.button("Reset").clicked() {
                    app.request_reset();
                }
            });
        });

        for edit in edits {
            app.edit_property(edit);
        }
    }

    fn label(ui: &mut Ui, text: &str) {
        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            ui.set_min_width(Self::LABEL_WIDTH);
            ui.label(egui::RichText::new(format!("{text}:")).strong());
        });
    }

    fn text_row(
        ui: &mut Ui,
        field: PropertyField,
        current: &str,
        hint: &str,
        edits: &mut Vec<PropertyEdit>,
    ) {
        Self::label(ui, field.label());
        let mut value = current.to_string();
        let response = ui.add(
            egui::TextEdit::singleline(&mut value)
                .desired_width(Self::INPUT_WIDTH)
                .hint_text(hint),
        );
        if response.changed() {
            edits.push(PropertyEdit::Text(field, value));
        }
        ui.end_row();
    }

    fn option_combo(
        ui: &mut Ui,
        field: PropertyField,
        placeholder: &str,
        current: &str,
        options: &[&str],
        edits: &mut Vec<PropertyEdit>,
    ) {
        let selected_text = if current.is_empty() {
            placeholder.to_string()
        } else {
            format!("{current} {placeholder}")
        };
        egui::ComboBox::from_id_salt(field.label())
            .width(100.0)
            .selected_text(selected_text)
            .show_ui(ui, |ui| {
                for option in options {
                    let selected = current == *option;
                    if ui.selectable_label(selected, *option).clicked() && !selected {
                        edits.push(PropertyEdit::Text(field, option.to_string()));
                    }
                }
            });
    }
}
