use egui::{RichText, Ui};
use reno_core::calculations::{category_subtotal, format_currency, item_cost};
use reno_core::models::ItemEdit;

use crate::app::RenoApp;
use crate::widgets::whole_number_field;

pub struct EstimateScreen;

/// One pending change: category id, item id, edit.
type PendingEdit = (String, String, ItemEdit);

impl EstimateScreen {
    const GROUP_WIDTH: f32 = 760.0;
    const PRICE_WIDTH: f32 = 90.0;
    const QTY_WIDTH: f32 = 50.0;
    const CONDITIONS_WIDTH: f32 = 220.0;

    pub fn show(app: &mut RenoApp, ui: &mut Ui) {
        let ctx = ui.ctx().clone();
        let mut edits: Vec<PendingEdit> = Vec::new();
        let totals = app.session.totals();

        ui.heading("Cost Estimator");
        ui.separator();

        egui::ScrollArea::vertical().show(ui, |ui| {
            let group_width = ui.available_width().min(Self::GROUP_WIDTH);

            for category in &app.session.estimate().categories {
                ui.allocate_ui(egui::vec2(group_width, 0.0), |ui| {
                    ui.group(|ui| {
                        ui.set_min_width(group_width - 20.0);
                        ui.horizontal(|ui| {
                            ui.heading(&category.name);
                            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                                ui.label(
                                    RichText::new(format_currency(category_subtotal(category)))
                                        .strong(),
                                );
                                ui.label("Total:");
                            });
                        });
                        ui.add_space(5.0);

                        egui::Grid::new(("items", &category.id))
                            .num_columns(5)
                            .spacing([10.0, 6.0])
                            .striped(true)
                            .show(ui, |ui| {
                                ui.label(RichText::new("Item").small().strong());
                                ui.label(RichText::new("Unit Price ($)").small().strong());
                                ui.label(RichText::new("Quantity").small().strong());
                                ui.label(RichText::new("Conditions").small().strong());
                                ui.label(RichText::new("Cost").small().strong());
                                ui.end_row();

                                for item in &category.items {
                                    ui.vertical(|ui| {
                                        ui.label(&item.name);
                                        if let Some(note) = &item.note {
                                            ui.label(RichText::new(note).small().weak());
                                        }
                                    });

                                    if let Some(price) = whole_number_field(
                                        ui,
                                        ("price", &category.id, &item.id),
                                        item.unit_price,
                                        Self::PRICE_WIDTH,
                                    ) {
                                        edits.push((
                                            category.id.clone(),
                                            item.id.clone(),
                                            ItemEdit::UnitPrice(price),
                                        ));
                                    }

                                    if let Some(qty) = whole_number_field(
                                        ui,
                                        ("qty", &category.id, &item.id),
                                        item.qty,
                                        Self::QTY_WIDTH,
                                    ) {
                                        edits.push((
                                            category.id.clone(),
                                            item.id.clone(),
                                            ItemEdit::Qty(qty),
                                        ));
                                    }

                                    let mut conditions = item.conditions.clone();
                                    let response = ui.add(
                                        egui::TextEdit::singleline(&mut conditions)
                                            .desired_width(Self::CONDITIONS_WIDTH)
                                            .hint_text("Current condition notes..."),
                                    );
                                    if response.changed() {
                                        edits.push((
                                            category.id.clone(),
                                            item.id.clone(),
                                            ItemEdit::Conditions(conditions),
                                        ));
                                    }

                                    ui.label(format_currency(item_cost(item)));
                                    ui.end_row();
                                }
                            });
                    });
                });
                ui.add_space(10.0);
            }

            // Totals
            ui.allocate_ui(egui::vec2(group_width, 0.0), |ui| {
                ui.group(|ui| {
                    ui.set_min_width(group_width - 20.0);
                    egui::Grid::new("totals_grid")
                        .num_columns(2)
                        .spacing([40.0, 8.0])
                        .show(ui, |ui| {
                            ui.label("Grand Subtotal");
                            ui.label(format_currency(totals.subtotal));
                            ui.end_row();

                            ui.label("Contingency (15%)");
                            ui.label(format_currency(totals.contingency));
                            ui.end_row();

                            ui.label(RichText::new("Total Budget").strong());
                            ui.label(RichText::new(format_currency(totals.grand_total)).strong());
                            ui.end_row();
                        });
                });
            });
        });

        ui.add_space(10.0);
        ui.horizontal(|ui| {
            let label = if app.exporting { "Exporting..." } else { "Export PDF" };
            if ui.add_enabled(!app.exporting, egui::Button::new(label)).clicked() {
                app.export(&ctx);
            }
            if ui.button("AI Analysis ➡").clicked() {
                app.open_analysis(&ctx);
            }
        });

        for (category_id, item_id, edit) in edits {
            app.edit_item(&category_id, &item_id, edit);
        }
    }
}
