use egui::{RichText, Ui};
use reno_core::calculations::{arv_display, budget_share};

use crate::app::RenoApp;

pub struct AnalysisScreen;

impl AnalysisScreen {
    const GROUP_WIDTH: f32 = 560.0;

    /// The "Investment Strategy" sentence under the narrative.
    pub fn strategy_text(app: &RenoApp) -> String {
        let property = app.session.property();
        let share = budget_share(property, app.session.totals().subtotal);
        format!(
            "Based on your ARV of {}, the current budget accounts for about {}% of the total value.",
            arv_display(property),
            share
        )
    }

    pub fn show(app: &mut RenoApp, ui: &mut Ui) {
        let ctx = ui.ctx().clone();
        let loading = app.session.is_analysis_loading();

        ui.horizontal(|ui| {
            let label = if app.exporting { "Exporting..." } else { "Export Report" };
            if ui
                .add_enabled(!loading && !app.exporting, egui::Button::new(label))
                .clicked()
            {
                app.export(&ctx);
            }
        });
        ui.separator();

        if loading {
            ui.vertical_centered(|ui| {
                ui.add_space(60.0);
                ui.spinner();
                ui.label("Gemini is analyzing your project...");
            });
            return;
        }

        let narrative = app.session.analysis_text().unwrap_or_default().to_string();
        let strategy = Self::strategy_text(app);

        egui::ScrollArea::vertical().show(ui, |ui| {
            let group_width = ui.available_width().min(Self::GROUP_WIDTH);

            ui.allocate_ui(egui::vec2(group_width, 0.0), |ui| {
                ui.group(|ui| {
                    ui.set_min_width(group_width - 20.0);
                    ui.heading("Property Analysis");
                    ui.add_space(5.0);
                    ui.label(narrative);
                });
            });

            ui.add_space(10.0);

            ui.allocate_ui(egui::vec2(group_width, 0.0), |ui| {
                ui.group(|ui| {
                    ui.set_min_width(group_width - 20.0);
                    ui.label(RichText::new("Investment Strategy").strong());
                    ui.label(strategy);
                });
            });

            ui.add_space(20.0);

            if ui.button("Return to Estimator").clicked() {
                app.back();
            }
        });
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use async_trait::async_trait;
    use pretty_assertions::assert_eq;
    use reno_core::analysis::{AnalysisGateway, GatewayError, SerializedGateway};
    use reno_core::store::{MemorySlotStore, Persistence};
    use reno_core::{PropertyEdit, PropertyField, Session};

    use super::*;

    struct Silent;

    #[async_trait]
    impl AnalysisGateway for Silent {
        async fn generate(&self, _prompt: &str) -> Result<String, GatewayError> {
            Ok(String::new())
        }
    }

    fn app(rt: &tokio::runtime::Runtime) -> RenoApp {
        let persistence = Persistence::new(Arc::new(MemorySlotStore::default()));
        let session = rt.block_on(Session::open(persistence));
        RenoApp::new(
            session,
            Arc::new(SerializedGateway::new(Arc::new(Silent))),
            rt.handle().clone(),
            None,
        )
    }

    #[test]
    fn strategy_without_arv_uses_placeholders() {
        let rt = tokio::runtime::Runtime::new().unwrap();
        let app = app(&rt);

        assert_eq!(
            AnalysisScreen::strategy_text(&app),
            "Based on your ARV of N/A, the current budget accounts for about X% of the total value."
        );
    }

    #[test]
    fn strategy_with_arv_quotes_the_ratio() {
        let rt = tokio::runtime::Runtime::new().unwrap();
        let mut app = app(&rt);
        app.edit_property(PropertyEdit::Text(PropertyField::EstimatedArv, "$432,900".into()));

        assert_eq!(
            AnalysisScreen::strategy_text(&app),
            "Based on your ARV of $432,900, the current budget accounts for about 10% of the total value."
        );
    }
}
