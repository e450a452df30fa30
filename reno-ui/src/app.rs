use std::path::PathBuf;
use std::sync::Arc;
use std::sync::mpsc::{self, Receiver, Sender, TryRecvError};

use chrono::Local;
use egui::Context;
use reno_core::analysis::{self, SerializedGateway};
use reno_core::report::{export_report, suggested_filename};
use reno_core::session::ResetRequest;
use reno_core::store::{MemorySlotStoreFactory, StoreRegistry};
use reno_core::{ItemEdit, PropertyEdit, Session, View};
use reno_db_sqlite::SqliteSlotStoreFactory;
use reno_report_pdf::PdfRenderer;
use tokio::runtime::Handle;
use tracing::{debug, error, info};

use crate::dialogs;
use crate::logging::{LEVELS, LogControl, log_task_error};
use crate::screens::{AnalysisScreen, EstimateScreen, IntakeScreen};

/// Build a [`StoreRegistry`] with every compiled-in storage backend.
pub fn build_registry() -> StoreRegistry {
    let mut registry = StoreRegistry::new();
    registry.register(Box::new(MemorySlotStoreFactory));
    registry.register(Box::new(SqliteSlotStoreFactory));
    registry
}

/// Results posted back to the UI thread by background work.
#[derive(Debug)]
pub enum AppEvent {
    AnalysisFinished { generation: u64, text: String },
    ExportFinished(Result<PathBuf, String>),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageType {
    Info,
    Success,
    Error,
}

/// Main application state
pub struct RenoApp {
    pub session: Session,
    pub status_message: Option<(String, MessageType)>,
    pub pending_reset: Option<ResetRequest>,
    pub exporting: bool,
    logging: Option<LogControl>,
    gateway: Arc<SerializedGateway>,
    runtime: Handle,
    export_dir: Option<PathBuf>,
    tx: Sender<AppEvent>,
    rx: Receiver<AppEvent>,
}

impl RenoApp {
    pub fn new(
        session: Session,
        gateway: Arc<SerializedGateway>,
        runtime: Handle,
        export_dir: Option<PathBuf>,
    ) -> Self {
        let (tx, rx) = mpsc::channel();
        Self {
            session,
            status_message: None,
            pending_reset: None,
            exporting: false,
            logging: None,
            gateway,
            runtime,
            export_dir,
            tx,
            rx,
        }
    }

    /// Shows the log level and log file controls in the status bar.
    pub fn with_logging(mut self, logging: LogControl) -> Self {
        self.logging = Some(logging);
        self
    }

    pub fn show_message(&mut self, msg: impl Into<String>, msg_type: MessageType) {
        self.status_message = Some((msg.into(), msg_type));
    }

    pub fn clear_message(&mut self) {
        self.status_message = None;
    }

    // ── edits ────────────────────────────────────────────────────────────

    pub fn edit_property(&mut self, edit: PropertyEdit) {
        if let Err(e) = self.runtime.block_on(self.session.update_property(edit)) {
            error!(error = %e, "saving property details failed");
            self.show_message(format!("Could not save property details: {e}"), MessageType::Error);
        }
    }

    pub fn edit_item(&mut self, category_id: &str, item_id: &str, edit: ItemEdit) {
        let saved = self
            .runtime
            .block_on(self.session.update_item(category_id, item_id, edit));
        if let Err(e) = saved {
            error!(error = %e, category_id, item_id, "saving estimate failed");
            self.show_message(format!("Could not save estimate: {e}"), MessageType::Error);
        }
    }

    // ── navigation ───────────────────────────────────────────────────────

    /// Leaving intake withdraws an unanswered reset question.
    pub fn proceed(&mut self) {
        if self.session.proceed() {
            self.pending_reset = None;
        }
    }

    pub fn back(&mut self) {
        if self.session.back() {
            self.pending_reset = None;
        }
    }

    /// Enters the analysis view and starts its single request.
    pub fn open_analysis(&mut self, ctx: &Context) {
        let Some(ticket) = self.session.analyze() else {
            return;
        };
        self.pending_reset = None;
        let generation = ticket.generation;
        let input = ticket.input;
        let gateway = Arc::clone(&self.gateway);
        let tx = self.tx.clone();
        let ctx = ctx.clone();

        debug!(generation, "analysis requested");
        self.runtime.spawn(async move {
            let text = analysis::analyze(&*gateway, &input).await;
            let sent = tx
                .send(AppEvent::AnalysisFinished { generation, text })
                .map_err(|_| anyhow::anyhow!("event channel closed"));
            ctx.request_repaint();
            log_task_error("analysis", sent);
        });
    }

    // ── reset ────────────────────────────────────────────────────────────

    pub fn request_reset(&mut self) {
        self.pending_reset = self.session.request_reset();
    }

    pub fn cancel_reset(&mut self) {
        self.pending_reset = None;
    }

    pub fn confirm_reset(&mut self) {
        let Some(request) = self.pending_reset.take() else {
            return;
        };
        match self.runtime.block_on(self.session.confirm_reset(request)) {
            Ok(true) => self.show_message("All data reset to defaults", MessageType::Info),
            Ok(false) => self.show_message(
                "Reset is only available from Property Intake",
                MessageType::Error,
            ),
            Err(e) => {
                error!(error = %e, "clearing saved data failed");
                self.show_message(format!("Reset saved data failed: {e}"), MessageType::Error);
            }
        }
    }

    // ── logging ──────────────────────────────────────────────────────────

    pub fn set_log_level(&mut self, level: &str) {
        let Some(logging) = self.logging.as_mut() else {
            return;
        };
        if let Err(e) = logging.set_level(level) {
            error!(error = %format!("{e:#}"), "log level change failed");
            self.show_message(format!("{e:#}"), MessageType::Error);
        }
    }

    /// Starts or stops writing the configured log file.
    pub fn set_file_logging(&mut self, enabled: bool) {
        let Some(logging) = &self.logging else {
            return;
        };
        let result = match (enabled, logging.configured_file()) {
            (true, Some(path)) => logging.open_file(path),
            (true, None) => Err(anyhow::anyhow!("no log file is configured")),
            (false, _) => {
                logging.close_file();
                Ok(())
            }
        };
        if let Err(e) = result {
            error!(error = %format!("{e:#}"), "log file toggle failed");
            self.show_message(format!("{e:#}"), MessageType::Error);
        }
    }

    fn show_log_controls(&mut self, ui: &mut egui::Ui) {
        let Some(logging) = &self.logging else {
            return;
        };
        let current = logging.level().to_string();
        let configured_file = logging.configured_file().map(|p| p.display().to_string());
        let mut to_file = logging.log_file().is_some();

        let mut level = current.clone();
        egui::ComboBox::from_id_salt("log_level")
            .selected_text(format!("Log: {level}"))
            .show_ui(ui, |ui| {
                for name in LEVELS {
                    ui.selectable_value(&mut level, name.to_string(), name);
                }
            });
        if level != current {
            self.set_log_level(&level);
        }

        if let Some(path) = configured_file {
            if ui.checkbox(&mut to_file, "Log file").on_hover_text(path).changed() {
                self.set_file_logging(to_file);
            }
        }
    }

    // ── export ───────────────────────────────────────────────────────────

    /// Asks where to save, then renders the report in the background.
    pub fn export(&mut self, ctx: &Context) {
        if self.exporting {
            return;
        }
        let file_name = suggested_filename(self.session.property());
        let Some(path) =
            dialogs::save_file_path(self.export_dir.as_deref(), &file_name, dialogs::PDF_FILTERS)
        else {
            debug!("export cancelled");
            return;
        };
        self.start_export(path, ctx);
    }

    pub fn start_export(&mut self, path: PathBuf, ctx: &Context) {
        let report = self.session.report(Local::now().date_naive());
        let tx = self.tx.clone();
        let ctx = ctx.clone();

        self.exporting = true;
        self.runtime.spawn_blocking(move || {
            let result = export_report(&PdfRenderer, &report, &path).map_err(|e| e.to_string());
            let sent = tx
                .send(AppEvent::ExportFinished(result))
                .map_err(|_| anyhow::anyhow!("event channel closed"));
            ctx.request_repaint();
            log_task_error("export", sent);
        });
    }

    // ── events ───────────────────────────────────────────────────────────

    pub fn drain_events(&mut self) {
        loop {
            match self.rx.try_recv() {
                Ok(event) => self.apply_event(event),
                Err(TryRecvError::Empty) => break,
                // Never happens while `self.tx` is alive.
                Err(TryRecvError::Disconnected) => break,
            }
        }
    }

    fn apply_event(&mut self, event: AppEvent) {
        match event {
            AppEvent::AnalysisFinished { generation, text } => {
                self.session.complete_analysis(generation, text);
            }
            AppEvent::ExportFinished(result) => {
                self.exporting = false;
                match result {
                    Ok(path) => {
                        info!(path = %path.display(), "report saved");
                        self.show_message(
                            format!("Report saved to {}", path.display()),
                            MessageType::Success,
                        );
                    }
                    Err(e) => {
                        error!(error = %e, "PDF export failed");
                        self.show_message(format!("PDF export failed: {e}"), MessageType::Error);
                    }
                }
            }
        }
    }

    fn show_reset_dialog(&mut self, ctx: &Context) {
        if self.pending_reset.is_none() {
            return;
        }
        let mut confirmed = false;
        let mut cancelled = false;
        egui::Window::new("Reset Project")
            .collapsible(false)
            .resizable(false)
            .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
            .show(ctx, |ui| {
                ui.label("Reset all property details and estimate values to their defaults?");
                ui.label("This cannot be undone.");
                ui.add_space(8.0);
                ui.horizontal(|ui| {
                    confirmed = ui.button("Reset").clicked();
                    cancelled = ui.button("Cancel").clicked();
                });
            });
        if confirmed {
            self.confirm_reset();
        } else if cancelled {
            self.cancel_reset();
        }
    }
}

impl eframe::App for RenoApp {
    fn update(&mut self, ctx: &Context, _frame: &mut eframe::Frame) {
        self.drain_events();

        egui::TopBottomPanel::top("title_bar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                if self.session.view() != View::Intake
                    && ui
                        .add_enabled(self.pending_reset.is_none(), egui::Button::new("⬅ Back"))
                        .clicked()
                {
                    self.back();
                }
                ui.heading(self.session.view().title());
            });
        });

        // Status bar at bottom
        egui::TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                if let Some((msg, msg_type)) = &self.status_message {
                    let color = match msg_type {
                        MessageType::Info => egui::Color32::GRAY,
                        MessageType::Success => egui::Color32::GREEN,
                        MessageType::Error => egui::Color32::RED,
                    };
                    ui.colored_label(color, msg);

                    if ui.small_button("✖").clicked() {
                        self.clear_message();
                    }
                }
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    self.show_log_controls(ui);
                });
            });
        });

        // The screen stays inert while the reset question is open.
        egui::CentralPanel::default().show(ctx, |ui| {
            ui.add_enabled_ui(self.pending_reset.is_none(), |ui| match self.session.view() {
                View::Intake => IntakeScreen::show(self, ui),
                View::Estimate => EstimateScreen::show(self, ui),
                View::Analysis => AnalysisScreen::show(self, ui),
            });
        });

        self.show_reset_dialog(ctx);
    }
}
