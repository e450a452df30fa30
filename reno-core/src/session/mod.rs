//! The application session: which screen is active, the property and
//! estimate being edited, and the state of the current analysis request.

mod view;

pub use view::View;

use chrono::NaiveDate;
use tracing::{debug, info, warn};

use crate::analysis::AnalysisInput;
use crate::calculations::EstimateTotals;
use crate::models::{Estimate, ItemEdit, Property, PropertyEdit};
use crate::report::{Report, build_report};
use crate::store::{Persistence, Slot, StoreError};

/// Analysis-screen state. Only meaningful while the view is [`View::Analysis`].
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum AnalysisState {
    #[default]
    Idle,
    Loading,
    Ready(String),
}

/// Issued once per entry into the analysis view. The result must be handed
/// back with the same `generation`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalysisTicket {
    pub generation: u64,
    pub input: AnalysisInput,
}

/// Proof that a reset was requested from the intake view. Dropping it
/// declines the reset.
#[derive(Debug)]
#[must_use = "pass to Session::confirm_reset or drop to cancel"]
pub struct ResetRequest {
    _private: (),
}

pub struct Session {
    view: View,
    property: Property,
    estimate: Estimate,
    persistence: Persistence,
    analysis: AnalysisState,
    generation: u64,
}

impl Session {
    /// Loads both slots, falling back to defaults, and starts on intake.
    pub async fn open(persistence: Persistence) -> Self {
        let property = persistence.load::<Property>().await;
        let estimate = persistence.load::<Estimate>().await;
        info!(categories = estimate.categories.len(), "session opened");
        Self {
            view: View::Intake,
            property,
            estimate,
            persistence,
            analysis: AnalysisState::Idle,
            generation: 0,
        }
    }

    pub fn view(&self) -> View {
        self.view
    }

    pub fn property(&self) -> &Property {
        &self.property
    }

    pub fn estimate(&self) -> &Estimate {
        &self.estimate
    }

    /// Recomputed from the current estimate on every call.
    pub fn totals(&self) -> EstimateTotals {
        EstimateTotals::for_categories(&self.estimate.categories)
    }

    pub fn analysis(&self) -> &AnalysisState {
        &self.analysis
    }

    pub fn is_analysis_loading(&self) -> bool {
        self.analysis == AnalysisState::Loading
    }

    /// Finished narrative, if the analysis view has one.
    pub fn analysis_text(&self) -> Option<&str> {
        match (&self.view, &self.analysis) {
            (View::Analysis, AnalysisState::Ready(text)) => Some(text.as_str()),
            _ => None,
        }
    }

    // ── navigation ───────────────────────────────────────────────────────

    /// Intake to estimate. Returns whether the view changed.
    pub fn proceed(&mut self) -> bool {
        self.transition(self.view.proceed())
    }

    /// Estimate to analysis. Returns a ticket for the one analysis request
    /// this entry is allowed to make, or `None` if the view did not change.
    pub fn analyze(&mut self) -> Option<AnalysisTicket> {
        if !self.transition(self.view.analyze()) {
            return None;
        }
        self.generation += 1;
        self.analysis = AnalysisState::Loading;
        Some(AnalysisTicket {
            generation: self.generation,
            input: AnalysisInput::new(&self.property, &self.estimate),
        })
    }

    pub fn back(&mut self) -> bool {
        let leaving_analysis = self.view == View::Analysis;
        let moved = self.transition(self.view.back());
        if moved && leaving_analysis {
            self.analysis = AnalysisState::Idle;
        }
        moved
    }

    fn transition(&mut self, next: View) -> bool {
        if next == self.view {
            return false;
        }
        debug!(from = ?self.view, to = ?next, "view change");
        self.view = next;
        true
    }

    /// Applies a finished analysis.
    ///
    /// Ignored unless the session is still in the analysis view it was
    /// requested from and still waiting for it.
    pub fn complete_analysis(&mut self, generation: u64, text: String) -> bool {
        if self.view != View::Analysis
            || generation != self.generation
            || self.analysis != AnalysisState::Loading
        {
            debug!(generation, current = self.generation, "discarding stale analysis result");
            return false;
        }
        self.analysis = AnalysisState::Ready(text);
        true
    }

    // ── edits (write-through) ────────────────────────────────────────────

    /// Applies `edit` and persists the property. The in-memory change stands
    /// even if the write fails.
    pub async fn update_property(&mut self, edit: PropertyEdit) -> Result<bool, StoreError> {
        if !self.property.apply(edit) {
            return Ok(false);
        }
        self.persistence.save(&self.property).await?;
        Ok(true)
    }

    /// Applies `edit` to one item and persists the full category list.
    /// Unknown ids are ignored.
    pub async fn update_item(
        &mut self,
        category_id: &str,
        item_id: &str,
        edit: ItemEdit,
    ) -> Result<bool, StoreError> {
        if !self.estimate.apply(category_id, item_id, edit) {
            return Ok(false);
        }
        self.persistence.save(&self.estimate).await?;
        Ok(true)
    }

    // ── reset ────────────────────────────────────────────────────────────

    /// Only available from the intake view. The caller must obtain an
    /// explicit yes from the user before confirming.
    pub fn request_reset(&self) -> Option<ResetRequest> {
        (self.view == View::Intake).then_some(ResetRequest { _private: () })
    }

    /// Rebuilds the session from defaults and empties both slots.
    ///
    /// Every field is replaced and the analysis generation advances, so no
    /// derived state or in-flight result survives. A request that outlived
    /// the intake view is refused and nothing changes; returns whether the
    /// reset ran.
    pub async fn confirm_reset(&mut self, _request: ResetRequest) -> Result<bool, StoreError> {
        if self.view != View::Intake {
            warn!(view = ?self.view, "reset refused outside the intake view");
            return Ok(false);
        }
        self.property = Property::default_value();
        self.estimate = Estimate::default_value();
        self.analysis = AnalysisState::Idle;
        self.generation += 1;
        self.persistence.clear_all().await?;
        info!("session reset to defaults");
        Ok(true)
    }

    /// Report of the current state, including the narrative when one is shown.
    pub fn report(&self, generated_on: NaiveDate) -> Report {
        build_report(&self.property, &self.estimate, self.analysis_text(), generated_on)
    }
}
