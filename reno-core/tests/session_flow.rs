//! End-to-end walk through the three screens against the in-memory backend:
//! intake edits, estimate edits, one analysis round-trip, export, and a
//! reopened session seeing the persisted state.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use chrono::NaiveDate;
use pretty_assertions::assert_eq;

use reno_core::analysis::{self, FALLBACK_ANALYSIS, SerializedGateway};
use reno_core::calculations::{BudgetShare, budget_share};
use reno_core::report::{Page, PageGeometry, ReportError, ReportRenderer, export_report};
use reno_core::session::AnalysisState;
use reno_core::store::{MemorySlotStoreFactory, StoreConfig, StoreRegistry};
use reno_core::{
    AnalysisGateway, GatewayError, ItemEdit, Persistence, PropertyEdit, PropertyField, Session,
    View,
};

struct EchoGateway {
    calls: AtomicUsize,
}

#[async_trait]
impl AnalysisGateway for EchoGateway {
    async fn generate(&self, prompt: &str) -> Result<String, GatewayError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let first_line = prompt.lines().nth(1).unwrap_or_default().trim().to_string();
        Ok(format!("Reviewed {first_line}"))
    }
}

struct DownGateway;

#[async_trait]
impl AnalysisGateway for DownGateway {
    async fn generate(&self, _prompt: &str) -> Result<String, GatewayError> {
        Err(GatewayError::Transport("connection refused".into()))
    }
}

struct PageCounter;

impl ReportRenderer for PageCounter {
    fn render(&self, _: &str, _: PageGeometry, pages: &[Page]) -> Result<Vec<u8>, ReportError> {
        Ok(format!("{} pages", pages.len()).into_bytes())
    }
}

async fn memory_persistence() -> Persistence {
    let mut registry = StoreRegistry::new();
    registry.register(Box::new(MemorySlotStoreFactory));
    registry
        .open(&StoreConfig::memory())
        .await
        .expect("memory backend")
}

#[tokio::test]
async fn full_walkthrough_persists_and_exports() {
    let persistence = memory_persistence().await;
    let mut session = Session::open(persistence.clone()).await;

    // Intake
    session
        .update_property(PropertyEdit::Text(PropertyField::Address, "77 Cedar Ln".into()))
        .await
        .unwrap();
    session
        .update_property(PropertyEdit::Text(PropertyField::EstimatedArv, "$250,000".into()))
        .await
        .unwrap();
    assert!(session.proceed());

    // Estimate
    session
        .update_item("system", "sys-1", ItemEdit::UnitPrice(6710))
        .await
        .unwrap();
    session.update_item("system", "sys-1", ItemEdit::Qty(1)).await.unwrap();
    let totals = session.totals();
    assert_eq!(totals.subtotal, 50_000);
    assert_eq!(totals.contingency, 7_500);
    assert_eq!(totals.grand_total, 57_500);
    assert_eq!(
        budget_share(session.property(), totals.subtotal),
        BudgetShare::Percent(20)
    );

    // Analysis
    let gateway = Arc::new(EchoGateway {
        calls: AtomicUsize::new(0),
    });
    let serialized = SerializedGateway::new(gateway.clone());
    let ticket = session.analyze().expect("ticket on entry");
    let text = analysis::analyze(&serialized, &ticket.input).await;
    assert!(session.complete_analysis(ticket.generation, text));
    assert_eq!(session.analysis_text(), Some("Reviewed Property: 77 Cedar Ln"));
    assert_eq!(gateway.calls.load(Ordering::SeqCst), 1);

    // Export
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("report.bin");
    let report = session.report(NaiveDate::from_ymd_opt(2025, 8, 9).unwrap());
    assert_eq!(report.analysis.as_deref(), Some("Reviewed Property: 77 Cedar Ln"));
    export_report(&PageCounter, &report, &path).unwrap();
    assert!(std::fs::read_to_string(&path).unwrap().ends_with("pages"));

    // A new session over the same store picks everything up.
    let reopened = Session::open(persistence).await;
    assert_eq!(reopened.view(), View::Intake);
    assert_eq!(reopened.property(), session.property());
    assert_eq!(reopened.estimate(), session.estimate());
}

#[tokio::test]
async fn gateway_outage_shows_fallback_not_an_error() {
    let mut session = Session::open(memory_persistence().await).await;
    session.proceed();
    let ticket = session.analyze().unwrap();

    let text = analysis::analyze(&DownGateway, &ticket.input).await;
    session.complete_analysis(ticket.generation, text);

    assert_eq!(
        session.analysis(),
        &AnalysisState::Ready(FALLBACK_ANALYSIS.to_string())
    );
}

#[tokio::test]
async fn result_arriving_after_navigation_is_dropped_without_side_effects() {
    let mut session = Session::open(memory_persistence().await).await;
    session.proceed();
    let ticket = session.analyze().unwrap();
    let generation = ticket.generation;
    let input = ticket.input;
    let pending = tokio::spawn(async move { analysis::analyze(&DownGateway, &input).await });

    session.back();
    let late = pending.await.unwrap();

    assert!(!session.complete_analysis(generation, late));
    assert_eq!(session.view(), View::Estimate);
    assert_eq!(session.analysis_text(), None);
}
