use std::sync::Arc;

use async_trait::async_trait;
use thiserror::Error;
use tokio::sync::Mutex;
use tracing::{debug, warn};

use super::prompt::{AnalysisInput, build_prompt};
use super::{EMPTY_ANALYSIS, FALLBACK_ANALYSIS};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GatewayError {
    #[error("analysis service is not configured: {0}")]
    NotConfigured(String),

    #[error("transport error: {0}")]
    Transport(String),

    #[error("analysis service returned status {0}")]
    Status(u16),

    #[error("invalid response: {0}")]
    InvalidResponse(String),
}

/// A text-generation service: prompt in, narrative out.
#[async_trait]
pub trait AnalysisGateway: Send + Sync {
    async fn generate(&self, prompt: &str) -> Result<String, GatewayError>;
}

/// Runs one analysis and never fails.
///
/// Gateway errors become [`FALLBACK_ANALYSIS`]; an empty narrative becomes
/// [`EMPTY_ANALYSIS`].
pub async fn analyze(gateway: &dyn AnalysisGateway, input: &AnalysisInput) -> String {
    let prompt = build_prompt(input);
    match gateway.generate(&prompt).await {
        Ok(text) if text.trim().is_empty() => EMPTY_ANALYSIS.to_string(),
        Ok(text) => text,
        Err(error) => {
            warn!(%error, "analysis failed; showing fallback text");
            FALLBACK_ANALYSIS.to_string()
        }
    }
}

/// Wraps a gateway so at most one call is in flight; later callers queue.
pub struct SerializedGateway {
    inner: Arc<dyn AnalysisGateway>,
    in_flight: Mutex<()>,
}

impl SerializedGateway {
    pub fn new(inner: Arc<dyn AnalysisGateway>) -> Self {
        Self {
            inner,
            in_flight: Mutex::new(()),
        }
    }
}

#[async_trait]
impl AnalysisGateway for SerializedGateway {
    async fn generate(&self, prompt: &str) -> Result<String, GatewayError> {
        let _turn = self.in_flight.lock().await;
        debug!("analysis request started");
        self.inner.generate(prompt).await
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    use pretty_assertions::assert_eq;

    use super::*;
    use crate::models::{Estimate, default_categories, default_property};

    struct FixedGateway(Result<String, GatewayError>);

    #[async_trait]
    impl AnalysisGateway for FixedGateway {
        async fn generate(&self, _prompt: &str) -> Result<String, GatewayError> {
            self.0.clone()
        }
    }

    /// Records the peak number of overlapping calls.
    #[derive(Default)]
    struct CountingGateway {
        active: AtomicUsize,
        peak: AtomicUsize,
        calls: AtomicUsize,
    }

    #[async_trait]
    impl AnalysisGateway for CountingGateway {
        async fn generate(&self, _prompt: &str) -> Result<String, GatewayError> {
            let now = self.active.fetch_add(1, Ordering::SeqCst) + 1;
            self.peak.fetch_max(now, Ordering::SeqCst);
            self.calls.fetch_add(1, Ordering::SeqCst);
            tokio::time::sleep(Duration::from_millis(20)).await;
            self.active.fetch_sub(1, Ordering::SeqCst);
            Ok("done".to_string())
        }
    }

    fn input() -> AnalysisInput {
        AnalysisInput::new(&default_property(), &Estimate::new(default_categories()))
    }

    #[tokio::test]
    async fn analyze_passes_narrative_through() {
        let gateway = FixedGateway(Ok("Looks solid.".to_string()));

        assert_eq!(analyze(&gateway, &input()).await, "Looks solid.");
    }

    #[tokio::test]
    async fn analyze_absorbs_failures_into_fallback_text() {
        let gateway = FixedGateway(Err(GatewayError::Status(429)));

        assert_eq!(analyze(&gateway, &input()).await, FALLBACK_ANALYSIS);
    }

    #[tokio::test]
    async fn analyze_replaces_empty_narrative() {
        let gateway = FixedGateway(Ok("  ".to_string()));

        assert_eq!(analyze(&gateway, &input()).await, EMPTY_ANALYSIS);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn serialized_gateway_allows_one_call_in_flight() {
        let counting = Arc::new(CountingGateway::default());
        let gateway = Arc::new(SerializedGateway::new(counting.clone()));

        let handles: Vec<_> = (0..4)
            .map(|_| {
                let gateway = gateway.clone();
                tokio::spawn(async move { gateway.generate("p").await })
            })
            .collect();
        for handle in handles {
            assert_eq!(handle.await.unwrap(), Ok("done".to_string()));
        }

        assert_eq!(counting.calls.load(Ordering::SeqCst), 4);
        assert_eq!(counting.peak.load(Ordering::SeqCst), 1);
    }
}
