//! Narrative investment analysis from a text-generation service.
//!
//! The service itself sits behind [`AnalysisGateway`]; this module owns the
//! prompt, the failure policy and per-session serialization of calls.

mod gateway;
mod prompt;

pub use gateway::{AnalysisGateway, GatewayError, SerializedGateway, analyze};
pub use prompt::{AnalysisInput, build_prompt};

/// Shown in place of the narrative whenever the gateway fails.
pub const FALLBACK_ANALYSIS: &str =
    "Unable to generate AI analysis at this time. Please check your property details and try again.";

/// Shown when the gateway succeeds but returns no text.
pub const EMPTY_ANALYSIS: &str = "No analysis available.";
