mod analysis;
mod estimate;
mod intake;

pub use analysis::AnalysisScreen;
pub use estimate::EstimateScreen;
pub use intake::IntakeScreen;
