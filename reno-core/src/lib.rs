pub mod analysis;
pub mod calculations;
pub mod models;
pub mod report;
pub mod session;
pub mod store;

pub use analysis::{AnalysisGateway, GatewayError};
pub use models::*;
pub use session::{Session, View};
pub use store::{Persistence, SlotStore, StoreError};
