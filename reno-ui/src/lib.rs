pub mod app;
pub mod config;
pub mod dialogs;
pub mod logging;
pub mod screens;
pub mod widgets;

/// Window title.
pub const APP_TITLE: &str = "PropertyPro Renovation Estimator";
