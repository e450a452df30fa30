//! The exported renovation report: content model, page layout and the
//! renderer seam that turns pages into a document.

pub mod export;
pub mod layout;
pub mod model;

pub use export::{ReportError, ReportRenderer, export_report, suggested_filename};
pub use layout::{FontWeight, Page, PageGeometry, TextRun, Tone, paginate, wrap_text};
pub use model::{DetailRow, REPORT_TITLE, Report, TABLE_HEADER, TableRow, build_report};
