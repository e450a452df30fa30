use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use regex::Regex;
use thiserror::Error;
use tracing::info;

use super::layout::{Page, PageGeometry, paginate};
use super::model::Report;
use crate::models::Property;

static WHITESPACE_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("whitespace pattern is valid"));

#[derive(Debug, Error)]
pub enum ReportError {
    #[error("render failed: {0}")]
    Render(String),

    #[error("could not write report to '{}': {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Turns laid-out pages into a document.
pub trait ReportRenderer {
    fn render(
        &self,
        title: &str,
        geometry: PageGeometry,
        pages: &[Page],
    ) -> Result<Vec<u8>, ReportError>;
}

/// `Renovation_Report_<address>.pdf`, whitespace runs joined with `_`.
///
/// Path separators are replaced too so the result is always a bare file
/// name; a blank address gives `Renovation_Report_Report.pdf`.
pub fn suggested_filename(property: &Property) -> String {
    let address = property.address.trim().replace(['/', '\\'], "_");
    let stem = WHITESPACE_RUN.replace_all(&address, "_");
    let stem = if stem.is_empty() { "Report" } else { &*stem };
    format!("Renovation_Report_{stem}.pdf")
}

/// Lays out, renders and writes the report to `destination`.
pub fn export_report(
    renderer: &dyn ReportRenderer,
    report: &Report,
    destination: &Path,
) -> Result<PathBuf, ReportError> {
    let geometry = PageGeometry::A4;
    let pages = paginate(report, geometry);
    let bytes = renderer.render(&report.title, geometry, &pages)?;
    std::fs::write(destination, &bytes).map_err(|source| ReportError::Io {
        path: destination.to_path_buf(),
        source,
    })?;
    info!(path = %destination.display(), pages = pages.len(), bytes = bytes.len(), "report exported");
    Ok(destination.to_path_buf())
}
