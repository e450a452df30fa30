use rfd::FileDialog;
use std::path::{Path, PathBuf};

/// Filters offered when saving a report.
pub const PDF_FILTERS: &[(&str, &[&str])] = &[("PDF", &["pdf"])];

/// Opens a native "Save As" dialog pre-filled with `file_name`.
///
/// Each filter is a `(name, extensions)` pair, e.g. `("PDF", &["pdf"])`.
/// Returns `None` when the user cancels. The first filter's extension is
/// appended if the chosen name has none.
pub fn save_file_path(
    directory: Option<&Path>,
    file_name: &str,
    filters: &[(&str, &[&str])],
) -> Option<PathBuf> {
    let mut dialog = FileDialog::new().set_file_name(file_name);
    if let Some(dir) = directory {
        dialog = dialog.set_directory(dir);
    }
    for (name, extensions) in filters {
        dialog = dialog.add_filter(*name, *extensions);
    }

    let path = dialog.save_file()?;
    let default_ext = filters.first().and_then(|(_, exts)| exts.first());
    Some(match default_ext {
        Some(ext) => with_default_extension(path, ext),
        None => path,
    })
}

/// Adds `extension` when `path` has none.
pub fn with_default_extension(path: PathBuf, extension: &str) -> PathBuf {
    if path.extension().is_some() {
        path
    } else {
        path.with_extension(extension)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_missing_extension_is_added() {
        let actual = with_default_extension(PathBuf::from("/tmp/Renovation_Report_Elm"), "pdf");
        assert_eq!(actual, PathBuf::from("/tmp/Renovation_Report_Elm.pdf"));
    }

    #[test]
    fn test_existing_extension_is_kept() {
        let actual = with_default_extension(PathBuf::from("/tmp/report.PDF"), "pdf");
        assert_eq!(actual, PathBuf::from("/tmp/report.PDF"));
    }

    #[test]
    fn test_pdf_filter_is_first() {
        assert_eq!(PDF_FILTERS[0].1, &["pdf"]);
    }
}
