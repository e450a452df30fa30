//! Places report text on fixed-size pages.
//!
//! Positions are in millimetres from the top-left corner; `y` is the text
//! baseline. Widths are estimated from Helvetica advance widths, which is
//! close enough for wrapping and column truncation.

use super::model::{Report, TABLE_HEADER, TableRow};

const TITLE_PT: f32 = 20.0;
const SECTION_PT: f32 = 14.0;
const ANALYSIS_TITLE_PT: f32 = 16.0;
const BODY_PT: f32 = 10.0;
const TABLE_PT: f32 = 9.0;

const ROW_MM: f32 = 7.0;
const LINE_MM: f32 = 5.0;
const SECTION_GAP_MM: f32 = 6.0;
const SECTION_TITLE_MM: f32 = 8.0;
const TOTALS_GAP_MM: f32 = 4.0;

const PT_TO_MM: f32 = 25.4 / 72.0;

/// Column offsets from the left margin and their usable widths.
const COLUMNS: [(f32, f32); 5] = [
    (0.0, 58.0),
    (60.0, 50.0),
    (112.0, 30.0),
    (144.0, 14.0),
    (160.0, 22.0),
];

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageGeometry {
    pub width_mm: f32,
    pub height_mm: f32,
    pub margin_mm: f32,
}

impl PageGeometry {
    pub const A4: Self = Self {
        width_mm: 210.0,
        height_mm: 297.0,
        margin_mm: 14.0,
    };

    pub fn content_width(&self) -> f32 {
        self.width_mm - 2.0 * self.margin_mm
    }

    fn bottom(&self) -> f32 {
        self.height_mm - self.margin_mm
    }
}

impl Default for PageGeometry {
    fn default() -> Self {
        Self::A4
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FontWeight {
    Regular,
    Bold,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    Body,
    Muted,
    Accent,
}

impl Tone {
    /// RGB components in `0.0..=1.0`.
    pub fn rgb(&self) -> (f32, f32, f32) {
        match self {
            Self::Body => (0.1, 0.1, 0.12),
            Self::Muted => (0.42, 0.45, 0.5),
            Self::Accent => (0.15, 0.39, 0.92),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TextRun {
    pub x_mm: f32,
    pub y_mm: f32,
    pub size_pt: f32,
    pub weight: FontWeight,
    pub tone: Tone,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Page {
    pub runs: Vec<TextRun>,
}

impl Page {
    pub fn contains_text(&self, text: &str) -> bool {
        self.runs.iter().any(|r| r.text == text)
    }
}

/// Approximate advance width of `text` in millimetres.
pub fn text_width_mm(text: &str, size_pt: f32) -> f32 {
    let em: f32 = text.chars().map(char_width_em).sum();
    em * size_pt * PT_TO_MM
}

fn char_width_em(c: char) -> f32 {
    match c {
        'i' | 'j' | 'l' | '.' | ',' | '\'' | '|' | '!' | ':' | ';' => 0.28,
        'I' | 'f' | 't' | 'r' | ' ' | '(' | ')' | '[' | ']' | '-' | '/' => 0.33,
        'm' | 'w' => 0.83,
        'M' | 'W' | '%' | '@' => 0.9,
        'A'..='Z' => 0.67,
        '0'..='9' | '$' => 0.556,
        _ => 0.52,
    }
}

/// Greedy word wrap. Explicit newlines are kept, blank lines survive as
/// empty strings, and words wider than the line are split by character.
pub fn wrap_text(text: &str, max_width_mm: f32, size_pt: f32) -> Vec<String> {
    let mut lines = Vec::new();
    for paragraph in text.lines() {
        if paragraph.trim().is_empty() {
            lines.push(String::new());
            continue;
        }
        let mut current = String::new();
        for word in paragraph.split_whitespace() {
            let candidate = if current.is_empty() {
                word.to_string()
            } else {
                format!("{current} {word}")
            };
            if text_width_mm(&candidate, size_pt) <= max_width_mm {
                current = candidate;
                continue;
            }
            if !current.is_empty() {
                lines.push(std::mem::take(&mut current));
            }
            for ch in word.chars() {
                current.push(ch);
                if text_width_mm(&current, size_pt) > max_width_mm && current.chars().count() > 1 {
                    current.pop();
                    lines.push(std::mem::take(&mut current));
                    current.push(ch);
                }
            }
        }
        lines.push(current);
    }
    lines
}

/// Cuts `text` to fit `max_width_mm`, ending in `...` when shortened.
pub fn truncate_to_width(text: &str, max_width_mm: f32, size_pt: f32) -> String {
    if text_width_mm(text, size_pt) <= max_width_mm {
        return text.to_string();
    }
    let mut out = String::new();
    for ch in text.chars() {
        out.push(ch);
        if text_width_mm(&format!("{out}..."), size_pt) > max_width_mm {
            out.pop();
            break;
        }
    }
    out.push_str("...");
    out
}

struct Composer {
    geometry: PageGeometry,
    done: Vec<Page>,
    current: Page,
    y: f32,
}

impl Composer {
    fn new(geometry: PageGeometry) -> Self {
        Self {
            geometry,
            done: Vec::new(),
            current: Page::default(),
            y: geometry.margin_mm,
        }
    }

    fn new_page(&mut self) {
        self.done.push(std::mem::take(&mut self.current));
        self.y = self.geometry.margin_mm;
    }

    /// Starts a new page unless `height` still fits. Returns whether it broke.
    fn ensure(&mut self, height: f32) -> bool {
        let at_top = self.y <= self.geometry.margin_mm;
        if !at_top && self.y + height > self.geometry.bottom() {
            self.new_page();
            return true;
        }
        false
    }

    fn advance(&mut self, dy: f32) {
        self.y += dy;
    }

    fn text(&mut self, x_offset: f32, size_pt: f32, weight: FontWeight, tone: Tone, text: &str) {
        if text.is_empty() {
            return;
        }
        self.current.runs.push(TextRun {
            x_mm: self.geometry.margin_mm + x_offset,
            y_mm: self.y,
            size_pt,
            weight,
            tone,
            text: text.to_string(),
        });
    }

    fn section_title(&mut self, title: &str) {
        self.advance(SECTION_TITLE_MM);
        self.text(0.0, SECTION_PT, FontWeight::Bold, Tone::Body, title);
        self.advance(2.0);
    }

    fn table_header(&mut self) {
        self.advance(ROW_MM);
        for (cell, (x, _)) in TABLE_HEADER.iter().zip(COLUMNS) {
            self.text(x, TABLE_PT, FontWeight::Bold, Tone::Muted, cell);
        }
    }

    fn finish(mut self) -> Vec<Page> {
        self.done.push(self.current);
        self.done
    }
}

/// Lays the report out page by page.
///
/// The table header repeats after every page break inside the table, the
/// three totals rows always share a page, and the analysis starts on a page
/// of its own.
pub fn paginate(report: &Report, geometry: PageGeometry) -> Vec<Page> {
    let mut c = Composer::new(geometry);

    c.advance(SECTION_TITLE_MM);
    c.text(0.0, TITLE_PT, FontWeight::Bold, Tone::Body, &report.title);
    c.advance(LINE_MM + 1.0);
    c.text(0.0, BODY_PT, FontWeight::Regular, Tone::Muted, &report.generated_on);
    c.advance(SECTION_GAP_MM);

    c.section_title("Property Details");
    for row in &report.property_rows {
        c.advance(ROW_MM);
        c.text(0.0, BODY_PT, FontWeight::Bold, Tone::Body, &row.label);
        c.text(40.0, BODY_PT, FontWeight::Regular, Tone::Body, &row.value);
    }
    c.advance(SECTION_GAP_MM);

    // Title, header and at least one row stay together.
    c.ensure(SECTION_TITLE_MM + 2.0 + 2.0 * ROW_MM);
    c.section_title("Renovation Cost Estimate");
    c.table_header();
    for row in &report.estimate_rows {
        if c.ensure(ROW_MM) {
            c.table_header();
        }
        c.advance(ROW_MM);
        match row {
            TableRow::Category(name) => {
                c.text(0.0, TABLE_PT, FontWeight::Bold, Tone::Accent, name);
            }
            TableRow::Item(cells) => {
                for (cell, (x, width)) in cells.iter().zip(COLUMNS) {
                    let fitted = truncate_to_width(cell, width, TABLE_PT);
                    c.text(x, TABLE_PT, FontWeight::Regular, Tone::Body, &fitted);
                }
            }
        }
    }

    let totals_height = TOTALS_GAP_MM + ROW_MM * report.totals.len() as f32;
    c.ensure(totals_height);
    c.advance(TOTALS_GAP_MM);
    let last = report.totals.len().saturating_sub(1);
    for (i, row) in report.totals.iter().enumerate() {
        let weight = if i == last { FontWeight::Bold } else { FontWeight::Regular };
        c.advance(ROW_MM);
        c.text(COLUMNS[2].0, BODY_PT, weight, Tone::Body, &row.label);
        c.text(COLUMNS[4].0, BODY_PT, weight, Tone::Body, &row.value);
    }

    if let Some(analysis) = &report.analysis {
        c.new_page();
        c.advance(SECTION_TITLE_MM);
        c.text(0.0, ANALYSIS_TITLE_PT, FontWeight::Bold, Tone::Body, "AI Investment Analysis");
        c.advance(4.0);
        for line in wrap_text(analysis, geometry.content_width(), BODY_PT) {
            c.ensure(LINE_MM);
            c.advance(LINE_MM);
            c.text(0.0, BODY_PT, FontWeight::Regular, Tone::Body, &line);
        }
    }

    c.finish()
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::models::{Estimate, EstimateItem, default_categories, default_property};
    use crate::report::build_report;

    fn report_with(extra_items: usize, analysis: Option<&str>) -> Report {
        let mut categories = default_categories();
        for n in 0..extra_items {
            categories[5].items.push(EstimateItem {
                id: format!("extra-{n}"),
                name: format!("Extra {n}"),
                unit_price: 10,
                qty: 1,
                conditions: String::new(),
                note: None,
            });
        }
        build_report(
            &default_property(),
            &Estimate::new(categories),
            analysis,
            NaiveDate::from_ymd_opt(2025, 1, 2).unwrap(),
        )
    }

    fn page_of(pages: &[Page], text: &str) -> Option<usize> {
        pages.iter().position(|p| p.contains_text(text))
    }

    // ── wrapping ─────────────────────────────────────────────────────────
    #[test]
    fn wrap_keeps_lines_within_width() {
        let text = "word ".repeat(200);

        let lines = wrap_text(&text, 100.0, BODY_PT);

        assert!(lines.len() > 1);
        for line in &lines {
            assert!(text_width_mm(line, BODY_PT) <= 100.0, "too wide: {line}");
        }
    }

    #[test]
    fn wrap_preserves_explicit_line_breaks() {
        let lines = wrap_text("First.\n\nSecond.", 180.0, BODY_PT);

        assert_eq!(lines, vec!["First.", "", "Second."]);
    }

    #[test]
    fn wrap_splits_words_longer_than_the_line() {
        let word = "x".repeat(300);

        let lines = wrap_text(&word, 50.0, BODY_PT);

        assert!(lines.len() > 1);
        assert_eq!(lines.concat(), word);
    }

    #[test]
    fn truncate_leaves_short_text_alone() {
        assert_eq!(truncate_to_width("Roof", 50.0, TABLE_PT), "Roof");
    }

    #[test]
    fn truncate_marks_shortened_text() {
        let out = truncate_to_width(&"long conditions ".repeat(10), 50.0, TABLE_PT);

        assert!(out.ends_with("..."));
        assert!(text_width_mm(&out, TABLE_PT) <= 50.0);
    }

    // ── pagination ───────────────────────────────────────────────────────
    #[test]
    fn seeded_report_ends_with_totals_and_has_no_blank_pages() {
        let pages = paginate(&report_with(0, None), PageGeometry::A4);

        assert!(pages[0].contains_text("PropertyPro Renovation Report"));
        assert_eq!(page_of(&pages, "Total Budget"), Some(pages.len() - 1));
        assert!(pages.iter().all(|p| !p.runs.is_empty()));
    }

    #[test]
    fn all_runs_stay_inside_the_margins() {
        let geometry = PageGeometry::A4;
        let pages = paginate(&report_with(120, Some(&"analysis ".repeat(900))), geometry);

        for page in &pages {
            for run in &page.runs {
                assert!(run.y_mm <= geometry.height_mm - geometry.margin_mm, "{run:?}");
                assert!(run.x_mm >= geometry.margin_mm);
            }
        }
    }

    #[test]
    fn totals_rows_always_share_a_page() {
        for extra in 0..140 {
            let pages = paginate(&report_with(extra, None), PageGeometry::A4);

            let subtotal = page_of(&pages, "Subtotal");
            let contingency = page_of(&pages, "Contingency (15%)");
            let total = page_of(&pages, "Total Budget");
            assert!(subtotal.is_some(), "totals lost with {extra} extra rows");
            assert_eq!(subtotal, contingency, "split totals with {extra} extra rows");
            assert_eq!(subtotal, total, "split totals with {extra} extra rows");
            assert_eq!(total, Some(pages.len() - 1));
        }
    }

    #[test]
    fn table_header_repeats_on_continuation_pages() {
        let pages = paginate(&report_with(80, None), PageGeometry::A4);

        assert!(pages.len() > 1);
        assert!(pages[1].contains_text("Unit Price"));
    }

    #[test]
    fn analysis_starts_on_its_own_page() {
        let pages = paginate(&report_with(0, Some("Short note.")), PageGeometry::A4);
        let last = pages.len() - 1;

        assert_eq!(page_of(&pages, "AI Investment Analysis"), Some(last));
        assert_eq!(page_of(&pages, "Total Budget"), Some(last - 1));
        assert!(pages[last].contains_text("Short note."));
    }

    #[test]
    fn long_analysis_continues_onto_more_pages() {
        let text = "The roof and the foundation should be inspected. ".repeat(400);

        let without = paginate(&report_with(0, None), PageGeometry::A4).len();
        let pages = paginate(&report_with(0, Some(&text)), PageGeometry::A4);

        assert!(pages.len() > without + 1);
    }
}
