//! PDF rendering of laid-out report pages using the built-in Helvetica
//! faces, so no font files have to ship with the application.

use printpdf::{BuiltinFont, Color, IndirectFontRef, Mm, PdfDocument, PdfLayerReference, Rgb};
use reno_core::report::{FontWeight, Page, PageGeometry, ReportError, ReportRenderer};
use tracing::{debug, warn};

const LAYER: &str = "Layer 1";

#[derive(Debug, Default, Clone, Copy)]
pub struct PdfRenderer;

struct Fonts {
    regular: IndirectFontRef,
    bold: IndirectFontRef,
}

impl Fonts {
    fn for_weight(&self, weight: FontWeight) -> &IndirectFontRef {
        match weight {
            FontWeight::Regular => &self.regular,
            FontWeight::Bold => &self.bold,
        }
    }
}

/// Characters outside ASCII and Latin-1 that Windows-1252 still maps.
const WIN_ANSI_EXTRAS: [char; 27] = [
    '\u{20AC}', '\u{201A}', '\u{0192}', '\u{201E}', '\u{2026}', '\u{2020}', '\u{2021}',
    '\u{02C6}', '\u{2030}', '\u{0160}', '\u{2039}', '\u{0152}', '\u{017D}', '\u{2018}',
    '\u{2019}', '\u{201C}', '\u{201D}', '\u{2022}', '\u{2013}', '\u{2014}', '\u{02DC}',
    '\u{2122}', '\u{0161}', '\u{203A}', '\u{0153}', '\u{017E}', '\u{0178}',
];

/// How many characters of `text` the built-in Helvetica faces cannot draw.
fn unencodable_chars(text: &str) -> usize {
    text.chars()
        .filter(|&c| {
            !matches!(c, ' '..='~' | '\u{A0}'..='\u{FF}') && !WIN_ANSI_EXTRAS.contains(&c)
        })
        .count()
}

fn draw_page(layer: &PdfLayerReference, fonts: &Fonts, geometry: PageGeometry, page: &Page) {
    for run in &page.runs {
        let missing = unencodable_chars(&run.text);
        if missing > 0 {
            warn!(
                missing,
                text = %run.text,
                "characters outside the built-in font will be missing from the PDF"
            );
        }
        let (r, g, b) = run.tone.rgb();
        layer.set_fill_color(Color::Rgb(Rgb::new(r, g, b, None)));
        // printpdf measures y from the bottom edge.
        layer.use_text(
            run.text.as_str(),
            run.size_pt,
            Mm(run.x_mm),
            Mm(geometry.height_mm - run.y_mm),
            fonts.for_weight(run.weight),
        );
    }
}

impl ReportRenderer for PdfRenderer {
    fn render(
        &self,
        title: &str,
        geometry: PageGeometry,
        pages: &[Page],
    ) -> Result<Vec<u8>, ReportError> {
        let width = Mm(geometry.width_mm);
        let height = Mm(geometry.height_mm);
        let (doc, first_page, first_layer) = PdfDocument::new(title, width, height, LAYER);

        let fonts = Fonts {
            regular: doc
                .add_builtin_font(BuiltinFont::Helvetica)
                .map_err(|e| ReportError::Render(e.to_string()))?,
            bold: doc
                .add_builtin_font(BuiltinFont::HelveticaBold)
                .map_err(|e| ReportError::Render(e.to_string()))?,
        };

        let mut pages_iter = pages.iter();
        if let Some(page) = pages_iter.next() {
            let layer = doc.get_page(first_page).get_layer(first_layer);
            draw_page(&layer, &fonts, geometry, page);
        }
        for page in pages_iter {
            let (page_index, layer_index) = doc.add_page(width, height, LAYER);
            let layer = doc.get_page(page_index).get_layer(layer_index);
            draw_page(&layer, &fonts, geometry, page);
        }

        debug!(pages = pages.len(), "pdf rendered");
        doc.save_to_bytes()
            .map_err(|e| ReportError::Render(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use reno_core::report::{TextRun, Tone};

    use super::*;

    fn page_with(text: &str) -> Page {
        Page {
            runs: vec![TextRun {
                x_mm: 14.0,
                y_mm: 20.0,
                size_pt: 12.0,
                weight: FontWeight::Bold,
                tone: Tone::Accent,
                text: text.to_string(),
            }],
        }
    }

    #[test]
    fn renders_a_pdf_document() {
        let bytes = PdfRenderer
            .render("Title", PageGeometry::A4, &[page_with("Hello")])
            .unwrap();

        assert!(bytes.starts_with(b"%PDF"));
    }

    #[test]
    fn more_pages_make_a_larger_document() {
        let one = PdfRenderer
            .render("Title", PageGeometry::A4, &[page_with("a")])
            .unwrap();
        let three = PdfRenderer
            .render(
                "Title",
                PageGeometry::A4,
                &[page_with("a"), page_with("b"), page_with("c")],
            )
            .unwrap();

        assert!(three.len() > one.len());
    }

    // ── font coverage ────────────────────────────────────────────────────
    #[test]
    fn latin_text_and_typographic_punctuation_are_drawable() {
        let text = "Caf\u{E9} \u{201C}fixer\u{201D} \u{2013} \u{20AC}5,000";

        assert_eq!(unencodable_chars(text), 0);
    }

    #[test]
    fn emoji_and_cjk_are_counted_as_missing() {
        assert_eq!(unencodable_chars("Great flip \u{1F3E0}"), 1);
        assert_eq!(unencodable_chars("\u{4E0D}\u{52A8}\u{4EA7}"), 3);
        assert_eq!(unencodable_chars("tab\there"), 1);
    }

    #[test]
    fn narrative_with_undrawable_characters_still_renders() {
        let page = page_with("ROI \u{1F4C8} \u{4E0D}\u{52A8}\u{4EA7}");

        let bytes = PdfRenderer.render("Title", PageGeometry::A4, &[page]).unwrap();

        assert!(bytes.starts_with(b"%PDF"));
    }

    #[test]
    fn no_pages_still_yields_a_document() {
        let bytes = PdfRenderer.render("Empty", PageGeometry::A4, &[]).unwrap();

        assert!(bytes.starts_with(b"%PDF"));
    }
}
