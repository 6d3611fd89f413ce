//! Plain-text PDF emission. No wrapping: long lines are cut at `MAX_LINE_CHARS`.
//!
//! Geometry is in points on US letter, origin bottom-left (PDF convention).

use printpdf::{BuiltinFont, Mm, PdfDocument};
use serde::Serialize;

use crate::render::DocumentError;

const PAGE_WIDTH_PT: f32 = 612.0;
const PAGE_HEIGHT_PT: f32 = 792.0;
const MARGIN_PT: f32 = 40.0;
const LINE_HEIGHT_PT: f32 = 15.0;
const FONT_SIZE_PT: f32 = 12.0;
pub const MAX_LINE_CHARS: usize = 90;

/// One painted line.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlacedLine {
    pub text: String,
    pub x_pt: f32,
    pub y_pt: f32,
}

/// Assigns every line (blank ones included) a page and baseline.
/// A new page starts once the cursor has dropped below the bottom margin.
pub fn layout_pages(text: &str) -> Vec<Vec<PlacedLine>> {
    let mut pages = vec![Vec::new()];
    let mut y = PAGE_HEIGHT_PT - MARGIN_PT;

    for line in text.split('\n') {
        if y < MARGIN_PT {
            pages.push(Vec::new());
            y = PAGE_HEIGHT_PT - MARGIN_PT;
        }
        let truncated: String = line.trim_end_matches('\r').chars().take(MAX_LINE_CHARS).collect();
        if let Some(page) = pages.last_mut() {
            page.push(PlacedLine {
                text: truncated,
                x_pt: MARGIN_PT,
                y_pt: y,
            });
        }
        y -= LINE_HEIGHT_PT;
    }

    pages
}

fn mm(pt: f32) -> Mm {
    Mm(pt * 25.4 / 72.0)
}

/// Encodes with the built-in Helvetica (WinAnsi). Characters outside that set,
/// such as arrows, CJK, Arabic or emoji, are not rendered.
pub fn to_pdf(text: &str, title: &str) -> Result<Vec<u8>, DocumentError> {
    let (doc, first_page, first_layer) =
        PdfDocument::new(title, mm(PAGE_WIDTH_PT), mm(PAGE_HEIGHT_PT), "Layer 1");
    let font = doc
        .add_builtin_font(BuiltinFont::Helvetica)
        .map_err(|e| DocumentError::Pdf(e.to_string()))?;

    for (index, lines) in layout_pages(text).into_iter().enumerate() {
        let (page, layer) = if index == 0 {
            (first_page, first_layer)
        } else {
            doc.add_page(mm(PAGE_WIDTH_PT), mm(PAGE_HEIGHT_PT), "Layer 1")
        };
        let layer = doc.get_page(page).get_layer(layer);
        for line in lines.iter().filter(|l| !l.text.is_empty()) {
            layer.use_text(
                line.text.as_str(),
                FONT_SIZE_PT,
                mm(line.x_pt),
                mm(line.y_pt),
                &font,
            );
        }
    }

    doc.save_to_bytes()
        .map_err(|e| DocumentError::Pdf(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lines(n: usize) -> String {
        (1..=n)
            .map(|i| format!("Line {i}"))
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[test]
    fn test_first_line_starts_below_top_margin() {
        let pages = layout_pages("Jane Doe\nEngineer");
        assert_eq!(pages.len(), 1);
        assert_eq!(pages[0][0].y_pt, 752.0);
        assert_eq!(pages[0][1].y_pt, 737.0);
        assert!(pages[0].iter().all(|l| l.x_pt == 40.0));
    }

    #[test]
    fn test_page_breaks_after_cursor_crosses_bottom_margin() {
        // 752, 737, ... 47 fit (48 lines); the 49th would sit at 32 < 40.
        let pages = layout_pages(&lines(49));
        assert_eq!(pages.len(), 2);
        assert_eq!(pages[0].len(), 48);
        assert_eq!(pages[0].last().unwrap().y_pt, 47.0);
        assert_eq!(pages[1][0].text, "Line 49");
        assert_eq!(pages[1][0].y_pt, 752.0);
    }

    #[test]
    fn test_long_lines_are_truncated_not_wrapped() {
        let long = "x".repeat(200);
        let pages = layout_pages(&long);
        assert_eq!(pages[0].len(), 1);
        assert_eq!(pages[0][0].text.chars().count(), MAX_LINE_CHARS);
    }

    #[test]
    fn test_truncation_counts_characters_not_bytes() {
        let accented = "é".repeat(100);
        let pages = layout_pages(&accented);
        assert_eq!(pages[0][0].text, "é".repeat(MAX_LINE_CHARS));
    }

    #[test]
    fn test_blank_lines_still_advance_cursor() {
        let pages = layout_pages("A\n\nB");
        assert_eq!(pages[0].len(), 3);
        assert_eq!(pages[0][2].y_pt, 722.0);
    }

    #[test]
    fn test_pdf_bytes_have_pdf_header() {
        let bytes = to_pdf(&lines(60), "Optimized_Resume").unwrap();
        assert!(bytes.starts_with(b"%PDF"));
    }

    #[test]
    fn test_non_latin_text_still_encodes() {
        let bytes = to_pdf("Jane Doe → Engineer\nلم يتم\n日本語 ✓", "Cover_Letter").unwrap();
        assert!(bytes.starts_with(b"%PDF"));
    }
}
