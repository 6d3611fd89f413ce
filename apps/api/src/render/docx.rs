use std::io::Cursor;

use docx_rs::{Docx, Paragraph, Run};

use crate::render::DocumentError;

/// One paragraph per non-empty line, in order. Lines are trimmed; blank lines
/// are dropped rather than emitted as empty paragraphs.
pub fn to_docx(text: &str) -> Result<Vec<u8>, DocumentError> {
    let docx = text
        .split('\n')
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .fold(Docx::new(), |docx, line| {
            docx.add_paragraph(Paragraph::new().add_run(Run::new().add_text(line)))
        });

    let mut cursor = Cursor::new(Vec::new());
    docx.build()
        .pack(&mut cursor)
        .map_err(|e| DocumentError::Docx(e.to_string()))?;
    Ok(cursor.into_inner())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ingest::extract::docx_paragraphs;

    #[test]
    fn test_blank_lines_are_not_paragraphs() {
        let bytes = to_docx("A\n\nB\n").unwrap();
        assert_eq!(
            docx_paragraphs(&bytes).unwrap(),
            vec!["A".to_string(), "B".to_string()]
        );
    }

    #[test]
    fn test_lines_are_trimmed() {
        let bytes = to_docx("  Jane Doe  \r\n\tPlatform Engineer\n   \n").unwrap();
        assert_eq!(
            docx_paragraphs(&bytes).unwrap(),
            vec!["Jane Doe".to_string(), "Platform Engineer".to_string()]
        );
    }

    #[test]
    fn test_empty_text_is_still_a_valid_document() {
        let bytes = to_docx("").unwrap();
        assert!(docx_paragraphs(&bytes).unwrap().is_empty());
    }

    #[test]
    fn test_output_is_a_zip_container() {
        let bytes = to_docx("Hello").unwrap();
        assert_eq!(&bytes[..2], b"PK");
    }
}
