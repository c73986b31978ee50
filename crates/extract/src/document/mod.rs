mod pdf;
pub mod table;

use pdparse_core::ParsingError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ExtractionError {
    #[error("Unsupported file type: {0}")]
    UnsupportedType(String),
    #[error("PDF extraction failed: {0}")]
    PdfError(String),
}

/// A table as rows of possibly-empty cell strings.
pub type Table = Vec<Vec<String>>;

/// A page of extracted text with the tables found on it.
#[derive(Debug, Clone, Default)]
pub struct PageContent {
    /// 1-based page number.
    pub page_number: usize,
    /// The extracted text content.
    pub text: String,
    /// Tables inferred from the page layout.
    pub tables: Vec<Table>,
}

impl PageContent {
    /// Build a page from raw text, inferring its tables.
    pub fn from_text(page_number: usize, text: impl Into<String>) -> Self {
        let text = text.into();
        let tables = table::detect_tables(&text);
        Self {
            page_number,
            text,
            tables,
        }
    }
}

/// Result of extracting text from a document.
#[derive(Debug, Clone, Default)]
pub struct ExtractedDocument {
    /// Original filename.
    pub filename: String,
    /// Extracted pages with text and tables.
    pub pages: Vec<PageContent>,
    /// Pages that could not be read; the rest are still usable.
    pub errors: Vec<ParsingError>,
}

impl ExtractedDocument {
    /// Get all page text concatenated, one newline between pages.
    pub fn full_text(&self) -> String {
        self.pages
            .iter()
            .map(|p| p.text.as_str())
            .collect::<Vec<_>>()
            .join("\n")
    }

    pub fn table_count(&self) -> usize {
        self.pages.iter().map(|p| p.tables.len()).sum()
    }
}

/// Extract pages and tables from file bytes based on file type.
pub fn extract_document(bytes: &[u8], filename: &str) -> Result<ExtractedDocument, ExtractionError> {
    let ext = filename.rsplit('.').next().unwrap_or("").to_lowercase();

    let (pages, errors) = match ext.as_str() {
        "pdf" => pdf::extract_pdf(bytes)?,
        other => return Err(ExtractionError::UnsupportedType(other.to_string())),
    };

    Ok(ExtractedDocument {
        filename: filename.to_string(),
        pages,
        errors,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_non_pdf_extension() {
        let err = extract_document(b"hello", "notes.txt").unwrap_err();
        assert!(matches!(err, ExtractionError::UnsupportedType(ext) if ext == "txt"));
    }

    #[test]
    fn garbage_pdf_is_an_error_not_a_panic() {
        let err = extract_document(b"this is not a pdf", "broken.pdf").unwrap_err();
        assert!(matches!(err, ExtractionError::PdfError(_)));
    }

    #[test]
    fn full_text_joins_pages() {
        let doc = ExtractedDocument {
            filename: "x.pdf".to_string(),
            pages: vec![PageContent::from_text(1, "first"), PageContent::from_text(2, "second")],
            errors: Vec::new(),
        };
        assert_eq!(doc.full_text(), "first\nsecond");
        assert_eq!(doc.table_count(), 0);
    }
}
