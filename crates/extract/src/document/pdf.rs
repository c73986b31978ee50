use std::panic::{self, AssertUnwindSafe};

use pdparse_core::ParsingError;

use super::{ExtractionError, PageContent};

type Pages = (Vec<PageContent>, Vec<ParsingError>);

/// Run a PDF library call, turning a panic inside it into an error.
///
/// Both pdf-extract and lopdf panic on some malformed inputs.
fn guarded<T>(what: &str, f: impl FnOnce() -> Result<T, String>) -> Result<T, String> {
    match panic::catch_unwind(AssertUnwindSafe(f)) {
        Ok(result) => result,
        Err(_) => Err(format!("{what} panicked")),
    }
}

/// Page-by-page layout text from pdf-extract, numbered from 1.
fn extract_pages_layout(bytes: &[u8]) -> Result<Vec<PageContent>, String> {
    let texts = guarded("pdf-extract", || {
        pdf_extract::extract_text_from_mem_by_pages(bytes).map_err(|e| e.to_string())
    })?;
    if texts.is_empty() {
        return Err("pdf-extract returned no pages".to_string());
    }

    Ok(texts
        .into_iter()
        .enumerate()
        .map(|(i, text)| PageContent::from_text(i + 1, text))
        .collect())
}

/// Page-by-page extraction with lopdf. A failing page is recorded and skipped.
fn extract_pages_lopdf(bytes: &[u8]) -> Result<Pages, String> {
    let doc = guarded("lopdf load", || {
        lopdf::Document::load_mem(bytes).map_err(|e| e.to_string())
    })?;

    let mut pages = Vec::new();
    let mut errors = Vec::new();
    for page_number in doc.get_pages().into_keys() {
        match guarded("lopdf page text", || {
            doc.extract_text(&[page_number]).map_err(|e| e.to_string())
        }) {
            Ok(text) => pages.push(PageContent::from_text(page_number as usize, text)),
            Err(e) => {
                tracing::warn!(page = page_number, error = %e, "page extraction failed, skipping");
                errors.push(ParsingError::page(page_number, format!("Page processing error: {e}")));
            }
        }
    }

    Ok((pages, errors))
}

pub fn extract_pdf(bytes: &[u8]) -> Result<Pages, ExtractionError> {
    let (pages, errors) = match extract_pages_layout(bytes) {
        Ok(pages) => (pages, Vec::new()),
        Err(primary) => {
            tracing::warn!(error = %primary, "pdf-extract failed, falling back to lopdf");
            extract_pages_lopdf(bytes).map_err(|fallback| {
                ExtractionError::PdfError(format!("{primary}; lopdf fallback: {fallback}"))
            })?
        }
    };

    if pages.iter().all(|page| page.text.trim().is_empty()) {
        // Scanned/image-only PDF.
        let mut errors = errors;
        errors.push(ParsingError::document("PDF contains no extractable text layer"));
        return Ok((Vec::new(), errors));
    }

    Ok((pages, errors))
}
