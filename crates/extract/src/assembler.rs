//! Merge every extractor and classifier output into one [`ParsedDocument`].

use std::time::Instant;

use pdparse_core::config::ParserConfig;
use pdparse_core::{ParsedDocument, ParsingError, Statistics};
use tracing::{debug, info, warn};

use crate::document::{extract_document, ExtractedDocument, ExtractionError};
use crate::grouping::group_pages;
use crate::sections::{award, credits, metadata, outcomes, overview, structure, Extraction};

/// Build the complete document from extracted pages.
///
/// Never fails: anything not found keeps its default, and page-level read
/// failures carried by `extracted` are copied into `parsing_errors`.
pub fn assemble(extracted: &ExtractedDocument, config: &ParserConfig) -> ParsedDocument {
    let text = extracted.full_text();
    let mut misses: Vec<&'static str> = Vec::new();

    let mut doc = ParsedDocument::for_university(&config.university);
    doc.details = take(metadata::extract_details(&text, &config.university), &mut misses);
    doc.award = take(award::extract_award(&text, &config.university), &mut misses);
    doc.overview = take(overview::extract_overview(&text), &mut misses);
    doc.peos = take(outcomes::extract_peos(&text), &mut misses);
    doc.pos = take(outcomes::extract_pos(&text), &mut misses);
    doc.psos = take(outcomes::extract_psos(&text), &mut misses);
    doc.credit_def = take(credits::extract_credit_def(&text), &mut misses);
    doc.structure_table = take(structure::extract_structure(&text), &mut misses);

    let grouped = group_pages(&extracted.pages);
    let courses_found = grouped.course_count();
    doc.semesters = grouped.semesters;
    doc.prof_electives = grouped.prof_electives;
    doc.open_electives = grouped.open_electives;
    doc.parsing_errors.extend(extracted.errors.iter().cloned());
    doc.normalize();

    doc.statistics = Statistics {
        pages_processed: extracted.pages.len(),
        tables_found: extracted.table_count(),
        courses_found,
        outcomes_found: doc
            .peos
            .iter()
            .chain(&doc.pos)
            .chain(&doc.psos)
            .filter(|s| !s.is_empty())
            .count(),
        total_credits: doc.total_credits(),
    };

    if !misses.is_empty() {
        debug!(file = %extracted.filename, ?misses, "Fields left at defaults");
    }
    doc
}

fn take<T>(out: Extraction<T>, misses: &mut Vec<&'static str>) -> T {
    misses.extend(out.misses);
    out.value
}

/// Parse PDF bytes end to end.
///
/// Only an unsupported file type is an error. A PDF that cannot be read
/// still yields the default-shaped document, with the failure recorded in
/// `parsing_errors`.
pub fn parse_pdf(
    bytes: &[u8],
    filename: &str,
    config: &ParserConfig,
) -> Result<ParsedDocument, ExtractionError> {
    let start = Instant::now();
    let doc = match extract_document(bytes, filename) {
        Ok(extracted) => {
            for err in &extracted.errors {
                warn!(file = %filename, page = ?err.page, reason = %err.reason, "Page extraction failed");
            }
            assemble(&extracted, config)
        }
        Err(e @ ExtractionError::UnsupportedType(_)) => return Err(e),
        Err(e) => {
            warn!(file = %filename, error = %e, "Document extraction failed, returning defaults");
            let mut doc = ParsedDocument::for_university(&config.university);
            doc.parsing_errors.push(ParsingError::document(e.to_string()));
            doc.normalize();
            doc
        }
    };

    info!(
        file = %filename,
        pages = doc.statistics.pages_processed,
        courses = doc.statistics.courses_found,
        errors = doc.parsing_errors.len(),
        elapsed_ms = start.elapsed().as_millis() as u64,
        "Parsed document"
    );
    Ok(doc)
}
