//! Curriculum extraction pipeline.
//!
//! PDF bytes go through [`document::extract_document`] to obtain per-page text
//! and inferred tables, then [`assembler::assemble`] runs every section
//! extractor and table classifier over them and merges the results into a
//! [`pdparse_core::ParsedDocument`].

pub mod assembler;
pub mod document;
pub mod grouping;
pub mod normalize;
pub mod sections;
pub mod tables;
pub mod validate;

pub use assembler::{assemble, parse_pdf};
pub use document::{extract_document, ExtractedDocument, ExtractionError, PageContent, Table};
pub use validate::{validate, ValidationReport};
