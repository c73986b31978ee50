//! End-to-end runs of the extraction pipeline over synthetic documents.

use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Document, Object, Stream};
use pdparse_core::config::ParserConfig;
use pdparse_core::{Course, ParsedDocument};
use pdparse_extract::{assemble, parse_pdf, validate, ExtractedDocument, PageContent};

fn config() -> ParserConfig {
    ParserConfig {
        university: "GM University".to_string(),
    }
}

fn page_with_table(n: usize, text: &str, rows: &[&[&str]]) -> PageContent {
    PageContent {
        page_number: n,
        text: text.to_string(),
        tables: vec![rows
            .iter()
            .map(|r| r.iter().map(|c| c.to_string()).collect())
            .collect()],
    }
}

fn document(pages: Vec<PageContent>) -> ExtractedDocument {
    ExtractedDocument {
        filename: "program.pdf".to_string(),
        pages,
        errors: Vec::new(),
    }
}

/// One-page PDF with each line drawn in Helvetica.
fn pdf_with_lines(lines: &[&str]) -> Vec<u8> {
    pdf_with_pages(&[lines])
}

/// PDF with one page per entry, each line drawn in Helvetica.
fn pdf_with_pages(pages: &[&[&str]]) -> Vec<u8> {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();
    let font_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Helvetica",
    });
    let resources_id = doc.add_object(dictionary! {
        "Font" => dictionary! { "F1" => font_id },
    });

    let mut kids = Vec::new();
    for lines in pages {
        let mut operations = vec![
            Operation::new("BT", vec![]),
            Operation::new("Tf", vec!["F1".into(), 12.into()]),
            Operation::new("TL", vec![16.into()]),
            Operation::new("Td", vec![72.into(), 760.into()]),
        ];
        for line in lines.iter() {
            operations.push(Operation::new("Tj", vec![Object::string_literal(*line)]));
            operations.push(Operation::new("T*", vec![]));
        }
        operations.push(Operation::new("ET", vec![]));
        let content = Content { operations };

        let content_id = doc.add_object(Stream::new(dictionary! {}, content.encode().unwrap()));
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Contents" => content_id,
        });
        kids.push(Object::from(page_id));
    }

    let count = kids.len() as i64;
    let pages = dictionary! {
        "Type" => "Pages",
        "Kids" => kids,
        "Count" => count,
        "Resources" => resources_id,
        "MediaBox" => vec![0.into(), 0.into(), 595.into(), 842.into()],
    };
    doc.objects.insert(pages_id, Object::Dictionary(pages));
    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);

    let mut bytes = Vec::new();
    doc.save_to(&mut bytes).unwrap();
    bytes
}

// ── Course tables ─────────────────────────────────────────────

#[test]
fn semester_table_becomes_semester_entry() {
    let page = page_with_table(
        1,
        "Semester-3",
        &[
            &["Course Code", "Course Title", "Credits"],
            &["UE24CS3001", "Data Structures", "4"],
        ],
    );
    let doc = assemble(&document(vec![page]), &config());

    let sem = doc.semesters.iter().find(|s| s.sem_no == 3).unwrap();
    assert_eq!(sem.courses, vec![Course::new("UE24CS3001", "Data Structures", 4)]);

    let json = serde_json::to_value(&sem).unwrap();
    assert_eq!(
        json,
        serde_json::json!({
            "sem_no": 3,
            "courses": [{
                "code": "UE24CS3001",
                "title": "Data Structures",
                "credits": 4,
                "type": "Theory",
                "category": "Core"
            }]
        })
    );
}

#[test]
fn table_without_header_is_skipped() {
    let page = page_with_table(
        1,
        "Semester-3",
        &[&["Code", "Name", "Credits"], &["UE24CS3001", "Data Structures", "4"]],
    );
    let doc = assemble(&document(vec![page]), &config());
    assert_eq!(doc.course_count(), 0);
    assert_eq!(doc.statistics.courses_found, 0);
}

#[test]
fn electives_are_grouped_per_semester() {
    let header: &[&str] = &["Sl. No.", "Course Code", "Course Title", "Credits"];
    let pages = vec![
        page_with_table(
            9,
            "List of Professional Electives\n5th Semester",
            &[header, &["-", "UE24CS5011", "Cloud Computing", ""], &["2", "UE24CS5012", "Blockchain", "4"]],
        ),
        page_with_table(
            10,
            "List of Open Electives\n6th Semester",
            &[header, &["1", "UE24CS6051", "Internet of Things", "3"]],
        ),
    ];
    let doc = assemble(&document(pages), &config());

    assert_eq!(doc.prof_electives.len(), 1);
    assert_eq!(doc.prof_electives[0].sem, 5);
    assert_eq!(doc.prof_electives[0].title, "Professional Electives - Semester 5");
    let credits: Vec<u32> = doc.prof_electives[0].courses.iter().map(|c| c.credits).collect();
    assert_eq!(credits, vec![3, 4]);
    assert_eq!(doc.open_electives[0].title, "Open Electives - Semester 6");
    assert_eq!(doc.statistics.courses_found, 3);
}

// ── Semester padding ──────────────────────────────────────────

fn with_semesters(numbers: &[u32]) -> ParsedDocument {
    let pages = numbers
        .iter()
        .enumerate()
        .map(|(i, n)| {
            let code = format!("UE24CS{n:02}01");
            page_with_table(
                i + 1,
                &format!("Semester-{n}"),
                &[&["Course Code", "Course Title"], &[code.as_str(), "Course"]],
            )
        })
        .collect();
    assemble(&document(pages), &config())
}

#[test]
fn no_semesters_pad_to_eight() {
    let doc = with_semesters(&[]);
    let numbers: Vec<u32> = doc.semesters.iter().map(|s| s.sem_no).collect();
    assert_eq!(numbers, (1..=8).collect::<Vec<_>>());
}

#[test]
fn some_semesters_pad_and_sort() {
    let doc = with_semesters(&[7, 2, 5]);
    let numbers: Vec<u32> = doc.semesters.iter().map(|s| s.sem_no).collect();
    assert_eq!(numbers, (1..=8).collect::<Vec<_>>());
    assert_eq!(doc.semesters[6].courses[0].code, "UE24CS0701");
    assert!(doc.semesters[0].courses.is_empty());
}

#[test]
fn more_than_eight_semesters_are_kept() {
    let doc = with_semesters(&(1..=12).rev().collect::<Vec<_>>());
    let numbers: Vec<u32> = doc.semesters.iter().map(|s| s.sem_no).collect();
    assert_eq!(numbers, (1..=12).collect::<Vec<_>>());
    assert!(doc.semesters.iter().all(|s| s.courses.len() == 1));
}

// ── Whole-document behavior ───────────────────────────────────

#[test]
fn empty_document_yields_default_shape() {
    let doc = assemble(&ExtractedDocument::default(), &config());
    assert_eq!(doc.peos, vec!["", "", ""]);
    assert_eq!(doc.psos, vec!["", "", ""]);
    assert_eq!(doc.semesters.len(), 8);
    assert!(doc.semesters.iter().all(|s| s.courses.is_empty()));
    assert_eq!(doc, ParsedDocument::default());
}

#[test]
fn output_round_trips_through_normalization() {
    let page = page_with_table(
        1,
        "GM UNIVERSITY\n2024 Scheme\nFaculty Engineering and Technology\nSemester-4\n\
         Program Educational Objectives\nPEO-1: Excellence\nBe excellent.\n",
        &[&["Course Code", "Course Title", "Credits"], &["UE24CS4001", "Operating Systems", "4"]],
    );
    let doc = assemble(&document(vec![page]), &config());
    let json = serde_json::to_value(&doc).unwrap();
    let again = ParsedDocument::from_value(json).unwrap();
    assert_eq!(again, doc);
    assert_eq!(again.peos, vec!["<b>Excellence</b><br/>Be excellent."]);
    assert_eq!(again.details.scheme_year, "2024");
}

#[test]
fn assembled_output_passes_validation_shape_checks() {
    let doc = assemble(&ExtractedDocument::default(), &config());
    let report = validate(&serde_json::to_value(&doc).unwrap());
    assert!(report.valid);
    assert!(report.errors.is_empty());
}

#[test]
fn corrupt_pdf_is_not_fatal() {
    let doc = parse_pdf(b"%PDF-1.4 truncated garbage", "broken.pdf", &config()).unwrap();
    assert_eq!(doc.semesters.len(), 8);
    assert_eq!(doc.parsing_errors.len(), 1);
    assert!(doc.parsing_errors[0].page.is_none());
}

#[test]
fn real_pdf_text_reaches_the_extractors() {
    let bytes = pdf_with_lines(&["Program Outcomes", "PO-1: Engineering knowledge: Apply science."]);
    let doc = parse_pdf(&bytes, "generated.pdf", &config()).unwrap();
    assert!(doc.parsing_errors.is_empty(), "{:?}", doc.parsing_errors);
    assert_eq!(doc.statistics.pages_processed, 1);
    assert_eq!(doc.pos.len(), 1);
    assert!(doc.pos[0].starts_with("<b>Engineering knowledge</b>"));
}

#[test]
fn each_pdf_page_feeds_its_own_semester() {
    let bytes = pdf_with_pages(&[
        &["Semester-1", "Course Code Course Title Credits", "UE24CS1001 Calculus 4"],
        &["Semester-2", "Course Code Course Title Credits", "UE24CS2001 Digital Logic 3"],
    ]);
    let doc = parse_pdf(&bytes, "two-pages.pdf", &config()).unwrap();
    assert!(doc.parsing_errors.is_empty(), "{:?}", doc.parsing_errors);
    assert_eq!(doc.statistics.pages_processed, 2);

    let codes = |sem: usize| -> Vec<String> {
        doc.semesters[sem - 1].courses.iter().map(|c| c.code.clone()).collect()
    };
    assert_eq!(codes(1), vec!["UE24CS1001"]);
    assert_eq!(codes(2), vec!["UE24CS2001"]);
    assert_eq!(doc.semesters[1].courses[0].title, "Digital Logic");
    assert_eq!(doc.semesters[1].courses[0].credits, 3);
}
