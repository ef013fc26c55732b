//! Integration tests for the extraction pipeline end to end.
//!
//! Uses a MockExtractor that returns pre-built PageWords without invoking
//! pdftotext, so these tests run without poppler-utils.

use chrono::NaiveDate;
use releve_core::batch::{run_batch, split_statement, BatchOptions, DocumentStatus};
use releve_core::error::ReleveError;
use releve_core::export::read_csv;
use releve_core::extraction::split::PageSplitter;
use releve_core::extraction::{PageWords, WordExtractor};
use releve_core::model::PositionedWord;
use releve_core::template::builtin::load_preset;
use releve_core::{extract_statement, extract_statement_from_pages};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

struct MockExtractor {
    pages: Vec<PageWords>,
}

impl WordExtractor for MockExtractor {
    fn extract_words(&self, _pdf_bytes: &[u8]) -> Result<Vec<PageWords>, ReleveError> {
        Ok(self.pages.clone())
    }

    fn backend_name(&self) -> &str {
        "mock"
    }
}

/// Fails on PDFs containing "corrupt"; yields an empty page for "blank".
struct PickyExtractor {
    pages: Vec<PageWords>,
}

impl WordExtractor for PickyExtractor {
    fn extract_words(&self, pdf_bytes: &[u8]) -> Result<Vec<PageWords>, ReleveError> {
        if pdf_bytes.windows(7).any(|w| w == b"corrupt") {
            return Err(ReleveError::PdftotextFailed {
                code: 1,
                stderr: "Syntax Error: Couldn't read xref table".into(),
            });
        }
        if pdf_bytes.windows(5).any(|w| w == b"blank") {
            return Ok(vec![page(1, &[])]);
        }
        Ok(self.pages.clone())
    }

    fn backend_name(&self) -> &str {
        "picky"
    }
}

/// Splits any input into a statement page followed by a blank page.
struct FixedSplitter;

impl PageSplitter for FixedSplitter {
    fn split_pages(&self, _pdf_bytes: &[u8]) -> Result<Vec<Vec<u8>>, ReleveError> {
        Ok(vec![b"%PDF ok".to_vec(), b"%PDF blank".to_vec()])
    }

    fn backend_name(&self) -> &str {
        "fixed"
    }
}

/// Build a page where each entry of `lines` becomes one block/line.
fn page(number: usize, lines: &[&[(f32, &str)]]) -> PageWords {
    let mut words = Vec::new();
    for (i, line) in lines.iter().enumerate() {
        let y = 100.0 + i as f32 * 14.0;
        for (x, text) in line.iter() {
            words.push(PositionedWord::new(*x, y, i as u32 + 1, 1, *text));
        }
    }
    PageWords {
        page_number: number,
        words,
    }
}

fn statement_page() -> PageWords {
    page(
        1,
        &[
            &[(40.0, "ORABANK"), (120.0, "TOGO")],
            &[(187.0, "Solde"), (216.0, "précédent"), (530.0, "1.250"), (560.0, "000")],
            &[
                (40.0, "Date"),
                (95.0, "Libellé"),
                (280.0, "Valeur"),
                (360.0, "Débit"),
                (440.0, "Crédit"),
                (520.0, "Solde"),
            ],
            &[
                (40.0, "06/10/2025"),
                (95.0, "VIREMENT"),
                (150.0, "RECU"),
                (280.0, "06/10/2025"),
                (440.0, "767"),
                (470.0, "000"),
                (530.0, "2.017.000"),
            ],
            &[(95.0, "DE"), (120.0, "DUPONT")],
            &[
                (40.0, "03/10/2025"),
                (95.0, "RETRAIT"),
                (150.0, "GAB"),
                (280.0, "04/10/2025"),
                (360.0, "17.000"),
                (530.0, "1.233.000"),
            ],
            &[(95.0, "AGENCE"), (140.0, "CENTRE")],
            &[(95.0, "Page"), (130.0, "1/2")],
        ],
    )
}

// ---------------------------------------------------------------------------
// Test 1: Two transactions with one continuation line each
// ---------------------------------------------------------------------------
#[test]
fn two_transactions_with_continuations() {
    let template = load_preset("orabank").unwrap();
    let extractor = MockExtractor {
        pages: vec![statement_page()],
    };

    let statement = extract_statement(&[], &extractor, &template).unwrap();

    assert_eq!(statement.raw_count, 2);
    assert_eq!(statement.dropped, 0);
    assert_eq!(statement.transactions.len(), 2);

    // Sorted by date: the retrait (03/10) comes first.
    let retrait = &statement.transactions[0];
    assert_eq!(retrait.date, NaiveDate::from_ymd_opt(2025, 10, 3).unwrap());
    assert_eq!(retrait.date_valeur, NaiveDate::from_ymd_opt(2025, 10, 4));
    assert_eq!(retrait.libelle, "RETRAIT GAB AGENCE CENTRE");
    assert_eq!(retrait.debit, dec!(17000));
    assert_eq!(retrait.credit, Decimal::ZERO);
    assert_eq!(retrait.solde, dec!(1233000));

    let virement = &statement.transactions[1];
    assert_eq!(virement.libelle, "VIREMENT RECU DE DUPONT");
    assert_eq!(virement.credit, dec!(767000));
    assert_eq!(virement.solde, dec!(2017000));

    assert_eq!(statement.preceding_balance, Some(dec!(1250000)));
}

// ---------------------------------------------------------------------------
// Test 2: Same input, same output, whatever the word order
// ---------------------------------------------------------------------------
#[test]
fn output_is_deterministic() {
    let template = load_preset("orabank").unwrap();
    let mut shuffled = statement_page();
    shuffled.words.reverse();

    let a = extract_statement_from_pages(&[statement_page()], &template);
    let b = extract_statement_from_pages(&[statement_page()], &template);
    let c = extract_statement_from_pages(&[shuffled], &template);

    assert_eq!(
        serde_json::to_string(&a).unwrap(),
        serde_json::to_string(&b).unwrap()
    );
    assert_eq!(
        serde_json::to_string(&a).unwrap(),
        serde_json::to_string(&c).unwrap()
    );
}

// ---------------------------------------------------------------------------
// Test 3: Merged total row is cut before column assignment
// ---------------------------------------------------------------------------
#[test]
fn merged_total_row_is_truncated() {
    let template = load_preset("orabank").unwrap();
    let pages = vec![page(
        1,
        &[&[
            (40.0, "12/03/2025"),
            (95.0, "ACHAT"),
            (300.0, "Total"),
            (340.0, "général"),
            (400.0, "Solde:"),
            (530.0, "50000"),
        ]],
    )];

    let statement = extract_statement_from_pages(&pages, &template);
    assert_eq!(statement.transactions.len(), 1);
    let tx = &statement.transactions[0];
    assert_eq!(tx.libelle, "ACHAT");
    assert_eq!(tx.date_valeur, None);
    assert_eq!(tx.debit, Decimal::ZERO);
    assert_eq!(tx.solde, Decimal::ZERO);
}

// ---------------------------------------------------------------------------
// Test 4: Invalid calendar date drops the row
// ---------------------------------------------------------------------------
#[test]
fn invalid_calendar_date_is_dropped() {
    let template = load_preset("orabank").unwrap();
    let pages = vec![page(
        1,
        &[
            &[(40.0, "31/02/2025"), (95.0, "FANTOME"), (360.0, "100")],
            &[(40.0, "01/03/2025"), (95.0, "REEL"), (360.0, "200")],
        ],
    )];

    let statement = extract_statement_from_pages(&pages, &template);
    assert_eq!(statement.raw_count, 2);
    assert_eq!(statement.dropped, 1);
    assert_eq!(statement.transactions.len(), 1);
    assert_eq!(statement.transactions[0].libelle, "REEL");
}

// ---------------------------------------------------------------------------
// Test 5: Header repeated at the top of a second page
// ---------------------------------------------------------------------------
#[test]
fn repeated_header_and_page_wrap() {
    let template = load_preset("orabank").unwrap();
    let pages = vec![
        page(1, &[&[(40.0, "06/10/2025"), (95.0, "PRELEVEMENT")]]),
        page(
            2,
            &[
                &[(40.0, "Date"), (95.0, "Libellé"), (280.0, "Valeur")],
                &[(95.0, "ASSURANCE"), (360.0, "25.000")],
            ],
        ),
    ];

    let statement = extract_statement_from_pages(&pages, &template);
    assert_eq!(statement.transactions.len(), 1);
    assert_eq!(statement.transactions[0].libelle, "PRELEVEMENT ASSURANCE");
    assert_eq!(statement.transactions[0].debit, dec!(25000));
}

// ---------------------------------------------------------------------------
// Test 6: Page without transactions
// ---------------------------------------------------------------------------
#[test]
fn page_without_transactions_is_empty() {
    let template = load_preset("orabank").unwrap();
    let pages = vec![page(
        1,
        &[
            &[(40.0, "Conditions"), (120.0, "générales")],
            &[(40.0, "Veuillez"), (90.0, "noter"), (130.0, "que"), (160.0, "vous"), (190.0, "disposez")],
        ],
    )];

    let statement = extract_statement_from_pages(&pages, &template);
    assert!(statement.transactions.is_empty());
    assert_eq!(statement.raw_count, 0);
    assert_eq!(statement.preceding_balance, None);
}

// ---------------------------------------------------------------------------
// Test 7: Batch isolates failing documents and merges the rest
// ---------------------------------------------------------------------------
#[test]
fn batch_isolates_failures_and_merges() {
    let template = load_preset("orabank").unwrap();
    let source = tempfile::tempdir().unwrap();
    let output = tempfile::tempdir().unwrap();
    std::fs::write(source.path().join("ocr_page_10.pdf"), b"%PDF ok").unwrap();
    std::fs::write(source.path().join("ocr_page_2.pdf"), b"%PDF ok").unwrap();
    std::fs::write(source.path().join("ocr_page_3.pdf"), b"%PDF corrupt").unwrap();
    std::fs::write(source.path().join("ocr_page_4.pdf"), b"%PDF blank").unwrap();

    let extractor = PickyExtractor {
        pages: vec![statement_page()],
    };
    let summary = run_batch(&BatchOptions {
        source_dir: source.path(),
        output_dir: output.path(),
        final_name: "releve_complet",
        template: &template,
        extractor: &extractor,
        ocr: None,
    })
    .unwrap();

    let statuses: Vec<(&str, &DocumentStatus)> = summary
        .documents
        .iter()
        .map(|d| (d.file_name.as_str(), &d.status))
        .collect();
    assert_eq!(statuses[0], ("ocr_page_2.pdf", &DocumentStatus::Exported { rows: 2 }));
    assert_eq!(statuses[1].0, "ocr_page_3.pdf");
    assert!(matches!(statuses[1].1, DocumentStatus::Failed(msg) if msg.contains("xref")));
    assert_eq!(statuses[2], ("ocr_page_4.pdf", &DocumentStatus::Empty));
    assert_eq!(statuses[3], ("ocr_page_10.pdf", &DocumentStatus::Exported { rows: 2 }));
    assert_eq!(summary.exported_count(), 2);

    assert!(!output.path().join("ocr_page_4.csv").exists());

    let merged = summary.merged.expect("exports were merged");
    let inputs: Vec<&str> = merged.inputs.iter().map(|(n, _)| n.as_str()).collect();
    assert_eq!(inputs, vec!["ocr_page_2.csv", "ocr_page_10.csv"]);
    // Two transactions plus the preceding-balance row, per document.
    assert_eq!(merged.rows, 6);

    let rows = read_csv(&merged.paths.csv).unwrap();
    assert_eq!(rows[0].libelle, "SOLDE PRECEDENT");
    assert_eq!(rows[0].date, "03/10/2025");
    assert_eq!(rows[0].solde, dec!(1250000));
}

// ---------------------------------------------------------------------------
// Test 8: Missing source directory is fatal
// ---------------------------------------------------------------------------
#[test]
fn batch_missing_source_dir() {
    let template = load_preset("orabank").unwrap();
    let dir = tempfile::tempdir().unwrap();
    let extractor = MockExtractor { pages: vec![] };

    let result = run_batch(&BatchOptions {
        source_dir: &dir.path().join("absent"),
        output_dir: dir.path(),
        final_name: "releve_complet",
        template: &template,
        extractor: &extractor,
        ocr: None,
    });

    assert!(matches!(result, Err(ReleveError::MissingDirectory(_))));
}

// ---------------------------------------------------------------------------
// Test 9: Split pages feed the batch directly
// ---------------------------------------------------------------------------
#[test]
fn split_pages_feed_batch() {
    let template = load_preset("orabank").unwrap();
    let work = tempfile::tempdir().unwrap();
    let pages_dir = work.path().join("pages");
    let output = work.path().join("extraction_files");

    let written = split_statement(b"%PDF statement", &FixedSplitter, None, &pages_dir).unwrap();
    assert_eq!(written.len(), 2);

    let extractor = PickyExtractor {
        pages: vec![statement_page()],
    };
    let summary = run_batch(&BatchOptions {
        source_dir: &pages_dir,
        output_dir: &output,
        final_name: "releve_complet",
        template: &template,
        extractor: &extractor,
        ocr: None,
    })
    .unwrap();

    assert_eq!(summary.documents[0].file_name, "ocr_page_1.pdf");
    assert_eq!(summary.documents[0].status, DocumentStatus::Exported { rows: 2 });
    assert_eq!(summary.documents[1].status, DocumentStatus::Empty);
    assert_eq!(summary.merged.expect("page 1 was exported").rows, 3);
}

// ---------------------------------------------------------------------------
// Test 10: Blank merge name is refused before any document runs
// ---------------------------------------------------------------------------
#[test]
fn batch_blank_final_name() {
    let template = load_preset("orabank").unwrap();
    let source = tempfile::tempdir().unwrap();
    let output = tempfile::tempdir().unwrap();
    std::fs::write(source.path().join("ocr_page_1.pdf"), b"%PDF ok").unwrap();
    let extractor = MockExtractor {
        pages: vec![statement_page()],
    };

    let result = run_batch(&BatchOptions {
        source_dir: source.path(),
        output_dir: output.path(),
        final_name: "",
        template: &template,
        extractor: &extractor,
        ocr: None,
    });

    assert!(matches!(result, Err(ReleveError::InvalidOutputName(_))));
    assert!(!output.path().join("ocr_page_1.csv").exists());
}
