pub mod batch;
pub mod error;
pub mod export;
pub mod extraction;
pub mod layout;
pub mod model;
pub mod parsing;
pub mod template;

use error::ReleveError;
use extraction::{PageWords, WordExtractor};
use model::Statement;
use template::schema::StatementTemplate;

/// Main API entry point: extract the transaction table of one statement PDF.
///
/// The PDF must already carry a text layer (see `extraction::ocr`).
pub fn extract_statement(
    pdf_bytes: &[u8],
    extractor: &dyn WordExtractor,
    template: &StatementTemplate,
) -> Result<Statement, ReleveError> {
    let pages = extractor.extract_words(pdf_bytes)?;
    tracing::debug!(
        backend = extractor.backend_name(),
        pages = pages.len(),
        "words extracted"
    );
    Ok(extract_statement_from_pages(&pages, template))
}

/// Extract a statement from already-extracted page words.
///
/// The preceding balance is only searched on the first page.
pub fn extract_statement_from_pages(pages: &[PageWords], template: &StatementTemplate) -> Statement {
    let preceding_balance = pages.first().and_then(|p| {
        layout::balance::find_preceding_balance(&p.words, &template.preceding_balance)
    });

    let raw = layout::extract_transactions(pages, template);
    let table = parsing::normalize_transactions(&raw);

    Statement {
        preceding_balance,
        transactions: table.transactions,
        raw_count: raw.len(),
        dropped: table.dropped,
    }
}
