//! Table reconstruction from positioned words.
//!
//! Pages are processed in order, lines in (block, line) order and words left
//! to right. Each line is truncated at a merged total row, filtered for
//! header/footer noise, then either opens a new transaction or feeds the
//! open one.

pub mod assembler;
pub mod balance;
pub mod classify;
pub mod columns;
pub mod grouping;

use crate::extraction::PageWords;
use crate::model::RawTransaction;
use crate::template::schema::StatementTemplate;
use assembler::TransactionAssembler;
use classify::{LineClassifier, LineKind};
use columns::assign_line;
use grouping::group_lines;

/// Reconstruct raw transactions from every page of one document.
pub fn extract_transactions(pages: &[PageWords], template: &StatementTemplate) -> Vec<RawTransaction> {
    let classifier = LineClassifier::new(template);
    let mut assembler = TransactionAssembler::new();

    for page in pages {
        let lines = group_lines(&page.words);
        tracing::debug!(page = page.page_number, lines = lines.len(), "processing page");

        for line in &lines {
            let classified = classifier.classify(&line.words, assembler.is_open());
            let tx = match classified.kind {
                LineKind::Noise | LineKind::Preamble => continue,
                LineKind::TransactionStart => assembler.start(),
                LineKind::Continuation => match assembler.current_mut() {
                    Some(tx) => tx,
                    None => continue,
                },
            };
            assign_line(&template.columns, classified.words, tx);
        }
    }

    assembler.finish()
}
