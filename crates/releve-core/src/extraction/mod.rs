pub mod ocr;
pub mod pdftotext;
pub mod split;

use crate::error::ReleveError;
use crate::model::PositionedWord;

/// Words extracted from a single page of a PDF, in no particular order.
#[derive(Debug, Clone)]
pub struct PageWords {
    pub page_number: usize,
    pub words: Vec<PositionedWord>,
}

/// Trait for word-position extraction backends.
pub trait WordExtractor: Send + Sync {
    /// Extract positioned words from PDF bytes, returning one PageWords per page.
    fn extract_words(&self, pdf_bytes: &[u8]) -> Result<Vec<PageWords>, ReleveError>;

    /// Name of this extraction backend (for diagnostics).
    fn backend_name(&self) -> &str;
}
