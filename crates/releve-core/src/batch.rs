use crate::error::ReleveError;
use crate::export::{check_output_name, export_statement, merge_exports, MergeSummary};
use crate::extraction::ocr::OcrEngine;
use crate::extraction::split::PageSplitter;
use crate::extraction::WordExtractor;
use crate::template::schema::StatementTemplate;
use std::path::{Path, PathBuf};

/// First run of digits in a file name, or 0 when there is none.
///
/// Sorting on this key puts `page_2` before `page_10`.
pub fn natural_sort_key(name: &str) -> u64 {
    let digits: String = name
        .chars()
        .skip_while(|c| !c.is_ascii_digit())
        .take_while(|c| c.is_ascii_digit())
        .collect();
    digits.parse().unwrap_or(0)
}

/// OCR pass applied to every document before extraction.
pub struct OcrStep<'a> {
    pub engine: &'a dyn OcrEngine,
    pub language: &'a str,
}

pub struct BatchOptions<'a> {
    pub source_dir: &'a Path,
    pub output_dir: &'a Path,
    pub final_name: &'a str,
    pub template: &'a StatementTemplate,
    pub extractor: &'a dyn WordExtractor,
    pub ocr: Option<OcrStep<'a>>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DocumentStatus {
    Exported { rows: usize },
    /// No transaction found; nothing written.
    Empty,
    Failed(String),
}

#[derive(Debug, Clone)]
pub struct DocumentOutcome {
    pub file_name: String,
    pub status: DocumentStatus,
}

#[derive(Debug)]
pub struct BatchSummary {
    pub documents: Vec<DocumentOutcome>,
    pub merged: Option<MergeSummary>,
}

impl BatchSummary {
    pub fn exported_count(&self) -> usize {
        self.documents
            .iter()
            .filter(|d| matches!(d.status, DocumentStatus::Exported { .. }))
            .count()
    }
}

/// PDF files of `dir`, in natural order.
pub fn list_pdfs(dir: &Path) -> Result<Vec<PathBuf>, ReleveError> {
    if !dir.is_dir() {
        return Err(ReleveError::MissingDirectory(dir.to_path_buf()));
    }

    let mut files: Vec<(u64, String, PathBuf)> = std::fs::read_dir(dir)?
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| path.is_file())
        .filter(|path| {
            path.extension()
                .map(|ext| ext.eq_ignore_ascii_case("pdf"))
                .unwrap_or(false)
        })
        .filter_map(|path| {
            let name = path.file_name()?.to_str()?.to_string();
            Some((natural_sort_key(&name), name, path))
        })
        .collect();
    files.sort();

    Ok(files.into_iter().map(|(_, _, path)| path).collect())
}

/// Extract and export every PDF of a directory, then merge the exports.
///
/// A document that fails is recorded and logged; the others still run.
pub fn run_batch(options: &BatchOptions<'_>) -> Result<BatchSummary, ReleveError> {
    check_output_name(options.final_name)?;
    let pdfs = list_pdfs(options.source_dir)?;
    tracing::info!(count = pdfs.len(), dir = %options.source_dir.display(), "starting batch");

    let mut documents = Vec::with_capacity(pdfs.len());
    for path in &pdfs {
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_default();
        tracing::info!(file = %file_name, "processing");

        let status = match process_document(path, options) {
            Ok(status) => status,
            Err(e) => {
                tracing::warn!(file = %file_name, error = %e, "document failed");
                DocumentStatus::Failed(e.to_string())
            }
        };
        if status == DocumentStatus::Empty {
            tracing::warn!(file = %file_name, "no transaction found");
        }
        documents.push(DocumentOutcome { file_name, status });
    }

    let mut summary = BatchSummary {
        documents,
        merged: None,
    };
    if summary.exported_count() > 0 {
        summary.merged = Some(merge_exports(options.output_dir, options.final_name)?);
    }

    tracing::info!(
        exported = summary.exported_count(),
        total = pdfs.len(),
        "batch finished"
    );
    Ok(summary)
}

fn process_document(path: &Path, options: &BatchOptions<'_>) -> Result<DocumentStatus, ReleveError> {
    let mut pdf_bytes = std::fs::read(path)?;
    if let Some(ocr) = &options.ocr {
        pdf_bytes = ocr.engine.ocr_pdf(&pdf_bytes, ocr.language)?;
    }

    let statement = crate::extract_statement(&pdf_bytes, options.extractor, options.template)?;
    if statement.transactions.is_empty() {
        return Ok(DocumentStatus::Empty);
    }

    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_else(|| "statement".into());
    let rows = statement.transactions.len();
    export_statement(
        &statement,
        &options.template.preceding_balance.synthetic_label,
        options.output_dir,
        &stem,
    )?;
    Ok(DocumentStatus::Exported { rows })
}

/// File name given to page `n` (1-based) of a split statement.
pub fn page_file_name(n: usize) -> String {
    format!("{SPLIT_PAGE_PREFIX}{n}.pdf")
}

const SPLIT_PAGE_PREFIX: &str = "ocr_page_";

/// Split one statement into `ocr_page_N.pdf` files under `output_dir`,
/// running OCR on each page when asked.
///
/// Page files left by an earlier split are removed first, so a shorter
/// statement does not inherit trailing pages. Other files are left alone.
/// Any page failure aborts the split.
pub fn split_statement(
    pdf_bytes: &[u8],
    splitter: &dyn PageSplitter,
    ocr: Option<&OcrStep<'_>>,
    output_dir: &Path,
) -> Result<Vec<PathBuf>, ReleveError> {
    std::fs::create_dir_all(output_dir)?;
    for stale in std::fs::read_dir(output_dir)?.filter_map(|entry| entry.ok()) {
        let name = stale.file_name().to_string_lossy().to_string();
        if name.starts_with(SPLIT_PAGE_PREFIX) && name.ends_with(".pdf") && stale.path().is_file() {
            tracing::debug!(file = %name, "removing page from previous split");
            std::fs::remove_file(stale.path())?;
        }
    }

    let pages = splitter.split_pages(pdf_bytes)?;
    tracing::info!(
        pages = pages.len(),
        backend = splitter.backend_name(),
        ocr = ocr.map(|o| o.engine.backend_name()),
        "splitting statement"
    );

    let mut written = Vec::with_capacity(pages.len());
    for (i, page) in pages.into_iter().enumerate() {
        let bytes = match ocr {
            Some(step) => step.engine.ocr_pdf(&page, step.language)?,
            None => page,
        };
        let path = output_dir.join(page_file_name(i + 1));
        std::fs::write(&path, bytes)?;
        tracing::debug!(file = %path.display(), "page written");
        written.push(path);
    }
    Ok(written)
}
