use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum ReleveError {
    #[error("word extraction failed: {0}")]
    Extraction(String),

    #[error("pdftotext not found. Install poppler: brew install poppler (macOS) or apt install poppler-utils (Linux)")]
    PdftotextNotFound,

    #[error("pdftotext failed with exit code {code}: {stderr}")]
    PdftotextFailed { code: i32, stderr: String },

    #[error("ocrmypdf not found. Install it with: pip install ocrmypdf (and tesseract with the language data you need)")]
    OcrNotFound,

    #[error("pdfseparate not found. Install poppler: brew install poppler (macOS) or apt install poppler-utils (Linux)")]
    PdfseparateNotFound,

    #[error("pdfseparate failed with exit code {code}: {stderr}")]
    PdfseparateFailed { code: i32, stderr: String },

    #[error("ocrmypdf failed with exit code {code}: {stderr}")]
    OcrFailed { code: i32, stderr: String },

    #[error("failed to load template from {path}: {reason}")]
    TemplateLoad { path: PathBuf, reason: String },

    #[error("invalid template: {0}")]
    TemplateInvalid(String),

    #[error("directory not found: {0}")]
    MissingDirectory(PathBuf),

    #[error("invalid output name '{0}'")]
    InvalidOutputName(String),

    #[error("no CSV export could be read in {0}")]
    NothingToMerge(PathBuf),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("XLSX error: {0}")]
    Xlsx(#[from] rust_xlsxwriter::XlsxError),
}
