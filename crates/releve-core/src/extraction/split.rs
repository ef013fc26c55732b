use crate::batch::natural_sort_key;
use crate::error::ReleveError;
use std::path::Path;
use std::process::Command;

/// Trait for backends cutting a multi-page PDF into single-page PDFs.
pub trait PageSplitter: Send + Sync {
    /// One single-page PDF per page, in page order.
    fn split_pages(&self, pdf_bytes: &[u8]) -> Result<Vec<Vec<u8>>, ReleveError>;

    fn backend_name(&self) -> &str;
}

/// Page splitter using pdfseparate (from poppler-utils, alongside pdftotext).
pub struct PdfseparateSplitter;

impl PdfseparateSplitter {
    pub fn new() -> Self {
        PdfseparateSplitter
    }

    /// Check if pdfseparate is available on the system.
    pub fn is_available() -> bool {
        Command::new("pdfseparate")
            .arg("-v")
            .output()
            .map(|o| o.status.success() || !o.stderr.is_empty())
            .unwrap_or(false)
    }
}

impl Default for PdfseparateSplitter {
    fn default() -> Self {
        Self::new()
    }
}

impl PageSplitter for PdfseparateSplitter {
    fn split_pages(&self, pdf_bytes: &[u8]) -> Result<Vec<Vec<u8>>, ReleveError> {
        let workdir = tempfile::tempdir().map_err(|e| ReleveError::Extraction(e.to_string()))?;
        let input = workdir.path().join("input.pdf");
        let pages_dir = workdir.path().join("pages");
        std::fs::write(&input, pdf_bytes)?;
        std::fs::create_dir(&pages_dir)?;

        let output = Command::new("pdfseparate")
            .arg(&input)
            .arg(pages_dir.join("page-%d.pdf"))
            .output()
            .map_err(|e| {
                if e.kind() == std::io::ErrorKind::NotFound {
                    ReleveError::PdfseparateNotFound
                } else {
                    ReleveError::Extraction(format!("pdfseparate failed: {}", e))
                }
            })?;

        if !output.status.success() {
            let code = output.status.code().unwrap_or(-1);
            let stderr = String::from_utf8_lossy(&output.stderr).to_string();
            return Err(ReleveError::PdfseparateFailed { code, stderr });
        }

        read_page_files(&pages_dir)
    }

    fn backend_name(&self) -> &str {
        "pdfseparate"
    }
}

/// Contents of the `*.pdf` files of `dir`, ordered by their page number.
fn read_page_files(dir: &Path) -> Result<Vec<Vec<u8>>, ReleveError> {
    let mut files: Vec<(u64, String)> = std::fs::read_dir(dir)?
        .filter_map(|entry| entry.ok())
        .filter_map(|entry| entry.file_name().into_string().ok())
        .filter(|name| name.ends_with(".pdf"))
        .map(|name| (natural_sort_key(&name), name))
        .collect();
    files.sort();

    if files.is_empty() {
        return Err(ReleveError::Extraction(
            "pdfseparate produced no pages".into(),
        ));
    }

    files
        .iter()
        .map(|(_, name)| std::fs::read(dir.join(name)).map_err(ReleveError::from))
        .collect()
}
