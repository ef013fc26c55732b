use crate::error::ReleveError;
use std::process::Command;

/// Tesseract language used when none is given.
pub const DEFAULT_LANGUAGE: &str = "fra";

/// Trait for OCR backends turning a scanned PDF into a text-searchable one.
pub trait OcrEngine: Send + Sync {
    fn ocr_pdf(&self, pdf_bytes: &[u8], language: &str) -> Result<Vec<u8>, ReleveError>;

    fn backend_name(&self) -> &str;
}

/// OCR backend shelling out to `ocrmypdf`.
pub struct OcrmypdfEngine;

impl OcrmypdfEngine {
    pub fn new() -> Self {
        OcrmypdfEngine
    }

    pub fn is_available() -> bool {
        Command::new("ocrmypdf")
            .arg("--version")
            .output()
            .map(|o| o.status.success())
            .unwrap_or(false)
    }
}

impl Default for OcrmypdfEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl OcrEngine for OcrmypdfEngine {
    fn ocr_pdf(&self, pdf_bytes: &[u8], language: &str) -> Result<Vec<u8>, ReleveError> {
        let workdir = tempfile::tempdir().map_err(|e| ReleveError::Extraction(e.to_string()))?;
        let input = workdir.path().join("input.pdf");
        let output_path = workdir.path().join("output.pdf");
        std::fs::write(&input, pdf_bytes)?;

        let output = Command::new("ocrmypdf")
            .arg("-l")
            .arg(language)
            .arg("--force-ocr")
            .arg(&input)
            .arg(&output_path)
            .output()
            .map_err(|e| {
                if e.kind() == std::io::ErrorKind::NotFound {
                    ReleveError::OcrNotFound
                } else {
                    ReleveError::Extraction(format!("ocrmypdf failed: {}", e))
                }
            })?;

        if !output.status.success() {
            let code = output.status.code().unwrap_or(-1);
            let stderr = String::from_utf8_lossy(&output.stderr).to_string();
            return Err(ReleveError::OcrFailed { code, stderr });
        }

        Ok(std::fs::read(&output_path)?)
    }

    fn backend_name(&self) -> &str {
        "ocrmypdf"
    }
}
