use releve_core::batch::{split_statement, OcrStep};
use releve_core::error::ReleveError;
use releve_core::extraction::ocr::OcrmypdfEngine;
use releve_core::extraction::split::PdfseparateSplitter;
use std::path::PathBuf;

pub fn run(pdf_file: PathBuf, out_dir: PathBuf, ocr_lang: Option<String>) -> Result<(), ReleveError> {
    if ocr_lang.is_some() && !OcrmypdfEngine::is_available() {
        return Err(ReleveError::OcrNotFound);
    }

    let pdf_bytes = std::fs::read(&pdf_file)?;
    let splitter = PdfseparateSplitter::new();
    let ocr_engine = OcrmypdfEngine::new();
    let ocr = ocr_lang.as_deref().map(|language| OcrStep {
        engine: &ocr_engine,
        language,
    });

    let pages = split_statement(&pdf_bytes, &splitter, ocr.as_ref(), &out_dir)?;

    println!("Wrote {} page(s) to {}", pages.len(), out_dir.display());
    if ocr.is_none() {
        println!("Pages were not OCR'd; pass --ocr-lang if the statement is a scan.");
    }
    Ok(())
}
