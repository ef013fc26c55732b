use releve_core::batch::{run_batch, BatchOptions, DocumentStatus, OcrStep};
use releve_core::error::ReleveError;
use releve_core::extraction::ocr::OcrmypdfEngine;
use releve_core::extraction::pdftotext::PdftotextExtractor;
use std::path::PathBuf;

use super::resolve_template;

pub fn run(
    source_dir: PathBuf,
    out_dir: PathBuf,
    final_name: &str,
    ocr_lang: Option<String>,
    preset: &str,
    template_file: Option<PathBuf>,
) -> Result<(), ReleveError> {
    let template = resolve_template(preset, template_file)?;

    // Fail once up front rather than once per document.
    if !PdftotextExtractor::is_available() {
        return Err(ReleveError::PdftotextNotFound);
    }
    if ocr_lang.is_some() && !OcrmypdfEngine::is_available() {
        return Err(ReleveError::OcrNotFound);
    }

    let extractor = PdftotextExtractor::new();
    let ocr_engine = OcrmypdfEngine::new();

    let summary = run_batch(&BatchOptions {
        source_dir: &source_dir,
        output_dir: &out_dir,
        final_name,
        template: &template,
        extractor: &extractor,
        ocr: ocr_lang.as_deref().map(|language| OcrStep {
            engine: &ocr_engine,
            language,
        }),
    })?;

    for doc in &summary.documents {
        match &doc.status {
            DocumentStatus::Exported { rows } => println!("  {:<30} {} transaction(s)", doc.file_name, rows),
            DocumentStatus::Empty => println!("  {:<30} no transaction found", doc.file_name),
            DocumentStatus::Failed(reason) => println!("  {:<30} FAILED: {}", doc.file_name, reason),
        }
    }

    println!(
        "\n{}/{} file(s) exported.",
        summary.exported_count(),
        summary.documents.len()
    );
    match &summary.merged {
        Some(merged) => println!(
            "Merged {} row(s) into {} and {}",
            merged.rows,
            merged.paths.csv.display(),
            merged.paths.xlsx.display()
        ),
        None => println!("Nothing to merge."),
    }

    Ok(())
}
