use releve_core::export::export_statement;
use releve_core::extraction::ocr::{OcrEngine, OcrmypdfEngine};
use releve_core::extraction::pdftotext::PdftotextExtractor;
use std::path::PathBuf;

use super::resolve_template;
use crate::output;

pub fn run(
    pdf_file: PathBuf,
    output_format: &str,
    out_dir: Option<PathBuf>,
    ocr_lang: Option<String>,
    preset: &str,
    template_file: Option<PathBuf>,
) -> Result<(), releve_core::error::ReleveError> {
    let template = resolve_template(preset, template_file)?;

    let mut pdf_bytes = std::fs::read(&pdf_file)?;
    if let Some(lang) = ocr_lang.as_deref() {
        tracing::info!(file = %pdf_file.display(), lang, "running OCR");
        pdf_bytes = OcrmypdfEngine::new().ocr_pdf(&pdf_bytes, lang)?;
    }

    let extractor = PdftotextExtractor::new();
    let statement = releve_core::extract_statement(&pdf_bytes, &extractor, &template)?;

    match output_format {
        "json" => output::json::print(&statement)?,
        _ => output::table::print(&statement),
    }

    if let Some(dir) = out_dir {
        if statement.transactions.is_empty() {
            tracing::warn!(file = %pdf_file.display(), "no transaction found, nothing exported");
        } else {
            let prefix = pdf_file
                .file_stem()
                .map(|s| s.to_string_lossy().to_string())
                .unwrap_or_else(|| "statement".into());
            let paths = export_statement(
                &statement,
                &template.preceding_balance.synthetic_label,
                &dir,
                &prefix,
            )?;
            eprintln!("Exported to {} and {}", paths.csv.display(), paths.xlsx.display());
        }
    }

    Ok(())
}
