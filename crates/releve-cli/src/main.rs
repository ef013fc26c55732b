mod commands;
mod logging;
mod output;

use clap::{Args, Parser, Subcommand};
use releve_core::extraction::ocr::DEFAULT_LANGUAGE;
use releve_core::template::builtin::DEFAULT_PRESET;
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "releve",
    version,
    about = "Extract transactions from OCR'd bank statement PDFs"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Which statement template to use.
#[derive(Args)]
struct TemplateArgs {
    /// Built-in template name
    #[arg(short, long, default_value = DEFAULT_PRESET, conflicts_with = "template")]
    preset: String,

    /// Custom JSON template file
    #[arg(short, long, value_name = "FILE")]
    template: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Split a statement into one PDF per page, optionally OCR'ing each
    Split {
        /// Path to the statement PDF
        pdf_file: PathBuf,

        /// Directory receiving ocr_page_N.pdf
        #[arg(long, value_name = "DIR", default_value = "ocr_pages")]
        out_dir: PathBuf,

        /// Run OCR on every page, with this tesseract language (default "fra")
        #[arg(long, value_name = "LANG", num_args = 0..=1, default_missing_value = DEFAULT_LANGUAGE)]
        ocr_lang: Option<String>,
    },
    /// Extract the transaction table of one statement PDF
    Extract {
        /// Path to the PDF
        pdf_file: PathBuf,

        /// Output format: table (default) or json
        #[arg(short, long, default_value = "table")]
        output: String,

        /// Also write <name>.csv and <name>.xlsx into this directory
        #[arg(long, value_name = "DIR")]
        out_dir: Option<PathBuf>,

        /// Run OCR first, with this tesseract language (default "fra")
        #[arg(long, value_name = "LANG", num_args = 0..=1, default_missing_value = DEFAULT_LANGUAGE)]
        ocr_lang: Option<String>,

        #[command(flatten)]
        template: TemplateArgs,
    },
    /// Extract every PDF of a directory, then merge the exports
    Batch {
        /// Directory holding one PDF per statement page or document
        source_dir: PathBuf,

        #[arg(long, value_name = "DIR", default_value = "extraction_files")]
        out_dir: PathBuf,

        /// Base name of the merged export
        #[arg(long, default_value = "releve_complet")]
        final_name: String,

        /// Run OCR first, with this tesseract language (default "fra")
        #[arg(long, value_name = "LANG", num_args = 0..=1, default_missing_value = DEFAULT_LANGUAGE)]
        ocr_lang: Option<String>,

        #[command(flatten)]
        template: TemplateArgs,
    },
    /// Merge existing per-document CSV exports
    Merge {
        #[arg(default_value = "extraction_files")]
        dir: PathBuf,

        /// Base name of the merged export
        #[arg(long, default_value = "releve_complet")]
        final_name: String,
    },
    /// Inspect statement templates
    Templates {
        #[command(subcommand)]
        action: TemplatesAction,
    },
}

#[derive(Subcommand)]
enum TemplatesAction {
    /// List built-in templates
    List,
    /// Print a built-in template as JSON
    Show {
        /// Template name (e.g., "orabank")
        name: String,
    },
    /// Validate a custom template file
    Validate {
        /// Path to JSON template file
        file: PathBuf,
    },
}

fn main() {
    logging::setup_logging();
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Split {
            pdf_file,
            out_dir,
            ocr_lang,
        } => commands::split::run(pdf_file, out_dir, ocr_lang),
        Commands::Extract {
            pdf_file,
            output,
            out_dir,
            ocr_lang,
            template,
        } => commands::extract::run(
            pdf_file,
            &output,
            out_dir,
            ocr_lang,
            &template.preset,
            template.template,
        ),
        Commands::Batch {
            source_dir,
            out_dir,
            final_name,
            ocr_lang,
            template,
        } => commands::batch::run(
            source_dir,
            out_dir,
            &final_name,
            ocr_lang,
            &template.preset,
            template.template,
        ),
        Commands::Merge { dir, final_name } => commands::merge::run(dir, &final_name),
        Commands::Templates { action } => match action {
            TemplatesAction::List => commands::templates::list(),
            TemplatesAction::Show { name } => commands::templates::show(&name),
            TemplatesAction::Validate { file } => commands::templates::validate(&file),
        },
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
