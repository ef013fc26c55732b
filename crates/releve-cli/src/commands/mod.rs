pub mod batch;
pub mod extract;
pub mod merge;
pub mod split;
pub mod templates;

use releve_core::error::ReleveError;
use releve_core::template::schema::StatementTemplate;
use releve_core::template::{builtin, load_template};
use std::path::PathBuf;

/// Resolve the template from `--template FILE`, falling back to `--preset`.
fn resolve_template(preset: &str, file: Option<PathBuf>) -> Result<StatementTemplate, ReleveError> {
    match file {
        Some(path) => load_template(&path),
        None => builtin::load_preset(preset),
    }
}
