pub mod builtin;
pub mod schema;

use crate::error::ReleveError;
use schema::StatementTemplate;
use std::path::Path;

/// Load a template from a JSON file.
pub fn load_template(path: &Path) -> Result<StatementTemplate, ReleveError> {
    let content = std::fs::read_to_string(path).map_err(|e| ReleveError::TemplateLoad {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;
    parse_template(&content, path)
}

/// Parse a template from a JSON string read from `source`.
pub fn parse_template(json: &str, source: &Path) -> Result<StatementTemplate, ReleveError> {
    let template: StatementTemplate =
        serde_json::from_str(json).map_err(|e| ReleveError::TemplateLoad {
            path: source.to_path_buf(),
            reason: e.to_string(),
        })?;
    validate_template(&template)?;
    Ok(template)
}

/// Parse a template from a JSON string (no file path context).
pub fn parse_template_str(json: &str) -> Result<StatementTemplate, ReleveError> {
    let template: StatementTemplate = serde_json::from_str(json).map_err(ReleveError::Json)?;
    validate_template(&template)?;
    Ok(template)
}

/// Validate that a template is well-formed.
pub fn validate_template(template: &StatementTemplate) -> Result<(), ReleveError> {
    let limits = template.columns.limits();
    if limits.iter().any(|l| !l.is_finite() || *l <= 0.0) {
        return Err(ReleveError::TemplateInvalid(
            "column limits must be positive numbers".into(),
        ));
    }
    if limits.windows(2).any(|w| w[0] >= w[1]) {
        return Err(ReleveError::TemplateInvalid(format!(
            "column limits must be strictly increasing, got {:?}",
            limits
        )));
    }

    if template.header_markers.iter().any(|m| m.is_empty()) {
        return Err(ReleveError::TemplateInvalid(
            "header markers must not be empty strings".into(),
        ));
    }

    for noise in &template.noise {
        if noise.pattern.is_empty() {
            return Err(ReleveError::TemplateInvalid(
                "noise pattern must not be empty".into(),
            ));
        }
    }

    let truncation = &template.truncation;
    if truncation.trigger.trim().is_empty() {
        return Err(ReleveError::TemplateInvalid(
            "truncation trigger must not be empty".into(),
        ));
    }
    if truncation.window == 0 {
        return Err(ReleveError::TemplateInvalid(
            "truncation window must be at least 1".into(),
        ));
    }
    if truncation
        .markers
        .iter()
        .chain(&truncation.single_word_markers)
        .any(|m| m.trim().is_empty())
    {
        return Err(ReleveError::TemplateInvalid(
            "truncation markers must not be blank".into(),
        ));
    }

    let balance = &template.preceding_balance;
    if balance.label.is_empty() {
        return Err(ReleveError::TemplateInvalid(
            "preceding balance label must not be empty".into(),
        ));
    }
    if !(balance.y_tolerance.is_finite() && balance.y_tolerance > 0.0) {
        return Err(ReleveError::TemplateInvalid(
            "preceding balance y_tolerance must be positive".into(),
        ));
    }

    Ok(())
}
