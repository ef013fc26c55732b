use crate::error::ReleveError;
use crate::template::schema::StatementTemplate;
use crate::template::validate_template;

const ORABANK_JSON: &str = include_str!("../../../../templates/orabank.json");

/// Available built-in templates.
pub const PRESETS: &[&str] = &["orabank"];

pub const DEFAULT_PRESET: &str = "orabank";

/// Load a built-in template by name.
pub fn load_preset(name: &str) -> Result<StatementTemplate, ReleveError> {
    let json = match name {
        "orabank" => ORABANK_JSON,
        _ => {
            return Err(ReleveError::TemplateInvalid(format!(
                "unknown preset '{}'. Available: {}",
                name,
                PRESETS.join(", ")
            )))
        }
    };
    let template: StatementTemplate = serde_json::from_str(json)?;
    validate_template(&template)?;
    Ok(template)
}

/// Raw JSON of a built-in template.
pub fn preset_json(name: &str) -> Option<&'static str> {
    match name {
        "orabank" => Some(ORABANK_JSON),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_orabank_preset() {
        let t = load_preset("orabank").unwrap();
        assert_eq!(t.columns.date_limit, 90.0);
        assert_eq!(t.columns.libelle_limit, 260.0);
        assert_eq!(t.columns.valeur_limit, 350.0);
        assert_eq!(t.columns.debit_limit, 430.0);
        assert_eq!(t.columns.credit_limit, 515.0);
        assert_eq!(t.truncation.window, 8);
        assert_eq!(t.preceding_balance.synthetic_label, "SOLDE PRECEDENT");
    }

    #[test]
    fn test_unknown_preset() {
        assert!(load_preset("xyz").is_err());
        assert!(preset_json("xyz").is_none());
    }

    #[test]
    fn test_every_preset_loads() {
        for name in PRESETS {
            assert!(load_preset(name).is_ok(), "preset {name} failed");
        }
    }
}
