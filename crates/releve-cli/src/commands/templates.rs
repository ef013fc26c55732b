use releve_core::error::ReleveError;
use releve_core::template::builtin;
use std::path::Path;

pub fn list() -> Result<(), ReleveError> {
    println!("Available statement templates:\n");
    for name in builtin::PRESETS {
        let t = builtin::load_preset(name)?;
        println!("  {:<10} {} (v{})", name, t.name, t.version);
        if let Some(ref desc) = t.description {
            println!("             {}", desc);
        }
        println!();
    }
    Ok(())
}

pub fn show(name: &str) -> Result<(), ReleveError> {
    match builtin::preset_json(name) {
        Some(json) => {
            print!("{json}");
            Ok(())
        }
        None => Err(ReleveError::TemplateInvalid(format!(
            "unknown preset '{}'. Available: {}",
            name,
            builtin::PRESETS.join(", ")
        ))),
    }
}

pub fn validate(file: &Path) -> Result<(), ReleveError> {
    let t = releve_core::template::load_template(file)?;

    let c = &t.columns;
    println!("Template '{}' (v{}) is valid.", t.name, t.version);
    println!(
        "  Columns: date < {} <= libellé < {} <= valeur < {} <= débit < {} <= crédit < {} <= solde",
        c.date_limit, c.libelle_limit, c.valeur_limit, c.debit_limit, c.credit_limit
    );
    println!("  Noise patterns: {}", t.noise.len());
    println!("  Total markers: {}", t.truncation.markers.join(", "));

    if t.header_markers.is_empty() {
        println!("\nWarning: no header_markers set; repeated table headers rely on the noise list alone.");
    }

    Ok(())
}
