use releve_core::error::ReleveError;
use releve_core::model::Statement;

pub fn print(statement: &Statement) -> Result<(), ReleveError> {
    let json = serde_json::to_string_pretty(statement)?;
    println!("{json}");
    Ok(())
}
