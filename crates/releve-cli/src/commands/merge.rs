use releve_core::export::merge_exports;
use std::path::PathBuf;

pub fn run(dir: PathBuf, final_name: &str) -> Result<(), releve_core::error::ReleveError> {
    let summary = merge_exports(&dir, final_name)?;

    for (name, rows) in &summary.inputs {
        println!("  {:<30} {} row(s)", name, rows);
    }
    println!(
        "\nMerged {} file(s), {} row(s):\n  CSV:   {}\n  Excel: {}",
        summary.inputs.len(),
        summary.rows,
        summary.paths.csv.display(),
        summary.paths.xlsx.display()
    );

    Ok(())
}
