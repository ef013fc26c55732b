use crate::batch::natural_sort_key;
use crate::error::ReleveError;
use crate::model::Statement;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use rust_xlsxwriter::Workbook;
use serde::{Deserialize, Serialize};
use std::io::Write;
use std::path::{Path, PathBuf};

/// Column headers, in export order.
pub const COLUMNS: [&str; 6] = ["date", "date_valeur", "libelle", "debit", "credit", "solde"];

/// Field separator. Spreadsheets in French locales expect `;` since `,` is
/// the decimal mark.
pub const CSV_DELIMITER: u8 = b';';

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";
const DATE_FORMAT: &str = "%d/%m/%Y";

/// One exported row. Dates are already rendered as DD/MM/YYYY.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportRow {
    pub date: String,
    pub date_valeur: String,
    pub libelle: String,
    pub debit: Decimal,
    pub credit: Decimal,
    pub solde: Decimal,
}

#[derive(Debug, Clone)]
pub struct ExportPaths {
    pub csv: PathBuf,
    pub xlsx: PathBuf,
}

#[derive(Debug, Clone)]
pub struct MergeSummary {
    /// File name and row count of every merged input, in merge order.
    pub inputs: Vec<(String, usize)>,
    pub rows: usize,
    pub paths: ExportPaths,
}

/// Rows of a statement, led by a synthetic preceding-balance row when a
/// non-zero balance was found and there is at least one transaction.
pub fn statement_rows(statement: &Statement, balance_label: &str) -> Vec<ExportRow> {
    let mut rows = Vec::with_capacity(statement.transactions.len() + 1);

    if let (Some(balance), Some(first)) = (statement.preceding_balance, statement.transactions.first()) {
        if !balance.is_zero() {
            let date = first.date.format(DATE_FORMAT).to_string();
            rows.push(ExportRow {
                date: date.clone(),
                date_valeur: date,
                libelle: balance_label.to_string(),
                debit: Decimal::ZERO,
                credit: Decimal::ZERO,
                solde: balance,
            });
        }
    }

    rows.extend(statement.transactions.iter().map(|t| ExportRow {
        date: t.date.format(DATE_FORMAT).to_string(),
        date_valeur: t
            .date_valeur
            .map(|d| d.format(DATE_FORMAT).to_string())
            .unwrap_or_default(),
        libelle: t.libelle.clone(),
        debit: t.debit,
        credit: t.credit,
        solde: t.solde,
    }));

    rows
}

/// Write rows as `;`-separated CSV, prefixed with a UTF-8 BOM.
pub fn write_csv<W: Write>(rows: &[ExportRow], mut writer: W) -> Result<(), ReleveError> {
    writer.write_all(UTF8_BOM)?;
    let mut csv = csv::WriterBuilder::new()
        .delimiter(CSV_DELIMITER)
        .has_headers(false)
        .from_writer(writer);
    csv.write_record(COLUMNS)?;
    for row in rows {
        csv.serialize(row)?;
    }
    csv.flush()?;
    Ok(())
}

/// Read rows back from a CSV produced by `write_csv`.
pub fn read_csv(path: &Path) -> Result<Vec<ExportRow>, ReleveError> {
    let bytes = std::fs::read(path)?;
    let body = bytes.strip_prefix(UTF8_BOM).unwrap_or(&bytes[..]);
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(CSV_DELIMITER)
        .from_reader(body);
    let rows = reader.deserialize().collect::<Result<Vec<ExportRow>, _>>()?;
    Ok(rows)
}

/// Write rows to a single-sheet XLSX workbook, amounts as numbers.
pub fn write_xlsx(rows: &[ExportRow], path: &Path) -> Result<(), ReleveError> {
    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet();
    sheet.set_name("Transactions")?;

    for (col, name) in COLUMNS.iter().enumerate() {
        sheet.write_string(0, col as u16, *name)?;
    }

    for (i, row) in rows.iter().enumerate() {
        let r = i as u32 + 1;
        sheet.write_string(r, 0, &row.date)?;
        sheet.write_string(r, 1, &row.date_valeur)?;
        sheet.write_string(r, 2, &row.libelle)?;
        sheet.write_number(r, 3, row.debit.to_f64().unwrap_or_default())?;
        sheet.write_number(r, 4, row.credit.to_f64().unwrap_or_default())?;
        sheet.write_number(r, 5, row.solde.to_f64().unwrap_or_default())?;
    }

    workbook.save(path)?;
    Ok(())
}

/// Write `<prefix>.csv` and `<prefix>.xlsx` into `output_dir`, creating it.
pub fn export_rows(rows: &[ExportRow], output_dir: &Path, prefix: &str) -> Result<ExportPaths, ReleveError> {
    std::fs::create_dir_all(output_dir)?;
    let paths = ExportPaths {
        csv: output_dir.join(format!("{prefix}.csv")),
        xlsx: output_dir.join(format!("{prefix}.xlsx")),
    };

    let file = std::fs::File::create(&paths.csv)?;
    write_csv(rows, std::io::BufWriter::new(file))?;
    write_xlsx(rows, &paths.xlsx)?;

    tracing::info!(rows = rows.len(), csv = %paths.csv.display(), "exported");
    Ok(paths)
}

/// Export one statement under `output_dir`.
pub fn export_statement(
    statement: &Statement,
    balance_label: &str,
    output_dir: &Path,
    prefix: &str,
) -> Result<ExportPaths, ReleveError> {
    export_rows(&statement_rows(statement, balance_label), output_dir, prefix)
}

/// Reject names that cannot serve as an export file stem.
///
/// An empty name would also match every file in the merge exclusion test.
pub fn check_output_name(name: &str) -> Result<(), ReleveError> {
    if name.trim().is_empty() || name.contains(['/', '\\']) {
        return Err(ReleveError::InvalidOutputName(name.to_string()));
    }
    Ok(())
}

/// Concatenate every per-document CSV of `dir` into `<final_name>.csv/.xlsx`.
///
/// Inputs are ordered by the first number in their file name, so `page_2`
/// comes before `page_10`. Files whose name contains `final_name` are
/// skipped so re-running does not merge the previous result. A file that
/// cannot be read is logged and left out.
pub fn merge_exports(dir: &Path, final_name: &str) -> Result<MergeSummary, ReleveError> {
    check_output_name(final_name)?;
    if !dir.is_dir() {
        return Err(ReleveError::MissingDirectory(dir.to_path_buf()));
    }

    let mut names: Vec<String> = std::fs::read_dir(dir)?
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.path().is_file())
        .filter_map(|entry| entry.file_name().into_string().ok())
        .filter(|name| name.to_lowercase().ends_with(".csv") && !name.contains(final_name))
        .collect();
    names.sort_by(|a, b| (natural_sort_key(a), a).cmp(&(natural_sort_key(b), b)));

    let mut inputs = Vec::new();
    let mut rows = Vec::new();
    for name in names {
        match read_csv(&dir.join(&name)) {
            Ok(file_rows) => {
                tracing::info!(file = %name, rows = file_rows.len(), "loaded export");
                inputs.push((name, file_rows.len()));
                rows.extend(file_rows);
            }
            Err(e) => tracing::warn!(file = %name, error = %e, "skipping unreadable export"),
        }
    }

    if inputs.is_empty() {
        return Err(ReleveError::NothingToMerge(dir.to_path_buf()));
    }

    let paths = export_rows(&rows, dir, final_name)?;
    Ok(MergeSummary {
        inputs,
        rows: rows.len(),
        paths,
    })
}
