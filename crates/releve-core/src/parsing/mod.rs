pub mod values;

use crate::model::{RawTransaction, Transaction};
use values::{clean_libelle, parse_amount, parse_date};

/// Normalized rows plus the number of rows dropped for lack of a valid date.
#[derive(Debug, Clone, Default)]
pub struct NormalizedTable {
    pub transactions: Vec<Transaction>,
    pub dropped: usize,
}

/// Turn raw column text into typed transactions sorted by date.
///
/// Rows whose date does not parse are dropped. The sort is stable, so rows
/// sharing a date keep their extraction order.
pub fn normalize_transactions(raw: &[RawTransaction]) -> NormalizedTable {
    let mut transactions = Vec::with_capacity(raw.len());
    let mut dropped = 0;

    for tx in raw {
        match normalize_row(tx) {
            Some(row) => transactions.push(row),
            None => {
                tracing::debug!(date = %tx.date, libelle = %tx.libelle.trim(), "dropping row without a valid date");
                dropped += 1;
            }
        }
    }

    transactions.sort_by_key(|t| t.date);
    NormalizedTable {
        transactions,
        dropped,
    }
}

fn normalize_row(tx: &RawTransaction) -> Option<Transaction> {
    Some(Transaction {
        date: parse_date(&tx.date)?,
        date_valeur: parse_date(&tx.date_valeur),
        libelle: clean_libelle(&tx.libelle),
        debit: parse_amount(&tx.debit),
        credit: parse_amount(&tx.credit),
        solde: parse_amount(&tx.solde),
    })
}
