use crate::model::{PositionedWord, RawTransaction};
use crate::template::schema::ColumnBounds;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Column {
    Date,
    Libelle,
    DateValeur,
    Debit,
    Credit,
    Solde,
}

impl ColumnBounds {
    /// Column of a word whose leading edge is at `x`.
    ///
    /// Limits are exclusive upper bounds; anything at or past `credit_limit`
    /// is Solde.
    pub fn column_for(&self, x: f32) -> Column {
        if x < self.date_limit {
            Column::Date
        } else if x < self.libelle_limit {
            Column::Libelle
        } else if x < self.valeur_limit {
            Column::DateValeur
        } else if x < self.debit_limit {
            Column::Debit
        } else if x < self.credit_limit {
            Column::Credit
        } else {
            Column::Solde
        }
    }
}

/// Distribute a line's words into the open transaction's fields.
pub fn assign_line(bounds: &ColumnBounds, words: &[PositionedWord], tx: &mut RawTransaction) {
    for word in words {
        assign_word(bounds.column_for(word.x), &word.text, tx);
    }
}

fn assign_word(column: Column, text: &str, tx: &mut RawTransaction) {
    match column {
        // First date wins; later date-column words are dropped.
        Column::Date => {
            if tx.date.is_empty() {
                tx.date.push_str(text);
            }
        }
        Column::Libelle => {
            tx.libelle.push_str(text);
            tx.libelle.push(' ');
        }
        // Numeric columns: OCR splits "767 000" into two words.
        Column::DateValeur => tx.date_valeur.push_str(text),
        Column::Debit => tx.debit.push_str(text),
        Column::Credit => tx.credit.push_str(text),
        Column::Solde => tx.solde.push_str(text),
    }
}
