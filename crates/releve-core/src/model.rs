use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Grouping key of a word: block id, then line id within the block.
///
/// Ordering on this key stands in for vertical reading order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct LineKey {
    pub block: u32,
    pub line: u32,
}

/// A single OCR'd word with its position on the page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PositionedWord {
    /// Leading (left) edge.
    pub x: f32,
    /// Top edge.
    pub y: f32,
    pub key: LineKey,
    pub text: String,
}

impl PositionedWord {
    pub fn new(x: f32, y: f32, block: u32, line: u32, text: impl Into<String>) -> Self {
        PositionedWord {
            x,
            y,
            key: LineKey { block, line },
            text: text.into(),
        }
    }
}

/// Transaction fields as accumulated from the page, before normalization.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawTransaction {
    pub date: String,
    pub date_valeur: String,
    pub libelle: String,
    pub debit: String,
    pub credit: String,
    pub solde: String,
}

impl RawTransaction {
    pub fn is_empty(&self) -> bool {
        self.date.is_empty()
            && self.date_valeur.is_empty()
            && self.libelle.is_empty()
            && self.debit.is_empty()
            && self.credit.is_empty()
            && self.solde.is_empty()
    }
}

/// A normalized transaction row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    pub date: NaiveDate,
    pub date_valeur: Option<NaiveDate>,
    pub libelle: String,
    pub debit: Decimal,
    pub credit: Decimal,
    pub solde: Decimal,
}

/// Everything extracted from one statement document.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Statement {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub preceding_balance: Option<Decimal>,
    pub transactions: Vec<Transaction>,
    /// Number of transactions assembled before date filtering.
    pub raw_count: usize,
    /// Rows dropped because their date did not parse.
    pub dropped: usize,
}

impl Statement {
    pub fn total_debit(&self) -> Decimal {
        self.transactions.iter().map(|t| t.debit).sum()
    }

    pub fn total_credit(&self) -> Decimal {
        self.transactions.iter().map(|t| t.credit).sum()
    }
}
