use serde::{Deserialize, Serialize};

/// Layout description of one statement template.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatementTemplate {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub version: String,
    pub columns: ColumnBounds,
    /// A line containing every one of these is the table header.
    #[serde(default)]
    pub header_markers: Vec<String>,
    #[serde(default)]
    pub noise: Vec<NoisePattern>,
    pub truncation: TruncationRule,
    pub preceding_balance: BalanceRule,
}

/// Exclusive upper x-limits of the first five columns. Solde takes the rest.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ColumnBounds {
    pub date_limit: f32,
    pub libelle_limit: f32,
    pub valeur_limit: f32,
    pub debit_limit: f32,
    pub credit_limit: f32,
}

impl ColumnBounds {
    pub fn limits(&self) -> [f32; 5] {
        [
            self.date_limit,
            self.libelle_limit,
            self.valeur_limit,
            self.debit_limit,
            self.credit_limit,
        ]
    }
}

/// A literal substring marking a line as noise, optionally only when the
/// line also contains every string in `requires`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NoisePattern {
    pub pattern: String,
    #[serde(default)]
    pub requires: Vec<String>,
}

impl NoisePattern {
    pub fn matches(&self, line: &str) -> bool {
        line.contains(&self.pattern) && self.requires.iter().all(|r| line.contains(r.as_str()))
    }
}

/// Detection of merged "total" rows that must be cut off a line.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TruncationRule {
    /// Lowercase substring that makes a word a truncation candidate.
    pub trigger: String,
    /// Number of words, starting at the candidate, joined into the snippet.
    pub window: usize,
    /// Substrings searched in the lowercase, space-free snippet.
    pub markers: Vec<String>,
    /// Substrings searched in the candidate word alone.
    #[serde(default)]
    pub single_word_markers: Vec<String>,
}

/// Where to look for the balance carried over from the previous statement.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BalanceRule {
    pub label: String,
    pub y_tolerance: f32,
    pub min_x: f32,
    pub synthetic_label: String,
}
