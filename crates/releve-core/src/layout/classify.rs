use crate::model::PositionedWord;
use crate::template::schema::StatementTemplate;
use once_cell::sync::Lazy;
use regex::Regex;

static TRANSACTION_DATE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\d{2}/\d{2}/\d{4}$").expect("transaction date pattern is valid"));

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind {
    /// Header, footer, legal text, or a line emptied by truncation.
    Noise,
    /// First word is a DD/MM/YYYY date in the date column.
    TransactionStart,
    /// Extra content for the open transaction.
    Continuation,
    /// Content seen before any transaction was opened.
    Preamble,
}

/// Classification of one line, with the words that survived truncation.
#[derive(Debug, Clone, Copy)]
pub struct Classified<'w> {
    pub kind: LineKind,
    pub words: &'w [PositionedWord],
}

pub struct LineClassifier<'t> {
    template: &'t StatementTemplate,
    /// Truncation trigger and markers, folded like the text they are matched against.
    trigger: String,
    markers: Vec<String>,
    single_word_markers: Vec<String>,
}

impl<'t> LineClassifier<'t> {
    pub fn new(template: &'t StatementTemplate) -> Self {
        let rule = &template.truncation;
        LineClassifier {
            template,
            trigger: fold(&rule.trigger),
            markers: rule.markers.iter().map(|m| fold(m)).collect(),
            single_word_markers: rule.single_word_markers.iter().map(|m| fold(m)).collect(),
        }
    }

    /// Classify a line of x-sorted words.
    ///
    /// Truncation runs before the noise filter, so a line holding only a
    /// merged total row comes out empty and is reported as noise.
    pub fn classify<'w>(&self, words: &'w [PositionedWord], transaction_open: bool) -> Classified<'w> {
        let words = match self.truncation_index(words) {
            Some(idx) => {
                let kept = &words[..idx];
                tracing::debug!(
                    target: "releve::truncation",
                    remaining = ?kept.iter().map(|w| w.text.as_str()).collect::<Vec<_>>(),
                    "line truncated"
                );
                kept
            }
            None => words,
        };

        if words.is_empty() || self.is_noise(&join_words(words)) {
            return Classified {
                kind: LineKind::Noise,
                words,
            };
        }

        let kind = if self.starts_transaction(words) {
            LineKind::TransactionStart
        } else if transaction_open {
            LineKind::Continuation
        } else {
            LineKind::Preamble
        };
        Classified { kind, words }
    }

    /// Index of the word where a merged total row begins, if any.
    pub fn truncation_index(&self, words: &[PositionedWord]) -> Option<usize> {
        let window = self.template.truncation.window;

        for (i, word) in words.iter().enumerate() {
            let single = fold(&word.text);
            if !single.contains(&self.trigger) {
                continue;
            }

            let end = (i + window).min(words.len());
            let snippet = fold(&join_with(&words[i..end], ""));
            tracing::debug!(
                target: "releve::truncation",
                word = %word.text,
                snippet = %snippet,
                "total candidate"
            );

            if self.markers.iter().any(|m| snippet.contains(m.as_str())) {
                return Some(i);
            }
            if self.single_word_markers.iter().any(|m| single.contains(m.as_str())) {
                return Some(i);
            }
        }
        None
    }

    /// Whether the joined text of a line is header/footer noise.
    pub fn is_noise(&self, line_text: &str) -> bool {
        let markers = &self.template.header_markers;
        if !markers.is_empty() && markers.iter().all(|m| line_text.contains(m.as_str())) {
            return true;
        }
        self.template.noise.iter().any(|p| p.matches(line_text))
    }

    /// Whether a line opens a new transaction.
    pub fn starts_transaction(&self, words: &[PositionedWord]) -> bool {
        words.first().is_some_and(|first| {
            first.x < self.template.columns.date_limit && TRANSACTION_DATE_RE.is_match(&first.text)
        })
    }
}

/// Word texts joined with single spaces.
pub fn join_words(words: &[PositionedWord]) -> String {
    join_with(words, " ")
}

fn join_with(words: &[PositionedWord], sep: &str) -> String {
    words
        .iter()
        .map(|w| w.text.as_str())
        .collect::<Vec<_>>()
        .join(sep)
}

/// Lowercase with spaces removed.
fn fold(s: &str) -> String {
    s.replace(' ', "").to_lowercase()
}
