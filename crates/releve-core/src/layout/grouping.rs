use crate::model::{LineKey, PositionedWord};
use std::collections::BTreeMap;

/// Words sharing a line key, sorted left to right.
#[derive(Debug, Clone, PartialEq)]
pub struct Line {
    pub words: Vec<PositionedWord>,
}

/// Group a page's words into lines ordered by (block, line), each sorted by x.
pub fn group_lines(words: &[PositionedWord]) -> Vec<Line> {
    let mut rows: BTreeMap<LineKey, Vec<PositionedWord>> = BTreeMap::new();
    for word in words {
        rows.entry(word.key).or_default().push(word.clone());
    }

    rows.into_values()
        .map(|mut words| {
            // Stable, so words at the same x keep extraction order.
            words.sort_by(|a, b| a.x.total_cmp(&b.x));
            Line { words }
        })
        .collect()
}
