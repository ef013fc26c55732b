use crate::model::PositionedWord;
use crate::parsing::values::parse_amount;
use crate::template::schema::BalanceRule;
use once_cell::sync::Lazy;
use regex::Regex;
use rust_decimal::Decimal;

static AMOUNT_PART_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[\d.,]+$").expect("amount pattern is valid"));

/// Find the balance carried over from the previous statement.
///
/// Looks for the first word containing the label, then joins the numeric
/// words on the same visual line that lie right of `min_x`, left to right.
/// This works on raw y positions, independently of line grouping.
pub fn find_preceding_balance(words: &[PositionedWord], rule: &BalanceRule) -> Option<Decimal> {
    let label = words.iter().find(|w| w.text.contains(rule.label.as_str()))?;
    let label_y = label.y;

    let mut candidates: Vec<&PositionedWord> = words
        .iter()
        .filter(|w| (w.y - label_y).abs() < rule.y_tolerance)
        .filter(|w| w.x > rule.min_x && AMOUNT_PART_RE.is_match(&w.text))
        .collect();
    candidates.sort_by(|a, b| a.x.total_cmp(&b.x));
    let parts: Vec<&str> = candidates.iter().map(|w| w.text.as_str()).collect();

    if parts.is_empty() {
        return None;
    }

    let amount = parse_amount(&parts.concat());
    tracing::debug!(%amount, parts = ?parts, "preceding balance found");
    Some(amount)
}
