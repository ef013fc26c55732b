use crate::model::RawTransaction;

/// Owns the transaction being built and the ones already finished.
///
/// Pages do not close a transaction: continuation lines at the top of a page
/// still belong to the transaction left open on the previous one.
#[derive(Debug, Default)]
pub struct TransactionAssembler {
    open: Option<RawTransaction>,
    finished: Vec<RawTransaction>,
}

impl TransactionAssembler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_open(&self) -> bool {
        self.open.is_some()
    }

    /// Close the open transaction, if any, and open a fresh one.
    pub fn start(&mut self) -> &mut RawTransaction {
        self.flush();
        self.open.insert(RawTransaction::default())
    }

    /// The open transaction, or None before the first start.
    pub fn current_mut(&mut self) -> Option<&mut RawTransaction> {
        self.open.as_mut()
    }

    /// Number of transactions already closed.
    #[cfg(test)]
    fn finished_len(&self) -> usize {
        self.finished.len()
    }

    /// Close the last transaction and return everything, in order.
    pub fn finish(mut self) -> Vec<RawTransaction> {
        self.flush();
        self.finished
    }

    fn flush(&mut self) {
        if let Some(tx) = self.open.take() {
            if tx.is_empty() {
                tracing::debug!("dropping empty transaction");
            } else {
                self.finished.push(tx);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starts_idle() {
        let mut a = TransactionAssembler::new();
        assert!(!a.is_open());
        assert!(a.current_mut().is_none());
        assert!(a.finish().is_empty());
    }

    #[test]
    fn test_second_start_flushes_first() {
        let mut a = TransactionAssembler::new();
        a.start().date = "01/10/2025".into();
        assert!(a.is_open());
        assert_eq!(a.finished_len(), 0);

        a.start().date = "02/10/2025".into();
        assert_eq!(a.finished_len(), 1);

        a.current_mut().unwrap().libelle.push_str("SUITE ");
        let out = a.finish();
        assert_eq!(out.len(), 2);
        assert_eq!(out[0].date, "01/10/2025");
        assert_eq!(out[1].libelle, "SUITE ");
    }

    #[test]
    fn test_empty_accumulator_is_dropped() {
        let mut a = TransactionAssembler::new();
        a.start();
        assert!(a.finish().is_empty());
    }

    #[test]
    fn test_empty_accumulator_dropped_on_restart() {
        let mut a = TransactionAssembler::new();
        a.start();
        a.start().date = "02/10/2025".into();
        let out = a.finish();
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].date, "02/10/2025");
    }
}
