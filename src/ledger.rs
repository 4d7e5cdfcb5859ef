//! Pending-change bookkeeping.

/// Ordered record of parameter ids changed since the ledger was last cleared.
///
/// Every successful mutation appends its id, so an id that changed twice
/// shows up twice. The dirty flag stays set until the consumer clears or
/// drains the ledger.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ChangeLedger {
    ids: Vec<u32>,
    dirty: bool,
}

impl ChangeLedger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, id: u32) {
        self.ids.push(id);
        self.dirty = true;
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn ids(&self) -> &[u32] {
        &self.ids
    }

    pub fn clear(&mut self) {
        self.ids.clear();
        self.dirty = false;
    }

    /// Returns the recorded ids and leaves the ledger clean.
    pub fn drain(&mut self) -> Vec<u32> {
        self.dirty = false;
        std::mem::take(&mut self.ids)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_ledger_is_clean() {
        let ledger = ChangeLedger::new();
        assert!(!ledger.is_dirty());
        assert!(ledger.ids().is_empty());
    }

    #[test]
    fn test_record_keeps_order_and_repeats() {
        let mut ledger = ChangeLedger::new();
        ledger.record(4);
        ledger.record(2);
        ledger.record(4);
        assert!(ledger.is_dirty());
        assert_eq!(ledger.ids(), &[4, 2, 4]);
    }

    #[test]
    fn test_drain_returns_ids_and_cleans() {
        let mut ledger = ChangeLedger::new();
        ledger.record(1);
        ledger.record(9);

        assert_eq!(ledger.drain(), vec![1, 9]);
        assert!(!ledger.is_dirty());
        assert!(ledger.ids().is_empty());

        ledger.record(3);
        assert!(ledger.is_dirty());
    }

    #[test]
    fn test_clear() {
        let mut ledger = ChangeLedger::new();
        ledger.record(5);
        ledger.clear();
        assert_eq!(ledger, ChangeLedger::new());
    }
}
