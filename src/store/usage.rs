//! Per-run usage counts of translated keys.

use std::collections::HashMap;

/// Ledger record for one key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct UsageEntry {
    /// Number of requests.
    count: u64,
    /// Position of the first request among all recorded keys.
    first_use: usize,
}

/// Counts how often each key was passed to `translate`.
#[derive(Debug, Clone, Default)]
pub struct UsageLedger {
    /// Key → usage record.
    entries: HashMap<String, UsageEntry>,
}

impl UsageLedger {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records one request for `key` and returns the new count.
    pub fn record(&mut self, key: &str) -> u64 {
        if let Some(entry) = self.entries.get_mut(key) {
            entry.count = entry.count.saturating_add(1);
            return entry.count;
        }
        let first_use = self.entries.len();
        self.entries.insert(key.to_owned(), UsageEntry { count: 1, first_use });
        1
    }

    /// Requests recorded for `key`, zero if never requested.
    #[must_use]
    pub fn count(&self, key: &str) -> u64 {
        self.entries.get(key).map_or(0, |entry| entry.count)
    }

    #[must_use]
    pub fn contains(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// `(key, count)` pairs in first-use order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, u64)> {
        let mut entries: Vec<_> = self.entries.iter().collect();
        entries.sort_by_key(|(_, entry)| entry.first_use);
        entries.into_iter().map(|(key, entry)| (key.as_str(), entry.count))
    }

    /// Keys ordered by ascending count, ties in first-use order.
    #[must_use]
    pub fn keys_by_usage(&self) -> Vec<&str> {
        let mut entries: Vec<_> = self.entries.iter().collect();
        entries.sort_by_key(|(_, entry)| (entry.count, entry.first_use));
        entries.into_iter().map(|(key, _)| key.as_str()).collect()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use googletest::prelude::*;

    use super::*;

    fn ledger(requests: &[&str]) -> UsageLedger {
        let mut ledger = UsageLedger::new();
        for key in requests {
            ledger.record(key);
        }
        ledger
    }

    #[googletest::test]
    fn record_counts_requests() {
        let mut ledger = UsageLedger::new();

        expect_that!(ledger.record("A"), eq(1));
        expect_that!(ledger.record("A"), eq(2));
        expect_that!(ledger.count("A"), eq(2));
        expect_that!(ledger.count("B"), eq(0));
        expect_that!(ledger.contains("B"), eq(false));
    }

    #[test]
    fn keys_by_usage_puts_least_used_first() {
        let ledger = ledger(&["A", "C", "A", "B", "C", "A"]);

        assert_eq!(ledger.keys_by_usage(), ["B", "C", "A"]);
    }

    #[test]
    fn keys_by_usage_breaks_ties_by_first_use() {
        let ledger = ledger(&["Z", "Y", "X", "Y"]);

        assert_eq!(ledger.keys_by_usage(), ["Z", "X", "Y"]);
    }

    #[test]
    fn iter_follows_first_use() {
        let ledger = ledger(&["b", "a", "b"]);

        let pairs: Vec<_> = ledger.iter().collect();

        assert_eq!(pairs, [("b", 2), ("a", 1)]);
    }
}
