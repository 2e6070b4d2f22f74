//! Per-enumeration record of emitted locations.

use std::collections::HashSet;

/// Tracks which locations have already been emitted.
///
/// One ledger lives for exactly one enumeration; it is never shared.
#[derive(Debug, Default)]
pub struct UrlLedger {
    seen: HashSet<String>,
}

impl UrlLedger {
    /// Create an empty ledger.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `loc` and report whether it may be emitted.
    ///
    /// Returns `false` for empty locations and for locations admitted
    /// before.
    ///
    /// ```rust
    /// use locmap_core::UrlLedger;
    ///
    /// let mut ledger = UrlLedger::new();
    /// assert!(ledger.admit("/about"));
    /// assert!(!ledger.admit("/about"));
    /// assert!(!ledger.admit(""));
    /// ```
    pub fn admit(&mut self, loc: &str) -> bool {
        if loc.is_empty() || self.seen.contains(loc) {
            return false;
        }
        self.seen.insert(loc.to_string())
    }

    /// Whether `loc` has been admitted.
    pub fn contains(&self, loc: &str) -> bool {
        self.seen.contains(loc)
    }

    /// Number of admitted locations.
    pub fn len(&self) -> usize {
        self.seen.len()
    }

    /// Whether nothing has been admitted yet.
    pub fn is_empty(&self) -> bool {
        self.seen.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_rejects_empty_location() {
        let mut ledger = UrlLedger::new();
        assert!(!ledger.admit(""));
        assert!(ledger.is_empty());
    }

    #[test]
    fn test_is_case_sensitive() {
        let mut ledger = UrlLedger::new();
        assert!(ledger.admit("/About"));
        assert!(ledger.admit("/about"));
        assert_eq!(ledger.len(), 2);
    }

    proptest! {
        #[test]
        fn test_admits_each_location_once(locs in prop::collection::vec("/[a-c]{0,2}", 0..40)) {
            let mut ledger = UrlLedger::new();
            let admitted: Vec<&String> = locs.iter().filter(|l| ledger.admit(l)).collect();

            let unique: HashSet<&String> = admitted.iter().copied().collect();
            prop_assert_eq!(unique.len(), admitted.len());
            for loc in &locs {
                prop_assert!(ledger.contains(loc));
            }
        }
    }
}
