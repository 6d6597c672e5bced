//! Write-once support-count table shared by the engines and the rule
//! generator.

use std::collections::hash_map::Entry;
use std::collections::HashMap;

use crate::corpus::ItemId;
use crate::error::{MineError, Result};

/// Maps canonical (sorted) itemsets to their exact support counts.
///
/// Counts are write-once: the first recorded count for an itemset stands
/// for the remainder of the run. A later recomputation that disagrees with
/// the stored count indicates an engine bug and trips a debug assertion.
#[derive(Debug, Default, Clone)]
pub struct SupportTable {
    counts: HashMap<Vec<ItemId>, u64>,
}

impl SupportTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records the support count for a canonical itemset. The first write
    /// wins; duplicates must agree with it.
    pub fn record(&mut self, itemset: Vec<ItemId>, count: u64) {
        debug_assert!(itemset.windows(2).all(|w| w[0] < w[1]));
        match self.counts.entry(itemset) {
            Entry::Vacant(slot) => {
                slot.insert(count);
            }
            Entry::Occupied(existing) => {
                debug_assert_eq!(
                    *existing.get(),
                    count,
                    "support recomputed with a different value for {:?}",
                    existing.key()
                );
            }
        }
    }

    /// Exact support of a canonical itemset. Missing entries are an
    /// internal inconsistency, never zero.
    pub fn get(&self, itemset: &[ItemId]) -> Result<u64> {
        self.counts
            .get(itemset)
            .copied()
            .ok_or_else(|| MineError::MissingSupport { itemset: itemset.to_vec() })
    }

    pub fn contains(&self, itemset: &[ItemId]) -> bool {
        self.counts.contains_key(itemset)
    }

    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&[ItemId], u64)> {
        self.counts.iter().map(|(k, &v)| (k.as_slice(), v))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_write_wins() {
        let mut table = SupportTable::new();
        table.record(vec![1, 2], 4);
        table.record(vec![1, 2], 4);
        assert_eq!(table.get(&[1, 2]), Ok(4));
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn missing_support_is_an_error() {
        let table = SupportTable::new();
        assert_eq!(
            table.get(&[7]),
            Err(MineError::MissingSupport { itemset: vec![7] })
        );
    }

    #[test]
    #[should_panic(expected = "support recomputed")]
    fn contradicting_write_trips_debug_assert() {
        let mut table = SupportTable::new();
        table.record(vec![3], 2);
        table.record(vec![3], 5);
    }
}
