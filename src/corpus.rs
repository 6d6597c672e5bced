//! Interned transaction database shared by both mining engines.

use std::collections::{BTreeSet, HashMap};
use std::hash::Hash;

/// Dense internal item identifier. Ids are assigned in the item's natural
/// sort order, so ascending-id order is also canonical item order.
pub type ItemId = u32;

/// A read-only transaction database.
///
/// Items are interned to dense [`ItemId`]s on construction; every transaction
/// is stored as a sorted, deduplicated id slice. Empty transactions are kept:
/// they count toward the support denominator but match no non-empty itemset.
#[derive(Debug, Clone)]
pub struct Corpus<I> {
    items: Vec<I>,
    ids: HashMap<I, ItemId>,
    transactions: Vec<Vec<ItemId>>,
}

impl<I: Ord + Hash + Clone> Corpus<I> {
    /// Builds a corpus from raw transactions, interning every distinct item.
    pub fn from_transactions<T, S>(raw: T) -> Self
    where
        T: IntoIterator<Item = S>,
        S: IntoIterator<Item = I>,
    {
        let raw: Vec<Vec<I>> = raw.into_iter().map(|tx| tx.into_iter().collect()).collect();

        let distinct: BTreeSet<I> = raw.iter().flatten().cloned().collect();
        let items: Vec<I> = distinct.into_iter().collect();
        let ids: HashMap<I, ItemId> = items
            .iter()
            .enumerate()
            .map(|(id, item)| (item.clone(), id as ItemId))
            .collect();

        let transactions = raw
            .into_iter()
            .map(|tx| {
                let mut encoded: Vec<ItemId> = tx.iter().map(|item| ids[item]).collect();
                encoded.sort_unstable();
                encoded.dedup();
                encoded
            })
            .collect();

        Self { items, ids, transactions }
    }

    /// The interned id of an item, if it occurs in the corpus.
    pub fn id_of(&self, item: &I) -> Option<ItemId> {
        self.ids.get(item).copied()
    }
}

impl<I> Corpus<I> {
    /// Number of transactions, including empty ones.
    pub fn len(&self) -> usize {
        self.transactions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transactions.is_empty()
    }

    /// Number of distinct items observed across all transactions.
    pub fn universe_size(&self) -> usize {
        self.items.len()
    }

    pub(crate) fn transactions(&self) -> &[Vec<ItemId>] {
        &self.transactions
    }

    /// The item behind an interned id.
    pub fn item(&self, id: ItemId) -> &I {
        &self.items[id as usize]
    }
}

impl<I: Clone> Corpus<I> {
    /// Maps a sorted id slice back to owned items, preserving order.
    pub(crate) fn resolve(&self, ids: &[ItemId]) -> Vec<I> {
        ids.iter().map(|&id| self.item(id).clone()).collect()
    }
}

/// Absolute support threshold for a ratio over `transactions` transactions.
///
/// `count >= ceil(ratio * n)` is equivalent to `count / n >= ratio` for
/// integer counts, which keeps the two engines' qualification rules in
/// exact agreement.
pub(crate) fn absolute_min_count(ratio: f64, transactions: usize) -> u64 {
    (ratio * transactions as f64).ceil().max(0.0) as u64
}

/// Sorted-slice subset test over interned transactions.
pub(crate) fn is_sorted_subset(needle: &[ItemId], haystack: &[ItemId]) -> bool {
    let mut hay = haystack.iter();
    needle.iter().all(|n| hay.any(|h| h == n))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn interns_in_sort_order() {
        let corpus = Corpus::from_transactions(vec![vec!["pear", "apple"], vec!["mango"]]);
        assert_eq!(corpus.universe_size(), 3);
        assert_eq!(corpus.item(0), &"apple");
        assert_eq!(corpus.item(1), &"mango");
        assert_eq!(corpus.item(2), &"pear");
        assert_eq!(corpus.id_of(&"pear"), Some(2));
        assert_eq!(corpus.id_of(&"plum"), None);
    }

    #[test]
    fn transactions_are_sorted_and_deduped() {
        let corpus = Corpus::from_transactions(vec![vec![5u32, 1, 5, 3]]);
        assert_eq!(corpus.transactions()[0], vec![0, 1, 2]);
    }

    #[test]
    fn keeps_empty_transactions() {
        let corpus = Corpus::from_transactions(vec![vec![1u32], vec![], vec![2]]);
        assert_eq!(corpus.len(), 3);
        assert!(corpus.transactions()[1].is_empty());
    }

    #[test]
    fn min_count_rounds_up() {
        assert_eq!(absolute_min_count(0.5, 5), 3);
        assert_eq!(absolute_min_count(0.4, 5), 2);
        assert_eq!(absolute_min_count(0.0, 5), 0);
        assert_eq!(absolute_min_count(1.0, 5), 5);
        assert_eq!(absolute_min_count(0.5, 0), 0);
    }

    #[test]
    fn sorted_subset() {
        assert!(is_sorted_subset(&[1, 3], &[1, 2, 3]));
        assert!(is_sorted_subset(&[], &[1]));
        assert!(!is_sorted_subset(&[0, 3], &[1, 2, 3]));
        assert!(!is_sorted_subset(&[1], &[]));
    }
}
