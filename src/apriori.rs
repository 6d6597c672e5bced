//! Level-wise (breadth-first) frequent-itemset search.

use std::collections::HashSet;

use rayon::prelude::*;

use crate::corpus::{absolute_min_count, is_sorted_subset, Corpus, ItemId};
use crate::support::SupportTable;
use crate::trace::{TraceEvent, TraceSink};

/// Mines frequent itemsets level by level.
///
/// Every tested candidate's exact support lands in the returned table,
/// frequent or not: rule generation later needs counts for non-terminal
/// subsets too. The returned list holds only the qualifying itemsets, in
/// canonical (id-sorted) form.
pub(crate) fn mine<I: Sync>(
    corpus: &Corpus<I>,
    min_support_ratio: f64,
    trace: &dyn TraceSink,
) -> (SupportTable, Vec<Vec<ItemId>>) {
    let mut table = SupportTable::new();
    let mut frequent = Vec::new();
    if corpus.is_empty() {
        return (table, frequent);
    }
    let min_count = absolute_min_count(min_support_ratio, corpus.len());

    // Ids are dense over observed items, so level 1 is the whole universe.
    let mut candidates: Vec<Vec<ItemId>> =
        (0..corpus.universe_size() as ItemId).map(|item| vec![item]).collect();
    let mut size = 1;

    while !candidates.is_empty() {
        // Counting distinct candidates is independent; partition across
        // workers, then merge so each count is written exactly once.
        let counted: Vec<(Vec<ItemId>, u64)> = candidates
            .into_par_iter()
            .map(|candidate| {
                let support = count_support(corpus, &candidate);
                (candidate, support)
            })
            .collect();

        let mut survivors: Vec<Vec<ItemId>> = Vec::new();
        for (itemset, support) in counted {
            let qualifies = support >= min_count;
            trace.record(TraceEvent::CandidateEvaluated {
                itemset: itemset.clone(),
                support,
                frequent: qualifies,
            });
            table.record(itemset.clone(), support);
            if qualifies {
                survivors.push(itemset);
            }
        }
        trace.record(TraceEvent::LevelFinished { size, survivors: survivors.len() });

        if survivors.is_empty() {
            break;
        }
        size += 1;
        candidates = join_level(&survivors, size);
        frequent.extend(survivors);
    }

    (table, frequent)
}

fn count_support<I>(corpus: &Corpus<I>, candidate: &[ItemId]) -> u64 {
    corpus
        .transactions()
        .iter()
        .filter(|tx| is_sorted_subset(candidate, tx))
        .count() as u64
}

/// Apriori join: pairwise unions of the surviving (k-1)-itemsets, kept only
/// when the union has exactly `target` items, deduplicated. No further
/// subset-frequency pre-check; redundant candidates just get counted out.
fn join_level(survivors: &[Vec<ItemId>], target: usize) -> Vec<Vec<ItemId>> {
    let mut seen: HashSet<Vec<ItemId>> = HashSet::new();
    for (i, left) in survivors.iter().enumerate() {
        for right in &survivors[i + 1..] {
            let union = sorted_union(left, right);
            if union.len() == target {
                seen.insert(union);
            }
        }
    }
    let mut candidates: Vec<Vec<ItemId>> = seen.into_iter().collect();
    candidates.sort_unstable();
    candidates
}

fn sorted_union(left: &[ItemId], right: &[ItemId]) -> Vec<ItemId> {
    let mut union = Vec::with_capacity(left.len() + right.len());
    let (mut i, mut j) = (0, 0);
    while i < left.len() && j < right.len() {
        match left[i].cmp(&right[j]) {
            std::cmp::Ordering::Less => {
                union.push(left[i]);
                i += 1;
            }
            std::cmp::Ordering::Greater => {
                union.push(right[j]);
                j += 1;
            }
            std::cmp::Ordering::Equal => {
                union.push(left[i]);
                i += 1;
                j += 1;
            }
        }
    }
    union.extend_from_slice(&left[i..]);
    union.extend_from_slice(&right[j..]);
    union
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::trace::NoopSink;

    #[test]
    fn sorted_union_merges_without_duplicates() {
        assert_eq!(sorted_union(&[1, 3], &[2, 3]), vec![1, 2, 3]);
        assert_eq!(sorted_union(&[1], &[1]), vec![1]);
        assert_eq!(sorted_union(&[], &[4]), vec![4]);
    }

    #[test]
    fn join_keeps_only_target_sized_unions() {
        let survivors = vec![vec![1, 2], vec![1, 3], vec![4, 5]];
        let candidates = join_level(&survivors, 3);
        // {1,2}∪{4,5} has size 4 and is discarded.
        assert_eq!(candidates, vec![vec![1, 2, 3]]);
    }

    #[test]
    fn counts_every_tested_candidate() {
        let corpus = Corpus::from_transactions(vec![
            vec!["b", "c"],
            vec!["a", "b"],
            vec!["a", "c"],
            vec!["b", "c"],
            vec!["a", "b", "c"],
        ]);
        let (table, frequent) = mine(&corpus, 0.4, &NoopSink);

        let a = corpus.id_of(&"a").unwrap();
        let b = corpus.id_of(&"b").unwrap();
        let c = corpus.id_of(&"c").unwrap();

        assert_eq!(table.get(&[a]), Ok(3));
        assert_eq!(table.get(&[b]), Ok(4));
        assert_eq!(table.get(&[c]), Ok(4));
        assert_eq!(table.get(&[a, b]), Ok(2));
        assert_eq!(table.get(&[a, c]), Ok(2));
        assert_eq!(table.get(&[b, c]), Ok(3));
        // {a,b,c} was generated, counted, and found infrequent, but its
        // exact count is still on record.
        assert_eq!(table.get(&[a, b, c]), Ok(1));

        assert_eq!(frequent.len(), 6);
        assert!(!frequent.contains(&vec![a, b, c]));
    }

    #[test]
    fn empty_corpus_yields_empty_table() {
        let corpus: Corpus<u32> = Corpus::from_transactions(Vec::<Vec<u32>>::new());
        let (table, frequent) = mine(&corpus, 0.5, &NoopSink);
        assert!(table.is_empty());
        assert!(frequent.is_empty());
    }

    #[test]
    fn zero_ratio_exhausts_the_universe() {
        let corpus = Corpus::from_transactions(vec![vec![1u32, 2], vec![2, 3]]);
        let (_, frequent) = mine(&corpus, 0.0, &NoopSink);
        // All 7 non-empty subsets of {1,2,3} qualify; the loop terminates
        // once the universe is exhausted.
        assert_eq!(frequent.len(), 7);
    }

    #[test]
    fn full_ratio_keeps_only_universal_itemsets() {
        let corpus = Corpus::from_transactions(vec![vec![1u32, 2], vec![2, 3], vec![2]]);
        let (_, frequent) = mine(&corpus, 1.0, &NoopSink);
        assert_eq!(frequent, vec![vec![corpus.id_of(&2).unwrap()]]);
    }

    #[test]
    fn empty_transactions_only_deflate_the_ratio() {
        let corpus = Corpus::from_transactions(vec![vec![1u32], vec![], vec![1], vec![]]);
        let (table, frequent) = mine(&corpus, 0.5, &NoopSink);
        let one = corpus.id_of(&1).unwrap();
        assert_eq!(table.get(&[one]), Ok(2));
        assert_eq!(frequent, vec![vec![one]]);
    }
}
