//! FP-tree construction from weighted itemset lists.

use std::collections::HashMap;

use crate::corpus::ItemId;

use super::tree::FpTree;

/// Builds a tree from itemsets with multiplicities (weight 1 for raw
/// transactions, the occurrence count when building conditional trees).
///
/// Items whose weighted aggregate falls below `min_count` are dropped before
/// insertion. `None` means nothing survived, the normal base case of the
/// conditional-mining recursion, not a failure.
pub(crate) fn build_tree(paths: &[(Vec<ItemId>, u64)], min_count: u64) -> Option<FpTree> {
    let mut aggregate: HashMap<ItemId, u64> = HashMap::new();
    for (path, weight) in paths {
        for &item in path {
            *aggregate.entry(item).or_insert(0) += weight;
        }
    }

    // Descending aggregate count, ascending id on ties: the deterministic
    // insertion order that keeps tree shapes reproducible.
    let mut survivors: Vec<(ItemId, u64)> = aggregate
        .into_iter()
        .filter(|&(_, count)| count >= min_count)
        .collect();
    if survivors.is_empty() {
        return None;
    }
    survivors.sort_unstable_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(&b.0)));

    let rank: HashMap<ItemId, usize> = survivors
        .iter()
        .enumerate()
        .map(|(rank, &(item, _))| (item, rank))
        .collect();

    let mut tree = FpTree::new();
    for (path, weight) in paths {
        let mut kept: Vec<ItemId> =
            path.iter().copied().filter(|item| rank.contains_key(item)).collect();
        if kept.is_empty() {
            continue;
        }
        kept.sort_unstable_by_key(|item| rank[item]);
        tree.insert(&kept, *weight);
    }
    Some(tree)
}
