//! Conditional-pattern mining over the FP-tree.
//!
//! The recursion of the textbook algorithm is expressed as an explicit work
//! stack of (conditional tree, prefix) pairs, so depth is bounded by heap
//! allocation rather than the native call stack. Top-level items fan out
//! across rayon tasks; conditional trees never share mutable state, so each
//! task mines sequentially into a local buffer and results are merged at
//! the end.

use rayon::prelude::*;

use crate::corpus::{absolute_min_count, Corpus, ItemId};
use crate::support::SupportTable;
use crate::trace::{TraceEvent, TraceSink};

use super::builder::build_tree;
use super::tree::FpTree;

/// Mines all frequent itemsets at `min_support_ratio`, recording each
/// pattern's exact support in `table` at discovery time. Returned itemsets
/// are canonical (id-sorted); ordering across patterns is not guaranteed.
pub(crate) fn mine<I>(
    corpus: &Corpus<I>,
    min_support_ratio: f64,
    table: &mut SupportTable,
    trace: &dyn TraceSink,
) -> Vec<Vec<ItemId>> {
    if corpus.is_empty() {
        return Vec::new();
    }
    let min_count = absolute_min_count(min_support_ratio, corpus.len());

    let weighted: Vec<(Vec<ItemId>, u64)> =
        corpus.transactions().iter().map(|tx| (tx.clone(), 1)).collect();
    let Some(tree) = build_tree(&weighted, min_count) else {
        return Vec::new();
    };
    trace.record(TraceEvent::TreeBuilt { nodes: tree.nodes.len(), items: tree.header.len() });

    let per_item: Vec<Vec<(Vec<ItemId>, u64)>> = tree
        .items_by_frequency()
        .par_iter()
        .map(|&item| {
            let mut local = Vec::new();
            let mut stack: Vec<(FpTree, Vec<ItemId>)> = Vec::new();
            grow_pattern(&tree, item, &[], min_count, &mut local, &mut stack, trace);
            while let Some((conditional, prefix)) = stack.pop() {
                for next in conditional.items_by_frequency() {
                    grow_pattern(&conditional, next, &prefix, min_count, &mut local, &mut stack, trace);
                }
            }
            local
        })
        .collect();

    let mut frequent = Vec::new();
    for patterns in per_item {
        for (itemset, support) in patterns {
            trace.record(TraceEvent::PatternEmitted { itemset: itemset.clone(), support });
            table.record(itemset.clone(), support);
            frequent.push(itemset);
        }
    }
    frequent
}

/// Emits `prefix ∪ {item}` with its exact support (the item's aggregate
/// count in the current tree) and pushes the item's conditional tree onto
/// the work stack when one survives pruning.
fn grow_pattern(
    tree: &FpTree,
    item: ItemId,
    prefix: &[ItemId],
    min_count: u64,
    out: &mut Vec<(Vec<ItemId>, u64)>,
    stack: &mut Vec<(FpTree, Vec<ItemId>)>,
    trace: &dyn TraceSink,
) {
    // Every header item already cleared min_count during tree construction.
    let support = tree.header[&item].count;

    let mut pattern = prefix.to_vec();
    pattern.push(item);
    let mut canonical = pattern.clone();
    canonical.sort_unstable();
    out.push((canonical, support));

    let pattern_base = tree.prefix_paths(item);
    if pattern_base.is_empty() {
        return;
    }
    if let Some(conditional) = build_tree(&pattern_base, min_count) {
        trace.record(TraceEvent::TreeBuilt {
            nodes: conditional.nodes.len(),
            items: conditional.header.len(),
        });
        stack.push((conditional, pattern));
    }
}
