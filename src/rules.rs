//! Association-rule derivation, shared by both engines.

use std::collections::HashSet;

use crate::corpus::ItemId;
use crate::error::Result;
use crate::support::SupportTable;
use crate::trace::{TraceEvent, TraceSink};

/// A derived rule over interned ids; mapped to caller items at the API
/// boundary.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct RawRule {
    pub antecedent: Vec<ItemId>,
    pub consequent: Vec<ItemId>,
    pub support: u64,
    pub confidence: f64,
}

/// Derives every rule `antecedent => consequent` with confidence at or above
/// `min_confidence` from the frequent itemsets of size >= 2.
///
/// Each (antecedent, consequent) pair is emitted at most once no matter how
/// many derivation paths reach it. A missing subset support is an internal
/// inconsistency and propagates as an error; it is never treated as zero.
pub(crate) fn generate_rules(
    frequent: &[Vec<ItemId>],
    table: &SupportTable,
    min_confidence: f64,
    trace: &dyn TraceSink,
) -> Result<Vec<RawRule>> {
    let mut seen: HashSet<(Vec<ItemId>, Vec<ItemId>)> = HashSet::new();
    let mut rules = Vec::new();

    for itemset in frequent {
        if itemset.len() < 2 {
            continue;
        }
        let itemset_support = table.get(itemset)?;
        if itemset_support == 0 {
            // Only reachable at a zero support threshold; no meaningful
            // confidence exists for a never-observed itemset.
            continue;
        }

        for antecedent_size in 1..itemset.len() {
            for_each_combination(itemset, antecedent_size, &mut |antecedent| {
                let consequent: Vec<ItemId> = itemset
                    .iter()
                    .copied()
                    .filter(|item| !antecedent.contains(item))
                    .collect();

                let antecedent_support = table.get(antecedent)?;
                let confidence = itemset_support as f64 / antecedent_support as f64;
                let accepted = confidence >= min_confidence;
                trace.record(TraceEvent::RuleEvaluated {
                    antecedent: antecedent.to_vec(),
                    consequent: consequent.clone(),
                    confidence,
                    accepted,
                });

                if accepted {
                    let key = (antecedent.to_vec(), consequent.clone());
                    if seen.insert(key) {
                        rules.push(RawRule {
                            antecedent: antecedent.to_vec(),
                            consequent,
                            support: itemset_support,
                            confidence,
                        });
                    }
                }
                Ok(())
            })?;
        }
    }

    Ok(rules)
}

/// Calls `visit` with every k-combination of `items`, in lexicographic
/// order. Combinations are built in a reused scratch buffer.
fn for_each_combination<F>(items: &[ItemId], k: usize, visit: &mut F) -> Result<()>
where
    F: FnMut(&[ItemId]) -> Result<()>,
{
    let mut scratch = Vec::with_capacity(k);
    descend(items, k, 0, &mut scratch, visit)
}

fn descend<F>(
    items: &[ItemId],
    k: usize,
    start: usize,
    scratch: &mut Vec<ItemId>,
    visit: &mut F,
) -> Result<()>
where
    F: FnMut(&[ItemId]) -> Result<()>,
{
    if scratch.len() == k {
        return visit(scratch);
    }
    for i in start..items.len() {
        scratch.push(items[i]);
        descend(items, k, i + 1, scratch, visit)?;
        scratch.pop();
    }
    Ok(())
}
