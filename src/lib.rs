//! Frequent-itemset and association-rule mining.
//!
//! Two independent engines — level-wise Apriori and FP-Growth over a
//! compressed prefix tree — mine the same transaction corpus and converge to
//! identical itemsets, support counts, and rules, so their outputs can be
//! cross-validated against each other and against external references.
//!
//! ```
//! use rulemine::{mine_fp_growth, Corpus};
//!
//! let corpus = Corpus::from_transactions(vec![
//!     vec!["bread", "milk"],
//!     vec!["bread", "butter"],
//!     vec!["bread", "milk", "butter"],
//! ]);
//! let outcome = mine_fp_growth(&corpus, 0.5, 0.6).unwrap();
//! assert!(outcome.itemsets.iter().any(|f| f.items == ["bread", "milk"]));
//! ```
//!
//! Results come back in a canonical, comparison-ready form: itemsets sorted
//! by (size, items), rules deduplicated by (antecedent, consequent) and
//! sorted by descending confidence. Nothing is persisted across runs; each
//! invocation owns its own tables and trees.

mod apriori;
pub mod corpus;
pub mod error;
mod fp;
mod rules;
pub mod support;
pub mod trace;

use serde::Serialize;

use crate::corpus::ItemId;
pub use crate::corpus::Corpus;
pub use crate::error::{MineError, Result};
pub use crate::support::SupportTable;
pub use crate::trace::{CollectingSink, NoopSink, TraceEvent, TraceSink};

/// A frequent itemset in canonical form: items sorted by their natural
/// order, with the exact support recorded at discovery time.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FrequentItemset<I> {
    pub items: Vec<I>,
    pub support: u64,
    /// `support / |corpus|`.
    pub ratio: f64,
}

/// An association rule `antecedent => consequent`. Antecedent and
/// consequent are disjoint and their union is a frequent itemset; `support`
/// is the union's count.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AssociationRule<I> {
    pub antecedent: Vec<I>,
    pub consequent: Vec<I>,
    pub support: u64,
    pub confidence: f64,
}

/// Everything one mining run produces.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MiningOutcome<I> {
    pub itemsets: Vec<FrequentItemset<I>>,
    pub rules: Vec<AssociationRule<I>>,
    pub transaction_count: usize,
}

impl<I> MiningOutcome<I> {
    /// True when mining terminated with zero frequent itemsets — a normal,
    /// reportable outcome (empty corpus or thresholds nothing clears), not
    /// a computation failure.
    pub fn is_empty(&self) -> bool {
        self.itemsets.is_empty()
    }
}

/// Mines with the level-wise Apriori engine and derives rules.
pub fn mine_apriori<I: Ord + std::hash::Hash + Clone + Sync>(
    corpus: &Corpus<I>,
    min_support_ratio: f64,
    min_confidence: f64,
) -> Result<MiningOutcome<I>> {
    mine_apriori_traced(corpus, min_support_ratio, min_confidence, &NoopSink)
}

/// [`mine_apriori`] with a trace sink receiving structured events.
pub fn mine_apriori_traced<I: Ord + std::hash::Hash + Clone + Sync>(
    corpus: &Corpus<I>,
    min_support_ratio: f64,
    min_confidence: f64,
    trace: &dyn TraceSink,
) -> Result<MiningOutcome<I>> {
    error::check_threshold("min_support_ratio", min_support_ratio)?;
    error::check_threshold("min_confidence", min_confidence)?;

    let (table, frequent) = apriori::mine(corpus, min_support_ratio, trace);
    assemble(corpus, &table, frequent, min_confidence, trace)
}

/// Mines with the FP-Growth engine and derives rules. The support ratio is
/// converted internally to an absolute transaction count.
pub fn mine_fp_growth<I: Ord + std::hash::Hash + Clone>(
    corpus: &Corpus<I>,
    min_support_ratio: f64,
    min_confidence: f64,
) -> Result<MiningOutcome<I>> {
    mine_fp_growth_traced(corpus, min_support_ratio, min_confidence, &NoopSink)
}

/// [`mine_fp_growth`] with a trace sink receiving structured events.
pub fn mine_fp_growth_traced<I: Ord + std::hash::Hash + Clone>(
    corpus: &Corpus<I>,
    min_support_ratio: f64,
    min_confidence: f64,
    trace: &dyn TraceSink,
) -> Result<MiningOutcome<I>> {
    error::check_threshold("min_support_ratio", min_support_ratio)?;
    error::check_threshold("min_confidence", min_confidence)?;

    let mut table = SupportTable::new();
    let frequent = fp::mine(corpus, min_support_ratio, &mut table, trace);
    assemble(corpus, &table, frequent, min_confidence, trace)
}

/// Shared tail of both engines: derive rules, resolve interned ids back to
/// caller items, and put everything into canonical order.
fn assemble<I: Ord + std::hash::Hash + Clone>(
    corpus: &Corpus<I>,
    table: &SupportTable,
    mut frequent: Vec<Vec<ItemId>>,
    min_confidence: f64,
    trace: &dyn TraceSink,
) -> Result<MiningOutcome<I>> {
    frequent.sort_unstable_by(|a, b| a.len().cmp(&b.len()).then_with(|| a.cmp(b)));
    frequent.dedup();

    let raw_rules = rules::generate_rules(&frequent, table, min_confidence, trace)?;

    let total = corpus.len();
    let mut itemsets = Vec::with_capacity(frequent.len());
    for ids in &frequent {
        let support = table.get(ids)?;
        itemsets.push(FrequentItemset {
            items: corpus.resolve(ids),
            support,
            ratio: support as f64 / total as f64,
        });
    }

    let mut rules: Vec<AssociationRule<I>> = raw_rules
        .into_iter()
        .map(|rule| AssociationRule {
            antecedent: corpus.resolve(&rule.antecedent),
            consequent: corpus.resolve(&rule.consequent),
            support: rule.support,
            confidence: rule.confidence,
        })
        .collect();
    rules.sort_by(|a, b| {
        b.confidence
            .partial_cmp(&a.confidence)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| a.antecedent.cmp(&b.antecedent))
            .then_with(|| a.consequent.cmp(&b.consequent))
    });

    Ok(MiningOutcome { itemsets, rules, transaction_count: total })
}
