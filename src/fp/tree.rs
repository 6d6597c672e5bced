//! Arena-backed FP-tree.
//!
//! Nodes live in a flat `Vec`; the children map is the only ownership edge,
//! while `parent` and the same-item `next` chain are plain indices. The
//! header table keeps each item's aggregate count plus the head and tail of
//! its node chain, so appending stays O(1) and same-item traversal never
//! walks the whole tree.

use std::collections::HashMap;

use crate::corpus::ItemId;

pub(crate) const ROOT: usize = 0;

#[derive(Debug, Clone)]
pub(crate) struct FpNode {
    /// `None` only for the sentinel root.
    pub item: Option<ItemId>,
    pub count: u64,
    pub parent: Option<usize>,
    pub children: HashMap<ItemId, usize>,
    /// Next node carrying the same item, in insertion order.
    pub next: Option<usize>,
}

impl FpNode {
    fn sentinel() -> Self {
        Self { item: None, count: 0, parent: None, children: HashMap::new(), next: None }
    }

    fn new(item: ItemId, count: u64, parent: usize) -> Self {
        Self {
            item: Some(item),
            count,
            parent: Some(parent),
            children: HashMap::new(),
            next: None,
        }
    }
}

#[derive(Debug, Clone)]
pub(crate) struct HeaderEntry {
    /// Aggregate count of the item across the whole tree.
    pub count: u64,
    pub head: usize,
    tail: usize,
}

#[derive(Debug, Clone)]
pub(crate) struct FpTree {
    pub nodes: Vec<FpNode>,
    pub header: HashMap<ItemId, HeaderEntry>,
}

impl FpTree {
    pub fn new() -> Self {
        Self { nodes: vec![FpNode::sentinel()], header: HashMap::new() }
    }

    /// Inserts one frequency-ordered path with a multiplicity. Shared
    /// prefixes accumulate counts; new nodes are appended to the tail of
    /// their item's header chain.
    pub fn insert(&mut self, path: &[ItemId], weight: u64) {
        let mut current = ROOT;
        for &item in path {
            let node = match self.nodes[current].children.get(&item).copied() {
                Some(child) => {
                    self.nodes[child].count += weight;
                    child
                }
                None => {
                    let node = self.nodes.len();
                    self.nodes.push(FpNode::new(item, weight, current));
                    self.nodes[current].children.insert(item, node);
                    self.append_to_chain(item, node);
                    node
                }
            };
            self.header
                .entry(item)
                .or_insert_with(|| HeaderEntry { count: 0, head: node, tail: node })
                .count += weight;
            current = node;
        }
    }

    /// Appends a fresh node to its item's chain. A no-op for the item's
    /// first node: the header entry created right after already points at it
    /// as both head and tail.
    fn append_to_chain(&mut self, item: ItemId, node: usize) {
        if let Some(entry) = self.header.get_mut(&item) {
            let tail = entry.tail;
            self.nodes[tail].next = Some(node);
            entry.tail = node;
        }
    }

    /// Header items ordered by descending aggregate count, ties broken by
    /// ascending item id. This is the fixed processing and insertion order.
    pub fn items_by_frequency(&self) -> Vec<ItemId> {
        let mut items: Vec<(ItemId, u64)> =
            self.header.iter().map(|(&item, entry)| (item, entry.count)).collect();
        items.sort_unstable_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(&b.0)));
        items.into_iter().map(|(item, _)| item).collect()
    }

    /// Conditional pattern base for an item: for every node in its header
    /// chain, the root-to-node path (excluding the node itself and the
    /// sentinel) paired with that occurrence's count.
    pub fn prefix_paths(&self, item: ItemId) -> Vec<(Vec<ItemId>, u64)> {
        let mut paths = Vec::new();
        let Some(entry) = self.header.get(&item) else {
            return paths;
        };

        let mut cursor = Some(entry.head);
        while let Some(node) = cursor {
            let mut path = Vec::new();
            let mut ancestor = self.nodes[node].parent;
            while let Some(idx) = ancestor {
                if let Some(label) = self.nodes[idx].item {
                    path.push(label);
                }
                ancestor = self.nodes[idx].parent;
            }
            if !path.is_empty() {
                path.reverse();
                paths.push((path, self.nodes[node].count));
            }
            cursor = self.nodes[node].next;
        }
        paths
    }
}
