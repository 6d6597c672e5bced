//! FP-Growth engine: compressed prefix-tree construction plus
//! conditional-pattern mining.

mod builder;
mod mining;
mod tree;

pub(crate) use mining::mine;
