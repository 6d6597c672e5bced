//! Error types for mining operations.

use crate::corpus::ItemId;
use thiserror::Error;

/// Top-level error type for mining operations.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum MineError {
    /// A support or confidence threshold outside `[0, 1]`.
    #[error("{name} must lie in [0, 1], got {value}")]
    InvalidThreshold { name: &'static str, value: f64 },

    /// A confidence calculation asked for a support count that was never
    /// recorded. The engines record every tested candidate, so this is an
    /// internal inconsistency and must surface instead of defaulting to zero.
    #[error("support for itemset {itemset:?} was never recorded")]
    MissingSupport { itemset: Vec<ItemId> },
}

/// Result type for mining operations.
pub type Result<T> = std::result::Result<T, MineError>;

pub(crate) fn check_threshold(name: &'static str, value: f64) -> Result<()> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(MineError::InvalidThreshold { name, value })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn thresholds_bounded() {
        assert!(check_threshold("min_support", 0.0).is_ok());
        assert!(check_threshold("min_support", 1.0).is_ok());
        assert_eq!(
            check_threshold("min_support", 1.5),
            Err(MineError::InvalidThreshold { name: "min_support", value: 1.5 })
        );
        assert!(check_threshold("min_confidence", -0.1).is_err());
        assert!(check_threshold("min_confidence", f64::NAN).is_err());
    }
}
