use super::domain::{DimensionId, SupplierId};

/// Unrecoverable scoring configuration inconsistencies. These are never retried.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ScoringError {
    #[error("no scores for supplier {0} - unable to calculate dimension score")]
    SupplierNotFound(SupplierId),
    #[error("no dimension {dimension} for supplier {supplier} - unable to calculate dimension score")]
    DimensionNotFound {
        supplier: SupplierId,
        dimension: DimensionId,
    },
    #[error("pricing dimension not found in scores for supplier {0}")]
    PricingDimensionMissing(SupplierId),
    #[error("no supplier pricing totals - unable to calculate min/max")]
    NoPricingTotals,
    #[error("supplier {supplier} submitted non-numeric value '{value}' for requirement '{requirement}'")]
    InvalidSubmissionValue {
        supplier: SupplierId,
        requirement: String,
        value: String,
    },
    #[error("no scoring strategy registered for dimension '{0}'")]
    UnknownDimension(String),
    #[error("no scoring strategy registered for assessment tool '{0}'")]
    UnknownTool(String),
    #[error("dimension {dimension} for supplier {supplier} has a zero divisor")]
    ZeroDivisor {
        supplier: SupplierId,
        dimension: DimensionId,
    },
    #[error("dimension {dimension} for supplier {supplier} was never scored")]
    UnscoredDimension {
        supplier: SupplierId,
        dimension: DimensionId,
    },
}
