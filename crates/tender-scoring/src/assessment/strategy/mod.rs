//! Pluggable three-level scorers: requirement, dimension and supplier total.

mod pricing;
mod registry;
mod standard;

pub use pricing::PricingStrategy;
pub use registry::{AssessmentTool, DimensionKind, StrategyRegistry};
pub use standard::StandardWeightedStrategy;

use super::domain::{AssessmentDefinition, CalculationRow, DimensionId, SupplierId, SupplierScores};
use super::error::ScoringError;

/// Decimal places kept on every returned or persisted score.
pub const SCORE_SCALE: i32 = 2;

/// Scoring contract invoked by the orchestrator in strict order for each assessment.
pub trait ScoringStrategy: Send + Sync {
    /// Score a single calculation row. `rows` is the full (eliminated) row set.
    fn requirement_score(
        &self,
        row: &CalculationRow,
        rows: &[CalculationRow],
    ) -> Result<f64, ScoringError>;

    /// Score one supplier dimension once every requirement score is known.
    ///
    /// `None` leaves the dimension unscored.
    fn dimension_score(
        &self,
        suppliers: &[SupplierScores],
        supplier_id: &SupplierId,
        dimension_id: DimensionId,
        assessment: &AssessmentDefinition,
        rows: &[CalculationRow],
    ) -> Result<Option<f64>, ScoringError>;

    /// Combine a supplier's dimension scores into the overall total.
    fn supplier_total(&self, supplier: &SupplierScores) -> Result<f64, ScoringError>;
}

/// Round half up to `scale` decimal places.
pub fn round_score(value: f64, scale: i32) -> f64 {
    let multiplier = 10f64.powi(scale);
    (value * multiplier + 0.5).floor() / multiplier
}
