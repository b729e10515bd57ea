use super::{round_score, ScoringStrategy, SCORE_SCALE};
use crate::assessment::domain::{
    submission_type, AssessmentDefinition, CalculationRow, DimensionId, SupplierId, SupplierScores,
};
use crate::assessment::error::ScoringError;

/// Percentage-weighted scorer used by generic capability assessments.
#[derive(Debug, Default, Clone, Copy)]
pub struct StandardWeightedStrategy;

impl ScoringStrategy for StandardWeightedStrategy {
    fn requirement_score(
        &self,
        row: &CalculationRow,
        _rows: &[CalculationRow],
    ) -> Result<f64, ScoringError> {
        if row.dimension_divisor == 0 {
            return Err(ScoringError::ZeroDivisor {
                supplier: row.supplier_id.clone(),
                dimension: row.dimension_id,
            });
        }

        let value = row.numeric_submission()?;
        if value == 0.0 {
            return Ok(0.0);
        }

        let score = value / f64::from(row.dimension_divisor) * row.selection_weight_pct
            * row.dimension_weight_pct
            / 100.0;
        Ok(round_score(score, SCORE_SCALE))
    }

    fn dimension_score(
        &self,
        suppliers: &[SupplierScores],
        supplier_id: &SupplierId,
        dimension_id: DimensionId,
        assessment: &AssessmentDefinition,
        _rows: &[CalculationRow],
    ) -> Result<Option<f64>, ScoringError> {
        let dimension = suppliers
            .iter()
            .find(|supplier| &supplier.supplier_id == supplier_id)
            .ok_or_else(|| ScoringError::SupplierNotFound(supplier_id.clone()))?
            .dimension(dimension_id)
            .ok_or_else(|| ScoringError::DimensionNotFound {
                supplier: supplier_id.clone(),
                dimension: dimension_id,
            })?;

        let sub_contractors_accepted = assessment
            .weighting(dimension_id)
            .map(|weighting| weighting.accepts(submission_type::SUB_CONTRACTOR))
            .unwrap_or(false);

        let supplier_only = dimension.criterion_total(&[submission_type::SUPPLIER]);
        let score = if sub_contractors_accepted {
            let combined = dimension.criterion_total(&[
                submission_type::SUPPLIER,
                submission_type::SUB_CONTRACTOR,
            ]);
            (supplier_only + combined) / 2.0
        } else {
            supplier_only
        };

        Ok(Some(round_score(score, SCORE_SCALE)))
    }

    fn supplier_total(&self, supplier: &SupplierScores) -> Result<f64, ScoringError> {
        let mut total = 0.0;
        for dimension in &supplier.dimension_scores {
            total += dimension
                .score
                .ok_or_else(|| ScoringError::UnscoredDimension {
                    supplier: supplier.supplier_id.clone(),
                    dimension: dimension.dimension_id,
                })?;
        }
        Ok(round_score(total, SCORE_SCALE))
    }
}
