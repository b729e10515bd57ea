use super::registry::DimensionKind;
use super::{round_score, ScoringStrategy, SCORE_SCALE};
use crate::assessment::domain::{
    submission_type, AssessmentDefinition, CalculationRow, DimensionId, SupplierId,
    SupplierScores, REMOTE_WORKING_REQUIREMENT,
};
use crate::assessment::error::ScoringError;

const NATIONAL_MAX: &[&str] = &[submission_type::NATIONAL_MAX_DAY_RATE];
const NATIONAL_HOME: &[&str] = &[submission_type::NATIONAL_HOME_DAY_RATE];
const NATIONAL_BOTH: &[&str] = &[
    submission_type::NATIONAL_MAX_DAY_RATE,
    submission_type::NATIONAL_HOME_DAY_RATE,
];

/// Min-max normalised day-rate scorer used by pricing assessments.
///
/// The day-rate criterion depends on the Location selections: specific locations use the
/// national maximum rate, remote working uses the national home rate, and both average the two.
#[derive(Debug, Default, Clone, Copy)]
pub struct PricingStrategy;

impl PricingStrategy {
    /// Day-rate criteria implied by the Location selections, if any were made.
    pub fn day_rate_criteria(rows: &[CalculationRow]) -> Option<&'static [&'static str]> {
        let remote = rows
            .iter()
            .any(|row| row.requirement_name == REMOTE_WORKING_REQUIREMENT);
        let specific_location = rows.iter().any(|row| {
            DimensionKind::from_name(&row.dimension_name) == Some(DimensionKind::Location)
                && row.requirement_name != REMOTE_WORKING_REQUIREMENT
        });

        match (specific_location, remote) {
            (true, false) => Some(NATIONAL_MAX),
            (false, true) => Some(NATIONAL_HOME),
            (true, true) => Some(NATIONAL_BOTH),
            (false, false) => None,
        }
    }
}

impl ScoringStrategy for PricingStrategy {
    fn requirement_score(
        &self,
        row: &CalculationRow,
        _rows: &[CalculationRow],
    ) -> Result<f64, ScoringError> {
        let score = row.numeric_submission()? * row.requirement_multiplier();
        Ok(round_score(score, SCORE_SCALE))
    }

    fn dimension_score(
        &self,
        suppliers: &[SupplierScores],
        supplier_id: &SupplierId,
        dimension_id: DimensionId,
        _assessment: &AssessmentDefinition,
        rows: &[CalculationRow],
    ) -> Result<Option<f64>, ScoringError> {
        let Some(criteria) = Self::day_rate_criteria(rows) else {
            return Ok(None);
        };
        let divisor = criteria.len() as f64;

        let totals: Vec<f64> = suppliers
            .iter()
            .filter_map(|supplier| supplier.dimension(dimension_id))
            .map(|dimension| dimension.criterion_total(criteria) / divisor)
            .collect();

        let min = totals
            .iter()
            .copied()
            .reduce(f64::min)
            .ok_or(ScoringError::NoPricingTotals)?;
        let max = totals
            .iter()
            .copied()
            .reduce(f64::max)
            .ok_or(ScoringError::NoPricingTotals)?;

        let target = suppliers
            .iter()
            .find(|supplier| &supplier.supplier_id == supplier_id)
            .and_then(|supplier| supplier.dimension(dimension_id))
            .ok_or_else(|| ScoringError::PricingDimensionMissing(supplier_id.clone()))?;

        let supplier_total = target.criterion_total(criteria) / divisor;

        // Identical totals rank every supplier as cheapest.
        if max == min {
            return Ok(Some(100.0));
        }

        let score = 100.0 - (supplier_total - min) / (max - min) * 100.0;
        Ok(Some(round_score(score, SCORE_SCALE)))
    }

    fn supplier_total(&self, supplier: &SupplierScores) -> Result<f64, ScoringError> {
        let total: f64 = supplier
            .dimension_scores
            .iter()
            .filter_map(|dimension| dimension.score)
            .sum();
        Ok(round_score(total, SCORE_SCALE))
    }
}
