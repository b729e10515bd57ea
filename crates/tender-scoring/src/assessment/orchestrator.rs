use std::collections::BTreeMap;
use std::sync::Arc;

use tracing::{debug, info};

use super::domain::{
    AssessmentDefinition, AssessmentId, CalculationRow, DimensionId, DimensionScores,
    RequirementScore, SupplierId, SupplierScores,
};
use super::elimination::EliminationFilter;
use super::error::ScoringError;
use super::repository::{
    AssessmentResult, AssessmentResultRepository, CalculationRowSource, RepositoryError,
    Timestamps,
};
use super::strategy::StrategyRegistry;

/// Drives elimination, the three scoring levels and result persistence for an assessment.
pub struct ScoreOrchestrator<S, R> {
    rows: Arc<S>,
    results: Arc<R>,
    registry: Arc<StrategyRegistry>,
    elimination: EliminationFilter,
}

impl<S, R> ScoreOrchestrator<S, R>
where
    S: CalculationRowSource + 'static,
    R: AssessmentResultRepository + 'static,
{
    pub fn new(rows: Arc<S>, results: Arc<R>, elimination: EliminationFilter) -> Self {
        Self::with_registry(
            rows,
            results,
            Arc::new(StrategyRegistry::standard()),
            elimination,
        )
    }

    pub fn with_registry(
        rows: Arc<S>,
        results: Arc<R>,
        registry: Arc<StrategyRegistry>,
        elimination: EliminationFilter,
    ) -> Self {
        Self {
            rows,
            results,
            registry,
            elimination,
        }
    }

    /// Score every surviving supplier and upsert one result per supplier.
    ///
    /// Nothing is written unless every supplier scores successfully.
    pub fn calculate_supplier_scores(
        &self,
        assessment: &AssessmentDefinition,
        principal: &str,
    ) -> Result<Vec<SupplierScores>, ScoringServiceError> {
        let rows = self.rows.rows_for_assessment(assessment.id)?;
        let scores = self.score_rows(assessment, rows)?;
        self.upsert_results(assessment.id, &scores, principal)?;

        info!(
            assessment = %assessment.id,
            suppliers = scores.len(),
            "supplier scores calculated"
        );
        Ok(scores)
    }

    /// Eliminate and score a row snapshot without touching the result store.
    pub fn score_rows(
        &self,
        assessment: &AssessmentDefinition,
        rows: Vec<CalculationRow>,
    ) -> Result<Vec<SupplierScores>, ScoringError> {
        let rows = self.elimination.apply(rows)?;
        let mut suppliers = self.score_requirements(&rows)?;
        self.score_dimensions_and_totals(&mut suppliers, assessment, &rows)?;
        Ok(suppliers)
    }

    /// Raw rows for one dimension, optionally restricted to a supplier subset.
    pub fn supplier_dimension_data(
        &self,
        dimension_id: DimensionId,
        suppliers: &[SupplierId],
    ) -> Result<Vec<CalculationRow>, ScoringServiceError> {
        let filter = if suppliers.is_empty() {
            None
        } else {
            Some(suppliers)
        };
        Ok(self.rows.rows_for_dimension(dimension_id, filter)?)
    }

    pub fn assessment_results(
        &self,
        assessment_id: AssessmentId,
    ) -> Result<Vec<AssessmentResult>, ScoringServiceError> {
        Ok(self.results.for_assessment(assessment_id)?)
    }

    fn score_requirements(
        &self,
        rows: &[CalculationRow],
    ) -> Result<Vec<SupplierScores>, ScoringError> {
        let mut grouped: BTreeMap<SupplierId, BTreeMap<DimensionId, DimensionScores>> =
            BTreeMap::new();

        for row in rows {
            let strategy = self.registry.for_dimension(&row.dimension_name)?;
            let score = strategy.requirement_score(row, rows)?;

            grouped
                .entry(row.supplier_id.clone())
                .or_default()
                .entry(row.dimension_id)
                .or_insert_with(|| DimensionScores::new(row.dimension_id, &row.dimension_name))
                .requirement_scores
                .push(RequirementScore {
                    name: row.requirement_name.clone(),
                    criterion: row.submission_type.clone(),
                    value: row.numeric_submission()?,
                    // normalise negative zero
                    score: if score == 0.0 { 0.0 } else { score },
                });
        }

        Ok(grouped
            .into_iter()
            .map(|(supplier_id, dimensions)| SupplierScores {
                supplier_id,
                dimension_scores: dimensions.into_values().collect(),
                total: None,
            })
            .collect())
    }

    fn score_dimensions_and_totals(
        &self,
        suppliers: &mut [SupplierScores],
        assessment: &AssessmentDefinition,
        rows: &[CalculationRow],
    ) -> Result<(), ScoringError> {
        let tool = self.registry.for_tool(&assessment.tool)?;

        for index in 0..suppliers.len() {
            for position in 0..suppliers[index].dimension_scores.len() {
                let supplier_id = suppliers[index].supplier_id.clone();
                let dimension = &suppliers[index].dimension_scores[position];
                let dimension_id = dimension.dimension_id;
                let strategy = self.registry.for_dimension(&dimension.name)?;

                let score =
                    strategy.dimension_score(suppliers, &supplier_id, dimension_id, assessment, rows)?;
                if score.is_none() {
                    debug!(supplier = %supplier_id, dimension = %dimension_id, "dimension left unscored");
                }
                suppliers[index].dimension_scores[position].score = score;
            }

            let total = tool.supplier_total(&suppliers[index])?;
            suppliers[index].total = Some(total);
        }

        Ok(())
    }

    fn upsert_results(
        &self,
        assessment_id: AssessmentId,
        scores: &[SupplierScores],
        principal: &str,
    ) -> Result<(), RepositoryError> {
        let mut results = Vec::with_capacity(scores.len());
        for supplier in scores {
            let value = supplier.total.unwrap_or_default();
            let result = match self.results.find(assessment_id, &supplier.supplier_id)? {
                Some(mut existing) => {
                    existing.value = value;
                    existing.timestamps.touch(principal);
                    existing
                }
                None => AssessmentResult {
                    id: None,
                    assessment_id,
                    supplier_organisation_id: supplier.supplier_id.clone(),
                    value,
                    timestamps: Timestamps::created(principal),
                },
            };
            results.push(result);
        }

        self.results.save_all(results)
    }
}

/// Error raised by the score orchestrator.
#[derive(Debug, thiserror::Error)]
pub enum ScoringServiceError {
    #[error(transparent)]
    Scoring(#[from] ScoringError),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}
