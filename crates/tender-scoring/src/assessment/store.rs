use std::collections::BTreeMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

use super::domain::{AssessmentId, CalculationRow, DimensionId, SupplierId};
use super::repository::{
    AssessmentResult, AssessmentResultRepository, CalculationRowSource, RepositoryError,
};

/// Row source over a fixed snapshot, typically loaded from a CSV export.
#[derive(Debug, Default, Clone)]
pub struct InMemoryRowSource {
    rows: Arc<Vec<CalculationRow>>,
}

impl InMemoryRowSource {
    pub fn new(rows: Vec<CalculationRow>) -> Self {
        Self {
            rows: Arc::new(rows),
        }
    }
}

impl CalculationRowSource for InMemoryRowSource {
    fn rows_for_assessment(
        &self,
        assessment_id: AssessmentId,
    ) -> Result<Vec<CalculationRow>, RepositoryError> {
        Ok(self
            .rows
            .iter()
            .filter(|row| row.assessment_id == assessment_id)
            .cloned()
            .collect())
    }

    fn rows_for_dimension(
        &self,
        dimension_id: DimensionId,
        suppliers: Option<&[SupplierId]>,
    ) -> Result<Vec<CalculationRow>, RepositoryError> {
        Ok(self
            .rows
            .iter()
            .filter(|row| row.dimension_id == dimension_id)
            .filter(|row| match suppliers {
                Some(suppliers) if !suppliers.is_empty() => suppliers.contains(&row.supplier_id),
                _ => true,
            })
            .cloned()
            .collect())
    }
}

/// Result store keyed by (assessment, supplier); a second save replaces, never duplicates.
#[derive(Debug, Default, Clone)]
pub struct InMemoryResultStore {
    results: Arc<Mutex<BTreeMap<(AssessmentId, SupplierId), AssessmentResult>>>,
    sequence: Arc<AtomicU64>,
}

impl InMemoryResultStore {
    pub fn len(&self) -> usize {
        self.results.lock().expect("result store mutex poisoned").len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl AssessmentResultRepository for InMemoryResultStore {
    fn find(
        &self,
        assessment_id: AssessmentId,
        supplier_id: &SupplierId,
    ) -> Result<Option<AssessmentResult>, RepositoryError> {
        let guard = self.results.lock().expect("result store mutex poisoned");
        Ok(guard.get(&(assessment_id, supplier_id.clone())).cloned())
    }

    fn save_all(&self, results: Vec<AssessmentResult>) -> Result<(), RepositoryError> {
        let mut guard = self.results.lock().expect("result store mutex poisoned");
        for mut result in results {
            if result.id.is_none() {
                result.id = Some(self.sequence.fetch_add(1, Ordering::Relaxed) + 1);
            }
            guard.insert(
                (result.assessment_id, result.supplier_organisation_id.clone()),
                result,
            );
        }
        Ok(())
    }

    fn for_assessment(
        &self,
        assessment_id: AssessmentId,
    ) -> Result<Vec<AssessmentResult>, RepositoryError> {
        let guard = self.results.lock().expect("result store mutex poisoned");
        Ok(guard
            .values()
            .filter(|result| result.assessment_id == assessment_id)
            .cloned()
            .collect())
    }
}
