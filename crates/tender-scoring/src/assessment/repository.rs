use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::domain::{AssessmentId, CalculationRow, DimensionId, SupplierId};

/// Audit metadata stamped on persisted results.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Timestamps {
    pub created_by: String,
    pub created_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_by: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Timestamps {
    pub fn created(principal: &str) -> Self {
        Self {
            created_by: principal.to_string(),
            created_at: Utc::now(),
            updated_by: None,
            updated_at: None,
        }
    }

    pub fn touch(&mut self, principal: &str) {
        self.updated_by = Some(principal.to_string());
        self.updated_at = Some(Utc::now());
    }
}

/// Persisted supplier total for one assessment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssessmentResult {
    /// Store-assigned identity; `None` until first saved.
    pub id: Option<u64>,
    pub assessment_id: AssessmentId,
    pub supplier_organisation_id: SupplierId,
    pub value: f64,
    pub timestamps: Timestamps,
}

/// Source of flattened calculation rows.
pub trait CalculationRowSource: Send + Sync {
    fn rows_for_assessment(
        &self,
        assessment_id: AssessmentId,
    ) -> Result<Vec<CalculationRow>, RepositoryError>;

    /// Rows for one dimension, optionally restricted to the given suppliers.
    fn rows_for_dimension(
        &self,
        dimension_id: DimensionId,
        suppliers: Option<&[SupplierId]>,
    ) -> Result<Vec<CalculationRow>, RepositoryError>;
}

/// Storage for assessment results keyed by (assessment id, supplier id).
pub trait AssessmentResultRepository: Send + Sync {
    fn find(
        &self,
        assessment_id: AssessmentId,
        supplier_id: &SupplierId,
    ) -> Result<Option<AssessmentResult>, RepositoryError>;

    /// Insert or replace every result in one unit; implementations apply all or none.
    fn save_all(&self, results: Vec<AssessmentResult>) -> Result<(), RepositoryError>;

    fn for_assessment(
        &self,
        assessment_id: AssessmentId,
    ) -> Result<Vec<AssessmentResult>, RepositoryError>;
}

/// Error enumeration for repository failures.
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("repository unavailable: {0}")]
    Unavailable(String),
}
