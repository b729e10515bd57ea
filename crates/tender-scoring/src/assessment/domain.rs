use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use super::error::ScoringError;

/// Identifier wrapper for capability assessments.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AssessmentId(pub u32);

/// Supplier organisation identifier as issued by the e-sourcing platform.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SupplierId(pub String);

/// Identifier of an evaluation dimension (e.g. Pricing, Location).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DimensionId(pub u32);

impl fmt::Display for AssessmentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Display for SupplierId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl fmt::Display for DimensionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Submission type names used by the scoring strategies.
pub mod submission_type {
    pub const SUPPLIER: &str = "Supplier";
    pub const SUB_CONTRACTOR: &str = "Sub Contractor";
    pub const NATIONAL_MAX_DAY_RATE: &str = "National Max Day Rate";
    pub const NATIONAL_HOME_DAY_RATE: &str = "National Home Day Rate";
}

/// Requirement name that marks remote working in the Location dimension.
pub const REMOTE_WORKING_REQUIREMENT: &str = "Remote (Supplier's own site)";

/// Flattened supplier submission for one requirement and submission type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalculationRow {
    pub assessment_id: AssessmentId,
    pub supplier_id: SupplierId,
    pub dimension_id: DimensionId,
    pub dimension_name: String,
    pub requirement_name: String,
    pub submission_type: String,
    pub submission_value: Option<String>,
    pub requirement_value: Option<f64>,
    pub dimension_weight_pct: f64,
    pub selection_weight_pct: f64,
    pub dimension_divisor: u32,
}

impl CalculationRow {
    /// Numeric submission value; a missing value counts as zero.
    pub fn numeric_submission(&self) -> Result<f64, ScoringError> {
        match self.submission_value.as_deref().map(str::trim) {
            None | Some("") => Ok(0.0),
            Some(raw) => raw
                .parse::<f64>()
                .ok()
                .filter(|value| value.is_finite())
                .ok_or_else(|| ScoringError::InvalidSubmissionValue {
                    supplier: self.supplier_id.clone(),
                    requirement: self.requirement_name.clone(),
                    value: raw.to_string(),
                }),
        }
    }

    pub fn requirement_multiplier(&self) -> f64 {
        self.requirement_value.unwrap_or(1.0)
    }
}

/// Computed score for a single requirement row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RequirementScore {
    pub name: String,
    pub criterion: String,
    pub value: f64,
    pub score: f64,
}

/// Per-dimension container of requirement scores for one supplier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DimensionScores {
    pub dimension_id: DimensionId,
    pub name: String,
    pub score: Option<f64>,
    pub requirement_scores: Vec<RequirementScore>,
}

impl DimensionScores {
    pub fn new(dimension_id: DimensionId, name: impl Into<String>) -> Self {
        Self {
            dimension_id,
            name: name.into(),
            score: None,
            requirement_scores: Vec::new(),
        }
    }

    /// Sum of requirement scores submitted under any of the given criteria.
    pub fn criterion_total(&self, criteria: &[&str]) -> f64 {
        self.requirement_scores
            .iter()
            .filter(|score| criteria.contains(&score.criterion.as_str()))
            .map(|score| score.score)
            .sum()
    }
}

/// All dimension scores and the overall total for one supplier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SupplierScores {
    pub supplier_id: SupplierId,
    pub dimension_scores: Vec<DimensionScores>,
    pub total: Option<f64>,
}

impl SupplierScores {
    pub fn new(supplier_id: SupplierId) -> Self {
        Self {
            supplier_id,
            dimension_scores: Vec::new(),
            total: None,
        }
    }

    pub fn dimension(&self, dimension_id: DimensionId) -> Option<&DimensionScores> {
        self.dimension_scores
            .iter()
            .find(|dimension| dimension.dimension_id == dimension_id)
    }
}

/// Buyer weighting for one dimension of an assessment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DimensionWeighting {
    pub dimension_id: DimensionId,
    pub name: String,
    pub weighting_pct: f64,
    #[serde(default)]
    pub submission_types: Vec<String>,
}

impl DimensionWeighting {
    pub fn accepts(&self, submission_type: &str) -> bool {
        self.submission_types
            .iter()
            .any(|accepted| accepted == submission_type)
    }
}

/// Assessment aggregate consumed by the scoring engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssessmentDefinition {
    pub id: AssessmentId,
    /// External identifier of the assessment tool, e.g. `"1"` or `"2"`.
    pub tool: String,
    #[serde(default)]
    pub dimension_weightings: Vec<DimensionWeighting>,
}

impl AssessmentDefinition {
    pub fn weighting(&self, dimension_id: DimensionId) -> Option<&DimensionWeighting> {
        self.dimension_weightings
            .iter()
            .find(|weighting| weighting.dimension_id == dimension_id)
    }
}

/// Assessment definitions known to the service, keyed by id.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AssessmentCatalog {
    assessments: BTreeMap<AssessmentId, AssessmentDefinition>,
}

impl AssessmentCatalog {
    pub fn new(definitions: impl IntoIterator<Item = AssessmentDefinition>) -> Self {
        Self {
            assessments: definitions
                .into_iter()
                .map(|definition| (definition.id, definition))
                .collect(),
        }
    }

    /// Parse a JSON array of assessment definitions.
    pub fn from_json(raw: &str) -> Result<Self, serde_json::Error> {
        let definitions: Vec<AssessmentDefinition> = serde_json::from_str(raw)?;
        Ok(Self::new(definitions))
    }

    pub fn get(&self, id: AssessmentId) -> Option<&AssessmentDefinition> {
        self.assessments.get(&id)
    }

    pub fn ids(&self) -> impl Iterator<Item = AssessmentId> + '_ {
        self.assessments.keys().copied()
    }

    pub fn len(&self) -> usize {
        self.assessments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.assessments.is_empty()
    }
}
