use std::sync::Arc;

use axum::response::Response;
use serde_json::Value;

use crate::assessment::domain::{
    submission_type, AssessmentCatalog, AssessmentDefinition, AssessmentId, CalculationRow,
    DimensionId, DimensionWeighting, SupplierId,
};
use crate::assessment::elimination::EliminationFilter;
use crate::assessment::orchestrator::ScoreOrchestrator;
use crate::assessment::repository::{
    AssessmentResult, AssessmentResultRepository, CalculationRowSource, RepositoryError,
};
use crate::assessment::store::{InMemoryResultStore, InMemoryRowSource};

pub(super) const ASSESSMENT: AssessmentId = AssessmentId(7);
pub(super) const LOCATION: DimensionId = DimensionId(1);
pub(super) const CAPABILITY: DimensionId = DimensionId(3);
pub(super) const PRICING: DimensionId = DimensionId(6);

pub(super) fn supplier(id: &str) -> SupplierId {
    SupplierId(id.to_string())
}

/// Row with neutral weights: score equals the submitted value.
pub(super) fn row(
    supplier_id: &str,
    dimension_id: DimensionId,
    dimension: &str,
    requirement: &str,
    criterion: &str,
    value: &str,
) -> CalculationRow {
    CalculationRow {
        assessment_id: ASSESSMENT,
        supplier_id: supplier(supplier_id),
        dimension_id,
        dimension_name: dimension.to_string(),
        requirement_name: requirement.to_string(),
        submission_type: criterion.to_string(),
        submission_value: Some(value.to_string()),
        requirement_value: None,
        dimension_weight_pct: 100.0,
        selection_weight_pct: 100.0,
        dimension_divisor: 1,
    }
}

pub(super) fn location_row(supplier_id: &str, requirement: &str, value: &str) -> CalculationRow {
    row(
        supplier_id,
        LOCATION,
        "Location",
        requirement,
        submission_type::SUPPLIER,
        value,
    )
}

pub(super) fn capability_row(supplier_id: &str, criterion: &str, value: &str) -> CalculationRow {
    row(
        supplier_id,
        CAPABILITY,
        "Service Capability",
        "Agile Coach",
        criterion,
        value,
    )
}

pub(super) fn day_rate_row(
    supplier_id: &str,
    requirement: &str,
    criterion: &str,
    value: &str,
) -> CalculationRow {
    row(supplier_id, PRICING, "Pricing", requirement, criterion, value)
}

pub(super) fn weighting(
    dimension_id: DimensionId,
    name: &str,
    submission_types: &[&str],
) -> DimensionWeighting {
    DimensionWeighting {
        dimension_id,
        name: name.to_string(),
        weighting_pct: 50.0,
        submission_types: submission_types.iter().map(|s| s.to_string()).collect(),
    }
}

pub(super) fn standard_assessment(sub_contractors: bool) -> AssessmentDefinition {
    let capability_types: &[&str] = if sub_contractors {
        &[submission_type::SUPPLIER, submission_type::SUB_CONTRACTOR]
    } else {
        &[submission_type::SUPPLIER]
    };

    AssessmentDefinition {
        id: ASSESSMENT,
        tool: "1".to_string(),
        dimension_weightings: vec![
            weighting(LOCATION, "Location", &[submission_type::SUPPLIER]),
            weighting(CAPABILITY, "Service Capability", capability_types),
        ],
    }
}

pub(super) fn pricing_assessment() -> AssessmentDefinition {
    AssessmentDefinition {
        id: ASSESSMENT,
        tool: "2".to_string(),
        dimension_weightings: vec![
            weighting(LOCATION, "Location", &[submission_type::SUPPLIER]),
            weighting(
                PRICING,
                "Pricing",
                &[
                    submission_type::NATIONAL_MAX_DAY_RATE,
                    submission_type::NATIONAL_HOME_DAY_RATE,
                ],
            ),
        ],
    }
}

/// Three suppliers able to work in London, pricing 100, 300 and 200.
pub(super) fn pricing_rows() -> Vec<CalculationRow> {
    let mut rows = Vec::new();
    for (supplier_id, rate) in [("alpha", "100"), ("bravo", "300"), ("charlie", "200")] {
        rows.push(location_row(supplier_id, "London", "1"));
        rows.push(day_rate_row(
            supplier_id,
            "Developer",
            submission_type::NATIONAL_MAX_DAY_RATE,
            rate,
        ));
    }
    rows
}

pub(super) fn build_orchestrator(
    rows: Vec<CalculationRow>,
) -> (
    Arc<ScoreOrchestrator<InMemoryRowSource, InMemoryResultStore>>,
    InMemoryResultStore,
) {
    let store = InMemoryResultStore::default();
    let orchestrator = ScoreOrchestrator::new(
        Arc::new(InMemoryRowSource::new(rows)),
        Arc::new(store.clone()),
        EliminationFilter::default(),
    );
    (Arc::new(orchestrator), store)
}

pub(super) fn catalog() -> Arc<AssessmentCatalog> {
    Arc::new(AssessmentCatalog::new([standard_assessment(false)]))
}

pub(super) fn score_of(scores: &[crate::assessment::SupplierScores], supplier_id: &str) -> f64 {
    scores
        .iter()
        .find(|scores| scores.supplier_id.0 == supplier_id)
        .and_then(|scores| scores.total)
        .expect("supplier total present")
}

pub(super) struct UnavailableRows;

impl CalculationRowSource for UnavailableRows {
    fn rows_for_assessment(
        &self,
        _assessment_id: AssessmentId,
    ) -> Result<Vec<CalculationRow>, RepositoryError> {
        Err(RepositoryError::Unavailable("row source offline".to_string()))
    }

    fn rows_for_dimension(
        &self,
        _dimension_id: DimensionId,
        _suppliers: Option<&[SupplierId]>,
    ) -> Result<Vec<CalculationRow>, RepositoryError> {
        Err(RepositoryError::Unavailable("row source offline".to_string()))
    }
}

pub(super) struct UnavailableResults;

impl AssessmentResultRepository for UnavailableResults {
    fn find(
        &self,
        _assessment_id: AssessmentId,
        _supplier_id: &SupplierId,
    ) -> Result<Option<AssessmentResult>, RepositoryError> {
        Err(RepositoryError::Unavailable("result store offline".to_string()))
    }

    fn save_all(&self, _results: Vec<AssessmentResult>) -> Result<(), RepositoryError> {
        Err(RepositoryError::Unavailable("result store offline".to_string()))
    }

    fn for_assessment(
        &self,
        _assessment_id: AssessmentId,
    ) -> Result<Vec<AssessmentResult>, RepositoryError> {
        Err(RepositoryError::Unavailable("result store offline".to_string()))
    }
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
