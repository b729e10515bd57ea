use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::Deserialize;
use serde_json::json;
use tracing::warn;

use super::domain::{AssessmentCatalog, AssessmentId};
use super::orchestrator::{ScoreOrchestrator, ScoringServiceError};
use super::repository::{AssessmentResultRepository, CalculationRowSource};

/// Optional body of a score calculation request.
#[derive(Debug, Default, Deserialize)]
pub struct ScoreRequest {
    #[serde(default)]
    pub principal: Option<String>,
}

pub struct ScoringState<S, R> {
    orchestrator: Arc<ScoreOrchestrator<S, R>>,
    catalog: Arc<AssessmentCatalog>,
    principal: Arc<str>,
}

impl<S, R> ScoringState<S, R> {
    pub(crate) fn new(
        orchestrator: Arc<ScoreOrchestrator<S, R>>,
        catalog: Arc<AssessmentCatalog>,
        default_principal: &str,
    ) -> Self {
        Self {
            orchestrator,
            catalog,
            principal: Arc::from(default_principal),
        }
    }
}

impl<S, R> Clone for ScoringState<S, R> {
    fn clone(&self) -> Self {
        Self {
            orchestrator: Arc::clone(&self.orchestrator),
            catalog: Arc::clone(&self.catalog),
            principal: Arc::clone(&self.principal),
        }
    }
}

/// Router exposing score calculation and result lookup for catalogued assessments.
pub fn assessment_router<S, R>(
    orchestrator: Arc<ScoreOrchestrator<S, R>>,
    catalog: Arc<AssessmentCatalog>,
    default_principal: &str,
) -> Router
where
    S: CalculationRowSource + 'static,
    R: AssessmentResultRepository + 'static,
{
    Router::new()
        .route(
            "/api/v1/assessments/:assessment_id/scores",
            post(score_handler::<S, R>),
        )
        .route(
            "/api/v1/assessments/:assessment_id/results",
            get(results_handler::<S, R>),
        )
        .with_state(ScoringState::new(orchestrator, catalog, default_principal))
}

pub(crate) async fn score_handler<S, R>(
    State(state): State<ScoringState<S, R>>,
    Path(assessment_id): Path<u32>,
    request: Option<Json<ScoreRequest>>,
) -> Response
where
    S: CalculationRowSource + 'static,
    R: AssessmentResultRepository + 'static,
{
    let id = AssessmentId(assessment_id);
    let Some(assessment) = state.catalog.get(id) else {
        return unknown_assessment(id);
    };

    let principal = request
        .and_then(|Json(request)| request.principal)
        .filter(|principal| !principal.trim().is_empty())
        .unwrap_or_else(|| state.principal.to_string());

    match state
        .orchestrator
        .calculate_supplier_scores(assessment, &principal)
    {
        Ok(scores) => (StatusCode::OK, Json(scores)).into_response(),
        Err(error) => service_error(id, error),
    }
}

pub(crate) async fn results_handler<S, R>(
    State(state): State<ScoringState<S, R>>,
    Path(assessment_id): Path<u32>,
) -> Response
where
    S: CalculationRowSource + 'static,
    R: AssessmentResultRepository + 'static,
{
    let id = AssessmentId(assessment_id);
    if state.catalog.get(id).is_none() {
        return unknown_assessment(id);
    }

    match state.orchestrator.assessment_results(id) {
        Ok(results) => (StatusCode::OK, Json(results)).into_response(),
        Err(error) => service_error(id, error),
    }
}

fn unknown_assessment(id: AssessmentId) -> Response {
    let payload = json!({
        "error": format!("assessment {id} not found"),
    });
    (StatusCode::NOT_FOUND, Json(payload)).into_response()
}

fn service_error(id: AssessmentId, error: ScoringServiceError) -> Response {
    let status = match error {
        ScoringServiceError::Scoring(_) => StatusCode::UNPROCESSABLE_ENTITY,
        ScoringServiceError::Repository(_) => StatusCode::INTERNAL_SERVER_ERROR,
    };
    warn!(assessment = %id, %error, "score request failed");

    let payload = json!({
        "error": error.to_string(),
    });
    (status, Json(payload)).into_response()
}
