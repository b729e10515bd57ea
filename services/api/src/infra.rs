use metrics_exporter_prometheus::PrometheusHandle;
use std::path::Path;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;
use tender_scoring::assessment::{
    load_rows, AssessmentCatalog, InMemoryResultStore, InMemoryRowSource, ScoreOrchestrator,
};
use tender_scoring::config::ScoringConfig;
use tender_scoring::error::AppError;
use tender_scoring::taxonomy::{TaxonSpec, TaxonomyTree};

pub(crate) type MemoryOrchestrator = ScoreOrchestrator<InMemoryRowSource, InMemoryResultStore>;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

pub(crate) fn load_row_source(path: Option<&Path>) -> Result<InMemoryRowSource, AppError> {
    match path {
        Some(path) => Ok(InMemoryRowSource::new(load_rows(path)?)),
        None => Ok(InMemoryRowSource::default()),
    }
}

pub(crate) fn load_catalog(path: Option<&Path>) -> Result<AssessmentCatalog, AppError> {
    match path {
        Some(path) => {
            let raw = std::fs::read_to_string(path)?;
            Ok(AssessmentCatalog::from_json(&raw)?)
        }
        None => Ok(AssessmentCatalog::default()),
    }
}

pub(crate) fn load_taxonomy(path: &Path) -> Result<TaxonomyTree, AppError> {
    let raw = std::fs::read_to_string(path)?;
    let specs: Vec<TaxonSpec> = serde_json::from_str(&raw)?;
    Ok(TaxonomyTree::from_specs(&specs))
}

pub(crate) fn build_orchestrator(
    rows: InMemoryRowSource,
    results: InMemoryResultStore,
    scoring: &ScoringConfig,
) -> MemoryOrchestrator {
    ScoreOrchestrator::new(
        Arc::new(rows),
        Arc::new(results),
        scoring.elimination_filter(),
    )
}
