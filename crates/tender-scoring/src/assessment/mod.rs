//! Supplier capability assessment scoring.
//!
//! Flattened calculation rows are filtered by the elimination rules, scored per requirement
//! and per dimension by the strategy registered for each dimension, totalled by the strategy
//! of the assessment tool and finally persisted as one result per supplier.

pub mod domain;
pub mod elimination;
pub mod error;
pub mod orchestrator;
pub mod repository;
pub mod router;
pub mod rows;
pub mod store;
pub mod strategy;

#[cfg(test)]
mod tests;

pub use domain::{
    AssessmentCatalog, AssessmentDefinition, AssessmentId, CalculationRow, DimensionId,
    DimensionScores, DimensionWeighting, RequirementScore, SupplierId, SupplierScores,
};
pub use elimination::{EliminationFilter, ExclusionPolicy};
pub use error::ScoringError;
pub use orchestrator::{ScoreOrchestrator, ScoringServiceError};
pub use repository::{
    AssessmentResult, AssessmentResultRepository, CalculationRowSource, RepositoryError,
    Timestamps,
};
pub use router::{assessment_router, ScoreRequest};
pub use rows::{load_rows, parse_rows, RowImportError};
pub use store::{InMemoryResultStore, InMemoryRowSource};
pub use strategy::{
    AssessmentTool, DimensionKind, PricingStrategy, ScoringStrategy, StandardWeightedStrategy,
    StrategyRegistry,
};
