use super::common::*;
use crate::assessment::domain::{submission_type, DimensionScores, RequirementScore, SupplierScores};
use crate::assessment::error::ScoringError;
use crate::assessment::strategy::{ScoringStrategy, StandardWeightedStrategy};

fn requirement(criterion: &str, score: f64) -> RequirementScore {
    RequirementScore {
        name: "Agile Coach".to_string(),
        criterion: criterion.to_string(),
        value: score,
        score,
    }
}

fn supplier_with_capability(scores: &[(&str, f64)]) -> SupplierScores {
    let mut dimension = DimensionScores::new(CAPABILITY, "Service Capability");
    dimension.requirement_scores = scores
        .iter()
        .map(|(criterion, score)| requirement(criterion, *score))
        .collect();

    let mut supplier_scores = SupplierScores::new(supplier("alpha"));
    supplier_scores.dimension_scores.push(dimension);
    supplier_scores
}

#[test]
fn requirement_score_applies_divisor_and_weights() {
    let mut row = capability_row("alpha", submission_type::SUPPLIER, "4");
    row.dimension_divisor = 5;
    row.selection_weight_pct = 80.0;
    row.dimension_weight_pct = 50.0;

    let score = StandardWeightedStrategy
        .requirement_score(&row, std::slice::from_ref(&row))
        .expect("row scores");

    assert_eq!(score, 32.0);
}

#[test]
fn requirement_score_rounds_to_two_places() {
    let mut row = capability_row("alpha", submission_type::SUPPLIER, "2");
    row.dimension_divisor = 3;

    let score = StandardWeightedStrategy
        .requirement_score(&row, std::slice::from_ref(&row))
        .expect("row scores");

    assert_eq!(score, 66.67);
}

#[test]
fn zero_divisor_is_rejected() {
    let mut row = capability_row("alpha", submission_type::SUPPLIER, "2");
    row.dimension_divisor = 0;

    match StandardWeightedStrategy.requirement_score(&row, std::slice::from_ref(&row)) {
        Err(ScoringError::ZeroDivisor {
            supplier: id,
            dimension,
        }) => {
            assert_eq!(id, supplier("alpha"));
            assert_eq!(dimension, CAPABILITY);
        }
        other => panic!("expected zero divisor error, got {other:?}"),
    }
}

#[test]
fn zero_submission_scores_exactly_zero() {
    let mut row = capability_row("alpha", submission_type::SUPPLIER, "0");
    row.dimension_divisor = 3;
    row.selection_weight_pct = 70.0;

    let score = StandardWeightedStrategy
        .requirement_score(&row, std::slice::from_ref(&row))
        .expect("row scores");

    assert_eq!(score, 0.0);
    assert!(score.is_sign_positive());
}

#[test]
fn missing_submission_counts_as_zero() {
    let mut row = capability_row("alpha", submission_type::SUPPLIER, "");
    row.submission_value = None;

    let score = StandardWeightedStrategy
        .requirement_score(&row, std::slice::from_ref(&row))
        .expect("row scores");

    assert_eq!(score, 0.0);
}

#[test]
fn non_numeric_submission_is_rejected() {
    let row = capability_row("alpha", submission_type::SUPPLIER, "lots");

    match StandardWeightedStrategy.requirement_score(&row, std::slice::from_ref(&row)) {
        Err(ScoringError::InvalidSubmissionValue { value, .. }) => assert_eq!(value, "lots"),
        other => panic!("expected invalid submission error, got {other:?}"),
    }
}

#[test]
fn dimension_without_sub_contractors_sums_supplier_scores() {
    let suppliers = vec![supplier_with_capability(&[
        (submission_type::SUPPLIER, 12.5),
        (submission_type::SUPPLIER, 7.5),
        (submission_type::SUB_CONTRACTOR, 40.0),
    ])];

    let score = StandardWeightedStrategy
        .dimension_score(
            &suppliers,
            &supplier("alpha"),
            CAPABILITY,
            &standard_assessment(false),
            &[],
        )
        .expect("dimension scores");

    assert_eq!(score, Some(20.0));
}

#[test]
fn dimension_with_sub_contractors_averages_both_sums() {
    let suppliers = vec![supplier_with_capability(&[
        (submission_type::SUPPLIER, 20.0),
        (submission_type::SUB_CONTRACTOR, 10.0),
    ])];

    let score = StandardWeightedStrategy
        .dimension_score(
            &suppliers,
            &supplier("alpha"),
            CAPABILITY,
            &standard_assessment(true),
            &[],
        )
        .expect("dimension scores");

    // supplier only 20, supplier plus sub-contractor 30
    assert_eq!(score, Some(25.0));
}

#[test]
fn dimension_score_reports_missing_supplier_and_dimension() {
    let suppliers = vec![supplier_with_capability(&[(submission_type::SUPPLIER, 1.0)])];
    let assessment = standard_assessment(false);

    match StandardWeightedStrategy.dimension_score(
        &suppliers,
        &supplier("zulu"),
        CAPABILITY,
        &assessment,
        &[],
    ) {
        Err(ScoringError::SupplierNotFound(id)) => assert_eq!(id, supplier("zulu")),
        other => panic!("expected supplier not found, got {other:?}"),
    }

    match StandardWeightedStrategy.dimension_score(
        &suppliers,
        &supplier("alpha"),
        LOCATION,
        &assessment,
        &[],
    ) {
        Err(ScoringError::DimensionNotFound { dimension, .. }) => assert_eq!(dimension, LOCATION),
        other => panic!("expected dimension not found, got {other:?}"),
    }
}

#[test]
fn total_sums_dimension_scores_to_two_places() {
    let mut first = DimensionScores::new(LOCATION, "Location");
    first.score = Some(10.114);
    let mut second = DimensionScores::new(CAPABILITY, "Service Capability");
    second.score = Some(20.2);

    let mut supplier_scores = SupplierScores::new(supplier("alpha"));
    supplier_scores.dimension_scores = vec![first, second];

    let total = StandardWeightedStrategy
        .supplier_total(&supplier_scores)
        .expect("total computes");

    assert_eq!(total, 30.31);
}

#[test]
fn total_rejects_unscored_dimensions() {
    let supplier_scores = supplier_with_capability(&[(submission_type::SUPPLIER, 5.0)]);

    match StandardWeightedStrategy.supplier_total(&supplier_scores) {
        Err(ScoringError::UnscoredDimension { dimension, .. }) => {
            assert_eq!(dimension, CAPABILITY)
        }
        other => panic!("expected unscored dimension, got {other:?}"),
    }
}
