use crate::infra::{build_orchestrator, load_catalog, load_row_source, load_taxonomy};
use chrono::Local;
use clap::Args;
use std::path::PathBuf;
use tender_scoring::assessment::{AssessmentId, InMemoryResultStore, SupplierScores};
use tender_scoring::config::{AppConfig, ScoringConfig};
use tender_scoring::error::AppError;
use tender_scoring::taxonomy::DimensionOption;

#[derive(Args, Debug)]
pub(crate) struct ScoreArgs {
    /// Calculation row export (CSV)
    #[arg(long)]
    pub(crate) rows: PathBuf,
    /// Assessment definitions (JSON array)
    #[arg(long)]
    pub(crate) assessments: PathBuf,
    /// Identifier of the assessment to score
    #[arg(long)]
    pub(crate) assessment: u32,
    /// Principal recorded against the results (defaults to SCORING_PRINCIPAL)
    #[arg(long)]
    pub(crate) principal: Option<String>,
    /// Print the supplier scores as JSON instead of a table
    #[arg(long)]
    pub(crate) json: bool,
}

#[derive(Args, Debug)]
pub(crate) struct OptionsArgs {
    /// Taxonomy definition (JSON array of top-level taxa)
    #[arg(long)]
    pub(crate) taxonomy: PathBuf,
    /// Restrict the listing to one top-level taxon by name
    #[arg(long)]
    pub(crate) root: Option<String>,
}

pub(crate) fn run_score(args: ScoreArgs) -> Result<(), AppError> {
    let ScoreArgs {
        rows,
        assessments,
        assessment,
        principal,
        json,
    } = args;

    let scoring = AppConfig::load()?.scoring;
    let principal = principal.unwrap_or_else(|| scoring.principal.clone());

    let catalog = load_catalog(Some(assessments.as_path()))?;
    let id = AssessmentId(assessment);
    let Some(definition) = catalog.get(id) else {
        println!("Assessment {id} is not defined in {}", assessments.display());
        return Ok(());
    };

    let orchestrator = build_orchestrator(
        load_row_source(Some(rows.as_path()))?,
        InMemoryResultStore::default(),
        &scoring,
    );
    let scores = orchestrator.calculate_supplier_scores(definition, &principal)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&scores)?);
        return Ok(());
    }

    render_scores(id, &scores, &scoring, &principal);
    Ok(())
}

fn render_scores(
    id: AssessmentId,
    scores: &[SupplierScores],
    scoring: &ScoringConfig,
    principal: &str,
) {
    println!(
        "Assessment {id} scored {} by {principal}",
        Local::now().format("%Y-%m-%d %H:%M")
    );
    println!(
        "Elimination: {} on {}",
        scoring.exclusion_policy.label(),
        scoring.elimination_dimensions.join(", ")
    );

    if scores.is_empty() {
        println!("No suppliers remain after elimination.");
        return;
    }

    let mut ranked: Vec<&SupplierScores> = scores.iter().collect();
    ranked.sort_by(|a, b| {
        b.total
            .unwrap_or_default()
            .total_cmp(&a.total.unwrap_or_default())
    });

    for (position, supplier) in ranked.iter().enumerate() {
        println!(
            "{}. {} total {:.2}",
            position + 1,
            supplier.supplier_id,
            supplier.total.unwrap_or_default()
        );
        for dimension in &supplier.dimension_scores {
            match dimension.score {
                Some(score) => println!("   - {}: {:.2}", dimension.name, score),
                None => println!("   - {}: not scored", dimension.name),
            }
        }
    }
}

pub(crate) fn run_options(args: OptionsArgs) -> Result<(), AppError> {
    let tree = load_taxonomy(&args.taxonomy)?;

    let roots: Vec<_> = match args.root.as_deref() {
        Some(name) => tree
            .roots()
            .iter()
            .copied()
            .filter(|root| tree.name(*root) == Some(name))
            .collect(),
        None => tree.roots().to_vec(),
    };

    let options = tree.options_for_roots(&roots)?;

    if options.is_empty() {
        println!("No requirement options found.");
        return Ok(());
    }
    for option in &options {
        println!("{}", describe_option(option));
    }
    Ok(())
}

fn describe_option(option: &DimensionOption) -> String {
    let mut path: Vec<&str> = option.groups.iter().map(|group| group.name.as_str()).collect();
    path.push(option.name.as_str());
    let marker = if option.group_requirement { " (group)" } else { "" };
    format!("[{}] {}{}", option.requirement_id, path.join(" > "), marker)
}
