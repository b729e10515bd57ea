use std::io::Read;
use std::path::Path;

use serde::{Deserialize, Deserializer};

use super::domain::{AssessmentId, CalculationRow, DimensionId, SupplierId};

/// Failure while loading a calculation row export.
#[derive(Debug, thiserror::Error)]
pub enum RowImportError {
    #[error("failed to read calculation rows: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid calculation row data: {0}")]
    Csv(#[from] csv::Error),
}

pub fn load_rows<P: AsRef<Path>>(path: P) -> Result<Vec<CalculationRow>, RowImportError> {
    let file = std::fs::File::open(path)?;
    parse_rows(file)
}

/// Parse a calculation base export with one header row.
pub fn parse_rows<R: Read>(reader: R) -> Result<Vec<CalculationRow>, RowImportError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);
    let mut rows = Vec::new();

    for record in csv_reader.deserialize::<CalculationCsvRow>() {
        rows.push(record?.into());
    }

    Ok(rows)
}

#[derive(Debug, Deserialize)]
struct CalculationCsvRow {
    assessment_id: u32,
    supplier_id: String,
    dimension_id: u32,
    dimension_name: String,
    requirement_name: String,
    submission_type: String,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    submission_value: Option<String>,
    #[serde(default)]
    requirement_value: Option<f64>,
    dimension_weight_pct: f64,
    selection_weight_pct: f64,
    dimension_divisor: u32,
}

impl From<CalculationCsvRow> for CalculationRow {
    fn from(row: CalculationCsvRow) -> Self {
        Self {
            assessment_id: AssessmentId(row.assessment_id),
            supplier_id: SupplierId(row.supplier_id),
            dimension_id: DimensionId(row.dimension_id),
            dimension_name: row.dimension_name,
            requirement_name: row.requirement_name,
            submission_type: row.submission_type,
            submission_value: row.submission_value,
            requirement_value: row.requirement_value,
            dimension_weight_pct: row.dimension_weight_pct,
            selection_weight_pct: row.selection_weight_pct,
            dimension_divisor: row.dimension_divisor,
        }
    }
}

fn empty_string_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    Ok(opt.filter(|value| !value.trim().is_empty()))
}
