use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::domain::{CalculationRow, SupplierId};
use super::error::ScoringError;

/// Rule deciding when a supplier lacks provision on an elimination dimension.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ExclusionPolicy {
    /// Keep every supplier.
    Noop,
    /// Exclude a supplier when any single requirement sums to zero across submission types.
    #[default]
    #[serde(rename = "all-non-zero")]
    AllRequirementsNonZero,
    /// Exclude a supplier whose submissions for a whole dimension sum to zero.
    #[serde(rename = "at-least-one")]
    AtLeastOneNonZero,
}

impl ExclusionPolicy {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "noop" | "none" => Some(Self::Noop),
            "all-non-zero" | "all" => Some(Self::AllRequirementsNonZero),
            "at-least-one" | "any" => Some(Self::AtLeastOneNonZero),
            _ => None,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Noop => "noop",
            Self::AllRequirementsNonZero => "all-non-zero",
            Self::AtLeastOneNonZero => "at-least-one",
        }
    }
}

/// Drops every row of suppliers that cannot provide an elimination dimension.
#[derive(Debug, Clone, PartialEq)]
pub struct EliminationFilter {
    dimensions: BTreeSet<String>,
    policy: ExclusionPolicy,
}

impl Default for EliminationFilter {
    fn default() -> Self {
        Self::new(["Location"], ExclusionPolicy::default())
    }
}

impl EliminationFilter {
    pub fn new<I, S>(dimensions: I, policy: ExclusionPolicy) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            dimensions: dimensions
                .into_iter()
                .map(|name| name.into().trim().to_string())
                .collect(),
            policy,
        }
    }

    pub fn policy(&self) -> ExclusionPolicy {
        self.policy
    }

    pub fn dimensions(&self) -> impl Iterator<Item = &str> {
        self.dimensions.iter().map(String::as_str)
    }

    /// Dimension names compare trimmed and ASCII case-insensitive, as in the strategy registry.
    fn eliminates(&self, dimension_name: &str) -> bool {
        let name = dimension_name.trim();
        self.dimensions
            .iter()
            .any(|dimension| dimension.eq_ignore_ascii_case(name))
    }

    /// Suppliers whose rows must be removed before scoring.
    pub fn excluded_suppliers(
        &self,
        rows: &[CalculationRow],
    ) -> Result<BTreeSet<SupplierId>, ScoringError> {
        let elimination_rows = rows
            .iter()
            .filter(|row| self.eliminates(&row.dimension_name));

        let excluded = match self.policy {
            ExclusionPolicy::Noop => BTreeSet::new(),
            ExclusionPolicy::AllRequirementsNonZero => {
                let mut totals: BTreeMap<&SupplierId, BTreeMap<(&str, &str), f64>> =
                    BTreeMap::new();
                for row in elimination_rows {
                    *totals
                        .entry(&row.supplier_id)
                        .or_default()
                        .entry((row.dimension_name.as_str(), row.requirement_name.as_str()))
                        .or_default() += row.numeric_submission()?;
                }

                totals
                    .into_iter()
                    .filter(|(_, requirements)| requirements.values().any(|total| *total == 0.0))
                    .map(|(supplier, _)| supplier.clone())
                    .collect()
            }
            ExclusionPolicy::AtLeastOneNonZero => {
                let mut totals: BTreeMap<(&SupplierId, &str), f64> = BTreeMap::new();
                for row in elimination_rows {
                    *totals
                        .entry((&row.supplier_id, row.dimension_name.as_str()))
                        .or_default() += row.numeric_submission()?;
                }

                totals
                    .into_iter()
                    .filter(|(_, total)| *total <= 0.0)
                    .map(|((supplier, _), _)| supplier.clone())
                    .collect()
            }
        };

        Ok(excluded)
    }

    /// Returns the working row set with excluded suppliers removed entirely.
    pub fn apply(&self, rows: Vec<CalculationRow>) -> Result<Vec<CalculationRow>, ScoringError> {
        let excluded = self.excluded_suppliers(&rows)?;
        if excluded.is_empty() {
            return Ok(rows);
        }

        debug!(
            policy = self.policy.label(),
            excluded = excluded.len(),
            "eliminating suppliers without provision"
        );

        Ok(rows
            .into_iter()
            .filter(|row| !excluded.contains(&row.supplier_id))
            .collect())
    }
}
