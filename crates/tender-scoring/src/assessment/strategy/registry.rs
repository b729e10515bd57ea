use std::collections::HashMap;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use super::{PricingStrategy, ScoringStrategy, StandardWeightedStrategy};
use crate::assessment::error::ScoringError;

/// Stable identity of the evaluation dimensions known to the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DimensionKind {
    ResourceQuantity,
    SecurityClearance,
    ServiceCapability,
    Scalability,
    Location,
    Pricing,
}

impl DimensionKind {
    pub const fn ordered() -> [Self; 6] {
        [
            Self::ResourceQuantity,
            Self::SecurityClearance,
            Self::ServiceCapability,
            Self::Scalability,
            Self::Location,
            Self::Pricing,
        ]
    }

    /// Display name used by the assessment configuration data.
    pub const fn label(self) -> &'static str {
        match self {
            Self::ResourceQuantity => "Resource Quantity",
            Self::SecurityClearance => "Security Clearance",
            Self::ServiceCapability => "Service Capability",
            Self::Scalability => "Scalability",
            Self::Location => "Location",
            Self::Pricing => "Pricing",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        let name = name.trim();
        Self::ordered()
            .into_iter()
            .find(|kind| kind.label().eq_ignore_ascii_case(name))
    }
}

/// Assessment tools, each combining dimension scores into a supplier total.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AssessmentTool {
    CapabilityAssessment,
    DirectAward,
}

impl AssessmentTool {
    pub fn from_external_id(id: &str) -> Option<Self> {
        match id.trim() {
            "1" => Some(Self::CapabilityAssessment),
            "2" => Some(Self::DirectAward),
            _ => None,
        }
    }
}

/// Read-only lookup from dimension and tool to scoring strategy.
///
/// Built once at start-up and shared behind an `Arc`; concurrent reads need no locking.
#[derive(Clone)]
pub struct StrategyRegistry {
    dimensions: HashMap<DimensionKind, Arc<dyn ScoringStrategy>>,
    tools: HashMap<AssessmentTool, Arc<dyn ScoringStrategy>>,
}

impl StrategyRegistry {
    pub fn standard() -> Self {
        let standard: Arc<dyn ScoringStrategy> = Arc::new(StandardWeightedStrategy);
        let pricing: Arc<dyn ScoringStrategy> = Arc::new(PricingStrategy);

        let dimensions = DimensionKind::ordered()
            .into_iter()
            .map(|kind| {
                let strategy = if kind == DimensionKind::Pricing {
                    pricing.clone()
                } else {
                    standard.clone()
                };
                (kind, strategy)
            })
            .collect();

        let mut tools = HashMap::new();
        tools.insert(AssessmentTool::CapabilityAssessment, standard);
        tools.insert(AssessmentTool::DirectAward, pricing);

        Self { dimensions, tools }
    }

    pub fn with_dimension(mut self, kind: DimensionKind, strategy: Arc<dyn ScoringStrategy>) -> Self {
        self.dimensions.insert(kind, strategy);
        self
    }

    pub fn with_tool(mut self, tool: AssessmentTool, strategy: Arc<dyn ScoringStrategy>) -> Self {
        self.tools.insert(tool, strategy);
        self
    }

    pub fn for_dimension(&self, dimension_name: &str) -> Result<&dyn ScoringStrategy, ScoringError> {
        DimensionKind::from_name(dimension_name)
            .and_then(|kind| self.dimensions.get(&kind))
            .map(|strategy| strategy.as_ref())
            .ok_or_else(|| ScoringError::UnknownDimension(dimension_name.to_string()))
    }

    pub fn for_tool(&self, external_tool_id: &str) -> Result<&dyn ScoringStrategy, ScoringError> {
        AssessmentTool::from_external_id(external_tool_id)
            .and_then(|tool| self.tools.get(&tool))
            .map(|strategy| strategy.as_ref())
            .ok_or_else(|| ScoringError::UnknownTool(external_tool_id.to_string()))
    }
}

impl Default for StrategyRegistry {
    fn default() -> Self {
        Self::standard()
    }
}

impl std::fmt::Debug for StrategyRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StrategyRegistry")
            .field("dimensions", &self.dimensions.keys().collect::<Vec<_>>())
            .field("tools", &self.tools.keys().collect::<Vec<_>>())
            .finish()
    }
}
