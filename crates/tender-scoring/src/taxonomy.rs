//! Taxonomy trees used to describe which requirements belong to which grouping.
//!
//! Nodes live in an arena; children own nothing and refer to their parent by index. Options
//! are collected downward from a node while each option's breadcrumb is built by walking
//! upward to the top-level taxon, which is never shown as a group.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

/// Index of a node within a [`TaxonomyTree`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct TaxonId(usize);

/// Requirement attached directly to a taxon.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxonRequirement {
    pub id: u32,
    pub name: String,
    /// The requirement stands for its own taxon, so the taxon is left out of its breadcrumb.
    #[serde(default)]
    pub group_requirement: bool,
}

#[derive(Debug, Clone)]
struct TaxonomyNode {
    name: String,
    description: Option<String>,
    parent: Option<TaxonId>,
    children: Vec<TaxonId>,
    requirements: Vec<TaxonRequirement>,
}

/// One level of an option's breadcrumb; level 1 is the top-most displayed group.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct OptionGroup {
    pub level: u32,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Selectable requirement together with its taxonomy ancestry.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct DimensionOption {
    pub requirement_id: u32,
    pub name: String,
    pub group_requirement: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub groups: Vec<OptionGroup>,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TaxonomyError {
    #[error("taxon {0:?} does not exist in this taxonomy")]
    UnknownNode(TaxonId),
}

/// Nested description of a taxonomy, as stored in JSON configuration files.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxonSpec {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub requirements: Vec<TaxonRequirement>,
    #[serde(default)]
    pub children: Vec<TaxonSpec>,
}

#[derive(Debug, Clone, Default)]
pub struct TaxonomyTree {
    nodes: Vec<TaxonomyNode>,
    roots: Vec<TaxonId>,
}

impl TaxonomyTree {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a forest from nested specs, one top-level taxon per spec.
    pub fn from_specs(specs: &[TaxonSpec]) -> Self {
        let mut tree = Self::new();
        for spec in specs {
            tree.insert_spec(None, spec);
        }
        tree
    }

    fn insert_spec(&mut self, parent: Option<TaxonId>, spec: &TaxonSpec) -> TaxonId {
        let id = self.push_node(parent, &spec.name, spec.description.clone());
        self.nodes[id.0].requirements = spec.requirements.clone();
        for child in &spec.children {
            self.insert_spec(Some(id), child);
        }
        id
    }

    fn push_node(
        &mut self,
        parent: Option<TaxonId>,
        name: &str,
        description: Option<String>,
    ) -> TaxonId {
        let id = TaxonId(self.nodes.len());
        self.nodes.push(TaxonomyNode {
            name: name.to_string(),
            description,
            parent,
            children: Vec::new(),
            requirements: Vec::new(),
        });
        match parent {
            Some(parent) => self.nodes[parent.0].children.push(id),
            None => self.roots.push(id),
        }
        id
    }

    pub fn add_root(&mut self, name: &str) -> TaxonId {
        self.push_node(None, name, None)
    }

    pub fn add_child(&mut self, parent: TaxonId, name: &str) -> Result<TaxonId, TaxonomyError> {
        self.node(parent)?;
        Ok(self.push_node(Some(parent), name, None))
    }

    pub fn describe(&mut self, taxon: TaxonId, description: &str) -> Result<(), TaxonomyError> {
        self.node_mut(taxon)?.description = Some(description.to_string());
        Ok(())
    }

    pub fn attach_requirement(
        &mut self,
        taxon: TaxonId,
        requirement: TaxonRequirement,
    ) -> Result<(), TaxonomyError> {
        self.node_mut(taxon)?.requirements.push(requirement);
        Ok(())
    }

    pub fn roots(&self) -> &[TaxonId] {
        &self.roots
    }

    pub fn name(&self, taxon: TaxonId) -> Option<&str> {
        self.nodes.get(taxon.0).map(|node| node.name.as_str())
    }

    /// Every option reachable below `taxon`, each with its breadcrumb.
    pub fn options(&self, taxon: TaxonId) -> Result<Vec<DimensionOption>, TaxonomyError> {
        let mut options = BTreeSet::new();
        self.collect_options(taxon, &mut options)?;
        Ok(options.into_iter().collect())
    }

    /// Union of the options below several taxa.
    pub fn options_for_roots(&self, taxa: &[TaxonId]) -> Result<Vec<DimensionOption>, TaxonomyError> {
        let mut options = BTreeSet::new();
        for taxon in taxa {
            self.collect_options(*taxon, &mut options)?;
        }
        Ok(options.into_iter().collect())
    }

    fn collect_options(
        &self,
        taxon: TaxonId,
        options: &mut BTreeSet<DimensionOption>,
    ) -> Result<(), TaxonomyError> {
        let node = self.node(taxon)?;

        for requirement in &node.requirements {
            let start = if requirement.group_requirement {
                node.parent
            } else {
                Some(taxon)
            };
            options.insert(DimensionOption {
                requirement_id: requirement.id,
                name: requirement.name.clone(),
                group_requirement: requirement.group_requirement,
                description: node.description.clone(),
                groups: self.breadcrumb_from(start),
            });
        }

        for child in &node.children {
            self.collect_options(*child, options)?;
        }

        Ok(())
    }

    /// Ancestry of `taxon` (itself included) below its top-level taxon.
    pub fn breadcrumb(&self, taxon: TaxonId) -> Result<Vec<OptionGroup>, TaxonomyError> {
        self.node(taxon)?;
        Ok(self.breadcrumb_from(Some(taxon)))
    }

    fn breadcrumb_from(&self, start: Option<TaxonId>) -> Vec<OptionGroup> {
        let mut chain = Vec::new();
        let mut cursor = start;
        while let Some(id) = cursor {
            let node = &self.nodes[id.0];
            chain.push(node);
            cursor = node.parent;
        }

        chain
            .into_iter()
            .rev()
            .skip(1)
            .zip(1u32..)
            .map(|(node, level)| OptionGroup {
                level,
                name: node.name.clone(),
                description: node.description.clone(),
            })
            .collect()
    }

    fn node(&self, taxon: TaxonId) -> Result<&TaxonomyNode, TaxonomyError> {
        self.nodes
            .get(taxon.0)
            .ok_or(TaxonomyError::UnknownNode(taxon))
    }

    fn node_mut(&mut self, taxon: TaxonId) -> Result<&mut TaxonomyNode, TaxonomyError> {
        self.nodes
            .get_mut(taxon.0)
            .ok_or(TaxonomyError::UnknownNode(taxon))
    }
}
