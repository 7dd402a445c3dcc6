//! Classifiers, attributes, packages and the graph container.

use indexmap::IndexMap;

use crate::profile::Profile;

use super::edge::{AggregationKind, Edge, EdgeId, Multiplicity};
use super::ident::{IdentityKey, stable_id};
use super::tags::TagMap;

/// Classifier metatype in the output graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClassifierKind {
    Class,
    Interface,
    Enumeration,
}

/// A package node, one per distinct package name.
#[derive(Debug, Clone)]
pub struct Package {
    pub name: String,
    pub stable_id: String,
    /// Qualified names of classifiers exposed through this package via an
    /// element import (NestedPlusImport mode only).
    pub element_imports: Vec<String>,
}

/// A typed attribute on a classifier.
///
/// Every non-static field becomes an attribute; fields that also materialize
/// an edge re-use their attribute as the classifier-owned end data.
#[derive(Debug, Clone)]
pub struct Attribute {
    pub name: String,
    /// Raw declared-type text, for display and identity.
    pub declared_type: String,
    /// Project-qualified target, when resolution succeeded.
    pub type_qn: Option<String>,
    pub multiplicity: Multiplicity,
    pub aggregation: AggregationKind,
    pub visibility: &'static str,
    pub stable_id: String,
    pub tags: TagMap,
}

/// A classifier in the output graph.
#[derive(Debug, Clone)]
pub struct Classifier {
    pub qualified_name: String,
    pub name: String,
    pub package: String,
    pub kind: ClassifierKind,
    pub is_abstract: bool,
    /// Qualified name of the owning classifier for nested types (absent in
    /// Flatten mode).
    pub nesting_parent: Option<String>,
    pub stable_id: String,
    pub attributes: Vec<Attribute>,
    pub tags: TagMap,
    pub doc: Option<String>,
}

impl Classifier {
    pub fn attribute(&self, name: &str) -> Option<&Attribute> {
        self.attributes.iter().find(|a| a.name == name)
    }

    pub fn attribute_mut(&mut self, name: &str) -> Option<&mut Attribute> {
        self.attributes.iter_mut().find(|a| a.name == name)
    }
}

/// Generalization flavor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GeneralizationKind {
    /// class → class or interface → interface.
    Generalization,
    /// class → interface.
    Realization,
}

/// An inheritance edge between two classifiers.
#[derive(Debug, Clone)]
pub struct Generalization {
    pub child_qn: String,
    pub parent_qn: String,
    pub kind: GeneralizationKind,
    pub stable_id: String,
}

/// A deduplicated package-level import created when a relationship crosses
/// package boundaries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageImport {
    pub from_package: String,
    pub to_package: String,
    pub stable_id: String,
}

/// The complete output graph of one build.
#[derive(Debug, Clone, Default)]
pub struct ModelGraph {
    /// Packages in creation order (sorted package names).
    pub packages: IndexMap<String, Package>,
    /// Classifiers by qualified name, in creation order (depth, then name).
    pub classifiers: IndexMap<String, Classifier>,
    /// Edge arena; [`EdgeId`] handles index into this.
    pub edges: Vec<Edge>,
    pub generalizations: Vec<Generalization>,
    pub package_imports: Vec<PackageImport>,
    pub profile: Profile,
}

impl ModelGraph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn classifier(&self, qualified_name: &str) -> Option<&Classifier> {
        self.classifiers.get(qualified_name)
    }

    pub fn classifier_mut(&mut self, qualified_name: &str) -> Option<&mut Classifier> {
        self.classifiers.get_mut(qualified_name)
    }

    pub fn edge(&self, id: EdgeId) -> Option<&Edge> {
        self.edges.get(id.index())
    }

    pub fn edge_mut(&mut self, id: EdgeId) -> Option<&mut Edge> {
        self.edges.get_mut(id.index())
    }

    /// Append an edge to the arena, returning its handle.
    pub fn push_edge(&mut self, edge: Edge) -> EdgeId {
        let id = EdgeId::new(self.edges.len());
        self.edges.push(edge);
        id
    }

    /// All edges that touch the given classifier (via an owned end or a
    /// placeholder typed by it).
    pub fn edges_of(&self, qualified_name: &str) -> Vec<&Edge> {
        self.edges
            .iter()
            .filter(|e| {
                e.has_end_owned_by(qualified_name)
                    || e.ends
                        .iter()
                        .any(|end| end.is_placeholder() && end.type_qn == qualified_name)
            })
            .collect()
    }

    /// Record a package import, deduplicated on the (from, to) pair.
    pub fn add_package_import(&mut self, from_package: &str, to_package: &str) -> bool {
        if from_package == to_package || from_package.is_empty() || to_package.is_empty() {
            return false;
        }
        if self
            .package_imports
            .iter()
            .any(|pi| pi.from_package == from_package && pi.to_package == to_package)
        {
            return false;
        }
        let key = IdentityKey::package_import(from_package, to_package);
        self.package_imports.push(PackageImport {
            from_package: from_package.to_string(),
            to_package: to_package.to_string(),
            stable_id: stable_id(&key),
        });
        true
    }

    pub fn has_package_import(&self, from_package: &str, to_package: &str) -> bool {
        self.package_imports
            .iter()
            .any(|pi| pi.from_package == from_package && pi.to_package == to_package)
    }
}
