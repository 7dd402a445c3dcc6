//! Resolution context: project type set, imports, nested-scope chain.

use rustc_hash::FxHashMap;
use rustc_hash::FxHashSet;

use crate::model::{ImportTable, ProjectType, SourceModel};

/// The set of qualified type names declared in the project, plus an index of
/// nested member types by enclosing type. Built once per build and shared by
/// every per-unit context.
#[derive(Debug, Default)]
pub struct ProjectIndex {
    qualified: FxHashSet<String>,
    nested: NestedMemberIndex,
}

/// outer qualified name → member simple name → member qualified name.
#[derive(Debug, Default)]
pub struct NestedMemberIndex {
    by_outer: FxHashMap<String, FxHashMap<String, String>>,
}

impl NestedMemberIndex {
    pub fn member(&self, outer_qn: &str, simple: &str) -> Option<&str> {
        self.by_outer
            .get(outer_qn)
            .and_then(|m| m.get(simple))
            .map(String::as_str)
    }
}

impl ProjectIndex {
    pub fn from_model(model: &SourceModel) -> Self {
        let mut qualified = FxHashSet::default();
        let mut by_outer: FxHashMap<String, FxHashMap<String, String>> = FxHashMap::default();
        for ty in &model.types {
            qualified.insert(ty.qualified_name.clone());
            if let Some(parent) = &ty.nesting_parent {
                by_outer
                    .entry(parent.clone())
                    .or_default()
                    .insert(ty.simple_name.clone(), ty.qualified_name.clone());
            }
        }
        Self {
            qualified,
            nested: NestedMemberIndex { by_outer },
        }
    }

    pub fn contains(&self, qualified_name: &str) -> bool {
        self.qualified.contains(qualified_name)
    }

    pub fn nested(&self) -> &NestedMemberIndex {
        &self.nested
    }
}

/// Resolution context for one position in one source unit.
///
/// Carries the unit's package and imports plus the nested-scope chain of the
/// position being resolved, innermost enclosing type first.
#[derive(Debug)]
pub struct ResolveContext<'a> {
    pub current_package: &'a str,
    pub imports: &'a ImportTable,
    /// Qualified names of enclosing types, innermost first.
    pub scope_chain: Vec<&'a str>,
    pub project: &'a ProjectIndex,
}

impl<'a> ResolveContext<'a> {
    /// Context for resolving references inside `ty`.
    ///
    /// The scope chain starts at `ty` itself (its own members are visible)
    /// and walks outward through nesting parents.
    pub fn for_type(ty: &'a ProjectType, model: &'a SourceModel, project: &'a ProjectIndex) -> Self {
        let mut chain: Vec<&str> = vec![&ty.qualified_name];
        let mut current = ty.nesting_parent.as_deref();
        while let Some(parent_qn) = current {
            chain.push(parent_qn);
            current = model
                .type_by_qname(parent_qn)
                .and_then(|t| t.nesting_parent.as_deref());
        }
        Self {
            current_package: &ty.package,
            imports: &ty.imports,
            scope_chain: chain,
            project,
        }
    }

    /// Candidate qualified name in the current package.
    pub fn in_current_package(&self, name: &str) -> String {
        if self.current_package.is_empty() {
            name.to_string()
        } else {
            format!("{}.{}", self.current_package, name)
        }
    }
}
