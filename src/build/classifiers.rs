//! Phase 2: classifier creation, outer before nested.

use tracing::debug;

use crate::config::NestedTypeMode;
use crate::error::BuildError;
use crate::graph::{Classifier, ClassifierKind, IdentityKey, TagMap, stable_id};
use crate::model::{ProjectType, TypeKind};

use super::context::BuildContext;

fn classifier_kind(kind: TypeKind) -> ClassifierKind {
    match kind {
        TypeKind::Class | TypeKind::Annotation => ClassifierKind::Class,
        TypeKind::Interface => ClassifierKind::Interface,
        TypeKind::Enum => ClassifierKind::Enumeration,
    }
}

/// Create classifiers via an explicit worklist in increasing nesting depth
/// (qualified name breaks ties), so every enclosing classifier exists before
/// its members.
pub fn run(ctx: &mut BuildContext<'_>) -> Result<(), BuildError> {
    let mut worklist: Vec<(usize, &ProjectType)> = ctx
        .model
        .types
        .iter()
        .map(|t| (t.nesting_depth(ctx.model), t))
        .collect();
    worklist.sort_by(|a, b| a.0.cmp(&b.0).then_with(|| a.1.qualified_name.cmp(&b.1.qualified_name)));

    let mode = ctx.options.nested_type_mode;
    for (_, ty) in worklist {
        if let Some(parent_qn) = &ty.nesting_parent {
            if ctx.model.type_by_qname(parent_qn).is_none() {
                return Err(BuildError::MissingNestingParent {
                    parent: parent_qn.clone(),
                    child: ty.qualified_name.clone(),
                });
            }
        }

        let nesting_parent = match mode {
            NestedTypeMode::Flatten => None,
            NestedTypeMode::Nested | NestedTypeMode::NestedPlusImport => {
                ty.nesting_parent.clone()
            }
        };
        if mode == NestedTypeMode::NestedPlusImport
            && ty.nesting_parent.is_some()
            && let Some(pkg) = ctx.graph.packages.get_mut(&ty.package)
        {
            pkg.element_imports.push(ty.qualified_name.clone());
        }

        let key = IdentityKey::classifier(&ty.qualified_name);
        ctx.graph.classifiers.insert(
            ty.qualified_name.clone(),
            Classifier {
                qualified_name: ty.qualified_name.clone(),
                name: ty.simple_name.clone(),
                package: ty.package.clone(),
                kind: classifier_kind(ty.kind),
                is_abstract: ty.is_abstract,
                nesting_parent,
                stable_id: stable_id(&key),
                attributes: Vec::new(),
                tags: TagMap::new(),
                doc: ty.doc.clone(),
            },
        );
        ctx.stats.classifiers_created += 1;
    }
    debug!(classifiers = ctx.stats.classifiers_created, "classifiers created");
    Ok(())
}
