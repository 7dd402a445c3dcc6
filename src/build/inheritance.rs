//! Phase 4: generalization and realization edges.

use tracing::debug;

use crate::graph::{ClassifierKind, Generalization, GeneralizationKind, IdentityKey, stable_id};

use super::context::BuildContext;

/// Resolve `extends`/`implements` lists through the name resolver and create
/// inheritance edges between project classifiers. Unresolved supertypes are
/// recorded and skipped; they never block the build.
pub fn run(ctx: &mut BuildContext<'_>) {
    for ty in ctx.sorted_types() {
        let supertypes = ty
            .extends
            .iter()
            .map(|raw| (raw, "extends"))
            .chain(ty.implements.iter().map(|raw| (raw, "implements")));

        for (raw, location) in supertypes {
            let resolution = ctx.resolve_recorded(ty, raw, location);
            let Some(parent_qn) = resolution.project_qn().map(str::to_string) else {
                continue;
            };

            let child_kind = ctx
                .graph
                .classifier(&ty.qualified_name)
                .map(|c| c.kind);
            let parent_kind = ctx.graph.classifier(&parent_qn).map(|c| c.kind);
            let kind = match (child_kind, parent_kind) {
                (Some(ClassifierKind::Class), Some(ClassifierKind::Interface)) => {
                    GeneralizationKind::Realization
                }
                _ => GeneralizationKind::Generalization,
            };

            let already = ctx
                .graph
                .generalizations
                .iter()
                .any(|g| g.child_qn == ty.qualified_name && g.parent_qn == parent_qn);
            if already {
                continue;
            }

            let key = IdentityKey::generalization(&ty.qualified_name, &parent_qn);
            ctx.graph.generalizations.push(Generalization {
                child_qn: ty.qualified_name.clone(),
                parent_qn: parent_qn.clone(),
                kind,
                stable_id: stable_id(&key),
            });
            ctx.stats.generalizations_created += 1;

            let parent_pkg = ctx
                .graph
                .classifier(&parent_qn)
                .map(|c| c.package.clone())
                .unwrap_or_default();
            if ctx.graph.add_package_import(&ty.package, &parent_pkg) {
                ctx.stats.package_imports_created += 1;
            }
        }
    }
    debug!(
        generalizations = ctx.stats.generalizations_created,
        "inheritance edges created"
    );
}
