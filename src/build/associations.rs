//! Phase 5: relationship edges and bidirectional merge.
//!
//! Types are visited in qualified-name order and fields in declaration
//! order, the canonical ordering that makes merge and identity decisions
//! reproducible no matter how earlier phases ran.

use rustc_hash::FxHashMap;
use tracing::debug;

use crate::graph::{Edge, EdgeEnd, IdentityKey, Multiplicity, stable_id};
use crate::infer::{
    AssociationTargetResolver, EdgeDecision, FieldMarkers, MergeIndex, MergeRecord,
};

use super::context::BuildContext;

pub fn run(ctx: &mut BuildContext<'_>) {
    let counts = relation_counts(ctx);
    let mut index = MergeIndex::new();
    let policy = ctx.options.association_policy;

    for ty in ctx.sorted_types() {
        for field in &ty.fields {
            if field.is_static || field.is_enum_literal {
                continue;
            }
            let owner_qn = ty.qualified_name.as_str();
            let typed = ctx.typed_field(ty, field);
            let markers = FieldMarkers::of(&typed);
            let target_text = AssociationTargetResolver::unwrap_target(&typed);
            let resolution =
                ctx.resolve_recorded(ty, &target_text, &format!("field {}", field.name));
            let decision =
                AssociationTargetResolver::decide(&typed, &markers, policy, &target_text, &resolution);

            // The attribute created in the feature phase carries the final
            // provenance; edges re-use its multiplicity for their owned end.
            let target_qn = resolution.project_qn().map(str::to_string);
            let mut end_multiplicity = Multiplicity::OPTIONAL;
            if let Some(classifier) = ctx.graph.classifier_mut(owner_qn)
                && let Some(attr) = classifier.attribute_mut(&field.name)
            {
                end_multiplicity = attr.multiplicity;
                attr.type_qn = target_qn.clone();
                attr.tags.insert("relationSource", decision.relation_source());
                if let EdgeDecision::Edge(plan) = &decision {
                    attr.aggregation = plan.aggregation;
                    attr.tags.extend(&plan.tags);
                }
            }

            let EdgeDecision::Edge(plan) = decision else {
                continue;
            };

            let mut end = EdgeEnd::classifier_owned(
                owner_qn,
                field.name.clone(),
                plan.target_qn.clone(),
                end_multiplicity,
                plan.aggregation,
            );
            end.tags.extend(&plan.tags);

            if markers.has_relation() {
                let count_owner = *counts
                    .get(&(owner_qn.to_string(), plan.target_qn.clone()))
                    .unwrap_or(&0);
                let count_target = *counts
                    .get(&(plan.target_qn.clone(), owner_qn.to_string()))
                    .unwrap_or(&0);
                let merged = index.try_merge(
                    &mut ctx.graph.edges,
                    owner_qn,
                    &field.name,
                    &plan.target_qn,
                    markers.mapped_by.as_deref(),
                    end.clone(),
                    count_owner,
                    count_target,
                );
                if merged.is_some() {
                    ctx.stats.edge_merges += 1;
                    record_package_import(ctx, owner_qn, &plan.target_qn);
                    continue;
                }
            }

            // No merge: a fresh edge with one real end and a placeholder for
            // the not-yet-seen inverse side.
            let opposite = match markers.relation {
                Some(kind) => kind.opposite_multiplicity(),
                None if markers.is_embedded_like() || markers.element_collection => {
                    Multiplicity::ONE
                }
                None => Multiplicity::OPTIONAL,
            };
            let mut placeholder = EdgeEnd::placeholder(owner_qn, opposite);
            placeholder.role = markers.mapped_by.clone();

            let key = IdentityKey::association(
                owner_qn,
                &field.name,
                &plan.target_qn,
                end_multiplicity.lower,
                &end_multiplicity.upper.render(),
            );
            let mut edge = Edge::new(key.clone(), stable_id(&key), end, placeholder);
            edge.tags.extend(&plan.tags);
            let id = ctx.graph.push_edge(edge);
            ctx.stats.edges_created += 1;

            if markers.has_relation() {
                index.add(MergeRecord {
                    owner_qn: owner_qn.to_string(),
                    field_name: field.name.clone(),
                    target_qn: plan.target_qn.clone(),
                    expected_inverse: markers.mapped_by.clone(),
                    edge: id,
                });
            }
            record_package_import(ctx, owner_qn, &plan.target_qn);
        }
    }
    debug!(
        edges = ctx.stats.edges_created,
        merges = ctx.stats.edge_merges,
        "associations built"
    );
}

/// Relationship fields per directed (owner, resolved target) pair, for the
/// uniqueness heuristic. Resolution here records no diagnostics; the main
/// pass records them exactly once per field.
fn relation_counts(ctx: &BuildContext<'_>) -> FxHashMap<(String, String), usize> {
    let mut counts: FxHashMap<(String, String), usize> = FxHashMap::default();
    for ty in &ctx.model.types {
        for field in &ty.fields {
            if field.is_static || field.is_enum_literal {
                continue;
            }
            let typed = ctx.typed_field(ty, field);
            let markers = FieldMarkers::of(&typed);
            if !markers.has_relation() || markers.transient {
                continue;
            }
            let target_text = AssociationTargetResolver::unwrap_target(&typed);
            if let Some(qn) = ctx.resolve_in(ty, &target_text).project_qn() {
                *counts
                    .entry((ty.qualified_name.clone(), qn.to_string()))
                    .or_default() += 1;
            }
        }
    }
    counts
}

fn record_package_import(ctx: &mut BuildContext<'_>, owner_qn: &str, target_qn: &str) {
    let owner_pkg = ctx
        .graph
        .classifier(owner_qn)
        .map(|c| c.package.clone())
        .unwrap_or_default();
    let target_pkg = ctx
        .graph
        .classifier(target_qn)
        .map(|c| c.package.clone())
        .unwrap_or_default();
    if ctx.graph.add_package_import(&owner_pkg, &target_pkg) {
        ctx.stats.package_imports_created += 1;
    }
}
