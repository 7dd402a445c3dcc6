//! Phase 3: feature (attribute) creation.
//!
//! Every non-static field becomes an attribute with its inferred
//! multiplicity, regardless of how the association pass later decides to
//! represent it; materialized edges re-use the attribute's data for their
//! classifier-owned end. Enum constants become attributes tagged
//! `enumLiteral=true`.

use tracing::debug;

use crate::graph::{Attribute, IdentityKey, Multiplicity, stable_id};
use crate::infer::{FieldMarkers, MultiplicityResolver};

use super::context::BuildContext;

pub fn run(ctx: &mut BuildContext<'_>) {
    for ty in ctx.sorted_types() {
        for field in &ty.fields {
            if field.is_static && !field.is_enum_literal {
                continue;
            }

            let attr = if field.is_enum_literal {
                let key = IdentityKey::field(&ty.qualified_name, &field.name, &ty.simple_name);
                let mut attr = Attribute {
                    name: field.name.clone(),
                    declared_type: ty.simple_name.clone(),
                    type_qn: Some(ty.qualified_name.clone()),
                    multiplicity: Multiplicity::ONE,
                    aggregation: Default::default(),
                    visibility: field.visibility.as_str(),
                    stable_id: stable_id(&key),
                    tags: Default::default(),
                };
                attr.tags.insert("enumLiteral", "true");
                attr
            } else {
                let typed = ctx.typed_field(ty, field);
                let markers = FieldMarkers::of(&typed);
                let resolved = MultiplicityResolver::resolve(&typed, &markers);
                let key =
                    IdentityKey::field(&ty.qualified_name, &field.name, &field.declared_type);
                Attribute {
                    name: field.name.clone(),
                    declared_type: field.declared_type.clone(),
                    type_qn: None,
                    multiplicity: resolved.multiplicity,
                    aggregation: Default::default(),
                    visibility: field.visibility.as_str(),
                    stable_id: stable_id(&key),
                    tags: resolved.tags,
                }
            };

            if let Some(classifier) = ctx.graph.classifier_mut(&ty.qualified_name) {
                classifier.attributes.push(attr);
                ctx.stats.attributes_created += 1;
            }
        }
    }
    debug!(attributes = ctx.stats.attributes_created, "features created");
}
