//! Association target unwrapping and the attribute-vs-edge policy gate.

use tracing::trace;

use crate::config::AssociationPolicy;
use crate::graph::{AggregationKind, TagMap};
use crate::model::{FieldUse, TypeRef, split_top_level_args, strip_to_base};
use crate::resolve::Resolution;

use super::markers::{FieldMarkers, is_value_like};

/// A materialized-edge plan: the resolved target plus the owned end's
/// aggregation and provenance tags.
#[derive(Debug, Clone)]
pub struct EdgePlan {
    pub target_qn: String,
    pub aggregation: AggregationKind,
    pub tags: TagMap,
}

/// Outcome of the policy gate for one field.
#[derive(Debug, Clone)]
pub enum EdgeDecision {
    /// No edge; the attribute stands alone. `relation_source` records which
    /// branch suppressed the edge.
    AttributeOnly { relation_source: &'static str },
    Edge(EdgePlan),
}

impl EdgeDecision {
    fn attribute(relation_source: &'static str) -> Self {
        Self::AttributeOnly { relation_source }
    }

    pub fn relation_source(&self) -> &str {
        match self {
            Self::AttributeOnly { relation_source } => relation_source,
            Self::Edge(plan) => plan.tags.get("relationSource").unwrap_or("resolved"),
        }
    }
}

pub struct AssociationTargetResolver;

impl AssociationTargetResolver {
    /// Unwrap container shapes to the candidate target text. The structured
    /// [`TypeRef`] is authoritative; raw text is only consulted when the
    /// parser produced nothing.
    pub fn unwrap_target(field: &FieldUse) -> String {
        match &field.type_ref {
            Some(tr) => Self::unwrap_ref(tr).to_string(),
            None => textual_unwrap(&field.declared_type).to_string(),
        }
    }

    fn unwrap_ref(tr: &TypeRef) -> &str {
        if tr.is_array() {
            return tr
                .first_arg()
                .map(|e| Self::unwrap_ref(e.unwrap_wildcard()))
                .unwrap_or_else(|| tr.raw());
        }
        if tr.is_map() {
            let args = tr.args();
            let picked = args.get(1).or_else(|| args.first());
            return picked
                .map(|a| a.unwrap_wildcard().raw())
                .unwrap_or_else(|| tr.raw());
        }
        if tr.is_optional() || tr.is_collection() {
            return tr
                .first_arg()
                .map(|a| a.unwrap_wildcard().raw())
                .unwrap_or_else(|| tr.raw());
        }
        tr.raw()
    }

    /// Apply containment overrides, then the policy gate.
    ///
    /// `target_text` comes from [`unwrap_target`]; `resolution` is the
    /// resolver's verdict on it. Resolution happens in the caller so that
    /// diagnostics are recorded exactly once per field.
    ///
    /// [`unwrap_target`]: AssociationTargetResolver::unwrap_target
    pub fn decide(
        field: &FieldUse,
        markers: &FieldMarkers,
        policy: AssociationPolicy,
        target_text: &str,
        resolution: &Resolution,
    ) -> EdgeDecision {
        let target_qn = resolution.project_qn();

        // Containment overrides precede the policy gate.
        if markers.transient {
            return EdgeDecision::attribute("transient");
        }
        if markers.is_embedded_like() {
            let source = if markers.embedded_id { "embeddedId" } else { "embedded" };
            return match target_qn {
                Some(qn) => Self::edge(qn, AggregationKind::Composite, source, markers),
                None => EdgeDecision::attribute("unresolved"),
            };
        }
        if markers.element_collection {
            if is_value_like(target_text) {
                return EdgeDecision::attribute("valueBlacklist");
            }
            return match target_qn {
                Some(qn) => Self::edge(qn, AggregationKind::Composite, "elementCollection", markers),
                None => EdgeDecision::attribute("unresolved"),
            };
        }

        let relation_aggregation = if markers.orphan_removal {
            AggregationKind::Composite
        } else {
            AggregationKind::None
        };

        let decision = match policy {
            AssociationPolicy::None => EdgeDecision::attribute("none"),
            AssociationPolicy::JpaOnly => {
                if !markers.has_relation() {
                    EdgeDecision::attribute("none")
                } else {
                    match target_qn {
                        Some(qn) => Self::edge(qn, relation_aggregation, "jpaOnly", markers),
                        None => EdgeDecision::attribute("unresolved"),
                    }
                }
            }
            AssociationPolicy::Resolved => match target_qn {
                Some(qn) if markers.has_relation() => {
                    Self::edge(qn, relation_aggregation, "jpa", markers)
                }
                Some(qn) => Self::edge(qn, AggregationKind::None, "resolved", markers),
                None => EdgeDecision::attribute("unresolved"),
            },
            AssociationPolicy::Smart => {
                if markers.has_relation() {
                    match target_qn {
                        Some(qn) => Self::edge(qn, relation_aggregation, "jpa", markers),
                        None => EdgeDecision::attribute("unresolved"),
                    }
                } else if is_value_like(target_text) {
                    EdgeDecision::attribute("valueBlacklist")
                } else {
                    match target_qn {
                        Some(qn) => Self::edge(qn, AggregationKind::None, "resolved", markers),
                        None => EdgeDecision::attribute("unresolved"),
                    }
                }
            }
        };

        trace!(
            field = %field.name,
            target = target_text,
            source = decision.relation_source(),
            "edge decision"
        );
        decision
    }

    fn edge(
        target_qn: &str,
        aggregation: AggregationKind,
        relation_source: &'static str,
        markers: &FieldMarkers,
    ) -> EdgeDecision {
        let mut tags = TagMap::new();
        tags.insert("relationSource", relation_source);
        tags.insert("aggregation", aggregation.as_str());
        if markers.orphan_removal {
            tags.insert("jpaOrphanRemoval", "true");
        }
        EdgeDecision::Edge(EdgePlan {
            target_qn: target_qn.to_string(),
            aggregation,
            tags,
        })
    }
}

/// Textual fallback: peel trailing array suffixes, then pull the relevant
/// generic argument out of a known container, bracket-depth-aware.
fn textual_unwrap(text: &str) -> &str {
    let mut t = text.trim();
    while let Some(stripped) = t.strip_suffix("[]") {
        t = stripped.trim_end();
    }
    let Some(lt) = t.find('<') else {
        return t;
    };
    let container = strip_to_base(t);
    let container_simple = container.rsplit('.').next().unwrap_or(container);
    let gt = t.rfind('>').unwrap_or(t.len());
    let args = split_top_level_args(&t[lt + 1..gt]);
    let picked = match container_simple {
        "Optional" | "List" | "Set" | "Collection" | "Iterable" => args.first().copied(),
        "Map" => args.get(1).or_else(|| args.first()).copied(),
        _ => return container,
    };
    match picked {
        Some(arg) => textual_unwrap(strip_wildcard(arg)),
        None => container,
    }
}

fn strip_wildcard(arg: &str) -> &str {
    let a = arg.trim();
    if let Some(rest) = a.strip_prefix('?') {
        let rest = rest.trim();
        if let Some(b) = rest.strip_prefix("extends ") {
            return b.trim();
        }
        if let Some(b) = rest.strip_prefix("super ") {
            return b.trim();
        }
        return a;
    }
    a
}
