//! Association materialization, policy gating, and the bidirectional merge.

use umlgraph::graph::{AggregationKind, Edge, ModelGraph, Multiplicity, Upper};
use umlgraph::model::SourceModel;
use umlgraph::{AssociationPolicy, GraphBuilder};

#[path = "helpers/mod.rs"]
mod helpers;

use helpers::model_fixtures::{class, field, jpa, shop_model};

fn build(model: &SourceModel, policy: AssociationPolicy) -> ModelGraph {
    GraphBuilder::new()
        .policy(policy)
        .build(model)
        .expect("build")
        .graph
}

fn edges_between<'g>(graph: &'g ModelGraph, a: &str, b: &str) -> Vec<&'g Edge> {
    graph
        .edges
        .iter()
        .filter(|e| {
            e.ends.iter().any(|end| end.type_qn == a) && e.ends.iter().any(|end| end.type_qn == b)
        })
        .collect()
}

#[test]
fn mapped_by_pair_merges_into_one_edge() {
    let graph = build(&shop_model(), AssociationPolicy::JpaOnly);
    let edges = edges_between(&graph, "com.shop.Order", "com.shop.Item");
    assert_eq!(edges.len(), 1);
    let edge = edges[0];
    assert_eq!(edge.placeholder_slot(), None);
    let item_end = edge.end_owned_by("com.shop.Item").expect("item end");
    assert_eq!(item_end.role.as_deref(), Some("order"));
    let order_end = edge.end_owned_by("com.shop.Order").expect("order end");
    assert_eq!(order_end.role.as_deref(), Some("items"));
    assert_eq!(order_end.multiplicity.upper, Upper::Unbounded);
}

#[test]
fn orphan_removal_marks_the_owning_end_composite() {
    let graph = build(&shop_model(), AssociationPolicy::JpaOnly);
    let edges = edges_between(&graph, "com.shop.Order", "com.shop.Item");
    let order_end = edges[0].end_owned_by("com.shop.Order").expect("order end");
    assert_eq!(order_end.aggregation, AggregationKind::Composite);
    assert_eq!(order_end.tags.get("jpaOrphanRemoval"), Some("true"));
}

#[test]
fn unidirectional_relation_keeps_its_placeholder() {
    let graph = build(&shop_model(), AssociationPolicy::JpaOnly);
    let edges = edges_between(&graph, "com.shop.Order", "com.crm.Customer");
    assert_eq!(edges.len(), 1);
    let edge = edges[0];
    let slot = edge.placeholder_slot().expect("placeholder survives");
    // ManyToOne: the opposite side sees many orders.
    assert_eq!(edge.ends[slot].multiplicity, Multiplicity::MANY);
    assert_eq!(edge.ends[slot].type_qn, "com.shop.Order");
}

#[test]
fn ambiguous_pair_stays_unmerged() {
    let mut a = class("p.A");
    a.fields
        .push(field("primary", "B").with_annotation(jpa("ManyToOne")));
    a.fields
        .push(field("secondary", "B").with_annotation(jpa("ManyToOne")));
    let mut b = class("p.B");
    b.fields
        .push(field("back", "List<A>").with_annotation(jpa("OneToMany")));
    let model = SourceModel::new().with_type(a).with_type(b);

    let graph = build(&model, AssociationPolicy::JpaOnly);
    let edges = edges_between(&graph, "p.A", "p.B");
    assert_eq!(edges.len(), 3);
    for edge in edges {
        assert!(edge.placeholder_slot().is_some());
    }
}

#[test]
fn mapped_by_disambiguates_a_double_field_pair() {
    let mut a = class("p.A");
    a.fields
        .push(field("primary", "B").with_annotation(jpa("ManyToOne")));
    a.fields
        .push(field("secondary", "B").with_annotation(jpa("ManyToOne")));
    let mut b = class("p.B");
    b.fields.push(
        field("back", "List<A>")
            .with_annotation(jpa("OneToMany").with_value("mappedBy", "\"secondary\"")),
    );
    let model = SourceModel::new().with_type(a).with_type(b);

    let graph = build(&model, AssociationPolicy::JpaOnly);
    let edges = edges_between(&graph, "p.A", "p.B");
    assert_eq!(edges.len(), 2);
    let merged: Vec<_> = edges
        .iter()
        .filter(|e| e.placeholder_slot().is_none())
        .collect();
    assert_eq!(merged.len(), 1);
    let a_end = merged[0].end_owned_by("p.A").expect("a end");
    assert_eq!(a_end.role.as_deref(), Some("secondary"));
}

#[test]
fn unmerged_mapped_by_names_the_placeholder_role() {
    // The declared inverse never exists, so the edge stays unmerged and the
    // surviving placeholder keeps the mappedBy value as its role name.
    let mut a = class("p.A");
    a.fields.push(
        field("items", "List<B>")
            .with_annotation(jpa("OneToMany").with_value("mappedBy", "\"owner\"")),
    );
    let model = SourceModel::new().with_type(a).with_type(class("p.B"));

    let graph = build(&model, AssociationPolicy::JpaOnly);
    let edges = edges_between(&graph, "p.A", "p.B");
    assert_eq!(edges.len(), 1);
    let slot = edges[0].placeholder_slot().expect("no inverse to merge");
    assert_eq!(edges[0].ends[slot].role.as_deref(), Some("owner"));
    assert_eq!(edges[0].ends[slot].type_qn, "p.A");
}

#[test]
fn policy_none_never_creates_edges() {
    let graph = build(&shop_model(), AssociationPolicy::None);
    assert!(graph.edges.is_empty());
}

#[test]
fn plain_reference_needs_resolved_policy() {
    let mut a = class("p.A");
    a.fields.push(field("b", "B"));
    let model = SourceModel::new().with_type(a).with_type(class("p.B"));

    let jpa_only = build(&model, AssociationPolicy::JpaOnly);
    assert!(edges_between(&jpa_only, "p.A", "p.B").is_empty());

    let resolved = build(&model, AssociationPolicy::Resolved);
    assert_eq!(edges_between(&resolved, "p.A", "p.B").len(), 1);
}

#[test]
fn smart_policy_skips_value_like_targets() {
    let mut a = class("p.A");
    a.fields.push(field("name", "String"));
    a.fields.push(field("b", "B"));
    let model = SourceModel::new().with_type(a).with_type(class("p.B"));

    let graph = build(&model, AssociationPolicy::Smart);
    assert_eq!(graph.edges.len(), 1);
    assert_eq!(graph.edges[0].ends[0].type_qn, "p.B");
    let attr = graph
        .classifier("p.A")
        .and_then(|c| c.attribute("name"))
        .expect("attribute");
    assert_eq!(attr.tags.get("relationSource"), Some("valueBlacklist"));
}

#[test]
fn transient_field_stays_attribute_only() {
    let mut a = class("p.A");
    a.fields.push(
        field("cached", "B")
            .with_annotation(jpa("ManyToOne"))
            .with_annotation(jpa("Transient")),
    );
    let model = SourceModel::new().with_type(a).with_type(class("p.B"));
    let graph = build(&model, AssociationPolicy::Resolved);
    assert!(graph.edges.is_empty());
    let attr = graph
        .classifier("p.A")
        .and_then(|c| c.attribute("cached"))
        .expect("attribute");
    assert_eq!(attr.tags.get("relationSource"), Some("transient"));
}

#[test]
fn embedded_value_object_is_composite() {
    let mut a = class("p.A");
    a.fields
        .push(field("address", "Address").with_annotation(jpa("Embedded")));
    let model = SourceModel::new().with_type(a).with_type(class("p.Address"));
    let graph = build(&model, AssociationPolicy::JpaOnly);
    let edges = edges_between(&graph, "p.A", "p.Address");
    assert_eq!(edges.len(), 1);
    let a_end = edges[0].end_owned_by("p.A").expect("a end");
    assert_eq!(a_end.aggregation, AggregationKind::Composite);
    assert_eq!(a_end.tags.get("relationSource"), Some("embedded"));
    // Embedded containment: the owner side is exactly one.
    let slot = edges[0].placeholder_slot().expect("unidirectional");
    assert_eq!(edges[0].ends[slot].multiplicity, Multiplicity::ONE);
}

#[test]
fn element_collection_of_entities_is_composite() {
    let mut a = class("p.A");
    a.fields
        .push(field("lines", "List<Line>").with_annotation(jpa("ElementCollection")));
    a.fields
        .push(field("tags", "List<String>").with_annotation(jpa("ElementCollection")));
    let model = SourceModel::new().with_type(a).with_type(class("p.Line"));
    let graph = build(&model, AssociationPolicy::JpaOnly);

    let edges = edges_between(&graph, "p.A", "p.Line");
    assert_eq!(edges.len(), 1);
    assert_eq!(
        edges[0].end_owned_by("p.A").and_then(|e| e.tags.get("relationSource")),
        Some("elementCollection")
    );
    // The value-like element collection stays attribute-only.
    assert_eq!(graph.edges.len(), 1);
}

#[test]
fn cross_package_association_records_package_import() {
    let graph = build(&shop_model(), AssociationPolicy::JpaOnly);
    assert!(graph.has_package_import("com.shop", "com.crm"));
    // Same-package relationships never create imports.
    assert!(!graph.has_package_import("com.shop", "com.shop"));
}

#[test]
fn resolved_policy_edges_never_merge() {
    // Two plain references between the same pair, no markers: each keeps its
    // own edge and placeholder.
    let mut a = class("p.A");
    a.fields.push(field("b", "B"));
    let mut b = class("p.B");
    b.fields.push(field("a", "A"));
    let model = SourceModel::new().with_type(a).with_type(b);
    let graph = build(&model, AssociationPolicy::Resolved);
    let edges = edges_between(&graph, "p.A", "p.B");
    assert_eq!(edges.len(), 2);
    for edge in edges {
        assert!(edge.placeholder_slot().is_some());
    }
}
