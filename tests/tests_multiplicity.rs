//! Multiplicity inference through the full pipeline.
//!
//! Attributes carry the three-tier result: structural baseline from the
//! declared type, relationship-marker override, validation tightening.

use rstest::rstest;
use umlgraph::GraphBuilder;
use umlgraph::graph::Upper;
use umlgraph::model::SourceModel;

#[path = "helpers/mod.rs"]
mod helpers;

use helpers::model_fixtures::{ann, class, field, jpa};

fn single_field_model(declared_type: &str, annotations: &[umlgraph::model::AnnotationUse]) -> SourceModel {
    let mut owner = class("com.app.Owner");
    let mut f = field("value", declared_type);
    for a in annotations {
        f = f.with_annotation(a.clone());
    }
    owner.fields.push(f);
    SourceModel::new().with_type(owner).with_type(class("com.app.Foo"))
}

fn attribute_of(model: &SourceModel) -> umlgraph::graph::Attribute {
    let output = GraphBuilder::new().build(model).expect("build");
    output
        .graph
        .classifier("com.app.Owner")
        .expect("classifier")
        .attribute("value")
        .expect("attribute")
        .clone()
}

#[test]
fn array_field_is_many_with_tags() {
    let attr = attribute_of(&single_field_model("Foo[]", &[]));
    assert_eq!(attr.multiplicity.lower, 0);
    assert_eq!(attr.multiplicity.upper, Upper::Unbounded);
    assert_eq!(attr.tags.get("isArray"), Some("true"));
    assert_eq!(attr.tags.get("elementType"), Some("com.app.Foo"));
}

#[test]
fn optional_field_is_zero_to_one() {
    let attr = attribute_of(&single_field_model("Optional<Foo>", &[]));
    assert_eq!(attr.multiplicity.lower, 0);
    assert_eq!(attr.multiplicity.upper, Upper::Bounded(1));
    assert_eq!(attr.tags.get("containerKind"), Some("Optional"));
}

#[test]
fn size_constraint_tightens_collection_bounds() {
    let size = ann("Size").with_value("min", "1").with_value("max", "3");
    let attr = attribute_of(&single_field_model("List<Foo>", &[size]));
    assert_eq!(attr.multiplicity.lower, 1);
    assert_eq!(attr.multiplicity.upper, Upper::Bounded(3));
    assert_eq!(attr.tags.get("validationSizeMin"), Some("1"));
    assert_eq!(attr.tags.get("validationSizeMax"), Some("3"));
}

#[test]
fn to_one_marker_replaces_structural_upper() {
    let attr = attribute_of(&single_field_model("List<Foo>", &[jpa("ManyToOne")]));
    assert_eq!(attr.multiplicity.upper, Upper::Bounded(1));
    assert_eq!(attr.tags.get("jpaRelation"), Some("ManyToOne"));
}

#[test]
fn nullable_source_names_the_raising_attribute() {
    let marker = jpa("ManyToOne").with_value("optional", "false");
    let attr = attribute_of(&single_field_model("Foo", &[marker]));
    assert_eq!(attr.multiplicity.lower, 1);
    assert_eq!(attr.tags.get("nullableSource"), Some("ManyToOne.optional=false"));
}

#[rstest]
#[case("NotNull")]
#[case("NotEmpty")]
#[case("NotBlank")]
fn validation_markers_raise_lower(#[case] marker: &str) {
    let attr = attribute_of(&single_field_model("Foo", &[ann(marker)]));
    assert_eq!(attr.multiplicity.lower, 1);
}

#[test]
fn map_field_records_key_and_value_types() {
    let attr = attribute_of(&single_field_model("Map<String, Foo>", &[]));
    assert_eq!(attr.multiplicity.upper, Upper::Unbounded);
    assert_eq!(attr.tags.get("collectionKind"), Some("Map"));
    assert_eq!(attr.tags.get("mapValueType"), Some("com.app.Foo"));
}

#[test]
fn validation_never_loosens_marker_bounds() {
    // Size(max=9) must not widen a to-one relationship back to many.
    let size = ann("Size").with_value("max", "9");
    let attr = attribute_of(&single_field_model("Foo", &[jpa("OneToOne"), size]));
    assert_eq!(attr.multiplicity.upper, Upper::Bounded(1));
}
