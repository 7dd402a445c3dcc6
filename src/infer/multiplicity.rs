//! Three-tier multiplicity inference.
//!
//! Tier 1 reads the structural shape of the declared type. Tier 2 replaces
//! the bounds outright when a domain relationship marker is present (a
//! stronger signal than syntax). Tier 3 tightens with validation markers and
//! never loosens. Tags record the evidence in arbitrary internal order;
//! sorting happens at the serialization boundary.

use tracing::trace;

use crate::graph::{Multiplicity, TagMap, Upper};
use crate::model::{FieldUse, TypeRef};

use super::markers::FieldMarkers;

/// Result of multiplicity inference for one field.
#[derive(Debug, Clone)]
pub struct ResolvedMultiplicity {
    pub multiplicity: Multiplicity,
    pub tags: TagMap,
}

pub struct MultiplicityResolver;

impl MultiplicityResolver {
    pub fn resolve(field: &FieldUse, markers: &FieldMarkers) -> ResolvedMultiplicity {
        let mut tags = TagMap::new();

        // Tier 1: structural baseline from the TypeRef shape.
        let mut mult = match &field.type_ref {
            Some(tr) => Self::structural(tr, &mut tags),
            None => Multiplicity::OPTIONAL,
        };

        // Tier 2: a relationship marker replaces the structural bounds.
        if let Some(kind) = markers.relation {
            let upper = if kind.is_to_many() {
                Upper::Unbounded
            } else {
                Upper::Bounded(1)
            };
            let lower = if markers.required_source.is_some() { 1 } else { 0 };
            mult = Multiplicity::new(lower, upper);
            tags.insert("jpaRelation", kind.marker_name());
            if let Some(src) = &markers.required_source {
                tags.insert("nullableSource", src.clone());
            }
        } else if let Some(src) = &markers.required_source {
            // Column/Basic requiredness on a plain attribute still raises lower.
            if mult.lower < 1 {
                mult.lower = 1;
            }
            tags.insert("nullableSource", src.clone());
        }

        // Tier 3: validation tightening, applied regardless of path taken.
        if markers.not_null && mult.lower < 1 {
            mult.lower = 1;
        }
        if let Some(min) = markers.size_min {
            if mult.lower < min {
                mult.lower = min;
            }
            tags.insert("validationSizeMin", min.to_string());
        }
        if let Some(max) = markers.size_max {
            mult.upper = match mult.upper {
                Upper::Bounded(cur) if cur <= max => Upper::Bounded(cur),
                _ => Upper::Bounded(max),
            };
            tags.insert("validationSizeMax", max.to_string());
        }

        trace!(field = %field.name, multiplicity = %mult.render(), "multiplicity resolved");
        ResolvedMultiplicity {
            multiplicity: mult,
            tags,
        }
    }

    fn structural(tr: &TypeRef, tags: &mut TagMap) -> Multiplicity {
        if tr.is_primitive() {
            return Multiplicity::ONE;
        }
        if tr.is_array() {
            tags.insert("isArray", "true");
            if let Some(element) = tr.first_arg() {
                tags.insert("elementType", element.unwrap_wildcard().best_label());
            }
            return Multiplicity::MANY;
        }
        if tr.is_optional() {
            tags.insert("containerKind", "Optional");
            if let Some(element) = tr.first_arg() {
                tags.insert("elementType", element.unwrap_wildcard().best_label());
            }
            return Multiplicity::OPTIONAL;
        }
        if tr.is_map() {
            tags.insert("collectionKind", "Map");
            let args = tr.args();
            if let Some(key) = args.first() {
                tags.insert("mapKeyType", key.unwrap_wildcard().best_label());
            }
            if let Some(value) = args.get(1) {
                tags.insert("mapValueType", value.unwrap_wildcard().best_label());
            }
            return Multiplicity::MANY;
        }
        if tr.is_collection() {
            tags.insert("collectionKind", tr.simple_name());
            if let Some(element) = tr.first_arg() {
                tags.insert("elementType", element.unwrap_wildcard().best_label());
            }
            return Multiplicity::MANY;
        }
        Multiplicity::OPTIONAL
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{AnnotationUse, parse_type_ref};

    fn qualify(name: &str) -> Option<String> {
        (name == "Foo").then(|| "com.app.Foo".to_string())
    }

    fn field_of(name: &str, ty: &str) -> FieldUse {
        let mut f = FieldUse::new(name, ty);
        f.type_ref = Some(parse_type_ref(ty, &qualify));
        f
    }

    fn resolve(field: &FieldUse) -> ResolvedMultiplicity {
        MultiplicityResolver::resolve(field, &FieldMarkers::of(field))
    }

    #[test]
    fn primitive_is_exactly_one() {
        let r = resolve(&field_of("count", "int"));
        assert_eq!(r.multiplicity, Multiplicity::ONE);
        assert!(r.tags.is_empty());
    }

    #[test]
    fn array_is_many_with_element_tags() {
        let r = resolve(&field_of("foos", "Foo[]"));
        assert_eq!(r.multiplicity, Multiplicity::MANY);
        assert_eq!(r.tags.get("isArray"), Some("true"));
        assert_eq!(r.tags.get("elementType"), Some("com.app.Foo"));
    }

    #[test]
    fn optional_is_zero_to_one() {
        let r = resolve(&field_of("foo", "Optional<Foo>"));
        assert_eq!(r.multiplicity, Multiplicity::OPTIONAL);
        assert_eq!(r.tags.get("containerKind"), Some("Optional"));
        assert_eq!(r.tags.get("elementType"), Some("com.app.Foo"));
    }

    #[test]
    fn map_records_key_and_value_types() {
        let r = resolve(&field_of("index", "Map<String, Foo>"));
        assert_eq!(r.multiplicity, Multiplicity::MANY);
        assert_eq!(r.tags.get("collectionKind"), Some("Map"));
        assert_eq!(r.tags.get("mapKeyType"), Some("String"));
        assert_eq!(r.tags.get("mapValueType"), Some("com.app.Foo"));
    }

    #[test]
    fn to_one_marker_replaces_collection_upper() {
        let f = field_of("foos", "List<Foo>")
            .with_annotation(AnnotationUse::new("ManyToOne"));
        let r = resolve(&f);
        assert_eq!(r.multiplicity, Multiplicity::OPTIONAL);
        assert_eq!(r.tags.get("jpaRelation"), Some("ManyToOne"));
    }

    #[test]
    fn required_relation_raises_lower_and_records_source() {
        let f = field_of("foo", "Foo")
            .with_annotation(AnnotationUse::new("ManyToOne").with_value("optional", "false"));
        let r = resolve(&f);
        assert_eq!(r.multiplicity, Multiplicity::ONE);
        assert_eq!(r.tags.get("nullableSource"), Some("ManyToOne.optional=false"));
    }

    #[test]
    fn size_tightens_both_bounds() {
        let f = field_of("foos", "List<Foo>").with_annotation(
            AnnotationUse::new("Size").with_value("min", "1").with_value("max", "3"),
        );
        let r = resolve(&f);
        assert_eq!(r.multiplicity, Multiplicity::new(1, Upper::Bounded(3)));
        assert_eq!(r.tags.get("validationSizeMin"), Some("1"));
        assert_eq!(r.tags.get("validationSizeMax"), Some("3"));
    }

    #[test]
    fn size_never_loosens_a_bounded_upper() {
        let f = field_of("foo", "Optional<Foo>")
            .with_annotation(AnnotationUse::new("Size").with_value("max", "5"));
        let r = resolve(&f);
        assert_eq!(r.multiplicity.upper, Upper::Bounded(1));
    }

    #[test]
    fn not_null_raises_lower() {
        let f = field_of("name", "String").with_annotation(AnnotationUse::new("NotNull"));
        let r = resolve(&f);
        assert_eq!(r.multiplicity.lower, 1);
    }

    #[test]
    fn wildcard_element_reports_its_bound() {
        let r = resolve(&field_of("foos", "List<? extends Foo>"));
        assert_eq!(r.tags.get("elementType"), Some("com.app.Foo"));
    }
}
