//! Relationship, containment and validation marker detection.
//!
//! Markers are matched by annotation simple name, so both `jakarta.*` and
//! legacy `javax.*` uses are recognized without a classpath.

use crate::graph::Multiplicity;
use crate::model::FieldUse;

/// Simple names of value-like scalar types that never imply ownership
/// semantics when used in a collection.
const VALUE_LIKE_SIMPLE: &[&str] = &[
    "String",
    "UUID",
    "BigDecimal",
    "BigInteger",
    "LocalDate",
    "LocalDateTime",
    "Instant",
    "Date",
    "URI",
    "URL",
];

const PRIMITIVE_BOXES: &[&str] = &[
    "Byte", "Short", "Integer", "Long", "Float", "Double", "Boolean", "Character",
];

const PRIMITIVES: &[&str] = &[
    "byte", "short", "int", "long", "float", "double", "boolean", "char",
];

/// True for types in the value-like catalog, matched by simple name or by
/// the simple tail of a qualified name.
pub fn is_value_like(name: &str) -> bool {
    let simple = name.rsplit('.').next().unwrap_or(name);
    VALUE_LIKE_SIMPLE.contains(&simple)
        || PRIMITIVE_BOXES.contains(&simple)
        || PRIMITIVES.contains(&simple)
}

/// The four domain relationship markers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RelationKind {
    OneToOne,
    OneToMany,
    ManyToOne,
    ManyToMany,
}

impl RelationKind {
    pub fn from_simple_name(name: &str) -> Option<Self> {
        match name {
            "OneToOne" => Some(Self::OneToOne),
            "OneToMany" => Some(Self::OneToMany),
            "ManyToOne" => Some(Self::ManyToOne),
            "ManyToMany" => Some(Self::ManyToMany),
            _ => None,
        }
    }

    pub fn marker_name(self) -> &'static str {
        match self {
            Self::OneToOne => "OneToOne",
            Self::OneToMany => "OneToMany",
            Self::ManyToOne => "ManyToOne",
            Self::ManyToMany => "ManyToMany",
        }
    }

    /// To-many on the declaring side.
    pub fn is_to_many(self) -> bool {
        matches!(self, Self::OneToMany | Self::ManyToMany)
    }

    /// Multiplicity of the inverse (placeholder) end implied by the marker:
    /// many-to-X means the opposite side sees many of us.
    pub fn opposite_multiplicity(self) -> Multiplicity {
        match self {
            Self::ManyToOne | Self::ManyToMany => Multiplicity::MANY,
            Self::OneToMany | Self::OneToOne => Multiplicity::OPTIONAL,
        }
    }
}

/// Everything marker-related about one field, computed once per field.
#[derive(Debug, Clone, Default)]
pub struct FieldMarkers {
    pub relation: Option<RelationKind>,
    /// `mappedBy` value on the relationship marker, unquoted.
    pub mapped_by: Option<String>,
    pub orphan_removal: bool,
    pub transient: bool,
    pub embedded: bool,
    pub embedded_id: bool,
    pub element_collection: bool,
    /// The attribute that raised lower to 1, e.g. `"ManyToOne.optional=false"`.
    pub required_source: Option<String>,
    /// NotNull / Nonnull / NotEmpty / NotBlank present.
    pub not_null: bool,
    pub size_min: Option<u32>,
    pub size_max: Option<u32>,
}

impl FieldMarkers {
    /// Scan a field's annotations (declaration order) and its modifiers.
    pub fn of(field: &FieldUse) -> Self {
        let mut m = FieldMarkers {
            transient: field.is_transient,
            ..FieldMarkers::default()
        };
        for ann in &field.annotations {
            let simple = ann.simple_name.as_str();
            if let Some(kind) = RelationKind::from_simple_name(simple) {
                m.relation = Some(kind);
                m.mapped_by = ann.unquoted_value("mappedBy").map(str::to_string);
                if ann.bool_value("orphanRemoval") == Some(true) {
                    m.orphan_removal = true;
                }
                if ann.bool_value("optional") == Some(false) && m.required_source.is_none() {
                    m.required_source = Some(format!("{simple}.optional=false"));
                }
                continue;
            }
            match simple {
                "Transient" => m.transient = true,
                "Embedded" => m.embedded = true,
                "EmbeddedId" => m.embedded_id = true,
                "ElementCollection" => m.element_collection = true,
                "Column" | "JoinColumn" => {
                    if ann.bool_value("nullable") == Some(false) && m.required_source.is_none() {
                        m.required_source = Some(format!("{simple}.nullable=false"));
                    }
                }
                "Basic" => {
                    if ann.bool_value("optional") == Some(false) && m.required_source.is_none() {
                        m.required_source = Some(format!("{simple}.optional=false"));
                    }
                }
                "NotNull" | "Nonnull" | "NonNull" | "NotEmpty" | "NotBlank" => m.not_null = true,
                "Size" => {
                    m.size_min = ann.int_value("min").and_then(|v| u32::try_from(v).ok());
                    m.size_max = ann.int_value("max").and_then(|v| u32::try_from(v).ok());
                }
                _ => {}
            }
        }
        m
    }

    /// Whether the field carries any containment marker.
    pub fn is_embedded_like(&self) -> bool {
        self.embedded || self.embedded_id
    }

    pub fn has_relation(&self) -> bool {
        self.relation.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::AnnotationUse;

    #[test]
    fn value_like_matches_simple_and_qualified() {
        assert!(is_value_like("String"));
        assert!(is_value_like("java.util.UUID"));
        assert!(is_value_like("java.math.BigDecimal"));
        assert!(!is_value_like("Order"));
        assert!(!is_value_like("com.shop.Order"));
    }

    #[test]
    fn relation_marker_with_mapped_by_and_orphans() {
        let field = FieldUse::new("items", "List<Item>").with_annotation(
            AnnotationUse::new("OneToMany")
                .with_value("mappedBy", "\"order\"")
                .with_value("orphanRemoval", "true"),
        );
        let m = FieldMarkers::of(&field);
        assert_eq!(m.relation, Some(RelationKind::OneToMany));
        assert_eq!(m.mapped_by.as_deref(), Some("order"));
        assert!(m.orphan_removal);
    }

    #[test]
    fn required_source_records_the_exact_attribute() {
        let field = FieldUse::new("customer", "Customer").with_annotation(
            AnnotationUse::new("ManyToOne").with_value("optional", "false"),
        );
        let m = FieldMarkers::of(&field);
        assert_eq!(m.required_source.as_deref(), Some("ManyToOne.optional=false"));

        let field = FieldUse::new("name", "String")
            .with_annotation(AnnotationUse::new("Column").with_value("nullable", "false"));
        let m = FieldMarkers::of(&field);
        assert_eq!(m.required_source.as_deref(), Some("Column.nullable=false"));
    }

    #[test]
    fn first_required_signal_wins() {
        let field = FieldUse::new("customer", "Customer")
            .with_annotation(AnnotationUse::new("ManyToOne").with_value("optional", "false"))
            .with_annotation(AnnotationUse::new("JoinColumn").with_value("nullable", "false"));
        let m = FieldMarkers::of(&field);
        assert_eq!(m.required_source.as_deref(), Some("ManyToOne.optional=false"));
    }

    #[test]
    fn size_bounds_are_parsed() {
        let field = FieldUse::new("tags", "List<String>").with_annotation(
            AnnotationUse::new("Size").with_value("min", "1").with_value("max", "3"),
        );
        let m = FieldMarkers::of(&field);
        assert_eq!(m.size_min, Some(1));
        assert_eq!(m.size_max, Some(3));
    }

    #[test]
    fn transient_modifier_counts_as_marker() {
        let mut field = FieldUse::new("cache", "Map<String, Order>");
        field.is_transient = true;
        assert!(FieldMarkers::of(&field).transient);
    }
}
