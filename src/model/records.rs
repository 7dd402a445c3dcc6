//! Parsed source records: types, fields, annotation uses, imports.

use indexmap::IndexMap;

use super::type_ref::TypeRef;

/// What kind of declaration a [`ProjectType`] is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TypeKind {
    Class,
    Interface,
    Enum,
    Annotation,
}

impl TypeKind {
    /// UML metaclass name a stereotype on this type should extend.
    pub fn metaclass_name(self) -> &'static str {
        match self {
            Self::Class => "Class",
            Self::Interface => "Interface",
            Self::Enum => "Enumeration",
            Self::Annotation => "Annotation",
        }
    }
}

/// Declared visibility of a type or member.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Visibility {
    Public,
    Protected,
    Private,
    #[default]
    Package,
}

impl Visibility {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Public => "public",
            Self::Protected => "protected",
            Self::Private => "private",
            Self::Package => "package",
        }
    }
}

/// A single annotation use on a type or field.
///
/// Member values are normalized literal text: numbers, strings, enum
/// constants and class literals are all stored as comparable strings.
/// Declaration order of members is preserved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnnotationUse {
    pub simple_name: String,
    pub qualified_name: Option<String>,
    pub values: IndexMap<String, String>,
}

impl AnnotationUse {
    pub fn new(simple_name: impl Into<String>) -> Self {
        Self {
            simple_name: simple_name.into(),
            qualified_name: None,
            values: IndexMap::new(),
        }
    }

    pub fn qualified(simple_name: impl Into<String>, qualified_name: impl Into<String>) -> Self {
        Self {
            simple_name: simple_name.into(),
            qualified_name: Some(qualified_name.into()),
            values: IndexMap::new(),
        }
    }

    pub fn with_value(mut self, member: impl Into<String>, value: impl Into<String>) -> Self {
        self.values.insert(member.into(), value.into());
        self
    }

    /// The best available name: qualified when present, else simple.
    pub fn best_name(&self) -> &str {
        match &self.qualified_name {
            Some(qn) if !qn.is_empty() => qn,
            _ => &self.simple_name,
        }
    }

    /// Raw member value, if declared.
    pub fn value(&self, member: &str) -> Option<&str> {
        self.values.get(member).map(String::as_str)
    }

    /// Member value with surrounding double quotes stripped.
    pub fn unquoted_value(&self, member: &str) -> Option<&str> {
        let v = self.value(member)?.trim();
        let stripped = v
            .strip_prefix('"')
            .and_then(|s| s.strip_suffix('"'))
            .unwrap_or(v);
        if stripped.is_empty() { None } else { Some(stripped) }
    }

    /// Member value interpreted as a boolean literal.
    pub fn bool_value(&self, member: &str) -> Option<bool> {
        match self.unquoted_value(member)?.to_ascii_lowercase().as_str() {
            "true" | "1" | "yes" => Some(true),
            "false" | "0" | "no" => Some(false),
            _ => None,
        }
    }

    /// Member value interpreted as an integer literal (quoted numbers allowed).
    pub fn int_value(&self, member: &str) -> Option<i64> {
        self.unquoted_value(member)?.parse().ok()
    }
}

/// A declared field on a project type. Immutable; one per declared field.
#[derive(Debug, Clone)]
pub struct FieldUse {
    pub name: String,
    /// Raw declared-type text, exactly as written in source.
    pub declared_type: String,
    /// Structured type reference, when the parser could build one.
    pub type_ref: Option<TypeRef>,
    pub annotations: Vec<AnnotationUse>,
    pub visibility: Visibility,
    pub is_static: bool,
    /// The language-level transient modifier (distinct from a marker annotation).
    pub is_transient: bool,
    /// Enum constants are modeled as fields with this flag set.
    pub is_enum_literal: bool,
}

impl FieldUse {
    pub fn new(name: impl Into<String>, declared_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            declared_type: declared_type.into(),
            type_ref: None,
            annotations: Vec::new(),
            visibility: Visibility::default(),
            is_static: false,
            is_transient: false,
            is_enum_literal: false,
        }
    }

    pub fn with_annotation(mut self, ann: AnnotationUse) -> Self {
        self.annotations.push(ann);
        self
    }
}

/// Explicit and wildcard imports of one source unit.
///
/// Rebuilt per source unit by the external parser; never shared across files,
/// so imports cannot leak between units.
#[derive(Debug, Clone, Default)]
pub struct ImportTable {
    /// simple name → fully qualified name, in declaration order.
    pub explicit: IndexMap<String, String>,
    /// Wildcard-imported package names, in declaration order.
    pub wildcard: Vec<String>,
}

impl ImportTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_explicit(mut self, qualified_name: impl Into<String>) -> Self {
        let qn: String = qualified_name.into();
        let simple = qn.rsplit('.').next().unwrap_or(&qn).to_string();
        self.explicit.insert(simple, qn);
        self
    }

    pub fn with_wildcard(mut self, package: impl Into<String>) -> Self {
        self.wildcard.push(package.into());
        self
    }
}

/// One declared type in the scanned project.
///
/// Created once during indexing and immutable afterward; looked up by
/// qualified name throughout the build.
#[derive(Debug, Clone)]
pub struct ProjectType {
    pub qualified_name: String,
    pub simple_name: String,
    pub package: String,
    /// Qualified name of the enclosing type, for nested declarations.
    pub nesting_parent: Option<String>,
    pub kind: TypeKind,
    pub visibility: Visibility,
    pub is_abstract: bool,
    /// Raw supertype text (class `extends`), unresolved.
    pub extends: Vec<String>,
    /// Raw interface text (`implements`, or interface `extends`), unresolved.
    pub implements: Vec<String>,
    pub annotations: Vec<AnnotationUse>,
    pub fields: Vec<FieldUse>,
    /// Imports of the source unit this type was declared in.
    pub imports: ImportTable,
    pub doc: Option<String>,
}

impl ProjectType {
    pub fn new(qualified_name: impl Into<String>, kind: TypeKind) -> Self {
        let qn: String = qualified_name.into();
        let simple = qn.rsplit('.').next().unwrap_or(&qn).to_string();
        // Best-effort package split: everything before the simple name.
        // Nested types must set `package`/`nesting_parent` explicitly.
        let package = qn
            .strip_suffix(&simple)
            .map(|p| p.trim_end_matches('.').to_string())
            .unwrap_or_default();
        Self {
            qualified_name: qn,
            simple_name: simple,
            package,
            nesting_parent: None,
            kind,
            visibility: Visibility::Public,
            is_abstract: false,
            extends: Vec::new(),
            implements: Vec::new(),
            annotations: Vec::new(),
            fields: Vec::new(),
            imports: ImportTable::default(),
            doc: None,
        }
    }

    /// Nesting depth: 0 for top-level types, 1 for direct members, etc.
    /// Computed by following `nesting_parent` links through the model.
    pub fn nesting_depth(&self, model: &SourceModel) -> usize {
        let mut depth = 0;
        let mut current = self.nesting_parent.as_deref();
        while let Some(parent_qn) = current {
            depth += 1;
            current = model
                .type_by_qname(parent_qn)
                .and_then(|t| t.nesting_parent.as_deref());
        }
        depth
    }
}

/// The complete parsed input for one build.
#[derive(Debug, Clone, Default)]
pub struct SourceModel {
    pub types: Vec<ProjectType>,
}

impl SourceModel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_type(mut self, ty: ProjectType) -> Self {
        self.types.push(ty);
        self
    }

    pub fn type_by_qname(&self, qualified_name: &str) -> Option<&ProjectType> {
        self.types.iter().find(|t| t.qualified_name == qualified_name)
    }
}
