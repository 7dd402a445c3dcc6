//! Structured type references and the best-effort textual parser.
//!
//! A [`TypeRef`] is built from declared-type text without symbol solving:
//! array dimensions are peeled outermost-first, generic arguments are split
//! bracket-depth-aware, and wildcard bounds are preserved. Known container
//! shapes (`Optional`, `List`/`Set`/`Collection`/`Iterable`, `Map`) are
//! recognized by simple name or qualified-name suffix; anything else stays an
//! opaque parameterized reference used for display only.

/// Wildcard bound kind for `? extends X` / `? super X`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WildcardBound {
    Extends,
    Super,
    Unbounded,
}

/// A structured type usage.
///
/// `args` order is always declaration order — it is semantically positional
/// (Map key/value) and must never be sorted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeRef {
    Simple {
        raw: String,
        simple_name: String,
        /// Project-qualified name when resolution succeeded, else empty.
        qualified_hint: String,
    },
    Array {
        raw: String,
        element: Box<TypeRef>,
        dimensions: usize,
    },
    Parameterized {
        raw: String,
        container: String,
        container_hint: String,
        args: Vec<TypeRef>,
    },
    Wildcard {
        raw: String,
        bound_kind: WildcardBound,
        bound: Option<Box<TypeRef>>,
    },
}

const PRIMITIVES: &[&str] = &[
    "byte", "short", "int", "long", "float", "double", "boolean", "char", "void",
];

const COLLECTION_SIMPLE_NAMES: &[&str] = &["Collection", "List", "Set", "Iterable"];

impl TypeRef {
    pub fn simple(
        raw: impl Into<String>,
        simple_name: impl Into<String>,
        qualified_hint: impl Into<String>,
    ) -> Self {
        Self::Simple {
            raw: raw.into(),
            simple_name: simple_name.into(),
            qualified_hint: qualified_hint.into(),
        }
    }

    /// The raw source text this reference was built from.
    pub fn raw(&self) -> &str {
        match self {
            Self::Simple { raw, .. }
            | Self::Array { raw, .. }
            | Self::Parameterized { raw, .. }
            | Self::Wildcard { raw, .. } => raw,
        }
    }

    /// Simple (container) name, for display and catalog matching.
    pub fn simple_name(&self) -> &str {
        match self {
            Self::Simple { simple_name, .. } => simple_name,
            Self::Parameterized { container, .. } => container,
            Self::Array { .. } | Self::Wildcard { .. } => "",
        }
    }

    /// Qualification hint, when resolution produced one.
    pub fn qualified_hint(&self) -> &str {
        match self {
            Self::Simple { qualified_hint, .. } => qualified_hint,
            Self::Parameterized { container_hint, .. } => container_hint,
            Self::Array { .. } | Self::Wildcard { .. } => "",
        }
    }

    /// Generic arguments (empty for non-parameterized references).
    pub fn args(&self) -> &[TypeRef] {
        match self {
            Self::Parameterized { args, .. } => args,
            _ => &[],
        }
    }

    /// First generic argument, or the array element.
    pub fn first_arg(&self) -> Option<&TypeRef> {
        match self {
            Self::Array { element, .. } => Some(element),
            Self::Parameterized { args, .. } => args.first(),
            _ => None,
        }
    }

    pub fn is_primitive(&self) -> bool {
        matches!(self, Self::Simple { simple_name, .. } if PRIMITIVES.contains(&simple_name.as_str()))
    }

    pub fn is_array(&self) -> bool {
        matches!(self, Self::Array { .. })
    }

    /// `Optional<T>` by simple name or qualified suffix.
    pub fn is_optional(&self) -> bool {
        self.simple_name() == "Optional" || self.qualified_hint().ends_with("java.util.Optional")
    }

    /// `List`/`Set`/`Collection`/`Iterable` by simple name or qualified suffix.
    pub fn is_collection(&self) -> bool {
        if COLLECTION_SIMPLE_NAMES.contains(&self.simple_name()) {
            return true;
        }
        let qn = self.qualified_hint();
        qn.ends_with("java.util.Collection")
            || qn.ends_with("java.util.List")
            || qn.ends_with("java.util.Set")
            || qn.ends_with("java.lang.Iterable")
    }

    /// `Map<K,V>` by simple name or qualified suffix.
    pub fn is_map(&self) -> bool {
        self.simple_name() == "Map" || self.qualified_hint().ends_with("java.util.Map")
    }

    /// True for any of the known container shapes with multiplicity semantics.
    pub fn is_known_container(&self) -> bool {
        self.is_optional() || self.is_collection() || self.is_map()
    }

    /// Best label for tagging: qualification hint, else raw, else simple name.
    pub fn best_label(&self) -> &str {
        let hint = self.qualified_hint();
        if !hint.is_empty() {
            return hint;
        }
        if !self.raw().is_empty() {
            return self.raw();
        }
        self.simple_name()
    }

    /// Unwrap a wildcard to its bound type, for element-type derivation.
    /// Wildcards never create relationship edges themselves.
    pub fn unwrap_wildcard(&self) -> &TypeRef {
        match self {
            Self::Wildcard { bound: Some(b), .. } => b.unwrap_wildcard(),
            _ => self,
        }
    }
}

/// Parse declared-type text into a structured [`TypeRef`].
///
/// `qualify` resolves a base name (possibly dotted) to a project-qualified
/// name, returning `None` when the name is not a project type. The parser
/// itself never records diagnostics; callers resolve and classify separately.
pub fn parse_type_ref(raw: &str, qualify: &dyn Fn(&str) -> Option<String>) -> TypeRef {
    let text = raw.trim();
    if text.is_empty() {
        return TypeRef::simple("", "", "");
    }

    // Wildcards: `?`, `? extends X`, `? super X`
    if let Some(rest) = text.strip_prefix('?') {
        let rest = rest.trim();
        let (kind, bound_text) = if let Some(b) = rest.strip_prefix("extends ") {
            (WildcardBound::Extends, Some(b.trim()))
        } else if let Some(b) = rest.strip_prefix("super ") {
            (WildcardBound::Super, Some(b.trim()))
        } else {
            (WildcardBound::Unbounded, None)
        };
        let bound = bound_text.map(|b| Box::new(parse_type_ref(b, qualify)));
        return TypeRef::Wildcard {
            raw: text.to_string(),
            bound_kind: kind,
            bound,
        };
    }

    // Arrays: peel all trailing `[]` pairs, keeping the innermost element.
    let mut dims = 0;
    let mut base = text;
    while let Some(stripped) = base.trim_end().strip_suffix("[]") {
        dims += 1;
        base = stripped.trim_end();
    }
    if dims > 0 {
        let element = parse_type_ref(base, qualify);
        return TypeRef::Array {
            raw: text.to_string(),
            element: Box::new(element),
            dimensions: dims,
        };
    }

    // Parameterized: split at the outermost angle bracket.
    if let Some(lt) = text.find('<') {
        let gt = text.rfind('>').unwrap_or(text.len());
        let container_text = text[..lt].trim();
        let inner = &text[lt + 1..gt];
        let args = split_top_level_args(inner)
            .into_iter()
            .map(|a| parse_type_ref(a, qualify))
            .collect();
        let container_simple = simple_name_of(container_text);
        let container_hint = qualify(container_text).unwrap_or_default();
        return TypeRef::Parameterized {
            raw: text.to_string(),
            container: container_simple.to_string(),
            container_hint,
            args,
        };
    }

    // Simple reference (possibly dotted / nested).
    let simple = simple_name_of(text);
    let hint = if PRIMITIVES.contains(&text) {
        String::new()
    } else {
        qualify(text).unwrap_or_default()
    };
    TypeRef::simple(text, simple, hint)
}

/// Split generic-argument text at top-level commas, bracket-depth-aware.
pub fn split_top_level_args(inner: &str) -> Vec<&str> {
    let mut out = Vec::new();
    let mut depth = 0usize;
    let mut start = 0usize;
    for (i, c) in inner.char_indices() {
        match c {
            '<' => depth += 1,
            '>' => depth = depth.saturating_sub(1),
            ',' if depth == 0 => {
                let part = inner[start..i].trim();
                if !part.is_empty() {
                    out.push(part);
                }
                start = i + 1;
            }
            _ => {}
        }
    }
    let last = inner[start..].trim();
    if !last.is_empty() {
        out.push(last);
    }
    out
}

/// Strip generics (bracket-depth is irrelevant for the outermost cut) and
/// trailing array suffixes from raw type text. Textual fallback used only
/// when structured info is absent.
pub fn strip_to_base(raw: &str) -> &str {
    let mut s = raw.trim();
    if let Some(lt) = s.find('<') {
        s = s[..lt].trim();
    }
    while let Some(stripped) = s.strip_suffix("[]") {
        s = stripped.trim_end();
    }
    s
}

fn simple_name_of(name: &str) -> &str {
    name.rsplit('.').next().unwrap_or(name)
}
