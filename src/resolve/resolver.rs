//! The resolution rule cascade.

use tracing::trace;

use super::context::ResolveContext;

/// Outcome of resolving one raw type reference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// Resolved to a type declared in the project.
    Project(String),
    /// Not a project type, but a plausible qualification exists via imports
    /// or language defaults. Advisory; used for downstream stubs.
    External(String),
    /// No rule produced a usable name.
    Unresolved,
}

impl Resolution {
    /// The project-qualified name, when resolution succeeded.
    pub fn project_qn(&self) -> Option<&str> {
        match self {
            Self::Project(qn) => Some(qn),
            _ => None,
        }
    }
}

// Types implicitly importable from the language's default namespace; used
// only to qualify external references, never to resolve project types.
const LANG_DEFAULTS: &[&str] = &[
    "String", "Object", "Integer", "Long", "Short", "Byte", "Float", "Double", "Boolean",
    "Character", "Number", "Void", "Class", "Enum", "Iterable", "Comparable", "Exception",
    "RuntimeException", "Throwable",
];

/// Resolves raw type text against a [`ResolveContext`].
///
/// Pure: identical (raw, context) inputs always produce identical outputs.
/// No classpath or external library metadata is consulted.
pub struct Resolver;

impl Resolver {
    /// Apply the resolution order, first match wins.
    pub fn resolve(raw: &str, ctx: &ResolveContext<'_>) -> Resolution {
        let name = raw.trim();
        if name.is_empty() {
            return Resolution::Unresolved;
        }
        // Binary nested-name separators normalize to source-style dots.
        let name = if name.contains('$') {
            name.replace('$', ".")
        } else {
            name.to_string()
        };
        let name = name.as_str();

        // 1. Already dotted and present verbatim in the project type set.
        if name.contains('.') && ctx.project.contains(name) {
            trace!(raw = name, "resolved verbatim");
            return Resolution::Project(name.to_string());
        }

        // 2. Current package (also covers dotted nested names like Outer.Inner).
        let in_pkg = ctx.in_current_package(name);
        if ctx.project.contains(&in_pkg) {
            trace!(raw = name, qn = %in_pkg, "resolved via current package");
            return Resolution::Project(in_pkg);
        }

        if let Some((head, tail)) = name.split_once('.') {
            // 3. Head resolves via explicit import to a project type Q and
            //    Q.Tail is a project type.
            if let Some(head_qn) = ctx.imports.explicit.get(head) {
                let candidate = format!("{head_qn}.{tail}");
                if ctx.project.contains(&candidate) {
                    trace!(raw = name, qn = %candidate, "resolved via imported head");
                    return Resolution::Project(candidate);
                }
            }
        }

        // 4. Whole name in explicit imports, imported name is a project type.
        if let Some(qn) = ctx.imports.explicit.get(name)
            && ctx.project.contains(qn)
        {
            trace!(raw = name, qn = %qn, "resolved via explicit import");
            return Resolution::Project(qn.clone());
        }

        // 5. Wildcard imports, in declared order.
        for pkg in &ctx.imports.wildcard {
            let candidate = format!("{pkg}.{name}");
            if ctx.project.contains(&candidate) {
                trace!(raw = name, qn = %candidate, "resolved via wildcard import");
                return Resolution::Project(candidate);
            }
        }

        // 6. Nested-scope chain, innermost to outermost.
        for outer_qn in &ctx.scope_chain {
            if let Some(member_qn) = ctx.project.nested().member(outer_qn, name) {
                trace!(raw = name, qn = member_qn, "resolved via enclosing scope");
                return Resolution::Project(member_qn.to_string());
            }
        }

        // 7. One more pass over context defaults for names not caught above
        //    (dotted names whose package-qualified form exists, etc.), then
        //    classify as external or unresolved.
        if let Some(qn) = Self::context_default(name, ctx) {
            trace!(raw = name, qn = %qn, "resolved via context default");
            return Resolution::Project(qn);
        }

        match Self::qualify_external(name, ctx) {
            Some(ext) => {
                trace!(raw = name, ext = %ext, "classified external");
                Resolution::External(ext)
            }
            None => {
                trace!(raw = name, "unresolved");
                Resolution::Unresolved
            }
        }
    }

    fn context_default(name: &str, ctx: &ResolveContext<'_>) -> Option<String> {
        let in_pkg = ctx.in_current_package(name);
        if ctx.project.contains(&in_pkg) {
            return Some(in_pkg);
        }
        if let Some(qn) = ctx.imports.explicit.get(name)
            && ctx.project.contains(qn)
        {
            return Some(qn.clone());
        }
        for pkg in &ctx.imports.wildcard {
            let candidate = format!("{pkg}.{name}");
            if ctx.project.contains(&candidate) {
                return Some(candidate);
            }
        }
        None
    }

    /// Best-effort qualification for a name outside the project type set.
    fn qualify_external(name: &str, ctx: &ResolveContext<'_>) -> Option<String> {
        // Dotted names carry their own qualification.
        if name.contains('.') {
            return Some(name.to_string());
        }
        if let Some(qn) = ctx.imports.explicit.get(name) {
            return Some(qn.clone());
        }
        // First wildcard wins; we cannot know which package is correct.
        if let Some(pkg) = ctx.imports.wildcard.first() {
            return Some(format!("{pkg}.{name}"));
        }
        if LANG_DEFAULTS.contains(&name) {
            return Some(format!("java.lang.{name}"));
        }
        None
    }
}
