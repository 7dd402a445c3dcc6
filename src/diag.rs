//! Advisory diagnostics accumulated during a build.
//!
//! Nothing here is fatal: unresolved references and best-effort external
//! qualifications are recorded and surfaced alongside the (possibly partial)
//! graph for downstream reporting and stub generation.

/// A raw type reference that could not be mapped to any project type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnresolvedRef {
    /// The raw text as written in source.
    pub raw: String,
    /// Qualified name of the containing type or member.
    pub from: String,
    /// Human-readable locator, e.g. `"field orders"` or `"extends"`.
    pub location: String,
}

impl UnresolvedRef {
    pub fn new(
        raw: impl Into<String>,
        from: impl Into<String>,
        location: impl Into<String>,
    ) -> Self {
        Self {
            raw: raw.into(),
            from: from.into(),
            location: location.into(),
        }
    }
}

/// A reference resolved to a plausible qualified name outside the project's
/// own type set. Used by downstream stub generation; advisory only.
pub type ExternalRef = UnresolvedRef;

/// Diagnostic lists returned with every build output.
#[derive(Debug, Clone, Default)]
pub struct Diagnostics {
    pub unresolved: Vec<UnresolvedRef>,
    pub external: Vec<ExternalRef>,
}

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_unresolved(&mut self, r: UnresolvedRef) {
        self.unresolved.push(r);
    }

    pub fn record_external(&mut self, r: ExternalRef) {
        self.external.push(r);
    }
}

/// Counters describing what a build produced.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BuildStats {
    pub packages_created: usize,
    pub classifiers_created: usize,
    pub attributes_created: usize,
    pub generalizations_created: usize,
    pub edges_created: usize,
    pub edge_merges: usize,
    pub package_imports_created: usize,
    pub stereotypes_applied: usize,
}
