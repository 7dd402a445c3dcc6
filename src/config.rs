//! Build configuration, consumed as plain enums.

use std::str::FromStr;

/// When to represent a field as a relationship edge instead of (only) an
/// attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AssociationPolicy {
    /// Never create edges; every field stays attribute-only.
    None,
    /// Create an edge only when a domain relationship marker is present.
    JpaOnly,
    /// Create an edge whenever the unwrapped target resolves to a project
    /// classifier.
    #[default]
    Resolved,
    /// Relationship marker ⇒ edge; value-like scalar target ⇒ attribute-only;
    /// otherwise behave like `Resolved`.
    Smart,
}

impl FromStr for AssociationPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "none" => Ok(Self::None),
            "jpa" | "jpa-only" | "jpa_only" => Ok(Self::JpaOnly),
            "resolved" => Ok(Self::Resolved),
            "smart" => Ok(Self::Smart),
            other => Err(format!(
                "invalid association policy: {other} (expected: none | jpa-only | resolved | smart)"
            )),
        }
    }
}

/// How nested member types are exposed in the generated graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NestedTypeMode {
    /// Nested classifiers owned by the enclosing classifier.
    #[default]
    Nested,
    /// Nested classifiers, plus an element import into the owning package
    /// for tools that discover members through packages.
    NestedPlusImport,
    /// Flatten nested types directly into the owning package.
    Flatten,
}

impl FromStr for NestedTypeMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "nested" => Ok(Self::Nested),
            "nested+import" | "nested_import" | "nested-import" => Ok(Self::NestedPlusImport),
            "flatten" => Ok(Self::Flatten),
            other => Err(format!(
                "invalid nested-type mode: {other} (expected: nested | nested+import | flatten)"
            )),
        }
    }
}

/// Options for one graph build.
#[derive(Debug, Clone, Copy, Default)]
pub struct BuildOptions {
    pub association_policy: AssociationPolicy,
    pub nested_type_mode: NestedTypeMode,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_policy_aliases() {
        assert_eq!("jpa-only".parse::<AssociationPolicy>().unwrap(), AssociationPolicy::JpaOnly);
        assert_eq!("SMART".parse::<AssociationPolicy>().unwrap(), AssociationPolicy::Smart);
        assert!("bogus".parse::<AssociationPolicy>().is_err());
    }

    #[test]
    fn parses_nested_mode_aliases() {
        assert_eq!(
            "nested+import".parse::<NestedTypeMode>().unwrap(),
            NestedTypeMode::NestedPlusImport
        );
        assert!("??".parse::<NestedTypeMode>().is_err());
    }
}
