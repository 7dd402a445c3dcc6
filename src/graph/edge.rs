//! Relationship edges: an arena of two-ended associations.

use super::tags::TagMap;

/// Handle into the edge arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EdgeId(pub u32);

impl EdgeId {
    pub fn new(index: usize) -> Self {
        Self(index as u32)
    }

    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// Upper multiplicity bound.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Upper {
    Bounded(u32),
    Unbounded,
}

impl Upper {
    /// Rendering used in identity keys and multiplicities: `*` or the bound.
    pub fn render(self) -> String {
        match self {
            Self::Bounded(n) => n.to_string(),
            Self::Unbounded => "*".to_string(),
        }
    }
}

impl std::fmt::Display for Upper {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.render())
    }
}

/// A (lower, upper) multiplicity pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Multiplicity {
    pub lower: u32,
    pub upper: Upper,
}

impl Multiplicity {
    pub const ONE: Self = Self {
        lower: 1,
        upper: Upper::Bounded(1),
    };

    pub const OPTIONAL: Self = Self {
        lower: 0,
        upper: Upper::Bounded(1),
    };

    pub const MANY: Self = Self {
        lower: 0,
        upper: Upper::Unbounded,
    };

    pub fn new(lower: u32, upper: Upper) -> Self {
        Self { lower, upper }
    }

    pub fn render(&self) -> String {
        format!("{}..{}", self.lower, self.upper)
    }
}

/// UML aggregation kind for an end.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AggregationKind {
    #[default]
    None,
    Composite,
}

impl AggregationKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Composite => "composite",
        }
    }
}

/// Who owns an edge end.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EndOwner {
    /// A real end owned by a classifier (role name = field name).
    Classifier(String),
    /// A transient placeholder owned by the edge itself, standing in for an
    /// inverse side not yet discovered.
    Edge,
}

/// One side of a relationship edge.
#[derive(Debug, Clone)]
pub struct EdgeEnd {
    pub owner: EndOwner,
    /// Role name; `None` for placeholder ends without a `mappedBy` hint.
    pub role: Option<String>,
    /// Qualified name of the classifier this end is typed by.
    pub type_qn: String,
    pub multiplicity: Multiplicity,
    pub aggregation: AggregationKind,
    pub tags: TagMap,
}

impl EdgeEnd {
    /// A real end owned by `owner_qn`, named after the declaring field.
    pub fn classifier_owned(
        owner_qn: impl Into<String>,
        role: impl Into<String>,
        type_qn: impl Into<String>,
        multiplicity: Multiplicity,
        aggregation: AggregationKind,
    ) -> Self {
        Self {
            owner: EndOwner::Classifier(owner_qn.into()),
            role: Some(role.into()),
            type_qn: type_qn.into(),
            multiplicity,
            aggregation,
            tags: TagMap::new(),
        }
    }

    /// A synthetic edge-owned placeholder typed by `type_qn`.
    pub fn placeholder(type_qn: impl Into<String>, multiplicity: Multiplicity) -> Self {
        Self {
            owner: EndOwner::Edge,
            role: None,
            type_qn: type_qn.into(),
            multiplicity,
            aggregation: AggregationKind::None,
            tags: TagMap::new(),
        }
    }

    pub fn is_placeholder(&self) -> bool {
        matches!(self.owner, EndOwner::Edge)
    }

    pub fn owner_qn(&self) -> Option<&str> {
        match &self.owner {
            EndOwner::Classifier(qn) => Some(qn),
            EndOwner::Edge => None,
        }
    }
}

/// An undirected relationship between two classifiers.
///
/// Invariants: exactly two ends at all times; at most one placeholder end; a
/// classifier owns at most one end per edge. Navigability is deliberately
/// left unasserted — classifier-owned ends are implicitly discoverable.
#[derive(Debug, Clone)]
pub struct Edge {
    pub id_key: String,
    pub stable_id: String,
    pub ends: [EdgeEnd; 2],
    pub tags: TagMap,
}

impl Edge {
    pub fn new(id_key: String, stable_id: String, first: EdgeEnd, second: EdgeEnd) -> Self {
        debug_assert!(
            !(first.is_placeholder() && second.is_placeholder()),
            "an edge may carry at most one placeholder end"
        );
        Self {
            id_key,
            stable_id,
            ends: [first, second],
            tags: TagMap::new(),
        }
    }

    /// Index of the placeholder end, if one remains.
    pub fn placeholder_slot(&self) -> Option<usize> {
        self.ends.iter().position(EdgeEnd::is_placeholder)
    }

    /// True when some end is owned by `classifier_qn`.
    pub fn has_end_owned_by(&self, classifier_qn: &str) -> bool {
        self.ends
            .iter()
            .any(|e| e.owner_qn() == Some(classifier_qn))
    }

    /// End owned by the given classifier, if any.
    pub fn end_owned_by(&self, classifier_qn: &str) -> Option<&EdgeEnd> {
        self.ends.iter().find(|e| e.owner_qn() == Some(classifier_qn))
    }

    /// Replace the placeholder end with a real classifier-owned end.
    ///
    /// Single slot update: ownership transfers atomically from edge-owned to
    /// classifier-owned. Returns false when no placeholder remains or the
    /// new owner already owns the other end.
    pub fn fill_placeholder(&mut self, end: EdgeEnd) -> bool {
        let Some(owner) = end.owner_qn().map(str::to_string) else {
            return false;
        };
        if self.has_end_owned_by(&owner) {
            return false;
        }
        match self.placeholder_slot() {
            Some(slot) => {
                self.ends[slot] = end;
                true
            }
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn real(owner: &str, role: &str, ty: &str) -> EdgeEnd {
        EdgeEnd::classifier_owned(owner, role, ty, Multiplicity::MANY, AggregationKind::None)
    }

    #[test]
    fn fill_placeholder_transfers_ownership() {
        let mut edge = Edge::new(
            "k".into(),
            "id".into(),
            real("a.A", "bs", "a.B"),
            EdgeEnd::placeholder("a.A", Multiplicity::OPTIONAL),
        );
        assert_eq!(edge.placeholder_slot(), Some(1));
        assert!(edge.fill_placeholder(real("a.B", "owner", "a.A")));
        assert_eq!(edge.placeholder_slot(), None);
        assert!(edge.has_end_owned_by("a.B"));
    }

    #[test]
    fn fill_placeholder_refuses_duplicate_owner() {
        let mut edge = Edge::new(
            "k".into(),
            "id".into(),
            real("a.A", "bs", "a.B"),
            EdgeEnd::placeholder("a.A", Multiplicity::OPTIONAL),
        );
        assert!(!edge.fill_placeholder(real("a.A", "other", "a.B")));
        assert_eq!(edge.placeholder_slot(), Some(1));
    }
}
