//! The output graph: classifiers, attributes, an edge arena with
//! placeholder ends, provenance tags, and deterministic identity.
//!
//! ## Design
//!
//! Elements live in insertion-ordered maps keyed by qualified name and in an
//! edge arena addressed by [`EdgeId`] handles. Replacing a placeholder end
//! during a bidirectional merge is a single slot update on the arena entry,
//! so end ownership transfers atomically and no dangling references can
//! occur.
//!
//! ```text
//! ModelGraph
//! ├── packages: IndexMap<String, Package>
//! ├── classifiers: IndexMap<String, Classifier>   (by qualified name)
//! ├── edges: Vec<Edge>                            (arena, EdgeId handles)
//! ├── generalizations: Vec<Generalization>
//! ├── package_imports: Vec<PackageImport>
//! └── profile: Profile
//! ```

mod classifier;
mod edge;
mod ident;
mod tags;

pub use classifier::{
    Attribute, Classifier, ClassifierKind, Generalization, GeneralizationKind, ModelGraph, Package,
    PackageImport,
};
pub use edge::{AggregationKind, Edge, EdgeEnd, EdgeId, EndOwner, Multiplicity, Upper};
pub use ident::{IdentityKey, stable_id};
pub use tags::TagMap;
