//! # umlgraph
//!
//! Semantic-inference core that turns a parsed object-oriented source model
//! (types, fields, annotations, textual type references) into a well-formed
//! UML-style relationship graph: classifiers, typed attributes, associations
//! with multiplicities, and stereotype/profile metadata.
//!
//! The crate sits between "parsed syntax" and "emitted graph". It performs
//! best-effort cross-reference resolution without a compiler symbol table,
//! layered multiplicity inference, policy-driven attribute-vs-relationship
//! decisions, bidirectional relationship merging, and deterministic
//! identity/extension management. Source scanning, AST parsing and text
//! serialization are external collaborators.
//!
//! ## Module Structure (dependency order)
//!
//! ```text
//! build     → pipeline phases, build context, stats
//!   ↓
//! infer     → multiplicity tiers, target/policy engine, merge engine
//!   ↓
//! profile   → stereotype/profile extension manager
//!   ↓
//! graph     → output graph: classifiers, edge arena, tags, identity
//!   ↓
//! resolve   → import/package/nested-scope name resolution
//!   ↓
//! model     → input records: ProjectType, FieldUse, AnnotationUse, TypeRef
//! ```

// ============================================================================
// MODULES (dependency order: model → resolve → graph → profile → infer → build)
// ============================================================================

/// Input records: `ProjectType`, `FieldUse`, `AnnotationUse`, `TypeRef`
pub mod model;

/// Name resolution: import/package/nested-scope lookup without a classpath
pub mod resolve;

/// Output graph: classifiers, edge arena, sorted tags, stable identity
pub mod graph;

/// Stereotype/profile extension manager
pub mod profile;

/// Semantic inference: multiplicity, association targets, bidirectional merge
pub mod infer;

/// Build pipeline: phase orchestration over a single `BuildContext`
pub mod build;

/// Configuration enums consumed as plain values
pub mod config;

/// Advisory diagnostics accumulated during a build
pub mod diag;

/// Crate error types
pub mod error;

// Re-export the main entry points
pub use build::{BuildOutput, GraphBuilder};
pub use config::{AssociationPolicy, BuildOptions, NestedTypeMode};
pub use error::BuildError;
pub use graph::{ModelGraph, stable_id};
pub use model::SourceModel;
