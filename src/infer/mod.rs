//! Semantic inference: relationship markers, multiplicity tiers, the
//! attribute-vs-edge policy engine, and the bidirectional merge index.
//!
//! Everything here is pure over the input records plus a resolution
//! callback; the build phases own all graph mutation except the placeholder
//! slot update performed during a merge.

mod markers;
mod merge;
mod multiplicity;
mod target;

pub use markers::{FieldMarkers, RelationKind, is_value_like};
pub use merge::{MergeIndex, MergeRecord, pair_key};
pub use multiplicity::{MultiplicityResolver, ResolvedMultiplicity};
pub use target::{AssociationTargetResolver, EdgeDecision, EdgePlan};
