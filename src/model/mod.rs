//! Input data model consumed by the build pipeline.
//!
//! These records are produced by an external parsing phase and are read-only
//! for this crate: one [`ProjectType`] per declared type, one [`FieldUse`]
//! per declared field, ordered [`AnnotationUse`]s, and a structured
//! [`TypeRef`] built from the declared-type text.

mod records;
mod type_ref;

pub use records::{
    AnnotationUse, FieldUse, ImportTable, ProjectType, SourceModel, TypeKind, Visibility,
};
pub use type_ref::{TypeRef, WildcardBound, parse_type_ref, split_top_level_args, strip_to_base};
