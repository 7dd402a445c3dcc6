//! Stereotype and profile management.
//!
//! The profile owns stereotype definitions, their tagged-value attributes,
//! their metaclass extension bindings, and the applications of stereotypes to
//! classifiers. All creation paths are idempotent: asking twice for the same
//! stereotype, attribute, extension, or application changes nothing.
//!
//! Extension construction runs a two-phase protocol behind the
//! [`ExtensionBuilder`] trait: first reference the target metaclass, then
//! bind. A capability probe picks the builder's native path when available;
//! otherwise the manager constructs the two-end extension shape manually.
//! When both paths fail the binding is skipped with a warning and the build
//! continues.

mod extension;
mod manager;

pub use extension::{
    ExtensionBinding, ExtensionBuilder, ExtensionEnd, MetaclassRef, NativeExtensionBuilder,
};
pub use manager::{
    Profile, ProfileManager, Stereotype, StereotypeApplication, StereotypeAttribute, sanitize_name,
};
