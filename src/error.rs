//! Error types for the build pipeline.

use thiserror::Error;

/// Errors that abort a build.
///
/// Almost everything in this crate degrades gracefully into diagnostics;
/// only input contract violations are fatal.
#[derive(Debug, Error)]
pub enum BuildError {
    /// Two input types share a qualified name.
    #[error("duplicate type in source model: {0}")]
    DuplicateType(String),

    /// A nesting parent references a type missing from the input.
    #[error("missing nesting parent '{parent}' for type '{child}'")]
    MissingNestingParent { parent: String, child: String },
}

/// Failure of one stereotype/metaclass extension construction path.
///
/// Both paths failing skips the single binding with a warning; the build
/// continues, so this error never escapes the profile module.
#[derive(Debug, Error)]
pub enum ExtensionError {
    #[error("unknown metaclass: {0}")]
    UnknownMetaclass(String),

    #[error("extension construction rejected: {0}")]
    Rejected(String),
}
