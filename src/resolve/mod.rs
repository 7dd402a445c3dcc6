//! Best-effort name resolution without a compiler symbol table.
//!
//! A [`ResolveContext`] is rebuilt per source unit (no cross-file cache) so
//! imports never leak between files. Resolution is a pure function of
//! (raw text, context): identical inputs always produce identical outputs,
//! which the merge and identity layers depend on.

mod context;
mod resolver;

pub use context::{NestedMemberIndex, ProjectIndex, ResolveContext};
pub use resolver::{Resolution, Resolver};
