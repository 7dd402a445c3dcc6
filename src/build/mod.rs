//! The build pipeline.
//!
//! Phases run strictly in dependency order, each over a fully populated
//! predecessor: package indexing → classifier creation (increasing nesting
//! depth) → feature creation → inheritance edges → relationship edges with
//! merge → stereotype application. All shared state lives in a
//! [`BuildContext`] value threaded through the phases, so concurrent builds
//! are fully isolated.

mod associations;
mod classifiers;
mod context;
mod features;
mod inheritance;
mod packages;
mod stereotypes;

pub use context::{BuildContext, BuildOutput, GraphBuilder};
