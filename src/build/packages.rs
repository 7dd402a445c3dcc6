//! Phase 1: package indexing.

use tracing::debug;

use crate::graph::{IdentityKey, Package, stable_id};

use super::context::BuildContext;

/// Create one package node per distinct package name, in sorted order.
pub fn run(ctx: &mut BuildContext<'_>) {
    let mut names: Vec<&str> = ctx.model.types.iter().map(|t| t.package.as_str()).collect();
    names.sort_unstable();
    names.dedup();

    for name in names {
        let key = IdentityKey::package(name);
        ctx.graph.packages.insert(
            name.to_string(),
            Package {
                name: name.to_string(),
                stable_id: stable_id(&key),
                element_imports: Vec::new(),
            },
        );
        ctx.stats.packages_created += 1;
    }
    debug!(packages = ctx.stats.packages_created, "packages indexed");
}
