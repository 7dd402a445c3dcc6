//! Phase 6: cross-cutting stereotype application.
//!
//! Every type-level annotation ensures a stereotype (qualified by the
//! annotation's best-known name), an extension to the matching metaclass,
//! and an application carrying the annotation's member values as tagged
//! values.

use tracing::debug;

use crate::graph::TagMap;

use super::context::BuildContext;

pub fn run(ctx: &mut BuildContext<'_>) {
    for ty in ctx.sorted_types() {
        for ann in &ty.annotations {
            let qualifier = ann.best_name().to_string();
            let stereotype = ctx.profile.ensure_stereotype(&ann.simple_name, &qualifier);
            ctx.profile
                .ensure_extends(&stereotype, ty.kind.metaclass_name());

            let values: TagMap = ann
                .values
                .iter()
                .map(|(k, v)| (k.clone(), unquote(v)))
                .collect();
            ctx.profile.apply(&stereotype, &ty.qualified_name, values);
            ctx.stats.stereotypes_applied += 1;
        }
    }
    debug!(applied = ctx.stats.stereotypes_applied, "stereotypes applied");
}

fn unquote(v: &str) -> String {
    let t = v.trim();
    t.strip_prefix('"')
        .and_then(|s| s.strip_suffix('"'))
        .unwrap_or(t)
        .to_string()
}
