//! Reproducibility: identical input yields byte-identical identity hashes,
//! sorted tag listings, and edge sets, regardless of input ordering.

use umlgraph::model::SourceModel;
use umlgraph::{AssociationPolicy, GraphBuilder};

#[path = "helpers/mod.rs"]
mod helpers;

use helpers::model_fixtures::shop_model;

fn snapshot(model: &SourceModel) -> Vec<String> {
    let output = GraphBuilder::new()
        .policy(AssociationPolicy::JpaOnly)
        .build(model)
        .expect("build");
    let graph = &output.graph;

    let mut lines = Vec::new();
    for pkg in graph.packages.values() {
        lines.push(format!("package {} {}", pkg.name, pkg.stable_id));
    }
    for c in graph.classifiers.values() {
        lines.push(format!("classifier {} {}", c.qualified_name, c.stable_id));
        for a in &c.attributes {
            lines.push(format!(
                "  attr {} {} [{}] {}",
                a.name,
                a.stable_id,
                a.multiplicity.render(),
                a.tags.render()
            ));
        }
    }
    for e in &graph.edges {
        let ends: Vec<String> = e
            .ends
            .iter()
            .map(|end| {
                format!(
                    "{}:{}:{}",
                    end.owner_qn().unwrap_or("<edge>"),
                    end.role.as_deref().unwrap_or("-"),
                    end.multiplicity.render()
                )
            })
            .collect();
        lines.push(format!("edge {} {} {}", e.stable_id, ends.join(" "), e.tags.render()));
    }
    for g in &graph.generalizations {
        lines.push(format!("gen {} -> {} {}", g.child_qn, g.parent_qn, g.stable_id));
    }
    for pi in &graph.package_imports {
        lines.push(format!("import {} -> {} {}", pi.from_package, pi.to_package, pi.stable_id));
    }
    for st in graph.profile.stereotypes.values() {
        lines.push(format!("stereotype {} {} {}", st.name, st.qualifier, st.stable_id));
    }
    lines
}

#[test]
fn two_builds_produce_identical_snapshots() {
    let model = shop_model();
    assert_eq!(snapshot(&model), snapshot(&model));
}

#[test]
fn input_order_does_not_change_the_snapshot() {
    let model = shop_model();
    let mut reversed = SourceModel::new();
    for ty in model.types.iter().rev() {
        reversed = reversed.with_type(ty.clone());
    }
    assert_eq!(snapshot(&model), snapshot(&reversed));
}

#[test]
fn stable_ids_are_fixed_width_hex() {
    let output = GraphBuilder::new().build(&shop_model()).expect("build");
    for c in output.graph.classifiers.values() {
        assert_eq!(c.stable_id.len(), 32);
        assert!(c.stable_id.chars().all(|ch| ch.is_ascii_hexdigit()));
    }
}
