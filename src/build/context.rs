//! The build context and the public builder entry point.

use rustc_hash::FxHashSet;
use tracing::debug;

use crate::config::{AssociationPolicy, BuildOptions, NestedTypeMode};
use crate::diag::{BuildStats, Diagnostics, UnresolvedRef};
use crate::error::BuildError;
use crate::graph::ModelGraph;
use crate::model::{FieldUse, ProjectType, SourceModel, parse_type_ref};
use crate::profile::ProfileManager;
use crate::resolve::{ProjectIndex, Resolution, ResolveContext, Resolver};

use super::{associations, classifiers, features, inheritance, packages, stereotypes};

/// Everything one build accumulates. Owned for the lifetime of a single
/// [`GraphBuilder::build`] call; never shared between builds.
pub struct BuildContext<'a> {
    pub model: &'a SourceModel,
    pub options: BuildOptions,
    pub project: ProjectIndex,
    pub graph: ModelGraph,
    pub diagnostics: Diagnostics,
    pub stats: BuildStats,
    pub profile: ProfileManager,
}

impl<'a> BuildContext<'a> {
    fn new(model: &'a SourceModel, options: BuildOptions) -> Self {
        Self {
            model,
            options,
            project: ProjectIndex::from_model(model),
            graph: ModelGraph::new(),
            diagnostics: Diagnostics::new(),
            stats: BuildStats::default(),
            profile: ProfileManager::new(),
        }
    }

    /// Resolve raw type text from within `ty`, without recording diagnostics.
    pub fn resolve_in(&self, ty: &ProjectType, raw: &str) -> Resolution {
        let ctx = ResolveContext::for_type(ty, self.model, &self.project);
        Resolver::resolve(raw, &ctx)
    }

    /// Resolve and record unresolved/external diagnostics at `location`.
    pub fn resolve_recorded(&mut self, ty: &ProjectType, raw: &str, location: &str) -> Resolution {
        let resolution = self.resolve_in(ty, raw);
        match &resolution {
            Resolution::Unresolved => self.diagnostics.record_unresolved(UnresolvedRef::new(
                raw,
                &ty.qualified_name,
                location,
            )),
            Resolution::External(ext) => self.diagnostics.record_external(UnresolvedRef::new(
                ext.clone(),
                &ty.qualified_name,
                location,
            )),
            Resolution::Project(_) => {}
        }
        resolution
    }

    /// A working copy of `field` with its structured type reference present,
    /// parsing the declared text against this type's resolution context when
    /// the input record carries none.
    pub fn typed_field(&self, ty: &ProjectType, field: &FieldUse) -> FieldUse {
        if field.type_ref.is_some() {
            return field.clone();
        }
        let ctx = ResolveContext::for_type(ty, self.model, &self.project);
        let qualify = |name: &str| {
            match Resolver::resolve(name, &ctx) {
                Resolution::Project(qn) => Some(qn),
                _ => None,
            }
        };
        let mut out = field.clone();
        out.type_ref = Some(parse_type_ref(&field.declared_type, &qualify));
        out
    }

    /// Project types sorted by qualified name: the canonical ordering for
    /// every order-sensitive pass.
    pub fn sorted_types(&self) -> Vec<&'a ProjectType> {
        let mut types: Vec<&ProjectType> = self.model.types.iter().collect();
        types.sort_by(|a, b| a.qualified_name.cmp(&b.qualified_name));
        types
    }
}

/// Result of one build: the graph, advisory diagnostics, and counters.
#[derive(Debug)]
pub struct BuildOutput {
    pub graph: ModelGraph,
    pub diagnostics: Diagnostics,
    pub stats: BuildStats,
}

/// Builds a [`ModelGraph`] from a [`SourceModel`].
#[derive(Debug, Clone, Copy, Default)]
pub struct GraphBuilder {
    options: BuildOptions,
}

impl GraphBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(options: BuildOptions) -> Self {
        Self { options }
    }

    pub fn policy(mut self, policy: AssociationPolicy) -> Self {
        self.options.association_policy = policy;
        self
    }

    pub fn nested_mode(mut self, mode: NestedTypeMode) -> Self {
        self.options.nested_type_mode = mode;
        self
    }

    /// Run the full pipeline. The only fatal conditions are input contract
    /// violations; everything recoverable lands in the diagnostics.
    pub fn build(&self, model: &SourceModel) -> Result<BuildOutput, BuildError> {
        let mut seen = FxHashSet::default();
        for ty in &model.types {
            if !seen.insert(ty.qualified_name.as_str()) {
                return Err(BuildError::DuplicateType(ty.qualified_name.clone()));
            }
        }

        let mut ctx = BuildContext::new(model, self.options);

        packages::run(&mut ctx);
        classifiers::run(&mut ctx)?;
        features::run(&mut ctx);
        inheritance::run(&mut ctx);
        associations::run(&mut ctx);
        stereotypes::run(&mut ctx);

        let BuildContext {
            mut graph,
            diagnostics,
            stats,
            profile,
            ..
        } = ctx;
        graph.profile = profile.into_profile();

        debug!(
            classifiers = stats.classifiers_created,
            edges = stats.edges_created,
            merges = stats.edge_merges,
            "build finished"
        );
        Ok(BuildOutput {
            graph,
            diagnostics,
            stats,
        })
    }
}
