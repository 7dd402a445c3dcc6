//! Metaclass extension bindings and the two-phase builder protocol.

use tracing::trace;

use crate::error::ExtensionError;
use crate::graph::{AggregationKind, IdentityKey, Multiplicity, stable_id};

/// Metaclasses known to the default builder.
const KNOWN_METACLASSES: &[&str] = &["Class", "Interface", "Enumeration", "Annotation"];

/// A resolved reference to a metaclass, produced by phase one of the
/// extension protocol.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetaclassRef {
    pub name: String,
    /// Whether applying the extending stereotype is mandatory on instances
    /// of this metaclass. Drives the base end's lower bound.
    pub required: bool,
}

/// One end of an extension binding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtensionEnd {
    pub name: String,
    pub type_name: String,
    pub multiplicity: Multiplicity,
    pub aggregation: AggregationKind,
    pub stable_id: String,
}

/// A stereotype-to-metaclass extension. Created at most once per
/// (stereotype, metaclass) pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtensionBinding {
    pub stereotype: String,
    pub metaclass: String,
    /// `[base end, stereotype end]`.
    pub ends: [ExtensionEnd; 2],
    pub stable_id: String,
    /// Whether the builder's native path produced this binding.
    pub native: bool,
}

impl ExtensionBinding {
    /// The two-end shape shared by the native path and the manual fallback:
    /// a base end typed by the metaclass (lower per `required`, upper 1, no
    /// aggregation) and a composite stereotype end at 0..1.
    pub fn construct(stereotype: &str, metaclass: &MetaclassRef, native: bool) -> Self {
        let base_name = format!("base_{}", metaclass.name);
        let ext_name = format!("extension_{stereotype}");
        let base_lower = if metaclass.required { 1 } else { 0 };
        let base = ExtensionEnd {
            name: base_name.clone(),
            type_name: metaclass.name.clone(),
            multiplicity: Multiplicity::new(base_lower, crate::graph::Upper::Bounded(1)),
            aggregation: AggregationKind::None,
            stable_id: stable_id(&IdentityKey::extension_end(
                stereotype,
                &metaclass.name,
                &base_name,
            )),
        };
        let stereo = ExtensionEnd {
            name: ext_name.clone(),
            type_name: stereotype.to_string(),
            multiplicity: Multiplicity::OPTIONAL,
            aggregation: AggregationKind::Composite,
            stable_id: stable_id(&IdentityKey::extension_end(
                stereotype,
                &metaclass.name,
                &ext_name,
            )),
        };
        Self {
            stereotype: stereotype.to_string(),
            metaclass: metaclass.name.clone(),
            ends: [base, stereo],
            stable_id: stable_id(&IdentityKey::extension(stereotype, &metaclass.name)),
            native,
        }
    }
}

/// Two-phase extension construction: reference the metaclass, then bind.
///
/// Implementations may have a privileged native binding path (a toolkit API,
/// a registry). The manager probes [`supports_native`] and falls back to
/// manual construction when the probe or the native bind fails.
///
/// [`supports_native`]: ExtensionBuilder::supports_native
pub trait ExtensionBuilder {
    /// Phase one: resolve a metaclass by name.
    fn reference_metaclass(&mut self, name: &str) -> Result<MetaclassRef, ExtensionError>;

    /// Capability probe for the native binding path.
    fn supports_native(&self, metaclass: &MetaclassRef) -> bool;

    /// Phase two, native path: create the binding in one step.
    fn bind_native(
        &mut self,
        stereotype: &str,
        metaclass: &MetaclassRef,
    ) -> Result<ExtensionBinding, ExtensionError>;
}

/// Default builder over the fixed metaclass catalog. Its native path is the
/// shared construction; it exists so that the probe-and-fallback protocol is
/// exercised uniformly.
#[derive(Debug, Default)]
pub struct NativeExtensionBuilder;

impl ExtensionBuilder for NativeExtensionBuilder {
    fn reference_metaclass(&mut self, name: &str) -> Result<MetaclassRef, ExtensionError> {
        if !KNOWN_METACLASSES.contains(&name) {
            return Err(ExtensionError::UnknownMetaclass(name.to_string()));
        }
        trace!(metaclass = name, "referenced metaclass");
        Ok(MetaclassRef {
            name: name.to_string(),
            required: false,
        })
    }

    fn supports_native(&self, _metaclass: &MetaclassRef) -> bool {
        true
    }

    fn bind_native(
        &mut self,
        stereotype: &str,
        metaclass: &MetaclassRef,
    ) -> Result<ExtensionBinding, ExtensionError> {
        Ok(ExtensionBinding::construct(stereotype, metaclass, true))
    }
}
