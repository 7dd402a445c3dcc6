//! The profile container and its idempotent manager.

use indexmap::IndexMap;
use tracing::{debug, warn};

use crate::graph::{IdentityKey, TagMap, stable_id};

use super::extension::{ExtensionBinding, ExtensionBuilder, NativeExtensionBuilder};

/// A string-typed tagged-value slot on a stereotype.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StereotypeAttribute {
    pub name: String,
    pub stable_id: String,
}

/// A stereotype definition owned by the profile.
#[derive(Debug, Clone)]
pub struct Stereotype {
    /// Sanitized, collision-free name. The map key.
    pub name: String,
    /// Disambiguating qualifier, typically the source annotation's qualified
    /// name. Two requests with the same (name, qualifier) reuse one entry.
    pub qualifier: String,
    pub stable_id: String,
    pub attributes: Vec<StereotypeAttribute>,
    pub extensions: Vec<ExtensionBinding>,
}

/// One stereotype applied to one classifier, with tagged values.
#[derive(Debug, Clone)]
pub struct StereotypeApplication {
    pub stereotype: String,
    pub classifier_qn: String,
    pub values: TagMap,
}

/// The profile: stereotypes by final name, applications in creation order.
#[derive(Debug, Clone, Default)]
pub struct Profile {
    pub stereotypes: IndexMap<String, Stereotype>,
    pub applications: Vec<StereotypeApplication>,
}

impl Profile {
    pub fn stereotype(&self, name: &str) -> Option<&Stereotype> {
        self.stereotypes.get(name)
    }

    pub fn application(&self, stereotype: &str, classifier_qn: &str) -> Option<&StereotypeApplication> {
        self.applications
            .iter()
            .find(|a| a.stereotype == stereotype && a.classifier_qn == classifier_qn)
    }
}

/// Reduce a requested name to identifier-safe characters. Anything outside
/// `[A-Za-z0-9_]` becomes `_`; a leading digit gains a `_` prefix.
pub fn sanitize_name(name: &str) -> String {
    let mut out: String = name
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '_' { c } else { '_' })
        .collect();
    if out.is_empty() {
        out.push('_');
    }
    if out.chars().next().is_some_and(|c| c.is_ascii_digit()) {
        out.insert(0, '_');
    }
    out
}

/// Mutating facade over a [`Profile`]. Every operation is idempotent.
pub struct ProfileManager {
    profile: Profile,
    builder: Box<dyn ExtensionBuilder>,
}

impl Default for ProfileManager {
    fn default() -> Self {
        Self::new()
    }
}

impl ProfileManager {
    pub fn new() -> Self {
        Self::with_builder(Box::new(NativeExtensionBuilder))
    }

    pub fn with_builder(builder: Box<dyn ExtensionBuilder>) -> Self {
        Self {
            profile: Profile::default(),
            builder,
        }
    }

    pub fn profile(&self) -> &Profile {
        &self.profile
    }

    pub fn into_profile(self) -> Profile {
        self.profile
    }

    /// Find or create a stereotype, returning its final name.
    ///
    /// The requested name is sanitized first. A slot already held by the
    /// same (name, qualifier) pair is reused. A slot held by a different
    /// qualifier never gets overwritten; the candidate is suffixed with the
    /// sanitized qualifier, then a numeric counter, until a free or matching
    /// slot is found.
    pub fn ensure_stereotype(&mut self, name: &str, qualifier: &str) -> String {
        let base = sanitize_name(name);
        let mut candidate = base.clone();
        let mut attempt = 0u32;
        loop {
            match self.profile.stereotypes.get(&candidate) {
                None => {
                    let key = IdentityKey::stereotype(qualifier, &candidate);
                    self.profile.stereotypes.insert(
                        candidate.clone(),
                        Stereotype {
                            name: candidate.clone(),
                            qualifier: qualifier.to_string(),
                            stable_id: stable_id(&key),
                            attributes: Vec::new(),
                            extensions: Vec::new(),
                        },
                    );
                    if attempt > 0 {
                        warn!(
                            requested = name,
                            qualifier,
                            chosen = %candidate,
                            "stereotype name collision, suffixed"
                        );
                    }
                    return candidate;
                }
                Some(existing) if existing.qualifier == qualifier => return candidate,
                Some(_) => {
                    attempt += 1;
                    candidate = if attempt == 1 {
                        format!("{base}__{}", sanitize_name(qualifier))
                    } else {
                        format!("{base}__{}_{}", sanitize_name(qualifier), attempt)
                    };
                }
            }
        }
    }

    /// Ensure a string-typed tagged-value attribute exists on a stereotype.
    /// Returns false when the stereotype is unknown or the attribute already
    /// exists.
    pub fn ensure_string_attribute(&mut self, stereotype: &str, attr_name: &str) -> bool {
        let Some(st) = self.profile.stereotypes.get_mut(stereotype) else {
            return false;
        };
        let attr_name = sanitize_name(attr_name);
        if st.attributes.iter().any(|a| a.name == attr_name) {
            return false;
        }
        let key = IdentityKey::field(&st.name, &attr_name, "String");
        st.attributes.push(StereotypeAttribute {
            name: attr_name,
            stable_id: stable_id(&key),
        });
        true
    }

    /// Ensure the stereotype extends the given metaclass. Idempotent: an
    /// existing binding for the (stereotype, metaclass) pair is left alone.
    /// Returns true only when a new binding was created.
    pub fn ensure_extends(&mut self, stereotype: &str, metaclass: &str) -> bool {
        let Some(st) = self.profile.stereotypes.get(stereotype) else {
            return false;
        };
        if st.extensions.iter().any(|b| b.metaclass == metaclass) {
            return false;
        }

        let metaclass_ref = match self.builder.reference_metaclass(metaclass) {
            Ok(mc) => mc,
            Err(err) => {
                warn!(stereotype, metaclass, %err, "metaclass reference failed, extension skipped");
                return false;
            }
        };

        let binding = if self.builder.supports_native(&metaclass_ref) {
            match self.builder.bind_native(stereotype, &metaclass_ref) {
                Ok(b) => b,
                Err(err) => {
                    debug!(stereotype, metaclass, %err, "native bind failed, constructing manually");
                    ExtensionBinding::construct(stereotype, &metaclass_ref, false)
                }
            }
        } else {
            ExtensionBinding::construct(stereotype, &metaclass_ref, false)
        };

        match self.profile.stereotypes.get_mut(stereotype) {
            Some(st) => {
                st.extensions.push(binding);
                true
            }
            None => false,
        }
    }

    /// Apply a stereotype to a classifier with tagged values. A second
    /// application of the same pair merges values into the first.
    pub fn apply(&mut self, stereotype: &str, classifier_qn: &str, values: TagMap) -> bool {
        if !self.profile.stereotypes.contains_key(stereotype) {
            return false;
        }
        for attr_name in values.sorted().iter().map(|(k, _)| k.to_string()).collect::<Vec<_>>() {
            self.ensure_string_attribute(stereotype, &attr_name);
        }
        if let Some(existing) = self
            .profile
            .applications
            .iter_mut()
            .find(|a| a.stereotype == stereotype && a.classifier_qn == classifier_qn)
        {
            existing.values.extend(&values);
            return false;
        }
        self.profile.applications.push(StereotypeApplication {
            stereotype: stereotype.to_string(),
            classifier_qn: classifier_qn.to_string(),
            values,
        });
        true
    }
}
