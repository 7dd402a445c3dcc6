//! Provenance tags with sorted emission.
//!
//! Tags are computed in whatever order inference happens to visit them and
//! stored in an unordered map; sorting happens at the serialization boundary
//! only. Internal logic never depends on tag order.

use rustc_hash::FxHashMap;

/// A key/value tag map recording why decisions were made.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TagMap {
    inner: FxHashMap<String, String>,
}

impl TagMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.inner.insert(key.into(), value.into());
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.inner.get(key).map(String::as_str)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.inner.contains_key(key)
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    /// Merge another tag map in; later values win on key collisions.
    pub fn extend(&mut self, other: &TagMap) {
        for (k, v) in &other.inner {
            self.inner.insert(k.clone(), v.clone());
        }
    }

    /// Entries in sorted key order. The only way tags leave the crate.
    pub fn sorted(&self) -> Vec<(&str, &str)> {
        let mut entries: Vec<(&str, &str)> = self
            .inner
            .iter()
            .map(|(k, v)| (k.as_str(), v.as_str()))
            .collect();
        entries.sort_by(|a, b| a.0.cmp(b.0));
        entries
    }

    /// Canonical `k1=v1;k2=v2` rendering in sorted key order.
    pub fn render(&self) -> String {
        self.sorted()
            .iter()
            .map(|(k, v)| format!("{k}={v}"))
            .collect::<Vec<_>>()
            .join(";")
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for TagMap {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        let mut tags = TagMap::new();
        for (k, v) in iter {
            tags.insert(k, v);
        }
        tags
    }
}
