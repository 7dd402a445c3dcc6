//! The bidirectional relationship merge engine.
//!
//! Field-by-field construction yields two independent one-directional edges
//! for one real bidirectional relationship. Merging collapses them, but only
//! under unambiguous evidence: a `mappedBy` naming match in either direction,
//! or a strict uniqueness count on both sides. Anything ambiguous stays
//! unmerged; placeholder ends on unmerged edges survive to the output.

use rustc_hash::FxHashMap;
use tracing::debug;

use crate::graph::{Edge, EdgeEnd, EdgeId};

/// Undirected pair key: the two qualified names in sorted order.
pub fn pair_key(a: &str, b: &str) -> (String, String) {
    if a <= b {
        (a.to_string(), b.to_string())
    } else {
        (b.to_string(), a.to_string())
    }
}

/// One indexed relationship field. Append-only; never mutated.
#[derive(Debug, Clone)]
pub struct MergeRecord {
    pub owner_qn: String,
    pub field_name: String,
    pub target_qn: String,
    /// Inverse field name this edge expects on the target, from `mappedBy`.
    pub expected_inverse: Option<String>,
    pub edge: EdgeId,
}

/// Index of relationship-marked fields by undirected type pair. Only fields
/// carrying a domain relationship marker participate; policy-resolved plain
/// edges never merge.
#[derive(Debug, Default)]
pub struct MergeIndex {
    records: FxHashMap<(String, String), Vec<MergeRecord>>,
}

impl MergeIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a record for a freshly created edge.
    pub fn add(&mut self, record: MergeRecord) {
        let key = pair_key(&record.owner_qn, &record.target_qn);
        self.records.entry(key).or_default().push(record);
    }

    pub fn records_for(&self, a: &str, b: &str) -> &[MergeRecord] {
        self.records
            .get(&pair_key(a, b))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Try to merge field `field_name` (owner `owner_qn`, resolved target
    /// `target_qn`) into an existing edge between the pair.
    ///
    /// `end` is the field's real classifier-owned end; on success it replaces
    /// the placeholder slot of the chosen edge and a fresh record with no
    /// expected inverse is appended, so later fields cannot re-merge into the
    /// same edge. `count_owner` / `count_target` are the numbers of
    /// relationship fields on each side of the pair targeting the other,
    /// used by the uniqueness heuristic.
    #[allow(clippy::too_many_arguments)]
    pub fn try_merge(
        &mut self,
        edges: &mut [Edge],
        owner_qn: &str,
        field_name: &str,
        target_qn: &str,
        mapped_by: Option<&str>,
        end: EdgeEnd,
        count_owner: usize,
        count_target: usize,
    ) -> Option<EdgeId> {
        let candidate = self.find_candidate(
            edges,
            owner_qn,
            field_name,
            target_qn,
            mapped_by,
            count_owner,
            count_target,
        )?;

        let edge = edges.get_mut(candidate.index())?;
        if !edge.fill_placeholder(end) {
            return None;
        }
        debug!(
            owner = owner_qn,
            field = field_name,
            target = target_qn,
            edge = candidate.0,
            "merged into existing edge"
        );
        self.add(MergeRecord {
            owner_qn: owner_qn.to_string(),
            field_name: field_name.to_string(),
            target_qn: target_qn.to_string(),
            expected_inverse: None,
            edge: candidate,
        });
        Some(candidate)
    }

    fn find_candidate(
        &self,
        edges: &[Edge],
        owner_qn: &str,
        field_name: &str,
        target_qn: &str,
        mapped_by: Option<&str>,
        count_owner: usize,
        count_target: usize,
    ) -> Option<EdgeId> {
        // Candidate records are those declared from the opposite side, whose
        // edge still has its placeholder and no end owned by the current
        // type (the idempotency guard: a previously merged edge must not be
        // touched again).
        let candidates: Vec<&MergeRecord> = self
            .records_for(owner_qn, target_qn)
            .iter()
            .filter(|r| r.owner_qn == target_qn && r.target_qn == owner_qn)
            .filter(|r| {
                edges.get(r.edge.index()).is_some_and(|e| {
                    !e.has_end_owned_by(owner_qn) && e.placeholder_slot().is_some()
                })
            })
            .collect();

        // Rule 1: this field names its inverse; attach to that exact field's
        // edge.
        if let Some(mb) = mapped_by {
            return candidates.iter().find(|r| r.field_name == mb).map(|r| r.edge);
        }

        // Rule 2: an earlier edge named this field as its expected inverse.
        if let Some(record) = candidates
            .iter()
            .find(|r| r.expected_inverse.as_deref() == Some(field_name))
        {
            return Some(record.edge);
        }

        // Rule 3: no mappedBy on either side. Merge only when each side has
        // exactly one relationship field targeting the other.
        if count_owner == 1 && count_target == 1 {
            let plain: Vec<&&MergeRecord> = candidates
                .iter()
                .filter(|r| r.expected_inverse.is_none())
                .collect();
            if let [single] = plain.as_slice() {
                return Some(single.edge);
            }
        }

        None
    }
}
