use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// One entry in the `threads` list of an addEvents payload.
///
/// `id` is a native JSON number on the wire; only event-level fields are
/// string-encoded by the ingestion contract.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThreadEntry {
    pub id: u64,
    pub name: String,
}

/// Maps each distinct tag to a stable small integer id and human-readable
/// name for the lifetime of a session. Ids are assigned in first-seen order
/// starting at 1 and are never reassigned or reclaimed.
#[derive(Debug)]
pub struct ThreadRegistry {
    ids: HashMap<String, u64>,
    // First-seen tag order, kept so snapshots are deterministic
    order: Vec<String>,
    next_id: u64,
    source_label: String,
}

impl ThreadRegistry {
    pub fn new(source_label: impl Into<String>) -> Self {
        Self {
            ids: HashMap::new(),
            order: Vec::new(),
            next_id: 1,
            source_label: source_label.into(),
        }
    }

    /// Returns the id for `tag`, assigning the next unused one on first
    /// encounter. Repeated calls with the same tag return the same id.
    pub fn id_for(&mut self, tag: &str) -> u64 {
        if let Some(id) = self.ids.get(tag) {
            return *id;
        }

        let id = self.next_id;
        self.next_id += 1;
        self.ids.insert(tag.to_string(), id);
        self.order.push(tag.to_string());
        id
    }

    /// Snapshot of every tag seen so far, in first-seen order.
    pub fn snapshot(&self) -> Vec<ThreadEntry> {
        self.order
            .iter()
            .map(|tag| ThreadEntry {
                id: self.ids[tag],
                name: format!("{}: {}", self.source_label, tag),
            })
            .collect()
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}
