//! Ordered result list plus local-only edits.

use std::collections::HashSet;
use std::time::{SystemTime, UNIX_EPOCH};

use crate::model::types::{ItemId, UserRecord};

#[derive(Debug, Clone)]
pub struct ResultListStore {
    items: Vec<UserRecord>,
    /// Millisecond timestamp taken when the store was created; part of every
    /// synthesized id.
    session_start_ms: u128,
    next_copy: u64,
}

impl Default for ResultListStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ResultListStore {
    pub fn new() -> Self {
        let now = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_millis();
        Self::with_session_start(now)
    }

    /// Store with a fixed session timestamp; ids become predictable.
    pub fn with_session_start(session_start_ms: u128) -> Self {
        Self {
            items: Vec::new(),
            session_start_ms,
            next_copy: 0,
        }
    }

    pub fn items(&self) -> &[UserRecord] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn get(&self, id: &ItemId) -> Option<&UserRecord> {
        self.items.iter().find(|item| &item.id == id)
    }

    pub fn ids(&self) -> impl Iterator<Item = &ItemId> {
        self.items.iter().map(|item| &item.id)
    }

    pub fn replace(&mut self, items: Vec<UserRecord>) {
        self.items = items;
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Append a copy of every selected item, in list order, each with a
    /// fresh id. Returns the ids that were created.
    pub fn duplicate_selected(&mut self, selection: &HashSet<ItemId>) -> Vec<ItemId> {
        let originals: Vec<UserRecord> = self
            .items
            .iter()
            .filter(|item| selection.contains(&item.id))
            .cloned()
            .collect();
        if originals.is_empty() {
            return Vec::new();
        }

        let mut taken: HashSet<ItemId> = self.ids().cloned().collect();
        let mut created = Vec::with_capacity(originals.len());
        for original in originals {
            let id = self.fresh_id(&original.id, &taken);
            taken.insert(id.clone());
            created.push(id.clone());
            self.items.push(original.with_id(id));
        }
        tracing::debug!(count = created.len(), "duplicated selected items");
        created
    }

    /// Remove every item whose id is in `selection`, keeping the relative
    /// order of the rest. Returns how many were removed.
    pub fn delete_selected(&mut self, selection: &HashSet<ItemId>) -> usize {
        let before = self.items.len();
        self.items.retain(|item| !selection.contains(&item.id));
        let removed = before - self.items.len();
        tracing::debug!(removed, "deleted selected items");
        removed
    }

    fn fresh_id(&mut self, base: &ItemId, taken: &HashSet<ItemId>) -> ItemId {
        loop {
            let candidate = ItemId::Text(format!(
                "{base}-{}-{}",
                self.session_start_ms, self.next_copy
            ));
            self.next_copy += 1;
            if !taken.contains(&candidate) {
                return candidate;
            }
        }
    }
}
