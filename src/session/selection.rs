//! Multi-select state and the browse/edit mode machine.

use std::collections::HashSet;

use crate::model::types::ItemId;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum EditMode {
    #[default]
    Browsing,
    Editing,
}

#[derive(Debug, Clone, Default)]
pub struct SelectionController {
    selected: HashSet<ItemId>,
    mode: EditMode,
}

impl SelectionController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mode(&self) -> EditMode {
        self.mode
    }

    pub fn is_editing(&self) -> bool {
        self.mode == EditMode::Editing
    }

    pub fn ids(&self) -> &HashSet<ItemId> {
        &self.selected
    }

    pub fn len(&self) -> usize {
        self.selected.len()
    }

    pub fn is_empty(&self) -> bool {
        self.selected.is_empty()
    }

    pub fn is_selected(&self, id: &ItemId) -> bool {
        self.selected.contains(id)
    }

    /// Flip membership of `id`. Returns whether it is selected afterwards.
    pub fn toggle(&mut self, id: &ItemId) -> bool {
        if self.selected.remove(id) {
            false
        } else {
            self.selected.insert(id.clone());
            true
        }
    }

    pub fn select_all<'a>(&mut self, all_ids: impl IntoIterator<Item = &'a ItemId>) {
        self.selected = all_ids.into_iter().cloned().collect();
    }

    pub fn clear(&mut self) {
        self.selected.clear();
    }

    /// Select everything, or clear when everything already is selected.
    ///
    /// `total` is the number of items currently listed.
    pub fn toggle_all<'a>(
        &mut self,
        all_ids: impl IntoIterator<Item = &'a ItemId>,
        total: usize,
    ) {
        if self.selected.len() == total {
            self.clear();
        } else {
            self.select_all(all_ids);
        }
    }

    /// Browsing -> Editing; refused while the list is empty.
    pub fn enter_edit_mode(&mut self, list_len: usize) -> bool {
        if list_len == 0 {
            return false;
        }
        self.mode = EditMode::Editing;
        true
    }

    /// Explicit "done": back to browsing with nothing selected.
    pub fn done(&mut self) {
        self.mode = EditMode::Browsing;
        self.selected.clear();
    }

    /// The list was replaced wholesale; nothing carried over.
    pub fn reset(&mut self) {
        self.done();
    }
}
