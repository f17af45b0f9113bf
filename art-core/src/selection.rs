//! Multi-select set of emoji ids.

use crate::EmojiId;

/// The set of selected emoji.
///
/// Keys live in a small `Vec` in the order they were selected; uniqueness is
/// enforced by toggling. Nothing here is persisted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    ids: Vec<EmojiId>,
}

impl Selection {
    /// Create an empty selection.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Flip membership of `id`. Returns `true` if it is now selected.
    pub fn toggle(&mut self, id: EmojiId) -> bool {
        if let Some(index) = self.ids.iter().position(|&selected| selected == id) {
            self.ids.remove(index);
            false
        } else {
            self.ids.push(id);
            true
        }
    }

    /// Drop `id` from the selection. Returns `true` if it was selected.
    pub fn remove(&mut self, id: EmojiId) -> bool {
        let before = self.ids.len();
        self.ids.retain(|&selected| selected != id);
        self.ids.len() != before
    }

    /// Deselect everything.
    pub fn clear(&mut self) {
        self.ids.clear();
    }

    /// Check if `id` is selected.
    #[must_use]
    pub fn contains(&self, id: EmojiId) -> bool {
        self.ids.contains(&id)
    }

    /// Selected ids in selection order.
    pub fn iter(&self) -> impl Iterator<Item = EmojiId> + '_ {
        self.ids.iter().copied()
    }

    /// Number of selected emoji.
    #[must_use]
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    /// Check if nothing is selected.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}
