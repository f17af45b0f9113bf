//! The live document: owns an [`EmojiArt`] and keeps storage in sync.
//!
//! Every intent follows the same two steps: apply the mutation to the model,
//! then commit it. Committing queues a [`DocumentChange`] for observers
//! (drained with [`ArtDocument::take_changes`]) and writes the document
//! through to storage. A failed write is logged and otherwise ignored; the
//! in-memory document stays authoritative.

use url::Url;

use crate::storage::DOCUMENT_KEY;
use crate::{ArtResult, DocumentChange, Emoji, EmojiArt, EmojiId, Position, Storage};

/// Owner of the single live Emoji Art document.
#[derive(Debug)]
pub struct ArtDocument {
    art: EmojiArt,
    storage: Box<dyn Storage>,
    changes: Vec<DocumentChange>,
}

impl ArtDocument {
    /// Open the document stored in `storage`.
    ///
    /// Missing or malformed data yields an empty document.
    #[must_use]
    pub fn open(storage: impl Storage + 'static) -> Self {
        let art = match storage.read(DOCUMENT_KEY) {
            Ok(Some(bytes)) => match EmojiArt::from_json(&bytes) {
                Ok(art) => {
                    tracing::info!("Loaded document with {} emoji", art.len());
                    art
                }
                Err(e) => {
                    tracing::warn!("Ignoring malformed document: {e}");
                    EmojiArt::new()
                }
            },
            Ok(None) => {
                tracing::info!("No stored document, starting empty");
                EmojiArt::new()
            }
            Err(e) => {
                tracing::warn!("Failed to read stored document: {e}");
                EmojiArt::new()
            }
        };
        Self::with_art(art, storage)
    }

    /// Wrap an existing model without reading storage.
    #[must_use]
    pub fn with_art(art: EmojiArt, storage: impl Storage + 'static) -> Self {
        Self {
            art,
            storage: Box::new(storage),
            changes: Vec::new(),
        }
    }

    /// The underlying model.
    #[must_use]
    pub fn art(&self) -> &EmojiArt {
        &self.art
    }

    /// All emoji in drawing order.
    #[must_use]
    pub fn emojis(&self) -> &[Emoji] {
        self.art.emojis()
    }

    /// The background image, if any.
    #[must_use]
    pub fn background(&self) -> Option<&Url> {
        self.art.background()
    }

    /// Current index of the emoji with the given id.
    #[must_use]
    pub fn index_of(&self, id: EmojiId) -> Option<usize> {
        self.art.index_of(id)
    }

    /// Get an emoji by id.
    #[must_use]
    pub fn emoji(&self, id: EmojiId) -> Option<&Emoji> {
        self.art.emoji(id)
    }

    // -----------------------------------------------------------------------
    // Intents
    // -----------------------------------------------------------------------

    /// Replace the background image.
    pub fn set_background(&mut self, background: Option<Url>) {
        self.art.set_background(background.clone());
        self.commit(DocumentChange::BackgroundSet { background });
    }

    /// Place a new emoji. `size` is truncated to whole points.
    ///
    /// Returns `None` once no ids are left.
    #[allow(clippy::cast_possible_truncation)] // Point sizes are whole numbers
    pub fn add_emoji(&mut self, emoji: &str, position: Position, size: f64) -> Option<EmojiId> {
        let id = match self.art.add_emoji(emoji, position, size as i32) {
            Ok(id) => id,
            Err(e) => {
                tracing::warn!("Add rejected: {e}");
                return None;
            }
        };
        tracing::debug!("Added {emoji} as #{id} at {position}");
        if let Some(added) = self.art.emoji(id).cloned() {
            self.commit(DocumentChange::EmojiAdded { emoji: added });
        }
        Some(id)
    }

    /// Move the emoji at `index`. Returns `false` if the index is stale.
    pub fn move_emoji(&mut self, index: usize, position: Position) -> bool {
        match self.art.move_emoji(index, position) {
            Ok(()) => {
                let id = self.art.emojis()[index].id;
                self.commit(DocumentChange::EmojiMoved { id, position });
                true
            }
            Err(e) => {
                tracing::warn!("Move rejected: {e}");
                false
            }
        }
    }

    /// Resize the emoji at `index`. Returns `false` if the index is stale.
    pub fn resize_emoji(&mut self, index: usize, size: i32) -> bool {
        match self.art.resize_emoji(index, size) {
            Ok(()) => {
                let id = self.art.emojis()[index].id;
                self.commit(DocumentChange::EmojiResized { id, size });
                true
            }
            Err(e) => {
                tracing::warn!("Resize rejected: {e}");
                false
            }
        }
    }

    /// Remove the emoji at `index`. Returns the removed emoji, if any.
    pub fn remove_emoji(&mut self, index: usize) -> Option<Emoji> {
        match self.art.remove_emoji(index) {
            Ok(emoji) => {
                tracing::debug!("Removed {} (#{})", emoji.emoji, emoji.id);
                self.commit(DocumentChange::EmojiRemoved {
                    emoji: emoji.clone(),
                });
                Some(emoji)
            }
            Err(e) => {
                tracing::warn!("Remove rejected: {e}");
                None
            }
        }
    }

    /// Move the emoji with the given id, resolving its index first.
    pub fn move_emoji_by_id(&mut self, id: EmojiId, position: Position) -> bool {
        self.index_of(id)
            .is_some_and(|index| self.move_emoji(index, position))
    }

    /// Resize the emoji with the given id, resolving its index first.
    pub fn resize_emoji_by_id(&mut self, id: EmojiId, size: i32) -> bool {
        self.index_of(id)
            .is_some_and(|index| self.resize_emoji(index, size))
    }

    /// Remove the emoji with the given id, resolving its index first.
    pub fn remove_emoji_by_id(&mut self, id: EmojiId) -> Option<Emoji> {
        let index = self.index_of(id)?;
        self.remove_emoji(index)
    }

    // -----------------------------------------------------------------------
    // Notifications and persistence
    // -----------------------------------------------------------------------

    /// Drain the changes committed since the last call.
    pub fn take_changes(&mut self) -> Vec<DocumentChange> {
        std::mem::take(&mut self.changes)
    }

    /// Write the document to storage.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or the storage write fails.
    pub fn save(&self) -> ArtResult<()> {
        let json = self.art.to_json()?;
        self.storage.write(DOCUMENT_KEY, &json)
    }

    fn commit(&mut self, change: DocumentChange) {
        self.changes.push(change);
        self.autosave();
    }

    fn autosave(&self) {
        if let Err(e) = self.save() {
            tracing::warn!("Error saving emoji art document: {e}");
        }
    }
}
