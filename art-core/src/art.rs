//! The Emoji Art document model.

use url::Url;

use crate::{ArtError, ArtRecord, ArtResult, Emoji, EmojiId, Position};

/// An Emoji Art document: an optional background plus placed emoji.
///
/// `emojis` is kept in insertion order, which is also drawing order. Every
/// mutation is addressed by index; callers holding an [`EmojiId`] resolve
/// the index with [`EmojiArt::index_of`] right before mutating.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EmojiArt {
    background: Option<Url>,
    emojis: Vec<Emoji>,
    next_id: u64,
}

impl EmojiArt {
    /// Create an empty document.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn from_parts(background: Option<Url>, emojis: Vec<Emoji>, next_id: u64) -> Self {
        Self {
            background,
            emojis,
            next_id,
        }
    }

    /// The background image, if any.
    #[must_use]
    pub fn background(&self) -> Option<&Url> {
        self.background.as_ref()
    }

    /// Replace the background image.
    pub fn set_background(&mut self, background: Option<Url>) {
        tracing::debug!(
            "Background is now {}",
            background.as_ref().map_or("none", Url::as_str)
        );
        self.background = background;
    }

    /// All emoji in drawing order.
    #[must_use]
    pub fn emojis(&self) -> &[Emoji] {
        &self.emojis
    }

    /// The id the next added emoji will receive.
    #[must_use]
    pub fn next_id(&self) -> EmojiId {
        EmojiId::new(self.next_id)
    }

    /// Append an emoji and return its newly assigned id.
    ///
    /// # Errors
    ///
    /// Returns [`ArtError::IdSpaceExhausted`] once the counter cannot
    /// advance; ids are never reused.
    pub fn add_emoji(
        &mut self,
        emoji: impl Into<String>,
        position: Position,
        size: i32,
    ) -> ArtResult<EmojiId> {
        let id = EmojiId::new(self.next_id);
        self.next_id = self
            .next_id
            .checked_add(1)
            .ok_or(ArtError::IdSpaceExhausted)?;
        self.emojis.push(Emoji::new(emoji, position, size, id));
        Ok(id)
    }

    /// Move the emoji at `index`.
    ///
    /// # Errors
    ///
    /// Returns [`ArtError::IndexOutOfBounds`] if `index` is not valid.
    pub fn move_emoji(&mut self, index: usize, position: Position) -> ArtResult<()> {
        self.emoji_at_mut(index)?.position = position;
        Ok(())
    }

    /// Resize the emoji at `index`.
    ///
    /// The model accepts any size; clamping is the caller's concern.
    ///
    /// # Errors
    ///
    /// Returns [`ArtError::IndexOutOfBounds`] if `index` is not valid.
    pub fn resize_emoji(&mut self, index: usize, size: i32) -> ArtResult<()> {
        self.emoji_at_mut(index)?.size = size;
        Ok(())
    }

    /// Remove the emoji at `index`, shifting later emoji down by one.
    ///
    /// # Errors
    ///
    /// Returns [`ArtError::IndexOutOfBounds`] if `index` is not valid.
    pub fn remove_emoji(&mut self, index: usize) -> ArtResult<Emoji> {
        if index >= self.emojis.len() {
            return Err(self.out_of_bounds(index));
        }
        Ok(self.emojis.remove(index))
    }

    /// Current index of the emoji with the given id.
    #[must_use]
    pub fn index_of(&self, id: EmojiId) -> Option<usize> {
        self.emojis.iter().position(|emoji| emoji.id == id)
    }

    /// Get an emoji by id.
    #[must_use]
    pub fn emoji(&self, id: EmojiId) -> Option<&Emoji> {
        self.emojis.iter().find(|emoji| emoji.id == id)
    }

    /// Number of placed emoji.
    #[must_use]
    pub fn len(&self) -> usize {
        self.emojis.len()
    }

    /// Check if no emoji are placed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.emojis.is_empty()
    }

    /// Serialize the document to JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_json(&self) -> ArtResult<Vec<u8>> {
        serde_json::to_vec(&ArtRecord::from(self)).map_err(ArtError::Serialization)
    }

    /// Deserialize a document from JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if the data is not a valid document record.
    pub fn from_json(json: &[u8]) -> ArtResult<Self> {
        let record: ArtRecord = serde_json::from_slice(json)?;
        record.into_art()
    }

    fn emoji_at_mut(&mut self, index: usize) -> ArtResult<&mut Emoji> {
        let len = self.emojis.len();
        self.emojis
            .get_mut(index)
            .ok_or(ArtError::IndexOutOfBounds { index, len })
    }

    fn out_of_bounds(&self, index: usize) -> ArtError {
        ArtError::IndexOutOfBounds {
            index,
            len: self.emojis.len(),
        }
    }
}
