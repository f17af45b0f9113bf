//! Placed emoji - the glyphs positioned on a document.

use serde::{Deserialize, Serialize};

use crate::Position;

/// Identifier of an emoji within one document.
///
/// Assigned from the document's counter at creation and never reused, so it
/// stays valid across removals that shift indices.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EmojiId(u64);

impl EmojiId {
    /// Create from a raw counter value.
    #[must_use]
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    /// The raw counter value.
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for EmojiId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// An emoji placed on the document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Emoji {
    /// The glyph, a single grapheme.
    pub emoji: String,
    /// Location of the glyph's center in document space.
    pub position: Position,
    /// Point size at zoom 1.0.
    pub size: i32,
    /// Stable identity.
    pub id: EmojiId,
}

impl Emoji {
    /// Create an emoji.
    #[must_use]
    pub fn new(emoji: impl Into<String>, position: Position, size: i32, id: EmojiId) -> Self {
        Self {
            emoji: emoji.into(),
            position,
            size,
            id,
        }
    }

    /// Point size of the glyph when drawn at the given scale.
    #[must_use]
    pub fn font_size(&self, scale_factor: f64) -> f64 {
        f64::from(self.size) * scale_factor
    }
}
