//! Change notifications emitted after each committed document mutation.

use serde::{Deserialize, Serialize};
use url::Url;

use crate::{Emoji, EmojiId, Position};

/// A committed mutation of an [`ArtDocument`](crate::ArtDocument).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "change", rename_all = "snake_case")]
pub enum DocumentChange {
    /// The background was replaced.
    BackgroundSet {
        /// New background, if any.
        background: Option<Url>,
    },
    /// An emoji was appended.
    EmojiAdded {
        /// The new emoji.
        emoji: Emoji,
    },
    /// An emoji was moved.
    EmojiMoved {
        /// Moved emoji.
        id: EmojiId,
        /// New position.
        position: Position,
    },
    /// An emoji was resized.
    EmojiResized {
        /// Resized emoji.
        id: EmojiId,
        /// New size.
        size: i32,
    },
    /// An emoji was removed.
    EmojiRemoved {
        /// The removed emoji.
        emoji: Emoji,
    },
}
