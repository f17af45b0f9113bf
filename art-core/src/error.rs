//! Error types for Emoji Art operations.

use thiserror::Error;

/// Result type for Emoji Art operations.
pub type ArtResult<T> = Result<T, ArtError>;

/// Errors that can occur in document, palette, and storage operations.
#[derive(Debug, Error)]
pub enum ArtError {
    /// An index did not address an element of the collection.
    #[error("Index {index} out of bounds (len {len})")]
    IndexOutOfBounds {
        /// The requested index.
        index: usize,
        /// The collection length at the time of the request.
        len: usize,
    },

    /// No emoji with the given id is in the document.
    #[error("Emoji not found: {0}")]
    EmojiNotFound(String),

    /// No palette in the store matched the given id or name.
    #[error("Palette not found: {0}")]
    PaletteNotFound(String),

    /// Every emoji id has been handed out.
    #[error("No emoji ids left")]
    IdSpaceExhausted,

    /// The operation would leave the palette store empty.
    #[error("Palette store cannot be empty")]
    EmptyPaletteStore,

    /// A string could not be parsed as an absolute URL.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// Document or palette serialization/deserialization error.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// An I/O error occurred during persistence.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
