//! # Emoji Art Core
//!
//! Document model, palettes, and gesture handling for Emoji Art: emoji and a
//! background image dragged onto a pannable, zoomable canvas.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │                  art-core                   │
//! ├─────────────────────────────────────────────┤
//! │  Interaction       │  Drag & Drop           │
//! │  - Pan / zoom      │  - Transfer items      │
//! │  - Selection       │  - Payload classes     │
//! │  - Batch edits     │  - Drop targets        │
//! ├─────────────────────────────────────────────┤
//! │  Document          │  Palettes              │
//! │  - Emoji / ids     │  - Dedup by grapheme   │
//! │  - Write-through   │  - Ring cursor         │
//! └─────────────────────────────────────────────┘
//! ```
//!
//! Data flows one way: gestures reach the [`InteractionController`], which
//! maps viewport pixels to document [`Position`]s and calls intents on the
//! [`ArtDocument`]. The document applies each intent, queues a
//! [`DocumentChange`], and writes itself through to its [`Storage`].

#![forbid(unsafe_code)]
#![deny(missing_docs)]
#![deny(clippy::all)]
#![deny(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod art;
pub mod change;
pub mod controller;
pub mod document;
pub mod emoji;
pub mod error;
pub mod gesture;
pub mod palette;
pub mod palette_store;
pub mod payload;
pub mod position;
pub mod schema;
pub mod selection;
pub mod storage;

pub use art::EmojiArt;
pub use change::DocumentChange;
pub use controller::{ControllerConfig, InteractionController};
pub use document::ArtDocument;
pub use emoji::{Emoji, EmojiId};
pub use error::{ArtError, ArtResult};
pub use gesture::{Gesture, GestureFrame, GesturePhase, GestureUpdate, TapTarget};
pub use palette::{dedup_emojis, Palette, PaletteId};
pub use palette_store::{bounds_checked_index, PaletteStore};
pub use payload::{DropPayload, DropTarget, TransferItem};
pub use position::{Offset, Position, ViewportPoint, ViewportSize};
pub use schema::ArtRecord;
pub use selection::Selection;
pub use storage::{FileStorage, MemoryStorage, Storage};

/// Art core version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
