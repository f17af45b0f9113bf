//! # Emoji Art CLI
//!
//! Command-line host for Emoji Art. Each invocation opens the document and
//! palette store from a data directory, runs one command, and exits; every
//! edit is written through as it happens.
//!
//! ## Usage
//!
//! ```bash
//! emoji-art add 🤔 --x 200 --y -100 --size 50
//! emoji-art drop 🚗 --at-x 700 --at-y 300 --zoom 2
//! emoji-art background https://example.com/beach.jpg
//! emoji-art replay gestures.jsonl
//! emoji-art palettes list
//! ```
//!
//! ## Architecture
//!
//! - `CliArgs` - Command-line arguments parsed with clap
//! - `ArtConfig` - Data directory, store name, and view configuration
//! - `Workspace` - Open document, palette store, and controller

#![forbid(unsafe_code)]
#![deny(missing_docs)]
#![deny(clippy::all)]
#![deny(clippy::pedantic)]

mod workspace;

pub use workspace::Workspace;

use std::path::PathBuf;

use art_core::{ControllerConfig, Offset, ViewportSize};
use clap::{Parser, Subcommand};

/// Command-line arguments for emoji-art.
#[derive(Debug, Clone, Parser)]
#[command(name = "emoji-art")]
#[command(about = "Place emoji on a pannable, zoomable canvas")]
#[command(version)]
pub struct CliArgs {
    /// Directory holding the document and palette files
    #[arg(long, env = "EMOJI_ART_DATA_DIR", default_value = "./emoji-art-data")]
    pub data_dir: PathBuf,

    /// Name of the palette store to open
    #[arg(long, env = "EMOJI_ART_STORE", default_value = "Main")]
    pub store_name: String,

    /// Viewport width in pixels
    #[arg(long, default_value = "1280")]
    pub width: u32,

    /// Viewport height in pixels
    #[arg(long, default_value = "720")]
    pub height: u32,

    /// Canvas zoom used to place drops and replay gestures
    #[arg(long, default_value = "1.0")]
    pub zoom: f64,

    /// Horizontal canvas pan in pixels
    #[arg(long, default_value = "0.0", allow_negative_numbers = true)]
    pub pan_x: f64,

    /// Vertical canvas pan in pixels
    #[arg(long, default_value = "0.0", allow_negative_numbers = true)]
    pub pan_y: f64,

    /// Command to run (defaults to `show`)
    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Document and palette commands.
#[derive(Debug, Clone, PartialEq, Subcommand)]
pub enum Command {
    /// Print the background and every emoji
    Show,

    /// Place an emoji at a document position
    Add {
        /// The emoji glyph
        emoji: String,
        /// Document x (right is positive)
        #[arg(long, default_value_t = 0, allow_negative_numbers = true)]
        x: i32,
        /// Document y (up is positive)
        #[arg(long, default_value_t = 0, allow_negative_numbers = true)]
        y: i32,
        /// Point size at zoom 1
        #[arg(long, default_value_t = 40.0)]
        size: f64,
    },

    /// Move an emoji to a document position
    Move {
        /// Emoji id
        id: u64,
        /// Document x
        #[arg(allow_negative_numbers = true)]
        x: i32,
        /// Document y
        #[arg(allow_negative_numbers = true)]
        y: i32,
    },

    /// Set an emoji's point size
    Resize {
        /// Emoji id
        id: u64,
        /// New point size
        size: i32,
    },

    /// Remove an emoji
    Remove {
        /// Emoji id
        id: u64,
    },

    /// Set the background image, or clear it when no URL is given
    Background {
        /// Absolute image URL
        url: Option<String>,
    },

    /// Drop a string onto the canvas as a drag-and-drop would
    Drop {
        /// Dropped text: an `http` URL sets the background, anything else
        /// is placed as an emoji
        payload: String,
        /// Viewport x of the drop (defaults to the center)
        #[arg(long, allow_negative_numbers = true)]
        at_x: Option<f64>,
        /// Viewport y of the drop (defaults to the center)
        #[arg(long, allow_negative_numbers = true)]
        at_y: Option<f64>,
    },

    /// Apply recorded gestures, one JSON object per line
    Replay {
        /// Path to the gesture script
        script: PathBuf,
    },

    /// Inspect and edit palettes
    #[command(subcommand)]
    Palettes(PaletteCommand),
}

/// Palette store commands.
#[derive(Debug, Clone, PartialEq, Subcommand)]
pub enum PaletteCommand {
    /// List every palette, marking the current one
    List,

    /// Step the palette cursor and print the palette it lands on
    Next {
        /// Number of palettes to step (negative steps backwards)
        #[arg(long, default_value_t = 1, allow_negative_numbers = true)]
        steps: isize,
    },

    /// Create a palette
    New {
        /// Palette name
        name: String,
        /// Emoji in the palette
        emojis: String,
        /// Insertion index (defaults to the cursor)
        #[arg(long, allow_negative_numbers = true)]
        at: Option<isize>,
    },

    /// Add emoji to the front of a palette
    AddEmojis {
        /// Palette name
        name: String,
        /// Emoji to add
        emojis: String,
    },

    /// Remove a palette
    Remove {
        /// Palette name
        name: String,
    },
}

/// Emoji Art host configuration.
#[derive(Debug, Clone)]
pub struct ArtConfig {
    /// Directory holding the document and palette files.
    pub data_dir: PathBuf,
    /// Palette store name.
    pub store_name: String,
    /// Viewport the canvas is shown in.
    pub viewport: ViewportSize,
    /// Committed canvas zoom.
    pub zoom: f64,
    /// Committed canvas pan.
    pub pan: Offset,
    /// Controller tunables.
    pub controller: ControllerConfig,
}

impl Default for ArtConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl ArtConfig {
    /// Create a configuration with default values.
    #[must_use]
    pub fn new() -> Self {
        Self {
            data_dir: PathBuf::from("./emoji-art-data"),
            store_name: "Main".to_string(),
            viewport: ViewportSize::new(1280.0, 720.0),
            zoom: 1.0,
            pan: Offset::ZERO,
            controller: ControllerConfig::default(),
        }
    }

    /// Use `data_dir` for storage.
    #[must_use]
    pub fn with_data_dir(mut self, data_dir: impl Into<PathBuf>) -> Self {
        self.data_dir = data_dir.into();
        self
    }
}

impl From<CliArgs> for ArtConfig {
    fn from(args: CliArgs) -> Self {
        Self {
            data_dir: args.data_dir,
            store_name: args.store_name,
            viewport: ViewportSize::new(f64::from(args.width), f64::from(args.height)),
            zoom: args.zoom,
            pan: Offset::new(args.pan_x, args.pan_y),
            controller: ControllerConfig::default(),
        }
    }
}
