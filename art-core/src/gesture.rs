//! Recognized gestures delivered to the interaction controller.
//!
//! Raw pointer handling happens elsewhere; these are the already-recognized
//! values (a drag translation, a pinch scale, a tap target). Several gesture
//! families can be in flight at once, so they are grouped per event in a
//! [`GestureFrame`] and the controller applies every family present.

use serde::{Deserialize, Serialize};

use crate::{EmojiId, Offset};

/// Phase of a continuous gesture.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GesturePhase {
    /// The gesture is in progress; the value is the total so far.
    Changed,
    /// The pointer was released; the value is final.
    Ended,
}

/// Update of a continuous gesture carrying its running value.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GestureUpdate<T> {
    /// Running value since the gesture began.
    pub value: T,
    /// Whether the gesture is still in progress.
    pub phase: GesturePhase,
}

impl<T> GestureUpdate<T> {
    /// An in-progress update.
    #[must_use]
    pub const fn changed(value: T) -> Self {
        Self {
            value,
            phase: GesturePhase::Changed,
        }
    }

    /// A final update.
    #[must_use]
    pub const fn ended(value: T) -> Self {
        Self {
            value,
            phase: GesturePhase::Ended,
        }
    }

    /// Check if this update finishes the gesture.
    #[must_use]
    pub fn is_ended(&self) -> bool {
        self.phase == GesturePhase::Ended
    }
}

/// What a tap landed on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "on", rename_all = "snake_case")]
pub enum TapTarget {
    /// Empty canvas or background image.
    Background,
    /// A placed emoji.
    Emoji {
        /// The tapped emoji.
        id: EmojiId,
    },
}

/// A single recognized gesture.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Gesture {
    /// Drag on the canvas background.
    Pan {
        /// Translation in viewport pixels.
        translation: Offset,
        /// Gesture phase.
        phase: GesturePhase,
    },

    /// Two-finger pinch.
    Pinch {
        /// Scale factor (1.0 = no change).
        scale: f64,
        /// Gesture phase.
        phase: GesturePhase,
    },

    /// Drag starting on a selected emoji.
    EmojiDrag {
        /// Translation in viewport pixels.
        translation: Offset,
        /// Gesture phase.
        phase: GesturePhase,
    },

    /// Single tap.
    Tap(TapTarget),

    /// The pointer stream ended without a release.
    Cancel,
}

/// Every gesture family active during one event.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GestureFrame {
    /// Background drag, if active.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pan: Option<GestureUpdate<Offset>>,
    /// Pinch, if active.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pinch: Option<GestureUpdate<f64>>,
    /// Emoji drag, if active.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub drag: Option<GestureUpdate<Offset>>,
    /// Tap, if one was recognized.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tap: Option<TapTarget>,
}

impl GestureFrame {
    /// An empty frame.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a pan update.
    #[must_use]
    pub fn with_pan(mut self, update: GestureUpdate<Offset>) -> Self {
        self.pan = Some(update);
        self
    }

    /// Add a pinch update.
    #[must_use]
    pub fn with_pinch(mut self, update: GestureUpdate<f64>) -> Self {
        self.pinch = Some(update);
        self
    }

    /// Add an emoji drag update.
    #[must_use]
    pub fn with_drag(mut self, update: GestureUpdate<Offset>) -> Self {
        self.drag = Some(update);
        self
    }

    /// Add a tap.
    #[must_use]
    pub fn with_tap(mut self, target: TapTarget) -> Self {
        self.tap = Some(target);
        self
    }

    /// Check if no gesture family is active.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pan.is_none() && self.pinch.is_none() && self.drag.is_none() && self.tap.is_none()
    }
}

impl From<Gesture> for GestureFrame {
    fn from(gesture: Gesture) -> Self {
        let frame = Self::new();
        match gesture {
            Gesture::Pan { translation, phase } => frame.with_pan(GestureUpdate {
                value: translation,
                phase,
            }),
            Gesture::Pinch { scale, phase } => frame.with_pinch(GestureUpdate {
                value: scale,
                phase,
            }),
            Gesture::EmojiDrag { translation, phase } => frame.with_drag(GestureUpdate {
                value: translation,
                phase,
            }),
            Gesture::Tap(target) => frame.with_tap(target),
            Gesture::Cancel => frame,
        }
    }
}
