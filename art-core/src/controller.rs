//! Interaction controller: turns gestures and drops into document edits.
//!
//! The controller owns the transient view state (committed zoom and pan,
//! in-flight gesture deltas, and the selection). None of it is persisted;
//! a new controller starts at zoom 1 with no pan.
//!
//! Pan, pinch, emoji drag, and tap are independent. Every family present in
//! a [`GestureFrame`] is applied, so a pinch and a pan can run together.
//! With an empty selection a pinch zooms the canvas; with a selection it
//! resizes every selected emoji instead and leaves the zoom alone.

use url::Url;

use crate::{
    ArtDocument, DropPayload, DropTarget, Emoji, EmojiId, Gesture, GestureFrame, GestureUpdate,
    Offset, Position, Selection, TapTarget, TransferItem, ViewportPoint, ViewportSize,
};

/// Tunables for the interaction controller.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ControllerConfig {
    /// On-screen point size of emoji in the palette; dropped emoji keep this
    /// apparent size at the current zoom.
    pub palette_emoji_size: f64,
    /// Smallest size an emoji can be given by a drop or a pinch.
    pub min_emoji_size: i32,
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self {
            palette_emoji_size: 40.0,
            min_emoji_size: 1,
        }
    }
}

/// Transient view state and gesture handling for one document view.
#[derive(Debug, Clone)]
pub struct InteractionController {
    config: ControllerConfig,
    zoom: f64,
    pan: Offset,
    gesture_zoom: f64,
    gesture_pan: Offset,
    gesture_drag: Offset,
    selection: Selection,
}

impl Default for InteractionController {
    fn default() -> Self {
        Self::new(ControllerConfig::default())
    }
}

impl InteractionController {
    /// Create a controller at zoom 1 with no pan and nothing selected.
    #[must_use]
    pub fn new(config: ControllerConfig) -> Self {
        Self {
            config,
            zoom: 1.0,
            pan: Offset::ZERO,
            gesture_zoom: 1.0,
            gesture_pan: Offset::ZERO,
            gesture_drag: Offset::ZERO,
            selection: Selection::new(),
        }
    }

    /// Start from an already committed zoom and pan.
    #[must_use]
    pub fn with_view(mut self, zoom: f64, pan: Offset) -> Self {
        if zoom.is_finite() && zoom > 0.0 {
            self.zoom = zoom;
        } else {
            tracing::warn!("Ignoring invalid zoom {zoom}");
        }
        self.pan = pan;
        self
    }

    /// The controller's configuration.
    #[must_use]
    pub fn config(&self) -> &ControllerConfig {
        &self.config
    }

    /// Committed canvas zoom.
    #[must_use]
    pub fn zoom(&self) -> f64 {
        self.zoom
    }

    /// Committed canvas pan.
    #[must_use]
    pub fn pan(&self) -> Offset {
        self.pan
    }

    /// In-flight pinch scale (1.0 when no pinch is active).
    #[must_use]
    pub fn gesture_zoom(&self) -> f64 {
        self.gesture_zoom
    }

    /// In-flight pan translation.
    #[must_use]
    pub fn gesture_pan(&self) -> Offset {
        self.gesture_pan
    }

    /// In-flight drag translation applied to selected emoji.
    #[must_use]
    pub fn gesture_drag(&self) -> Offset {
        self.gesture_drag
    }

    /// The selected emoji.
    #[must_use]
    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    /// Canvas zoom to display, including an in-flight pinch when the pinch
    /// is zooming the canvas.
    #[must_use]
    pub fn effective_zoom(&self) -> f64 {
        if self.selection.is_empty() {
            self.zoom * self.gesture_zoom
        } else {
            self.zoom
        }
    }

    /// Canvas pan to display, including an in-flight pan.
    #[must_use]
    pub fn effective_pan(&self) -> Offset {
        self.pan + self.gesture_pan
    }

    // -----------------------------------------------------------------------
    // Display mapping
    // -----------------------------------------------------------------------

    /// Where the background image is centered.
    #[must_use]
    pub fn background_viewport_point(&self, viewport: ViewportSize) -> ViewportPoint {
        Position::ORIGIN.to_transformed_viewport(
            viewport.center(),
            self.effective_pan(),
            self.effective_zoom(),
        )
    }

    /// Where `emoji` is drawn, including in-flight pan, zoom, and drag.
    #[must_use]
    pub fn emoji_viewport_point(&self, emoji: &Emoji, viewport: ViewportSize) -> ViewportPoint {
        let zoom = self.effective_zoom();
        let point = emoji
            .position
            .to_transformed_viewport(viewport.center(), self.effective_pan(), zoom);
        if self.selection.contains(emoji.id) {
            point + self.gesture_drag * zoom
        } else {
            point
        }
    }

    /// Point size `emoji` is drawn at, including an in-flight pinch.
    #[must_use]
    pub fn emoji_display_size(&self, emoji: &Emoji) -> f64 {
        let scale = if self.selection.contains(emoji.id) {
            self.effective_zoom() * self.gesture_zoom
        } else {
            self.effective_zoom()
        };
        emoji.font_size(scale)
    }

    /// Document position under a viewport location, using committed pan and
    /// zoom.
    #[must_use]
    pub fn document_position(&self, location: ViewportPoint, viewport: ViewportSize) -> Position {
        Position::from_viewport(location, viewport.center(), self.pan, self.zoom)
    }

    // -----------------------------------------------------------------------
    // Gestures
    // -----------------------------------------------------------------------

    /// Apply one recognized gesture.
    pub fn handle(&mut self, gesture: Gesture, document: &mut ArtDocument, viewport: ViewportSize) {
        if gesture == Gesture::Cancel {
            self.cancel();
        } else {
            self.handle_frame(&GestureFrame::from(gesture), document, viewport);
        }
    }

    /// Apply every gesture family present in `frame`.
    pub fn handle_frame(
        &mut self,
        frame: &GestureFrame,
        document: &mut ArtDocument,
        viewport: ViewportSize,
    ) {
        self.prune_selection(document);
        if let Some(update) = frame.pan {
            self.handle_pan(update);
        }
        if let Some(update) = frame.pinch {
            self.handle_pinch(update, document);
        }
        if let Some(update) = frame.drag {
            self.handle_drag(update, document, viewport);
        }
        if let Some(target) = frame.tap {
            self.handle_tap(target, document);
        }
    }

    /// Drop all in-flight deltas without committing anything.
    pub fn cancel(&mut self) {
        self.gesture_zoom = 1.0;
        self.gesture_pan = Offset::ZERO;
        self.gesture_drag = Offset::ZERO;
    }

    fn handle_pan(&mut self, update: GestureUpdate<Offset>) {
        if update.is_ended() {
            self.pan += update.value;
            self.gesture_pan = Offset::ZERO;
            tracing::debug!("Pan committed: {:?}", self.pan);
        } else {
            self.gesture_pan = update.value;
        }
    }

    fn handle_pinch(&mut self, update: GestureUpdate<f64>, document: &mut ArtDocument) {
        let scale = update.value;
        if !(scale.is_finite() && scale > 0.0) {
            tracing::warn!("Ignoring invalid pinch scale {scale}");
            return;
        }
        if !update.is_ended() {
            self.gesture_zoom = scale;
            return;
        }

        self.gesture_zoom = 1.0;
        if self.selection.is_empty() {
            self.zoom *= scale;
            tracing::debug!("Zoom committed: {}", self.zoom);
        } else {
            self.resize_selection(scale, document);
        }
    }

    fn handle_drag(
        &mut self,
        update: GestureUpdate<Offset>,
        document: &mut ArtDocument,
        viewport: ViewportSize,
    ) {
        if self.selection.is_empty() {
            self.gesture_drag = Offset::ZERO;
            return;
        }
        if update.is_ended() {
            self.gesture_drag = Offset::ZERO;
            self.move_selection(update.value, document, viewport);
        } else {
            self.gesture_drag = update.value;
        }
    }

    fn handle_tap(&mut self, target: TapTarget, document: &ArtDocument) {
        match target {
            TapTarget::Background => {
                self.selection.clear();
            }
            TapTarget::Emoji { id } => {
                if document.index_of(id).is_some() {
                    let selected = self.selection.toggle(id);
                    tracing::debug!("Emoji #{id} selected: {selected}");
                } else {
                    tracing::warn!("Tap on unknown emoji #{id}");
                }
            }
        }
    }

    /// Resize every selected emoji by `scale`, resolving each index by id.
    #[allow(clippy::cast_possible_truncation)] // Rounded point sizes fit in i32
    fn resize_selection(&self, scale: f64, document: &mut ArtDocument) {
        for id in self.selection.iter() {
            let Some(index) = document.index_of(id) else {
                continue;
            };
            let current = document.emojis()[index].size;
            let size = ((scale * f64::from(current)).round() as i32).max(self.config.min_emoji_size);
            document.resize_emoji(index, size);
        }
    }

    /// Move every selected emoji by a viewport-space translation.
    ///
    /// The translation is applied in content space, before zoom, matching
    /// how the drag preview is drawn.
    fn move_selection(&self, translation: Offset, document: &mut ArtDocument, viewport: ViewportSize) {
        let center = viewport.center();
        for id in self.selection.iter() {
            let Some(index) = document.index_of(id) else {
                continue;
            };
            let current = document.emojis()[index].position;
            let point = current.to_transformed_viewport(center, self.pan, self.zoom)
                + translation * self.zoom;
            let position = Position::from_viewport(point, center, self.pan, self.zoom);
            document.move_emoji(index, position);
        }
    }

    fn prune_selection(&mut self, document: &ArtDocument) {
        let stale: Vec<EmojiId> = self
            .selection
            .iter()
            .filter(|&id| document.index_of(id).is_none())
            .collect();
        for id in stale {
            self.selection.remove(id);
        }
    }

    // -----------------------------------------------------------------------
    // Drops
    // -----------------------------------------------------------------------

    /// Handle items dropped on `target` at a viewport location. Returns
    /// whether the drop was accepted.
    pub fn drop_items(
        &mut self,
        target: DropTarget,
        items: &[TransferItem],
        location: ViewportPoint,
        viewport: ViewportSize,
        document: &mut ArtDocument,
    ) -> bool {
        let Some(payload) = target.resolve(items) else {
            tracing::debug!("{target:?} accepts none of {} offered items", items.len());
            return false;
        };
        self.drop_payload(target, payload, location, viewport, document)
    }

    /// Handle an already classified payload dropped on `target`.
    pub fn drop_payload(
        &mut self,
        target: DropTarget,
        payload: DropPayload,
        location: ViewportPoint,
        viewport: ViewportSize,
        document: &mut ArtDocument,
    ) -> bool {
        match (target, payload) {
            (DropTarget::Canvas, DropPayload::Text(emoji)) if emoji.trim().is_empty() => {
                tracing::debug!("Rejected drop of blank text");
                false
            }
            (DropTarget::Canvas, DropPayload::Text(emoji)) => {
                let position = self.document_position(location, viewport);
                let size = (self.config.palette_emoji_size / self.zoom)
                    .max(f64::from(self.config.min_emoji_size));
                document.add_emoji(&emoji, position, size).is_some()
            }
            (DropTarget::Canvas, DropPayload::Url(url)) => {
                self.set_background(url, document);
                true
            }
            (DropTarget::Trash, DropPayload::Emoji(emoji)) => {
                self.selection.remove(emoji.id);
                document.remove_emoji_by_id(emoji.id).is_some()
            }
            (DropTarget::Canvas, DropPayload::Data(bytes)) => {
                tracing::debug!("Rejected drop of {} raw bytes", bytes.len());
                false
            }
            (target, payload) => {
                tracing::debug!("{target:?} rejected {payload:?}");
                false
            }
        }
    }

    fn set_background(&self, url: Url, document: &mut ArtDocument) {
        tracing::debug!("Background dropped: {url}");
        document.set_background(Some(url));
    }
}
