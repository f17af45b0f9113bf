//! Interaction Integration Tests
//!
//! Tests the complete gesture flow including:
//! - Drops from the palette and of background URLs
//! - Selection, batch resize, and group moves
//! - Removal through the trash target
//! - Persistence across reopening the document

use art_core::{
    ArtDocument, DocumentChange, DropPayload, DropTarget, EmojiArt, EmojiId, FileStorage, Gesture,
    GestureFrame, GesturePhase, GestureUpdate, InteractionController, MemoryStorage, Offset,
    Palette, PaletteStore, Position, Storage, TapTarget, TransferItem, ViewportPoint,
    ViewportSize,
};

const VIEWPORT: ViewportSize = ViewportSize::new(1024.0, 768.0);

/// Tap an emoji to toggle its selection.
fn tap(id: EmojiId) -> Gesture {
    Gesture::Tap(TapTarget::Emoji { id })
}

/// Finish a pinch at the given scale.
fn pinch_end(scale: f64) -> Gesture {
    Gesture::Pinch {
        scale,
        phase: GesturePhase::Ended,
    }
}

/// Drop a palette glyph onto the canvas.
fn drop_glyph(
    controller: &mut InteractionController,
    document: &mut ArtDocument,
    glyph: &str,
    at: ViewportPoint,
) -> bool {
    controller.drop_items(
        DropTarget::Canvas,
        &[TransferItem::Text(glyph.to_string())],
        at,
        VIEWPORT,
        document,
    )
}

// ============================================================================
// Document Scenarios
// ============================================================================

#[test]
fn test_removal_keeps_remaining_id() {
    let mut document = ArtDocument::open(MemoryStorage::new());
    document.add_emoji("🤔", Position::new(200, -100), 50.0);
    document.add_emoji("🐋", Position::new(-150, 100), 100.0);

    let ids: Vec<_> = document.emojis().iter().map(|e| e.id.get()).collect();
    assert_eq!(ids, vec![0, 1]);

    document.remove_emoji(0);
    assert_eq!(document.emojis().len(), 1);
    assert_eq!(document.emojis()[0].id, EmojiId::new(1));
}

#[test]
fn test_ids_strictly_increase_across_removals() {
    let mut document = ArtDocument::open(MemoryStorage::new());
    let mut seen = Vec::new();
    for round in 0..5 {
        seen.extend(document.add_emoji("🎈", Position::new(round, round), 10.0));
        seen.extend(document.add_emoji("🎉", Position::ORIGIN, 10.0));
        document.remove_emoji(0);
    }
    assert_eq!(seen.len(), 10);
    assert!(seen.windows(2).all(|pair| pair[0] < pair[1]));
}

// ============================================================================
// Gesture Workflow Tests
// ============================================================================

#[test]
fn test_place_select_resize_and_move() {
    let mut document = ArtDocument::open(MemoryStorage::new());
    let mut controller = InteractionController::default();

    assert!(drop_glyph(
        &mut controller,
        &mut document,
        "🚗",
        ViewportPoint::new(612.0, 284.0)
    ));
    assert!(drop_glyph(
        &mut controller,
        &mut document,
        "🚲",
        ViewportPoint::new(412.0, 484.0)
    ));
    let car = document.emojis()[0].clone();
    let bike = document.emojis()[1].clone();
    assert_eq!(car.position, Position::new(100, 100));
    assert_eq!(bike.position, Position::new(-100, -100));
    assert_eq!(car.size, 40);

    controller.handle(tap(car.id), &mut document, VIEWPORT);
    controller.handle(tap(bike.id), &mut document, VIEWPORT);
    controller.handle(pinch_end(1.5), &mut document, VIEWPORT);
    assert!(document.emojis().iter().all(|e| e.size == 60));
    assert!((controller.zoom() - 1.0).abs() < f64::EPSILON);

    controller.handle(
        Gesture::EmojiDrag {
            translation: Offset::new(-30.0, 10.0),
            phase: GesturePhase::Ended,
        },
        &mut document,
        VIEWPORT,
    );
    assert_eq!(
        document.emoji(car.id).map(|e| e.position),
        Some(Position::new(70, 90))
    );
    assert_eq!(
        document.emoji(bike.id).map(|e| e.position),
        Some(Position::new(-130, -110))
    );
}

#[test]
fn test_drop_after_zoom_keeps_apparent_size() {
    let mut document = ArtDocument::open(MemoryStorage::new());
    let mut controller = InteractionController::default();

    controller.handle(pinch_end(4.0), &mut document, VIEWPORT);
    controller.handle(
        Gesture::Pan {
            translation: Offset::new(40.0, 0.0),
            phase: GesturePhase::Ended,
        },
        &mut document,
        VIEWPORT,
    );

    let location = ViewportPoint::new(952.0, 384.0);
    assert!(drop_glyph(&mut controller, &mut document, "🌈", location));
    let rainbow = document.emojis()[0].clone();
    assert_eq!(rainbow.position, Position::new(100, 0));
    assert_eq!(rainbow.size, 10);
    assert_eq!(controller.emoji_viewport_point(&rainbow, VIEWPORT), location);
    assert!((controller.emoji_display_size(&rainbow) - 40.0).abs() < f64::EPSILON);
}

#[test]
fn test_pan_and_pinch_in_one_frame() {
    let mut document = ArtDocument::open(MemoryStorage::new());
    let mut controller = InteractionController::default();

    let in_flight = GestureFrame::new()
        .with_pan(GestureUpdate::changed(Offset::new(12.0, -8.0)))
        .with_pinch(GestureUpdate::changed(2.0));
    controller.handle_frame(&in_flight, &mut document, VIEWPORT);
    assert_eq!(controller.effective_pan(), Offset::new(12.0, -8.0));
    assert!((controller.effective_zoom() - 2.0).abs() < f64::EPSILON);
    assert_eq!(controller.pan(), Offset::ZERO);

    let released = GestureFrame::new()
        .with_pan(GestureUpdate::ended(Offset::new(12.0, -8.0)))
        .with_pinch(GestureUpdate::ended(2.0));
    controller.handle_frame(&released, &mut document, VIEWPORT);
    assert_eq!(controller.pan(), Offset::new(12.0, -8.0));
    assert!((controller.zoom() - 2.0).abs() < f64::EPSILON);
    assert!(document.take_changes().is_empty());
}

#[test]
fn test_url_and_emoji_drops() {
    let mut document = ArtDocument::open(MemoryStorage::new());
    let mut controller = InteractionController::default();

    assert!(controller.drop_payload(
        DropTarget::Canvas,
        DropPayload::from_string("http://example.com/x.png"),
        ViewportPoint::new(0.0, 0.0),
        VIEWPORT,
        &mut document,
    ));
    assert!(drop_glyph(
        &mut controller,
        &mut document,
        "🚗",
        VIEWPORT.center()
    ));

    let changes = document.take_changes();
    assert!(matches!(changes[0], DocumentChange::BackgroundSet { .. }));
    assert!(matches!(changes[1], DocumentChange::EmojiAdded { ref emoji } if emoji.emoji == "🚗"));
    assert_eq!(document.emojis()[0].position, Position::ORIGIN);
}

#[test]
fn test_trash_removes_by_id_after_earlier_removal() {
    let mut document = ArtDocument::open(MemoryStorage::new());
    let mut controller = InteractionController::default();
    document.add_emoji("🍎", Position::new(1, 1), 30.0);
    document.add_emoji("🍄", Position::new(2, 2), 30.0);
    document.add_emoji("🔥", Position::new(3, 3), 30.0);

    // Grab the fire emoji's record, then remove something before it.
    let fire = document.emojis()[2].clone();
    document.remove_emoji(0);

    assert!(controller.drop_items(
        DropTarget::Trash,
        &fire.transfer_items(),
        ViewportPoint::default(),
        VIEWPORT,
        &mut document,
    ));
    let left: Vec<_> = document.emojis().iter().map(|e| e.emoji.as_str()).collect();
    assert_eq!(left, vec!["🍄"]);
}

#[test]
fn test_selection_drops_removed_emoji() {
    let mut document = ArtDocument::open(MemoryStorage::new());
    let mut controller = InteractionController::default();
    let a = document.add_emoji("🦄", Position::ORIGIN, 50.0).expect("added");
    let b = document
        .add_emoji("🌞", Position::new(10, 10), 50.0)
        .expect("added");

    controller.handle(tap(a), &mut document, VIEWPORT);
    controller.handle(tap(b), &mut document, VIEWPORT);
    document.remove_emoji_by_id(a);

    controller.handle(pinch_end(2.0), &mut document, VIEWPORT);
    assert_eq!(controller.selection().len(), 1);
    assert_eq!(document.emoji(b).map(|e| e.size), Some(100));
}

// ============================================================================
// Persistence Tests
// ============================================================================

#[test]
fn test_document_survives_reopen() {
    let dir = tempfile::tempdir().expect("tempdir");
    let kept;
    {
        let storage = FileStorage::new(dir.path()).expect("storage");
        let mut document = ArtDocument::open(storage);
        document.add_emoji("🤔", Position::new(200, -100), 50.0);
        kept = document
            .add_emoji("🐋", Position::new(-150, 100), 100.0)
            .expect("added");
        document.remove_emoji(0);
    }

    let storage = FileStorage::new(dir.path()).expect("storage");
    let mut document = ArtDocument::open(storage);
    assert_eq!(document.emojis().len(), 1);
    assert_eq!(document.emojis()[0].id, kept);
    assert_eq!(
        document.add_emoji("🐝", Position::ORIGIN, 20.0),
        Some(EmojiId::new(2))
    );
}

#[test]
fn test_malformed_document_file_is_ignored() {
    let dir = tempfile::tempdir().expect("tempdir");
    let storage = FileStorage::new(dir.path()).expect("storage");
    storage
        .write("document.emojiart", b"{ definitely not json")
        .expect("write");

    let document = ArtDocument::open(storage);
    assert_eq!(document.art(), &EmojiArt::new());
}

#[test]
fn test_palette_store_survives_reopen() {
    let storage = MemoryStorage::new();
    let new_id = {
        let mut store = PaletteStore::open("Main", storage.clone());
        store.set_palettes(vec![Palette::new("Trucks", "🚚🚒🛻")]).expect("set");
        store.insert_new("Sky", "☁️🌈☁️", None)
    };

    let store = PaletteStore::open("Main", storage.clone());
    assert_eq!(store.len(), 2);
    assert_eq!(store.palettes()[0].id, new_id);
    assert_eq!(store.palettes()[0].emojis(), "☁️🌈");

    let other = PaletteStore::open("Other", storage);
    assert_eq!(other.len(), Palette::builtins().len());
}
