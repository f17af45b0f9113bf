//! Palettes - named sets of emoji available for placement.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use unicode_segmentation::UnicodeSegmentation;
use uuid::Uuid;

/// Unique identifier for a palette.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PaletteId(Uuid);

impl PaletteId {
    /// Create a new unique palette ID.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Create from an existing UUID.
    #[must_use]
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }
}

impl Default for PaletteId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for PaletteId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Remove repeated graphemes, keeping the first occurrence of each.
#[must_use]
pub fn dedup_emojis(emojis: &str) -> String {
    let mut seen = HashSet::new();
    emojis
        .graphemes(true)
        .filter(|glyph| seen.insert(*glyph))
        .collect()
}

/// A named, de-duplicated set of emoji.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Palette {
    /// Stable identity.
    pub id: PaletteId,
    /// Display name.
    pub name: String,
    /// The emoji, each at most once, in insertion order.
    #[serde(deserialize_with = "deserialize_deduped")]
    emojis: String,
}

fn deserialize_deduped<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: serde::Deserializer<'de>,
{
    String::deserialize(deserializer).map(|emojis| dedup_emojis(&emojis))
}

impl Palette {
    /// Create a palette with a fresh id.
    #[must_use]
    pub fn new(name: impl Into<String>, emojis: &str) -> Self {
        Self {
            id: PaletteId::new(),
            name: name.into(),
            emojis: dedup_emojis(emojis),
        }
    }

    /// The emoji as one string.
    #[must_use]
    pub fn emojis(&self) -> &str {
        &self.emojis
    }

    /// Iterate over the individual emoji.
    pub fn glyphs(&self) -> impl Iterator<Item = &str> {
        self.emojis.graphemes(true)
    }

    /// Replace all emoji.
    pub fn set_emojis(&mut self, emojis: &str) {
        self.emojis = dedup_emojis(emojis);
    }

    /// Add emoji in front of the existing ones. Emoji already present keep
    /// only their new, leading position.
    pub fn add_emojis(&mut self, emojis: &str) {
        self.emojis = dedup_emojis(&format!("{emojis}{}", self.emojis));
    }

    /// Remove a single emoji. Returns `false` if it was not present.
    pub fn remove_emoji(&mut self, glyph: &str) -> bool {
        let before = self.emojis.len();
        self.emojis = self.glyphs().filter(|g| *g != glyph).collect();
        self.emojis.len() != before
    }

    /// Rename the palette.
    pub fn rename(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    /// Check if the palette has no emoji.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.emojis.is_empty()
    }

    /// Palettes offered when nothing has been stored yet.
    #[must_use]
    pub fn builtins() -> Vec<Self> {
        vec![
            Self::new("Vehicles", "🚙🚗🚘🚕🚖🏎🚚🛻🚛🚐🚓🚔🚑🚒🚀✈️🛫🛬🛩🚁🛸🚲🏍🛶⛵️🚤🛥🛳⛴🚢🚂🚝🚅🚆🚊🚉🚇🛺🚜"),
            Self::new("Sports", "🏈⚾️🏀⚽️🎾🏐🥏🏓⛳️🥅🥌🏂⛷🎳"),
            Self::new("Music", "🎼🎤🎹🪘🥁🎺🪗🪕🎻"),
            Self::new("Animals", "🐥🐣🐂🐄🐎🐖🐏🐑🦙🐐🐓🐁🐀🐒🦆🦅🦉🦇🐢🐍🦎🦖🦕🐅🐆🦓🦍🦧🦣🐘🦛🦏🐪🐫🦒🦘🦬🐃🦙🐐🦌🐕🐩🦮🐈🦤🦢🦩🕊🦝🦨🦡🦫🦦🦥🐿🦔"),
            Self::new("Animal Faces", "🐵🙈🙊🙉🐶🐱🐭🐹🐰🦊🐻🐼🐻‍❄️🐨🐯🦁🐮🐷🐸🐲"),
            Self::new("Flora", "🌲🌴🌿☘️🍀🍁🍄🌾💐🌷🌹🥀🌺🌸🌼🌻"),
            Self::new("Weather", "☀️🌤⛅️🌥☁️🌦🌧⛈🌩🌨❄️💨☔️💧💦🌊☂️🌫🌪"),
            Self::new("COVID", "💉🦠😷🤧🤒"),
            Self::new("Faces", "😀😃😄😁😆😅😂🤣🥲☺️😊😇🙂🙃😉😌😍🥰😘😗😙😚😋😛😝😜🤪🤨🧐🤓😎🥸🤩🥳😏😞😔😟😕🙁☹️😣😖😫😩🥺😢😭😤😠😡🤯😳🥶😥😓🤗🤔🤭🤫🤥😬🙄😯😧🥱😴🤮😵🤐🥴🤢🤧😷🤒🤕🤠"),
            Self::new("Love", "🧡💛💚💙💜🖤🤍🤎💔❣️💕💞💓💗💖💘💝💟"),
        ]
    }

    /// The palette used when there is nothing else to offer.
    #[must_use]
    pub fn warning() -> Self {
        Self::new("Warning", "⚠️")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dedup_keeps_first_occurrence() {
        assert_eq!(dedup_emojis("🚗🚕🚗🚙🚕"), "🚗🚕🚙");
        assert_eq!(dedup_emojis(""), "");
    }

    #[test]
    fn test_dedup_is_grapheme_aware() {
        // Variation selectors and ZWJ sequences stay whole.
        assert_eq!(dedup_emojis("☹️☹️🐻‍❄️🐻🐻‍❄️"), "☹️🐻‍❄️🐻");
    }

    #[test]
    fn test_new_palette_is_deduplicated() {
        let palette = Palette::new("Trucks", "🚚🚒🛻🚚");
        assert_eq!(palette.emojis(), "🚚🚒🛻");
        assert_eq!(palette.glyphs().count(), 3);
    }

    #[test]
    fn test_add_emojis_puts_new_first() {
        let mut palette = Palette::new("Trucks", "🚚🚒🛻");
        palette.add_emojis("🛻🚜");
        assert_eq!(palette.emojis(), "🛻🚜🚚🚒");
    }

    #[test]
    fn test_remove_emoji() {
        let mut palette = Palette::new("Trucks", "🚚🚒🛻");
        assert!(palette.remove_emoji("🚒"));
        assert!(!palette.remove_emoji("🚒"));
        assert_eq!(palette.emojis(), "🚚🛻");
    }

    #[test]
    fn test_builtins_are_deduplicated_and_distinct() {
        let builtins = Palette::builtins();
        assert!(!builtins.is_empty());
        for palette in &builtins {
            assert_eq!(palette.emojis(), dedup_emojis(palette.emojis()));
        }
        let ids: HashSet<_> = builtins.iter().map(|p| p.id).collect();
        assert_eq!(ids.len(), builtins.len());
    }

    #[test]
    fn test_serde_round_trip() {
        let palette = Palette::new("Love", "💕💞");
        let json = serde_json::to_string(&palette).expect("serialize");
        let back: Palette = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(back, palette);
    }

    #[test]
    fn test_deserialize_dedups_stored_emojis() {
        let json = r#"{"id":"67e55044-10b1-426f-9247-bb680e5fe0c8","name":"Dup","emojis":"🚗🚗🐋"}"#;
        let palette: Palette = serde_json::from_str(json).expect("deserialize");
        assert_eq!(palette.emojis(), "🚗🐋");
    }

    mod proptest_tests {
        use super::*;
        use proptest::prelude::*;

        fn arb_emoji_string() -> impl Strategy<Value = String> {
            prop::collection::vec(
                prop::sample::select(vec!["🚗", "🐋", "☹️", "🐻‍❄️", "a", "🤔", "❤️"]),
                0..24,
            )
            .prop_map(|parts| parts.concat())
        }

        proptest! {
            #[test]
            fn prop_dedup_has_no_repeats(s in arb_emoji_string()) {
                let deduped = dedup_emojis(&s);
                let glyphs: Vec<_> = deduped.graphemes(true).collect();
                let unique: HashSet<_> = glyphs.iter().collect();
                prop_assert_eq!(glyphs.len(), unique.len());
            }

            #[test]
            fn prop_dedup_is_idempotent(s in arb_emoji_string()) {
                let once = dedup_emojis(&s);
                prop_assert_eq!(dedup_emojis(&once), once);
            }

            #[test]
            fn prop_dedup_preserves_first_occurrence_order(s in arb_emoji_string()) {
                let mut expected: Vec<&str> = Vec::new();
                for glyph in s.graphemes(true) {
                    if !expected.contains(&glyph) {
                        expected.push(glyph);
                    }
                }
                prop_assert_eq!(dedup_emojis(&s), expected.concat());
            }
        }
    }
}
