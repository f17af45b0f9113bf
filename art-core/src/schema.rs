//! Persisted representation of a document.

use serde::{Deserialize, Serialize};
use url::Url;

use crate::{ArtError, ArtResult, Emoji, EmojiArt};

/// On-disk document record.
///
/// `nextId` is written so ids stay unique across sessions even after the
/// newest emoji was removed. Records written without it fall back to one
/// past the largest stored id.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArtRecord {
    /// Background image URI.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub background: Option<Url>,
    /// Emoji in drawing order.
    #[serde(default)]
    pub emojis: Vec<Emoji>,
    /// Id counter at the time of writing.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next_id: Option<u64>,
}

impl From<&EmojiArt> for ArtRecord {
    fn from(art: &EmojiArt) -> Self {
        Self {
            background: art.background().cloned(),
            emojis: art.emojis().to_vec(),
            next_id: Some(art.next_id().get()),
        }
    }
}

impl ArtRecord {
    /// Materialize the runtime document.
    ///
    /// # Errors
    ///
    /// Returns [`ArtError::IdSpaceExhausted`] if a stored id leaves no room
    /// for the next one.
    pub fn into_art(self) -> ArtResult<EmojiArt> {
        let past_largest = match self.emojis.iter().map(|emoji| emoji.id.get()).max() {
            Some(largest) => largest.checked_add(1).ok_or(ArtError::IdSpaceExhausted)?,
            None => 0,
        };
        let next_id = self.next_id.unwrap_or(0).max(past_largest);
        Ok(EmojiArt::from_parts(self.background, self.emojis, next_id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{EmojiId, Position};

    #[test]
    fn test_reads_record_without_counter() {
        let json = r#"{
            "background": "http://example.com/x.png",
            "emojis": [
                {"emoji": "🤔", "position": {"x": 200, "y": -100}, "size": 50, "id": 3},
                {"emoji": "🐋", "position": {"x": -150, "y": 100}, "size": 100, "id": 7}
            ]
        }"#;
        let record: ArtRecord = serde_json::from_str(json).expect("parse");
        let art = record.into_art().expect("valid record");
        assert_eq!(art.len(), 2);
        assert_eq!(art.next_id(), EmojiId::new(8));
        assert_eq!(
            art.background().map(Url::as_str),
            Some("http://example.com/x.png")
        );
    }

    #[test]
    fn test_empty_object_is_empty_document() {
        let record: ArtRecord = serde_json::from_str("{}").expect("parse");
        assert!(record.into_art().expect("valid record").is_empty());
    }

    #[test]
    fn test_absent_background_is_omitted() {
        let mut art = EmojiArt::new();
        art.add_emoji("🚗", Position::ORIGIN, 40).expect("add");
        let value = serde_json::to_value(ArtRecord::from(&art)).expect("serialize");
        assert!(value.get("background").is_none());
        assert_eq!(value["nextId"], 1);
    }
}
