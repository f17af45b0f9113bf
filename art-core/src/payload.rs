//! Drag-and-drop payloads.
//!
//! A drag source offers one or more [`TransferItem`] representations. A drop
//! target picks the best match it accepts and classifies it once into a
//! [`DropPayload`], which decides what the drop does.

use serde::{Deserialize, Serialize};
use url::Url;

use crate::Emoji;

/// Prefix a dropped string needs before it is treated as a URL.
const URL_PREFIX: &str = "http";

/// One representation offered by a drag source.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data", rename_all = "snake_case")]
pub enum TransferItem {
    /// A full emoji record, as dragged off the canvas.
    Record(Emoji),
    /// Plain text.
    Text(String),
    /// A URI.
    Uri(Url),
    /// Raw bytes.
    Data(Vec<u8>),
}

impl Emoji {
    /// Every representation this emoji can be dragged as, most specific
    /// first.
    #[must_use]
    pub fn transfer_items(&self) -> Vec<TransferItem> {
        let mut items = vec![
            TransferItem::Record(self.clone()),
            TransferItem::Text(self.emoji.clone()),
        ];
        match Url::parse(&format!("data:text/plain;charset=utf-8,{}", self.emoji)) {
            Ok(uri) => items.push(TransferItem::Uri(uri)),
            Err(e) => tracing::debug!("No URI representation for {}: {e}", self.emoji),
        }
        items
    }
}

/// A dropped payload, classified.
#[derive(Debug, Clone, PartialEq)]
pub enum DropPayload {
    /// An emoji record from the canvas itself.
    Emoji(Emoji),
    /// An absolute URL, used as the background.
    Url(Url),
    /// Any other text, placed as an emoji.
    Text(String),
    /// Raw bytes. Classified but not acted on.
    Data(Vec<u8>),
}

impl DropPayload {
    /// Classify a dropped string.
    ///
    /// Strings starting with `http` that parse as a URL become
    /// [`DropPayload::Url`]; everything else is [`DropPayload::Text`].
    #[must_use]
    pub fn from_string(string: &str) -> Self {
        if string.starts_with(URL_PREFIX) {
            if let Ok(url) = Url::parse(string) {
                return Self::Url(url);
            }
        }
        Self::Text(string.to_string())
    }

    /// Classify a single transfer item.
    #[must_use]
    pub fn from_item(item: &TransferItem) -> Self {
        match item {
            TransferItem::Record(emoji) => Self::Emoji(emoji.clone()),
            TransferItem::Text(text) => Self::from_string(text),
            TransferItem::Uri(url) => Self::Url(url.clone()),
            TransferItem::Data(bytes) => Self::Data(bytes.clone()),
        }
    }
}

/// Where something was dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DropTarget {
    /// The document canvas.
    Canvas,
    /// The delete target.
    Trash,
}

impl DropTarget {
    /// Pick the best item this target accepts and classify it.
    #[must_use]
    pub fn resolve(self, items: &[TransferItem]) -> Option<DropPayload> {
        let rank = |item: &TransferItem| match (self, item) {
            (Self::Canvas, TransferItem::Text(_)) => Some(0),
            (Self::Canvas, TransferItem::Uri(_)) => Some(1),
            (Self::Canvas, TransferItem::Data(_)) => Some(2),
            (Self::Trash, TransferItem::Record(_)) => Some(0),
            _ => None,
        };
        items
            .iter()
            .filter_map(|item| rank(item).map(|r| (r, item)))
            .min_by_key(|(r, _)| *r)
            .map(|(_, item)| DropPayload::from_item(item))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{EmojiId, Position};

    fn car() -> Emoji {
        Emoji::new("🚗", Position::new(10, 20), 40, EmojiId::new(7))
    }

    #[test]
    fn test_url_string_classifies_as_url() {
        let payload = DropPayload::from_string("http://example.com/x.png");
        assert!(matches!(payload, DropPayload::Url(ref url) if url.host_str() == Some("example.com")));
    }

    #[test]
    fn test_emoji_string_classifies_as_text() {
        assert_eq!(
            DropPayload::from_string("🚗"),
            DropPayload::Text("🚗".to_string())
        );
    }

    #[test]
    fn test_http_prefix_that_does_not_parse_is_text() {
        assert_eq!(
            DropPayload::from_string("httpish words"),
            DropPayload::Text("httpish words".to_string())
        );
    }

    #[test]
    fn test_non_http_url_is_text() {
        assert!(matches!(
            DropPayload::from_string("ftp://example.com/x.png"),
            DropPayload::Text(_)
        ));
    }

    #[test]
    fn test_emoji_offers_three_representations() {
        let items = car().transfer_items();
        assert_eq!(items.len(), 3);
        assert_eq!(items[0], TransferItem::Record(car()));
        assert_eq!(items[1], TransferItem::Text("🚗".to_string()));
        assert!(matches!(&items[2], TransferItem::Uri(uri) if uri.scheme() == "data"));
    }

    #[test]
    fn test_canvas_prefers_text() {
        let payload = DropTarget::Canvas.resolve(&car().transfer_items());
        assert_eq!(payload, Some(DropPayload::Text("🚗".to_string())));
    }

    #[test]
    fn test_trash_takes_only_records() {
        let payload = DropTarget::Trash.resolve(&car().transfer_items());
        assert_eq!(payload, Some(DropPayload::Emoji(car())));

        let text_only = [TransferItem::Text("🚗".to_string())];
        assert_eq!(DropTarget::Trash.resolve(&text_only), None);
    }

    #[test]
    fn test_canvas_falls_back_to_data() {
        let items = [TransferItem::Data(vec![1, 2, 3])];
        assert_eq!(
            DropTarget::Canvas.resolve(&items),
            Some(DropPayload::Data(vec![1, 2, 3]))
        );
    }
}
