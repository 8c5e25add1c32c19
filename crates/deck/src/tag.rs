//! Identity tags for requests that finish after the user moved on

use mentorscroll_core::CardId;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Unique identifier for a deck instance
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DeckId(Uuid);

impl DeckId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn as_string(&self) -> String {
        self.0.to_string()
    }
}

impl Default for DeckId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for DeckId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The deck and card a request was issued for
///
/// Compare with [`DeckNavigator::is_current`](crate::DeckNavigator::is_current)
/// when the result arrives and drop it if the card is no longer showing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RequestTag {
    deck: DeckId,
    card: CardId,
}

impl RequestTag {
    pub fn new(deck: DeckId, card: CardId) -> Self {
        Self { deck, card }
    }

    pub fn deck(&self) -> DeckId {
        self.deck
    }

    pub fn card(&self) -> CardId {
        self.card
    }
}

/// A value paired with the tag of the request that produced it
#[derive(Debug, Clone, PartialEq)]
pub struct Tagged<T> {
    pub tag: RequestTag,
    pub value: T,
}

impl<T> Tagged<T> {
    pub fn new(tag: RequestTag, value: T) -> Self {
        Self { tag, value }
    }

    /// Keeps the value only if `still_current` accepts the tag
    pub fn accept_if(self, still_current: impl FnOnce(&RequestTag) -> bool) -> Option<T> {
        if still_current(&self.tag) {
            Some(self.value)
        } else {
            log::debug!("Discarding stale result for card {}", self.tag.card);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tag_equality() {
        let deck = DeckId::new();
        let card = CardId::new();
        assert_eq!(RequestTag::new(deck, card), RequestTag::new(deck, card));
        assert_ne!(RequestTag::new(deck, card), RequestTag::new(DeckId::new(), card));
    }

    #[test]
    fn test_tagged_accept_if() {
        let tag = RequestTag::new(DeckId::new(), CardId::new());
        assert_eq!(Tagged::new(tag, 5).accept_if(|_| true), Some(5));
        assert_eq!(Tagged::new(tag, 5).accept_if(|_| false), None);
    }
}
