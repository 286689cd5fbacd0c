//! Deck state: the ordered card collection and its mutation entry points.
//!
//! The deck is owned by exactly one controller. Every mutation replaces the
//! backing vector wholesale (or maps it element-wise); nothing outside this
//! module sees an in-place edit. Registered change handlers are notified
//! after each mutation so the presentation layer can re-render.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::cards::{Artwork, Card, CardId};

type OnChangeHandler = Arc<dyn Fn(&[Card]) + Send + Sync>;

/// Batch progress, present only during a full-deck generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Progress {
    pub current: usize,
    pub total: usize,
}

/// An ordered sequence of cards. Order is insertion order and matters for
/// display only, never for identity.
#[derive(Default)]
pub struct DeckState {
    cards: Vec<Card>,
    on_change: Option<OnChangeHandler>,
}

impl DeckState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Replace the deck wholesale. Used when starting a new generation or
    /// clearing after a failure.
    pub fn reset(&mut self, cards: Vec<Card>) {
        self.cards = cards;
        self.notify();
    }

    pub fn clear(&mut self) {
        self.reset(Vec::new());
    }

    /// Add one card to the end. The caller guarantees the identity is not
    /// already present; the deck does not defend against overlap after the
    /// fact.
    pub fn append(&mut self, card: Card) {
        let mut next = self.cards.clone();
        next.push(card);
        self.cards = next;
        self.notify();
    }

    /// Replace the artwork of the card(s) matching `id`. A silent no-op when
    /// no card matches.
    pub fn update_artwork(&mut self, id: CardId, artwork: Artwork) {
        if !self.cards.iter().any(|c| c.id == id) {
            return;
        }
        self.cards = self
            .cards
            .iter()
            .map(|c| {
                if c.id == id {
                    Card { id: c.id, artwork: artwork.clone() }
                } else {
                    c.clone()
                }
            })
            .collect();
        self.notify();
    }

    /// Register a callback invoked with the new card slice after every
    /// mutation.
    pub fn on_change<F>(&mut self, cb: F)
    where
        F: Fn(&[Card]) + Send + Sync + 'static,
    {
        self.on_change = Some(Arc::new(cb));
    }

    /// Remove a previously registered change handler if any
    pub fn clear_on_change(&mut self) {
        self.on_change = None;
    }

    fn notify(&self) {
        if let Some(cb) = &self.on_change {
            cb(&self.cards);
        }
    }
}
