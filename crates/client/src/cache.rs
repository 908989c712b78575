//! Keyed cache of the three collections the grid is built from.
//!
//! Each collection has one [`CacheKey`]. A mutation invalidates keys; the
//! coordinator then reloads exactly those keys. Invalidated data stays
//! readable until the reload replaces it.

use std::collections::BTreeSet;

use serde::Serialize;
use storygrid_core::grid::{CellKey, GridMatrix};
use storygrid_core::models::card::Card;
use storygrid_core::models::chapter::Chapter;
use storygrid_core::models::character::Character;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CacheKey {
    Chapters,
    Characters,
    Cards,
}

impl CacheKey {
    pub const ALL: [CacheKey; 3] = [CacheKey::Chapters, CacheKey::Characters, CacheKey::Cards];

    /// The API path the collection is loaded from.
    pub fn path(self) -> &'static str {
        match self {
            CacheKey::Chapters => "/chapters",
            CacheKey::Characters => "/characters",
            CacheKey::Cards => "/cards",
        }
    }
}

#[derive(Debug, Clone)]
pub struct QueryCache {
    chapters: Vec<Chapter>,
    characters: Vec<Character>,
    cards: Vec<Card>,
    stale: BTreeSet<CacheKey>,
}

impl QueryCache {
    /// An empty cache with every key stale.
    pub fn new() -> Self {
        Self {
            chapters: Vec::new(),
            characters: Vec::new(),
            cards: Vec::new(),
            stale: CacheKey::ALL.into_iter().collect(),
        }
    }

    pub fn chapters(&self) -> &[Chapter] {
        &self.chapters
    }

    pub fn characters(&self) -> &[Character] {
        &self.characters
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn card_at(&self, cell: CellKey) -> Option<&Card> {
        self.cards.iter().find(|card| card.cell() == cell)
    }

    pub fn is_stale(&self, key: CacheKey) -> bool {
        self.stale.contains(&key)
    }

    /// Stale keys in a stable order.
    pub fn stale_keys(&self) -> Vec<CacheKey> {
        self.stale.iter().copied().collect()
    }

    pub fn invalidate(&mut self, key: CacheKey) {
        self.stale.insert(key);
    }

    pub fn put_chapters(&mut self, chapters: Vec<Chapter>) {
        self.chapters = chapters;
        self.stale.remove(&CacheKey::Chapters);
    }

    pub fn put_characters(&mut self, characters: Vec<Character>) {
        self.characters = characters;
        self.stale.remove(&CacheKey::Characters);
    }

    pub fn put_cards(&mut self, cards: Vec<Card>) {
        self.cards = cards;
        self.stale.remove(&CacheKey::Cards);
    }

    /// Build the grid from the cached collections.
    pub fn matrix(&self) -> GridMatrix {
        GridMatrix::build(
            self.chapters.clone(),
            self.characters.clone(),
            self.cards.clone(),
        )
    }
}

impl Default for QueryCache {
    fn default() -> Self {
        Self::new()
    }
}
