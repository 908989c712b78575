//! Grid matrix derivation.
//!
//! The grid is characters (rows) by chapters (columns), both in rank order.
//! Cards are indexed once by their `(character, chapter)` coordinate so each
//! cell lookup is a hash probe.

use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::models::{Card, Chapter, Character};
use crate::moves::{self, MoveIntent, MovePlan, MovePolicy};
use crate::palette::{self, ColorSwatch};
use crate::rank;
use crate::types::EntityId;

/// A grid coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CellKey {
    pub character_id: EntityId,
    pub chapter_id: EntityId,
}

impl CellKey {
    pub fn new(character_id: EntityId, chapter_id: EntityId) -> Self {
        Self {
            character_id,
            chapter_id,
        }
    }
}

/// One cell of a rendered row.
#[derive(Debug, Clone, Copy)]
pub struct GridCell<'a> {
    pub chapter: &'a Chapter,
    pub card: Option<&'a Card>,
    /// Palette entry for the card's color, if it is one of the swatches.
    pub swatch: Option<&'static ColorSwatch>,
}

impl GridCell<'_> {
    /// Empty cells render as an "add content" placeholder.
    pub fn is_empty(&self) -> bool {
        self.card.is_none()
    }
}

/// A character with one cell per chapter.
#[derive(Debug, Clone)]
pub struct GridRow<'a> {
    /// Display position, used for avatar tinting.
    pub index: usize,
    pub character: &'a Character,
    pub initials: String,
    /// Avatar tint slot, for characters without an explicit color.
    pub tint: usize,
    pub cells: Vec<GridCell<'a>>,
}

/// The character x chapter matrix built from the three flat collections.
#[derive(Debug, Clone, Default)]
pub struct GridMatrix {
    chapters: Vec<Chapter>,
    characters: Vec<Character>,
    index: HashMap<CellKey, Card>,
    /// Placed card id to its coordinate.
    cells_by_card: HashMap<EntityId, CellKey>,
    orphans: Vec<Card>,
    collisions: Vec<Card>,
}

impl GridMatrix {
    /// Build the matrix in one pass over `cards`.
    ///
    /// Cards referencing an unknown character or chapter go to
    /// [`orphans`](Self::orphans). If two cards share a coordinate the first
    /// one wins and the rest go to [`collisions`](Self::collisions).
    pub fn build(
        mut chapters: Vec<Chapter>,
        mut characters: Vec<Character>,
        cards: Vec<Card>,
    ) -> Self {
        rank::sort_by_rank(&mut chapters);
        rank::sort_by_rank(&mut characters);

        let chapter_ids: HashSet<EntityId> = chapters.iter().map(|c| c.id).collect();
        let character_ids: HashSet<EntityId> = characters.iter().map(|c| c.id).collect();

        let mut index = HashMap::with_capacity(cards.len());
        let mut cells_by_card = HashMap::with_capacity(cards.len());
        let mut orphans = Vec::new();
        let mut collisions = Vec::new();

        for card in cards {
            if !character_ids.contains(&card.character_id) || !chapter_ids.contains(&card.chapter_id)
            {
                orphans.push(card);
                continue;
            }
            let key = card.cell();
            if index.contains_key(&key) {
                collisions.push(card);
            } else {
                cells_by_card.insert(card.id, key);
                index.insert(key, card);
            }
        }

        Self {
            chapters,
            characters,
            index,
            cells_by_card,
            orphans,
            collisions,
        }
    }

    /// Columns in rank order.
    pub fn chapters(&self) -> &[Chapter] {
        &self.chapters
    }

    /// Rows in rank order.
    pub fn characters(&self) -> &[Character] {
        &self.characters
    }

    /// Cards whose character or chapter no longer exists.
    pub fn orphans(&self) -> &[Card] {
        &self.orphans
    }

    /// Cards that lost a coordinate clash to an earlier card.
    pub fn collisions(&self) -> &[Card] {
        &self.collisions
    }

    /// Number of cards placed in the grid.
    pub fn card_count(&self) -> usize {
        self.index.len()
    }

    pub fn card_at(&self, character_id: EntityId, chapter_id: EntityId) -> Option<&Card> {
        self.index.get(&CellKey::new(character_id, chapter_id))
    }

    pub fn card_at_cell(&self, cell: CellKey) -> Option<&Card> {
        self.index.get(&cell)
    }

    pub fn find_card(&self, card_id: EntityId) -> Option<&Card> {
        self.cells_by_card
            .get(&card_id)
            .and_then(|cell| self.index.get(cell))
    }

    /// Whether both axes of `cell` exist in the grid.
    pub fn contains_cell(&self, cell: CellKey) -> bool {
        self.characters.iter().any(|c| c.id == cell.character_id)
            && self.chapters.iter().any(|c| c.id == cell.chapter_id)
    }

    /// Rows for rendering: every character with one cell per chapter.
    pub fn rows(&self) -> Vec<GridRow<'_>> {
        self.characters
            .iter()
            .enumerate()
            .map(|(index, character)| GridRow {
                index,
                character,
                initials: character.initials(),
                tint: palette::avatar_tint(index),
                cells: self
                    .chapters
                    .iter()
                    .map(|chapter| {
                        let card = self.card_at(character.id, chapter.id);
                        GridCell {
                            chapter,
                            card,
                            swatch: card
                                .and_then(|c| c.color.as_deref())
                                .and_then(palette::swatch_for),
                        }
                    })
                    .collect(),
            })
            .collect()
    }

    /// The move request for dropping `card_id` on `target`.
    ///
    /// Returns `Ok(None)` when the card is dropped on its own cell.
    pub fn move_intent(
        &self,
        card_id: EntityId,
        target: CellKey,
    ) -> Result<Option<MoveIntent>, CoreError> {
        let card = self.find_card(card_id).ok_or(CoreError::NotFound {
            entity: "Card",
            id: card_id,
        })?;
        if !self.contains_cell(target) {
            return Err(CoreError::Validation(format!(
                "Target cell ({}, {}) is not part of the grid",
                target.character_id, target.chapter_id
            )));
        }
        let from = card.cell();
        if from == target {
            return Ok(None);
        }
        Ok(Some(MoveIntent {
            card_id,
            from,
            to: target,
        }))
    }

    /// Plan a move against the current matrix contents.
    ///
    /// Fails like [`move_intent`](Self::move_intent) for an unknown card or
    /// target, and with a conflict when `policy` rejects an occupied target.
    pub fn plan_move(
        &self,
        card_id: EntityId,
        target: CellKey,
        policy: MovePolicy,
    ) -> Result<MovePlan, CoreError> {
        let Some(intent) = self.move_intent(card_id, target)? else {
            return Ok(MovePlan::NoOp);
        };
        let occupant = self.card_at_cell(intent.to).map(|c| c.id);
        moves::plan_move(intent.card_id, intent.from, intent.to, occupant, policy)
    }
}

/// Avatar initials: the first letter of up to two words, uppercased.
pub fn initials(name: &str) -> String {
    name.split_whitespace()
        .filter_map(|word| word.chars().next())
        .take(2)
        .flat_map(char::to_uppercase)
        .collect()
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;
    use chrono::Utc;

    use super::*;

    fn id(n: u128) -> EntityId {
        EntityId::from_u128(n)
    }

    fn chapter(n: u128, order: &str) -> Chapter {
        Chapter {
            id: id(n),
            title: format!("Ch{n}"),
            description: None,
            sort_order: order.into(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn character(n: u128, order: &str) -> Character {
        Character {
            id: id(n),
            name: format!("C{n}"),
            role: None,
            sort_order: order.into(),
            color: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn card(n: u128, character: u128, chapter: u128) -> Card {
        Card {
            id: id(n),
            character_id: id(character),
            chapter_id: id(chapter),
            content: Some(format!("card {n}")),
            tag: None,
            color: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn sample() -> GridMatrix {
        GridMatrix::build(
            vec![chapter(11, "2"), chapter(10, "1")],
            vec![character(1, "1"), character(2, "2")],
            vec![card(100, 1, 10), card(101, 2, 11)],
        )
    }

    #[test]
    fn columns_and_rows_follow_rank() {
        let grid = sample();
        let titles: Vec<&str> = grid.chapters().iter().map(|c| c.title.as_str()).collect();
        assert_eq!(titles, vec!["Ch10", "Ch11"]);
    }

    #[test]
    fn card_at_finds_exact_coordinate() {
        let grid = sample();
        assert_eq!(grid.card_at(id(1), id(10)).map(|c| c.id), Some(id(100)));
        assert!(grid.card_at(id(1), id(11)).is_none());
        assert!(grid.card_at(id(2), id(10)).is_none());
        assert_eq!(grid.card_at(id(2), id(11)).map(|c| c.id), Some(id(101)));
    }

    #[test]
    fn rows_have_one_cell_per_chapter() {
        let grid = sample();
        let rows = grid.rows();
        assert_eq!(rows.len(), 2);
        assert!(rows.iter().all(|r| r.cells.len() == 2));
        assert!(!rows[0].cells[0].is_empty());
        assert!(rows[0].cells[1].is_empty());
    }

    #[test]
    fn orphans_and_collisions_are_set_aside() {
        let grid = GridMatrix::build(
            vec![chapter(10, "1")],
            vec![character(1, "1")],
            vec![card(100, 1, 10), card(101, 1, 10), card(102, 9, 10)],
        );
        assert_eq!(grid.card_count(), 1);
        assert_eq!(grid.card_at(id(1), id(10)).map(|c| c.id), Some(id(100)));
        assert_eq!(grid.collisions().len(), 1);
        assert_eq!(grid.orphans().len(), 1);
    }

    #[test]
    fn move_intent_onto_own_cell_is_none() {
        let grid = sample();
        assert_eq!(grid.move_intent(id(100), CellKey::new(id(1), id(10))).unwrap(), None);
    }

    #[test]
    fn move_intent_reports_source_and_target() {
        let grid = sample();
        let intent = grid
            .move_intent(id(100), CellKey::new(id(2), id(10)))
            .unwrap()
            .unwrap();
        assert_eq!(intent.from, CellKey::new(id(1), id(10)));
        assert_eq!(intent.to, CellKey::new(id(2), id(10)));
    }

    #[test]
    fn move_intent_rejects_unknown_target() {
        let grid = sample();
        let err = grid
            .move_intent(id(100), CellKey::new(id(7), id(10)))
            .unwrap_err();
        assert_matches!(err, CoreError::Validation(_));
    }

    #[test]
    fn move_intent_for_unknown_card_is_not_found() {
        let grid = sample();
        let err = grid
            .move_intent(id(999), CellKey::new(id(1), id(10)))
            .unwrap_err();
        assert_matches!(err, CoreError::NotFound { entity: "Card", .. });
    }

    #[test]
    fn plan_move_onto_occupied_cell_swaps() {
        let grid = sample();
        let plan = grid
            .plan_move(id(100), CellKey::new(id(2), id(11)), MovePolicy::Swap)
            .unwrap();
        assert_matches!(plan, MovePlan::Swap { other_id, .. } if other_id == id(101));
    }

    #[test]
    fn plan_move_under_reject_policy_conflicts() {
        let grid = sample();
        let err = grid
            .plan_move(id(100), CellKey::new(id(2), id(11)), MovePolicy::Reject)
            .unwrap_err();
        assert_matches!(err, CoreError::Conflict(_));
    }

    #[test]
    fn plan_move_onto_own_cell_is_noop() {
        let grid = sample();
        let plan = grid
            .plan_move(id(100), CellKey::new(id(1), id(10)), MovePolicy::Reject)
            .unwrap();
        assert!(plan.is_noop());
    }

    #[test]
    fn find_card_ignores_set_aside_cards() {
        let grid = GridMatrix::build(
            vec![chapter(10, "1")],
            vec![character(1, "1")],
            vec![card(100, 1, 10), card(101, 1, 10), card(102, 9, 10)],
        );
        assert_eq!(grid.find_card(id(100)).map(|c| c.id), Some(id(100)));
        assert!(grid.find_card(id(101)).is_none());
        assert!(grid.find_card(id(102)).is_none());
    }

    #[test]
    fn rows_carry_avatar_and_swatch() {
        let mut colored = card(100, 1, 10);
        colored.color = Some("#ef4444".into());
        let mut ana = character(1, "1");
        ana.name = "ana lopez".into();
        let grid = GridMatrix::build(
            vec![chapter(10, "1")],
            (0..8).map(|n| character(n + 2, &(n + 2).to_string())).chain([ana]).collect(),
            vec![colored],
        );
        let rows = grid.rows();
        assert_eq!(rows[0].initials, "AL");
        assert_eq!(rows[0].cells[0].swatch.map(|s| s.name), Some("Red"));
        assert!(rows[1].cells[0].swatch.is_none());
        assert_eq!(rows[7].tint, 1);
    }

    #[test]
    fn initials_take_two_words() {
        assert_eq!(initials("ana maria lopez"), "AM");
        assert_eq!(initials("Bob"), "B");
        assert_eq!(initials("   "), "");
    }
}
