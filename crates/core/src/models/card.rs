//! Card entity model and DTOs.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::grid::CellKey;
use crate::types::{EntityId, Timestamp};
use crate::validation::{self, MAX_LABEL_LEN, MAX_TEXT_LEN};

/// A card: the content of one (character, chapter) cell.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[serde(rename_all = "camelCase")]
pub struct Card {
    pub id: EntityId,
    pub character_id: EntityId,
    pub chapter_id: EntityId,
    pub content: Option<String>,
    /// Free-form; the editor offers [`crate::tags::CardTag`].
    pub tag: Option<String>,
    /// Overrides the character color when set.
    pub color: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Card {
    /// The grid coordinate this card occupies.
    pub fn cell(&self) -> CellKey {
        CellKey::new(self.character_id, self.chapter_id)
    }
}

/// DTO for creating a new card.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateCard {
    pub character_id: EntityId,
    pub chapter_id: EntityId,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tag: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

impl CreateCard {
    /// The cell the new card will occupy.
    pub fn cell(&self) -> CellKey {
        CellKey::new(self.character_id, self.chapter_id)
    }

    /// Trim and validate all fields.
    pub fn normalize(self) -> Result<Self, CoreError> {
        Ok(Self {
            character_id: self.character_id,
            chapter_id: self.chapter_id,
            content: validation::optional_text("content", self.content, MAX_TEXT_LEN)?,
            tag: validation::optional_text("tag", self.tag, MAX_LABEL_LEN)?,
            color: validation::optional_color(self.color)?,
        })
    }
}

/// DTO for updating or moving an existing card. All fields are optional.
///
/// Supplying `characterId` and/or `chapterId` moves the card.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCard {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub character_id: Option<EntityId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub chapter_id: Option<EntityId>,
    /// `Some("")` clears the content.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    /// `Some("")` clears the tag.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tag: Option<String>,
    /// `Some("")` clears the color.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

impl UpdateCard {
    /// A body that only relocates the card.
    pub fn move_to(target: CellKey) -> Self {
        Self {
            character_id: Some(target.character_id),
            chapter_id: Some(target.chapter_id),
            ..Default::default()
        }
    }

    /// The coordinate the card ends up at, given where it is now.
    pub fn target_cell(&self, current: CellKey) -> CellKey {
        CellKey::new(
            self.character_id.unwrap_or(current.character_id),
            self.chapter_id.unwrap_or(current.chapter_id),
        )
    }

    /// Trim and validate the supplied fields.
    pub fn normalize(self) -> Result<Self, CoreError> {
        Ok(Self {
            character_id: self.character_id,
            chapter_id: self.chapter_id,
            content: validation::patch_text("content", self.content, MAX_TEXT_LEN)?,
            tag: validation::patch_text("tag", self.tag, MAX_LABEL_LEN)?,
            color: validation::patch_color(self.color)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(n: u128) -> EntityId {
        EntityId::from_u128(n)
    }

    #[test]
    fn target_cell_keeps_unsupplied_axis() {
        let current = CellKey::new(id(1), id(10));
        let patch = UpdateCard {
            chapter_id: Some(id(11)),
            ..Default::default()
        };
        assert_eq!(patch.target_cell(current), CellKey::new(id(1), id(11)));
        assert_eq!(UpdateCard::default().target_cell(current), current);
    }

    #[test]
    fn move_body_serializes_coordinates_only() {
        let body = UpdateCard::move_to(CellKey::new(id(2), id(3)));
        let json = serde_json::to_value(&body).unwrap();
        let obj = json.as_object().unwrap();
        assert_eq!(obj.len(), 2);
        assert!(obj.contains_key("characterId"));
        assert!(obj.contains_key("chapterId"));
    }

    #[test]
    fn create_accepts_camel_case_body() {
        let body = serde_json::json!({
            "characterId": id(1),
            "chapterId": id(2),
            "content": "intro",
            "tag": "introduction",
        });
        let input: CreateCard = serde_json::from_value(body).unwrap();
        let input = input.normalize().unwrap();
        assert_eq!(input.cell(), CellKey::new(id(1), id(2)));
        assert_eq!(input.tag.as_deref(), Some("introduction"));
        assert!(input.color.is_none());
    }
}
