//! Character entity model and DTOs.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::rank::Ranked;
use crate::types::{EntityId, Timestamp};
use crate::validation::{self, MAX_LABEL_LEN, MAX_NAME_LEN, MAX_TEXT_LEN};

/// A character: one row of the grid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[serde(rename_all = "camelCase")]
pub struct Character {
    pub id: EntityId,
    pub name: String,
    pub role: Option<String>,
    #[serde(rename = "order")]
    pub sort_order: String,
    /// `#RRGGBB`.
    pub color: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Character {
    /// Avatar initials: first letter of up to two words, uppercased.
    pub fn initials(&self) -> String {
        crate::grid::initials(&self.name)
    }
}

impl Ranked for Character {
    fn id(&self) -> EntityId {
        self.id
    }

    fn rank(&self) -> &str {
        &self.sort_order
    }
}

/// DTO for creating a new character.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateCharacter {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    /// Assigned as `count + 1` by the store if omitted.
    #[serde(rename = "order", skip_serializing_if = "Option::is_none")]
    pub sort_order: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

impl CreateCharacter {
    /// Trim and validate all fields.
    pub fn normalize(self) -> Result<Self, CoreError> {
        Ok(Self {
            name: validation::require_text("name", &self.name, MAX_NAME_LEN)?,
            role: validation::optional_text("role", self.role, MAX_TEXT_LEN)?,
            sort_order: validation::optional_text("order", self.sort_order, MAX_LABEL_LEN)?,
            color: validation::optional_color(self.color)?,
        })
    }
}

/// DTO for updating an existing character. All fields are optional.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCharacter {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// `Some("")` clears the role.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(rename = "order", skip_serializing_if = "Option::is_none")]
    pub sort_order: Option<String>,
    /// `Some("")` clears the color.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

impl UpdateCharacter {
    /// Trim and validate the supplied fields.
    pub fn normalize(self) -> Result<Self, CoreError> {
        Ok(Self {
            name: self
                .name
                .map(|n| validation::require_text("name", &n, MAX_NAME_LEN))
                .transpose()?,
            role: validation::patch_text("role", self.role, MAX_TEXT_LEN)?,
            sort_order: self
                .sort_order
                .map(|o| validation::require_text("order", &o, MAX_LABEL_LEN))
                .transpose()?,
            color: validation::patch_color(self.color)?,
        })
    }
}
