//! Chapter entity model and DTOs.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::rank::Ranked;
use crate::types::{EntityId, Timestamp};
use crate::validation::{self, MAX_LABEL_LEN, MAX_NAME_LEN, MAX_TEXT_LEN};

/// A chapter: one column of the grid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[serde(rename_all = "camelCase")]
pub struct Chapter {
    pub id: EntityId,
    pub title: String,
    pub description: Option<String>,
    #[serde(rename = "order")]
    pub sort_order: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Ranked for Chapter {
    fn id(&self) -> EntityId {
        self.id
    }

    fn rank(&self) -> &str {
        &self.sort_order
    }
}

/// DTO for creating a new chapter.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateChapter {
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Assigned as `count + 1` by the store if omitted.
    #[serde(rename = "order", skip_serializing_if = "Option::is_none")]
    pub sort_order: Option<String>,
}

impl CreateChapter {
    /// Trim and validate all fields.
    pub fn normalize(self) -> Result<Self, CoreError> {
        Ok(Self {
            title: validation::require_text("title", &self.title, MAX_NAME_LEN)?,
            description: validation::optional_text(
                "description",
                self.description,
                MAX_TEXT_LEN,
            )?,
            sort_order: validation::optional_text("order", self.sort_order, MAX_LABEL_LEN)?,
        })
    }
}

/// DTO for updating an existing chapter. All fields are optional.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateChapter {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// `Some("")` clears the description.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(rename = "order", skip_serializing_if = "Option::is_none")]
    pub sort_order: Option<String>,
}

impl UpdateChapter {
    /// Trim and validate the supplied fields.
    pub fn normalize(self) -> Result<Self, CoreError> {
        Ok(Self {
            title: self
                .title
                .map(|t| validation::require_text("title", &t, MAX_NAME_LEN))
                .transpose()?,
            description: validation::patch_text("description", self.description, MAX_TEXT_LEN)?,
            sort_order: self
                .sort_order
                .map(|o| validation::require_text("order", &o, MAX_LABEL_LEN))
                .transpose()?,
        })
    }
}
