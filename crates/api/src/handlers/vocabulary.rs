//! Read-only lists the card editor offers: tags and color swatches.

use axum::Json;
use serde::Serialize;
use storygrid_core::palette::{ColorSwatch, CARD_COLORS};
use storygrid_core::tags::CardTag;

#[derive(Debug, Serialize)]
pub struct TagOption {
    pub value: &'static str,
    pub label: String,
}

/// GET /api/tags
pub async fn list_tags() -> Json<Vec<TagOption>> {
    let tags = CardTag::ALL
        .into_iter()
        .map(|tag| TagOption {
            value: tag.as_str(),
            label: tag.label(),
        })
        .collect();
    Json(tags)
}

/// GET /api/colors
pub async fn list_colors() -> Json<&'static [ColorSwatch]> {
    Json(CARD_COLORS)
}
