//! Entity models and DTOs.
//!
//! Each submodule contains:
//! - An entity struct matching the stored row (and the JSON wire shape)
//! - A create DTO for inserts
//! - An update DTO (all `Option` fields) for partial updates
//!
//! Field names are camelCase on the wire; the rank is exposed as `order`.

pub mod card;
pub mod chapter;
pub mod character;

pub use card::{Card, CreateCard, UpdateCard};
pub use chapter::{Chapter, CreateChapter, UpdateChapter};
pub use character::{Character, CreateCharacter, UpdateCharacter};
