//! The mutations the coordinator dispatches and their cache side effects.

use std::fmt;

use crate::cache::CacheKey;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Mutation {
    CreateChapter,
    UpdateChapter,
    DeleteChapter,
    CreateCharacter,
    UpdateCharacter,
    DeleteCharacter,
    CreateCard,
    UpdateCard,
    MoveCard,
    DeleteCard,
}

impl Mutation {
    /// Keys to reload after the mutation succeeds.
    ///
    /// Deleting a chapter or character also deletes its cards on the
    /// server, so those invalidate `Cards` too.
    pub fn invalidates(self) -> &'static [CacheKey] {
        match self {
            Mutation::CreateChapter | Mutation::UpdateChapter => &[CacheKey::Chapters],
            Mutation::DeleteChapter => &[CacheKey::Chapters, CacheKey::Cards],
            Mutation::CreateCharacter | Mutation::UpdateCharacter => &[CacheKey::Characters],
            Mutation::DeleteCharacter => &[CacheKey::Characters, CacheKey::Cards],
            Mutation::CreateCard
            | Mutation::UpdateCard
            | Mutation::MoveCard
            | Mutation::DeleteCard => &[CacheKey::Cards],
        }
    }

    pub fn success_title(self) -> &'static str {
        match self {
            Mutation::CreateChapter => "Chapter created",
            Mutation::UpdateChapter => "Chapter updated",
            Mutation::DeleteChapter => "Chapter deleted",
            Mutation::CreateCharacter => "Character created",
            Mutation::UpdateCharacter => "Character updated",
            Mutation::DeleteCharacter => "Character deleted",
            Mutation::CreateCard => "Card created",
            Mutation::UpdateCard => "Card updated",
            Mutation::MoveCard => "Card moved",
            Mutation::DeleteCard => "Card deleted",
        }
    }

    pub fn failure_title(self) -> &'static str {
        match self {
            Mutation::CreateChapter => "Failed to create chapter",
            Mutation::UpdateChapter => "Failed to update chapter",
            Mutation::DeleteChapter => "Failed to delete chapter",
            Mutation::CreateCharacter => "Failed to create character",
            Mutation::UpdateCharacter => "Failed to update character",
            Mutation::DeleteCharacter => "Failed to delete character",
            Mutation::CreateCard => "Failed to create card",
            Mutation::UpdateCard => "Failed to update card",
            Mutation::MoveCard => "Failed to move card",
            Mutation::DeleteCard => "Failed to delete card",
        }
    }
}

impl fmt::Display for Mutation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}
