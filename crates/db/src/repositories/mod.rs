//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept a pool (or, for lookups, any SQLite executor) as the first
//! argument.

pub mod card_repo;
pub mod chapter_repo;
pub mod character_repo;

pub use card_repo::CardRepo;
pub use chapter_repo::ChapterRepo;
pub use character_repo::CharacterRepo;
