pub mod card;
pub mod chapter;
pub mod character;
pub mod vocabulary;
