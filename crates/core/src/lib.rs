//! Domain types and grid rules for the story grid.
//!
//! Everything here is pure logic with no I/O: the entity models shared by
//! the store and the client, input validation, rank ordering, the card tag
//! vocabulary, the color palette, matrix derivation, move planning and the
//! drag gesture state machine.

pub mod drag;
pub mod error;
pub mod grid;
pub mod models;
pub mod moves;
pub mod palette;
pub mod rank;
pub mod tags;
pub mod types;
pub mod validation;
