//! Card move planning.
//!
//! A move relocates a card to another (character, chapter) cell. Dropping a
//! card on its own cell is a no-op. Dropping it on an occupied cell is
//! resolved by the configured [`MovePolicy`], so a coordinate never holds
//! two cards.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::grid::CellKey;
use crate::types::EntityId;

/// How a move onto an occupied cell is resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MovePolicy {
    /// The occupant takes the moved card's old cell.
    #[default]
    Swap,
    /// The move fails with a conflict.
    Reject,
}

impl MovePolicy {
    pub fn as_str(self) -> &'static str {
        match self {
            MovePolicy::Swap => "swap",
            MovePolicy::Reject => "reject",
        }
    }
}

impl fmt::Display for MovePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MovePolicy {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "swap" => Ok(MovePolicy::Swap),
            "reject" => Ok(MovePolicy::Reject),
            other => Err(CoreError::Validation(format!(
                "Invalid move policy '{other}'. Must be one of: swap, reject"
            ))),
        }
    }
}

/// A request to relocate a card, produced by a completed drag gesture.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MoveIntent {
    pub card_id: EntityId,
    pub from: CellKey,
    pub to: CellKey,
}

/// What the store has to do to carry out a move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MovePlan {
    /// Source and target are the same cell.
    NoOp,
    /// The target is empty; only the moved card changes.
    Relocate {
        card_id: EntityId,
        from: CellKey,
        to: CellKey,
    },
    /// The target holds `other`, which moves to `from`.
    Swap {
        card_id: EntityId,
        other_id: EntityId,
        from: CellKey,
        to: CellKey,
    },
}

impl MovePlan {
    pub fn is_noop(&self) -> bool {
        matches!(self, MovePlan::NoOp)
    }
}

/// Decide how to move `card_id` from `from` to `to`.
///
/// `occupant` is the id of the card currently at `to`, if any.
pub fn plan_move(
    card_id: EntityId,
    from: CellKey,
    to: CellKey,
    occupant: Option<EntityId>,
    policy: MovePolicy,
) -> Result<MovePlan, CoreError> {
    if from == to {
        return Ok(MovePlan::NoOp);
    }
    match occupant {
        None => Ok(MovePlan::Relocate { card_id, from, to }),
        Some(other_id) if other_id == card_id => Ok(MovePlan::NoOp),
        Some(other_id) => match policy {
            MovePolicy::Swap => Ok(MovePlan::Swap {
                card_id,
                other_id,
                from,
                to,
            }),
            MovePolicy::Reject => Err(CoreError::Conflict(format!(
                "Cell ({}, {}) already holds card {other_id}",
                to.character_id, to.chapter_id
            ))),
        },
    }
}
