//! Rank ordering for chapters and characters.
//!
//! Ranks are opaque strings. Two numeric ranks compare as integers, a
//! numeric rank sorts before a non-numeric one, and two non-numeric ranks
//! compare lexicographically. Ties break on id, which is a UUIDv7 and so
//! follows creation order. The result is a total order.

use std::cmp::Ordering;

use crate::types::EntityId;

/// Anything laid out along a grid axis by its rank.
pub trait Ranked {
    fn id(&self) -> EntityId;
    fn rank(&self) -> &str;
}

/// Compare two rank strings.
pub fn compare_ranks(a: &str, b: &str) -> Ordering {
    match (a.trim().parse::<u64>(), b.trim().parse::<u64>()) {
        (Ok(x), Ok(y)) => x.cmp(&y).then_with(|| a.cmp(b)),
        (Ok(_), Err(_)) => Ordering::Less,
        (Err(_), Ok(_)) => Ordering::Greater,
        (Err(_), Err(_)) => a.cmp(b),
    }
}

/// Compare two ranked items, falling back to id on equal ranks.
pub fn compare_ranked<T: Ranked>(a: &T, b: &T) -> Ordering {
    compare_ranks(a.rank(), b.rank()).then_with(|| a.id().cmp(&b.id()))
}

/// Sort items in place by rank. Stable and total.
pub fn sort_by_rank<T: Ranked>(items: &mut [T]) {
    items.sort_by(compare_ranked);
}

/// The rank to append after `existing` items: `count + 1`.
pub fn next_rank(existing: usize) -> String {
    (existing + 1).to_string()
}
