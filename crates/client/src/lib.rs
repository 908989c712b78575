//! Client-side mutation coordinator for the story grid API.
//!
//! [`MutationCoordinator`] turns user intents into calls on a
//! [`GridBackend`], keeps a [`QueryCache`] of the three collections in sync
//! after every successful mutation, and reports outcomes as
//! [`Notification`]s.

pub mod backend;
pub mod cache;
pub mod config;
pub mod coordinator;
pub mod error;
pub mod mutation;
pub mod notify;

pub use backend::{GridBackend, HttpBackend};
pub use cache::{CacheKey, QueryCache};
pub use config::ClientConfig;
pub use coordinator::{CardDraft, MutationCoordinator};
pub use error::ClientError;
pub use mutation::Mutation;
pub use notify::{Level, Notification};
