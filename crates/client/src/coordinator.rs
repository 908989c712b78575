//! Sequences user intents into backend calls and keeps the cache in step.
//!
//! Nothing is applied to the cache optimistically. A mutation is sent, and
//! only once the server confirms it are the keys it declares (see
//! [`Mutation::invalidates`]) invalidated and reloaded. A failed mutation
//! leaves the cache exactly as it was and emits an error notification.

use std::collections::HashSet;
use std::future::Future;
use std::sync::{Mutex, PoisonError};

use storygrid_core::drag::DragTracker;
use storygrid_core::error::CoreError;
use storygrid_core::grid::{CellKey, GridMatrix};
use storygrid_core::models::card::{Card, CreateCard, UpdateCard};
use storygrid_core::models::chapter::{Chapter, CreateChapter, UpdateChapter};
use storygrid_core::models::character::{Character, CreateCharacter, UpdateCharacter};
use storygrid_core::moves::MovePolicy;
use storygrid_core::rank::next_rank;
use storygrid_core::types::EntityId;
use tokio::sync::{broadcast, RwLock};

use crate::backend::GridBackend;
use crate::cache::{CacheKey, QueryCache};
use crate::error::ClientError;
use crate::mutation::Mutation;
use crate::notify::{Notification, Notifier};

/// What the card editor submits for a cell.
///
/// Empty `content` or `tag` clears the field on an existing card and is
/// omitted on a new one.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CardDraft {
    pub content: String,
    pub tag: String,
    pub color: Option<String>,
}

pub struct MutationCoordinator<B> {
    backend: B,
    cache: RwLock<QueryCache>,
    /// Cells with a create request in flight.
    creating: Mutex<HashSet<CellKey>>,
    /// Checked locally before a move is sent. Should match the server's
    /// `MOVE_COLLISION_POLICY`.
    move_policy: MovePolicy,
    notifier: Notifier,
}

/// Marks a cell as being created for as long as it lives.
struct CreateGuard<'a> {
    creating: &'a Mutex<HashSet<CellKey>>,
    cell: CellKey,
}

impl<'a> CreateGuard<'a> {
    /// `None` if a create for `cell` is already in flight.
    fn acquire(creating: &'a Mutex<HashSet<CellKey>>, cell: CellKey) -> Option<Self> {
        let inserted = creating
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(cell);
        inserted.then(|| Self { creating, cell })
    }
}

impl Drop for CreateGuard<'_> {
    fn drop(&mut self) {
        self.creating
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(&self.cell);
    }
}

impl<B: GridBackend> MutationCoordinator<B> {
    pub fn new(backend: B) -> Self {
        Self::with_notifier(backend, Notifier::default())
    }

    pub fn with_notifier(backend: B, notifier: Notifier) -> Self {
        Self {
            backend,
            cache: RwLock::new(QueryCache::new()),
            creating: Mutex::new(HashSet::new()),
            move_policy: MovePolicy::default(),
            notifier,
        }
    }

    pub fn with_move_policy(mut self, policy: MovePolicy) -> Self {
        self.move_policy = policy;
        self
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Listen for success and failure notifications.
    pub fn subscribe(&self) -> broadcast::Receiver<Notification> {
        self.notifier.subscribe()
    }

    /// The grid built from the current cache contents.
    pub async fn matrix(&self) -> GridMatrix {
        self.cache.read().await.matrix()
    }

    /// A copy of the cache, for inspection.
    pub async fn snapshot(&self) -> QueryCache {
        self.cache.read().await.clone()
    }

    /// Load every collection.
    pub async fn refresh_all(&self) -> Result<(), ClientError> {
        for key in CacheKey::ALL {
            self.load(key).await?;
        }
        Ok(())
    }

    /// Reload only the keys still marked stale, e.g. after a failed reload.
    pub async fn refresh_stale(&self) -> Result<(), ClientError> {
        let keys = self.cache.read().await.stale_keys();
        for key in keys {
            self.load(key).await?;
        }
        Ok(())
    }

    // ---- chapters ----

    /// Append a chapter after the cached ones.
    pub async fn add_chapter(&self, title: &str, description: &str) -> Result<Chapter, ClientError> {
        let title = title.trim();
        if title.is_empty() {
            return Err(self.reject("Title is required"));
        }
        let count = self.cache.read().await.chapters().len();
        let input = CreateChapter {
            title: title.to_string(),
            description: non_empty(description),
            sort_order: Some(next_rank(count)),
        };
        let input = self.check(Mutation::CreateChapter, input.normalize())?;
        self.dispatch(Mutation::CreateChapter, self.backend.create_chapter(&input))
            .await
    }

    pub async fn update_chapter(
        &self,
        id: EntityId,
        input: UpdateChapter,
    ) -> Result<Chapter, ClientError> {
        let input = self.check(Mutation::UpdateChapter, input.normalize())?;
        self.dispatch(Mutation::UpdateChapter, self.backend.update_chapter(id, &input))
            .await
    }

    /// Delete a chapter; the server removes its cards with it.
    pub async fn delete_chapter(&self, id: EntityId) -> Result<(), ClientError> {
        self.dispatch(Mutation::DeleteChapter, self.backend.delete_chapter(id))
            .await
    }

    // ---- characters ----

    /// Append a character after the cached ones.
    pub async fn add_character(
        &self,
        name: &str,
        role: &str,
        color: Option<&str>,
    ) -> Result<Character, ClientError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(self.reject("Name is required"));
        }
        let count = self.cache.read().await.characters().len();
        let input = CreateCharacter {
            name: name.to_string(),
            role: non_empty(role),
            sort_order: Some(next_rank(count)),
            color: color.map(str::to_string),
        };
        let input = self.check(Mutation::CreateCharacter, input.normalize())?;
        self.dispatch(Mutation::CreateCharacter, self.backend.create_character(&input))
            .await
    }

    pub async fn update_character(
        &self,
        id: EntityId,
        input: UpdateCharacter,
    ) -> Result<Character, ClientError> {
        let input = self.check(Mutation::UpdateCharacter, input.normalize())?;
        self.dispatch(
            Mutation::UpdateCharacter,
            self.backend.update_character(id, &input),
        )
        .await
    }

    /// Delete a character; the server removes its cards with it.
    pub async fn delete_character(&self, id: EntityId) -> Result<(), ClientError> {
        self.dispatch(Mutation::DeleteCharacter, self.backend.delete_character(id))
            .await
    }

    // ---- cards ----

    /// Save the editor's draft for `cell`: update the cached card there, or
    /// create one if the cell is empty.
    ///
    /// A second create for the same cell while the first is in flight is
    /// refused without a request.
    pub async fn save_cell(&self, cell: CellKey, draft: CardDraft) -> Result<Card, ClientError> {
        let existing = self.cache.read().await.card_at(cell).map(|card| card.id);

        if let Some(id) = existing {
            let input = UpdateCard {
                content: Some(draft.content),
                tag: Some(draft.tag),
                color: draft.color,
                ..Default::default()
            };
            let input = self.check(Mutation::UpdateCard, input.normalize())?;
            return self
                .dispatch(Mutation::UpdateCard, self.backend.update_card(id, &input))
                .await;
        }

        // Held until the reload has put the new card in the cache.
        let Some(_guard) = CreateGuard::acquire(&self.creating, cell) else {
            tracing::debug!(
                character_id = %cell.character_id,
                chapter_id = %cell.chapter_id,
                "Create already in flight for cell",
            );
            return Err(ClientError::Rejected(
                "A card for this cell is already being created".into(),
            ));
        };
        let input = CreateCard {
            character_id: cell.character_id,
            chapter_id: cell.chapter_id,
            content: non_empty(&draft.content),
            tag: non_empty(&draft.tag),
            color: draft.color,
        };
        let input = self.check(Mutation::CreateCard, input.normalize())?;
        self.dispatch(Mutation::CreateCard, self.backend.create_card(&input))
            .await
    }

    /// Move a card to `target`.
    ///
    /// Returns `Ok(None)` without a request when the card is already there.
    /// Under [`MovePolicy::Reject`] a move onto an occupied cached cell fails
    /// locally with a conflict.
    pub async fn move_card(
        &self,
        card_id: EntityId,
        target: CellKey,
    ) -> Result<Option<Card>, ClientError> {
        let plan = {
            let cache = self.cache.read().await;
            cache.matrix().plan_move(card_id, target, self.move_policy)
        };
        let plan = self.check(Mutation::MoveCard, plan)?;
        if plan.is_noop() {
            tracing::debug!(card_id = %card_id, "Card dropped on its own cell");
            return Ok(None);
        }
        self.dispatch(Mutation::MoveCard, self.backend.move_card(card_id, target))
            .await
            .map(Some)
    }

    /// Finish a drag gesture on `target` (`None` for outside the grid).
    pub async fn drop_card(
        &self,
        tracker: &mut DragTracker,
        target: Option<CellKey>,
    ) -> Result<Option<Card>, ClientError> {
        match tracker.release(target) {
            Some(intent) => self.move_card(intent.card_id, intent.to).await,
            None => Ok(None),
        }
    }

    pub async fn delete_card(&self, id: EntityId) -> Result<(), ClientError> {
        self.dispatch(Mutation::DeleteCard, self.backend.delete_card(id))
            .await
    }

    // ---- private helpers ----

    /// Await `request`, then notify and reload on success or notify on
    /// failure.
    async fn dispatch<T, F>(&self, mutation: Mutation, request: F) -> Result<T, ClientError>
    where
        F: Future<Output = Result<T, ClientError>>,
    {
        match request.await {
            Ok(value) => {
                tracing::info!(%mutation, "Mutation applied");
                self.notifier
                    .send(Notification::info(mutation.success_title()));
                self.reload(mutation.invalidates()).await;
                Ok(value)
            }
            Err(err) => {
                tracing::warn!(%mutation, error = %err, "Mutation failed");
                self.notifier
                    .send(Notification::error(mutation.failure_title()));
                Err(err)
            }
        }
    }

    /// Invalidate `keys`, then reload each. A key whose reload fails stays
    /// stale for [`refresh_stale`](Self::refresh_stale).
    async fn reload(&self, keys: &[CacheKey]) {
        {
            let mut cache = self.cache.write().await;
            for &key in keys {
                cache.invalidate(key);
            }
        }
        for &key in keys {
            if let Err(err) = self.load(key).await {
                tracing::warn!(?key, error = %err, "Reload failed");
                self.notifier
                    .send(Notification::error("Failed to refresh the grid"));
            }
        }
    }

    async fn load(&self, key: CacheKey) -> Result<(), ClientError> {
        match key {
            CacheKey::Chapters => {
                let chapters = self.backend.list_chapters().await?;
                self.cache.write().await.put_chapters(chapters);
            }
            CacheKey::Characters => {
                let characters = self.backend.list_characters().await?;
                self.cache.write().await.put_characters(characters);
            }
            CacheKey::Cards => {
                let cards = self.backend.list_cards().await?;
                self.cache.write().await.put_cards(cards);
            }
        }
        tracing::debug!(?key, "Cache key reloaded");
        Ok(())
    }

    /// Surface a local validation failure as the mutation's error toast.
    fn check<T>(&self, mutation: Mutation, result: Result<T, CoreError>) -> Result<T, ClientError> {
        result.map_err(|err| {
            self.notifier
                .send(Notification::error(mutation.failure_title()));
            ClientError::Invalid(err)
        })
    }

    fn reject(&self, title: &str) -> ClientError {
        self.notifier.send(Notification::error(title));
        ClientError::Rejected(title.to_string())
    }
}

fn non_empty(value: &str) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}
