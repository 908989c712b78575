//! Integration tests for moving cards between grid cells.

use assert_matches::assert_matches;
use storygrid_core::error::CoreError;
use storygrid_core::grid::CellKey;
use storygrid_core::moves::MovePolicy;
use storygrid_core::types::EntityId;
use storygrid_db::models::card::{Card, CreateCard, UpdateCard};
use storygrid_db::models::chapter::CreateChapter;
use storygrid_db::models::character::CreateCharacter;
use storygrid_db::repositories::{CardRepo, ChapterRepo, CharacterRepo};
use storygrid_db::{DbPool, StoreError};

/// Two characters by two chapters, with ids returned as (characters, chapters).
async fn grid() -> (DbPool, [EntityId; 2], [EntityId; 2]) {
    let pool = storygrid_db::create_in_memory_pool().await.unwrap();
    storygrid_db::run_migrations(&pool).await.unwrap();

    let mut characters = [EntityId::nil(); 2];
    for (slot, name) in characters.iter_mut().zip(["Ana", "Ben"]) {
        let input = CreateCharacter {
            name: name.into(),
            ..Default::default()
        };
        *slot = CharacterRepo::create(&pool, input).await.unwrap().id;
    }

    let mut chapters = [EntityId::nil(); 2];
    for (slot, title) in chapters.iter_mut().zip(["Ch1", "Ch2"]) {
        let input = CreateChapter {
            title: title.into(),
            ..Default::default()
        };
        *slot = ChapterRepo::create(&pool, input).await.unwrap().id;
    }

    (pool, characters, chapters)
}

async fn place(pool: &DbPool, character_id: EntityId, chapter_id: EntityId, content: &str) -> Card {
    let input = CreateCard {
        character_id,
        chapter_id,
        content: Some(content.into()),
        tag: None,
        color: None,
    };
    CardRepo::create(pool, input).await.unwrap()
}

#[tokio::test]
async fn move_to_empty_cell_relocates() {
    let (pool, [ana, ben], [ch1, ch2]) = grid().await;
    let card = place(&pool, ana, ch1, "intro").await;

    let target = CellKey::new(ben, ch2);
    let moved = CardRepo::update(&pool, card.id, UpdateCard::move_to(target), MovePolicy::Reject)
        .await
        .unwrap()
        .unwrap();

    assert_eq!(moved.id, card.id);
    assert_eq!(moved.cell(), target);
    assert!(CardRepo::find_at(&pool, ana, ch1).await.unwrap().is_none());
    let at_target = CardRepo::find_at(&pool, ben, ch2).await.unwrap().unwrap();
    assert_eq!(at_target.content.as_deref(), Some("intro"));
}

#[tokio::test]
async fn move_along_one_axis() {
    let (pool, [ana, _], [ch1, ch2]) = grid().await;
    let card = place(&pool, ana, ch1, "intro").await;

    let patch = UpdateCard {
        chapter_id: Some(ch2),
        ..Default::default()
    };
    let moved = CardRepo::update(&pool, card.id, patch, MovePolicy::Swap)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(moved.cell(), CellKey::new(ana, ch2));
}

#[tokio::test]
async fn move_onto_own_cell_changes_nothing() {
    let (pool, [ana, _], [ch1, _]) = grid().await;
    let card = place(&pool, ana, ch1, "intro").await;

    let moved = CardRepo::update(
        &pool,
        card.id,
        UpdateCard::move_to(card.cell()),
        MovePolicy::Reject,
    )
    .await
    .unwrap()
    .unwrap();
    assert_eq!(moved.cell(), card.cell());
    assert_eq!(CardRepo::list(&pool).await.unwrap().len(), 1);
}

#[tokio::test]
async fn move_onto_occupied_cell_swaps() {
    let (pool, [ana, ben], [ch1, ch2]) = grid().await;
    let first = place(&pool, ana, ch1, "first").await;
    let second = place(&pool, ben, ch2, "second").await;

    let moved = CardRepo::update(
        &pool,
        first.id,
        UpdateCard::move_to(second.cell()),
        MovePolicy::Swap,
    )
    .await
    .unwrap()
    .unwrap();
    assert_eq!(moved.cell(), CellKey::new(ben, ch2));

    let displaced = CardRepo::find_by_id(&pool, second.id).await.unwrap().unwrap();
    assert_eq!(displaced.cell(), CellKey::new(ana, ch1));
    assert_eq!(displaced.content.as_deref(), Some("second"));
    assert_eq!(displaced.created_at, second.created_at);
    assert_eq!(CardRepo::list(&pool).await.unwrap().len(), 2);
}

#[tokio::test]
async fn move_onto_occupied_cell_rejected_leaves_both() {
    let (pool, [ana, ben], [ch1, ch2]) = grid().await;
    let first = place(&pool, ana, ch1, "first").await;
    let second = place(&pool, ben, ch2, "second").await;

    let err = CardRepo::update(
        &pool,
        first.id,
        UpdateCard::move_to(second.cell()),
        MovePolicy::Reject,
    )
    .await
    .unwrap_err();
    assert_matches!(err, StoreError::Core(CoreError::Conflict(_)));

    let first_now = CardRepo::find_by_id(&pool, first.id).await.unwrap().unwrap();
    let second_now = CardRepo::find_by_id(&pool, second.id).await.unwrap().unwrap();
    assert_eq!(first_now.cell(), first.cell());
    assert_eq!(second_now.cell(), second.cell());
}

#[tokio::test]
async fn move_to_unknown_chapter_is_rejected() {
    let (pool, [ana, _], [ch1, _]) = grid().await;
    let card = place(&pool, ana, ch1, "intro").await;

    let target = CellKey::new(ana, EntityId::now_v7());
    let err = CardRepo::update(&pool, card.id, UpdateCard::move_to(target), MovePolicy::Swap)
        .await
        .unwrap_err();
    assert_matches!(err, StoreError::Core(CoreError::Validation(_)));
}

#[tokio::test]
async fn moving_missing_card_returns_none() {
    let (pool, [ana, _], [ch1, _]) = grid().await;
    let result = CardRepo::update(
        &pool,
        EntityId::now_v7(),
        UpdateCard::move_to(CellKey::new(ana, ch1)),
        MovePolicy::Swap,
    )
    .await
    .unwrap();
    assert!(result.is_none());
}
