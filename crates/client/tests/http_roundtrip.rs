//! End-to-end: the coordinator over `HttpBackend` against a live server
//! bound to an ephemeral port with an in-memory database.

use std::sync::Arc;

use storygrid_api::config::ServerConfig;
use storygrid_api::router::build_app_router;
use storygrid_api::state::AppState;
use storygrid_client::{CardDraft, GridBackend, HttpBackend, MutationCoordinator};
use storygrid_core::grid::CellKey;
use storygrid_core::moves::MovePolicy;

async fn spawn_server() -> String {
    let pool = storygrid_db::create_in_memory_pool().await.unwrap();
    storygrid_db::run_migrations(&pool).await.unwrap();

    let config = ServerConfig {
        host: "127.0.0.1".into(),
        port: 0,
        database_url: "sqlite::memory:".into(),
        cors_origins: vec!["http://localhost:5173".into()],
        request_timeout_secs: 30,
        move_policy: MovePolicy::Swap,
        log_json: false,
    };
    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
    };
    let app = build_app_router(state, &config);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{addr}/api")
}

#[tokio::test]
async fn grid_scenario_over_http() {
    let coordinator = MutationCoordinator::new(HttpBackend::new(spawn_server().await));
    coordinator.refresh_all().await.unwrap();

    let ch1 = coordinator.add_chapter("Ch1", "").await.unwrap();
    let ch2 = coordinator.add_chapter("Ch2", "").await.unwrap();
    assert_eq!(ch1.sort_order, "1");
    assert_eq!(ch2.sort_order, "2");
    let ana = coordinator.add_character("Ana", "", None).await.unwrap();

    let intro = CellKey::new(ana.id, ch1.id);
    let card = coordinator
        .save_cell(
            intro,
            CardDraft {
                content: "intro".into(),
                tag: "introduction".into(),
                color: None,
            },
        )
        .await
        .unwrap();

    let backend = coordinator.backend();
    let found = backend.card_at(intro).await.unwrap().unwrap();
    assert_eq!(found.id, card.id);
    assert_eq!(found.tag.as_deref(), Some("introduction"));
    assert!(backend
        .card_at(CellKey::new(ana.id, ch2.id))
        .await
        .unwrap()
        .is_none());

    // Move, then delete the chapter it landed in.
    let moved = coordinator
        .move_card(card.id, CellKey::new(ana.id, ch2.id))
        .await
        .unwrap()
        .unwrap();
    assert_eq!(moved.chapter_id, ch2.id);
    assert!(backend.card_at(intro).await.unwrap().is_none());

    coordinator.delete_chapter(ch2.id).await.unwrap();
    let matrix = coordinator.matrix().await;
    assert_eq!(matrix.card_count(), 0);
    assert_eq!(matrix.chapters().len(), 1);
    assert_eq!(matrix.chapters()[0].title, "Ch1");
}

#[tokio::test]
async fn server_errors_surface_status_and_message() {
    let backend = HttpBackend::new(spawn_server().await);
    let coordinator = MutationCoordinator::new(backend);
    coordinator.refresh_all().await.unwrap();

    let ch = coordinator.add_chapter("Ch1", "").await.unwrap();
    let ana = coordinator.add_character("Ana", "", None).await.unwrap();
    let cell = CellKey::new(ana.id, ch.id);
    coordinator
        .save_cell(cell, CardDraft { content: "one".into(), ..Default::default() })
        .await
        .unwrap();

    // Bypass the coordinator's cache so the server sees the duplicate.
    let input = storygrid_core::models::card::CreateCard {
        character_id: ana.id,
        chapter_id: ch.id,
        content: Some("two".into()),
        tag: None,
        color: None,
    };
    let err = coordinator.backend().create_card(&input).await.unwrap_err();
    assert!(err.is_conflict());

    let err = coordinator
        .delete_chapter(uuid::Uuid::now_v7())
        .await
        .unwrap_err();
    assert!(err.is_not_found());
}
