//! Transport seam between the coordinator and the story grid API.
//!
//! [`GridBackend`] mirrors the REST surface one method per endpoint.
//! [`HttpBackend`] implements it with [`reqwest`].

use std::time::Duration;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use storygrid_core::grid::CellKey;
use storygrid_core::models::card::{Card, CreateCard, UpdateCard};
use storygrid_core::models::chapter::{Chapter, CreateChapter, UpdateChapter};
use storygrid_core::models::character::{Character, CreateCharacter, UpdateCharacter};
use storygrid_core::types::EntityId;

use crate::cache::CacheKey;
use crate::config::ClientConfig;
use crate::error::ClientError;

#[async_trait]
pub trait GridBackend: Send + Sync {
    async fn list_chapters(&self) -> Result<Vec<Chapter>, ClientError>;
    async fn create_chapter(&self, input: &CreateChapter) -> Result<Chapter, ClientError>;
    async fn update_chapter(
        &self,
        id: EntityId,
        input: &UpdateChapter,
    ) -> Result<Chapter, ClientError>;
    async fn delete_chapter(&self, id: EntityId) -> Result<(), ClientError>;

    async fn list_characters(&self) -> Result<Vec<Character>, ClientError>;
    async fn create_character(&self, input: &CreateCharacter) -> Result<Character, ClientError>;
    async fn update_character(
        &self,
        id: EntityId,
        input: &UpdateCharacter,
    ) -> Result<Character, ClientError>;
    async fn delete_character(&self, id: EntityId) -> Result<(), ClientError>;

    async fn list_cards(&self) -> Result<Vec<Card>, ClientError>;
    /// The card at `cell`, or `None` if the cell is empty.
    async fn card_at(&self, cell: CellKey) -> Result<Option<Card>, ClientError>;
    async fn create_card(&self, input: &CreateCard) -> Result<Card, ClientError>;
    /// Edit a card's fields (`PUT`).
    async fn update_card(&self, id: EntityId, input: &UpdateCard) -> Result<Card, ClientError>;
    /// Relocate a card (`PATCH` with only the coordinates).
    async fn move_card(&self, id: EntityId, target: CellKey) -> Result<Card, ClientError>;
    async fn delete_card(&self, id: EntityId) -> Result<(), ClientError>;
}

/// HTTP client for a story grid API server.
#[derive(Debug, Clone)]
pub struct HttpBackend {
    client: reqwest::Client,
    api_url: String,
}

/// The server's JSON error envelope.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: String,
}

impl HttpBackend {
    /// Create a client for `api_url`, e.g. `http://localhost:3000/api`.
    pub fn new(api_url: impl Into<String>) -> Self {
        Self::with_client(reqwest::Client::new(), api_url)
    }

    /// Create a client reusing an existing [`reqwest::Client`].
    pub fn with_client(client: reqwest::Client, api_url: impl Into<String>) -> Self {
        let api_url = api_url.into().trim_end_matches('/').to_string();
        Self { client, api_url }
    }

    pub fn from_config(config: &ClientConfig) -> Result<Self, ClientError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()?;
        Ok(Self::with_client(client, config.api_url.clone()))
    }

    pub fn api_url(&self) -> &str {
        &self.api_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.api_url, path)
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, ClientError> {
        let response = self.client.get(self.url(path)).send().await?;
        Self::parse_response(response).await
    }

    async fn send_json<B, T>(
        &self,
        method: reqwest::Method,
        path: &str,
        body: &B,
    ) -> Result<T, ClientError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let response = self
            .client
            .request(method, self.url(path))
            .json(body)
            .send()
            .await?;
        Self::parse_response(response).await
    }

    async fn delete(&self, path: &str) -> Result<(), ClientError> {
        let response = self.client.delete(self.url(path)).send().await?;
        Self::ensure_success(response).await?;
        Ok(())
    }

    // ---- private helpers ----

    /// Return the response unchanged on a 2xx status, or a
    /// [`ClientError::Api`] carrying the server's error message.
    async fn ensure_success(response: reqwest::Response) -> Result<reqwest::Response, ClientError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body = response
            .text()
            .await
            .unwrap_or_else(|_| "<unreadable body>".to_string());
        let message = serde_json::from_str::<ErrorBody>(&body)
            .map(|envelope| envelope.error)
            .unwrap_or(body);
        Err(ClientError::Api {
            status: status.as_u16(),
            message,
        })
    }

    async fn parse_response<T: DeserializeOwned>(
        response: reqwest::Response,
    ) -> Result<T, ClientError> {
        let response = Self::ensure_success(response).await?;
        Ok(response.json::<T>().await?)
    }
}

#[async_trait]
impl GridBackend for HttpBackend {
    async fn list_chapters(&self) -> Result<Vec<Chapter>, ClientError> {
        self.get_json(CacheKey::Chapters.path()).await
    }

    async fn create_chapter(&self, input: &CreateChapter) -> Result<Chapter, ClientError> {
        self.send_json(reqwest::Method::POST, CacheKey::Chapters.path(), input)
            .await
    }

    async fn update_chapter(
        &self,
        id: EntityId,
        input: &UpdateChapter,
    ) -> Result<Chapter, ClientError> {
        let path = item_path(CacheKey::Chapters, id);
        self.send_json(reqwest::Method::PUT, &path, input).await
    }

    async fn delete_chapter(&self, id: EntityId) -> Result<(), ClientError> {
        self.delete(&item_path(CacheKey::Chapters, id)).await
    }

    async fn list_characters(&self) -> Result<Vec<Character>, ClientError> {
        self.get_json(CacheKey::Characters.path()).await
    }

    async fn create_character(&self, input: &CreateCharacter) -> Result<Character, ClientError> {
        self.send_json(reqwest::Method::POST, CacheKey::Characters.path(), input)
            .await
    }

    async fn update_character(
        &self,
        id: EntityId,
        input: &UpdateCharacter,
    ) -> Result<Character, ClientError> {
        let path = item_path(CacheKey::Characters, id);
        self.send_json(reqwest::Method::PUT, &path, input).await
    }

    async fn delete_character(&self, id: EntityId) -> Result<(), ClientError> {
        self.delete(&item_path(CacheKey::Characters, id)).await
    }

    async fn list_cards(&self) -> Result<Vec<Card>, ClientError> {
        self.get_json(CacheKey::Cards.path()).await
    }

    async fn card_at(&self, cell: CellKey) -> Result<Option<Card>, ClientError> {
        let path = format!(
            "{}/{}/{}",
            CacheKey::Cards.path(),
            cell.character_id,
            cell.chapter_id
        );
        match self.get_json(&path).await {
            Ok(card) => Ok(Some(card)),
            Err(err) if err.is_not_found() => Ok(None),
            Err(err) => Err(err),
        }
    }

    async fn create_card(&self, input: &CreateCard) -> Result<Card, ClientError> {
        self.send_json(reqwest::Method::POST, CacheKey::Cards.path(), input).await
    }

    async fn update_card(&self, id: EntityId, input: &UpdateCard) -> Result<Card, ClientError> {
        self.send_json(reqwest::Method::PUT, &item_path(CacheKey::Cards, id), input)
            .await
    }

    async fn move_card(&self, id: EntityId, target: CellKey) -> Result<Card, ClientError> {
        self.send_json(
            reqwest::Method::PATCH,
            &item_path(CacheKey::Cards, id),
            &UpdateCard::move_to(target),
        )
        .await
    }

    async fn delete_card(&self, id: EntityId) -> Result<(), ClientError> {
        self.delete(&item_path(CacheKey::Cards, id)).await
    }
}

/// Path of one entity in the collection behind `key`.
fn item_path(key: CacheKey, id: EntityId) -> String {
    format!("{}/{id}", key.path())
}
