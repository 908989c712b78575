use storygrid_core::error::CoreError;

/// Errors returned by repository operations that apply domain rules.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// A validation, conflict or not-found error from the domain layer.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// The underlying store failed.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}
