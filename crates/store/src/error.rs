use common::{CartId, UserId};
use thiserror::Error;

/// Errors that can occur when interacting with the shop store.
#[derive(Debug, Error)]
pub enum StoreError {
    /// A user with the same username already exists.
    #[error("Username already taken: {0}")]
    DuplicateUsername(String),

    /// The referenced user does not exist.
    #[error("User not found: {0}")]
    UserNotFound(UserId),

    /// The referenced cart does not exist.
    #[error("Cart not found: {0}")]
    CartNotFound(CartId),

    /// The user already owns a cart.
    #[error("User {0} already has a cart")]
    CartAlreadyExists(UserId),

    /// A database error occurred.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// A database migration error occurred.
    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),
}

/// Result type for store operations.
pub type Result<T> = std::result::Result<T, StoreError>;
