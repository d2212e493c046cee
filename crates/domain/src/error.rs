//! Domain error types.

use common::{ItemId, UserId};
use store::StoreError;
use thiserror::Error;

use crate::auth::AuthError;
use crate::user::ValidationError;

/// Errors that can occur during shop operations.
#[derive(Debug, Error)]
pub enum DomainError {
    /// Authentication or authorization failed.
    #[error(transparent)]
    Auth(#[from] AuthError),

    /// An error occurred in the store.
    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    /// No user with this username.
    #[error("User not found: {0}")]
    UserNotFound(String),

    /// No user with this id.
    #[error("User not found: {0}")]
    UserIdNotFound(UserId),

    /// No catalog item with this id.
    #[error("Item not found: {0}")]
    ItemNotFound(ItemId),

    /// No catalog item with this name.
    #[error("No items named {0}")]
    NoItemsNamed(String),

    /// Registration input was rejected.
    #[error("Invalid registration: {0}")]
    Validation(#[from] ValidationError),

    /// The user has no cart to submit.
    #[error("User {0} has no cart")]
    NoCart(String),
}
