//! Services orchestrating authorization, store access, and domain rules.
//!
//! Each service owns the store handle it needs; authenticated operations
//! take the caller's [`Identity`](crate::Identity) and check it before
//! touching any data that belongs to the targeted user.

mod carts;
mod catalog;
mod orders;
mod users;

pub use carts::CartService;
pub use catalog::CatalogService;
pub use orders::OrderService;
pub use users::UserService;

use store::{CartStore, StoreError, UserRecord, UserStore};

use crate::{Cart, DomainError};

/// Loads a user by username, failing with `UserNotFound`.
async fn require_user<S: UserStore>(store: &S, username: &str) -> Result<UserRecord, DomainError> {
    store
        .find_user_by_username(username)
        .await?
        .ok_or_else(|| {
            tracing::warn!(%username, "user not found");
            DomainError::UserNotFound(username.to_string())
        })
}

/// Loads the user's cart, or `None` if the user has never had one.
async fn find_cart<S: CartStore>(store: &S, user: &UserRecord) -> Result<Option<Cart>, DomainError> {
    let Some(cart_id) = user.cart_id else {
        return Ok(None);
    };

    let record = store
        .find_cart(cart_id)
        .await?
        .ok_or(StoreError::CartNotFound(cart_id))?;
    Ok(Some(Cart::from(record)))
}

/// Loads the user's cart, creating and associating an empty one first if
/// the user has none.
///
/// If another request created the cart in the meantime, that cart is used.
async fn find_or_create_cart<S: UserStore + CartStore>(
    store: &S,
    user: &UserRecord,
) -> Result<Cart, DomainError> {
    if let Some(cart) = find_cart(store, user).await? {
        return Ok(cart);
    }

    tracing::debug!(username = %user.username, "creating cart on first use");
    match store.create_cart(user.id).await {
        Ok(record) => Ok(Cart::from(record)),
        Err(StoreError::CartAlreadyExists(user_id)) => {
            tracing::debug!(username = %user.username, "cart created concurrently; reloading");
            let current = store
                .find_user_by_id(user_id)
                .await?
                .ok_or(StoreError::UserNotFound(user_id))?;
            find_cart(store, &current)
                .await?
                .ok_or_else(|| StoreError::CartAlreadyExists(user_id).into())
        }
        Err(e) => Err(e.into()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use store::{InMemoryStore, NewUser};

    #[tokio::test]
    async fn test_find_or_create_cart_reuses_cart_created_concurrently() {
        let store = InMemoryStore::new();
        let stale = store
            .insert_user(NewUser {
                username: "bob".to_string(),
                password_hash: "hash".to_string(),
            })
            .await
            .unwrap();
        assert!(stale.cart_id.is_none());

        // Another request creates the cart after `stale` was read.
        let created = store.create_cart(stale.id).await.unwrap();

        let cart = find_or_create_cart(&store, &stale).await.unwrap();
        assert_eq!(cart.id(), created.id);
        assert!(cart.is_empty());
    }

    #[tokio::test]
    async fn test_find_or_create_cart_creates_once() {
        let store = InMemoryStore::new();
        let user = store
            .insert_user(NewUser {
                username: "bob".to_string(),
                password_hash: "hash".to_string(),
            })
            .await
            .unwrap();

        let first = find_or_create_cart(&store, &user).await.unwrap();
        let user = store.find_user_by_id(user.id).await.unwrap().unwrap();
        let second = find_or_create_cart(&store, &user).await.unwrap();
        assert_eq!(first.id(), second.id());
    }
}
