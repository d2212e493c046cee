use async_trait::async_trait;
use common::{CartId, ItemId, UserId};

use crate::{CartRecord, ItemRecord, NewOrder, NewUser, OrderRecord, Result, UserRecord};

/// Persistence for registered users and their credentials.
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Inserts a new user without a cart.
    ///
    /// Fails with `DuplicateUsername` if the username is taken.
    async fn insert_user(&self, user: NewUser) -> Result<UserRecord>;

    /// Looks a user up by id.
    async fn find_user_by_id(&self, id: UserId) -> Result<Option<UserRecord>>;

    /// Looks a user up by exact username.
    async fn find_user_by_username(&self, username: &str) -> Result<Option<UserRecord>>;
}

/// Read-only access to the item catalog.
#[async_trait]
pub trait ItemStore: Send + Sync {
    /// Returns every item, ordered by id.
    async fn list_items(&self) -> Result<Vec<ItemRecord>>;

    /// Looks an item up by id.
    async fn find_item(&self, id: ItemId) -> Result<Option<ItemRecord>>;

    /// Returns every item whose name matches exactly, ordered by id.
    async fn find_items_by_name(&self, name: &str) -> Result<Vec<ItemRecord>>;
}

/// Persistence for shopping carts.
#[async_trait]
pub trait CartStore: Send + Sync {
    /// Creates an empty cart and associates it with the user.
    ///
    /// Fails with `UserNotFound` if the user does not exist and with
    /// `CartAlreadyExists` if the user already owns a cart.
    async fn create_cart(&self, user_id: UserId) -> Result<CartRecord>;

    /// Loads a cart with its items resolved.
    async fn find_cart(&self, id: CartId) -> Result<Option<CartRecord>>;

    /// Replaces the stored item list and total of an existing cart.
    async fn save_cart(&self, cart: &CartRecord) -> Result<()>;
}

/// Persistence for submitted orders.
#[async_trait]
pub trait OrderStore: Send + Sync {
    /// Persists a new order.
    async fn insert_order(&self, order: NewOrder) -> Result<OrderRecord>;

    /// Returns every order placed by the user, oldest first.
    async fn orders_for_user(&self, user_id: UserId) -> Result<Vec<OrderRecord>>;
}

/// Everything the shop needs from its backing store.
pub trait ShopStore: UserStore + ItemStore + CartStore + OrderStore + Clone + 'static {}

// Blanket implementation for all complete stores
impl<T> ShopStore for T where T: UserStore + ItemStore + CartStore + OrderStore + Clone + 'static {}
