use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use common::{CartId, ItemId, OrderId, UserId};
use tokio::sync::RwLock;

use crate::{
    CartRecord, ItemRecord, NewItem, NewOrder, NewUser, OrderRecord, Result, StoreError,
    UserRecord,
    seed::default_catalog,
    store::{CartStore, ItemStore, OrderStore, UserStore},
};

#[derive(Debug, Clone)]
struct StoredCart {
    user_id: UserId,
    item_ids: Vec<ItemId>,
    total_cents: i64,
}

#[derive(Default)]
struct Tables {
    users: BTreeMap<UserId, UserRecord>,
    items: BTreeMap<ItemId, ItemRecord>,
    carts: BTreeMap<CartId, StoredCart>,
    orders: BTreeMap<OrderId, OrderRecord>,
    next_id: i64,
}

impl Tables {
    fn next_id(&mut self) -> i64 {
        self.next_id += 1;
        self.next_id
    }

    fn resolve_cart(&self, id: CartId, cart: &StoredCart) -> CartRecord {
        CartRecord {
            id,
            user_id: cart.user_id,
            items: cart
                .item_ids
                .iter()
                .filter_map(|item_id| {
                    let item = self.items.get(item_id).cloned();
                    if item.is_none() {
                        tracing::warn!(cart_id = %id, %item_id, "cart references a missing item");
                    }
                    item
                })
                .collect(),
            total_cents: cart.total_cents,
        }
    }
}

/// In-memory store implementation for local runs and tests.
///
/// Ids are drawn from a single sequence shared by every table, so they are
/// unique across entity kinds as well as within one.
#[derive(Clone, Default)]
pub struct InMemoryStore {
    tables: Arc<RwLock<Tables>>,
}

impl InMemoryStore {
    /// Creates a new empty store with no catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store seeded with the default catalog.
    pub async fn with_default_catalog() -> Self {
        let store = Self::new();
        for item in default_catalog() {
            store.seed_item(item).await;
        }
        store
    }

    /// Adds an item to the catalog and returns it.
    pub async fn seed_item(&self, item: NewItem) -> ItemRecord {
        let mut tables = self.tables.write().await;
        let id = ItemId::new(tables.next_id());
        let record = ItemRecord {
            id,
            name: item.name,
            price_cents: item.price_cents,
            description: item.description,
        };
        tables.items.insert(id, record.clone());
        record
    }

    /// Returns the number of orders stored across all users.
    pub async fn order_count(&self) -> usize {
        self.tables.read().await.orders.len()
    }

    /// Returns the number of registered users.
    pub async fn user_count(&self) -> usize {
        self.tables.read().await.users.len()
    }
}

#[async_trait]
impl UserStore for InMemoryStore {
    async fn insert_user(&self, user: NewUser) -> Result<UserRecord> {
        let mut tables = self.tables.write().await;

        if tables.users.values().any(|u| u.username == user.username) {
            return Err(StoreError::DuplicateUsername(user.username));
        }

        let id = UserId::new(tables.next_id());
        let record = UserRecord {
            id,
            username: user.username,
            password_hash: user.password_hash,
            cart_id: None,
        };
        tables.users.insert(id, record.clone());
        Ok(record)
    }

    async fn find_user_by_id(&self, id: UserId) -> Result<Option<UserRecord>> {
        Ok(self.tables.read().await.users.get(&id).cloned())
    }

    async fn find_user_by_username(&self, username: &str) -> Result<Option<UserRecord>> {
        let tables = self.tables.read().await;
        Ok(tables
            .users
            .values()
            .find(|u| u.username == username)
            .cloned())
    }
}

#[async_trait]
impl ItemStore for InMemoryStore {
    async fn list_items(&self) -> Result<Vec<ItemRecord>> {
        Ok(self.tables.read().await.items.values().cloned().collect())
    }

    async fn find_item(&self, id: ItemId) -> Result<Option<ItemRecord>> {
        Ok(self.tables.read().await.items.get(&id).cloned())
    }

    async fn find_items_by_name(&self, name: &str) -> Result<Vec<ItemRecord>> {
        let tables = self.tables.read().await;
        Ok(tables
            .items
            .values()
            .filter(|i| i.name == name)
            .cloned()
            .collect())
    }
}

#[async_trait]
impl CartStore for InMemoryStore {
    async fn create_cart(&self, user_id: UserId) -> Result<CartRecord> {
        let mut tables = self.tables.write().await;

        match tables.users.get(&user_id) {
            None => return Err(StoreError::UserNotFound(user_id)),
            Some(user) if user.cart_id.is_some() => {
                return Err(StoreError::CartAlreadyExists(user_id));
            }
            Some(_) => {}
        }

        let id = CartId::new(tables.next_id());
        let cart = StoredCart {
            user_id,
            item_ids: Vec::new(),
            total_cents: 0,
        };
        tables.carts.insert(id, cart.clone());
        if let Some(user) = tables.users.get_mut(&user_id) {
            user.cart_id = Some(id);
        }

        Ok(tables.resolve_cart(id, &cart))
    }

    async fn find_cart(&self, id: CartId) -> Result<Option<CartRecord>> {
        let tables = self.tables.read().await;
        Ok(tables
            .carts
            .get(&id)
            .map(|cart| tables.resolve_cart(id, cart)))
    }

    async fn save_cart(&self, cart: &CartRecord) -> Result<()> {
        let mut tables = self.tables.write().await;
        let stored = tables
            .carts
            .get_mut(&cart.id)
            .ok_or(StoreError::CartNotFound(cart.id))?;

        stored.item_ids = cart.items.iter().map(|i| i.id).collect();
        stored.total_cents = cart.total_cents;
        Ok(())
    }
}

#[async_trait]
impl OrderStore for InMemoryStore {
    async fn insert_order(&self, order: NewOrder) -> Result<OrderRecord> {
        let mut tables = self.tables.write().await;

        if !tables.users.contains_key(&order.user_id) {
            return Err(StoreError::UserNotFound(order.user_id));
        }

        let id = OrderId::new(tables.next_id());
        let record = OrderRecord {
            id,
            user_id: order.user_id,
            items: order.items,
            total_cents: order.total_cents,
            created_at: Utc::now(),
        };
        tables.orders.insert(id, record.clone());
        Ok(record)
    }

    async fn orders_for_user(&self, user_id: UserId) -> Result<Vec<OrderRecord>> {
        let tables = self.tables.read().await;
        Ok(tables
            .orders
            .values()
            .filter(|o| o.user_id == user_id)
            .cloned()
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_user(username: &str) -> NewUser {
        NewUser {
            username: username.to_string(),
            password_hash: "hash".to_string(),
        }
    }

    #[tokio::test]
    async fn insert_and_find_user() {
        let store = InMemoryStore::new();
        let user = store.insert_user(new_user("alice")).await.unwrap();

        let by_id = store.find_user_by_id(user.id).await.unwrap().unwrap();
        assert_eq!(by_id.username, "alice");
        assert!(by_id.cart_id.is_none());

        let by_name = store.find_user_by_username("alice").await.unwrap();
        assert_eq!(by_name.map(|u| u.id), Some(user.id));
    }

    #[tokio::test]
    async fn username_lookup_is_case_sensitive() {
        let store = InMemoryStore::new();
        store.insert_user(new_user("alice")).await.unwrap();

        assert!(store.find_user_by_username("Alice").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn duplicate_username_rejected() {
        let store = InMemoryStore::new();
        store.insert_user(new_user("alice")).await.unwrap();

        let result = store.insert_user(new_user("alice")).await;
        assert!(matches!(result, Err(StoreError::DuplicateUsername(name)) if name == "alice"));
        assert_eq!(store.user_count().await, 1);
    }

    #[tokio::test]
    async fn default_catalog_is_seeded() {
        let store = InMemoryStore::with_default_catalog().await;
        let items = store.list_items().await.unwrap();

        assert_eq!(items.len(), 2);
        assert_eq!(items[0].name, "Round Widget");
        assert_eq!(items[0].price_cents, 299);
        assert_eq!(items[1].name, "Square Widget");

        let found = store.find_items_by_name("Square Widget").await.unwrap();
        assert_eq!(found.len(), 1);
        assert!(store.find_items_by_name("Oval Widget").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn create_cart_associates_with_user() {
        let store = InMemoryStore::new();
        let user = store.insert_user(new_user("bob")).await.unwrap();

        let cart = store.create_cart(user.id).await.unwrap();
        assert_eq!(cart.user_id, user.id);
        assert!(cart.items.is_empty());

        let user = store.find_user_by_id(user.id).await.unwrap().unwrap();
        assert_eq!(user.cart_id, Some(cart.id));

        let again = store.create_cart(user.id).await;
        assert!(matches!(again, Err(StoreError::CartAlreadyExists(_))));
    }

    #[tokio::test]
    async fn create_cart_for_missing_user_fails() {
        let store = InMemoryStore::new();
        let result = store.create_cart(UserId::new(99)).await;
        assert!(matches!(result, Err(StoreError::UserNotFound(_))));
    }

    #[tokio::test]
    async fn save_cart_preserves_duplicates_and_order() {
        let store = InMemoryStore::new();
        let round = store
            .seed_item(NewItem::new("Round Widget", 299, "round"))
            .await;
        let square = store
            .seed_item(NewItem::new("Square Widget", 199, "square"))
            .await;
        let user = store.insert_user(new_user("bob")).await.unwrap();
        let mut cart = store.create_cart(user.id).await.unwrap();

        cart.items = vec![square.clone(), round.clone(), square.clone()];
        cart.total_cents = 697;
        store.save_cart(&cart).await.unwrap();

        let loaded = store.find_cart(cart.id).await.unwrap().unwrap();
        let ids: Vec<_> = loaded.items.iter().map(|i| i.id).collect();
        assert_eq!(ids, vec![square.id, round.id, square.id]);
        assert_eq!(loaded.total_cents, 697);
    }

    #[tokio::test]
    async fn save_unknown_cart_fails() {
        let store = InMemoryStore::new();
        let cart = CartRecord {
            id: CartId::new(5),
            user_id: UserId::new(1),
            items: vec![],
            total_cents: 0,
        };
        assert!(matches!(
            store.save_cart(&cart).await,
            Err(StoreError::CartNotFound(_))
        ));
    }

    #[tokio::test]
    async fn orders_listed_per_user_in_creation_order() {
        let store = InMemoryStore::new();
        let alice = store.insert_user(new_user("alice")).await.unwrap();
        let bob = store.insert_user(new_user("bob")).await.unwrap();

        for total in [100, 200, 300] {
            store
                .insert_order(NewOrder {
                    user_id: alice.id,
                    items: vec![],
                    total_cents: total,
                })
                .await
                .unwrap();
        }
        store
            .insert_order(NewOrder {
                user_id: bob.id,
                items: vec![],
                total_cents: 999,
            })
            .await
            .unwrap();

        let orders = store.orders_for_user(alice.id).await.unwrap();
        let totals: Vec<_> = orders.iter().map(|o| o.total_cents).collect();
        assert_eq!(totals, vec![100, 200, 300]);
        assert_eq!(store.order_count().await, 4);
    }
}
