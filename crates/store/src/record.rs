//! Persistent row shapes shared by every store implementation.

use chrono::{DateTime, Utc};
use common::{CartId, ItemId, OrderId, UserId};
use serde::{Deserialize, Serialize};

/// A registered user as stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRecord {
    pub id: UserId,
    pub username: String,
    pub password_hash: String,
    /// The user's cart, if one has been created.
    pub cart_id: Option<CartId>,
}

/// Fields needed to register a user; the store assigns the id.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub username: String,
    pub password_hash: String,
}

/// A catalog item as stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemRecord {
    pub id: ItemId,
    pub name: String,
    pub price_cents: i64,
    pub description: String,
}

/// Fields needed to seed a catalog item.
#[derive(Debug, Clone)]
pub struct NewItem {
    pub name: String,
    pub price_cents: i64,
    pub description: String,
}

impl NewItem {
    pub fn new(name: impl Into<String>, price_cents: i64, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            price_cents,
            description: description.into(),
        }
    }
}

/// A cart with its item references resolved, in insertion order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartRecord {
    pub id: CartId,
    pub user_id: UserId,
    pub items: Vec<ItemRecord>,
    pub total_cents: i64,
}

/// A submitted order. Items are copies taken at submission time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderRecord {
    pub id: OrderId,
    pub user_id: UserId,
    pub items: Vec<ItemRecord>,
    pub total_cents: i64,
    pub created_at: DateTime<Utc>,
}

/// Fields needed to persist an order; the store assigns id and timestamp.
#[derive(Debug, Clone)]
pub struct NewOrder {
    pub user_id: UserId,
    pub items: Vec<ItemRecord>,
    pub total_cents: i64,
}
