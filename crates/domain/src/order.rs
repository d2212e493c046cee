//! Submitted orders.

use chrono::{DateTime, Utc};
use common::{OrderId, UserId};
use serde::{Deserialize, Serialize};
use store::{NewOrder, OrderRecord};

use crate::{Cart, Item, Money};

/// An immutable snapshot of a cart taken at submission time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    id: OrderId,
    user_id: UserId,
    items: Vec<Item>,
    total: Money,
    created_at: DateTime<Utc>,
}

impl Order {
    /// Copies the cart's items and total into a new, unsaved order.
    ///
    /// The order keeps no reference to the cart; later cart mutations do
    /// not affect it.
    pub fn snapshot(cart: &Cart) -> NewOrder {
        NewOrder {
            user_id: cart.user_id(),
            items: cart.items().iter().map(Item::to_record).collect(),
            total_cents: cart.total().cents(),
        }
    }

    pub fn id(&self) -> OrderId {
        self.id
    }

    pub fn user_id(&self) -> UserId {
        self.user_id
    }

    pub fn items(&self) -> &[Item] {
        &self.items
    }

    pub fn total(&self) -> Money {
        self.total
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

impl From<OrderRecord> for Order {
    fn from(record: OrderRecord) -> Self {
        Self {
            id: record.id,
            user_id: record.user_id,
            items: record.items.into_iter().map(Item::from).collect(),
            total: Money::from_cents(record.total_cents),
            created_at: record.created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use common::{CartId, ItemId};

    #[test]
    fn snapshot_copies_items_and_total() {
        let mut cart = Cart::new(CartId::new(1), UserId::new(7));
        let item = Item::new(ItemId::new(3), "Round Widget", Money::from_cents(299), "round");
        cart.add_item(&item, 2);

        let draft = Order::snapshot(&cart);
        cart.add_item(&item, 1);

        assert_eq!(draft.user_id, UserId::new(7));
        assert_eq!(draft.items.len(), 2);
        assert_eq!(draft.total_cents, 598);
    }

    #[test]
    fn snapshot_of_empty_cart_is_empty_order() {
        let cart = Cart::new(CartId::new(1), UserId::new(7));
        let draft = Order::snapshot(&cart);

        assert!(draft.items.is_empty());
        assert_eq!(draft.total_cents, 0);
    }
}
