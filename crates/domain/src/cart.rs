//! Cart aggregate and its mutation rules.

use common::{CartId, UserId};
use serde::{Deserialize, Serialize};
use store::CartRecord;

use crate::{Item, Money};

/// Upper bound on the number of entries a single cart may hold.
pub const MAX_CART_ENTRIES: usize = 1_000;

/// A user's shopping cart.
///
/// Holds an ordered multiset of items: adding the same item twice yields two
/// entries. `total` always equals the sum of the item prices.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cart {
    id: CartId,
    user_id: UserId,
    items: Vec<Item>,
    total: Money,
}

impl Cart {
    /// Creates an empty cart.
    pub fn new(id: CartId, user_id: UserId) -> Self {
        Self {
            id,
            user_id,
            items: Vec::new(),
            total: Money::zero(),
        }
    }

    pub fn id(&self) -> CartId {
        self.id
    }

    pub fn user_id(&self) -> UserId {
        self.user_id
    }

    /// Returns the items in insertion order, duplicates included.
    pub fn items(&self) -> &[Item] {
        &self.items
    }

    /// Returns the number of entries in the cart.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn total(&self) -> Money {
        self.total
    }

    /// Appends `item` to the cart `quantity` times.
    ///
    /// Nothing is added when the cart would end up holding more than
    /// [`MAX_CART_ENTRIES`] entries, or when the space cannot be reserved.
    /// Returns whether the items were added.
    pub fn add_item(&mut self, item: &Item, quantity: u32) -> bool {
        let quantity = quantity as usize;
        if self.items.len().saturating_add(quantity) > MAX_CART_ENTRIES {
            return false;
        }
        if self.items.try_reserve(quantity).is_err() {
            return false;
        }

        self.items.extend(std::iter::repeat_n(item, quantity).cloned());
        self.recompute_total();
        true
    }

    /// Removes one occurrence of `item` per unit of `quantity`.
    ///
    /// The removal only happens when the cart holds at least `quantity`
    /// entries in total, counting every item rather than just `item`.
    /// Iterations that find no matching entry do nothing. Returns whether
    /// the guard allowed the removal.
    pub fn remove_item(&mut self, item: &Item, quantity: u32) -> bool {
        if quantity as usize > self.items.len() {
            return false;
        }

        for _ in 0..quantity {
            if let Some(pos) = self.items.iter().position(|i| i.id == item.id) {
                self.items.remove(pos);
            }
        }
        self.recompute_total();
        true
    }

    fn recompute_total(&mut self) {
        self.total = self.items.iter().map(|i| i.price).sum();
    }

    /// Converts the cart into its persistent form.
    pub fn to_record(&self) -> CartRecord {
        CartRecord {
            id: self.id,
            user_id: self.user_id,
            items: self.items.iter().map(Item::to_record).collect(),
            total_cents: self.total.cents(),
        }
    }
}

impl From<CartRecord> for Cart {
    fn from(record: CartRecord) -> Self {
        let mut cart = Self {
            id: record.id,
            user_id: record.user_id,
            items: record.items.into_iter().map(Item::from).collect(),
            total: Money::from_cents(record.total_cents),
        };
        cart.recompute_total();
        cart
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use common::ItemId;

    fn widget(id: i64, cents: i64) -> Item {
        Item::new(ItemId::new(id), format!("Widget {id}"), Money::from_cents(cents), "")
    }

    fn empty_cart() -> Cart {
        Cart::new(CartId::new(1), UserId::new(1))
    }

    #[test]
    fn add_appends_quantity_entries() {
        let mut cart = empty_cart();
        let item = widget(1, 1099);

        cart.add_item(&item, 2);

        assert_eq!(cart.len(), 2);
        assert_eq!(cart.total().cents(), 2198);
        assert!(cart.items().iter().all(|i| i.id == item.id));
    }

    #[test]
    fn add_zero_is_noop() {
        let mut cart = empty_cart();
        cart.add_item(&widget(1, 1099), 0);

        assert!(cart.is_empty());
        assert!(cart.total().is_zero());
    }

    #[test]
    fn add_beyond_capacity_leaves_cart_unchanged() {
        let mut cart = empty_cart();
        let item = widget(1, 1099);
        cart.add_item(&item, 2);
        let before = cart.clone();

        assert!(!cart.add_item(&item, i32::MAX as u32));
        assert!(!cart.add_item(&item, u32::MAX));
        assert!(!cart.add_item(&item, (MAX_CART_ENTRIES - 1) as u32));

        assert_eq!(cart, before);
    }

    #[test]
    fn add_up_to_capacity_is_allowed() {
        let mut cart = empty_cart();
        let item = widget(1, 1);

        assert!(cart.add_item(&item, MAX_CART_ENTRIES as u32));
        assert_eq!(cart.len(), MAX_CART_ENTRIES);
        assert!(!cart.add_item(&item, 1));
    }

    #[test]
    fn remove_deletes_one_occurrence_per_unit() {
        let mut cart = empty_cart();
        let item = widget(1, 1099);
        cart.add_item(&item, 2);

        assert!(cart.remove_item(&item, 1));

        assert_eq!(cart.len(), 1);
        assert_eq!(cart.total().cents(), 1099);
    }

    #[test]
    fn remove_more_than_cart_size_leaves_cart_unchanged() {
        let mut cart = empty_cart();
        let item = widget(1, 1099);
        cart.add_item(&item, 2);
        let before = cart.clone();

        assert!(!cart.remove_item(&item, 3));

        assert_eq!(cart, before);
    }

    #[test]
    fn remove_guard_counts_every_item_not_just_the_target() {
        // One round widget plus two square widgets: asking to remove two
        // round widgets passes the guard because the cart holds three
        // entries, and removes the single round widget present.
        let round = widget(1, 299);
        let square = widget(2, 199);
        let mut cart = empty_cart();
        cart.add_item(&round, 1);
        cart.add_item(&square, 2);

        assert!(cart.remove_item(&round, 2));

        assert_eq!(cart.len(), 2);
        assert!(cart.items().iter().all(|i| i.id == square.id));
        assert_eq!(cart.total().cents(), 398);
    }

    #[test]
    fn remove_absent_item_within_guard_changes_nothing() {
        let mut cart = empty_cart();
        let round = widget(1, 299);
        cart.add_item(&round, 2);

        assert!(cart.remove_item(&widget(2, 199), 1));

        assert_eq!(cart.len(), 2);
        assert_eq!(cart.total().cents(), 598);
    }

    #[test]
    fn remove_keeps_remaining_order() {
        let round = widget(1, 299);
        let square = widget(2, 199);
        let mut cart = empty_cart();
        cart.add_item(&round, 1);
        cart.add_item(&square, 1);
        cart.add_item(&round, 1);

        cart.remove_item(&round, 1);

        let ids: Vec<_> = cart.items().iter().map(|i| i.id.as_i64()).collect();
        assert_eq!(ids, vec![2, 1]);
    }

    #[test]
    fn record_round_trip_recomputes_total() {
        let mut cart = empty_cart();
        cart.add_item(&widget(1, 299), 3);

        let mut record = cart.to_record();
        assert_eq!(record.total_cents, 897);

        record.total_cents = 0;
        let restored = Cart::from(record);
        assert_eq!(restored.total().cents(), 897);
        assert_eq!(restored.len(), 3);
    }
}
