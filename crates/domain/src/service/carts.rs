use common::ItemId;
use store::{CartStore, ItemStore, UserStore};

use super::{find_or_create_cart, require_user};
use crate::auth::Identity;
use crate::cart::MAX_CART_ENTRIES;
use crate::{Cart, DomainError, Item};

/// Cart mutations on behalf of the authenticated user.
pub struct CartService<S: UserStore + ItemStore + CartStore> {
    store: S,
}

impl<S: UserStore + ItemStore + CartStore> CartService<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Adds `quantity` copies of the item to the user's cart.
    ///
    /// A non-positive quantity leaves the cart unchanged, as does one that
    /// would push the cart past [`MAX_CART_ENTRIES`]; the unchanged cart is
    /// still returned. The cart is created if the user does not have one yet.
    #[tracing::instrument(skip(self, identity))]
    pub async fn add_to_cart(
        &self,
        identity: &Identity,
        username: &str,
        item_id: ItemId,
        quantity: i32,
    ) -> Result<Cart, DomainError> {
        let (mut cart, item) = self.load(identity, username, item_id).await?;

        if !cart.add_item(&item, clamp_quantity(quantity)) {
            tracing::warn!(
                %username,
                quantity,
                cart_size = cart.len(),
                max = MAX_CART_ENTRIES,
                "cart capacity exceeded; nothing added"
            );
            return Ok(cart);
        }
        self.store.save_cart(&cart.to_record()).await?;

        metrics::counter!("cart_mutations_total", "op" => "add").increment(1);
        tracing::debug!(%username, %item_id, quantity, total = %cart.total(), "added to cart");
        Ok(cart)
    }

    /// Removes up to `quantity` copies of the item from the user's cart.
    ///
    /// Nothing is removed when `quantity` exceeds the number of entries in
    /// the whole cart; the unchanged cart is still returned.
    #[tracing::instrument(skip(self, identity))]
    pub async fn remove_from_cart(
        &self,
        identity: &Identity,
        username: &str,
        item_id: ItemId,
        quantity: i32,
    ) -> Result<Cart, DomainError> {
        let (mut cart, item) = self.load(identity, username, item_id).await?;

        if !cart.remove_item(&item, clamp_quantity(quantity)) {
            tracing::debug!(
                %username,
                quantity,
                cart_size = cart.len(),
                "quantity exceeds cart size; nothing removed"
            );
        }
        self.store.save_cart(&cart.to_record()).await?;

        metrics::counter!("cart_mutations_total", "op" => "remove").increment(1);
        Ok(cart)
    }

    async fn load(
        &self,
        identity: &Identity,
        username: &str,
        item_id: ItemId,
    ) -> Result<(Cart, Item), DomainError> {
        identity.authorize(username)?;

        let user = require_user(&self.store, username).await?;

        let Some(item) = self.store.find_item(item_id).await? else {
            tracing::warn!(%item_id, "item not found");
            return Err(DomainError::ItemNotFound(item_id));
        };

        let cart = find_or_create_cart(&self.store, &user).await?;
        Ok((cart, Item::from(item)))
    }
}

fn clamp_quantity(quantity: i32) -> u32 {
    u32::try_from(quantity).unwrap_or(0)
}
