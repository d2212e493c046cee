use store::{CartStore, OrderStore, UserStore};

use super::{find_cart, require_user};
use crate::auth::Identity;
use crate::{DomainError, Order};

/// Order submission and history for the authenticated user.
pub struct OrderService<S: UserStore + CartStore + OrderStore> {
    store: S,
}

impl<S: UserStore + CartStore + OrderStore> OrderService<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Snapshots the user's cart into a new order.
    ///
    /// An empty cart produces an empty order; a user without any cart is
    /// rejected with `NoCart`. The cart itself is left untouched.
    #[tracing::instrument(skip(self, identity))]
    pub async fn submit(&self, identity: &Identity, username: &str) -> Result<Order, DomainError> {
        identity.authorize(username)?;

        let user = require_user(&self.store, username).await?;

        let Some(cart) = find_cart(&self.store, &user).await? else {
            tracing::warn!(%username, "tried to submit an order without a cart");
            return Err(DomainError::NoCart(username.to_string()));
        };

        let record = self.store.insert_order(Order::snapshot(&cart)).await?;
        let order = Order::from(record);

        metrics::counter!("orders_submitted_total").increment(1);
        tracing::info!(%username, order_id = %order.id(), total = %order.total(), "order placed");
        Ok(order)
    }

    /// Returns every order the user has placed, oldest first.
    #[tracing::instrument(skip(self, identity))]
    pub async fn history(
        &self,
        identity: &Identity,
        username: &str,
    ) -> Result<Vec<Order>, DomainError> {
        identity.authorize(username)?;

        let user = require_user(&self.store, username).await?;
        let orders = self.store.orders_for_user(user.id).await?;

        tracing::debug!(%username, count = orders.len(), "order history viewed");
        Ok(orders.into_iter().map(Order::from).collect())
    }
}
