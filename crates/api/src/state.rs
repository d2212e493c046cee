//! Shared application state.

use domain::{CartService, CatalogService, OrderService, PasswordHasher, TokenKeys, UserService};
use store::ShopStore;

/// Services and keys shared by every handler.
pub struct AppState<S: ShopStore> {
    pub users: UserService<S>,
    pub carts: CartService<S>,
    pub orders: OrderService<S>,
    pub catalog: CatalogService<S>,
    pub keys: TokenKeys,
}

impl<S: ShopStore> AppState<S> {
    /// Wires every service to the same store.
    pub fn new(store: S, hasher: PasswordHasher, keys: TokenKeys) -> Self {
        Self {
            users: UserService::new(store.clone(), hasher, keys.clone()),
            carts: CartService::new(store.clone()),
            orders: OrderService::new(store.clone()),
            catalog: CatalogService::new(store),
            keys,
        }
    }
}
