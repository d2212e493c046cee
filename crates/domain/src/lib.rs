//! Domain layer for the shop backend.
//!
//! This crate provides:
//! - Money, Item, Cart, Order, and User types with the cart mutation rules
//! - Token issuance/verification and the identity check for authenticated calls
//! - Services that tie authorization, store access, and domain rules together

pub mod auth;
pub mod cart;
pub mod error;
pub mod item;
pub mod money;
pub mod order;
pub mod service;
pub mod user;

pub use auth::{AuthError, Identity, PasswordHasher, TokenKeys};
pub use cart::{Cart, MAX_CART_ENTRIES};
pub use error::DomainError;
pub use item::Item;
pub use money::Money;
pub use order::Order;
pub use service::{CartService, CatalogService, OrderService, UserService};
pub use user::{MIN_PASSWORD_LEN, User, ValidationError};
