//! Shared types for the shop backend.

mod types;

pub use types::{CartId, ItemId, OrderId, UserId};
