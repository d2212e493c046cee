pub mod error;
pub mod memory;
pub mod postgres;
pub mod record;
pub mod seed;
pub mod store;

pub use common::{CartId, ItemId, OrderId, UserId};
pub use error::{Result, StoreError};
pub use memory::InMemoryStore;
pub use postgres::PostgresStore;
pub use record::{CartRecord, ItemRecord, NewItem, NewOrder, NewUser, OrderRecord, UserRecord};
pub use seed::default_catalog;
pub use store::{CartStore, ItemStore, OrderStore, ShopStore, UserStore};
