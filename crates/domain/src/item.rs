//! Catalog items.

use common::ItemId;
use serde::{Deserialize, Serialize};
use store::ItemRecord;

use crate::Money;

/// A catalog entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    pub id: ItemId,
    pub name: String,
    pub price: Money,
    pub description: String,
}

impl Item {
    pub fn new(
        id: ItemId,
        name: impl Into<String>,
        price: Money,
        description: impl Into<String>,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            price,
            description: description.into(),
        }
    }

    pub fn to_record(&self) -> ItemRecord {
        ItemRecord {
            id: self.id,
            name: self.name.clone(),
            price_cents: self.price.cents(),
            description: self.description.clone(),
        }
    }
}

impl From<ItemRecord> for Item {
    fn from(record: ItemRecord) -> Self {
        Self {
            id: record.id,
            name: record.name,
            price: Money::from_cents(record.price_cents),
            description: record.description,
        }
    }
}
