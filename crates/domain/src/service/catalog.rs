use common::ItemId;
use store::ItemStore;

use crate::{DomainError, Item};

/// Read-only catalog lookups. None of these require authentication.
pub struct CatalogService<S: ItemStore> {
    store: S,
}

impl<S: ItemStore> CatalogService<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Returns the full catalog.
    #[tracing::instrument(skip(self))]
    pub async fn list_items(&self) -> Result<Vec<Item>, DomainError> {
        let items = self.store.list_items().await?;
        Ok(items.into_iter().map(Item::from).collect())
    }

    /// Returns one item by id.
    #[tracing::instrument(skip(self))]
    pub async fn get_item(&self, id: ItemId) -> Result<Item, DomainError> {
        self.store
            .find_item(id)
            .await?
            .map(Item::from)
            .ok_or(DomainError::ItemNotFound(id))
    }

    /// Returns every item with exactly this name; an empty match is an error.
    #[tracing::instrument(skip(self))]
    pub async fn find_items_by_name(&self, name: &str) -> Result<Vec<Item>, DomainError> {
        let items = self.store.find_items_by_name(name).await?;
        if items.is_empty() {
            return Err(DomainError::NoItemsNamed(name.to_string()));
        }
        Ok(items.into_iter().map(Item::from).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use store::InMemoryStore;

    async fn service() -> CatalogService<InMemoryStore> {
        CatalogService::new(InMemoryStore::with_default_catalog().await)
    }

    #[tokio::test]
    async fn test_list_items() {
        let items = service().await.list_items().await.unwrap();
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].price.cents(), 299);
    }

    #[tokio::test]
    async fn test_get_item() {
        let service = service().await;
        let first = service.list_items().await.unwrap().remove(0);

        let item = service.get_item(first.id).await.unwrap();
        assert_eq!(item, first);

        let missing = service.get_item(ItemId::new(10_000)).await;
        assert!(matches!(missing, Err(DomainError::ItemNotFound(_))));
    }

    #[tokio::test]
    async fn test_find_items_by_name() {
        let service = service().await;

        let items = service.find_items_by_name("Square Widget").await.unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].description, "A widget that is square");

        let missing = service.find_items_by_name("square widget").await;
        assert!(matches!(missing, Err(DomainError::NoItemsNamed(_))));
    }
}
