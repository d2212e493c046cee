//! Catalog endpoints. None of these require a token.

use std::sync::Arc;

use axum::Json;
use axum::extract::rejection::PathRejection;
use axum::extract::{Path, State};
use common::ItemId;
use domain::Item;
use serde::Serialize;
use store::ShopStore;

use crate::error::ApiError;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct ItemResponse {
    pub id: ItemId,
    pub name: String,
    pub price_cents: i64,
    pub description: String,
}

impl From<&Item> for ItemResponse {
    fn from(item: &Item) -> Self {
        Self {
            id: item.id,
            name: item.name.clone(),
            price_cents: item.price.cents(),
            description: item.description.clone(),
        }
    }
}

pub(crate) fn item_list(items: &[Item]) -> Vec<ItemResponse> {
    items.iter().map(ItemResponse::from).collect()
}

/// GET /api/item — the whole catalog.
#[tracing::instrument(skip(state))]
pub async fn list<S: ShopStore>(
    State(state): State<Arc<AppState<S>>>,
) -> Result<Json<Vec<ItemResponse>>, ApiError> {
    let items = state.catalog.list_items().await?;
    Ok(Json(item_list(&items)))
}

/// GET /api/item/{id} — one item by id.
#[tracing::instrument(skip(state, path))]
pub async fn get<S: ShopStore>(
    State(state): State<Arc<AppState<S>>>,
    path: Result<Path<ItemId>, PathRejection>,
) -> Result<Json<ItemResponse>, ApiError> {
    let Path(id) = path?;
    let item = state.catalog.get_item(id).await?;
    Ok(Json(ItemResponse::from(&item)))
}

/// GET /api/item/name/{name} — every item with exactly this name.
#[tracing::instrument(skip(state))]
pub async fn by_name<S: ShopStore>(
    State(state): State<Arc<AppState<S>>>,
    Path(name): Path<String>,
) -> Result<Json<Vec<ItemResponse>>, ApiError> {
    let items = state.catalog.find_items_by_name(&name).await?;
    Ok(Json(item_list(&items)))
}
