//! Cart mutation endpoints.

use std::sync::Arc;

use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use axum::{Extension, Json};
use common::{CartId, ItemId, UserId};
use domain::{Cart, Identity};
use serde::{Deserialize, Serialize};
use store::ShopStore;

use super::items::{ItemResponse, item_list};
use crate::error::ApiError;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModifyCartRequest {
    pub username: String,
    pub item_id: ItemId,
    #[serde(default)]
    pub quantity: i32,
}

#[derive(Debug, Serialize)]
pub struct CartResponse {
    pub id: CartId,
    pub user_id: UserId,
    pub items: Vec<ItemResponse>,
    pub total_cents: i64,
}

impl From<&Cart> for CartResponse {
    fn from(cart: &Cart) -> Self {
        Self {
            id: cart.id(),
            user_id: cart.user_id(),
            items: item_list(cart.items()),
            total_cents: cart.total().cents(),
        }
    }
}

/// POST /api/cart/addToCart
#[tracing::instrument(skip(state, identity, payload))]
pub async fn add<S: ShopStore>(
    State(state): State<Arc<AppState<S>>>,
    Extension(identity): Extension<Identity>,
    payload: Result<Json<ModifyCartRequest>, JsonRejection>,
) -> Result<Json<CartResponse>, ApiError> {
    let Json(req) = payload?;
    let cart = state
        .carts
        .add_to_cart(&identity, &req.username, req.item_id, req.quantity)
        .await?;
    Ok(Json(CartResponse::from(&cart)))
}

/// POST /api/cart/removeFromCart
#[tracing::instrument(skip(state, identity, payload))]
pub async fn remove<S: ShopStore>(
    State(state): State<Arc<AppState<S>>>,
    Extension(identity): Extension<Identity>,
    payload: Result<Json<ModifyCartRequest>, JsonRejection>,
) -> Result<Json<CartResponse>, ApiError> {
    let Json(req) = payload?;
    let cart = state
        .carts
        .remove_from_cart(&identity, &req.username, req.item_id, req.quantity)
        .await?;
    Ok(Json(CartResponse::from(&cart)))
}
