//! Order submission and history endpoints.

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::{Extension, Json};
use chrono::{DateTime, Utc};
use common::{OrderId, UserId};
use domain::{Identity, Order};
use serde::Serialize;
use store::ShopStore;

use super::items::{ItemResponse, item_list};
use crate::error::ApiError;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct OrderResponse {
    pub id: OrderId,
    pub user_id: UserId,
    pub items: Vec<ItemResponse>,
    pub total_cents: i64,
    pub created_at: DateTime<Utc>,
}

impl From<&Order> for OrderResponse {
    fn from(order: &Order) -> Self {
        Self {
            id: order.id(),
            user_id: order.user_id(),
            items: item_list(order.items()),
            total_cents: order.total().cents(),
            created_at: order.created_at(),
        }
    }
}

/// POST /api/order/submit/{username} — turn the current cart into an order.
#[tracing::instrument(skip(state, identity))]
pub async fn submit<S: ShopStore>(
    State(state): State<Arc<AppState<S>>>,
    Extension(identity): Extension<Identity>,
    Path(username): Path<String>,
) -> Result<Json<OrderResponse>, ApiError> {
    let order = state.orders.submit(&identity, &username).await?;
    Ok(Json(OrderResponse::from(&order)))
}

/// GET /api/order/history/{username}
#[tracing::instrument(skip(state, identity))]
pub async fn history<S: ShopStore>(
    State(state): State<Arc<AppState<S>>>,
    Extension(identity): Extension<Identity>,
    Path(username): Path<String>,
) -> Result<Json<Vec<OrderResponse>>, ApiError> {
    let orders = state.orders.history(&identity, &username).await?;
    Ok(Json(orders.iter().map(OrderResponse::from).collect()))
}
