//! Registration, login, and profile endpoints.

use std::sync::Arc;

use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::extract::{Path, State};
use axum::http::header::AUTHORIZATION;
use axum::response::IntoResponse;
use axum::{Extension, Json};
use common::{CartId, UserId};
use domain::{Identity, User};
use serde::{Deserialize, Serialize};
use store::ShopStore;

use crate::error::ApiError;
use crate::state::AppState;

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateUserRequest {
    pub username: String,
    pub password: String,
    pub confirm_password: String,
}

#[derive(Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// A user as returned over HTTP. The password hash is never included.
#[derive(Debug, Serialize)]
pub struct UserResponse {
    pub id: UserId,
    pub username: String,
    pub cart_id: Option<CartId>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            username: user.username,
            cart_id: user.cart_id,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct TokenResponse {
    pub token: String,
}

/// POST /api/user/create — register a new user with an empty cart.
#[tracing::instrument(skip(state, payload))]
pub async fn create<S: ShopStore>(
    State(state): State<Arc<AppState<S>>>,
    payload: Result<Json<CreateUserRequest>, JsonRejection>,
) -> Result<Json<UserResponse>, ApiError> {
    let Json(req) = payload?;
    let user = state
        .users
        .create_user(&req.username, &req.password, &req.confirm_password)
        .await?;
    Ok(Json(UserResponse::from(user)))
}

/// POST /login — exchange credentials for a bearer token.
///
/// The token is returned both in the `Authorization` header and the body.
#[tracing::instrument(skip(state, payload))]
pub async fn login<S: ShopStore>(
    State(state): State<Arc<AppState<S>>>,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Json(req) = payload?;
    let token = state.users.login(&req.username, &req.password).await?;
    Ok((
        [(AUTHORIZATION, format!("Bearer {token}"))],
        Json(TokenResponse { token }),
    ))
}

/// GET /api/user/id/{id}
#[tracing::instrument(skip(state, identity, path))]
pub async fn by_id<S: ShopStore>(
    State(state): State<Arc<AppState<S>>>,
    Extension(identity): Extension<Identity>,
    path: Result<Path<UserId>, PathRejection>,
) -> Result<Json<UserResponse>, ApiError> {
    let Path(id) = path?;
    let user = state.users.find_by_id(&identity, id).await?;
    Ok(Json(UserResponse::from(user)))
}

/// GET /api/user/{username}
#[tracing::instrument(skip(state, identity))]
pub async fn by_username<S: ShopStore>(
    State(state): State<Arc<AppState<S>>>,
    Extension(identity): Extension<Identity>,
    Path(username): Path<String>,
) -> Result<Json<UserResponse>, ApiError> {
    let user = state.users.find_by_username(&identity, &username).await?;
    Ok(Json(UserResponse::from(user)))
}
