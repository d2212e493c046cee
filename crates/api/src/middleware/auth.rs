//! Bearer token extraction and verification.

use std::sync::Arc;

use axum::extract::{Request, State};
use axum::http::HeaderMap;
use axum::http::header::AUTHORIZATION;
use axum::middleware::Next;
use axum::response::Response;
use domain::Identity;
use store::ShopStore;

use crate::state::AppState;

/// Resolves the caller's [`Identity`] from `Authorization: Bearer <token>`
/// and stores it in the request extensions.
///
/// A missing header, a different scheme, or a token that fails
/// verification all resolve to the anonymous identity; the services reject
/// it when the operation needs one.
pub async fn resolve_identity<S: ShopStore>(
    State(state): State<Arc<AppState<S>>>,
    mut request: Request,
    next: Next,
) -> Response {
    let identity = match bearer_token(request.headers()) {
        Some(token) => state
            .keys
            .verify(token)
            .map(Identity::verified)
            .unwrap_or_default(),
        None => {
            tracing::debug!(path = %request.uri().path(), "request without bearer token");
            Identity::anonymous()
        }
    };

    request.extensions_mut().insert(identity);
    next.run(request).await
}

fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn headers(value: &'static str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, HeaderValue::from_static(value));
        headers
    }

    #[test]
    fn test_bearer_token_strips_prefix() {
        assert_eq!(bearer_token(&headers("Bearer abc.def.ghi")), Some("abc.def.ghi"));
    }

    #[test]
    fn test_bearer_token_rejects_other_schemes() {
        assert_eq!(bearer_token(&headers("Basic Ym9iOnB3")), None);
        assert_eq!(bearer_token(&headers("bearer abc")), None);
        assert_eq!(bearer_token(&HeaderMap::new()), None);
    }
}
