//! Request identity from the `x-user-id` header.

use axum::async_trait;
use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use intake::RequestContext;

use crate::error::ApiError;

/// Header carrying the signed-in user's id.
pub const USER_HEADER: &str = "x-user-id";

/// The signed-in caller.
///
/// Rejects with `401` when the header is missing or blank. Extracted from
/// the request parts, so it runs before any body is decoded.
#[derive(Debug, Clone)]
pub struct Session(pub RequestContext);

#[async_trait]
impl<S> FromRequestParts<S> for Session
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let ctx = parts
            .headers
            .get(USER_HEADER)
            .and_then(|value| value.to_str().ok())
            .map(RequestContext::authenticated)
            .unwrap_or_else(RequestContext::anonymous);

        ctx.require_user()?;
        Ok(Session(ctx))
    }
}
