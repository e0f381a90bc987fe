use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use staffdesk_core::{ActorIdentity, AppError};

use crate::error::ApiError;

/// Header carrying the display name of the acting administrator.
pub const ACTOR_HEADER: &str = "x-actor-name";

/// Actor resolved from the request headers; required on every mutating route.
#[derive(Debug, Clone)]
pub struct RequestActor(pub ActorIdentity);

impl<S> FromRequestParts<S> for RequestActor
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let name = parts
            .headers
            .get(ACTOR_HEADER)
            .and_then(|value| value.to_str().ok())
            .ok_or_else(|| AppError::Unauthorized(format!("{ACTOR_HEADER} header is required")))?;

        let actor = ActorIdentity::new(name).map_err(|_| {
            AppError::Unauthorized(format!("{ACTOR_HEADER} header must not be blank"))
        })?;

        Ok(Self(actor))
    }
}
