use axum::{
    async_trait,
    extract::FromRequestParts,
    http::{request::Parts, StatusCode},
};
use contracts::system::auth::ActorContext;

/// Extractor for getting the current actor from request extensions.
/// Usage in handlers: `async fn handler(CurrentActor(actor): CurrentActor) -> Response`
pub struct CurrentActor(pub ActorContext);

#[async_trait]
impl<S> FromRequestParts<S> for CurrentActor
where
    S: Send + Sync,
{
    type Rejection = StatusCode;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        // Extract ActorContext from request extensions (set by middleware)
        parts
            .extensions
            .get::<ActorContext>()
            .cloned()
            .map(CurrentActor)
            .ok_or(StatusCode::UNAUTHORIZED)
    }
}
