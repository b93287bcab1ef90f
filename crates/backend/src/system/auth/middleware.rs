use axum::{body::Body, extract::Request, http::StatusCode, middleware::Next, response::Response};
use contracts::enums::user_role::UserRole;
use contracts::system::auth::ActorContext;
use uuid::Uuid;

use crate::system::users::repository;

/// Resolve the acting user from the X-User-Id header.
///
/// Authentication itself (passwords, tokens) is out of scope; the
/// upstream gateway is trusted to have established identity.
fn parse_actor_id(req: &Request<Body>) -> Result<Uuid, StatusCode> {
    let header = req
        .headers()
        .get("X-User-Id")
        .and_then(|h| h.to_str().ok())
        .ok_or(StatusCode::UNAUTHORIZED)?;

    Uuid::parse_str(header.trim()).map_err(|_| StatusCode::UNAUTHORIZED)
}

async fn resolve_actor(user_id: Uuid) -> Result<ActorContext, StatusCode> {
    let user = repository::get_by_id(&user_id.to_string())
        .await
        .map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)?
        .ok_or(StatusCode::UNAUTHORIZED)?;

    if !user.is_active {
        return Err(StatusCode::UNAUTHORIZED);
    }

    Ok(ActorContext {
        user_id,
        username: user.username,
        role: user.role,
    })
}

/// Middleware that requires a resolvable actor identity
pub async fn require_actor(mut req: Request<Body>, next: Next) -> Result<Response, StatusCode> {
    let user_id = parse_actor_id(&req)?;
    let actor = resolve_actor(user_id).await?;

    // Add actor to request extensions for use in handlers
    req.extensions_mut().insert(actor);

    Ok(next.run(req).await)
}

/// Middleware that requires role ADMIN or above
pub async fn require_admin(mut req: Request<Body>, next: Next) -> Result<Response, StatusCode> {
    let user_id = parse_actor_id(&req)?;
    let actor = resolve_actor(user_id).await?;

    if !actor.role.at_least(UserRole::Admin) {
        return Err(StatusCode::FORBIDDEN);
    }

    req.extensions_mut().insert(actor);

    Ok(next.run(req).await)
}
