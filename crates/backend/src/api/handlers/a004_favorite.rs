use axum::{extract::Path, Json};
use uuid::Uuid;

use crate::domain::a004_favorite::service;
use crate::shared::error::AppError;
use crate::system::auth::extractor::CurrentActor;
use contracts::domain::a004_favorite::aggregate::Favorite;

fn parse_id(id: &str) -> Result<Uuid, AppError> {
    Uuid::parse_str(id).map_err(|_| AppError::Validation("Invalid apartment ID".into()))
}

/// GET /api/favorite
pub async fn list(CurrentActor(actor): CurrentActor) -> Result<Json<Vec<Favorite>>, AppError> {
    Ok(Json(service::list(&actor).await?))
}

/// POST /api/favorite/:apartment_id
pub async fn add(
    CurrentActor(actor): CurrentActor,
    Path(apartment_id): Path<String>,
) -> Result<Json<Favorite>, AppError> {
    let uuid = parse_id(&apartment_id)?;
    Ok(Json(service::add(&actor, uuid).await?))
}

/// DELETE /api/favorite/:apartment_id
pub async fn remove(
    CurrentActor(actor): CurrentActor,
    Path(apartment_id): Path<String>,
) -> Result<(), AppError> {
    let uuid = parse_id(&apartment_id)?;
    if service::remove(&actor, uuid).await? {
        Ok(())
    } else {
        Err(AppError::NotFound("Favorite not found".into()))
    }
}
