use axum::{extract::Path, Json};
use serde_json::json;
use uuid::Uuid;

use crate::domain::a005_saved_search::service;
use crate::shared::error::AppError;
use crate::system::auth::extractor::CurrentActor;
use contracts::domain::a005_saved_search::aggregate::{SavedSearch, SavedSearchDto};

fn parse_id(id: &str) -> Result<Uuid, AppError> {
    Uuid::parse_str(id).map_err(|_| AppError::Validation("Invalid saved search ID".into()))
}

/// GET /api/saved_search
pub async fn list(CurrentActor(actor): CurrentActor) -> Result<Json<Vec<SavedSearch>>, AppError> {
    Ok(Json(service::list(&actor).await?))
}

/// POST /api/saved_search
pub async fn create(
    CurrentActor(actor): CurrentActor,
    Json(dto): Json<SavedSearchDto>,
) -> Result<Json<serde_json::Value>, AppError> {
    let id = service::create(dto, &actor).await?;
    Ok(Json(json!({ "id": id.to_string() })))
}

/// GET /api/saved_search/:id
pub async fn get_by_id(
    CurrentActor(actor): CurrentActor,
    Path(id): Path<String>,
) -> Result<Json<SavedSearch>, AppError> {
    let uuid = parse_id(&id)?;
    Ok(Json(service::get_by_id(uuid, &actor).await?))
}

/// DELETE /api/saved_search/:id
pub async fn delete(
    CurrentActor(actor): CurrentActor,
    Path(id): Path<String>,
) -> Result<(), AppError> {
    let uuid = parse_id(&id)?;
    if service::delete(uuid, &actor).await? {
        Ok(())
    } else {
        Err(AppError::NotFound(format!("Saved search {} not found", uuid)))
    }
}
