use axum::{extract::Path, Json};
use serde_json::json;

use crate::shared::error::AppError;
use crate::system::auth::extractor::CurrentActor;
use crate::system::users::service;
use contracts::system::users::{CreateUserDto, UpdateUserDto, User};

/// GET /api/system/users
pub async fn list(CurrentActor(_actor): CurrentActor) -> Result<Json<Vec<User>>, AppError> {
    Ok(Json(service::list_all().await?))
}

/// GET /api/system/users/:id
pub async fn get_by_id(
    CurrentActor(_actor): CurrentActor,
    Path(id): Path<String>,
) -> Result<Json<User>, AppError> {
    let user = service::get_by_id(&id)
        .await?
        .ok_or_else(|| AppError::NotFound("User not found".into()))?;
    Ok(Json(user))
}

/// POST /api/system/users
pub async fn create(
    CurrentActor(actor): CurrentActor,
    Json(dto): Json<CreateUserDto>,
) -> Result<Json<serde_json::Value>, AppError> {
    let id = service::create(dto, &actor).await?;
    Ok(Json(json!({ "id": id })))
}

/// PUT /api/system/users/:id
pub async fn update(
    CurrentActor(actor): CurrentActor,
    Path(id): Path<String>,
    Json(mut dto): Json<UpdateUserDto>,
) -> Result<(), AppError> {
    dto.id = id;
    service::update(dto, &actor).await?;
    Ok(())
}

/// DELETE /api/system/users/:id
pub async fn delete(
    CurrentActor(actor): CurrentActor,
    Path(id): Path<String>,
) -> Result<(), AppError> {
    if service::delete(&id, &actor).await? {
        Ok(())
    } else {
        Err(AppError::NotFound("User not found".into()))
    }
}
