use axum::{
    extract::{Path, Query},
    Json,
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use uuid::Uuid;

use crate::domain::a001_complex;
use crate::shared::error::AppError;
use contracts::domain::a001_complex::aggregate::{Complex, ComplexDto};
use contracts::shared::localized::DEFAULT_LANG;

#[derive(Deserialize)]
pub struct LangParam {
    pub lang: Option<String>,
}

#[derive(Serialize)]
pub struct ComplexResponse {
    #[serde(flatten)]
    pub complex: Complex,
    #[serde(rename = "displayName")]
    pub display_name: String,
}

impl ComplexResponse {
    fn new(complex: Complex, lang: &str) -> Self {
        let display_name = complex.display_name(lang).to_string();
        Self {
            complex,
            display_name,
        }
    }
}

/// GET /api/complex
pub async fn list_all(
    Query(params): Query<LangParam>,
) -> Result<Json<Vec<ComplexResponse>>, AppError> {
    let lang = params.lang.as_deref().unwrap_or(DEFAULT_LANG).to_string();
    let items = a001_complex::service::list_all().await?;
    Ok(Json(
        items
            .into_iter()
            .map(|c| ComplexResponse::new(c, &lang))
            .collect(),
    ))
}

/// GET /api/complex/:id
pub async fn get_by_id(
    Path(id): Path<String>,
    Query(params): Query<LangParam>,
) -> Result<Json<ComplexResponse>, AppError> {
    let uuid =
        Uuid::parse_str(&id).map_err(|_| AppError::Validation("Invalid complex ID".into()))?;
    let lang = params.lang.as_deref().unwrap_or(DEFAULT_LANG).to_string();

    let complex = a001_complex::service::get_by_id(uuid)
        .await?
        .filter(|c| !c.base.metadata.is_deleted)
        .ok_or_else(|| AppError::NotFound(format!("Complex {} not found", uuid)))?;

    Ok(Json(ComplexResponse::new(complex, &lang)))
}

/// POST /api/complex
pub async fn upsert(Json(dto): Json<ComplexDto>) -> Result<Json<serde_json::Value>, AppError> {
    tracing::debug!("Received complex upsert: id={:?}, description={}", dto.id, dto.description);

    let id = if dto.id.is_some() {
        let id = dto.id.clone().unwrap_or_default();
        a001_complex::service::update(dto).await?;
        id
    } else {
        a001_complex::service::create(dto).await?.to_string()
    };
    Ok(Json(json!({ "id": id })))
}

/// DELETE /api/complex/:id
pub async fn delete(Path(id): Path<String>) -> Result<(), AppError> {
    let uuid =
        Uuid::parse_str(&id).map_err(|_| AppError::Validation("Invalid complex ID".into()))?;
    if a001_complex::service::delete(uuid).await? {
        Ok(())
    } else {
        Err(AppError::NotFound(format!("Complex {} not found", uuid)))
    }
}
