use axum::{
    extract::{Path, Query},
    Json,
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use uuid::Uuid;

use crate::domain::a002_apartment::{service, status};
use crate::shared::error::AppError;
use crate::system::auth::extractor::CurrentActor;
use contracts::domain::a002_apartment::aggregate::{
    Apartment, ApartmentDto, ApartmentSearchFilter,
};
use contracts::domain::a003_apartment_status_log::aggregate::{
    ApartmentStatusLog, BulkStatusSummary, SaleDetails,
};
use contracts::enums::apartment_status::ApartmentStatus;
use contracts::shared::localized::DEFAULT_LANG;

#[derive(Deserialize)]
pub struct ApartmentListParams {
    pub limit: Option<u64>,
    pub offset: Option<u64>,
    pub sort_by: Option<String>,
    pub sort_desc: Option<bool>,
    // Поля фильтра поиска
    pub price_min: Option<f64>,
    pub price_max: Option<f64>,
    pub rooms: Option<i32>,
    pub floor_min: Option<i32>,
    pub floor_max: Option<i32>,
    pub status: Option<ApartmentStatus>,
    pub complex_id: Option<Uuid>,
    pub city: Option<String>,
    pub q: Option<String>,
}

#[derive(Serialize)]
pub struct ApartmentPaginatedResponse {
    pub items: Vec<Apartment>,
    pub total: u64,
    pub page: usize,
    pub page_size: usize,
    pub total_pages: usize,
}

#[derive(Deserialize)]
pub struct LangParam {
    pub lang: Option<String>,
}

#[derive(Serialize)]
pub struct ApartmentResponse {
    #[serde(flatten)]
    pub apartment: Apartment,
    #[serde(rename = "displayTitle")]
    pub display_title: String,
}

/// Тело PATCH /api/apartment/:id/visibility
#[derive(Deserialize)]
pub struct ChangeVisibilityRequest {
    pub status: ApartmentStatus,
    pub reason: Option<String>,
}

/// Тело POST /api/apartment/:id/sold
#[derive(Deserialize)]
pub struct MarkSoldRequest {
    #[serde(rename = "salePrice")]
    pub sale_price: Option<f64>,
    #[serde(rename = "saleDate")]
    pub sale_date: Option<chrono::DateTime<chrono::Utc>>,
    pub reason: Option<String>,
}

/// Тело POST /api/apartment/bulk-status
#[derive(Deserialize)]
pub struct BulkStatusRequest {
    pub ids: Vec<Uuid>,
    pub status: ApartmentStatus,
    pub reason: Option<String>,
}

fn parse_id(id: &str) -> Result<Uuid, AppError> {
    Uuid::parse_str(id).map_err(|_| AppError::Validation("Invalid apartment ID".into()))
}

/// GET /api/apartment?limit=&offset=&sort_by=&sort_desc=&price_min=&...
pub async fn list(
    Query(params): Query<ApartmentListParams>,
) -> Result<Json<ApartmentPaginatedResponse>, AppError> {
    let limit = params.limit.unwrap_or(100).clamp(10, 1000);
    let offset = params.offset.unwrap_or(0);
    let sort_by = params.sort_by.as_deref().unwrap_or("created_at");
    let sort_desc = params.sort_desc.unwrap_or(true);

    let filter = ApartmentSearchFilter {
        price_min: params.price_min,
        price_max: params.price_max,
        rooms: params.rooms,
        floor_min: params.floor_min,
        floor_max: params.floor_max,
        status: params.status,
        complex_id: params.complex_id,
        city: params.city,
        q: params.q,
    };

    let (items, total) = service::list_paginated(limit, offset, sort_by, sort_desc, &filter).await?;

    let page_size = limit as usize;
    let page = (offset as usize) / page_size;
    let total_pages = ((total as usize) + page_size - 1) / page_size;

    Ok(Json(ApartmentPaginatedResponse {
        items,
        total,
        page,
        page_size,
        total_pages,
    }))
}

/// GET /api/apartment/:id?lang=
pub async fn get_by_id(
    Path(id): Path<String>,
    Query(params): Query<LangParam>,
) -> Result<Json<ApartmentResponse>, AppError> {
    let uuid = parse_id(&id)?;
    let lang = params.lang.as_deref().unwrap_or(DEFAULT_LANG).to_string();

    let apartment = service::get_by_id(uuid)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Apartment {} not found", uuid)))?;

    let display_title = apartment.display_title(&lang).to_string();
    Ok(Json(ApartmentResponse {
        apartment,
        display_title,
    }))
}

/// POST /api/apartment
pub async fn upsert(
    CurrentActor(actor): CurrentActor,
    Json(dto): Json<ApartmentDto>,
) -> Result<Json<serde_json::Value>, AppError> {
    tracing::debug!(
        "Received apartment upsert: id={:?}, description={}",
        dto.id,
        dto.description
    );

    let id = if dto.id.is_some() {
        let id = dto.id.clone().unwrap_or_default();
        service::update(dto, &actor).await?;
        id
    } else {
        service::create(dto, &actor).await?.to_string()
    };
    Ok(Json(json!({ "id": id })))
}

/// DELETE /api/apartment/:id
pub async fn delete(
    CurrentActor(actor): CurrentActor,
    Path(id): Path<String>,
) -> Result<(), AppError> {
    let uuid = parse_id(&id)?;
    if service::delete(uuid, &actor).await? {
        Ok(())
    } else {
        Err(AppError::NotFound(format!("Apartment {} not found", uuid)))
    }
}

/// PATCH /api/apartment/:id/visibility
pub async fn change_visibility(
    CurrentActor(actor): CurrentActor,
    Path(id): Path<String>,
    Json(req): Json<ChangeVisibilityRequest>,
) -> Result<Json<Apartment>, AppError> {
    let uuid = parse_id(&id)?;
    let updated = status::change_status(uuid, req.status, &actor, req.reason).await?;
    Ok(Json(updated))
}

/// POST /api/apartment/:id/sold
pub async fn mark_sold(
    CurrentActor(actor): CurrentActor,
    Path(id): Path<String>,
    Json(req): Json<MarkSoldRequest>,
) -> Result<Json<Apartment>, AppError> {
    let uuid = parse_id(&id)?;
    let details = SaleDetails {
        sale_price: req.sale_price,
        sale_date: req.sale_date,
    };
    let updated = status::mark_sold(uuid, &actor, details, req.reason).await?;
    Ok(Json(updated))
}

/// POST /api/apartment/bulk-status
pub async fn bulk_status(
    CurrentActor(actor): CurrentActor,
    Json(req): Json<BulkStatusRequest>,
) -> Result<Json<BulkStatusSummary>, AppError> {
    if req.ids.is_empty() {
        return Err(AppError::Validation("ids must not be empty".into()));
    }
    let summary = status::bulk_status_change(&req.ids, req.status, &actor, req.reason).await;
    Ok(Json(summary))
}

/// GET /api/apartment/:id/status-log
pub async fn status_log(
    CurrentActor(actor): CurrentActor,
    Path(id): Path<String>,
) -> Result<Json<Vec<ApartmentStatusLog>>, AppError> {
    let uuid = parse_id(&id)?;
    let rows = status::get_history(uuid, &actor).await?;
    Ok(Json(rows))
}
