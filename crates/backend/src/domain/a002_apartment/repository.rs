use chrono::Utc;
use contracts::domain::a002_apartment::aggregate::{
    Apartment, ApartmentId, ApartmentSearchFilter,
};
use contracts::domain::common::EntityMetadata;
use contracts::enums::apartment_status::ApartmentStatus;
use contracts::shared::localized::LocalizedText;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use sea_orm::entity::prelude::*;
use sea_orm::{
    ColumnTrait, Condition, ConnectionTrait, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, QuerySelect, Set,
};

use crate::shared::data::db::get_connection;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "a002_apartment")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub code: String,
    pub description: String,
    pub comment: Option<String>,
    pub price: f64,
    pub rooms: i32,
    pub area: f64,
    pub floor: i32,
    pub status: String,
    pub seller_id: String,
    pub complex_id: Option<String>,
    pub titles: Option<String>,
    pub is_deleted: bool,
    pub created_at: Option<chrono::DateTime<chrono::Utc>>,
    pub updated_at: Option<chrono::DateTime<chrono::Utc>>,
    pub version: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for Apartment {
    fn from(m: Model) -> Self {
        let metadata = EntityMetadata {
            created_at: m.created_at.unwrap_or_else(Utc::now),
            updated_at: m.updated_at.unwrap_or_else(Utc::now),
            is_deleted: m.is_deleted,
            version: m.version,
        };
        let uuid = Uuid::parse_str(&m.id).unwrap_or_else(|_| Uuid::new_v4());
        let seller_id = Uuid::parse_str(&m.seller_id).unwrap_or_default();
        let complex_id = m
            .complex_id
            .as_deref()
            .and_then(|s| Uuid::parse_str(s).ok());

        let status = ApartmentStatus::from_code(&m.status).unwrap_or(ApartmentStatus::Hidden);

        let titles: LocalizedText = m
            .titles
            .as_deref()
            .and_then(|raw| serde_json::from_str(raw).ok())
            .unwrap_or_default();

        Apartment::from_parts(
            ApartmentId(uuid),
            m.code,
            m.description,
            m.comment,
            metadata,
            m.price,
            m.rooms,
            m.area,
            m.floor,
            status,
            seller_id,
            complex_id,
            titles,
        )
    }
}

fn conn() -> &'static DatabaseConnection {
    get_connection()
}

fn titles_json(aggregate: &Apartment) -> Option<String> {
    if aggregate.titles.is_empty() {
        None
    } else {
        serde_json::to_string(&aggregate.titles).ok()
    }
}

pub async fn get_by_id(id: Uuid) -> anyhow::Result<Option<Apartment>> {
    let result = Entity::find_by_id(id.to_string()).one(conn()).await?;
    Ok(result.map(Into::into))
}

/// Постраничный список с фильтром поиска.
///
/// Фильтр по городу раскрывается через ID комплексов этого города.
pub async fn list_paginated(
    limit: u64,
    offset: u64,
    sort_by: &str,
    sort_desc: bool,
    filter: &ApartmentSearchFilter,
) -> anyhow::Result<(Vec<Apartment>, u64)> {
    let mut select = Entity::find().filter(Column::IsDeleted.eq(false));

    if let Some(min) = filter.price_min {
        select = select.filter(Column::Price.gte(min));
    }
    if let Some(max) = filter.price_max {
        select = select.filter(Column::Price.lte(max));
    }
    if let Some(rooms) = filter.rooms {
        select = select.filter(Column::Rooms.eq(rooms));
    }
    if let Some(min) = filter.floor_min {
        select = select.filter(Column::Floor.gte(min));
    }
    if let Some(max) = filter.floor_max {
        select = select.filter(Column::Floor.lte(max));
    }
    if let Some(status) = filter.status {
        select = select.filter(Column::Status.eq(status.code()));
    }
    if let Some(complex_id) = filter.complex_id {
        select = select.filter(Column::ComplexId.eq(complex_id.to_string()));
    }
    if let Some(city) = filter.city.as_deref().filter(|c| !c.trim().is_empty()) {
        let ids = crate::domain::a001_complex::repository::ids_by_city(city.trim()).await?;
        if ids.is_empty() {
            return Ok((Vec::new(), 0));
        }
        select = select.filter(Column::ComplexId.is_in(ids));
    }
    if let Some(q) = filter.q.as_deref().filter(|q| !q.trim().is_empty()) {
        let q = q.trim();
        select = select.filter(
            Condition::any()
                .add(Column::Description.contains(q))
                .add(Column::Code.contains(q)),
        );
    }

    let total = select.clone().count(conn()).await?;

    let sort_column = match sort_by {
        "price" => Column::Price,
        "area" => Column::Area,
        "rooms" => Column::Rooms,
        "floor" => Column::Floor,
        "description" => Column::Description,
        _ => Column::CreatedAt,
    };
    select = if sort_desc {
        select.order_by_desc(sort_column)
    } else {
        select.order_by_asc(sort_column)
    };

    let items = select
        .limit(limit)
        .offset(offset)
        .all(conn())
        .await?
        .into_iter()
        .map(Into::into)
        .collect();

    Ok((items, total))
}

pub async fn insert(aggregate: &Apartment) -> anyhow::Result<Uuid> {
    let uuid = aggregate.base.id.value();
    let active = ActiveModel {
        id: Set(uuid.to_string()),
        code: Set(aggregate.base.code.clone()),
        description: Set(aggregate.base.description.clone()),
        comment: Set(aggregate.base.comment.clone()),
        price: Set(aggregate.price),
        rooms: Set(aggregate.rooms),
        area: Set(aggregate.area),
        floor: Set(aggregate.floor),
        status: Set(aggregate.status.code().to_string()),
        seller_id: Set(aggregate.seller_id.to_string()),
        complex_id: Set(aggregate.complex_id.map(|id| id.to_string())),
        titles: Set(titles_json(aggregate)),
        is_deleted: Set(aggregate.base.metadata.is_deleted),
        created_at: Set(Some(aggregate.base.metadata.created_at)),
        updated_at: Set(Some(aggregate.base.metadata.updated_at)),
        version: Set(aggregate.base.metadata.version),
    };
    active.insert(conn()).await?;
    Ok(uuid)
}

/// Обновление всех полей, кроме статуса: статус меняется только через
/// set_status в одной транзакции со строкой аудита.
pub async fn update(aggregate: &Apartment) -> anyhow::Result<()> {
    let id = aggregate.base.id.value().to_string();
    let active = ActiveModel {
        id: Set(id),
        code: Set(aggregate.base.code.clone()),
        description: Set(aggregate.base.description.clone()),
        comment: Set(aggregate.base.comment.clone()),
        price: Set(aggregate.price),
        rooms: Set(aggregate.rooms),
        area: Set(aggregate.area),
        floor: Set(aggregate.floor),
        seller_id: Set(aggregate.seller_id.to_string()),
        complex_id: Set(aggregate.complex_id.map(|id| id.to_string())),
        titles: Set(titles_json(aggregate)),
        is_deleted: Set(aggregate.base.metadata.is_deleted),
        updated_at: Set(Some(aggregate.base.metadata.updated_at)),
        version: Set(aggregate.base.metadata.version),
        status: sea_orm::ActiveValue::NotSet,
        created_at: sea_orm::ActiveValue::NotSet,
    };
    active.update(conn()).await?;
    Ok(())
}

pub async fn soft_delete(id: Uuid) -> anyhow::Result<bool> {
    use sea_orm::sea_query::Expr;
    let result = Entity::update_many()
        .col_expr(Column::IsDeleted, Expr::value(true))
        .col_expr(Column::UpdatedAt, Expr::value(Utc::now()))
        .filter(Column::Id.eq(id.to_string()))
        .exec(conn())
        .await?;
    Ok(result.rows_affected > 0)
}

/// Записать новый статус (в рамках транзакции вызывающего)
pub async fn set_status<C: ConnectionTrait>(
    db: &C,
    id: Uuid,
    status: ApartmentStatus,
    now: chrono::DateTime<chrono::Utc>,
) -> anyhow::Result<()> {
    use sea_orm::sea_query::Expr;
    Entity::update_many()
        .col_expr(Column::Status, Expr::value(status.code()))
        .col_expr(Column::UpdatedAt, Expr::value(now))
        .col_expr(Column::Version, Expr::col(Column::Version).add(1))
        .filter(Column::Id.eq(id.to_string()))
        .exec(db)
        .await?;
    Ok(())
}
