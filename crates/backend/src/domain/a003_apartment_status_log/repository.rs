use contracts::domain::a003_apartment_status_log::aggregate::ApartmentStatusLog;
use contracts::enums::apartment_status::ApartmentStatus;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use sea_orm::entity::prelude::*;
use sea_orm::{ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, QueryOrder, Set};

use crate::shared::data::db::get_connection;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "a003_apartment_status_log")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub apartment_id: String,
    pub prior_status: String,
    pub new_status: String,
    pub actor_id: String,
    pub reason: Option<String>,
    pub details: Option<String>,
    pub changed_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for ApartmentStatusLog {
    fn from(m: Model) -> Self {
        ApartmentStatusLog {
            id: m.id,
            apartment_id: Uuid::parse_str(&m.apartment_id).unwrap_or_default(),
            prior_status: ApartmentStatus::from_code(&m.prior_status)
                .unwrap_or(ApartmentStatus::Hidden),
            new_status: ApartmentStatus::from_code(&m.new_status)
                .unwrap_or(ApartmentStatus::Hidden),
            actor_id: Uuid::parse_str(&m.actor_id).unwrap_or_default(),
            reason: m.reason,
            details: m
                .details
                .as_deref()
                .and_then(|raw| serde_json::from_str(raw).ok()),
            changed_at: m.changed_at,
        }
    }
}

fn conn() -> &'static DatabaseConnection {
    get_connection()
}

/// Вставить строку аудита (в рамках транзакции вызывающего).
///
/// Вызывается строго вместе с записью нового статуса: одна мутация
/// статуса — ровно одна строка аудита.
#[allow(clippy::too_many_arguments)]
pub async fn insert<C: ConnectionTrait>(
    db: &C,
    apartment_id: Uuid,
    prior_status: ApartmentStatus,
    new_status: ApartmentStatus,
    actor_id: Uuid,
    reason: Option<String>,
    details: Option<serde_json::Value>,
    changed_at: chrono::DateTime<chrono::Utc>,
) -> anyhow::Result<()> {
    let active = ActiveModel {
        id: sea_orm::ActiveValue::NotSet,
        apartment_id: Set(apartment_id.to_string()),
        prior_status: Set(prior_status.code().to_string()),
        new_status: Set(new_status.code().to_string()),
        actor_id: Set(actor_id.to_string()),
        reason: Set(reason),
        details: Set(details.map(|d| d.to_string())),
        changed_at: Set(changed_at),
    };
    active.insert(db).await?;
    Ok(())
}

/// История статусов квартиры, новые записи сверху
pub async fn list_for_apartment(apartment_id: Uuid) -> anyhow::Result<Vec<ApartmentStatusLog>> {
    let rows = Entity::find()
        .filter(Column::ApartmentId.eq(apartment_id.to_string()))
        .order_by_desc(Column::ChangedAt)
        .order_by_desc(Column::Id)
        .all(conn())
        .await?
        .into_iter()
        .map(Into::into)
        .collect();
    Ok(rows)
}

/// Количество строк аудита по квартире
pub async fn count_for_apartment(apartment_id: Uuid) -> anyhow::Result<u64> {
    use sea_orm::PaginatorTrait;
    Ok(Entity::find()
        .filter(Column::ApartmentId.eq(apartment_id.to_string()))
        .count(conn())
        .await?)
}
