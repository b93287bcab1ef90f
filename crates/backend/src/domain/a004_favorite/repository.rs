use contracts::domain::a004_favorite::aggregate::Favorite;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use sea_orm::entity::prelude::*;
use sea_orm::{ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set};

use crate::shared::data::db::get_connection;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "a004_favorite")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub user_id: String,
    pub apartment_id: String,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for Favorite {
    fn from(m: Model) -> Self {
        Favorite {
            id: m.id,
            user_id: Uuid::parse_str(&m.user_id).unwrap_or_default(),
            apartment_id: Uuid::parse_str(&m.apartment_id).unwrap_or_default(),
            created_at: m.created_at,
        }
    }
}

fn conn() -> &'static DatabaseConnection {
    get_connection()
}

/// Избранное пользователя, свежие закладки сверху
pub async fn list_by_user(user_id: Uuid) -> anyhow::Result<Vec<Favorite>> {
    let rows = Entity::find()
        .filter(Column::UserId.eq(user_id.to_string()))
        .order_by_desc(Column::Id)
        .all(conn())
        .await?
        .into_iter()
        .map(Into::into)
        .collect();
    Ok(rows)
}

pub async fn find(user_id: Uuid, apartment_id: Uuid) -> anyhow::Result<Option<Favorite>> {
    let row = Entity::find()
        .filter(Column::UserId.eq(user_id.to_string()))
        .filter(Column::ApartmentId.eq(apartment_id.to_string()))
        .one(conn())
        .await?;
    Ok(row.map(Into::into))
}

pub async fn insert(user_id: Uuid, apartment_id: Uuid) -> anyhow::Result<Favorite> {
    let active = ActiveModel {
        id: sea_orm::ActiveValue::NotSet,
        user_id: Set(user_id.to_string()),
        apartment_id: Set(apartment_id.to_string()),
        created_at: Set(chrono::Utc::now()),
    };
    let model = active.insert(conn()).await?;
    Ok(model.into())
}

pub async fn remove(user_id: Uuid, apartment_id: Uuid) -> anyhow::Result<bool> {
    let result = Entity::delete_many()
        .filter(Column::UserId.eq(user_id.to_string()))
        .filter(Column::ApartmentId.eq(apartment_id.to_string()))
        .exec(conn())
        .await?;
    Ok(result.rows_affected > 0)
}
