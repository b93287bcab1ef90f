use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Избранное: закладка пользователя на квартиру.
/// Уникально по паре (user, apartment); повторное добавление идемпотентно.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Favorite {
    pub id: i64,
    #[serde(rename = "userId")]
    pub user_id: Uuid,
    #[serde(rename = "apartmentId")]
    pub apartment_id: Uuid,
    #[serde(rename = "createdAt")]
    pub created_at: chrono::DateTime<chrono::Utc>,
}
